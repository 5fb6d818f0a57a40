//! Runtime configuration read from `SAYITAGAIN_*` environment variables

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_LIBRARY: &str = "library.json";
const DEFAULT_STATE_DIR: &str = ".state";
const DEFAULT_LOG_DIR: &str = ".logs";
const DEFAULT_POLL_MS: u64 = 500;
const DEFAULT_RESUME_REWIND: f64 = 5.0;
const SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// JSON catalog the media library is read from
    pub library_path: PathBuf,
    pub state_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Refresh interval of the transcribe screen
    pub poll_interval: Duration,
    /// Seconds subtracted from the saved elapsed time
    pub resume_rewind: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            library_path: PathBuf::from(DEFAULT_LIBRARY),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            poll_interval: Duration::from_millis(DEFAULT_POLL_MS),
            resume_rewind: DEFAULT_RESUME_REWIND,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = lookup("SAYITAGAIN_LIBRARY") {
            config.library_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("SAYITAGAIN_STATE_DIR") {
            config.state_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("SAYITAGAIN_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(ms) = lookup("SAYITAGAIN_POLL_MS") {
            let ms: u64 = ms
                .trim()
                .parse()
                .with_context(|| format!("SAYITAGAIN_POLL_MS is not a whole number: {ms}"))?;
            config.poll_interval = Duration::from_millis(ms.max(1));
        }
        if let Some(seconds) = lookup("SAYITAGAIN_RESUME_REWIND") {
            let seconds: f64 = seconds
                .trim()
                .parse()
                .with_context(|| format!("SAYITAGAIN_RESUME_REWIND is not a number: {seconds}"))?;
            config.resume_rewind = seconds.max(0.0);
        }
        Ok(config)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.state_dir.join(SETTINGS_FILE)
    }
}
