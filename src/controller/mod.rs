//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives the transport.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `playback`: Transport commands and the transcribe poll
//! - `navigation`: Library loading and screen navigation
//! - `player_events`: System player notification listener

mod input;
mod playback;
mod navigation;
mod player_events;

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::AppConfig;
use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    config: Arc<AppConfig>,
    event_listener_started: Arc<Mutex<bool>>,
    poll_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>, config: AppConfig) -> Self {
        Self {
            model,
            config: Arc::new(config),
            event_listener_started: Arc::new(Mutex::new(false)),
            poll_task: Arc::new(Mutex::new(None)),
        }
    }

    /// Start the player event listener once; later calls are no-ops.
    pub(crate) async fn try_start_event_listener(&self) {
        let mut started = self.event_listener_started.lock().await;
        if *started {
            return;
        }

        let events = self.model.lock().await.take_player_events();
        if let Some(events) = events {
            *started = true;
            drop(started);
            self.start_player_event_listener(events);
        }
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        format!("Error: {error:#}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{CATALOG_SAMPLE, CatalogLibrary, ClockPlayer, MemoryStore};

    pub(crate) fn controller() -> AppController {
        let library = CatalogLibrary::from_json(CATALOG_SAMPLE).unwrap();
        let model = AppModel::new(
            Box::new(library),
            Box::new(ClockPlayer::new()),
            Box::new(MemoryStore::default()),
        );
        AppController::new(Arc::new(Mutex::new(model)), AppConfig::default())
    }

    #[tokio::test]
    async fn event_listener_starts_once() {
        let controller = controller();
        controller.try_start_event_listener().await;
        assert!(*controller.event_listener_started.lock().await);
        // the channel is gone, a second start changes nothing
        controller.try_start_event_listener().await;
        assert!(controller.model.lock().await.take_player_events().is_none());
    }

    #[test]
    fn errors_show_their_context_chain() {
        let error = anyhow::anyhow!("file missing").context("Failed to open library");
        assert_eq!(
            AppController::format_error(&error),
            "Error: Failed to open library: file missing"
        );
    }
}
