//! Playback-related types and state management

pub const MIN_SPEED: f32 = 0.0;
pub const MAX_SPEED: f32 = 2.0;
pub const SPEED_STEP: f32 = 0.2;
pub const MAX_BACKUP_SECONDS: u8 = 10;
pub const DEFAULT_BACKUP_SECONDS: u8 = 5;

/// Transport state, cached locally from the host player
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
    Interrupted,
    SeekingForward,
    SeekingBackward,
}

/// Metadata about the selected track
#[derive(Clone, Debug, PartialEq)]
pub struct TrackMetadata {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub duration: f64,
}

impl Default for TrackMetadata {
    fn default() -> Self {
        Self {
            name: "No track selected".to_string(),
            artist: String::new(),
            album: String::new(),
            duration: 0.0,
        }
    }
}

/// Transcription controls the user tunes while listening
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackSettings {
    pub speed: f32,
    pub backup_seconds: u8,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            backup_seconds: DEFAULT_BACKUP_SECONDS,
        }
    }
}

impl PlaybackSettings {
    /// Moves the speed one step, snapped to the 0.2 grid.
    pub fn step_speed(&mut self, up: bool) {
        let steps = (self.speed / SPEED_STEP).round() as i32 + if up { 1 } else { -1 };
        self.speed = (steps as f32 * SPEED_STEP).clamp(MIN_SPEED, MAX_SPEED);
    }

    pub fn step_backup(&mut self, up: bool) {
        self.backup_seconds = if up {
            (self.backup_seconds + 1).min(MAX_BACKUP_SECONDS)
        } else {
            self.backup_seconds.saturating_sub(1)
        };
    }
}

/// Complete playback information for rendering the UI
#[derive(Clone, Debug, Default)]
pub struct PlaybackInfo {
    pub track: TrackMetadata,
    pub track_index: Option<usize>,
    pub track_count: usize,
    pub collection_name: String,
    pub elapsed: f64,
    pub state: PlaybackState,
    pub is_playing: bool,
    /// Nothing selected and the host stopped
    pub at_end_of_list: bool,
    pub settings: PlaybackSettings,
}
