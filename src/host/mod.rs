//! Host services the app binds to but does not implement
//!
//! - `MediaLibrary`: the device music library (queries over artists, albums,
//!   playlists)
//! - `SystemPlayer`: the single system-wide player and its now-playing queue
//! - `KeyValueStore`: small durable settings storage
//!
//! The submodules hold the bindings shipped with the app:
//!
//! - `catalog`: a library backed by a JSON catalog file
//! - `player`: a clock-driven player that keeps transport state
//! - `store`: JSON file and in-memory key-value stores

mod catalog;
mod player;
mod store;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::model::{Collection, PlaybackState, Track};

pub use catalog::CatalogLibrary;
pub use player::ClockPlayer;
pub use store::{JsonFileStore, MemoryStore};

#[cfg(test)]
pub(crate) use catalog::SAMPLE as CATALOG_SAMPLE;

/// Library access permission as reported by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorizationStatus {
    Authorized,
    Denied,
    NotDetermined,
    Restricted,
}

pub trait MediaLibrary: Send {
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Asks the host for access. Returns the status after the request.
    fn request_authorization(&mut self) -> AuthorizationStatus;

    /// One collection per artist, local items only, unordered
    fn artists(&self) -> Vec<Collection>;

    /// One collection per album, optionally limited to one artist name
    fn albums(&self, artist: Option<&str>) -> Vec<Collection>;

    fn playlists(&self) -> Vec<Collection>;

    fn album_by_id(&self, album_id: u64) -> Option<Collection>;

    fn playlist_by_id(&self, playlist_id: u64) -> Option<Collection>;
}

/// Notifications posted by the system player
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerEvent {
    NowPlayingItemChanged,
    PlaybackStateChanged,
}

pub type PlayerEventChannel = mpsc::UnboundedReceiver<PlayerEvent>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatMode {
    Off,
    All,
    One,
}

pub trait SystemPlayer: Send {
    fn set_queue(&mut self, items: Vec<Track>);

    /// Points the player at a queue row without starting playback.
    fn set_now_playing(&mut self, index: Option<usize>);

    fn now_playing_index(&self) -> Option<usize>;

    fn now_playing(&self) -> Option<Track>;

    /// A positive rate plays, zero pauses.
    fn set_rate(&mut self, rate: f32);

    /// Not reliable right after `set_rate`.
    fn rate(&self) -> f32;

    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, seconds: f64);

    fn skip_to_next(&mut self);

    fn skip_to_previous(&mut self);

    fn skip_to_beginning(&mut self);

    fn stop(&mut self);

    fn prepare_to_play(&mut self) {}

    fn playback_state(&self) -> PlaybackState;

    fn set_shuffle(&mut self, on: bool);

    fn set_repeat(&mut self, mode: RepeatMode);

    /// Gives the player a chance to advance on its own (end of item).
    fn tick(&mut self) {}

    /// Hands out the notification channel. Only the first call gets it.
    fn take_events(&mut self) -> Option<PlayerEventChannel>;
}

pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String);

    /// Makes every `set` so far durable.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
