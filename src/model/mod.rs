//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (tracks, collections, screens, UI state)
//! - `alpha_map`: Letter-to-row index for jumping through sorted lists
//! - `sorter`: Ordering of artist, album and playlist lists
//! - `selection`: Browse context and the current track pointer
//! - `library`: Loaded lists and name lookups
//! - `playback`: Playback-related state (track metadata, transcription settings)
//! - `resume`: The durable resume record
//! - `content`: Row snapshots of the screen being shown
//! - `app_model`: Main application model with state management methods

mod types;
mod alpha_map;
mod sorter;
mod selection;
mod library;
mod playback;
pub(crate) mod resume;
mod content;
mod app_model;

// Re-export all public types for convenient access
pub use types::{Collection, CollectionKind, HomeItem, Screen, Track, UiState};

#[cfg(test)]
pub(crate) use types::track;

pub use alpha_map::AlphaMap;

pub use sorter::{SortMode, sort_collections};

pub use selection::{BrowseContext, SelectionState};

pub use library::{LibraryState, SortedList};

pub use playback::{PlaybackInfo, PlaybackSettings, PlaybackState, TrackMetadata};

pub use resume::ResumeRecord;

pub use content::{ContentState, ListRow};

pub use app_model::{AppModel, format_seconds};
