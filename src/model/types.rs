//! Core type definitions for the application

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const NO_NAME: &str = "No Name";

/// A single library item. Owned by the host library, only referenced here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: u64,
    pub title: Option<String>,
    pub artist: Option<String>,
    #[serde(default)]
    pub artist_id: u64,
    pub album: Option<String>,
    #[serde(default)]
    pub album_id: u64,
    /// Playback duration in seconds
    pub duration: f64,
    pub date_added: Option<DateTime<Utc>>,
    pub last_played: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cloud: bool,
}

/// Which kind of grouping a [`Collection`] came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionKind {
    Artist,
    Album,
    Playlist,
}

impl CollectionKind {
    pub fn placeholder(self) -> &'static str {
        match self {
            CollectionKind::Artist => UNKNOWN_ARTIST,
            CollectionKind::Album => UNKNOWN_ALBUM,
            CollectionKind::Playlist => NO_NAME,
        }
    }
}

/// An artist, album or playlist snapshot as returned by a library query.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection {
    pub id: u64,
    /// Only playlists carry their own name; artists and albums are named
    /// through their representative item.
    pub name: Option<String>,
    pub items: Vec<Track>,
}

impl Collection {
    pub fn representative(&self) -> Option<&Track> {
        self.items.first()
    }

    pub fn display_name(&self, kind: CollectionKind) -> String {
        let name = match kind {
            CollectionKind::Artist => self.representative().and_then(|t| t.artist.clone()),
            CollectionKind::Album => self.representative().and_then(|t| t.album.clone()),
            CollectionKind::Playlist => self.name.clone(),
        };
        name.unwrap_or_else(|| kind.placeholder().to_string())
    }

    pub fn date_added(&self) -> Option<DateTime<Utc>> {
        self.representative().and_then(|t| t.date_added)
    }

    pub fn last_played(&self) -> Option<DateTime<Utc>> {
        self.representative().and_then(|t| t.last_played)
    }
}

/// Entries of the home menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HomeItem {
    Resume,
    NowPlaying,
    Artists,
    Albums,
    NewestAlbums,
    RecentlyPlayed,
    Playlists,
}

impl HomeItem {
    pub const ALL: [HomeItem; 7] = [
        HomeItem::Resume,
        HomeItem::NowPlaying,
        HomeItem::Artists,
        HomeItem::Albums,
        HomeItem::NewestAlbums,
        HomeItem::RecentlyPlayed,
        HomeItem::Playlists,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HomeItem::Resume => "Resume",
            HomeItem::NowPlaying => "Now Playing",
            HomeItem::Artists => "Artists",
            HomeItem::Albums => "Albums",
            HomeItem::NewestAlbums => "Newest Albums",
            HomeItem::RecentlyPlayed => "Recently Played",
            HomeItem::Playlists => "Playlists",
        }
    }
}

/// Which screen is on top of the navigation stack
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    Artists,
    /// Album list; `Some(artist)` when opened from an artist row
    Albums { artist: Option<usize> },
    NewestAlbums,
    RecentlyPlayed,
    Playlists,
    Tracks,
    Transcribe,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "SayItAgain",
            Screen::Artists => "Artists",
            Screen::Albums { artist: Some(_) } => "Albums by Artist",
            Screen::Albums { artist: None } => "Albums",
            Screen::NewestAlbums => "Newest Albums",
            Screen::RecentlyPlayed => "Recently Played",
            Screen::Playlists => "Playlists",
            Screen::Tracks => "Tracks",
            Screen::Transcribe => "Transcribe",
        }
    }

    /// Which alpha map, if any, serves letter jumps on this screen
    pub fn alpha_kind(self) -> Option<CollectionKind> {
        match self {
            Screen::Artists => Some(CollectionKind::Artist),
            Screen::Albums { .. } => Some(CollectionKind::Album),
            Screen::Playlists => Some(CollectionKind::Playlist),
            _ => None,
        }
    }
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub screens: Vec<Screen>,
    /// Cursor row per entry of `screens`
    pub cursors: Vec<usize>,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    /// Blocking message; while set every key but quit is ignored
    pub blocking_message: Option<String>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            screens: vec![Screen::Home],
            cursors: vec![0],
            error_message: None,
            error_timestamp: None,
            blocking_message: None,
            show_help_popup: false,
        }
    }
}

impl UiState {
    pub fn screen(&self) -> Screen {
        self.screens.last().copied().unwrap_or(Screen::Home)
    }

    pub fn cursor(&self) -> usize {
        self.cursors.last().copied().unwrap_or(0)
    }

    pub fn set_cursor(&mut self, row: usize) {
        if let Some(cursor) = self.cursors.last_mut() {
            *cursor = row;
        }
    }

    pub fn push(&mut self, screen: Screen) {
        self.screens.push(screen);
        self.cursors.push(0);
    }

    /// Pops the top screen; the home screen is never popped.
    pub fn pop(&mut self) -> Option<Screen> {
        if self.screens.len() <= 1 {
            return None;
        }
        self.cursors.pop();
        self.screens.pop()
    }
}

#[cfg(test)]
pub(crate) fn track(id: u64, title: &str, album: &str, album_id: u64, duration: f64) -> Track {
    Track {
        id,
        title: Some(title.to_string()),
        artist: Some("Artist".to_string()),
        artist_id: 1,
        album: Some(album.to_string()),
        album_id,
        duration,
        date_added: None,
        last_played: None,
        cloud: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_fall_back_to_placeholders() {
        let empty = Collection { id: 9, name: None, items: vec![] };
        assert_eq!(empty.display_name(CollectionKind::Artist), "Unknown Artist");
        assert_eq!(empty.display_name(CollectionKind::Album), "Unknown Album");
        assert_eq!(empty.display_name(CollectionKind::Playlist), "No Name");

        let mut item = track(1, "Song", "Record", 7, 60.0);
        item.artist = None;
        let album = Collection { id: 7, name: None, items: vec![item] };
        assert_eq!(album.display_name(CollectionKind::Album), "Record");
        assert_eq!(album.display_name(CollectionKind::Artist), "Unknown Artist");
    }

    #[test]
    fn home_screen_is_never_popped() {
        let mut ui = UiState::default();
        assert_eq!(ui.pop(), None);
        ui.push(Screen::Artists);
        ui.set_cursor(4);
        assert_eq!(ui.cursor(), 4);
        assert_eq!(ui.pop(), Some(Screen::Artists));
        assert_eq!(ui.screen(), Screen::Home);
        assert_eq!(ui.cursor(), 0);
    }
}
