//! Loaded collection lists, their letter maps, and name lookups

use rand::seq::SliceRandom;

use super::alpha_map::AlphaMap;
use super::sorter::{SortMode, sort_collections};
use super::types::{Collection, CollectionKind, Track};

pub const BAD_TRACK_INDEX: &str = "Bad Track Index!";
pub const NO_TRACK_NAME: &str = "No Track Name!";
pub const NO_TRACK_ARTIST: &str = "No Track Artist!";
pub const NO_ALBUM_TITLE: &str = "No Album Title!";

/// A sorted collection list together with the letter map built from it
#[derive(Clone, Debug, Default)]
pub struct SortedList {
    items: Vec<Collection>,
    alpha: AlphaMap,
}

impl SortedList {
    fn new(list: Vec<Collection>, kind: CollectionKind, mode: SortMode) -> Self {
        let items = sort_collections(list, kind, mode);
        let names: Vec<String> = items.iter().map(|c| c.display_name(kind)).collect();
        let alpha = AlphaMap::for_kind(&names, kind);
        Self { items, alpha }
    }

    pub fn items(&self) -> &[Collection] {
        &self.items
    }

    pub fn alpha(&self) -> &AlphaMap {
        &self.alpha
    }

    pub fn get(&self, index: usize) -> Option<&Collection> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct LibraryState {
    pub artists: SortedList,
    pub albums: SortedList,
    pub playlists: SortedList,
    pub tracks: Vec<Track>,
}

impl LibraryState {
    pub fn set_artists(&mut self, list: Vec<Collection>) {
        self.artists = SortedList::new(list, CollectionKind::Artist, SortMode::ByNameAscending);
    }

    pub fn set_albums(&mut self, list: Vec<Collection>, mode: SortMode) {
        self.albums = SortedList::new(list, CollectionKind::Album, mode);
    }

    pub fn set_playlists(&mut self, list: Vec<Collection>) {
        self.playlists = SortedList::new(list, CollectionKind::Playlist, SortMode::ByNameAscending);
    }

    pub fn list(&self, kind: CollectionKind) -> &SortedList {
        match kind {
            CollectionKind::Artist => &self.artists,
            CollectionKind::Album => &self.albums,
            CollectionKind::Playlist => &self.playlists,
        }
    }

    /// Display name of a row, or an empty string past the end.
    pub fn name(&self, kind: CollectionKind, index: usize) -> String {
        self.list(kind)
            .get(index)
            .map(|c| c.display_name(kind))
            .unwrap_or_default()
    }

    pub fn artist_name(&self, index: usize) -> String {
        self.name(CollectionKind::Artist, index)
    }

    pub fn album_name(&self, index: usize) -> String {
        self.name(CollectionKind::Album, index)
    }

    pub fn playlist_name(&self, index: usize) -> String {
        self.name(CollectionKind::Playlist, index)
    }

    pub fn track_title(&self, index: usize) -> String {
        self.track_field(index, |t| t.title.clone(), NO_TRACK_NAME)
    }

    pub fn track_artist(&self, index: usize) -> String {
        self.track_field(index, |t| t.artist.clone(), NO_TRACK_ARTIST)
    }

    pub fn track_album(&self, index: usize) -> String {
        self.track_field(index, |t| t.album.clone(), NO_ALBUM_TITLE)
    }

    fn track_field(&self, index: usize, field: impl Fn(&Track) -> Option<String>, missing: &str) -> String {
        match self.tracks.get(index) {
            Some(t) => field(t).unwrap_or_else(|| missing.to_string()),
            None => BAD_TRACK_INDEX.to_string(),
        }
    }

    pub fn shuffle_tracks(&mut self) {
        self.tracks.shuffle(&mut rand::thread_rng());
    }
}
