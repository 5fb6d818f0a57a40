//! Main application model with state management

use std::time::Instant;

use crate::host::{AuthorizationStatus, KeyValueStore, MediaLibrary, PlayerEvent, PlayerEventChannel, SystemPlayer};
use crate::transport::Transport;

use super::content::{ContentState, ListRow, count_label, format_date};
use super::library::{LibraryState, SortedList};
use super::playback::{PlaybackInfo, PlaybackSettings, PlaybackState, TrackMetadata};
use super::resume::ResumeRecord;
use super::selection::{BrowseContext, SelectionState};
use super::sorter::SortMode;
use super::types::{Collection, CollectionKind, HomeItem, Screen, Track, UiState};

const ERROR_DISPLAY_SECS: u64 = 5;

/// Seconds into a track before "previous" rewinds instead of stepping back
pub const PREVIOUS_TRACK_WINDOW: f64 = 3.0;

/// `m:ss` for a duration in seconds
pub fn format_seconds(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Browse state captured when a track list is queued, so "Now Playing" can
/// return to it after the user browses elsewhere.
#[derive(Clone, Debug)]
struct SavedTracks {
    tracks: Vec<Track>,
    albums: SortedList,
    selection: SelectionState,
}

/// Main application model containing all state
pub struct AppModel {
    library: Box<dyn MediaLibrary>,
    store: Box<dyn KeyValueStore>,
    transport: Transport,
    pub lists: LibraryState,
    pub selection: SelectionState,
    resume: ResumeRecord,
    saved: Option<SavedTracks>,
    tracks_queued: bool,
    settings: PlaybackSettings,
    pub ui_state: UiState,
    should_quit: bool,
}

impl AppModel {
    pub fn new(
        library: Box<dyn MediaLibrary>,
        player: Box<dyn SystemPlayer>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        let resume = ResumeRecord::load(store.as_ref());
        Self {
            library,
            store,
            transport: Transport::new(player),
            lists: LibraryState::default(),
            selection: SelectionState::default(),
            resume,
            saved: None,
            tracks_queued: false,
            settings: PlaybackSettings::default(),
            ui_state: UiState::default(),
            should_quit: false,
        }
    }

    // ========================================================================
    // Library access
    // ========================================================================

    pub fn authorization_status(&self) -> AuthorizationStatus {
        self.library.authorization_status()
    }

    pub fn request_authorization(&mut self) -> AuthorizationStatus {
        let status = self.library.request_authorization();
        tracing::info!(?status, "Library authorization requested");
        status
    }

    /// First load after access is granted: lists, a quiet player, and the
    /// saved resume point.
    pub fn load_library(&mut self) {
        self.retrieve_artists();
        self.retrieve_playlists();

        self.transport.stop();
        self.transport.reset_modes();

        let restored = self.restore_resume();
        tracing::info!(
            artists = self.lists.artists.len(),
            playlists = self.lists.playlists.len(),
            restored,
            "Library loaded"
        );
    }

    pub fn take_player_events(&mut self) -> Option<PlayerEventChannel> {
        self.transport.take_events()
    }

    pub fn retrieve_artists(&mut self) {
        let artists = self.library.artists();
        self.lists.set_artists(artists);
    }

    /// Loads albums, limited to one artist row when `artist` is in range.
    pub fn retrieve_albums(&mut self, artist: Option<usize>, mode: SortMode) {
        let artist_name = artist
            .filter(|&i| i < self.lists.artists.len())
            .map(|i| self.lists.artist_name(i));
        let albums = self.library.albums(artist_name.as_deref());
        self.lists.set_albums(albums, mode);
    }

    pub fn retrieve_playlists(&mut self) {
        let playlists = self.library.playlists();
        self.lists.set_playlists(playlists);
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn select_artist(&mut self, index: usize) {
        self.selection.select_artist(index);
        self.save_resume();
    }

    pub fn select_album(&mut self, index: usize, artist: Option<usize>) {
        self.selection.select_album(index, artist);
        self.save_resume();
    }

    pub fn select_playlist(&mut self, index: usize) {
        self.selection.select_playlist(index);
        self.save_resume();
    }

    pub fn clear_selections(&mut self) {
        self.selection.clear_all();
    }

    /// Loads an album's tracks and points at the first one.
    pub fn tracks_from_album(&mut self, index: usize, artist: Option<usize>) {
        self.lists.tracks = match self.lists.albums.get(index) {
            Some(album) => album.items.clone(),
            None => Vec::new(),
        };
        if index < self.lists.albums.len() {
            self.selection.select_album(index, artist);
        }
        self.selection.track = if self.lists.tracks.is_empty() { None } else { Some(0) };
    }

    pub fn tracks_from_playlist(&mut self, index: usize) {
        self.lists.tracks = match self.lists.playlists.get(index) {
            Some(playlist) => playlist.items.clone(),
            None => Vec::new(),
        };
        if index < self.lists.playlists.len() {
            self.selection.select_playlist(index);
        }
        self.selection.track = if self.lists.tracks.is_empty() { None } else { Some(0) };
    }

    pub fn open_album(&mut self, index: usize, artist: Option<usize>) {
        self.tracks_from_album(index, artist);
        self.prepare_tracks_to_play();
    }

    pub fn open_playlist(&mut self, index: usize) {
        self.tracks_from_playlist(index);
        self.prepare_tracks_to_play();
    }

    pub fn shuffle_tracks(&mut self) {
        if self.lists.tracks.is_empty() {
            return;
        }
        self.lists.shuffle_tracks();
        self.prepare_tracks_to_play();
    }

    /// Queues the loaded track list on the host, first track current.
    pub fn prepare_tracks_to_play(&mut self) {
        if self.lists.tracks.is_empty() {
            self.transport.set_queue(Vec::new());
            self.tracks_queued = false;
            self.selection.track = None;
        } else {
            self.transport.set_queue(self.lists.tracks.clone());
            self.transport.point_at(Some(0));
            self.tracks_queued = true;
            self.selection.track = Some(0);
        }
        tracing::debug!(tracks = self.lists.tracks.len(), "Tracks queued");
        self.save_tracks_state();
        self.save_resume();
    }

    /// Moves playback to row `index` of the loaded list. Past the end the
    /// selection is cleared and playback stops.
    pub fn select_track(&mut self, index: usize) {
        if index < self.lists.tracks.len() {
            if self.transport.now_playing_index() != Some(index) {
                self.transport.point_at(Some(index));
            }
            self.selection.track = Some(index);
            self.save_resume();
        } else {
            tracing::debug!(index, tracks = self.lists.tracks.len(), "Track index out of range");
            self.clear_selected_track();
        }
    }

    pub fn clear_selected_track(&mut self) {
        self.transport.stop();
        self.selection.track = None;
        self.save_resume();
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.selection.track.and_then(|i| self.lists.tracks.get(i))
    }

    pub fn tracks_are_queued(&self) -> bool {
        self.tracks_queued
    }

    fn save_tracks_state(&mut self) {
        self.saved = Some(SavedTracks {
            tracks: self.lists.tracks.clone(),
            albums: self.lists.albums.clone(),
            selection: self.selection,
        });
    }

    /// Returns to the queued list. The host may have moved on since the
    /// snapshot, so the track pointer is re-read from it.
    pub fn restore_tracks_state(&mut self) -> bool {
        let Some(saved) = self.saved.clone() else {
            return false;
        };
        self.lists.tracks = saved.tracks;
        self.lists.albums = saved.albums;
        self.selection = saved.selection;

        if let Some(index) = self.transport.now_playing_index() {
            if !self.lists.tracks.is_empty() {
                self.selection.track = Some(index % self.lists.tracks.len());
            }
        }
        true
    }

    /// Name of the collection the loaded tracks came from.
    pub fn collection_name(&self) -> String {
        match self.selection.context {
            Some(BrowseContext::Playlist(i)) => self.lists.playlist_name(i),
            Some(BrowseContext::Album { index, .. }) => self.lists.album_name(index),
            _ => self.resume.collection_name.clone(),
        }
    }

    // ========================================================================
    // Transport
    // ========================================================================

    pub fn playback_state(&self) -> PlaybackState {
        self.transport.state()
    }

    pub fn is_playing(&self) -> bool {
        self.transport.is_playing()
    }

    pub fn play(&mut self) {
        if self.selected_track().is_none() {
            return;
        }
        self.transport.play();
        self.save_resume();
    }

    pub fn pause(&mut self) {
        self.transport.pause();
        self.save_resume();
    }

    pub fn toggle_play_pause(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn duration_of_selected(&self) -> f64 {
        self.selected_track().map(|t| t.duration).unwrap_or(0.0)
    }

    pub fn elapsed_of_selected(&self) -> f64 {
        if self.selected_track().is_some() {
            self.transport.elapsed()
        } else {
            0.0
        }
    }

    pub fn seek_to(&mut self, seconds: f64) {
        if self.selected_track().is_none() {
            return;
        }
        let duration = self.duration_of_selected();
        if self.transport.seek_to(seconds, duration) {
            self.save_resume();
        }
    }

    pub fn skip_back(&mut self, seconds: f64) {
        if self.selected_track().is_none() {
            return;
        }
        self.transport.skip_backward(seconds);
        self.save_resume();
    }

    pub fn skip_forward(&mut self, seconds: f64) {
        if self.selected_track().is_none() {
            return;
        }
        let duration = self.duration_of_selected();
        if self.transport.skip_forward(seconds, duration) {
            self.save_resume();
        }
    }

    pub fn rewind(&mut self) {
        if self.selected_track().is_some() {
            self.transport.rewind();
            self.save_resume();
        }
    }

    /// Only takes effect with a selected track. Not persisted.
    pub fn set_rate(&mut self, rate: f32) {
        if self.selected_track().is_some() {
            self.transport.set_rate(rate);
        }
    }

    pub fn at_beginning_of_list(&self) -> bool {
        match self.transport.now_playing() {
            Some(item) => {
                self.transport.elapsed() < PREVIOUS_TRACK_WINDOW
                    && self.lists.tracks.first().is_some_and(|first| first.id == item.id)
            }
            None => true,
        }
    }

    pub fn at_end_of_list(&self) -> bool {
        self.selected_track().is_none() && self.transport.host_state() == PlaybackState::Stopped
    }

    /// Near the start of a track steps back one track, otherwise rewinds.
    pub fn previous_pressed(&mut self) {
        let step_back = !self.at_beginning_of_list() && self.elapsed_of_selected() < PREVIOUS_TRACK_WINDOW;
        match self.selection.track {
            Some(index) if step_back && index > 0 && self.selected_track().is_some() => {
                self.transport.skip_to_previous();
                self.selection.track = Some(index - 1);
            }
            _ => self.transport.rewind(),
        }
        self.save_resume();
    }

    pub fn next_pressed(&mut self) {
        if self.selected_track().is_some() {
            self.transport.skip_to_next();
        }
        if let Some(index) = self.selection.track {
            let next = index + 1;
            self.selection.track = Some(if next == self.lists.tracks.len() { 0 } else { next });
        }
        self.save_resume();
    }

    // ========================================================================
    // Host notifications and polling
    // ========================================================================

    pub fn handle_player_event(&mut self, event: PlayerEvent) {
        if event == PlayerEvent::PlaybackStateChanged {
            self.transport.refresh_state();
        }
        self.update_track_info();
    }

    /// Syncs the track pointer with the host's now-playing row.
    pub fn update_track_info(&mut self) {
        let count = self.lists.tracks.len();
        match self.transport.now_playing_index() {
            Some(index) if count > 0 => {
                self.selection.track = Some(index % count);
                self.save_resume();
            }
            _ if count > 0 => {
                self.selection.track = Some(0);
                self.transport.point_at(Some(0));
                self.save_resume();
                self.transport.mark_stopped();
            }
            _ => {
                self.selection.track = None;
                self.transport.point_at(None);
                self.transport.mark_stopped();
            }
        }
    }

    /// Lets the host advance past the end of a track.
    pub fn tick(&mut self) {
        self.transport.tick();
    }

    /// Periodic refresh while the transcribe screen is showing. Stores the
    /// elapsed time minus `rewind` so a resumed session replays a little.
    /// Only a playing track moves the resume point.
    pub fn poll(&mut self, rewind: f64) {
        self.transport.tick();
        if self.selected_track().is_some() && self.transport.is_playing() {
            let elapsed = self.transport.elapsed();
            self.save_elapsed(elapsed - rewind);
        }
    }

    // ========================================================================
    // Resume persistence
    // ========================================================================

    pub fn resume_usable(&self) -> bool {
        self.resume.usable
    }

    pub fn saved_elapsed(&self) -> f64 {
        self.resume.elapsed_time
    }

    pub fn save_elapsed(&mut self, seconds: f64) {
        self.resume.set_elapsed(seconds);
        self.write_resume();
    }

    /// Re-derives the resume record from the current selection.
    pub fn save_resume(&mut self) {
        let context = self.selection.context;
        match context {
            Some(BrowseContext::Playlist(i)) if i < self.lists.playlists.len() => {
                let id = self.lists.playlists.get(i).map(|p| p.id).unwrap_or(0);
                self.resume.is_playlist = true;
                self.resume.collection_name = self.lists.playlist_name(i);
                self.resume.persistent_id = id.to_string();
            }
            Some(BrowseContext::Album { index, .. }) if index < self.lists.albums.len() => {
                let album_id = self
                    .lists
                    .albums
                    .get(index)
                    .and_then(|a| a.representative())
                    .map(|t| t.album_id);
                match album_id {
                    Some(id) => {
                        self.resume.is_playlist = false;
                        self.resume.collection_name = self.lists.album_name(index);
                        self.resume.persistent_id = id.to_string();
                    }
                    None => {
                        self.resume.usable = false;
                        self.write_resume();
                        return;
                    }
                }
            }
            _ => {
                self.resume.set_track(self.selection.track);
                self.write_resume();
                return;
            }
        }
        self.resume.set_track(self.selection.track);
        self.resume.usable = true;
        self.write_resume();
    }

    /// Reloads the saved collection and parks the player at the saved track
    /// and time without playing. Leaves state untouched when unusable.
    pub fn restore_resume(&mut self) -> bool {
        let id = match self.resume.parsed_id() {
            Some(id) => id,
            None => {
                tracing::debug!(id = %self.resume.persistent_id, "Resume id unparseable");
                self.resume.persistent_id = "0".to_string();
                return self.mark_resume_unusable();
            }
        };
        if id == 0 {
            return self.mark_resume_unusable();
        }

        let collection = if self.resume.is_playlist {
            self.library.playlist_by_id(id)
        } else {
            self.library.album_by_id(id)
        };
        let Some(collection) = collection else {
            tracing::info!(id, is_playlist = self.resume.is_playlist, "Resume collection no longer in library");
            return self.mark_resume_unusable();
        };
        let Some(track) = self.resume.parsed_track().filter(|&t| t < collection.items.len()) else {
            tracing::info!(track = %self.resume.track_number, "Resume track out of range");
            return self.mark_resume_unusable();
        };

        self.lists.tracks = collection.items;
        self.selection.clear_all();
        self.selection.track = Some(track);

        self.transport.set_queue(self.lists.tracks.clone());
        self.transport.point_at(Some(track));
        let elapsed = self.resume.elapsed_time;
        self.transport.seek_to(elapsed, self.duration_of_selected());
        self.tracks_queued = true;
        self.save_tracks_state();

        self.resume.usable = true;
        self.write_resume();
        tracing::info!(id, track, elapsed, name = %self.resume.collection_name, "Resume point restored");
        true
    }

    fn mark_resume_unusable(&mut self) -> bool {
        self.resume.usable = false;
        self.write_resume();
        false
    }

    fn write_resume(&mut self) {
        if let Err(e) = self.resume.store(self.store.as_mut()) {
            tracing::warn!(error = %e, "Failed to persist resume record");
        }
    }

    // ========================================================================
    // Transcription settings
    // ========================================================================

    pub fn settings(&self) -> PlaybackSettings {
        self.settings
    }

    /// Changes speed one step and applies it. A paused track stays paused.
    pub fn step_speed(&mut self, up: bool) {
        self.settings.step_speed(up);
        let was_playing = self.is_playing();
        self.set_rate(self.settings.speed);
        if !was_playing && self.selected_track().is_some() {
            self.transport.pause();
        }
    }

    pub fn step_backup(&mut self, up: bool) {
        self.settings.step_backup(up);
    }

    pub fn playback_info(&self) -> PlaybackInfo {
        let track = match (self.selection.track, self.selected_track()) {
            (Some(i), Some(t)) => TrackMetadata {
                name: self.lists.track_title(i),
                artist: self.lists.track_artist(i),
                album: self.lists.track_album(i),
                duration: t.duration,
            },
            _ => TrackMetadata::default(),
        };
        PlaybackInfo {
            track,
            track_index: self.selection.track,
            track_count: self.lists.tracks.len(),
            collection_name: self.collection_name(),
            elapsed: self.elapsed_of_selected(),
            state: self.transport.state(),
            is_playing: self.is_playing(),
            at_end_of_list: self.at_end_of_list(),
            settings: self.settings,
        }
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.should_quit = quit;
    }

    pub fn row_count(&self, screen: Screen) -> usize {
        match screen {
            Screen::Home => HomeItem::ALL.len(),
            Screen::Artists => self.lists.artists.len(),
            Screen::Albums { .. } | Screen::NewestAlbums | Screen::RecentlyPlayed => self.lists.albums.len(),
            Screen::Playlists => self.lists.playlists.len(),
            Screen::Tracks => self.lists.tracks.len(),
            Screen::Transcribe => 0,
        }
    }

    fn screen_label(&self, screen: Screen) -> String {
        match screen {
            Screen::Albums { artist: Some(a) } => format!("Albums by {}", self.lists.artist_name(a)),
            Screen::Tracks => self.collection_name(),
            other => other.title().to_string(),
        }
    }

    fn rows_for(&self, screen: Screen) -> Vec<ListRow> {
        let collection_rows = |kind: CollectionKind, detail: &dyn Fn(&Collection) -> String| {
            self.lists
                .list(kind)
                .items()
                .iter()
                .map(|c| ListRow::new(c.display_name(kind), detail(c)))
                .collect::<Vec<_>>()
        };
        let album_artist = |c: &Collection| {
            c.representative()
                .and_then(|t| t.artist.clone())
                .unwrap_or_else(|| CollectionKind::Artist.placeholder().to_string())
        };

        match screen {
            Screen::Home => HomeItem::ALL
                .iter()
                .map(|&item| match item {
                    HomeItem::Resume => {
                        let detail = if self.resume_usable() { self.resume.collection_name.clone() } else { String::new() };
                        ListRow::new(item.label(), detail).disabled(!self.resume_usable())
                    }
                    HomeItem::NowPlaying => {
                        let detail = if self.tracks_queued {
                            self.transport.now_playing().and_then(|t| t.title).unwrap_or_default()
                        } else {
                            String::new()
                        };
                        ListRow::new(item.label(), detail).disabled(!self.tracks_queued)
                    }
                    _ => ListRow::new(item.label(), ""),
                })
                .collect(),
            Screen::Artists | Screen::Playlists => {
                let kind = if screen == Screen::Artists { CollectionKind::Artist } else { CollectionKind::Playlist };
                collection_rows(kind, &|c: &Collection| count_label(c.items.len(), "track"))
            }
            Screen::Albums { .. } => collection_rows(CollectionKind::Album, &album_artist),
            Screen::NewestAlbums => collection_rows(CollectionKind::Album, &|c: &Collection| {
                format!("{}  added {}", album_artist(c), format_date(c.date_added(), "unknown"))
            }),
            Screen::RecentlyPlayed => collection_rows(CollectionKind::Album, &|c: &Collection| {
                format!("{}  played {}", album_artist(c), format_date(c.last_played(), "never"))
            }),
            Screen::Tracks => self
                .lists
                .tracks
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    ListRow::new(self.lists.track_title(i), format_seconds(t.duration))
                        .current(self.selection.track == Some(i))
                })
                .collect(),
            Screen::Transcribe => Vec::new(),
        }
    }

    pub fn content_state(&self) -> ContentState {
        let screen = self.ui_state.screen();
        let title = self
            .ui_state
            .screens
            .iter()
            .map(|&s| self.screen_label(s))
            .collect::<Vec<_>>()
            .join(" › ");
        let rows = self.rows_for(screen);
        let cursor = self.ui_state.cursor();
        let letter = screen.alpha_kind().and_then(|_| rows.get(cursor)).map(|row| {
            match row.label.chars().next().map(|c| c.to_ascii_uppercase()) {
                Some(c) if c.is_ascii_uppercase() => c,
                _ => '#',
            }
        });
        ContentState { screen, title, rows, cursor, letter }
    }

    pub fn move_selection_up(&mut self) {
        let cursor = self.ui_state.cursor();
        self.ui_state.set_cursor(cursor.saturating_sub(1));
    }

    pub fn move_selection_down(&mut self) {
        let rows = self.row_count(self.ui_state.screen());
        let cursor = self.ui_state.cursor();
        if cursor + 1 < rows {
            self.ui_state.set_cursor(cursor + 1);
        }
    }

    /// Jumps the cursor to where `letter` starts in the current list.
    pub fn jump_to_letter(&mut self, letter: char) {
        if let Some(kind) = self.ui_state.screen().alpha_kind() {
            let row = self.lists.list(kind).alpha().row_for(letter);
            self.ui_state.set_cursor(row);
        }
    }

    pub fn set_error(&mut self, message: String) {
        self.ui_state.error_message = Some(message);
        self.ui_state.error_timestamp = Some(Instant::now());
    }

    pub fn clear_error(&mut self) {
        self.ui_state.error_message = None;
        self.ui_state.error_timestamp = None;
    }

    pub fn has_error(&self) -> bool {
        self.ui_state.error_message.is_some()
    }

    pub fn auto_clear_old_errors(&mut self) {
        if let Some(timestamp) = self.ui_state.error_timestamp {
            if timestamp.elapsed().as_secs() > ERROR_DISPLAY_SECS {
                self.clear_error();
            }
        }
    }

    pub fn set_blocking_message(&mut self, message: Option<String>) {
        self.ui_state.blocking_message = message;
    }

    pub fn show_help_popup(&mut self) {
        self.ui_state.show_help_popup = true;
    }

    pub fn hide_help_popup(&mut self) {
        self.ui_state.show_help_popup = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{CATALOG_SAMPLE, CatalogLibrary, ClockPlayer, JsonFileStore, KeyValueStore, MemoryStore};
    use crate::model::resume::keys;

    fn model_with(store: Box<dyn KeyValueStore>) -> AppModel {
        let library = CatalogLibrary::from_json(CATALOG_SAMPLE).unwrap();
        let mut model = AppModel::new(Box::new(library), Box::new(ClockPlayer::new()), store);
        model.load_library();
        model
    }

    fn model() -> AppModel {
        model_with(Box::new(MemoryStore::default()))
    }

    fn album_row(model: &AppModel, name: &str) -> usize {
        (0..model.lists.albums.len())
            .find(|&i| model.lists.album_name(i) == name)
            .unwrap()
    }

    #[test]
    fn load_sorts_lists_and_builds_letter_maps() {
        let model = model();
        assert_eq!(model.lists.artist_name(0), "John Coltrane");
        assert_eq!(model.lists.artist_name(1), "Miles Davis");
        assert_eq!(model.lists.artists.alpha().row_for('M'), 1);
        // unnamed playlist sorts as "No Name" before "Practice"
        assert_eq!(model.lists.playlist_name(0), "No Name");
        assert!(!model.resume_usable());
    }

    #[test]
    fn albums_can_be_limited_to_one_artist() {
        let mut model = model();
        model.retrieve_albums(Some(1), SortMode::ByNameAscending);
        assert_eq!(model.lists.albums.len(), 1);
        assert_eq!(model.lists.album_name(0), "Kind of Blue");

        model.retrieve_albums(Some(99), SortMode::ByNameAscending);
        assert_eq!(model.lists.albums.len(), 2);

        model.retrieve_albums(None, SortMode::ByDateAddedDescending);
        assert_eq!(model.lists.album_name(0), "Giant Steps");
    }

    #[test]
    fn opening_an_album_queues_it_and_persists_the_record() {
        let mut model = model();
        model.retrieve_albums(None, SortMode::ByNameAscending);
        let row = album_row(&model, "Kind of Blue");
        model.open_album(row, None);

        assert_eq!(model.lists.tracks.len(), 3);
        assert_eq!(model.selection.track, Some(0));
        assert!(model.tracks_are_queued());
        assert!(model.resume_usable());
        assert_eq!(model.collection_name(), "Kind of Blue");
        assert_eq!(model.resume.persistent_id, "100");
        assert!(!model.resume.is_playlist);
    }

    #[test]
    fn out_of_range_track_clears_selection_and_stops() {
        let mut model = model();
        model.open_playlist(1);
        model.play();
        assert!(model.is_playing());

        model.select_track(5);
        assert_eq!(model.selection.track, None);
        assert_eq!(model.playback_state(), PlaybackState::Stopped);
        assert!(!model.is_playing());
    }

    #[test]
    fn select_track_moves_the_host() {
        let mut model = model();
        model.retrieve_albums(None, SortMode::ByNameAscending);
        let row = album_row(&model, "Kind of Blue");
        model.open_album(row, None);
        model.select_track(2);
        assert_eq!(model.transport.now_playing_index(), Some(2));
        assert_eq!(model.resume.track_number, "2");
        model.select_track(0);
        assert_eq!(model.transport.now_playing_index(), Some(0));
    }

    #[test]
    fn seek_respects_duration_of_selected_track() {
        let mut model = model();
        model.retrieve_albums(None, SortMode::ByNameAscending);
        let row = album_row(&model, "Giant Steps");
        model.open_album(row, None);
        let duration = model.duration_of_selected();
        assert_eq!(duration, 286.0);

        model.seek_to(duration);
        assert_eq!(model.elapsed_of_selected(), 0.0);
        model.seek_to(-1.0);
        assert_eq!(model.elapsed_of_selected(), 0.0);
        model.seek_to(duration - 0.01);
        assert!((model.elapsed_of_selected() - (duration - 0.01)).abs() < 1e-9);
    }

    #[test]
    fn previous_rewinds_late_in_track_and_steps_back_early() {
        let mut model = model();
        model.retrieve_albums(None, SortMode::ByNameAscending);
        let row = album_row(&model, "Kind of Blue");
        model.open_album(row, None);
        model.select_track(1);

        model.seek_to(10.0);
        model.previous_pressed();
        assert_eq!(model.selection.track, Some(1));
        assert_eq!(model.elapsed_of_selected(), 0.0);

        model.previous_pressed();
        assert_eq!(model.selection.track, Some(0));
        assert_eq!(model.transport.now_playing_index(), Some(0));

        // at the head of the list previous only rewinds
        model.seek_to(1.0);
        model.previous_pressed();
        assert_eq!(model.selection.track, Some(0));
        assert_eq!(model.elapsed_of_selected(), 0.0);
    }

    #[test]
    fn next_wraps_to_the_first_track() {
        let mut model = model();
        model.retrieve_albums(None, SortMode::ByNameAscending);
        let row = album_row(&model, "Giant Steps");
        model.open_album(row, None);
        model.next_pressed();
        assert_eq!(model.selection.track, Some(1));
        model.next_pressed();
        assert_eq!(model.selection.track, Some(0));
    }

    #[test]
    fn rate_needs_a_selected_track() {
        let mut model = model();
        model.set_rate(0.4);
        assert_eq!(model.transport.rate(), 1.0);

        model.open_playlist(1);
        model.set_rate(0.4);
        assert!((model.transport.rate() - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn resume_round_trip_restores_track_and_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        {
            let mut model = model_with(Box::new(JsonFileStore::open(&path).unwrap()));
            model.retrieve_albums(None, SortMode::ByNameAscending);
            let row = album_row(&model, "Kind of Blue");
            model.open_album(row, None);
            model.select_track(2);
            model.seek_to(120.0);
            model.save_elapsed(model.elapsed_of_selected());
        }

        let model = model_with(Box::new(JsonFileStore::open(&path).unwrap()));
        assert!(model.resume_usable());
        assert_eq!(model.selection.track, Some(2));
        assert_eq!(model.selection.context, None);
        assert_eq!(model.lists.tracks.len(), 3);
        assert!((model.elapsed_of_selected() - 120.0).abs() < 0.5);
        assert!(!model.is_playing());
        assert_eq!(model.collection_name(), "Kind of Blue");
    }

    #[test]
    fn resume_from_playlist_uses_playlist_lookup() {
        let mut store = MemoryStore::default();
        store.set(keys::IS_PLAYLIST, "true".to_string());
        store.set(keys::PERSISTENT_ID, "500".to_string());
        store.set(keys::TRACK_NUMBER, "1".to_string());
        let model = model_with(Box::new(store));
        assert!(model.resume_usable());
        assert_eq!(model.selected_track().map(|t| t.id), Some(1));
    }

    #[test]
    fn unusable_resume_ids_leave_state_alone() {
        for id in ["0", "not-a-number", "424242"] {
            let mut model = model();
            model.open_playlist(1);
            let tracks_before = model.lists.tracks.clone();
            let selection_before = model.selection;

            model.resume.persistent_id = id.to_string();
            assert!(!model.restore_resume());
            assert!(!model.resume_usable());
            assert_eq!(model.lists.tracks, tracks_before);
            assert_eq!(model.selection, selection_before);
        }
    }

    #[test]
    fn unparseable_id_is_reset_to_zero() {
        let mut model = model();
        model.resume.persistent_id = "x1".to_string();
        model.restore_resume();
        assert_eq!(model.resume.persistent_id, "0");
    }

    #[test]
    fn album_without_representative_marks_record_unusable() {
        let mut model = model();
        model.lists.set_albums(
            vec![Collection { id: 1, name: None, items: vec![] }],
            SortMode::ByNameAscending,
        );
        model.select_album(0, None);
        assert!(!model.resume_usable());
        assert_eq!(model.resume.persistent_id, "0");
    }

    #[test]
    fn now_playing_returns_to_the_queued_list() {
        let mut model = model();
        model.open_playlist(1);
        model.select_track(1);

        model.clear_selections();
        model.retrieve_albums(None, SortMode::ByNameAscending);
        model.tracks_from_album(0, None);

        assert!(model.restore_tracks_state());
        assert_eq!(model.selection.playlist(), Some(1));
        assert_eq!(model.selection.track, Some(1));
        assert_eq!(model.collection_name(), "Practice");
    }

    #[test]
    fn host_notifications_resync_the_track_pointer() {
        let mut model = model();
        model.open_playlist(1);
        model.transport.skip_to_next();
        model.handle_player_event(PlayerEvent::NowPlayingItemChanged);
        assert_eq!(model.selection.track, Some(1));

        // the host ran off the end of the queue
        model.transport.skip_to_next();
        model.handle_player_event(PlayerEvent::NowPlayingItemChanged);
        assert_eq!(model.selection.track, Some(0));
        assert_eq!(model.playback_state(), PlaybackState::Stopped);
        assert!(model.at_beginning_of_list());
    }

    #[test]
    fn poll_stores_elapsed_minus_rewind() {
        let mut model = model();
        model.open_playlist(1);
        model.seek_to(30.0);
        model.play();
        model.poll(5.0);
        assert!((model.saved_elapsed() - 25.0).abs() < 0.5);
        model.seek_to(2.0);
        model.poll(5.0);
        assert_eq!(model.saved_elapsed(), 0.0);
    }

    #[test]
    fn end_of_list_needs_no_track_and_a_stopped_host() {
        let mut model = model();
        assert!(model.at_end_of_list());

        model.open_playlist(1);
        assert!(!model.at_end_of_list());
        model.play();
        assert!(!model.at_end_of_list());
        assert!(!model.playback_info().at_end_of_list);

        model.select_track(99);
        assert!(model.at_end_of_list());
        assert!(model.playback_info().at_end_of_list);
    }

    #[test]
    fn paused_poll_leaves_resume_point_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        {
            let mut model = model_with(Box::new(JsonFileStore::open(&path).unwrap()));
            model.open_playlist(1);
            model.seek_to(120.0);
            model.save_elapsed(model.elapsed_of_selected());
        }

        let mut resumed = Vec::new();
        for _ in 0..3 {
            let mut model = model_with(Box::new(JsonFileStore::open(&path).unwrap()));
            assert!(model.resume_usable());
            assert!(!model.is_playing());
            resumed.push(model.elapsed_of_selected());
            model.poll(5.0);
        }
        for elapsed in resumed {
            assert!((elapsed - 120.0).abs() < 0.5, "resumed at {elapsed}");
        }
    }

    #[test]
    fn speed_change_keeps_a_paused_track_paused() {
        let mut model = model();
        model.open_playlist(1);
        model.step_speed(false);
        assert!(!model.is_playing());
        assert!((model.settings().speed - 0.8).abs() < 1e-6);
    }

    #[test]
    fn content_snapshot_reflects_the_top_screen() {
        let mut model = model();
        let home = model.content_state();
        assert_eq!(home.rows.len(), HomeItem::ALL.len());
        assert!(!home.rows[0].enabled);
        assert!(!home.rows[1].enabled);

        model.open_playlist(1);
        model.ui_state.push(Screen::Playlists);
        model.ui_state.push(Screen::Tracks);
        let tracks = model.content_state();
        assert_eq!(tracks.title, "SayItAgain › Playlists › Practice");
        assert_eq!(tracks.rows[0].label, "Giant Steps");
        assert_eq!(tracks.rows[0].detail, "4:46");
        assert!(tracks.rows[0].current);
        assert_eq!(tracks.letter, None);

        let home = {
            model.ui_state.pop();
            model.ui_state.pop();
            model.content_state()
        };
        assert!(home.rows[1].enabled);
    }

    #[test]
    fn seconds_format_as_minutes() {
        assert_eq!(format_seconds(0.0), "0:00");
        assert_eq!(format_seconds(59.9), "0:59");
        assert_eq!(format_seconds(562.0), "9:22");
        assert_eq!(format_seconds(-4.0), "0:00");
    }

    #[test]
    fn letter_jump_uses_the_screen_list() {
        let mut model = model();
        model.ui_state.push(Screen::Artists);
        model.jump_to_letter('m');
        assert_eq!(model.ui_state.cursor(), 1);
        model.move_selection_down();
        assert_eq!(model.ui_state.cursor(), 1);
        model.move_selection_up();
        assert_eq!(model.ui_state.cursor(), 0);
    }
}
