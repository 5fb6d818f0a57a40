//! Library loading and screen navigation

use crate::host::AuthorizationStatus;
use crate::model::{HomeItem, Screen, SortMode};
use super::AppController;

impl AppController {
    /// Checks library access, asking once when undecided, and loads the
    /// library when granted. Otherwise shows a blocking message.
    pub async fn initialize_library(&self) {
        let mut model = self.model.lock().await;
        let status = match model.authorization_status() {
            AuthorizationStatus::Authorized => AuthorizationStatus::Authorized,
            _ => model.request_authorization(),
        };
        tracing::info!(?status, "Library authorization");

        if status == AuthorizationStatus::Authorized {
            model.set_blocking_message(None);
            model.load_library();
            drop(model);
            self.try_start_event_listener().await;
            return;
        }

        let reason = match status {
            AuthorizationStatus::Restricted => "could not be read",
            _ => "was not found or is not readable",
        };
        model.set_blocking_message(Some(format!(
            "SayItAgain needs access to your music library.\n\nThe catalog {} {}.\nFix it and press r to retry, or q to quit.",
            self.config.library_path.display(),
            reason
        )));
    }

    /// Enter on the cursor row of the current screen.
    pub async fn open_selected(&self) {
        let model = self.model.lock().await;
        let screen = model.ui_state.screen();
        let row = model.ui_state.cursor();
        if row >= model.row_count(screen) {
            return;
        }
        drop(model);

        match screen {
            Screen::Home => self.open_home_item(HomeItem::ALL[row]).await,
            Screen::Artists => {
                let mut model = self.model.lock().await;
                model.select_artist(row);
                model.retrieve_albums(Some(row), SortMode::ByNameAscending);
                model.ui_state.push(Screen::Albums { artist: Some(row) });
            }
            Screen::Albums { artist } => {
                let mut model = self.model.lock().await;
                model.open_album(row, artist);
                model.ui_state.push(Screen::Tracks);
            }
            Screen::NewestAlbums | Screen::RecentlyPlayed => {
                let mut model = self.model.lock().await;
                model.open_album(row, None);
                model.ui_state.push(Screen::Tracks);
            }
            Screen::Playlists => {
                let mut model = self.model.lock().await;
                model.open_playlist(row);
                model.ui_state.push(Screen::Tracks);
            }
            Screen::Tracks => {
                self.model.lock().await.select_track(row);
                self.enter_transcribe().await;
            }
            Screen::Transcribe => {}
        }
    }

    pub async fn open_home_item(&self, item: HomeItem) {
        tracing::debug!(?item, "Opening home item");
        let mut model = self.model.lock().await;
        match item {
            HomeItem::Resume => {
                if !model.resume_usable() {
                    return;
                }
                if !model.restore_resume() {
                    model.set_error("The saved track is no longer in the library.".to_string());
                    return;
                }
                drop(model);
                self.enter_transcribe().await;
            }
            HomeItem::NowPlaying => {
                if !model.tracks_are_queued() {
                    return;
                }
                model.restore_tracks_state();
                drop(model);
                self.enter_transcribe().await;
            }
            HomeItem::Artists => {
                model.clear_selections();
                model.retrieve_artists();
                model.ui_state.push(Screen::Artists);
            }
            HomeItem::Albums => {
                model.clear_selections();
                model.retrieve_albums(None, SortMode::ByNameAscending);
                model.ui_state.push(Screen::Albums { artist: None });
            }
            HomeItem::NewestAlbums => {
                model.clear_selections();
                model.retrieve_albums(None, SortMode::ByDateAddedDescending);
                model.ui_state.push(Screen::NewestAlbums);
            }
            HomeItem::RecentlyPlayed => {
                model.clear_selections();
                model.retrieve_albums(None, SortMode::ByLastPlayedAscending);
                model.ui_state.push(Screen::RecentlyPlayed);
            }
            HomeItem::Playlists => {
                model.clear_selections();
                model.retrieve_playlists();
                model.ui_state.push(Screen::Playlists);
            }
        }
    }

    pub(crate) async fn enter_transcribe(&self) {
        self.model.lock().await.ui_state.push(Screen::Transcribe);
        self.start_transcribe_poll().await;
    }

    /// Leaving the transcribe screen pauses playback.
    pub(crate) async fn leave_transcribe(&self) {
        self.stop_transcribe_poll().await;
        let mut model = self.model.lock().await;
        if model.is_playing() {
            model.pause();
        }
        model.ui_state.pop();
    }

    pub async fn navigate_back(&self) {
        let screen = self.model.lock().await.ui_state.screen();
        if screen == Screen::Transcribe {
            self.leave_transcribe().await;
        } else {
            self.model.lock().await.ui_state.pop();
        }
    }
}
