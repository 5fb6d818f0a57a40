//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Header with the navigation breadcrumb
//! - `content`: List screens
//! - `progress`: Progress bar and the transcribe panel
//! - `overlays`: Modal overlays (error, blocking message, help)

mod utils;
mod layout;
mod content;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, PlaybackInfo, Screen, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, playback: &PlaybackInfo, ui_state: &UiState, content_state: &ContentState) {
        if let Some(message) = &ui_state.blocking_message {
            overlays::render_blocking_message(frame, message);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Breadcrumb
                Constraint::Min(0),    // List or transcribe panel
                Constraint::Length(3), // Progress bar with playback info
            ])
            .split(frame.area());

        layout::render_header(frame, chunks[0], content_state);

        if content_state.screen == Screen::Transcribe {
            progress::render_transcribe_panel(frame, chunks[1], playback);
        } else {
            content::render_list_screen(frame, chunks[1], content_state);
        }

        progress::render_progress_bar(frame, chunks[2], playback);

        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame, content_state.screen);
        }
    }
}
