//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::Screen;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let mut model = self.model.lock().await;

        // Ctrl+Q and Ctrl+C quit from anywhere
        if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('q' | 'c')) {
            model.set_should_quit(true);
            return Ok(());
        }

        // Blocking message swallows everything but retry and quit
        if model.ui_state.blocking_message.is_some() {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true),
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    drop(model);
                    self.initialize_library().await;
                }
                _ => {}
            }
            return Ok(());
        }

        if model.has_error() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error();
            }
            return Ok(());
        }

        if model.ui_state.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h' | 'H' | '?')) {
                model.hide_help_popup();
            }
            return Ok(());
        }

        let screen = model.ui_state.screen();
        drop(model);

        if screen == Screen::Transcribe {
            self.handle_transcribe_key(key).await;
        } else {
            self.handle_list_key(screen, key).await;
        }
        Ok(())
    }

    async fn handle_list_key(&self, screen: Screen, key: KeyEvent) {
        let mut model = self.model.lock().await;
        match key.code {
            KeyCode::Up => model.move_selection_up(),
            KeyCode::Down => model.move_selection_down(),
            KeyCode::Enter | KeyCode::Right => {
                drop(model);
                self.open_selected().await;
            }
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => {
                drop(model);
                self.navigate_back().await;
            }
            KeyCode::Char('?') => model.show_help_popup(),
            // Letters on alphabetical lists jump instead of acting as commands
            KeyCode::Char(c) if c.is_ascii_alphabetic() && screen.alpha_kind().is_some() => {
                model.jump_to_letter(c);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true),
            KeyCode::Char('h') | KeyCode::Char('H') => model.show_help_popup(),
            KeyCode::Char('s') | KeyCode::Char('S') if screen == Screen::Tracks => {
                model.shuffle_tracks();
                model.ui_state.set_cursor(0);
            }
            _ => {}
        }
    }

    async fn handle_transcribe_key(&self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(' ') => self.toggle_playback().await,
            // Foot pedals send arrow keys: left backs up, right toggles
            KeyCode::Left | KeyCode::Up => self.back_up().await,
            KeyCode::Right | KeyCode::Down => self.toggle_playback().await,
            KeyCode::Char('f') | KeyCode::Char('F') => self.skip_ahead().await,
            KeyCode::Char('[') => self.change_speed(false).await,
            KeyCode::Char(']') => self.change_speed(true).await,
            KeyCode::Char('-') => self.change_backup(false).await,
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_backup(true).await,
            KeyCode::Char('n') | KeyCode::Char('N') => self.next_track().await,
            KeyCode::Char('p') | KeyCode::Char('P') => self.previous_track().await,
            KeyCode::Char('0') => self.rewind_track().await,
            KeyCode::Esc | KeyCode::Backspace => self.leave_transcribe().await,
            KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
                self.model.lock().await.show_help_popup();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.model.lock().await.set_should_quit(true);
            }
            _ => {}
        }
    }
}
