//! Overlay rendering (error notification, blocking message, help popup)

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{Screen, UiState};
use super::utils::centered_rect;

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        let popup_width = 52.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4).max(1) as usize;

        // Lines the message takes once wrapped
        let error_line_count = error_msg.chars().count().div_ceil(inner_width) as u16;
        let popup_area = centered_rect(area, popup_width, 2 + error_line_count.max(1));

        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(error_msg.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error (Esc to dismiss) ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

/// Full-screen message shown while the library is unavailable
pub fn render_blocking_message(frame: &mut Frame, message: &str) {
    let area = frame.area();
    let height = message.lines().count() as u16 + 4;
    let popup_area = centered_rect(area, 70, height);

    frame.render_widget(Clear, area);
    let widget = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Music Library ")
                .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        );
    frame.render_widget(widget, popup_area);
}

fn keybindings(screen: Screen) -> Vec<(&'static str, &'static str)> {
    let mut keys = vec![("", "── Navigation ──")];
    if screen == Screen::Transcribe {
        keys.extend([
            ("Esc", "Back to tracks (pauses)"),
            ("", ""),
            ("", "── Transcribe ──"),
            ("Space", "Play / Pause"),
            ("← / ↑", "Back up (pedal left)"),
            ("→ / ↓", "Play / Pause (pedal right)"),
            ("F", "Skip forward"),
            ("[ / ]", "Speed down / up"),
            ("- / +", "Back-up seconds down / up"),
            ("N", "Next track"),
            ("P", "Previous track or restart"),
            ("0", "Restart track"),
        ]);
    } else {
        keys.extend([
            ("↑ / ↓", "Move selection"),
            ("Enter / →", "Open"),
            ("Esc / ←", "Go back"),
            ("A-Z", "Jump to letter (sorted lists)"),
            ("S", "Shuffle (track list)"),
        ]);
    }
    keys.extend([
        ("", ""),
        ("", "── General ──"),
        ("?", "Toggle this help"),
        ("Q", "Quit (outside sorted lists)"),
        ("Ctrl+Q", "Quit from anywhere"),
    ]);
    keys
}

pub fn render_help_popup(frame: &mut Frame, screen: Screen) {
    let keybindings = keybindings(screen);
    let popup_area = centered_rect(frame.area(), 62, keybindings.len() as u16 + 2);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (? or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_pedal_keys_only_when_transcribing() {
        let has = |screen: Screen, key: &str| keybindings(screen).iter().any(|(k, _)| *k == key);
        assert!(has(Screen::Transcribe, "[ / ]"));
        assert!(!has(Screen::Artists, "[ / ]"));
        assert!(has(Screen::Artists, "A-Z"));
    }
}
