//! List screen rendering (home menu, artists, albums, playlists, tracks)

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{ContentState, ListRow, Screen};
use super::utils::{calculate_num_width, render_scrollable_list, truncate_string};

const LETTERS: &str = "#ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub fn render_list_screen(frame: &mut Frame, area: Rect, content_state: &ContentState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", content_state.screen.title()))
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(Color::Green));

    if content_state.rows.is_empty() {
        let empty = Paragraph::new(empty_hint(content_state.screen))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let (list_area, letters_area) = if content_state.letter.is_some() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let content_width = list_area.width.saturating_sub(4) as usize;
    let numbered = content_state.screen == Screen::Tracks;
    let items = list_items(&content_state.rows, content_state.cursor, content_width, numbered);
    render_scrollable_list(frame, list_area, items, content_state.cursor, block);

    if let (Some(area), Some(letter)) = (letters_area, content_state.letter) {
        render_letter_strip(frame, area, letter);
    }
}

fn empty_hint(screen: Screen) -> &'static str {
    match screen {
        Screen::Artists => "No artists in the library",
        Screen::Playlists => "No playlists in the library",
        Screen::Tracks => "This collection has no playable tracks",
        _ => "No albums in the library",
    }
}

fn list_items(rows: &[ListRow], cursor: usize, content_width: usize, numbered: bool) -> Vec<ListItem<'static>> {
    let num_width = if numbered { calculate_num_width(rows.len()) } else { 0 };
    let detail_width = rows.iter().map(|r| r.detail.chars().count()).max().unwrap_or(0).min(content_width / 2);
    // marker(2) + num + label + gap(2) + detail
    let label_width = content_width.saturating_sub(2 + num_width + 2 + detail_width).max(1);

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let selected = i == cursor;
            let style = if !row.enabled {
                Style::default().fg(Color::DarkGray)
            } else if selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if row.current { "▶ " } else if selected { "› " } else { "  " };
            let num = if numbered { format!("{:<width$}", i + 1, width = num_width) } else { String::new() };

            let line = Line::from(vec![
                Span::styled(marker, style),
                Span::styled(num, Style::default().fg(Color::DarkGray)),
                Span::styled(truncate_string(&row.label, label_width), style),
                Span::raw("  "),
                Span::styled(
                    format!("{:>width$}", truncate_string(&row.detail, detail_width).trim_end(), width = detail_width),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect()
}

fn render_letter_strip(frame: &mut Frame, area: Rect, current: char) {
    let spans: Vec<Span> = LETTERS
        .chars()
        .map(|c| {
            let style = if c == current {
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!("{c} "), style)
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}
