//! Progress bar and transcribe panel rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
    Frame,
};

use crate::model::{PlaybackInfo, PlaybackState, format_seconds};

pub fn render_progress_bar(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let status_text = if playback.at_end_of_list {
        " End of list".to_string()
    } else if playback.track_index.is_none() {
        " No track selected".to_string()
    } else if playback.is_playing {
        format!(" ▶ {} | {} ({})", playback.track.name, playback.track.artist, playback.track.album)
    } else {
        format!("⏸  {} | {} ({})", playback.track.name, playback.track.artist, playback.track.album)
    };

    let time_str = format!(
        "{} / {}",
        format_seconds(playback.elapsed),
        format_seconds(playback.track.duration)
    );

    let controls_info = format!(
        " Speed: {:.1}x | Backup: {}s ",
        playback.settings.speed, playback.settings.backup_seconds
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ", status_text))
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(progress_ratio(playback.elapsed, playback.track.duration))
        .label(time_str);

    frame.render_widget(gauge, area);
}

fn progress_ratio(elapsed: f64, duration: f64) -> f64 {
    if duration > 0.0 {
        (elapsed / duration).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn state_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Stopped => "Stopped",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Interrupted => "Interrupted",
        PlaybackState::SeekingForward => "Seeking forward",
        PlaybackState::SeekingBackward => "Seeking back",
    }
}

pub fn render_transcribe_panel(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", playback.collection_name))
        .padding(Padding::uniform(1))
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Track info
            Constraint::Length(3), // Elapsed time
            Constraint::Min(0),    // Settings and key hints
        ])
        .split(inner);

    let position = match playback.track_index {
        Some(i) => format!("Track {} of {}", i + 1, playback.track_count),
        None => String::new(),
    };
    let info = Paragraph::new(vec![
        Line::from(Span::styled(
            playback.track.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{} · {}", playback.track.artist, playback.track.album)),
        Line::from(Span::styled(position, Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(info, chunks[0]);

    let clock_style = if playback.is_playing {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };
    let clock = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} / {}", format_seconds(playback.elapsed), format_seconds(playback.track.duration)),
            clock_style,
        )),
        Line::from(Span::styled(state_label(playback.state), Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(clock, chunks[1]);

    let key = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    let hints = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Speed "),
            Span::styled(format!("{:.1}x", playback.settings.speed), key),
            Span::raw("   Back up "),
            Span::styled(format!("{}s", playback.settings.backup_seconds), key),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Space", key),
            Span::raw(" play/pause  "),
            Span::styled("←", key),
            Span::raw(" back up  "),
            Span::styled("f", key),
            Span::raw(" forward  "),
            Span::styled("[ ]", key),
            Span::raw(" speed  "),
            Span::styled("- +", key),
            Span::raw(" back-up seconds"),
        ]),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[2]);
}
