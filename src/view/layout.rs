//! Header rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::ContentState;

pub fn render_header(frame: &mut Frame, area: Rect, content_state: &ContentState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Breadcrumb
            Constraint::Length(14), // Help hint
        ])
        .split(area);

    let breadcrumb = Paragraph::new(content_state.title.as_str())
        .style(Style::default().fg(Color::Green))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" SayItAgain ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(breadcrumb, chunks[0]);

    let hint = Paragraph::new("? help")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).padding(Padding::horizontal(1)));
    frame.render_widget(hint, chunks[1]);
}
