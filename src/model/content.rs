//! Content view state: the rows of the screen on top of the stack

use chrono::{DateTime, Utc};

use super::types::Screen;

/// One row of a list screen
#[derive(Clone, Debug, PartialEq)]
pub struct ListRow {
    pub label: String,
    /// Secondary column (artist, track count, date, duration)
    pub detail: String,
    /// Disabled rows are shown dimmed and ignore Enter
    pub enabled: bool,
    /// Marks the track the transport points at
    pub current: bool,
}

impl ListRow {
    pub fn new(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: detail.into(),
            enabled: true,
            current: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.enabled = !disabled;
        self
    }

    pub fn current(mut self, current: bool) -> Self {
        self.current = current;
        self
    }
}

/// Snapshot of everything a list screen needs to render
#[derive(Clone, Debug)]
pub struct ContentState {
    pub screen: Screen,
    /// Breadcrumb of the navigation stack
    pub title: String,
    pub rows: Vec<ListRow>,
    pub cursor: usize,
    /// Letter the cursor row files under, on alphabetical lists
    pub letter: Option<char>,
}

pub fn format_date(date: Option<DateTime<Utc>>, missing: &str) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => missing.to_string(),
    }
}

pub fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
