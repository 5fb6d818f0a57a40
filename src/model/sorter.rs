//! Ordering of artist, album and playlist lists

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use super::types::{Collection, CollectionKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortMode {
    ByNameAscending,
    /// Newest additions first
    ByDateAddedDescending,
    /// Least recently played first
    ByLastPlayedAscending,
}

/// Returns `list` ordered by `mode`.
///
/// Names compare case-sensitively, placeholders included. Entries without
/// the date a mode needs sort after every dated entry and keep their input
/// order among themselves.
pub fn sort_collections(mut list: Vec<Collection>, kind: CollectionKind, mode: SortMode) -> Vec<Collection> {
    match mode {
        SortMode::ByNameAscending => {
            list.sort_by_cached_key(|c| c.display_name(kind));
        }
        SortMode::ByDateAddedDescending => {
            list.sort_by(|a, b| dated_last(a.date_added(), b.date_added(), |x, y| y.cmp(x)));
        }
        SortMode::ByLastPlayedAscending => {
            list.sort_by(|a, b| dated_last(a.last_played(), b.last_played(), |x, y| x.cmp(y)));
        }
    }
    list
}

fn dated_last(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    order: impl Fn(&DateTime<Utc>, &DateTime<Utc>) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => order(&x, &y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
