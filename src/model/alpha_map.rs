//! Letter jump index over a sorted collection list
//!
//! For each letter A..Z the map holds the row in the sorted list where names
//! starting with that letter begin, so a list view can jump straight to it.

use super::types::CollectionKind;

pub const LETTERS: usize = 26;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlphaMap([usize; LETTERS]);

impl Default for AlphaMap {
    fn default() -> Self {
        Self([0; LETTERS])
    }
}

impl AlphaMap {
    /// Builds the map for `names`, which must already be sorted.
    ///
    /// The result is only monotonic when the sort order agrees with the
    /// uppercased first letter; a lowercase name sorted after `Z` keeps its
    /// own row in bucket A.
    ///
    /// Names whose first character is not a letter land in `fallback`.
    /// A bucket that legitimately points at row 0 cannot be told apart from an
    /// unset bucket; forward filling from bucket 0 makes both read the same.
    pub fn build<S: AsRef<str>>(names: &[S], fallback: usize) -> Self {
        let mut map = [0usize; LETTERS];
        if names.is_empty() {
            return Self(map);
        }

        for (row, name) in names.iter().enumerate() {
            let bucket = bucket_of(name.as_ref()).unwrap_or(fallback.min(LETTERS - 1));
            if map[bucket] == 0 {
                map[bucket] = row;
            }
        }

        let mut previous = map[0];
        for entry in map.iter_mut().skip(1) {
            if *entry == 0 {
                *entry = previous;
            }
            previous = *entry;
        }

        if map[25] < map[24] {
            map[25] = map[24];
        }

        Self(map)
    }

    pub fn for_kind<S: AsRef<str>>(names: &[S], kind: CollectionKind) -> Self {
        Self::build(names, fallback_bucket(kind))
    }

    /// Row to scroll to for `letter`; non-letters map to row 0.
    pub fn row_for(&self, letter: char) -> usize {
        bucket_of_char(letter).map(|b| self.0[b]).unwrap_or(0)
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[usize; LETTERS] {
        &self.0
    }
}

/// Bucket used for names that do not start with A..Z.
///
/// Playlists park them under Z, artists and albums under A.
pub fn fallback_bucket(kind: CollectionKind) -> usize {
    match kind {
        CollectionKind::Playlist => 25,
        CollectionKind::Artist | CollectionKind::Album => 0,
    }
}

fn bucket_of(name: &str) -> Option<usize> {
    name.chars().next().and_then(bucket_of_char)
}

fn bucket_of_char(c: char) -> Option<usize> {
    let upper = c.to_uppercase().next()?;
    if upper.is_ascii_uppercase() {
        Some(upper as usize - 'A' as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fills_forward_to_last_entry() {
        let map = AlphaMap::build(&["Apple", "Banana", "Cherry"], 0);
        let entries = map.entries();
        assert_eq!(entries[0], 0);
        assert_eq!(entries[1], 1);
        assert_eq!(entries[2], 2);
        assert!(entries[3..].iter().all(|&v| v == 2));
    }

    #[test]
    fn empty_list_is_all_zeros() {
        let names: [&str; 0] = [];
        assert_eq!(AlphaMap::build(&names, 0).entries(), &[0; LETTERS]);
    }

    #[test]
    fn first_occurrence_wins_and_case_is_ignored() {
        let map = AlphaMap::build(&["Abba", "beatles", "Blur", "Doors", "Eels"], 0);
        assert_eq!(map.row_for('b'), 1);
        assert_eq!(map.row_for('C'), 1);
        assert_eq!(map.row_for('D'), 3);
        assert_eq!(map.row_for('e'), 4);
        assert_eq!(map.row_for('Z'), 4);
        assert_eq!(map.row_for('#'), 0);
    }

    #[test]
    fn non_letters_use_the_kind_fallback() {
        let artists = AlphaMap::for_kind(&["99 Luftballons", "Alpha", "Bravo"], CollectionKind::Artist);
        assert_eq!(artists.entries()[0], 1);
        assert_eq!(artists.entries()[1], 2);
        assert_eq!(artists.entries()[25], 2);

        let playlists = AlphaMap::for_kind(&["Alpha", "Bravo", "~tilde"], CollectionKind::Playlist);
        assert_eq!(playlists.entries()[1], 1);
        assert_eq!(playlists.entries()[24], 1);
        assert_eq!(playlists.entries()[25], 2);
    }

    #[test]
    fn empty_name_falls_back() {
        let map = AlphaMap::build(&["", "Moby"], 25);
        assert_eq!(map.row_for('M'), 1);
        assert_eq!(map.row_for('Z'), 1);
    }

    proptest! {
        #[test]
        fn map_is_monotonic_and_in_bounds(
            mut names in proptest::collection::vec("[0-9A-Z][ -~]{0,7}", 0..40),
            fallback in prop_oneof![Just(0usize), Just(25usize)],
        ) {
            names.sort();
            let map = AlphaMap::build(&names, fallback);
            let entries = map.entries();
            prop_assert_eq!(entries.len(), LETTERS);
            prop_assert!(entries.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(entries.iter().all(|&v| v < names.len().max(1)));
            prop_assert!(entries[25] >= entries[24]);
        }
    }
}
