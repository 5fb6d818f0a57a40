//! Browse context and track pointer

/// The list row the current track list was reached through.
///
/// Only one context can be active; an album may additionally remember the
/// artist row it was opened from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowseContext {
    Artist(usize),
    Album { index: usize, artist: Option<usize> },
    Playlist(usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub context: Option<BrowseContext>,
    /// Row in the loaded track list
    pub track: Option<usize>,
}

impl SelectionState {
    pub fn select_artist(&mut self, index: usize) {
        self.context = Some(BrowseContext::Artist(index));
    }

    pub fn select_album(&mut self, index: usize, artist: Option<usize>) {
        self.context = Some(BrowseContext::Album { index, artist });
    }

    pub fn select_playlist(&mut self, index: usize) {
        self.context = Some(BrowseContext::Playlist(index));
    }

    pub fn clear_all(&mut self) {
        self.context = None;
    }

    pub fn artist(&self) -> Option<usize> {
        match self.context {
            Some(BrowseContext::Artist(i)) => Some(i),
            Some(BrowseContext::Album { artist, .. }) => artist,
            _ => None,
        }
    }

    pub fn album(&self) -> Option<usize> {
        match self.context {
            Some(BrowseContext::Album { index, .. }) => Some(index),
            _ => None,
        }
    }

    pub fn playlist(&self) -> Option<usize> {
        match self.context {
            Some(BrowseContext::Playlist(i)) => Some(i),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_count(s: &SelectionState) -> usize {
        [s.artist().is_some() && s.album().is_none(), s.album().is_some(), s.playlist().is_some()]
            .iter()
            .filter(|&&b| b)
            .count()
    }

    #[test]
    fn every_select_replaces_the_others() {
        type Op = fn(&mut SelectionState);
        let ops: [Op; 3] = [
            |s| s.select_artist(1),
            |s| s.select_album(2, None),
            |s| s.select_playlist(3),
        ];
        for first in ops {
            for second in ops {
                let mut s = SelectionState::default();
                first(&mut s);
                second(&mut s);
                assert_eq!(active_count(&s), 1);
            }
        }
    }

    #[test]
    fn album_clears_artist_unless_given_as_context() {
        let mut s = SelectionState::default();
        s.select_artist(4);
        s.select_album(0, None);
        assert_eq!(s.artist(), None);
        assert_eq!(s.album(), Some(0));

        s.select_album(1, Some(4));
        assert_eq!(s.artist(), Some(4));
        assert_eq!(s.playlist(), None);

        s.select_playlist(2);
        assert_eq!((s.artist(), s.album(), s.playlist()), (None, None, Some(2)));
    }

    #[test]
    fn clear_all_keeps_the_track_pointer() {
        let mut s = SelectionState { context: Some(BrowseContext::Playlist(0)), track: Some(3) };
        s.clear_all();
        assert_eq!(s.context, None);
        assert_eq!(s.track, Some(3));
    }
}
