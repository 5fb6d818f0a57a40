//! Media library backed by a JSON catalog file
//!
//! The catalog lists every track once and playlists by track id:
//!
//! ```json
//! {
//!   "tracks": [{ "id": 1, "title": "So What", "artist": "Miles Davis", "artist_id": 10,
//!                "album": "Kind of Blue", "album_id": 100, "duration": 562.0,
//!                "date_added": "2024-02-06T10:00:00Z", "last_played": null }],
//!   "playlists": [{ "id": 500, "name": "Practice", "tracks": [1] }]
//! }
//! ```

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{AuthorizationStatus, MediaLibrary};
use crate::model::{Collection, Track};

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tracks: Vec<Track>,
    #[serde(default)]
    playlists: Vec<PlaylistEntry>,
}

#[derive(Debug, Deserialize)]
struct PlaylistEntry {
    id: u64,
    name: Option<String>,
    #[serde(default)]
    tracks: Vec<u64>,
}

pub struct CatalogLibrary {
    path: PathBuf,
    status: AuthorizationStatus,
    catalog: CatalogFile,
}

impl CatalogLibrary {
    /// Opens the catalog at `path`. A missing file is not an error; the
    /// library then reports `NotDetermined` until the file appears. An
    /// unreadable catalog reports `Restricted`.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut library = Self {
            path,
            status: AuthorizationStatus::NotDetermined,
            catalog: CatalogFile::default(),
        };
        library.status = library.probe().unwrap_or_else(|e| {
            tracing::error!(error = %format!("{e:#}"), "Library catalog unusable");
            AuthorizationStatus::Restricted
        });
        library
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: CatalogFile = serde_json::from_str(json).context("Failed to parse library catalog")?;
        Ok(Self {
            path: PathBuf::new(),
            status: AuthorizationStatus::Authorized,
            catalog,
        })
    }

    fn probe(&mut self) -> Result<AuthorizationStatus> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                self.catalog = serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse library catalog {}", self.path.display()))?;
                tracing::info!(
                    path = %self.path.display(),
                    tracks = self.catalog.tracks.len(),
                    playlists = self.catalog.playlists.len(),
                    "Library catalog loaded"
                );
                Ok(AuthorizationStatus::Authorized)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(AuthorizationStatus::NotDetermined),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Ok(AuthorizationStatus::Denied),
            Err(e) => Err(e).with_context(|| format!("Failed to read library catalog {}", self.path.display())),
        }
    }

    fn local_tracks(&self) -> impl Iterator<Item = &Track> {
        self.catalog.tracks.iter().filter(|t| !t.cloud)
    }

    fn track_by_id(&self, id: u64) -> Option<&Track> {
        self.catalog.tracks.iter().find(|t| t.id == id)
    }

    fn playlist_collection(&self, entry: &PlaylistEntry) -> Collection {
        let items = entry
            .tracks
            .iter()
            .filter_map(|id| self.track_by_id(*id))
            .filter(|t| !t.cloud)
            .cloned()
            .collect();
        Collection {
            id: entry.id,
            name: entry.name.clone(),
            items,
        }
    }
}

/// Groups tracks by `key`, keeping first-seen order of groups and items.
fn group_by<'a>(tracks: impl Iterator<Item = &'a Track>, key: impl Fn(&Track) -> u64) -> Vec<Collection> {
    let mut slots: HashMap<u64, usize> = HashMap::new();
    let mut groups: Vec<Collection> = Vec::new();
    for track in tracks {
        let id = key(track);
        let slot = *slots.entry(id).or_insert_with(|| {
            groups.push(Collection { id, name: None, items: Vec::new() });
            groups.len() - 1
        });
        groups[slot].items.push(track.clone());
    }
    groups
}

impl MediaLibrary for CatalogLibrary {
    fn authorization_status(&self) -> AuthorizationStatus {
        self.status
    }

    fn request_authorization(&mut self) -> AuthorizationStatus {
        self.status = match self.probe() {
            Ok(AuthorizationStatus::NotDetermined) => AuthorizationStatus::Denied,
            Ok(status) => status,
            Err(e) => {
                tracing::error!(error = %e, "Library catalog unusable");
                AuthorizationStatus::Restricted
            }
        };
        self.status
    }

    fn artists(&self) -> Vec<Collection> {
        group_by(self.local_tracks(), |t| t.artist_id)
    }

    fn albums(&self, artist: Option<&str>) -> Vec<Collection> {
        let tracks = self
            .local_tracks()
            .filter(|t| artist.is_none_or(|name| t.artist.as_deref() == Some(name)));
        group_by(tracks, |t| t.album_id)
    }

    fn playlists(&self) -> Vec<Collection> {
        self.catalog
            .playlists
            .iter()
            .map(|entry| self.playlist_collection(entry))
            .collect()
    }

    fn album_by_id(&self, album_id: u64) -> Option<Collection> {
        group_by(self.catalog.tracks.iter().filter(|t| t.album_id == album_id), |t| t.album_id)
            .into_iter()
            .next()
    }

    fn playlist_by_id(&self, playlist_id: u64) -> Option<Collection> {
        self.catalog
            .playlists
            .iter()
            .find(|p| p.id == playlist_id)
            .map(|entry| self.playlist_collection(entry))
    }
}

#[cfg(test)]
pub(crate) const SAMPLE: &str = r#"{
  "tracks": [
    { "id": 1, "title": "So What", "artist": "Miles Davis", "artist_id": 10,
      "album": "Kind of Blue", "album_id": 100, "duration": 562.0,
      "date_added": "2024-02-06T10:00:00Z" },
    { "id": 2, "title": "Freddie Freeloader", "artist": "Miles Davis", "artist_id": 10,
      "album": "Kind of Blue", "album_id": 100, "duration": 589.0 },
    { "id": 3, "title": "Blue in Green", "artist": "Miles Davis", "artist_id": 10,
      "album": "Kind of Blue", "album_id": 100, "duration": 337.0 },
    { "id": 4, "title": "Giant Steps", "artist": "John Coltrane", "artist_id": 20,
      "album": "Giant Steps", "album_id": 200, "duration": 286.0,
      "date_added": "2024-03-01T10:00:00Z", "last_played": "2024-03-02T10:00:00Z" },
    { "id": 5, "title": "Naima", "artist": "John Coltrane", "artist_id": 20,
      "album": "Giant Steps", "album_id": 200, "duration": 261.0 },
    { "id": 6, "title": "Streamed Only", "artist": "Bill Evans", "artist_id": 30,
      "album": "Cloud Album", "album_id": 300, "duration": 100.0, "cloud": true }
  ],
  "playlists": [
    { "id": 500, "name": "Practice", "tracks": [4, 1, 6] },
    { "id": 501, "tracks": [5] }
  ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn groups_local_tracks_by_artist_and_album() {
        let library = CatalogLibrary::from_json(SAMPLE).unwrap();
        let artists = library.artists();
        assert_eq!(artists.len(), 2);
        assert_eq!(artists[0].items.len(), 3);

        let albums = library.albums(Some("John Coltrane"));
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].id, 200);
        assert_eq!(library.albums(None).len(), 2);
    }

    #[test]
    fn playlists_skip_cloud_items() {
        let library = CatalogLibrary::from_json(SAMPLE).unwrap();
        let practice = library.playlist_by_id(500).unwrap();
        let ids: Vec<u64> = practice.items.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 1]);
        assert!(library.playlist_by_id(999).is_none());
        assert_eq!(library.album_by_id(100).unwrap().items.len(), 3);
        assert!(library.album_by_id(7).is_none());
    }

    #[test]
    fn missing_file_is_not_determined_until_it_appears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        let mut library = CatalogLibrary::open(&path);
        assert_eq!(library.authorization_status(), AuthorizationStatus::NotDetermined);
        assert_eq!(library.request_authorization(), AuthorizationStatus::Denied);

        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        assert_eq!(library.request_authorization(), AuthorizationStatus::Authorized);
        assert_eq!(library.playlists().len(), 2);
    }

    #[test]
    fn malformed_catalog_is_restricted_at_open_and_on_retry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, r#"{ "tracks": [ { "id": "#).unwrap();

        let mut library = CatalogLibrary::open(&path);
        assert_eq!(library.authorization_status(), AuthorizationStatus::Restricted);
        assert!(library.artists().is_empty());
        assert_eq!(library.request_authorization(), AuthorizationStatus::Restricted);

        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(library.request_authorization(), AuthorizationStatus::Authorized);
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        assert!(CatalogLibrary::from_json("{ not json").is_err());
    }
}
