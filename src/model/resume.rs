//! Resume record kept in durable settings
//!
//! The record is read and written as a unit through [`KeyValueStore`]; each
//! field maps to one settings key.

use anyhow::Result;

use crate::host::KeyValueStore;

pub mod keys {
    pub const IS_PLAYLIST: &str = "isPlaylist";
    pub const PERSISTENT_ID: &str = "persistentID";
    pub const TRACK_NUMBER: &str = "trackNumber";
    pub const COLLECTION_NAME: &str = "collectionName";
    pub const USABLE: &str = "usable";
    pub const ELAPSED_TIME: &str = "elapsedTime";
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResumeRecord {
    pub is_playlist: bool,
    /// Decimal u64; kept as text because it is stored and parsed as text
    pub persistent_id: String,
    pub track_number: String,
    pub collection_name: String,
    pub usable: bool,
    pub elapsed_time: f64,
}

impl Default for ResumeRecord {
    fn default() -> Self {
        Self {
            is_playlist: false,
            persistent_id: "0".to_string(),
            track_number: "0".to_string(),
            collection_name: String::new(),
            usable: false,
            elapsed_time: 0.0,
        }
    }
}

impl ResumeRecord {
    /// Reads the record, using defaults for missing or malformed keys.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        Self {
            is_playlist: store.get(keys::IS_PLAYLIST).as_deref() == Some("true"),
            persistent_id: store.get(keys::PERSISTENT_ID).unwrap_or(defaults.persistent_id),
            track_number: store.get(keys::TRACK_NUMBER).unwrap_or(defaults.track_number),
            collection_name: store.get(keys::COLLECTION_NAME).unwrap_or(defaults.collection_name),
            usable: store.get(keys::USABLE).as_deref() == Some("true"),
            elapsed_time: store
                .get(keys::ELAPSED_TIME)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.elapsed_time),
        }
    }

    pub fn store(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(keys::IS_PLAYLIST, self.is_playlist.to_string());
        store.set(keys::PERSISTENT_ID, self.persistent_id.clone());
        store.set(keys::TRACK_NUMBER, self.track_number.clone());
        store.set(keys::COLLECTION_NAME, self.collection_name.clone());
        store.set(keys::USABLE, self.usable.to_string());
        store.set(keys::ELAPSED_TIME, self.elapsed_time.to_string());
        store.flush()
    }

    /// `None` for an unparseable id, `Some(0)` for the unset id.
    pub fn parsed_id(&self) -> Option<u64> {
        self.persistent_id.trim().parse().ok()
    }

    pub fn parsed_track(&self) -> Option<usize> {
        self.track_number.trim().parse().ok()
    }

    pub fn set_track(&mut self, track: Option<usize>) {
        self.track_number = track.unwrap_or(0).to_string();
    }

    pub fn set_elapsed(&mut self, seconds: f64) {
        self.elapsed_time = seconds.max(0.0);
    }
}
