//! Whole-file JSON persistence of the tally store.

use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{info, warn};

use crate::state::TallyStore;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reading or writing the data file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The data file exists but could not be read.
    #[error("failed to read tallies from `{path}`")]
    Read {
        /// Data file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The data file is not a valid tally document.
    #[error("failed to parse tallies from `{path}`")]
    Parse {
        /// Data file path.
        path: PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The store could not be encoded.
    #[error("failed to serialize tallies")]
    Serialize(#[source] serde_json::Error),
    /// The snapshot could not be written.
    #[error("failed to write tallies to `{path}`")]
    Write {
        /// Data file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Single JSON document holding the entire store, overwritten on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the file at `path`. The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing file is an empty store.
    pub fn load(&self) -> StorageResult<TallyStore> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(TallyStore::default()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Read the document, falling back to an empty store on any failure.
    pub fn load_or_default(&self) -> TallyStore {
        match self.load() {
            Ok(tallies) => {
                info!(
                    path = %self.path.display(),
                    games = tallies.game_count(),
                    "loaded tallies"
                );
                tallies
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to load tallies; starting empty"
                );
                TallyStore::default()
            }
        }
    }

    /// Overwrite the document with a pretty-printed snapshot of `tallies`.
    pub fn save(&self, tallies: &TallyStore) -> StorageResult<()> {
        let payload = serde_json::to_string_pretty(tallies).map_err(StorageError::Serialize)?;
        fs::write(&self.path, payload).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tally_store::{Outcome, Resolution, TallyRef};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("tallies-data.json"))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_falls_back_to_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.load(), Err(StorageError::Parse { .. })));
        assert!(store.load_or_default().is_empty());
    }

    #[test]
    fn save_then_load_restores_records() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut tallies = TallyStore::default();
        tallies.create_matchup("Chess", "Alice", "Bob").unwrap();
        tallies
            .record_outcome(
                &TallyRef::parse("Chess|Alice vs Bob"),
                Resolution::Keyed,
                "Bob",
                Outcome::Win,
            )
            .unwrap();
        store.save(&tallies).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, tallies);

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["Chess"]["Alice vs Bob"]["Bob"]["wins"], 1);
        assert_eq!(raw["Chess"]["Alice vs Bob"]["Alice"]["losses"], 1);
        assert!(raw["Chess"]["Alice vs Bob"]["createdAt"].is_string());
    }

    #[test]
    fn created_at_lookalike_participant_survives_a_reload() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut tallies = TallyStore::default();
        assert!(tallies.create_matchup("Chess", "createdAt", "Bob").is_err());
        tallies.create_matchup("Chess", "CreatedAt", "Bob").unwrap();
        store.save(&tallies).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, tallies);
        assert_eq!(loaded.list_all().len(), 1);
        assert!(
            loaded
                .get_record(&TallyRef::parse("Chess|CreatedAt vs Bob"), Resolution::Keyed)
                .is_ok()
        );
    }

    #[test]
    fn unrecognized_entries_survive_a_save() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"Chess": {"junk": {"Alice": {"wins": 1, "losses": 0}}}}"#,
        )
        .unwrap();

        let tallies = store.load().unwrap();
        assert!(tallies.list_all().is_empty());
        store.save(&tallies).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["Chess"]["junk"]["Alice"]["wins"], 1);
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing").join("tallies.json"));
        let err = store.save(&TallyStore::default()).unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
    }
}
