//! Shared application state wrapping the tally store.

pub mod models;
pub mod stats;
pub mod tally_store;

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::warn;

use crate::{
    dao::{media::MediaLibrary, storage::JsonFileStore},
    error::TallyError,
};

pub use self::models::{Matchup, Record, TallyStore};

/// Handle to the state shared by the bot and the HTTP handlers.
pub type SharedState = Arc<AppState>;

/// Central application state: the live tally store plus the collaborators it persists through.
pub struct AppState {
    tallies: RwLock<TallyStore>,
    storage: JsonFileStore,
    media: MediaLibrary,
}

impl AppState {
    /// Hydrate the store from `storage` and wrap the state in an [`Arc`].
    pub fn load(storage: JsonFileStore, media: MediaLibrary) -> SharedState {
        let tallies = storage.load_or_default();
        Self::with_tallies(tallies, storage, media)
    }

    /// Build the state around an already loaded store.
    pub fn with_tallies(
        tallies: TallyStore,
        storage: JsonFileStore,
        media: MediaLibrary,
    ) -> SharedState {
        Arc::new(Self {
            tallies: RwLock::new(tallies),
            storage,
            media,
        })
    }

    /// Read access to the live store.
    pub async fn tallies(&self) -> RwLockReadGuard<'_, TallyStore> {
        self.tallies.read().await
    }

    /// Run a mutation and persist the whole store when it succeeds.
    ///
    /// The write guard is held until the snapshot is written, so saves land in mutation order.
    /// A failed save is logged and the in-memory change is kept.
    pub async fn mutate<T, F>(&self, operation: F) -> Result<T, TallyError>
    where
        F: FnOnce(&mut TallyStore) -> Result<T, TallyError>,
    {
        let mut guard = self.tallies.write().await;
        let value = operation(&mut *guard)?;

        if let Err(err) = self.storage.save(&guard) {
            warn!(error = %err, "failed to persist tallies");
        }

        Ok(value)
    }

    /// Directory of celebratory media.
    pub fn media(&self) -> &MediaLibrary {
        &self.media
    }
}
