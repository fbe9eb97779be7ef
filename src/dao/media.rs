//! Random pick of a celebratory media file from a fixed directory.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rand::{rng, seq::IndexedRandom};
use thiserror::Error;
use tracing::{debug, warn};

/// Extensions eligible for a pick, compared case-insensitively.
pub const MEDIA_EXTENSIONS: [&str; 3] = ["gif", "mp4", "webm"];

/// Why no media file could be picked.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The directory is missing or unreadable.
    #[error("media directory `{dir}` is unavailable")]
    Unavailable {
        /// Media directory.
        dir: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The directory holds no eligible file.
    #[error("no media files found in `{dir}`")]
    Empty {
        /// Media directory.
        dir: PathBuf,
    },
}

/// Directory of media files served to the chat and under `/gifs`.
#[derive(Debug, Clone)]
pub struct MediaLibrary {
    dir: PathBuf,
}

impl MediaLibrary {
    /// Library over `dir`. The directory does not need to exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Media directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory if it is missing.
    pub fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// Every eligible file, sorted by name.
    pub fn files(&self) -> Result<Vec<PathBuf>, MediaError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| MediaError::Unavailable {
            dir: self.dir.clone(),
            source,
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_media(path))
            .collect();
        files.sort();
        Ok(files)
    }

    /// Pick one eligible file uniformly at random.
    pub fn try_pick_random(&self) -> Result<PathBuf, MediaError> {
        let files = self.files()?;
        files
            .choose(&mut rng())
            .cloned()
            .ok_or_else(|| MediaError::Empty {
                dir: self.dir.clone(),
            })
    }

    /// Pick one eligible file, logging instead of failing when none is available.
    pub fn pick_random(&self) -> Option<PathBuf> {
        match self.try_pick_random() {
            Ok(path) => {
                debug!(path = %path.display(), "picked media file");
                Some(path)
            }
            Err(err @ MediaError::Empty { .. }) => {
                debug!(error = %err, "no media to attach");
                None
            }
            Err(err) => {
                warn!(error = %err, "failed to pick media file");
                None
            }
        }
    }
}

fn is_media(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            MEDIA_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}
