//! High-score persistence.
//!
//! The core only ever asks a [`HighScoreStore`] for the stored value once at
//! start-up and hands it a new value when a run beats it.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score file {path} does not contain a number: {content:?}")]
    Corrupt { path: PathBuf, content: String },
}

pub trait HighScoreStore {
    /// The stored high score, `Ok(None)` if nothing has been saved yet.
    fn load(&self) -> Result<Option<u32>, StoreError>;

    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

// ── File-backed store ─────────────────────────────────────────────────────────

/// Keeps the score as a decimal number in a single text file.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// `$HOME/.flappy_cannon_score`, or the working directory without `HOME`.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".flappy_cannon_score")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        content
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| StoreError::Corrupt {
                path: self.path.clone(),
                content,
            })
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        std::fs::write(&self.path, score.to_string()).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

// ── In-memory store ───────────────────────────────────────────────────────────

/// Holds the score in memory and records every save, for tests and for
/// sessions that should not touch disk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    pub stored: Option<u32>,
    pub saves: Vec<u32>,
}

impl MemoryStore {
    pub fn with_score(score: u32) -> Self {
        MemoryStore {
            stored: Some(score),
            saves: Vec::new(),
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.stored)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.stored = Some(score);
        self.saves.push(score);
        Ok(())
    }
}
