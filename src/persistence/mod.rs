//! High-score storage
//!
//! The game never touches storage directly; a `HighScoreStore` is injected
//! into the driver. Failures are reported as `StoreError` and the driver
//! degrades them to defaults or a skipped save.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::highscores::HighScores;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Io(#[from] io::Error),
    #[error("malformed high-score record: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Somewhere to keep the high-score record between runs
pub trait HighScoreStore {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&mut self) -> Result<Option<HighScores>, StoreError>;
    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError>;
}

/// Load the record, falling back to all-zero defaults on any failure
pub fn load_or_default<S: HighScoreStore + ?Sized>(store: &mut S) -> HighScores {
    match store.load() {
        Ok(Some(scores)) => {
            log::info!(
                "Loaded high scores (best {}, {} games)",
                scores.best_score,
                scores.total_games_played
            );
            scores
        }
        Ok(None) => {
            log::info!("No high scores found, starting fresh");
            HighScores::default()
        }
        Err(e) => {
            log::warn!("Could not load high scores, using defaults: {e}");
            HighScores::default()
        }
    }
}

/// In-process store holding the raw JSON, as a key-value backend would
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already stored (possibly malformed) value
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<Option<HighScores>, StoreError> {
        match &self.raw {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        self.raw = Some(serde_json::to_string(scores)?);
        Ok(())
    }
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<Option<HighScores>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(scores)?;
        // Write then rename so a crash never leaves a half-written record
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("High scores saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("last-light-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let scores = HighScores {
            best_score: 310,
            highest_combo: 5,
            ..Default::default()
        };
        store.save(&scores).unwrap();
        assert!(store.raw().unwrap().contains("bestScore"));
        assert_eq!(store.load().unwrap(), Some(scores));
    }

    #[test]
    fn test_malformed_record_falls_back_to_defaults() {
        let mut store = MemoryStore::with_raw("{not json");
        assert!(matches!(store.load(), Err(StoreError::Parse(_))));
        assert_eq!(load_or_default(&mut store), HighScores::default());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let mut store = JsonFileStore::new(temp_path("missing"));
        assert!(store.load().unwrap().is_none());
        assert_eq!(load_or_default(&mut store), HighScores::default());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let path = temp_path("roundtrip");
        let mut store = JsonFileStore::new(&path);
        let scores = HighScores {
            best_score: 99,
            total_games_played: 3,
            ..Default::default()
        };
        store.save(&scores).unwrap();
        assert_eq!(store.load().unwrap(), Some(scores));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unwritable_path_is_an_io_error() {
        let path = std::env::temp_dir()
            .join("last-light-no-such-dir")
            .join("nested")
            .join("scores.json");
        let mut store = JsonFileStore::new(path);
        assert!(matches!(
            store.save(&HighScores::default()),
            Err(StoreError::Io(_))
        ));
    }
}
