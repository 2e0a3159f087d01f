//! High-score persistence
//!
//! A single record (player name and best score) is loaded when a session
//! starts and written back whenever a round beats it.

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::game::HighScore;

/// Get/set pair over wherever the best score lives
pub trait ScoreStore {
    /// Read the stored record; `None` if nothing has been saved yet
    fn load(&self) -> Result<Option<HighScore>>;

    /// Replace the stored record
    fn save(&mut self, record: &HighScore) -> Result<()>;
}

/// Stores the record as a small JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&self) -> Result<Option<HighScore>> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read high score from {:?}", self.path));
            }
        };

        let record = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse high score in {:?}", self.path))?;
        Ok(Some(record))
    }

    fn save(&mut self, record: &HighScore) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(record).context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;
        Ok(())
    }
}

/// Keeps the record in memory for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    record: Option<HighScore>,
    saves: usize,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: HighScore) -> Self {
        Self {
            record: Some(record),
            saves: 0,
        }
    }

    /// How many times `save` has been called
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<Option<HighScore>> {
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &HighScore) -> Result<()> {
        self.record = Some(record.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_means_no_record() {
        let dir = TempDir::new().unwrap();
        let store = JsonScoreStore::new(dir.path().join("scores.json"));

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scores.json");
        let mut store = JsonScoreStore::new(&path);

        store.save(&HighScore::new("ada", 12)).unwrap();
        assert!(path.exists());
        assert_eq!(store.load().unwrap(), Some(HighScore::new("ada", 12)));

        store.save(&HighScore::new("bob", 20)).unwrap();
        let reopened = JsonScoreStore::new(&path);
        assert_eq!(reopened.load().unwrap(), Some(HighScore::new("bob", 20)));
    }

    #[test]
    fn test_file_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{ "name": "carol", "score": 7 }"#).unwrap();

        let store = JsonScoreStore::new(&path);
        assert_eq!(store.load().unwrap(), Some(HighScore::new("carol", 7)));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonScoreStore::new(&path);
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse high score"));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save(&HighScore::new("ada", 3)).unwrap();
        assert_eq!(store.load().unwrap(), Some(HighScore::new("ada", 3)));
        assert_eq!(store.saves(), 1);
    }
}
