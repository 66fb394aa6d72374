//! Storage for decks and review progress
//!
//! The scheduler never touches storage. Callers load a [`ProgressMap`]
//! through a [`ProgressStore`], run it through the algorithm and save the
//! returned map before scheduling the next answer.
//!
//! Directory layout used by the file-backed stores:
//! ```text
//! {data-dir}/
//! ├── config.toml      # Optional settings
//! ├── deck.json        # Array of cards
//! ├── progress.json    # { card-id: { box, next } }
//! └── tally.json       # Today's correct / again counts
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Deserialize;
use thiserror::Error;

use super::models::{Card, ProgressMap};
use super::session::DailyTally;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Default data directory, e.g. `~/.local/share/flashbox`
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|p| p.join("flashbox"))
        .ok_or(StorageError::DataDirNotFound)
}

/// Persistence port for the progress snapshot
pub trait ProgressStore {
    /// Latest committed snapshot; empty if nothing has been saved yet
    fn load(&self) -> Result<ProgressMap>;

    /// Replace the stored snapshot
    fn save(&self, progress: &ProgressMap) -> Result<()>;

    /// Forget all progress
    fn reset(&self) -> Result<()>;
}

/// Progress kept in a single JSON file
pub struct JsonProgressStore {
    path: PathBuf,
}

impl JsonProgressStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonProgressStore {
    fn load(&self) -> Result<ProgressMap> {
        if !self.path.exists() {
            return Ok(ProgressMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ProgressMap::new());
        }

        let progress: ProgressMap = serde_json::from_str(&content)?;
        log::debug!("Loaded {} progress entries from {}", progress.len(), self.path.display());
        Ok(progress)
    }

    fn save(&self, progress: &ProgressMap) -> Result<()> {
        write_json_atomic(&self.path, progress)
    }

    fn reset(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            log::info!("Cleared progress at {}", self.path.display());
        }
        Ok(())
    }
}

/// In-memory progress, for tests and throwaway sessions
#[derive(Default)]
pub struct MemoryProgressStore {
    progress: Mutex<ProgressMap>,
}

impl MemoryProgressStore {
    pub fn new(progress: ProgressMap) -> Self {
        Self {
            progress: Mutex::new(progress),
        }
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self) -> Result<ProgressMap> {
        let guard = self.progress.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, progress: &ProgressMap) -> Result<()> {
        let mut guard = self.progress.lock().unwrap_or_else(|e| e.into_inner());
        *guard = progress.clone();
        Ok(())
    }

    fn reset(&self) -> Result<()> {
        self.save(&ProgressMap::new())
    }
}

/// A deck file holds either an array of cards or a single card object
#[derive(Deserialize)]
#[serde(untagged)]
enum DeckFile {
    Many(Vec<Card>),
    One(Card),
}

/// Deck kept in a single JSON file
pub struct DeckStorage {
    path: PathBuf,
}

impl DeckStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the deck; a missing file is an empty deck
    pub fn load(&self) -> Result<Vec<Card>> {
        if !self.path.exists() {
            log::info!("No deck at {}", self.path.display());
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let cards = match serde_json::from_str::<DeckFile>(&content)? {
            DeckFile::Many(cards) => cards,
            DeckFile::One(card) => vec![card],
        };
        Ok(cards)
    }

    pub fn save(&self, cards: &[Card]) -> Result<()> {
        write_json_atomic(&self.path, cards)?;
        log::info!("Saved {} cards to {}", cards.len(), self.path.display());
        Ok(())
    }

    pub fn delete(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Today's answer counts, kept between sessions
pub struct TallyStorage {
    path: PathBuf,
}

impl TallyStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<Option<DailyTally>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save(&self, tally: &DailyTally) -> Result<()> {
        write_json_atomic(&self.path, tally)
    }

    pub fn delete(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Write pretty JSON next to `path` and rename it into place
fn write_json_atomic<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, serde_json::to_string_pretty(value)?)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::algorithm::update_progress;
    use crate::flashcards::models::LeitnerBox;
    use tempfile::TempDir;

    fn create_test_store() -> (JsonProgressStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonProgressStore::new(temp_dir.path().join("progress.json"));
        (store, temp_dir)
    }

    fn sample_cards() -> Vec<Card> {
        vec![
            Card::new("c1", "犬", vec!["dog".to_string()], "animals"),
            Card::new("c2", "猫", vec!["cat".to_string(), "ねこ".to_string()], "animals"),
        ]
    }

    #[test]
    fn test_missing_progress_file_is_empty() {
        let (store, _temp) = create_test_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_progress() {
        let (store, _temp) = create_test_store();

        let progress = update_progress(&ProgressMap::new(), "c1", true);
        store.save(&progress).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, progress);
        assert_eq!(loaded.get("c1").unwrap().leitner_box, LeitnerBox::Two);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonProgressStore::new(temp_dir.path().join("nested/dir/progress.json"));

        store.save(&update_progress(&ProgressMap::new(), "c1", false)).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
        assert!(!temp_dir.path().join("nested/dir/progress.json.tmp").exists());
    }

    #[test]
    fn test_reset_progress() {
        let (store, _temp) = create_test_store();
        store.save(&update_progress(&ProgressMap::new(), "c1", true)).unwrap();

        store.reset().unwrap();
        assert!(!store.path().exists());
        assert!(store.load().unwrap().is_empty());

        // Resetting twice is fine
        store.reset().unwrap();
    }

    #[test]
    fn test_corrupt_progress_file_is_an_error() {
        let (store, _temp) = create_test_store();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.load(), Err(StorageError::Json(_))));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryProgressStore::default();
        let progress = update_progress(&ProgressMap::new(), "c1", true);

        store.save(&progress).unwrap();
        assert_eq!(store.load().unwrap(), progress);

        store.reset().unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_deck_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = DeckStorage::new(temp_dir.path().join("deck.json"));

        storage.save(&sample_cards()).unwrap();
        assert_eq!(storage.load().unwrap(), sample_cards());
    }

    #[test]
    fn test_deck_accepts_single_card() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.json");
        fs::write(
            &path,
            r#"{ "id": "s1", "front": "こんにちは", "back": ["hello"], "category": "greetings" }"#,
        )
        .unwrap();

        let cards = DeckStorage::new(path).load().unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "s1");
    }

    #[test]
    fn test_missing_deck_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = DeckStorage::new(temp_dir.path().join("deck.json"));
        assert!(!storage.exists());
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_tally_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = TallyStorage::new(temp_dir.path().join("tally.json"));
        assert!(storage.load().unwrap().is_none());

        let mut tally = DailyTally::new(chrono::NaiveDate::from_ymd_opt(2025, 2, 3).unwrap());
        tally.record(true);
        tally.record(false);
        storage.save(&tally).unwrap();

        assert_eq!(storage.load().unwrap(), Some(tally));

        storage.delete().unwrap();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_delete_deck() {
        let temp_dir = TempDir::new().unwrap();
        let storage = DeckStorage::new(temp_dir.path().join("deck.json"));
        storage.save(&sample_cards()).unwrap();

        storage.delete().unwrap();
        assert!(!storage.exists());
    }
}
