use std::fs;
use std::path::PathBuf;

use crate::error::StorageError;
use crate::record::GameRecord;

/// Local durable storage for the record collection.
///
/// The whole collection is written on every change; histories are small and
/// the simplicity keeps the store crash-safe without a journal.
pub trait RecordStorage: Send + Sync {
    fn load(&self) -> Result<Vec<GameRecord>, StorageError>;
    fn save(&self, records: &[GameRecord]) -> Result<(), StorageError>;
}

impl<T: RecordStorage + ?Sized> RecordStorage for std::sync::Arc<T> {
    fn load(&self) -> Result<Vec<GameRecord>, StorageError> {
        (**self).load()
    }

    fn save(&self, records: &[GameRecord]) -> Result<(), StorageError> {
        (**self).save(records)
    }
}

/// File-backed storage holding the records as a JSON array.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location, overridable through `GAME_HISTORY_PATH`.
    pub fn default_path() -> PathBuf {
        std::env::var("GAME_HISTORY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("game_history.json"))
    }
}

impl RecordStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<GameRecord>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, records: &[GameRecord]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string(records)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("history.json"));
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn records_round_trip_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("history.json"));

        let records = vec![
            GameRecord::new(2048, 256, 140),
            GameRecord::new(512, 64, 52),
        ];
        storage.save(&records).unwrap();
        assert_eq!(storage.load().unwrap(), records);
    }

    #[test]
    fn saving_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested/state/history.json"));
        storage.save(&[GameRecord::new(100, 16, 9)]).unwrap();
        assert_eq!(storage.load().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_contents_surface_as_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "not json").unwrap();
        let storage = JsonFileStorage::new(path);
        assert!(matches!(storage.load(), Err(StorageError::Serde(_))));
    }
}
