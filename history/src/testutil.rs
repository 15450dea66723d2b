//! In-memory collaborator fakes shared by the crate's tests.

use std::collections::HashSet;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StorageError;
use crate::local::RecordStorage;
use crate::record::GameRecord;
use crate::remote::{RemoteError, RemoteStore};

/// Local storage fake; `fail` makes both load and save error.
#[derive(Default)]
pub(crate) struct MemoryStorage {
    pub saved: Mutex<Vec<GameRecord>>,
    pub fail: AtomicBool,
}

impl RecordStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<GameRecord>, StorageError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::Other,
                "storage unavailable",
            )));
        }
        Ok(self.saved.lock().unwrap().clone())
    }

    fn save(&self, records: &[GameRecord]) -> Result<(), StorageError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::Other,
                "storage unavailable",
            )));
        }
        *self.saved.lock().unwrap() = records.to_vec();
        Ok(())
    }
}

/// Remote mirror fake with togglable availability and per-id delete
/// failures.
pub(crate) struct MockRemote {
    pub available: AtomicBool,
    pub saved: Mutex<Vec<GameRecord>>,
    pub fail_save: AtomicBool,
    pub failing_deletes: Mutex<HashSet<Uuid>>,
}

impl MockRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            available: AtomicBool::new(true),
            saved: Mutex::new(Vec::new()),
            fail_save: AtomicBool::new(false),
            failing_deletes: Mutex::new(HashSet::new()),
        })
    }
}

#[async_trait]
impl RemoteStore for MockRemote {
    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn save_record(&self, record: &GameRecord) -> Result<(), RemoteError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(RemoteError::Failed("save rejected".into()));
        }
        self.saved.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<GameRecord>, RemoteError> {
        let mut records = self.saved.lock().unwrap().clone();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RemoteError> {
        if self.failing_deletes.lock().unwrap().contains(&id) {
            return Err(RemoteError::Failed(format!("could not delete {}", id)));
        }
        self.saved.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}
