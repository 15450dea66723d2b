use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::join_all;
use tracing::{error, info, warn};

use crate::local::RecordStorage;
use crate::record::GameRecord;
use crate::remote::{RemoteError, RemoteStore};

/// Append-only log of finished games.
///
/// The in-memory collection is authoritative and always readable. Every
/// change is written through to local storage before the call returns;
/// mirroring to the remote store happens on spawned tasks that never block
/// the caller. The methods that reach the mirror ([`GameHistory::append`],
/// [`GameHistory::clear`] and [`GameHistory::refresh_from_remote`] with a
/// remote configured) must therefore run inside a tokio runtime.
pub struct GameHistory {
    inner: Arc<Inner>,
}

struct Inner {
    records: Mutex<Vec<GameRecord>>,
    storage: Box<dyn RecordStorage>,
    remote: Option<Arc<dyn RemoteStore>>,
    in_flight: AtomicUsize,
    last_sync_error: Mutex<Option<String>>,
}

impl Inner {
    fn persist(&self, records: &[GameRecord]) {
        if let Err(e) = self.storage.save(records) {
            // Memory stays the source of truth; the write is retried on
            // the next change.
            error!("failed to persist game history: {}", e);
        }
    }

    fn begin_sync(&self) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
    }

    fn finish_sync(&self, result: Result<(), RemoteError>) {
        match result {
            Ok(()) => {
                *self.last_sync_error.lock().unwrap() = None;
            }
            Err(e) => {
                warn!("remote sync failed: {}", e);
                *self.last_sync_error.lock().unwrap() = Some(e.to_string());
            }
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl GameHistory {
    /// Opens the history over the given storage, loading whatever it holds.
    ///
    /// A failed load logs and starts with an empty collection rather than
    /// failing; the store must work with the disk state gone or corrupt.
    pub fn open(storage: Box<dyn RecordStorage>, remote: Option<Arc<dyn RemoteStore>>) -> Self {
        let records = match storage.load() {
            Ok(records) => records,
            Err(e) => {
                warn!("could not load game history, starting empty: {}", e);
                Vec::new()
            }
        };
        Self {
            inner: Arc::new(Inner {
                records: Mutex::new(records),
                storage,
                remote,
                in_flight: AtomicUsize::new(0),
                last_sync_error: Mutex::new(None),
            }),
        }
    }

    /// Appends a finished game, persists locally, then mirrors the record
    /// remotely in the background.
    pub fn append(&self, record: GameRecord) {
        {
            let mut records = self.inner.records.lock().unwrap();
            records.push(record.clone());
            self.inner.persist(&records);
        }
        info!(
            "recorded game: score {} best tile {} in {} moves",
            record.score, record.highest_tile, record.moves
        );
        if let Some(remote) = &self.inner.remote {
            let inner = Arc::clone(&self.inner);
            let remote = Arc::clone(remote);
            tokio::spawn(async move {
                mirror_record(inner, remote, record).await;
            });
        }
    }

    /// Drops every record, persists the empty state, then asks the mirror
    /// to delete its copies in the background. Mirror failures are reported
    /// through [`GameHistory::last_sync_error`], never rolled back locally.
    pub fn clear(&self) {
        {
            let mut records = self.inner.records.lock().unwrap();
            records.clear();
            self.inner.persist(&records);
        }
        if let Some(remote) = &self.inner.remote {
            let inner = Arc::clone(&self.inner);
            let remote = Arc::clone(remote);
            tokio::spawn(async move {
                clear_remote(inner, remote).await;
            });
        }
    }

    /// Pulls the mirrored records in the background and merges them into
    /// the local collection. Called once after opening, and whenever the
    /// caller wants to refresh.
    pub fn refresh_from_remote(&self) {
        if let Some(remote) = &self.inner.remote {
            let inner = Arc::clone(&self.inner);
            let remote = Arc::clone(remote);
            tokio::spawn(async move {
                pull_remote(inner, remote).await;
            });
        }
    }

    pub fn records(&self) -> Vec<GameRecord> {
        self.inner.records.lock().unwrap().clone()
    }

    pub fn best_score(&self) -> Option<u32> {
        self.inner
            .records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.score)
            .max()
    }

    pub fn average_score(&self) -> f64 {
        let records = self.inner.records.lock().unwrap();
        if records.is_empty() {
            return 0.0;
        }
        records.iter().map(|r| r.score as f64).sum::<f64>() / records.len() as f64
    }

    pub fn total_games(&self) -> usize {
        self.inner.records.lock().unwrap().len()
    }

    /// True while any mirror operation is in flight.
    pub fn is_syncing(&self) -> bool {
        self.inner.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Human-readable description of the last mirror failure, cleared by
    /// the next success.
    pub fn last_sync_error(&self) -> Option<String> {
        self.inner.last_sync_error.lock().unwrap().clone()
    }
}

/// Combines local and mirrored records, dropping mirrored entries that
/// duplicate an already-present game. Newest first.
pub fn merge_records(local: &[GameRecord], remote: &[GameRecord]) -> Vec<GameRecord> {
    let mut merged = local.to_vec();
    for record in remote {
        if !merged.iter().any(|existing| existing.is_duplicate_of(record)) {
            merged.push(record.clone());
        }
    }
    merged.sort_by(|a, b| b.date.cmp(&a.date));
    merged
}

async fn mirror_record(inner: Arc<Inner>, remote: Arc<dyn RemoteStore>, record: GameRecord) {
    inner.begin_sync();
    let result = push_record(remote.as_ref(), &record).await;
    inner.finish_sync(result);
}

async fn push_record(remote: &dyn RemoteStore, record: &GameRecord) -> Result<(), RemoteError> {
    if !remote.is_available().await {
        return Err(RemoteError::Unavailable);
    }
    remote.save_record(record).await
}

async fn clear_remote(inner: Arc<Inner>, remote: Arc<dyn RemoteStore>) {
    inner.begin_sync();
    let result = delete_all(remote.as_ref()).await;
    inner.finish_sync(result);
}

/// Deletes every mirrored record concurrently and joins the results,
/// folding any subset of failures into a single error.
async fn delete_all(remote: &dyn RemoteStore) -> Result<(), RemoteError> {
    if !remote.is_available().await {
        return Err(RemoteError::Unavailable);
    }
    let records = remote.fetch_all().await?;
    let total = records.len();
    let outcomes = join_all(records.iter().map(|r| remote.delete(r.id))).await;
    let failures: Vec<String> = outcomes
        .into_iter()
        .filter_map(|outcome| outcome.err())
        .map(|e| e.to_string())
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(RemoteError::Failed(format!(
            "{} of {} deletions failed: {}",
            failures.len(),
            total,
            failures.join(", ")
        )))
    }
}

async fn pull_remote(inner: Arc<Inner>, remote: Arc<dyn RemoteStore>) {
    inner.begin_sync();
    let result = fetch_and_merge(&inner, remote.as_ref()).await;
    inner.finish_sync(result);
}

async fn fetch_and_merge(inner: &Inner, remote: &dyn RemoteStore) -> Result<(), RemoteError> {
    if !remote.is_available().await {
        return Err(RemoteError::Unavailable);
    }
    let mirrored = remote.fetch_all().await?;
    let mut records = inner.records.lock().unwrap();
    *records = merge_records(&records, &mirrored);
    inner.persist(&records);
    Ok(())
}
