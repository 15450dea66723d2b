use std::fmt;

use async_trait::async_trait;
use uuid::Uuid;

use crate::record::GameRecord;

/// Failure of a remote mirror operation. Never fatal: the local history
/// keeps working with the mirror entirely absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The backing account or service could not be reached at all.
    Unavailable,
    /// The service answered but the operation failed.
    Failed(String),
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Unavailable => write!(f, "remote store not available"),
            RemoteError::Failed(msg) => write!(f, "remote store failed: {}", msg),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Eventually consistent mirror of the record collection.
///
/// Implementations wrap whatever backing service actually holds the mirror;
/// this crate ships none and only defines the seam. Availability is probed
/// before each operation so a signed-out or offline mirror degrades to a
/// reported sync error instead of a failure.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Probes whether the mirror can currently be reached.
    async fn is_available(&self) -> bool;

    /// Mirrors one record.
    async fn save_record(&self, record: &GameRecord) -> Result<(), RemoteError>;

    /// Fetches every mirrored record, newest first.
    async fn fetch_all(&self) -> Result<Vec<GameRecord>, RemoteError>;

    /// Deletes one mirrored record by id.
    async fn delete(&self, id: Uuid) -> Result<(), RemoteError>;
}
