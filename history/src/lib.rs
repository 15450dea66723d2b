//! Persisted history for finished games, plus the thin service that wires a
//! live [`engine::GameSession`] to it.
//!
//! The store keeps its records in memory, writes every change through to a
//! local [`RecordStorage`] before returning, and mirrors changes to an
//! optional [`RemoteStore`] on background tasks. The local collection is
//! always authoritative; a broken or absent mirror only ever shows up in
//! [`GameHistory::last_sync_error`].

pub mod error;
pub mod local;
pub mod record;
pub mod remote;
pub mod service;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::StorageError;
pub use local::{JsonFileStorage, RecordStorage};
pub use record::{GameRecord, DUPLICATE_WINDOW_SECS};
pub use remote::{RemoteError, RemoteStore};
pub use service::GameService;
pub use store::{merge_records, GameHistory};
