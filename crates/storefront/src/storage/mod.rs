//! Persistence backends for the catalog.
//!
//! - [`local`] - key/value cache on the local filesystem (authoritative for writes)
//! - [`remote`] - optional realtime database mirror reached over HTTP

pub mod local;
pub mod remote;

pub use local::{FileStorage, LocalCache, LocalStorage, MemoryStorage, StorageError, keys};
pub use remote::{RealtimeDatabase, RemoteError};
