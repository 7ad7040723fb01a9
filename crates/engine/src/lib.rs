//! Authoritative store for permstore
//!
//! This crate owns persistent state and everything that runs it:
//! - Datastore: the synchronous primitive contract, and its storage-backed implementation
//! - Storage: raw snapshot backends (memory, flat-file JSON)
//! - Registry: the single loaded instance per user/group/track
//! - BackgroundScheduler: worker pool for dispatched operations
//! - Backend: datastore + registry + scheduler + configuration
//!
//! Permission evaluation is not part of this crate; it only loads, stores
//! and deletes entities.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod background;
pub mod backend;
pub mod datastore;
pub mod registry;
pub mod storage;

pub use background::{BackgroundScheduler, BackpressureError, SchedulerStats};
pub use backend::{Backend, StorageKind, StoreConfig, CONFIG_FILE_NAME};
pub use datastore::{Datastore, FileDatastore, MemoryDatastore, StorageDatastore};
pub use registry::Registry;
pub use storage::{FileStorage, MemoryStorage, Storage};
