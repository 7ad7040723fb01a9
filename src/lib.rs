//! permstore - blocking and callback access to a user/group/track permission store
//!
//! # Quick Start
//!
//! ```ignore
//! use permstore::{Backend, PermissionsApi, UserId};
//!
//! let api = PermissionsApi::new(Backend::open("/path/to/data")?);
//! let store = api.datastore();
//!
//! // Blocking
//! store.sync().load_or_create_user(UserId::new(), "Alice")?;
//!
//! // Callback, run on the worker pool
//! store.async_().load_all_groups(Some(Box::new(|ok| println!("groups loaded: {}", ok))))?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`DatastoreLink`] facade, which validates
//! arguments and then calls into the authoritative [`Datastore`] held by a
//! [`Backend`]. Storage details are internal to the engine.

// Re-export the public API from permstore-executor
pub use permstore_executor::*;

pub use permstore_core::{Name, Username, DEFAULT_GROUP};
pub use permstore_engine::{Backend, Datastore, StoreConfig, CONFIG_FILE_NAME};
