//! Facade over the authoritative datastore
//!
//! [`DatastoreLink`] is what API consumers hold. It offers the same operation
//! set through two views:
//!
//! | View | Runs the primitive | Result |
//! |------|--------------------|--------|
//! | [`SyncDatastore`] | on the caller's thread | returned directly |
//! | [`AsyncDatastore`] | on the worker pool | passed to a callback |
//!
//! Both views check their arguments on the caller's thread before anything is
//! dispatched, so bad input always surfaces as an immediate `Err`.

mod async_;
mod sync;

pub use async_::AsyncDatastore;
pub use sync::SyncDatastore;

use std::sync::Arc;

use permstore_engine::Backend;

use crate::Executor;

/// Public handle to a datastore
#[derive(Debug, Clone)]
pub struct DatastoreLink {
    backend: Arc<Backend>,
    sync: SyncDatastore,
    async_: AsyncDatastore,
}

impl DatastoreLink {
    /// Wrap a backend.
    pub fn new(backend: Arc<Backend>) -> Self {
        let executor = Executor::new(Arc::clone(backend.datastore()));
        Self {
            sync: SyncDatastore::new(executor.clone()),
            async_: AsyncDatastore::new(executor, Arc::clone(backend.scheduler())),
            backend,
        }
    }

    /// Display name of the store
    pub fn name(&self) -> &str {
        self.backend.datastore().name()
    }

    /// Whether the store is accepting logins
    pub fn is_accepting_logins(&self) -> bool {
        self.backend.datastore().is_accepting_logins()
    }

    /// Blocking view
    pub fn sync(&self) -> &SyncDatastore {
        &self.sync
    }

    /// Callback view
    pub fn async_(&self) -> &AsyncDatastore {
        &self.async_
    }
}
