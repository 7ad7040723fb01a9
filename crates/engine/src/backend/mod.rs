//! The store environment
//!
//! A [`Backend`] bundles everything an authoritative store needs at runtime:
//! the [`Datastore`] itself, the [`Registry`] it loads into, the
//! [`BackgroundScheduler`] that runs dispatched operations, and the
//! [`StoreConfig`] it was built from.

pub mod config;

pub use config::{StorageKind, StoreConfig, CONFIG_FILE_NAME};

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use permstore_core::Result;

use crate::background::BackgroundScheduler;
use crate::datastore::{Datastore, FileDatastore, MemoryDatastore};
use crate::registry::Registry;

/// Datastore, registry, worker pool and configuration of one store
pub struct Backend {
    datastore: Arc<dyn Datastore>,
    registry: Arc<Registry>,
    scheduler: Arc<BackgroundScheduler>,
    config: StoreConfig,
}

impl Backend {
    /// Open a store in a data directory
    ///
    /// Reads `permstore.toml` from the directory, creating it with defaults
    /// if missing.
    ///
    /// # Flow
    ///
    /// 1. Create data directory if needed
    /// 2. Read or create `permstore.toml`
    /// 3. Build the datastore named by `storage`
    /// 4. Start the worker pool
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Arc<Self>> {
        let data_dir = path.as_ref();
        std::fs::create_dir_all(data_dir)?;

        let config_path = data_dir.join(CONFIG_FILE_NAME);
        StoreConfig::write_default_if_missing(&config_path)?;
        let config = StoreConfig::from_file(&config_path)?;

        Self::open_with_config(data_dir, config)
    }

    /// Open a store in a data directory with an explicit configuration
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: StoreConfig) -> Result<Arc<Self>> {
        config.validate()?;
        let registry = Arc::new(Registry::new());
        let datastore: Arc<dyn Datastore> = match config.storage_kind()? {
            StorageKind::File => Arc::new(FileDatastore::open(
                config.name.clone(),
                path.as_ref(),
                Arc::clone(&registry),
            )?),
            StorageKind::Memory => Arc::new(MemoryDatastore::new(
                config.name.clone(),
                crate::storage::MemoryStorage::new(),
                Arc::clone(&registry),
            )),
        };
        Ok(Self::new(datastore, registry, config))
    }

    /// Ephemeral in-memory store with default settings
    pub fn memory() -> Arc<Self> {
        let registry = Arc::new(Registry::new());
        let datastore = Arc::new(MemoryDatastore::memory(Arc::clone(&registry)));
        Self::new(datastore, registry, StoreConfig::memory())
    }

    /// Assemble a backend around any datastore implementation
    ///
    /// `registry` should be the registry the datastore loads into.
    pub fn new(
        datastore: Arc<dyn Datastore>,
        registry: Arc<Registry>,
        config: StoreConfig,
    ) -> Arc<Self> {
        let scheduler = Arc::new(BackgroundScheduler::new(
            config.worker_threads.max(1),
            config.max_queue_depth.max(1),
        ));
        info!(
            target: "permstore::store",
            store = datastore.name(),
            storage = %config.storage,
            workers = scheduler.stats().worker_count,
            "Backend ready"
        );
        Arc::new(Self {
            datastore,
            registry,
            scheduler,
            config,
        })
    }

    /// The authoritative datastore
    pub fn datastore(&self) -> &Arc<dyn Datastore> {
        &self.datastore
    }

    /// Loaded entities
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Worker pool for dispatched operations
    pub fn scheduler(&self) -> &Arc<BackgroundScheduler> {
        &self.scheduler
    }

    /// Configuration this backend was built from
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Open or close the store to user logins
    pub fn set_accepting_logins(&self, accepting: bool) {
        self.datastore.set_accepting_logins(accepting);
        info!(
            target: "permstore::store",
            store = self.datastore.name(),
            accepting,
            "Login availability changed"
        );
    }

    /// Block until every dispatched operation has completed
    pub fn drain(&self) {
        self.scheduler.drain();
    }

    /// Finish dispatched operations and stop the worker pool
    pub fn shutdown(&self) {
        self.scheduler.shutdown();
        info!(target: "permstore::store", store = self.datastore.name(), "Backend shut down");
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("datastore", &self.datastore.name())
            .field("scheduler", &self.scheduler)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permstore_core::{Name, UserId, Username};
    use tempfile::TempDir;

    #[test]
    fn test_memory_backend() {
        let backend = Backend::memory();
        assert_eq!(backend.datastore().name(), "memory");
        assert!(backend.datastore().is_accepting_logins());
        assert_eq!(backend.config().storage_kind().unwrap(), StorageKind::Memory);
    }

    #[test]
    fn test_open_writes_default_config() {
        let dir = TempDir::new().unwrap();
        let backend = Backend::open(dir.path()).unwrap();
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
        assert_eq!(backend.config(), &StoreConfig::default());
        assert_eq!(backend.datastore().name(), "permstore");
    }

    #[test]
    fn test_open_rejects_bad_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "storage = \"sql\"").unwrap();
        assert!(Backend::open(dir.path()).is_err());
    }

    #[test]
    fn test_datastore_loads_into_backend_registry() {
        let dir = TempDir::new().unwrap();
        let backend = Backend::open(dir.path()).unwrap();
        let id = UserId::new();
        let name = Name::parse("admin").unwrap();

        assert!(backend
            .datastore()
            .load_or_create_user(id, &Username::parse("Alice").unwrap()));
        assert!(backend.datastore().create_and_load_group(&name));

        assert!(backend.registry().is_user_loaded(&id));
        assert!(backend.registry().is_group_loaded(&name));
    }

    #[test]
    fn test_login_toggle_reaches_datastore() {
        let backend = Backend::memory();
        backend.set_accepting_logins(false);
        assert!(!backend.datastore().is_accepting_logins());
        backend.set_accepting_logins(true);
        assert!(backend.datastore().is_accepting_logins());
    }

    #[test]
    fn test_shutdown_stops_scheduler() {
        let backend = Backend::memory();
        backend.shutdown();
        assert!(backend.scheduler().is_shut_down());
    }
}
