//! Datastore built from a raw storage backend and the entity registry

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use permstore_core::{
    Group, GroupData, Name, Result, Track, TrackData, User, UserData, UserId, Username,
};

use super::Datastore;
use crate::registry::Registry;
use crate::storage::{FileStorage, MemoryStorage, Storage};

/// In-memory datastore
pub type MemoryDatastore = StorageDatastore<MemoryStorage>;

/// Flat-file JSON datastore
pub type FileDatastore = StorageDatastore<FileStorage>;

/// Implements the [`Datastore`] contract over a [`Storage`] backend.
///
/// Loads copy stored snapshots into the registry's single instance for the
/// key; saves copy that instance out. Backend errors are logged and reported
/// as a failed primitive.
pub struct StorageDatastore<S: Storage> {
    name: String,
    storage: S,
    registry: Arc<Registry>,
    accepting_logins: AtomicBool,
}

impl<S: Storage> StorageDatastore<S> {
    /// Wrap a storage backend; the store accepts logins immediately.
    pub fn new(name: impl Into<String>, storage: S, registry: Arc<Registry>) -> Self {
        Self {
            name: name.into(),
            storage,
            registry,
            accepting_logins: AtomicBool::new(true),
        }
    }

    /// The raw storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Registry this store loads into
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn report<T>(&self, op: &str, key: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => {
                debug!(
                    target: "permstore::store",
                    store = %self.name,
                    op,
                    key,
                    "primitive complete"
                );
                Some(value)
            }
            Err(e) => {
                warn!(
                    target: "permstore::store",
                    store = %self.name,
                    backend = self.storage.kind(),
                    op,
                    key,
                    error = %e,
                    "primitive failed"
                );
                None
            }
        }
    }

    fn load_group_data(&self, name: &Name) -> Result<bool> {
        match self.storage.read_group(name)? {
            Some(data) => {
                self.registry.get_or_make_group(name).apply_data(data);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn load_track_data(&self, name: &Name) -> Result<bool> {
        match self.storage.read_track(name)? {
            Some(data) => {
                self.registry.get_or_make_track(name).apply_data(data);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl MemoryDatastore {
    /// Ephemeral store loading into `registry`
    pub fn memory(registry: Arc<Registry>) -> Self {
        Self::new("memory", MemoryStorage::new(), registry)
    }
}

impl FileDatastore {
    /// File-backed store rooted at `dir`, loading into `registry`
    pub fn open(
        name: impl Into<String>,
        dir: impl AsRef<Path>,
        registry: Arc<Registry>,
    ) -> Result<Self> {
        let storage = FileStorage::open(dir)?;
        let store = Self::new(name, storage, registry);
        info!(
            target: "permstore::store",
            store = %store.name,
            path = %store.storage.root().display(),
            "Opened file datastore"
        );
        Ok(store)
    }
}

impl<S: Storage> Datastore for StorageDatastore<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_accepting_logins(&self) -> bool {
        self.accepting_logins.load(Ordering::Acquire)
    }

    fn set_accepting_logins(&self, accepting: bool) {
        self.accepting_logins.store(accepting, Ordering::Release);
    }

    fn load_or_create_user(&self, uuid: UserId, username: &Username) -> bool {
        let result = (|| -> Result<()> {
            let mut data = self
                .storage
                .read_user(uuid)?
                .unwrap_or_else(|| UserData::new(uuid, None));
            data.name = Some(username.as_str().to_string());
            self.storage.write_user(&data)?;
            self.registry.get_or_make_user(uuid).apply_data(data);
            Ok(())
        })();
        self.report("load_or_create_user", &uuid.to_string(), result)
            .is_some()
    }

    fn load_user(&self, uuid: UserId) -> bool {
        let result = self.storage.read_user(uuid).map(|stored| match stored {
            Some(data) => {
                self.registry.get_or_make_user(uuid).apply_data(data);
                true
            }
            None => false,
        });
        self.report("load_user", &uuid.to_string(), result)
            .unwrap_or(false)
    }

    fn save_user(&self, user: &User) -> bool {
        let result = self.storage.write_user(&user.to_data());
        self.report("save_user", &user.uuid().to_string(), result)
            .is_some()
    }

    fn create_and_load_group(&self, name: &Name) -> bool {
        let result = (|| -> Result<bool> {
            if self.storage.read_group(name)?.is_none() {
                self.storage.write_group(&GroupData {
                    name: name.clone(),
                    permissions: Default::default(),
                })?;
            }
            self.load_group_data(name)
        })();
        self.report("create_and_load_group", name.as_str(), result)
            .unwrap_or(false)
    }

    fn load_group(&self, name: &Name) -> bool {
        let result = self.load_group_data(name);
        self.report("load_group", name.as_str(), result)
            .unwrap_or(false)
    }

    fn load_all_groups(&self) -> bool {
        let result = (|| -> Result<()> {
            let names = self.storage.list_groups()?;
            for name in &names {
                self.load_group_data(name)?;
            }
            self.registry.retain_groups(&names);
            info!(
                target: "permstore::store",
                store = %self.name,
                count = names.len(),
                "Loaded all groups"
            );
            Ok(())
        })();
        self.report("load_all_groups", "*", result).is_some()
    }

    fn save_group(&self, group: &Group) -> bool {
        let result = self.storage.write_group(&group.to_data());
        self.report("save_group", group.name().as_str(), result)
            .is_some()
    }

    fn delete_group(&self, group: &Group) -> bool {
        let result = self.storage.remove_group(group.name()).map(|removed| {
            self.registry.unload_group(group.name());
            removed
        });
        self.report("delete_group", group.name().as_str(), result)
            .unwrap_or(false)
    }

    fn create_and_load_track(&self, name: &Name) -> bool {
        let result = (|| -> Result<bool> {
            if self.storage.read_track(name)?.is_none() {
                self.storage.write_track(&TrackData {
                    name: name.clone(),
                    groups: Vec::new(),
                })?;
            }
            self.load_track_data(name)
        })();
        self.report("create_and_load_track", name.as_str(), result)
            .unwrap_or(false)
    }

    fn load_track(&self, name: &Name) -> bool {
        let result = self.load_track_data(name);
        self.report("load_track", name.as_str(), result)
            .unwrap_or(false)
    }

    fn load_all_tracks(&self) -> bool {
        let result = (|| -> Result<()> {
            let names = self.storage.list_tracks()?;
            for name in &names {
                self.load_track_data(name)?;
            }
            self.registry.retain_tracks(&names);
            info!(
                target: "permstore::store",
                store = %self.name,
                count = names.len(),
                "Loaded all tracks"
            );
            Ok(())
        })();
        self.report("load_all_tracks", "*", result).is_some()
    }

    fn save_track(&self, track: &Track) -> bool {
        let result = self.storage.write_track(&track.to_data());
        self.report("save_track", track.name().as_str(), result)
            .is_some()
    }

    fn delete_track(&self, track: &Track) -> bool {
        let result = self.storage.remove_track(track.name()).map(|removed| {
            self.registry.unload_track(track.name());
            removed
        });
        self.report("delete_track", track.name().as_str(), result)
            .unwrap_or(false)
    }

    fn save_uuid_data(&self, username: &Username, uuid: UserId) -> bool {
        let result = self.storage.write_uuid(&username.key(), uuid);
        self.report("save_uuid_data", username.as_str(), result)
            .is_some()
    }

    fn get_uuid(&self, username: &Username) -> Option<UserId> {
        let result = self.storage.read_uuid(&username.key());
        self.report("get_uuid", username.as_str(), result).flatten()
    }
}
