//! Root API object
//!
//! [`PermissionsApi`] is what a host hands to plugins and integrations: the
//! datastore facade, the store configuration, and links to whatever is
//! currently loaded. Lookups here never touch storage; use the datastore to
//! load things first.

use std::sync::Arc;

use tracing::{info, warn};

use permstore_core::UserId;
use permstore_engine::{Backend, StoreConfig};

use crate::link::{GroupLink, TrackLink, UserLink};
use crate::operation::Operation;
use crate::validation::validate_name;
use crate::{DatastoreLink, Error, Output, Result, UuidCache};

const UPDATE_TASK: &str = "run_update_task";

/// Entry point for API consumers
#[derive(Debug, Clone)]
pub struct PermissionsApi {
    backend: Arc<Backend>,
    datastore: DatastoreLink,
}

impl PermissionsApi {
    /// Build the API over a backend.
    pub fn new(backend: Arc<Backend>) -> Self {
        Self {
            datastore: DatastoreLink::new(Arc::clone(&backend)),
            backend,
        }
    }

    /// Crate version
    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// The datastore facade
    pub fn datastore(&self) -> &DatastoreLink {
        &self.datastore
    }

    /// Username to id lookups
    pub fn uuid_cache(&self) -> UuidCache {
        UuidCache::new(self.datastore.sync().clone())
    }

    /// Reload every group, every track and each loaded user on the worker
    /// pool.
    ///
    /// Returns once the reload is queued. Fails with `Rejected` if the pool
    /// refuses it.
    pub fn run_update_task(&self) -> Result<()> {
        let backend = Arc::clone(&self.backend);
        self.backend
            .scheduler()
            .submit(move || run_update(&backend))
            .map_err(|_| {
                warn!(
                    target: "permstore::facade",
                    op = UPDATE_TASK,
                    "Dispatch rejected by worker pool"
                );
                Error::Rejected {
                    operation: UPDATE_TASK.to_string(),
                }
            })
    }

    /// Snapshot of the store configuration
    pub fn configuration(&self) -> StoreConfig {
        self.backend.config().clone()
    }

    /// Link to a loaded user
    pub fn user(&self, uuid: UserId) -> Option<UserLink> {
        self.backend.registry().user(&uuid).map(UserLink::new)
    }

    /// Link to a loaded user, looked up by username ignoring case
    pub fn user_by_username(&self, username: &str) -> Option<UserLink> {
        self.backend
            .registry()
            .user_by_name(username)
            .map(UserLink::new)
    }

    /// Whether a user is loaded
    pub fn is_user_loaded(&self, uuid: UserId) -> bool {
        self.backend.registry().is_user_loaded(&uuid)
    }

    /// Link to a loaded group
    pub fn group(&self, name: &str) -> Result<Option<GroupLink>> {
        let name = validate_name(name)?;
        Ok(self.backend.registry().group(&name).map(GroupLink::new))
    }

    /// Whether a group is loaded
    pub fn is_group_loaded(&self, name: &str) -> Result<bool> {
        let name = validate_name(name)?;
        Ok(self.backend.registry().is_group_loaded(&name))
    }

    /// Links to every loaded group, by name
    pub fn groups(&self) -> Vec<GroupLink> {
        self.backend
            .registry()
            .groups()
            .into_iter()
            .map(GroupLink::new)
            .collect()
    }

    /// Link to a loaded track
    pub fn track(&self, name: &str) -> Result<Option<TrackLink>> {
        let name = validate_name(name)?;
        Ok(self.backend.registry().track(&name).map(TrackLink::new))
    }

    /// Whether a track is loaded
    pub fn is_track_loaded(&self, name: &str) -> Result<bool> {
        let name = validate_name(name)?;
        Ok(self.backend.registry().is_track_loaded(&name))
    }

    /// Links to every loaded track, by name
    pub fn tracks(&self) -> Vec<TrackLink> {
        self.backend
            .registry()
            .tracks()
            .into_iter()
            .map(TrackLink::new)
            .collect()
    }
}

fn run_update(backend: &Backend) {
    let store = backend.datastore().as_ref();
    let groups = Operation::LoadAllGroups.apply(store);
    let tracks = Operation::LoadAllTracks.apply(store);

    let users = backend.registry().users();
    let reloaded = users
        .iter()
        .filter(|user| {
            let reload = Operation::LoadUser { uuid: user.uuid() };
            reload.apply(store) == Output::Bool(true)
        })
        .count();

    info!(
        target: "permstore::facade",
        groups = ?groups,
        tracks = ?tracks,
        users = reloaded,
        of = users.len(),
        "Update task finished"
    );
}
