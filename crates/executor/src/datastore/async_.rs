use std::sync::Arc;

use tracing::{debug, warn};

use permstore_core::UserId;
use permstore_engine::BackgroundScheduler;

use crate::callback::{check_callback, Callback};
use crate::link::EntityLink;
use crate::operation::Operation;
use crate::output::FromOutput;
use crate::{Command, Error, Executor, Result};

/// Callback view of the datastore.
///
/// Each method checks its arguments on the calling thread and returns the
/// failure immediately if there is one; nothing is dispatched and the callback
/// is dropped unused. Otherwise the primitive is queued on the worker pool and
/// the method returns `Ok(())`. When the primitive completes, the callback
/// receives its result exactly once, on the worker thread.
///
/// A `None` callback still runs the primitive; the result is discarded.
#[derive(Debug, Clone)]
pub struct AsyncDatastore {
    executor: Executor,
    scheduler: Arc<BackgroundScheduler>,
}

impl AsyncDatastore {
    pub(crate) fn new(executor: Executor, scheduler: Arc<BackgroundScheduler>) -> Self {
        Self {
            executor,
            scheduler,
        }
    }

    fn dispatch<T>(&self, cmd: Command, callback: Option<Callback<T>>) -> Result<()>
    where
        T: FromOutput + Send + 'static,
    {
        let callback = check_callback(callback);
        let op = Operation::prepare(cmd)?;
        let name = op.name();
        let datastore = Arc::clone(self.executor.datastore());

        debug!(target: "permstore::facade", op = name, mode = "async", "Dispatching");
        self.scheduler
            .submit(move || {
                let output = op.apply(datastore.as_ref());
                callback(T::from_output(output));
            })
            .map_err(|_| {
                warn!(target: "permstore::facade", op = name, "Dispatch rejected by worker pool");
                Error::Rejected {
                    operation: name.to_string(),
                }
            })
    }

    /// Load a user, creating it if needed
    pub fn load_or_create_user(
        &self,
        uuid: UserId,
        username: &str,
        callback: Option<Callback<bool>>,
    ) -> Result<()> {
        self.dispatch(
            Command::LoadOrCreateUser {
                uuid: Some(uuid),
                username: Some(username.to_string()),
            },
            callback,
        )
    }

    /// Load an existing user
    pub fn load_user(&self, uuid: UserId, callback: Option<Callback<bool>>) -> Result<()> {
        self.dispatch(Command::LoadUser { uuid: Some(uuid) }, callback)
    }

    /// Persist a user
    pub fn save_user(
        &self,
        user: impl Into<EntityLink>,
        callback: Option<Callback<bool>>,
    ) -> Result<()> {
        self.dispatch(
            Command::SaveUser {
                user: Some(user.into()),
            },
            callback,
        )
    }

    /// Create and load a group
    pub fn create_and_load_group(
        &self,
        name: &str,
        callback: Option<Callback<bool>>,
    ) -> Result<()> {
        self.dispatch(
            Command::CreateAndLoadGroup {
                name: Some(name.to_string()),
            },
            callback,
        )
    }

    /// Load an existing group
    pub fn load_group(&self, name: &str, callback: Option<Callback<bool>>) -> Result<()> {
        self.dispatch(
            Command::LoadGroup {
                name: Some(name.to_string()),
            },
            callback,
        )
    }

    /// Load every stored group
    pub fn load_all_groups(&self, callback: Option<Callback<bool>>) -> Result<()> {
        self.dispatch(Command::LoadAllGroups, callback)
    }

    /// Persist a group
    pub fn save_group(
        &self,
        group: impl Into<EntityLink>,
        callback: Option<Callback<bool>>,
    ) -> Result<()> {
        self.dispatch(
            Command::SaveGroup {
                group: Some(group.into()),
            },
            callback,
        )
    }

    /// Delete a group
    pub fn delete_group(
        &self,
        group: impl Into<EntityLink>,
        callback: Option<Callback<bool>>,
    ) -> Result<()> {
        self.dispatch(
            Command::DeleteGroup {
                group: Some(group.into()),
            },
            callback,
        )
    }

    /// Create and load a track
    pub fn create_and_load_track(
        &self,
        name: &str,
        callback: Option<Callback<bool>>,
    ) -> Result<()> {
        self.dispatch(
            Command::CreateAndLoadTrack {
                name: Some(name.to_string()),
            },
            callback,
        )
    }

    /// Load an existing track
    pub fn load_track(&self, name: &str, callback: Option<Callback<bool>>) -> Result<()> {
        self.dispatch(
            Command::LoadTrack {
                name: Some(name.to_string()),
            },
            callback,
        )
    }

    /// Load every stored track
    pub fn load_all_tracks(&self, callback: Option<Callback<bool>>) -> Result<()> {
        self.dispatch(Command::LoadAllTracks, callback)
    }

    /// Persist a track
    pub fn save_track(
        &self,
        track: impl Into<EntityLink>,
        callback: Option<Callback<bool>>,
    ) -> Result<()> {
        self.dispatch(
            Command::SaveTrack {
                track: Some(track.into()),
            },
            callback,
        )
    }

    /// Delete a track
    pub fn delete_track(
        &self,
        track: impl Into<EntityLink>,
        callback: Option<Callback<bool>>,
    ) -> Result<()> {
        self.dispatch(
            Command::DeleteTrack {
                track: Some(track.into()),
            },
            callback,
        )
    }

    /// Record the id for a username
    pub fn save_uuid_data(
        &self,
        username: &str,
        uuid: UserId,
        callback: Option<Callback<bool>>,
    ) -> Result<()> {
        self.dispatch(
            Command::SaveUuidData {
                username: Some(username.to_string()),
                uuid: Some(uuid),
            },
            callback,
        )
    }

    /// Look up the id recorded for a username
    pub fn get_uuid(
        &self,
        username: &str,
        callback: Option<Callback<Option<UserId>>>,
    ) -> Result<()> {
        self.dispatch(
            Command::GetUuid {
                username: Some(username.to_string()),
            },
            callback,
        )
    }
}
