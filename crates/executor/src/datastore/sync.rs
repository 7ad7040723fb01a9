use permstore_core::UserId;

use crate::link::EntityLink;
use crate::output::FromOutput;
use crate::{Command, Executor, Result};

/// Blocking view of the datastore.
///
/// Each method checks its arguments, calls exactly one store primitive on the
/// calling thread, and returns the store's result unchanged. `Ok(false)` and
/// `Ok(None)` are store outcomes; `Err` is only ever a bad argument.
#[derive(Debug, Clone)]
pub struct SyncDatastore {
    executor: Executor,
}

impl SyncDatastore {
    pub(crate) fn new(executor: Executor) -> Self {
        Self { executor }
    }

    fn run<T: FromOutput>(&self, cmd: Command) -> Result<T> {
        self.executor.execute(cmd).map(T::from_output)
    }

    /// Load a user, creating it if needed
    pub fn load_or_create_user(&self, uuid: UserId, username: &str) -> Result<bool> {
        self.run(Command::LoadOrCreateUser {
            uuid: Some(uuid),
            username: Some(username.to_string()),
        })
    }

    /// Load an existing user
    pub fn load_user(&self, uuid: UserId) -> Result<bool> {
        self.run(Command::LoadUser { uuid: Some(uuid) })
    }

    /// Persist a user
    pub fn save_user(&self, user: impl Into<EntityLink>) -> Result<bool> {
        self.run(Command::SaveUser {
            user: Some(user.into()),
        })
    }

    /// Create and load a group
    pub fn create_and_load_group(&self, name: &str) -> Result<bool> {
        self.run(Command::CreateAndLoadGroup {
            name: Some(name.to_string()),
        })
    }

    /// Load an existing group
    pub fn load_group(&self, name: &str) -> Result<bool> {
        self.run(Command::LoadGroup {
            name: Some(name.to_string()),
        })
    }

    /// Load every stored group
    pub fn load_all_groups(&self) -> Result<bool> {
        self.run(Command::LoadAllGroups)
    }

    /// Persist a group
    pub fn save_group(&self, group: impl Into<EntityLink>) -> Result<bool> {
        self.run(Command::SaveGroup {
            group: Some(group.into()),
        })
    }

    /// Delete a group
    pub fn delete_group(&self, group: impl Into<EntityLink>) -> Result<bool> {
        self.run(Command::DeleteGroup {
            group: Some(group.into()),
        })
    }

    /// Create and load a track
    pub fn create_and_load_track(&self, name: &str) -> Result<bool> {
        self.run(Command::CreateAndLoadTrack {
            name: Some(name.to_string()),
        })
    }

    /// Load an existing track
    pub fn load_track(&self, name: &str) -> Result<bool> {
        self.run(Command::LoadTrack {
            name: Some(name.to_string()),
        })
    }

    /// Load every stored track
    pub fn load_all_tracks(&self) -> Result<bool> {
        self.run(Command::LoadAllTracks)
    }

    /// Persist a track
    pub fn save_track(&self, track: impl Into<EntityLink>) -> Result<bool> {
        self.run(Command::SaveTrack {
            track: Some(track.into()),
        })
    }

    /// Delete a track
    pub fn delete_track(&self, track: impl Into<EntityLink>) -> Result<bool> {
        self.run(Command::DeleteTrack {
            track: Some(track.into()),
        })
    }

    /// Record the id for a username
    pub fn save_uuid_data(&self, username: &str, uuid: UserId) -> Result<bool> {
        self.run(Command::SaveUuidData {
            username: Some(username.to_string()),
            uuid: Some(uuid),
        })
    }

    /// Id recorded for a username
    pub fn get_uuid(&self, username: &str) -> Result<Option<UserId>> {
        self.run(Command::GetUuid {
            username: Some(username.to_string()),
        })
    }
}
