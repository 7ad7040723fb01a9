//! The operation table.
//!
//! [`Operation::prepare`] is the only place a [`Command`] is validated and
//! [`Operation::apply`] is the only place a store primitive is called. A
//! prepared operation holds nothing but checked arguments and the
//! authoritative instances unwrapped from links, so applying it cannot fail
//! with a facade error.

use std::sync::Arc;

use tracing::debug;

use permstore_core::{Group, Name, Track, User, UserId, Username};
use permstore_engine::Datastore;

use crate::validation::{
    require_group, require_present, require_track, require_user, validate_name,
    validate_username,
};
use crate::{Command, Output, Result};

/// A validated command, ready to run against a datastore
#[derive(Debug, Clone)]
pub enum Operation {
    /// See [`Command::LoadOrCreateUser`]
    LoadOrCreateUser {
        /// User id
        uuid: UserId,
        /// Checked username
        username: Username,
    },
    /// See [`Command::LoadUser`]
    LoadUser {
        /// User id
        uuid: UserId,
    },
    /// See [`Command::SaveUser`]
    SaveUser {
        /// Instance to persist
        user: Arc<User>,
    },
    /// See [`Command::CreateAndLoadGroup`]
    CreateAndLoadGroup {
        /// Checked group name
        name: Name,
    },
    /// See [`Command::LoadGroup`]
    LoadGroup {
        /// Checked group name
        name: Name,
    },
    /// See [`Command::LoadAllGroups`]
    LoadAllGroups,
    /// See [`Command::SaveGroup`]
    SaveGroup {
        /// Instance to persist
        group: Arc<Group>,
    },
    /// See [`Command::DeleteGroup`]
    DeleteGroup {
        /// Instance to delete
        group: Arc<Group>,
    },
    /// See [`Command::CreateAndLoadTrack`]
    CreateAndLoadTrack {
        /// Checked track name
        name: Name,
    },
    /// See [`Command::LoadTrack`]
    LoadTrack {
        /// Checked track name
        name: Name,
    },
    /// See [`Command::LoadAllTracks`]
    LoadAllTracks,
    /// See [`Command::SaveTrack`]
    SaveTrack {
        /// Instance to persist
        track: Arc<Track>,
    },
    /// See [`Command::DeleteTrack`]
    DeleteTrack {
        /// Instance to delete
        track: Arc<Track>,
    },
    /// See [`Command::SaveUuidData`]
    SaveUuidData {
        /// Checked username
        username: Username,
        /// Id to record
        uuid: UserId,
    },
    /// See [`Command::GetUuid`]
    GetUuid {
        /// Checked username
        username: Username,
    },
}

impl Operation {
    /// Validate a command.
    ///
    /// Arguments are checked in declaration order and the first failure is
    /// returned. Never touches a datastore.
    pub fn prepare(cmd: Command) -> Result<Self> {
        let op = match cmd {
            Command::LoadOrCreateUser { uuid, username } => {
                let uuid = require_present("uuid", uuid)?;
                let username = require_present("username", username)?;
                Operation::LoadOrCreateUser {
                    uuid,
                    username: validate_username(&username)?,
                }
            }
            Command::LoadUser { uuid } => Operation::LoadUser {
                uuid: require_present("uuid", uuid)?,
            },
            Command::SaveUser { user } => Operation::SaveUser {
                user: require_user(&require_present("user", user)?)?,
            },

            Command::CreateAndLoadGroup { name } => Operation::CreateAndLoadGroup {
                name: validate_name(&require_present("name", name)?)?,
            },
            Command::LoadGroup { name } => Operation::LoadGroup {
                name: validate_name(&require_present("name", name)?)?,
            },
            Command::LoadAllGroups => Operation::LoadAllGroups,
            Command::SaveGroup { group } => Operation::SaveGroup {
                group: require_group(&require_present("group", group)?)?,
            },
            Command::DeleteGroup { group } => Operation::DeleteGroup {
                group: require_group(&require_present("group", group)?)?,
            },

            Command::CreateAndLoadTrack { name } => Operation::CreateAndLoadTrack {
                name: validate_name(&require_present("name", name)?)?,
            },
            Command::LoadTrack { name } => Operation::LoadTrack {
                name: validate_name(&require_present("name", name)?)?,
            },
            Command::LoadAllTracks => Operation::LoadAllTracks,
            Command::SaveTrack { track } => Operation::SaveTrack {
                track: require_track(&require_present("track", track)?)?,
            },
            Command::DeleteTrack { track } => Operation::DeleteTrack {
                track: require_track(&require_present("track", track)?)?,
            },

            Command::SaveUuidData { username, uuid } => {
                let username = require_present("username", username)?;
                let username = validate_username(&username)?;
                Operation::SaveUuidData {
                    username,
                    uuid: require_present("uuid", uuid)?,
                }
            }
            Command::GetUuid { username } => Operation::GetUuid {
                username: validate_username(&require_present("username", username)?)?,
            },
        };
        Ok(op)
    }

    /// Operation key, matching [`Command::name`]
    pub fn name(&self) -> &'static str {
        match self {
            Operation::LoadOrCreateUser { .. } => "load_or_create_user",
            Operation::LoadUser { .. } => "load_user",
            Operation::SaveUser { .. } => "save_user",
            Operation::CreateAndLoadGroup { .. } => "create_and_load_group",
            Operation::LoadGroup { .. } => "load_group",
            Operation::LoadAllGroups => "load_all_groups",
            Operation::SaveGroup { .. } => "save_group",
            Operation::DeleteGroup { .. } => "delete_group",
            Operation::CreateAndLoadTrack { .. } => "create_and_load_track",
            Operation::LoadTrack { .. } => "load_track",
            Operation::LoadAllTracks => "load_all_tracks",
            Operation::SaveTrack { .. } => "save_track",
            Operation::DeleteTrack { .. } => "delete_track",
            Operation::SaveUuidData { .. } => "save_uuid_data",
            Operation::GetUuid { .. } => "get_uuid",
        }
    }

    /// Invoke the one store primitive this operation maps to.
    pub fn apply(&self, store: &dyn Datastore) -> Output {
        let output = match self {
            Operation::LoadOrCreateUser { uuid, username } => {
                Output::Bool(store.load_or_create_user(*uuid, username))
            }
            Operation::LoadUser { uuid } => Output::Bool(store.load_user(*uuid)),
            Operation::SaveUser { user } => Output::Bool(store.save_user(user)),

            Operation::CreateAndLoadGroup { name } => {
                Output::Bool(store.create_and_load_group(name))
            }
            Operation::LoadGroup { name } => Output::Bool(store.load_group(name)),
            Operation::LoadAllGroups => Output::Bool(store.load_all_groups()),
            Operation::SaveGroup { group } => Output::Bool(store.save_group(group)),
            Operation::DeleteGroup { group } => Output::Bool(store.delete_group(group)),

            Operation::CreateAndLoadTrack { name } => {
                Output::Bool(store.create_and_load_track(name))
            }
            Operation::LoadTrack { name } => Output::Bool(store.load_track(name)),
            Operation::LoadAllTracks => Output::Bool(store.load_all_tracks()),
            Operation::SaveTrack { track } => Output::Bool(store.save_track(track)),
            Operation::DeleteTrack { track } => Output::Bool(store.delete_track(track)),

            Operation::SaveUuidData { username, uuid } => {
                Output::Bool(store.save_uuid_data(username, *uuid))
            }
            Operation::GetUuid { username } => Output::MaybeUuid(store.get_uuid(username)),
        };
        debug!(target: "permstore::facade", op = self.name(), ?output, "Primitive completed");
        output
    }
}
