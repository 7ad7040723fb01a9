//! Command enum defining every datastore operation.
//!
//! Commands are the raw, unvalidated form of a request. Required references
//! are `Option` so that requests assembled from external input can be missing
//! them; [`Operation::prepare`](crate::operation::Operation::prepare) rejects
//! those with `MissingRequiredArgument`.
//!
//! Both facade views build a `Command` for each call and run it through the
//! same table, so the two views cannot disagree on validation or on which
//! primitive an operation reaches.

use permstore_core::UserId;

use crate::link::EntityLink;

/// A single datastore request.
///
/// # Command Categories
///
/// | Category | Count | Returns |
/// |----------|-------|---------|
/// | User | 3 | `Output::Bool` |
/// | Group | 5 | `Output::Bool` |
/// | Track | 5 | `Output::Bool` |
/// | Username mapping | 2 | `Output::Bool`, `Output::MaybeUuid` |
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // ==================== User (3) ====================
    /// Load a user, creating it if it does not exist.
    /// Returns: `Output::Bool`
    LoadOrCreateUser {
        uuid: Option<UserId>,
        username: Option<String>,
    },

    /// Load an existing user.
    /// Returns: `Output::Bool`
    LoadUser { uuid: Option<UserId> },

    /// Persist a user.
    /// Returns: `Output::Bool`
    SaveUser { user: Option<EntityLink> },

    // ==================== Group (5) ====================
    /// Create a group and load it.
    /// Returns: `Output::Bool`
    CreateAndLoadGroup { name: Option<String> },

    /// Load an existing group.
    /// Returns: `Output::Bool`
    LoadGroup { name: Option<String> },

    /// Load every stored group.
    /// Returns: `Output::Bool`
    LoadAllGroups,

    /// Persist a group.
    /// Returns: `Output::Bool`
    SaveGroup { group: Option<EntityLink> },

    /// Delete a group from storage and unload it.
    /// Returns: `Output::Bool`
    DeleteGroup { group: Option<EntityLink> },

    // ==================== Track (5) ====================
    /// Create a track and load it.
    /// Returns: `Output::Bool`
    CreateAndLoadTrack { name: Option<String> },

    /// Load an existing track.
    /// Returns: `Output::Bool`
    LoadTrack { name: Option<String> },

    /// Load every stored track.
    /// Returns: `Output::Bool`
    LoadAllTracks,

    /// Persist a track.
    /// Returns: `Output::Bool`
    SaveTrack { track: Option<EntityLink> },

    /// Delete a track from storage and unload it.
    /// Returns: `Output::Bool`
    DeleteTrack { track: Option<EntityLink> },

    // ==================== Username mapping (2) ====================
    /// Record the username to id mapping.
    /// Returns: `Output::Bool`
    SaveUuidData {
        username: Option<String>,
        uuid: Option<UserId>,
    },

    /// Look up the id recorded for a username.
    /// Returns: `Output::MaybeUuid`
    GetUuid { username: Option<String> },
}

impl Command {
    /// Operation key, used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Command::LoadOrCreateUser { .. } => "load_or_create_user",
            Command::LoadUser { .. } => "load_user",
            Command::SaveUser { .. } => "save_user",
            Command::CreateAndLoadGroup { .. } => "create_and_load_group",
            Command::LoadGroup { .. } => "load_group",
            Command::LoadAllGroups => "load_all_groups",
            Command::SaveGroup { .. } => "save_group",
            Command::DeleteGroup { .. } => "delete_group",
            Command::CreateAndLoadTrack { .. } => "create_and_load_track",
            Command::LoadTrack { .. } => "load_track",
            Command::LoadAllTracks => "load_all_tracks",
            Command::SaveTrack { .. } => "save_track",
            Command::DeleteTrack { .. } => "delete_track",
            Command::SaveUuidData { .. } => "save_uuid_data",
            Command::GetUuid { .. } => "get_uuid",
        }
    }
}
