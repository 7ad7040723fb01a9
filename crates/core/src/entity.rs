//! Authoritative entities
//!
//! `User`, `Group` and `Track` are the single in-process owners of an
//! entity's state. They are always handled through `Arc` and mutated through
//! interior locks, so a handle taken before a store operation observes the
//! state the store writes into it afterwards.
//!
//! Each entity converts to and from a plain `*Data` snapshot, which is what
//! backing stores persist.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::contract::Name;
use crate::types::UserId;

/// Primary group assigned to newly created users
pub const DEFAULT_GROUP: &str = "default";

/// Directly assigned permission nodes: node -> granted
pub type PermissionNodes = BTreeMap<String, bool>;

fn set_node(nodes: &mut PermissionNodes, node: &str, value: bool) -> bool {
    if node.is_empty() {
        return false;
    }
    nodes.insert(node.to_string(), value) != Some(value)
}

// =============================================================================
// User
// =============================================================================

/// Persisted form of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    /// User identifier
    pub uuid: UserId,
    /// Last known username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Primary group name
    #[serde(default = "default_group")]
    pub primary_group: String,
    /// Directly assigned permission nodes
    #[serde(default)]
    pub permissions: PermissionNodes,
}

fn default_group() -> String {
    DEFAULT_GROUP.to_string()
}

impl UserData {
    /// Fresh data for a user that has never been stored
    pub fn new(uuid: UserId, name: Option<String>) -> Self {
        Self {
            uuid,
            name,
            primary_group: default_group(),
            permissions: PermissionNodes::new(),
        }
    }
}

#[derive(Debug)]
struct UserState {
    name: Option<String>,
    primary_group: String,
    permissions: PermissionNodes,
}

/// Authoritative user keyed by `UserId`
#[derive(Debug)]
pub struct User {
    uuid: UserId,
    state: RwLock<UserState>,
}

impl User {
    /// Create an empty user in the default group
    pub fn new(uuid: UserId) -> Self {
        Self::from_data(UserData::new(uuid, None))
    }

    /// Build a user from persisted data
    pub fn from_data(data: UserData) -> Self {
        Self {
            uuid: data.uuid,
            state: RwLock::new(UserState {
                name: data.name,
                primary_group: data.primary_group,
                permissions: data.permissions,
            }),
        }
    }

    /// The user's identifier
    pub fn uuid(&self) -> UserId {
        self.uuid
    }

    /// Last known username
    pub fn name(&self) -> Option<String> {
        self.state.read().name.clone()
    }

    /// Record the user's current username
    pub fn set_name(&self, name: impl Into<String>) {
        self.state.write().name = Some(name.into());
    }

    /// Name of the primary group
    pub fn primary_group(&self) -> String {
        self.state.read().primary_group.clone()
    }

    /// Change the primary group
    pub fn set_primary_group(&self, group: &Name) {
        self.state.write().primary_group = group.as_str().to_string();
    }

    /// Copy of the directly assigned nodes
    pub fn permissions(&self) -> PermissionNodes {
        self.state.read().permissions.clone()
    }

    /// Directly assigned value of a node, if any
    pub fn permission(&self, node: &str) -> Option<bool> {
        self.state.read().permissions.get(node).copied()
    }

    /// Assign a node. Returns `false` if it already had this value or is empty.
    pub fn set_permission(&self, node: &str, value: bool) -> bool {
        set_node(&mut self.state.write().permissions, node, value)
    }

    /// Remove a node. Returns `false` if it was not assigned.
    pub fn unset_permission(&self, node: &str) -> bool {
        self.state.write().permissions.remove(node).is_some()
    }

    /// Snapshot for persistence
    pub fn to_data(&self) -> UserData {
        let state = self.state.read();
        UserData {
            uuid: self.uuid,
            name: state.name.clone(),
            primary_group: state.primary_group.clone(),
            permissions: state.permissions.clone(),
        }
    }

    /// Overwrite the in-memory state with persisted data
    ///
    /// The identifier is never changed.
    pub fn apply_data(&self, data: UserData) {
        let mut state = self.state.write();
        state.name = data.name;
        state.primary_group = data.primary_group;
        state.permissions = data.permissions;
    }
}

// =============================================================================
// Group
// =============================================================================

/// Persisted form of a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupData {
    /// Group name
    pub name: Name,
    /// Directly assigned permission nodes
    #[serde(default)]
    pub permissions: PermissionNodes,
}

/// Authoritative group keyed by `Name`
#[derive(Debug)]
pub struct Group {
    name: Name,
    permissions: RwLock<PermissionNodes>,
}

impl Group {
    /// Create an empty group
    pub fn new(name: Name) -> Self {
        Self {
            name,
            permissions: RwLock::new(PermissionNodes::new()),
        }
    }

    /// Build a group from persisted data
    pub fn from_data(data: GroupData) -> Self {
        Self {
            name: data.name,
            permissions: RwLock::new(data.permissions),
        }
    }

    /// The group's name
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Copy of the directly assigned nodes
    pub fn permissions(&self) -> PermissionNodes {
        self.permissions.read().clone()
    }

    /// Directly assigned value of a node, if any
    pub fn permission(&self, node: &str) -> Option<bool> {
        self.permissions.read().get(node).copied()
    }

    /// Assign a node. Returns `false` if it already had this value or is empty.
    pub fn set_permission(&self, node: &str, value: bool) -> bool {
        set_node(&mut self.permissions.write(), node, value)
    }

    /// Remove a node. Returns `false` if it was not assigned.
    pub fn unset_permission(&self, node: &str) -> bool {
        self.permissions.write().remove(node).is_some()
    }

    /// Snapshot for persistence
    pub fn to_data(&self) -> GroupData {
        GroupData {
            name: self.name.clone(),
            permissions: self.permissions(),
        }
    }

    /// Overwrite the in-memory state with persisted data
    pub fn apply_data(&self, data: GroupData) {
        *self.permissions.write() = data.permissions;
    }
}

// =============================================================================
// Track
// =============================================================================

/// Persisted form of a track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackData {
    /// Track name
    pub name: Name,
    /// Group names in track order
    #[serde(default)]
    pub groups: Vec<Name>,
}

/// Authoritative track keyed by `Name`
#[derive(Debug)]
pub struct Track {
    name: Name,
    groups: RwLock<Vec<Name>>,
}

impl Track {
    /// Create an empty track
    pub fn new(name: Name) -> Self {
        Self {
            name,
            groups: RwLock::new(Vec::new()),
        }
    }

    /// Build a track from persisted data
    pub fn from_data(data: TrackData) -> Self {
        Self {
            name: data.name,
            groups: RwLock::new(data.groups),
        }
    }

    /// The track's name
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Group names in order
    pub fn groups(&self) -> Vec<Name> {
        self.groups.read().clone()
    }

    /// Number of groups on the track
    pub fn size(&self) -> usize {
        self.groups.read().len()
    }

    /// Whether the group is on the track
    pub fn contains_group(&self, group: &Name) -> bool {
        self.groups.read().contains(group)
    }

    /// Append a group. Returns `false` if it is already on the track.
    pub fn append_group(&self, group: &Name) -> bool {
        let mut groups = self.groups.write();
        if groups.contains(group) {
            return false;
        }
        groups.push(group.clone());
        true
    }

    /// Insert a group at `position`.
    ///
    /// Returns `false` if the group is already on the track or the position
    /// is past the end.
    pub fn insert_group(&self, group: &Name, position: usize) -> bool {
        let mut groups = self.groups.write();
        if groups.contains(group) || position > groups.len() {
            return false;
        }
        groups.insert(position, group.clone());
        true
    }

    /// Remove a group. Returns `false` if it was not on the track.
    pub fn remove_group(&self, group: &Name) -> bool {
        let mut groups = self.groups.write();
        let before = groups.len();
        groups.retain(|g| g != group);
        groups.len() != before
    }

    /// Remove every group
    pub fn clear_groups(&self) {
        self.groups.write().clear();
    }

    /// Snapshot for persistence
    pub fn to_data(&self) -> TrackData {
        TrackData {
            name: self.name.clone(),
            groups: self.groups(),
        }
    }

    /// Overwrite the in-memory state with persisted data
    pub fn apply_data(&self, data: TrackData) {
        *self.groups.write() = data.groups;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: &str) -> Name {
        Name::parse(raw).unwrap()
    }

    #[test]
    fn test_new_user_defaults() {
        let id = UserId::new();
        let user = User::new(id);
        assert_eq!(user.uuid(), id);
        assert_eq!(user.name(), None);
        assert_eq!(user.primary_group(), DEFAULT_GROUP);
        assert!(user.permissions().is_empty());
    }

    #[test]
    fn test_user_permissions() {
        let user = User::new(UserId::new());
        assert!(user.set_permission("build.place", true));
        assert!(!user.set_permission("build.place", true));
        assert!(user.set_permission("build.place", false));
        assert_eq!(user.permission("build.place"), Some(false));
        assert!(!user.set_permission("", true));
        assert!(user.unset_permission("build.place"));
        assert!(!user.unset_permission("build.place"));
    }

    #[test]
    fn test_user_apply_data_keeps_identity() {
        let id = UserId::new();
        let user = User::new(id);
        let mut data = UserData::new(id, Some("Alice".into()));
        data.permissions.insert("chat".into(), true);
        user.apply_data(data.clone());
        assert_eq!(user.to_data(), data);
        assert_eq!(user.uuid(), id);
    }

    #[test]
    fn test_user_data_defaults_when_deserialized() {
        let id = UserId::from_bytes([1u8; 16]);
        let json = format!("{{\"uuid\":\"{}\"}}", id);
        let data: UserData = serde_json::from_str(&json).unwrap();
        assert_eq!(data, UserData::new(id, None));
    }

    #[test]
    fn test_group_roundtrip_through_data() {
        let group = Group::new(name("admin"));
        group.set_permission("*", true);
        let copy = Group::from_data(group.to_data());
        assert_eq!(copy.name().as_str(), "admin");
        assert_eq!(copy.permission("*"), Some(true));
    }

    #[test]
    fn test_track_ordering() {
        let track = Track::new(name("staff"));
        assert!(track.append_group(&name("helper")));
        assert!(track.append_group(&name("admin")));
        assert!(!track.append_group(&name("admin")));
        assert!(track.insert_group(&name("mod"), 1));
        assert!(!track.insert_group(&name("owner"), 9));
        assert_eq!(
            track.groups(),
            vec![name("helper"), name("mod"), name("admin")]
        );
        assert!(track.remove_group(&name("mod")));
        assert!(!track.remove_group(&name("mod")));
        assert_eq!(track.size(), 2);
        track.clear_groups();
        assert_eq!(track.size(), 0);
    }
}
