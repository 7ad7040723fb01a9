//! Registry of loaded entities
//!
//! Ensures at most one authoritative instance exists per (kind, key).
//! Stores never construct entities directly: they go through `get_or_make_*`,
//! which hands back the existing `Arc` when the key is already loaded. A
//! reload therefore refreshes the same instance in place, and every link
//! holding that `Arc` observes the new state.

use dashmap::DashMap;
use std::sync::Arc;

use permstore_core::{Group, Name, Track, User, UserId};

/// Loaded users, groups and tracks
#[derive(Debug, Default)]
pub struct Registry {
    users: DashMap<UserId, Arc<User>>,
    groups: DashMap<Name, Arc<Group>>,
    tracks: DashMap<Name, Arc<Track>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Loaded user, if any
    pub fn user(&self, uuid: &UserId) -> Option<Arc<User>> {
        self.users.get(uuid).map(|u| Arc::clone(u.value()))
    }

    /// Loaded user whose last known username matches, ignoring case
    pub fn user_by_name(&self, username: &str) -> Option<Arc<User>> {
        self.users
            .iter()
            .find(|entry| {
                entry
                    .value()
                    .name()
                    .is_some_and(|n| n.eq_ignore_ascii_case(username))
            })
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Existing user or a freshly inserted empty one
    pub fn get_or_make_user(&self, uuid: UserId) -> Arc<User> {
        Arc::clone(
            self.users
                .entry(uuid)
                .or_insert_with(|| Arc::new(User::new(uuid)))
                .value(),
        )
    }

    /// Whether the user is loaded
    pub fn is_user_loaded(&self, uuid: &UserId) -> bool {
        self.users.contains_key(uuid)
    }

    /// Every loaded user
    pub fn users(&self) -> Vec<Arc<User>> {
        self.users.iter().map(|u| Arc::clone(u.value())).collect()
    }

    /// Drop a user from memory
    pub fn unload_user(&self, uuid: &UserId) -> Option<Arc<User>> {
        self.users.remove(uuid).map(|(_, u)| u)
    }

    // =========================================================================
    // Groups
    // =========================================================================

    /// Loaded group, if any
    pub fn group(&self, name: &Name) -> Option<Arc<Group>> {
        self.groups.get(name).map(|g| Arc::clone(g.value()))
    }

    /// Existing group or a freshly inserted empty one
    pub fn get_or_make_group(&self, name: &Name) -> Arc<Group> {
        Arc::clone(
            self.groups
                .entry(name.clone())
                .or_insert_with(|| Arc::new(Group::new(name.clone())))
                .value(),
        )
    }

    /// Whether the group is loaded
    pub fn is_group_loaded(&self, name: &Name) -> bool {
        self.groups.contains_key(name)
    }

    /// Drop a group from memory
    pub fn unload_group(&self, name: &Name) -> Option<Arc<Group>> {
        self.groups.remove(name).map(|(_, g)| g)
    }

    /// Every loaded group, sorted by name
    pub fn groups(&self) -> Vec<Arc<Group>> {
        let mut all: Vec<_> = self.groups.iter().map(|g| Arc::clone(g.value())).collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    /// Unload every group whose name is not in `keep`
    pub fn retain_groups(&self, keep: &[Name]) {
        self.groups.retain(|name, _| keep.contains(name));
    }

    // =========================================================================
    // Tracks
    // =========================================================================

    /// Loaded track, if any
    pub fn track(&self, name: &Name) -> Option<Arc<Track>> {
        self.tracks.get(name).map(|t| Arc::clone(t.value()))
    }

    /// Existing track or a freshly inserted empty one
    pub fn get_or_make_track(&self, name: &Name) -> Arc<Track> {
        Arc::clone(
            self.tracks
                .entry(name.clone())
                .or_insert_with(|| Arc::new(Track::new(name.clone())))
                .value(),
        )
    }

    /// Whether the track is loaded
    pub fn is_track_loaded(&self, name: &Name) -> bool {
        self.tracks.contains_key(name)
    }

    /// Drop a track from memory
    pub fn unload_track(&self, name: &Name) -> Option<Arc<Track>> {
        self.tracks.remove(name).map(|(_, t)| t)
    }

    /// Every loaded track, sorted by name
    pub fn tracks(&self) -> Vec<Arc<Track>> {
        let mut all: Vec<_> = self.tracks.iter().map(|t| Arc::clone(t.value())).collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    /// Unload every track whose name is not in `keep`
    pub fn retain_tracks(&self, keep: &[Name]) {
        self.tracks.retain(|name, _| keep.contains(name));
    }
}
