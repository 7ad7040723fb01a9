//! The authoritative store contract
//!
//! A [`Datastore`] owns the persisted state of users, groups, tracks and the
//! username → identifier mapping. Every primitive is synchronous and reports
//! its outcome as a `bool` (or an `Option` for lookups): "not found",
//! "already exists" and persistence failures are outcomes, not errors.
//!
//! ## Primitives
//!
//! | Primitive | Effect on success |
//! |-----------|-------------------|
//! | `load_or_create_user` | user loaded (created if unknown), username recorded |
//! | `load_user` | stored user copied into the loaded instance |
//! | `save_user` | loaded instance persisted |
//! | `create_and_load_group` / `create_and_load_track` | created if unknown, then loaded |
//! | `load_group` / `load_track` | stored entity copied into the loaded instance |
//! | `load_all_groups` / `load_all_tracks` | every stored entity loaded, stale ones unloaded |
//! | `save_group` / `save_track` | loaded instance persisted |
//! | `delete_group` / `delete_track` | removed from storage and unloaded |
//! | `save_uuid_data` | username mapping persisted |
//! | `get_uuid` | identifier for a username, ignoring case |
//!
//! [`StorageDatastore`] implements the contract on top of any raw
//! [`Storage`](crate::storage::Storage) backend.

mod managed;

pub use managed::{FileDatastore, MemoryDatastore, StorageDatastore};

use permstore_core::{Group, Name, Track, User, UserId, Username};

/// Synchronous primitives of the authoritative store
///
/// Implementations must be safe to call from many threads at once; the
/// store is the single synchronization point for an entity key.
pub trait Datastore: Send + Sync {
    /// Display name of this store
    fn name(&self) -> &str;

    /// Whether the store is available for user logins
    fn is_accepting_logins(&self) -> bool;

    /// Open or close the store to user logins
    fn set_accepting_logins(&self, accepting: bool);

    /// Load a user, creating it if unknown, and record its username
    fn load_or_create_user(&self, uuid: UserId, username: &Username) -> bool;

    /// Load a stored user
    fn load_user(&self, uuid: UserId) -> bool;

    /// Persist a user
    fn save_user(&self, user: &User) -> bool;

    /// Create a group if unknown, then load it
    fn create_and_load_group(&self, name: &Name) -> bool;

    /// Load a stored group
    fn load_group(&self, name: &Name) -> bool;

    /// Load every stored group
    fn load_all_groups(&self) -> bool;

    /// Persist a group
    fn save_group(&self, group: &Group) -> bool;

    /// Delete a group from storage and memory
    fn delete_group(&self, group: &Group) -> bool;

    /// Create a track if unknown, then load it
    fn create_and_load_track(&self, name: &Name) -> bool;

    /// Load a stored track
    fn load_track(&self, name: &Name) -> bool;

    /// Load every stored track
    fn load_all_tracks(&self) -> bool;

    /// Persist a track
    fn save_track(&self, track: &Track) -> bool;

    /// Delete a track from storage and memory
    fn delete_track(&self, track: &Track) -> bool;

    /// Persist the username → identifier mapping
    fn save_uuid_data(&self, username: &Username, uuid: UserId) -> bool;

    /// Identifier mapped to a username, ignoring case
    fn get_uuid(&self, username: &Username) -> Option<UserId>;
}
