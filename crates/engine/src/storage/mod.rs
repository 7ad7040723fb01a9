//! Raw persistence backends
//!
//! A [`Storage`] reads and writes entity snapshots and knows nothing about
//! loaded instances. [`StorageDatastore`](crate::datastore::StorageDatastore)
//! layers the registry and the datastore contract on top.
//!
//! - `memory`: `DashMap`-backed, for tests and ephemeral setups
//! - `file`: one JSON file per entity under a data directory

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use permstore_core::{GroupData, Name, Result, TrackData, UserData, UserId};

/// Snapshot-level persistence
///
/// Usernames are passed already lowercased.
pub trait Storage: Send + Sync {
    /// Short backend identifier used in logs
    fn kind(&self) -> &'static str;

    /// Stored user, if any
    fn read_user(&self, uuid: UserId) -> Result<Option<UserData>>;
    /// Store a user
    fn write_user(&self, data: &UserData) -> Result<()>;

    /// Stored group, if any
    fn read_group(&self, name: &Name) -> Result<Option<GroupData>>;
    /// Store a group
    fn write_group(&self, data: &GroupData) -> Result<()>;
    /// Remove a group. Returns `false` if it was not stored.
    fn remove_group(&self, name: &Name) -> Result<bool>;
    /// Names of every stored group
    fn list_groups(&self) -> Result<Vec<Name>>;

    /// Stored track, if any
    fn read_track(&self, name: &Name) -> Result<Option<TrackData>>;
    /// Store a track
    fn write_track(&self, data: &TrackData) -> Result<()>;
    /// Remove a track. Returns `false` if it was not stored.
    fn remove_track(&self, name: &Name) -> Result<bool>;
    /// Names of every stored track
    fn list_tracks(&self) -> Result<Vec<Name>>;

    /// Identifier mapped to a lowercased username
    fn read_uuid(&self, username_key: &str) -> Result<Option<UserId>>;
    /// Map a lowercased username to an identifier
    fn write_uuid(&self, username_key: &str, uuid: UserId) -> Result<()>;
}
