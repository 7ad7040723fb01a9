//! Read-only view of the username to id mapping

use permstore_core::UserId;

use crate::SyncDatastore;
use crate::Result;

/// Username lookups against the store's recorded mapping.
///
/// Usernames are matched ignoring case. Recording a mapping goes through
/// [`SyncDatastore::save_uuid_data`] or its async counterpart.
#[derive(Debug, Clone)]
pub struct UuidCache {
    store: SyncDatastore,
}

impl UuidCache {
    pub(crate) fn new(store: SyncDatastore) -> Self {
        Self { store }
    }

    /// Id recorded for `username`, if any
    pub fn get(&self, username: &str) -> Result<Option<UserId>> {
        self.store.get_uuid(username)
    }

    /// Whether any id is recorded for `username`
    pub fn contains(&self, username: &str) -> Result<bool> {
        Ok(self.get(username)?.is_some())
    }
}
