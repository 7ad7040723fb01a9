//! In-memory storage backend

use dashmap::DashMap;

use permstore_core::{GroupData, Name, Result, TrackData, UserData, UserId};

use super::Storage;

/// Snapshots held in process memory; lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStorage {
    users: DashMap<UserId, UserData>,
    groups: DashMap<Name, GroupData>,
    tracks: DashMap<Name, TrackData>,
    uuids: DashMap<String, UserId>,
}

impl MemoryStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(mut names: Vec<Name>) -> Vec<Name> {
    names.sort();
    names
}

impl Storage for MemoryStorage {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn read_user(&self, uuid: UserId) -> Result<Option<UserData>> {
        Ok(self.users.get(&uuid).map(|d| d.value().clone()))
    }

    fn write_user(&self, data: &UserData) -> Result<()> {
        self.users.insert(data.uuid, data.clone());
        Ok(())
    }

    fn read_group(&self, name: &Name) -> Result<Option<GroupData>> {
        Ok(self.groups.get(name).map(|d| d.value().clone()))
    }

    fn write_group(&self, data: &GroupData) -> Result<()> {
        self.groups.insert(data.name.clone(), data.clone());
        Ok(())
    }

    fn remove_group(&self, name: &Name) -> Result<bool> {
        Ok(self.groups.remove(name).is_some())
    }

    fn list_groups(&self) -> Result<Vec<Name>> {
        Ok(sorted(self.groups.iter().map(|e| e.key().clone()).collect()))
    }

    fn read_track(&self, name: &Name) -> Result<Option<TrackData>> {
        Ok(self.tracks.get(name).map(|d| d.value().clone()))
    }

    fn write_track(&self, data: &TrackData) -> Result<()> {
        self.tracks.insert(data.name.clone(), data.clone());
        Ok(())
    }

    fn remove_track(&self, name: &Name) -> Result<bool> {
        Ok(self.tracks.remove(name).is_some())
    }

    fn list_tracks(&self) -> Result<Vec<Name>> {
        Ok(sorted(self.tracks.iter().map(|e| e.key().clone()).collect()))
    }

    fn read_uuid(&self, username_key: &str) -> Result<Option<UserId>> {
        Ok(self.uuids.get(username_key).map(|u| *u.value()))
    }

    fn write_uuid(&self, username_key: &str, uuid: UserId) -> Result<()> {
        self.uuids.insert(username_key.to_string(), uuid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_write_read_remove() {
        let storage = MemoryStorage::new();
        let name = Name::parse("admin").unwrap();
        assert!(storage.read_group(&name).unwrap().is_none());

        let data = GroupData {
            name: name.clone(),
            permissions: Default::default(),
        };
        storage.write_group(&data).unwrap();
        assert_eq!(storage.read_group(&name).unwrap(), Some(data));
        assert_eq!(storage.list_groups().unwrap(), vec![name.clone()]);

        assert!(storage.remove_group(&name).unwrap());
        assert!(!storage.remove_group(&name).unwrap());
    }

    #[test]
    fn test_uuid_mapping() {
        let storage = MemoryStorage::new();
        let id = UserId::new();
        storage.write_uuid("alice", id).unwrap();
        assert_eq!(storage.read_uuid("alice").unwrap(), Some(id));
        assert_eq!(storage.read_uuid("bob").unwrap(), None);
    }
}
