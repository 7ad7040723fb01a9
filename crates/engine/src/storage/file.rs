//! Flat-file JSON storage backend
//!
//! ## Layout
//!
//! ```text
//! <data_dir>/
//!   users/<uuid>.json
//!   groups/<name>.json
//!   tracks/<name>.json
//!   uuidcache.json        { "<lowercase username>": "<uuid>", ... }
//! ```
//!
//! Every write goes to a fresh temp file in the target's directory that is
//! synced and renamed over the target, so neither a crash nor a concurrent
//! save of the same key leaves a half-written entity behind.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

use permstore_core::{GroupData, Name, Result, TrackData, UserData, UserId};

use super::Storage;

const USERS_DIR: &str = "users";
const GROUPS_DIR: &str = "groups";
const TRACKS_DIR: &str = "tracks";
const UUID_CACHE_FILE: &str = "uuidcache.json";
const EXTENSION: &str = "json";

/// JSON files under a data directory
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
    // Serializes read-modify-write of the username mapping file
    uuid_lock: Mutex<()>,
}

impl FileStorage {
    /// Open (and create if needed) the directory layout under `root`
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        for dir in [USERS_DIR, GROUPS_DIR, TRACKS_DIR] {
            std::fs::create_dir_all(root.join(dir))?;
        }
        Ok(Self {
            root,
            uuid_lock: Mutex::new(()),
        })
    }

    /// Data directory this storage writes to
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entity_path(&self, dir: &str, key: &str) -> PathBuf {
        self.root.join(dir).join(format!("{}.{}", key, EXTENSION))
    }

    fn list_names(&self, dir: &str) -> Result<Vec<Name>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(self.root.join(dir))? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match Name::parse(stem) {
                Ok(name) => names.push(name),
                Err(e) => {
                    warn!(
                        target: "permstore::store",
                        path = %path.display(),
                        error = %e,
                        "Skipping file with invalid entity name"
                    )
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// Each write gets its own temp file, so concurrent writers of one key never
// share a path; the last rename wins.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let payload = serde_json::to_vec_pretty(value)?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&payload)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn remove_file(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

impl Storage for FileStorage {
    fn kind(&self) -> &'static str {
        "file"
    }

    fn read_user(&self, uuid: UserId) -> Result<Option<UserData>> {
        read_json(&self.entity_path(USERS_DIR, &uuid.to_string()))
    }

    fn write_user(&self, data: &UserData) -> Result<()> {
        write_json(&self.entity_path(USERS_DIR, &data.uuid.to_string()), data)
    }

    fn read_group(&self, name: &Name) -> Result<Option<GroupData>> {
        read_json(&self.entity_path(GROUPS_DIR, name.as_str()))
    }

    fn write_group(&self, data: &GroupData) -> Result<()> {
        write_json(&self.entity_path(GROUPS_DIR, data.name.as_str()), data)
    }

    fn remove_group(&self, name: &Name) -> Result<bool> {
        remove_file(&self.entity_path(GROUPS_DIR, name.as_str()))
    }

    fn list_groups(&self) -> Result<Vec<Name>> {
        self.list_names(GROUPS_DIR)
    }

    fn read_track(&self, name: &Name) -> Result<Option<TrackData>> {
        read_json(&self.entity_path(TRACKS_DIR, name.as_str()))
    }

    fn write_track(&self, data: &TrackData) -> Result<()> {
        write_json(&self.entity_path(TRACKS_DIR, data.name.as_str()), data)
    }

    fn remove_track(&self, name: &Name) -> Result<bool> {
        remove_file(&self.entity_path(TRACKS_DIR, name.as_str()))
    }

    fn list_tracks(&self) -> Result<Vec<Name>> {
        self.list_names(TRACKS_DIR)
    }

    fn read_uuid(&self, username_key: &str) -> Result<Option<UserId>> {
        let _guard = self.uuid_lock.lock();
        let cache: Option<BTreeMap<String, UserId>> = read_json(&self.root.join(UUID_CACHE_FILE))?;
        Ok(cache.and_then(|c| c.get(username_key).copied()))
    }

    fn write_uuid(&self, username_key: &str, uuid: UserId) -> Result<()> {
        let _guard = self.uuid_lock.lock();
        let path = self.root.join(UUID_CACHE_FILE);
        let mut cache: BTreeMap<String, UserId> = read_json(&path)?.unwrap_or_default();
        cache.insert(username_key.to_string(), uuid);
        write_json(&path, &cache)
    }
}
