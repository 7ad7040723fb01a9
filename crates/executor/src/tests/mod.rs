//! Scenario tests for the facade.
//!
//! Most tests run against [`RecordingDatastore`], a store double that answers
//! every primitive with a fixed result and records which primitives were
//! called, so tests can check both what the caller sees and what reached the
//! store.

pub mod validation;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use permstore_core::{Group, Name, Track, User, UserId, Username};
use permstore_engine::{Backend, Datastore, Registry, StoreConfig};

use crate::link::{EntityLink, GroupLink, TrackLink, UserLink};
use crate::DatastoreLink;

/// Store double with a fixed answer for every primitive
pub struct RecordingDatastore {
    calls: Mutex<Vec<&'static str>>,
    result: bool,
    uuids: HashMap<String, UserId>,
    accepting_logins: AtomicBool,
}

impl RecordingDatastore {
    pub fn new(result: bool) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            result,
            uuids: HashMap::new(),
            accepting_logins: AtomicBool::new(result),
        }
    }

    /// Seed the username mapping `get_uuid` answers from.
    pub fn with_uuid(mut self, username: &str, uuid: UserId) -> Self {
        self.uuids.insert(username.to_lowercase(), uuid);
        self
    }

    /// Primitives called so far, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    fn record(&self, primitive: &'static str) -> bool {
        self.calls.lock().push(primitive);
        self.result
    }
}

impl Datastore for RecordingDatastore {
    fn name(&self) -> &str {
        "recording"
    }

    fn is_accepting_logins(&self) -> bool {
        self.accepting_logins.load(Ordering::SeqCst)
    }

    fn set_accepting_logins(&self, accepting: bool) {
        self.accepting_logins.store(accepting, Ordering::SeqCst);
    }

    fn load_or_create_user(&self, _uuid: UserId, _username: &Username) -> bool {
        self.record("load_or_create_user")
    }

    fn load_user(&self, _uuid: UserId) -> bool {
        self.record("load_user")
    }

    fn save_user(&self, _user: &User) -> bool {
        self.record("save_user")
    }

    fn create_and_load_group(&self, _name: &Name) -> bool {
        self.record("create_and_load_group")
    }

    fn load_group(&self, _name: &Name) -> bool {
        self.record("load_group")
    }

    fn load_all_groups(&self) -> bool {
        self.record("load_all_groups")
    }

    fn save_group(&self, _group: &Group) -> bool {
        self.record("save_group")
    }

    fn delete_group(&self, _group: &Group) -> bool {
        self.record("delete_group")
    }

    fn create_and_load_track(&self, _name: &Name) -> bool {
        self.record("create_and_load_track")
    }

    fn load_track(&self, _name: &Name) -> bool {
        self.record("load_track")
    }

    fn load_all_tracks(&self) -> bool {
        self.record("load_all_tracks")
    }

    fn save_track(&self, _track: &Track) -> bool {
        self.record("save_track")
    }

    fn delete_track(&self, _track: &Track) -> bool {
        self.record("delete_track")
    }

    fn save_uuid_data(&self, _username: &Username, _uuid: UserId) -> bool {
        self.record("save_uuid_data")
    }

    fn get_uuid(&self, username: &Username) -> Option<UserId> {
        self.calls.lock().push("get_uuid");
        self.uuids.get(&username.key()).copied()
    }
}

/// A facade over `store`, with a single worker thread.
pub fn facade(store: Arc<RecordingDatastore>) -> (DatastoreLink, Arc<Backend>) {
    let config = StoreConfig {
        worker_threads: 1,
        ..StoreConfig::memory()
    };
    let backend = Backend::new(store, Arc::new(Registry::new()), config);
    (DatastoreLink::new(Arc::clone(&backend)), backend)
}

pub fn user_link() -> EntityLink {
    UserLink::new(Arc::new(User::new(UserId::new()))).into()
}

pub fn group_link(name: &str) -> EntityLink {
    GroupLink::new(Arc::new(Group::new(Name::parse(name).unwrap()))).into()
}

pub fn track_link(name: &str) -> EntityLink {
    TrackLink::new(Arc::new(Track::new(Name::parse(name).unwrap()))).into()
}
