//! Bad arguments never reach the store.
//!
//! Every operation is tried through both views with malformed names,
//! malformed usernames, links of the wrong kind and missing arguments. Each
//! case must fail synchronously, leave the store untouched and never invoke
//! the callback.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;

use super::{facade, group_link, track_link, user_link, RecordingDatastore};
use crate::{Callback, Command, EntityKind, Error, Executor, UserId};

fn counting<T: 'static>(counter: &Arc<AtomicUsize>) -> Option<Callback<T>> {
    let counter = Arc::clone(counter);
    Some(Box::new(move |_: T| {
        counter.fetch_add(1, Ordering::SeqCst);
    }))
}

fn assert_invalid_format<T: std::fmt::Debug>(result: crate::Result<T>, field: &str) {
    match result {
        Err(Error::InvalidFormat { field: f, .. }) => assert_eq!(f, field),
        other => panic!("Expected InvalidFormat for {}, got {:?}", field, other),
    }
}

fn assert_wrong_kind<T: std::fmt::Debug>(
    result: crate::Result<T>,
    expected: EntityKind,
    actual: EntityKind,
) {
    assert_eq!(
        result.unwrap_err(),
        Error::WrongHandleKind { expected, actual }
    );
}

const BAD_NAMES: &[&str] = &[
    "",
    "has space",
    "semi;colon",
    "dot.ted",
    "thirty_seven_characters_is_one_too_many",
];
const BAD_USERNAMES: &[&str] = &["", "has space", "dash-ed", "seventeen_chars__"];

#[test]
fn test_sync_rejects_bad_names() {
    let store = Arc::new(RecordingDatastore::new(true));
    let (link, _backend) = facade(Arc::clone(&store));
    let sync = link.sync();

    for bad in BAD_NAMES {
        assert_invalid_format(sync.create_and_load_group(bad), "name");
        assert_invalid_format(sync.load_group(bad), "name");
        assert_invalid_format(sync.create_and_load_track(bad), "name");
        assert_invalid_format(sync.load_track(bad), "name");
    }
    assert!(store.calls().is_empty());
}

#[test]
fn test_sync_rejects_bad_usernames() {
    let store = Arc::new(RecordingDatastore::new(true));
    let (link, _backend) = facade(Arc::clone(&store));
    let sync = link.sync();

    for bad in BAD_USERNAMES {
        assert_invalid_format(sync.load_or_create_user(UserId::new(), bad), "username");
        assert_invalid_format(sync.save_uuid_data(bad, UserId::new()), "username");
        assert_invalid_format(sync.get_uuid(bad), "username");
    }
    assert!(store.calls().is_empty());
}

#[test]
fn test_async_rejects_bad_arguments_without_callback() {
    let store = Arc::new(RecordingDatastore::new(true));
    let (link, backend) = facade(Arc::clone(&store));
    let async_ = link.async_();
    let invoked = Arc::new(AtomicUsize::new(0));

    for bad in BAD_NAMES {
        assert_invalid_format(
            async_.create_and_load_group(bad, counting(&invoked)),
            "name",
        );
        assert_invalid_format(async_.load_group(bad, counting(&invoked)), "name");
        assert_invalid_format(
            async_.create_and_load_track(bad, counting(&invoked)),
            "name",
        );
        assert_invalid_format(async_.load_track(bad, counting(&invoked)), "name");
    }
    for bad in BAD_USERNAMES {
        assert_invalid_format(
            async_.load_or_create_user(UserId::new(), bad, counting(&invoked)),
            "username",
        );
        assert_invalid_format(
            async_.save_uuid_data(bad, UserId::new(), counting(&invoked)),
            "username",
        );
        assert_invalid_format(async_.get_uuid(bad, counting(&invoked)), "username");
    }

    backend.drain();
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
    assert!(store.calls().is_empty());
}

#[test]
fn test_sync_rejects_wrong_link_kind() {
    use EntityKind::{Group, Track, User};

    let store = Arc::new(RecordingDatastore::new(true));
    let (link, _backend) = facade(Arc::clone(&store));
    let sync = link.sync();

    let cases = vec![
        (sync.save_user(group_link("admin")), User, Group),
        (sync.save_user(track_link("staff")), User, Track),
        (sync.save_group(user_link()), Group, User),
        (sync.delete_group(track_link("staff")), Group, Track),
        (sync.save_track(group_link("admin")), Track, Group),
        (sync.delete_track(user_link()), Track, User),
    ];
    for (result, expected, actual) in cases {
        assert_wrong_kind(result, expected, actual);
    }

    assert!(store.calls().is_empty());
}

#[test]
fn test_async_rejects_wrong_link_kind() {
    let store = Arc::new(RecordingDatastore::new(true));
    let (link, backend) = facade(Arc::clone(&store));
    let async_ = link.async_();
    let invoked = Arc::new(AtomicUsize::new(0));

    assert_wrong_kind(
        async_.save_user(group_link("admin"), counting(&invoked)),
        EntityKind::User,
        EntityKind::Group,
    );
    assert_wrong_kind(
        async_.save_group(track_link("staff"), counting(&invoked)),
        EntityKind::Group,
        EntityKind::Track,
    );
    assert_wrong_kind(
        async_.delete_group(user_link(), counting(&invoked)),
        EntityKind::Group,
        EntityKind::User,
    );
    assert_wrong_kind(
        async_.save_track(user_link(), counting(&invoked)),
        EntityKind::Track,
        EntityKind::User,
    );
    assert_wrong_kind(
        async_.delete_track(group_link("admin"), counting(&invoked)),
        EntityKind::Track,
        EntityKind::Group,
    );

    backend.drain();
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
    assert!(store.calls().is_empty());
}

#[test]
fn test_missing_arguments() {
    let store = Arc::new(RecordingDatastore::new(true));
    let executor = Executor::new(store.clone());

    let id = UserId::new();
    let cases = vec![
        (
            Command::LoadOrCreateUser {
                uuid: Some(id),
                username: None,
            },
            "username",
        ),
        (Command::LoadUser { uuid: None }, "uuid"),
        (Command::SaveUser { user: None }, "user"),
        (Command::CreateAndLoadGroup { name: None }, "name"),
        (Command::LoadGroup { name: None }, "name"),
        (Command::SaveGroup { group: None }, "group"),
        (Command::DeleteGroup { group: None }, "group"),
        (Command::CreateAndLoadTrack { name: None }, "name"),
        (Command::LoadTrack { name: None }, "name"),
        (Command::SaveTrack { track: None }, "track"),
        (Command::DeleteTrack { track: None }, "track"),
        (
            Command::SaveUuidData {
                username: Some("Alice".into()),
                uuid: None,
            },
            "uuid",
        ),
        (Command::GetUuid { username: None }, "username"),
    ];

    for (cmd, argument) in cases {
        let op = cmd.name();
        assert_eq!(
            executor.execute(cmd).unwrap_err(),
            Error::MissingRequiredArgument {
                argument: argument.into()
            },
            "{} should require {}",
            op,
            argument
        );
    }
    assert!(store.calls().is_empty());
}

fn malformed_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z0-9_-]{37,48}",
        "[a-z]{0,6}[ .:;/@!#$%^&*()+=]{1}[a-z]{0,6}",
    ]
}

fn malformed_username() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Za-z0-9_]{17,24}",
        "[A-Za-z]{0,5}[ .:;/@!#$%^&*()+=-]{1}[A-Za-z]{0,5}",
    ]
}

proptest! {
    #[test]
    fn prop_malformed_names_never_reach_store(name in malformed_name()) {
        let store = Arc::new(RecordingDatastore::new(true));
        let (link, backend) = facade(Arc::clone(&store));

        prop_assert!(link.sync().create_and_load_group(&name).is_err());
        prop_assert!(link.sync().load_track(&name).is_err());
        prop_assert!(link.async_().load_group(&name, None).is_err());
        prop_assert!(link.async_().create_and_load_track(&name, None).is_err());

        backend.drain();
        prop_assert!(store.calls().is_empty());
    }

    #[test]
    fn prop_malformed_usernames_never_reach_store(username in malformed_username()) {
        let store = Arc::new(RecordingDatastore::new(true));
        let (link, backend) = facade(Arc::clone(&store));

        prop_assert!(link.sync().get_uuid(&username).is_err());
        prop_assert!(link.sync().load_or_create_user(UserId::new(), &username).is_err());
        prop_assert!(link.async_().save_uuid_data(&username, UserId::new(), None).is_err());

        backend.drain();
        prop_assert!(store.calls().is_empty());
    }
}
