//! Argument checks shared by every facade operation.
//!
//! All of these run before the store is touched. A failure here means the
//! operation is never dispatched and no callback is ever invoked.

use std::sync::Arc;

use permstore_core::{EntityKind, Group, Name, NameError, Track, User, Username};

use crate::link::EntityLink;
use crate::{Error, Result};

fn invalid(field: &str, value: &str, err: NameError) -> Error {
    Error::InvalidFormat {
        field: field.to_string(),
        value: value.to_string(),
        reason: err.to_string(),
    }
}

fn wrong_kind(expected: EntityKind, link: &EntityLink) -> Error {
    Error::WrongHandleKind {
        expected,
        actual: link.kind(),
    }
}

/// Check a group or track name and normalize it to lowercase.
pub fn validate_name(raw: &str) -> Result<Name> {
    Name::parse(raw).map_err(|e| invalid("name", raw, e))
}

/// Check a player username. Case is preserved.
pub fn validate_username(raw: &str) -> Result<Username> {
    Username::parse(raw).map_err(|e| invalid("username", raw, e))
}

/// Fail with `MissingRequiredArgument` if `value` is absent.
pub fn require_present<T>(argument: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| Error::MissingRequiredArgument {
        argument: argument.to_string(),
    })
}

/// Fail with `WrongHandleKind` unless `link` wraps an entity of `expected` kind.
pub fn require_kind(link: &EntityLink, expected: EntityKind) -> Result<()> {
    if link.kind() == expected {
        Ok(())
    } else {
        Err(wrong_kind(expected, link))
    }
}

/// The authoritative user behind a link.
pub(crate) fn require_user(link: &EntityLink) -> Result<Arc<User>> {
    match link {
        EntityLink::User(user) => Ok(Arc::clone(user.master())),
        other => Err(wrong_kind(EntityKind::User, other)),
    }
}

/// The authoritative group behind a link.
pub(crate) fn require_group(link: &EntityLink) -> Result<Arc<Group>> {
    match link {
        EntityLink::Group(group) => Ok(Arc::clone(group.master())),
        other => Err(wrong_kind(EntityKind::Group, other)),
    }
}

/// The authoritative track behind a link.
pub(crate) fn require_track(link: &EntityLink) -> Result<Arc<Track>> {
    match link {
        EntityLink::Track(track) => Ok(Arc::clone(track.master())),
        other => Err(wrong_kind(EntityKind::Track, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::{GroupLink, TrackLink, UserLink};
    use permstore_core::UserId;

    fn group_link(name: &str) -> EntityLink {
        GroupLink::new(Arc::new(Group::new(Name::parse(name).unwrap()))).into()
    }

    #[test]
    fn test_validate_name_lowercases() {
        assert_eq!(validate_name("Admin").unwrap().as_str(), "admin");
    }

    #[test]
    fn test_validate_name_reports_field_and_value() {
        match validate_name("has space") {
            Err(Error::InvalidFormat { field, value, .. }) => {
                assert_eq!(field, "name");
                assert_eq!(value, "has space");
            }
            other => panic!("Expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_username_keeps_case() {
        assert_eq!(validate_username("Notch").unwrap().as_str(), "Notch");
        assert!(matches!(
            validate_username("way_too_long_username"),
            Err(Error::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_username("dash-ed"),
            Err(Error::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_require_present() {
        assert_eq!(require_present("uuid", Some(3)).unwrap(), 3);
        assert_eq!(
            require_present::<u8>("uuid", None),
            Err(Error::MissingRequiredArgument {
                argument: "uuid".into()
            })
        );
    }

    #[test]
    fn test_require_kind() {
        let link = group_link("admin");
        assert!(require_kind(&link, EntityKind::Group).is_ok());
        assert_eq!(
            require_kind(&link, EntityKind::Track),
            Err(Error::WrongHandleKind {
                expected: EntityKind::Track,
                actual: EntityKind::Group,
            })
        );
    }

    #[test]
    fn test_require_unwraps_same_instance() {
        let user = Arc::new(User::new(UserId::new()));
        let link: EntityLink = UserLink::new(Arc::clone(&user)).into();
        assert!(Arc::ptr_eq(&require_user(&link).unwrap(), &user));

        let track = Arc::new(Track::new(Name::parse("staff").unwrap()));
        let link: EntityLink = TrackLink::new(Arc::clone(&track)).into();
        assert!(Arc::ptr_eq(&require_track(&link).unwrap(), &track));
        assert!(matches!(
            require_group(&link),
            Err(Error::WrongHandleKind {
                expected: EntityKind::Group,
                actual: EntityKind::Track,
            })
        ));
    }
}
