//! Entity links
//!
//! A link is the public handle to one loaded user, group or track. It shares
//! the registry's instance, so changes made through a link are visible to the
//! store and to every other link for the same entity. Saving a link saves
//! exactly that instance.
//!
//! Two links are equal when they wrap the same instance.

mod group;
mod track;
mod user;

pub use group::GroupLink;
pub use track::TrackLink;
pub use user::UserLink;

use permstore_core::EntityKind;

/// Any link, as accepted by save and delete operations
#[derive(Debug, Clone, PartialEq)]
pub enum EntityLink {
    /// Link to a user
    User(UserLink),
    /// Link to a group
    Group(GroupLink),
    /// Link to a track
    Track(TrackLink),
}

impl EntityLink {
    /// Kind of entity this link wraps
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityLink::User(_) => EntityKind::User,
            EntityLink::Group(_) => EntityKind::Group,
            EntityLink::Track(_) => EntityKind::Track,
        }
    }

    /// The user link, if this is one
    pub fn as_user(&self) -> Option<&UserLink> {
        match self {
            EntityLink::User(user) => Some(user),
            _ => None,
        }
    }

    /// The group link, if this is one
    pub fn as_group(&self) -> Option<&GroupLink> {
        match self {
            EntityLink::Group(group) => Some(group),
            _ => None,
        }
    }

    /// The track link, if this is one
    pub fn as_track(&self) -> Option<&TrackLink> {
        match self {
            EntityLink::Track(track) => Some(track),
            _ => None,
        }
    }
}

macro_rules! impl_from_link {
    ($link:ident, $variant:ident) => {
        impl From<$link> for EntityLink {
            fn from(link: $link) -> Self {
                EntityLink::$variant(link)
            }
        }

        impl From<&$link> for EntityLink {
            fn from(link: &$link) -> Self {
                EntityLink::$variant(link.clone())
            }
        }
    };
}

impl_from_link!(UserLink, User);
impl_from_link!(GroupLink, Group);
impl_from_link!(TrackLink, Track);

impl From<&EntityLink> for EntityLink {
    fn from(link: &EntityLink) -> Self {
        link.clone()
    }
}
