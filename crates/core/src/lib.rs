//! Core types for permstore
//!
//! This crate defines the foundational types used throughout the system:
//! - UserId: 128-bit identifier for users
//! - EntityKind: discriminates users, groups and tracks
//! - Name / Username: validated keys (contract)
//! - User / Group / Track: authoritative entities and their persisted snapshots
//! - Error: engine-internal error type

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod entity;
pub mod error;
pub mod types;

pub use contract::{Name, NameError, Username, MAX_NAME_LENGTH, MAX_USERNAME_LENGTH};
pub use entity::{
    Group, GroupData, PermissionNodes, Track, TrackData, User, UserData, DEFAULT_GROUP,
};
pub use error::{Error, Result};
pub use types::{EntityKind, UserId};
