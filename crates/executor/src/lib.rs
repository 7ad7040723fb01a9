//! # permstore executor
//!
//! The public facade over a permstore datastore.
//!
//! - [`PermissionsApi`]: root object; datastore, configuration, loaded entities
//! - [`DatastoreLink`]: the datastore, with a blocking and a callback view
//! - [`UuidCache`]: username to id lookups
//! - [`UserLink`], [`GroupLink`], [`TrackLink`]: handles to loaded entities
//! - [`Command`]/[`Operation`]/[`Output`]: the operation table both views share
//!
//! ## Quick Start
//!
//! ```text
//! use permstore_executor::PermissionsApi;
//! use permstore_engine::Backend;
//!
//! let api = PermissionsApi::new(Backend::open("/path/to/data")?);
//! let store = api.datastore();
//!
//! store.sync().create_and_load_group("admin")?;
//! let admin = api.group("admin")?.expect("just loaded");
//! admin.set_permission("*", true);
//! store.async_().save_group(&admin, Some(Box::new(|ok| println!("saved: {}", ok))))?;
//! ```
//!
//! ## Errors
//!
//! `Err` always means the call was wrong: a malformed name, a link of the
//! wrong kind, or a missing argument. Store outcomes such as "not found" or
//! "already exists" come back as `Ok(false)` / `Ok(None)`.

#![warn(clippy::all)]

pub mod api;
pub mod callback;
mod command;
pub mod datastore;
mod error;
mod executor;
pub mod link;
pub mod operation;
mod output;
mod uuid_cache;
pub mod validation;

#[cfg(test)]
mod tests;

pub use api::PermissionsApi;
pub use callback::{check_callback, Callback};
pub use command::Command;
pub use datastore::{AsyncDatastore, DatastoreLink, SyncDatastore};
pub use error::Error;
pub use executor::Executor;
pub use link::{EntityLink, GroupLink, TrackLink, UserLink};
pub use operation::Operation;
pub use output::Output;
pub use uuid_cache::UuidCache;

pub use permstore_core::{EntityKind, UserId};

/// Result type for facade operations
pub type Result<T> = std::result::Result<T, Error>;
