//! Contract types for API stability
//!
//! Keys every store and every facade operation agree on:
//!
//! - `name`: validated group/track names and usernames

pub mod name;

// Re-exports
pub use name::{Name, NameError, Username, MAX_NAME_LENGTH, MAX_USERNAME_LENGTH};
