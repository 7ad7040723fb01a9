//! Group/track names and usernames
//!
//! Groups and tracks are keyed by a [`Name`]; users carry a display
//! [`Username`]. Both are checked against a character set and a length
//! limit before they reach any store.
//!
//! ## Validation
//!
//! | Type | Length | Characters | Stored as |
//! |------|--------|------------|-----------|
//! | `Name` | 1-36 | `[A-Za-z0-9_-]` | lowercase |
//! | `Username` | 1-16 | `[A-Za-z0-9_]` | as given |
//!
//! Usernames keep their case for display but compare case-insensitively
//! through [`Username::key`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a group or track name
pub const MAX_NAME_LENGTH: usize = 36;

/// Maximum length of a username
pub const MAX_USERNAME_LENGTH: usize = 16;

/// Error when validating a name or username
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// Input is empty
    #[error("name cannot be empty")]
    Empty,
    /// Input exceeds the maximum length
    #[error("name too long: {length} chars (max {max})")]
    TooLong {
        /// Actual length of the input
        length: usize,
        /// Maximum allowed length
        max: usize,
    },
    /// Input contains a character outside the allowed set
    #[error("invalid character '{char}' at position {position}")]
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position of the invalid character
        position: usize,
    },
}

fn check(raw: &str, max: usize, allowed: fn(char) -> bool) -> Result<(), NameError> {
    if raw.is_empty() {
        return Err(NameError::Empty);
    }
    let length = raw.chars().count();
    if length > max {
        return Err(NameError::TooLong { length, max });
    }
    for (position, ch) in raw.chars().enumerate() {
        if !allowed(ch) {
            return Err(NameError::InvalidChar { char: ch, position });
        }
    }
    Ok(())
}

#[inline]
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[inline]
fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Canonical key of a group or track
///
/// Always lowercase; two inputs differing only by case produce equal names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Validate and normalize a group or track name
    ///
    /// # Errors
    ///
    /// Returns `NameError` if the input is empty, too long, or contains a
    /// character outside `[A-Za-z0-9_-]`.
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        Self::validate(raw)?;
        Ok(Name(raw.to_ascii_lowercase()))
    }

    /// Check a raw name without building it
    pub fn validate(raw: &str) -> Result<(), NameError> {
        check(raw, MAX_NAME_LENGTH, is_name_char)
    }

    /// Get the name as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Name {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Name::parse(&value)
    }
}

impl TryFrom<&str> for Name {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Name::parse(value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

/// Display name of a user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate a username
    ///
    /// # Errors
    ///
    /// Returns `NameError` if the input is empty, longer than 16 characters,
    /// or contains a character outside `[A-Za-z0-9_]`.
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        Self::validate(raw)?;
        Ok(Username(raw.to_string()))
    }

    /// Check a raw username without building it
    pub fn validate(raw: &str) -> Result<(), NameError> {
        check(raw, MAX_USERNAME_LENGTH, is_username_char)
    }

    /// The username as given
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase lookup key used by the username mapping
    pub fn key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Username::parse(&value)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.0
    }
}
