//! Output enum for operation results.
//!
//! Each [`Command`](crate::Command) variant maps to exactly one `Output`
//! variant: `GetUuid` produces `MaybeUuid`, everything else produces `Bool`.

use permstore_core::UserId;
use serde::{Deserialize, Serialize};

/// Store result of one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    /// Success flag reported by the store
    Bool(bool),

    /// Id recorded for a username, if any
    MaybeUuid(Option<UserId>),
}

impl Output {
    /// The flag, if this is a `Bool` output
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Output::Bool(b) => Some(*b),
            Output::MaybeUuid(_) => None,
        }
    }

    /// The looked-up id, if this is a `MaybeUuid` output
    pub fn as_uuid(&self) -> Option<Option<UserId>> {
        match self {
            Output::MaybeUuid(id) => Some(*id),
            Output::Bool(_) => None,
        }
    }
}

/// Typed extraction used by the facade views
pub(crate) trait FromOutput: Sized {
    fn from_output(output: Output) -> Self;
}

impl FromOutput for bool {
    fn from_output(output: Output) -> Self {
        debug_assert!(output.as_bool().is_some(), "expected Bool, got {:?}", output);
        output.as_bool().unwrap_or(false)
    }
}

impl FromOutput for Option<UserId> {
    fn from_output(output: Output) -> Self {
        debug_assert!(output.as_uuid().is_some(), "expected MaybeUuid, got {:?}", output);
        output.as_uuid().flatten()
    }
}
