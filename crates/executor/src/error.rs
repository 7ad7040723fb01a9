//! Error types for facade operations.
//!
//! Every variant reports a programming error at the call site: bad input,
//! a handle of the wrong kind, or an absent required argument. Ordinary
//! store outcomes (not found, already exists, persistence failure) are never
//! errors; they come back as `false` or `None`.
//!
//! # Categories
//!
//! | Category | Variants | Raised |
//! |----------|----------|--------|
//! | Validation | `InvalidFormat`, `MissingRequiredArgument` | before any store access |
//! | Handle | `WrongHandleKind` | before any store access |
//! | Dispatch | `Rejected` | when the worker pool refuses a non-blocking call |

use permstore_core::EntityKind;
use serde::{Deserialize, Serialize};

/// Facade errors.
///
/// # Example
///
/// ```ignore
/// use permstore_executor::Error;
///
/// match store.sync().create_and_load_group("bad name") {
///     Ok(created) => { /* store outcome */ }
///     Err(Error::InvalidFormat { field, reason, .. }) => {
///         println!("{} rejected: {}", field, reason);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    /// A name or username failed the format check
    #[error("invalid {field} '{value}': {reason}")]
    InvalidFormat {
        /// Which argument was rejected
        field: String,
        /// The rejected input
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// A link wraps a different kind of entity than the operation needs
    #[error("wrong handle kind: expected {expected}, got {actual}")]
    WrongHandleKind {
        /// Kind the operation requires
        expected: EntityKind,
        /// Kind the link actually wraps
        actual: EntityKind,
    },

    /// A required argument was absent
    #[error("missing required argument: {argument}")]
    MissingRequiredArgument {
        /// Name of the absent argument
        argument: String,
    },

    /// The worker pool refused a non-blocking operation
    #[error("{operation} rejected: worker pool is full or shut down")]
    Rejected {
        /// Operation that was not dispatched
        operation: String,
    },
}
