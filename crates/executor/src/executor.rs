//! The Executor - blocking entry point to the operation table.

use std::sync::Arc;

use tracing::debug;

use permstore_engine::Datastore;

use crate::operation::Operation;
use crate::{Command, Output, Result};

/// Stateless dispatcher from [`Command`] to store primitive.
///
/// Holds a reference to the datastore and nothing else; all state lives in
/// the store. `Executor` is `Send + Sync` and cheap to clone.
///
/// # Example
///
/// ```ignore
/// use permstore_executor::{Command, Executor, Output};
///
/// let executor = Executor::new(backend.datastore().clone());
/// let out = executor.execute(Command::LoadGroup { name: Some("admin".into()) })?;
/// assert_eq!(out, Output::Bool(true));
/// ```
#[derive(Clone)]
pub struct Executor {
    datastore: Arc<dyn Datastore>,
}

impl Executor {
    /// Create an executor over a datastore.
    pub fn new(datastore: Arc<dyn Datastore>) -> Self {
        Self { datastore }
    }

    /// The datastore operations are applied to
    pub fn datastore(&self) -> &Arc<dyn Datastore> {
        &self.datastore
    }

    /// Validate and run a command on the calling thread.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let op = Operation::prepare(cmd)?;
        debug!(target: "permstore::facade", op = op.name(), mode = "sync", "Executing");
        Ok(op.apply(self.datastore.as_ref()))
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("datastore", &self.datastore.name())
            .finish()
    }
}
