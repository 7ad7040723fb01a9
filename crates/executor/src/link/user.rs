use std::sync::Arc;

use permstore_core::{PermissionNodes, User, UserId};

use crate::validation::validate_name;
use crate::Result;

/// Handle to a loaded user
#[derive(Debug, Clone)]
pub struct UserLink {
    master: Arc<User>,
}

impl UserLink {
    pub(crate) fn new(master: Arc<User>) -> Self {
        Self { master }
    }

    /// The authoritative instance behind this link
    pub(crate) fn master(&self) -> &Arc<User> {
        &self.master
    }

    /// Unique id
    pub fn uuid(&self) -> UserId {
        self.master.uuid()
    }

    /// Last known username, if any
    pub fn username(&self) -> Option<String> {
        self.master.name()
    }

    /// Name of the user's primary group
    pub fn primary_group(&self) -> String {
        self.master.primary_group()
    }

    /// Change the primary group. The group does not have to be loaded.
    pub fn set_primary_group(&self, group: &str) -> Result<()> {
        let group = validate_name(group)?;
        self.master.set_primary_group(&group);
        Ok(())
    }

    /// Every permission node set directly on the user
    pub fn permissions(&self) -> PermissionNodes {
        self.master.permissions()
    }

    /// Value of a node set directly on the user, not inherited
    pub fn has_permission(&self, node: &str) -> Option<bool> {
        self.master.permission(node)
    }

    /// Set a node. Returns `false` if it already had this value.
    pub fn set_permission(&self, node: &str, value: bool) -> bool {
        self.master.set_permission(node, value)
    }

    /// Unset a node. Returns `false` if it was not set.
    pub fn unset_permission(&self, node: &str) -> bool {
        self.master.unset_permission(node)
    }
}

impl PartialEq for UserLink {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.master, &other.master)
    }
}

impl Eq for UserLink {}
