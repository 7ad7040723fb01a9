use std::sync::Arc;

use permstore_core::{Group, PermissionNodes};

/// Handle to a loaded group
#[derive(Debug, Clone)]
pub struct GroupLink {
    master: Arc<Group>,
}

impl GroupLink {
    pub(crate) fn new(master: Arc<Group>) -> Self {
        Self { master }
    }

    /// The authoritative instance behind this link
    pub(crate) fn master(&self) -> &Arc<Group> {
        &self.master
    }

    /// Group name (lowercase)
    pub fn name(&self) -> &str {
        self.master.name().as_str()
    }

    /// Every permission node set on the group
    pub fn permissions(&self) -> PermissionNodes {
        self.master.permissions()
    }

    /// Value of a node set directly on the group
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

impl PartialEq for GroupLink {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.master, &other.master)
    }
}

impl Eq for GroupLink {}
