use std::sync::Arc;

use permstore_core::Track;

use crate::validation::validate_name;
use crate::Result;

/// Handle to a loaded track
#[derive(Debug, Clone)]
pub struct TrackLink {
    master: Arc<Track>,
}

impl TrackLink {
    pub(crate) fn new(master: Arc<Track>) -> Self {
        Self { master }
    }

    /// The authoritative instance behind this link
    pub(crate) fn master(&self) -> &Arc<Track> {
        &self.master
    }

    /// Track name (lowercase)
    pub fn name(&self) -> &str {
        self.master.name().as_str()
    }

    /// Group names in track order
    pub fn groups(&self) -> Vec<String> {
        self.master
            .groups()
            .into_iter()
            .map(|name| name.into_inner())
            .collect()
    }

    /// Number of groups on the track
    pub fn size(&self) -> usize {
        self.master.size()
    }

    /// Whether the group is on the track
    pub fn contains_group(&self, group: &str) -> Result<bool> {
        Ok(self.master.contains_group(&validate_name(group)?))
    }

    /// Append a group. `Ok(false)` if it is already on the track.
    pub fn append_group(&self, group: &str) -> Result<bool> {
        Ok(self.master.append_group(&validate_name(group)?))
    }

    /// Insert a group at `position`.
    ///
    /// `Ok(false)` if it is already on the track or `position` is past the end.
    pub fn insert_group(&self, group: &str, position: usize) -> Result<bool> {
        Ok(self.master.insert_group(&validate_name(group)?, position))
    }

    /// Remove a group. `Ok(false)` if it was not on the track.
    pub fn remove_group(&self, group: &str) -> Result<bool> {
        Ok(self.master.remove_group(&validate_name(group)?))
    }

    /// Remove every group
    pub fn clear_groups(&self) {
        self.master.clear_groups();
    }
}

impl PartialEq for TrackLink {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.master, &other.master)
    }
}

impl Eq for TrackLink {}
