use std::time::Duration;

use crate::mesh::DEFAULT_MASK_GROUP;

/// User-facing options of a normal editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOptions {
    /// Track the live viewport orientation in the view-space normal. When
    /// off, a fixed reference rotation is used instead.
    pub view_sync: bool,
    /// Show and edit one corner of the active vertex instead of the vertex.
    pub split_display: bool,
    /// Which corner of the active vertex split display refers to.
    pub split_index: usize,
    /// Vertex group used as the edit mask.
    pub mask_group: String,
    /// Cadence of the polling monitor.
    pub poll_interval: Duration,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            view_sync: true,
            split_display: false,
            split_index: 0,
            mask_group: DEFAULT_MASK_GROUP.to_owned(),
            poll_interval: Duration::from_millis(500),
        }
    }
}

impl EditOptions {
    /// Sets view-sync mode.
    #[must_use]
    pub fn with_view_sync(mut self, enabled: bool) -> Self {
        self.view_sync = enabled;
        self
    }

    /// Enables split display on the given corner index.
    #[must_use]
    pub fn with_split_index(mut self, index: usize) -> Self {
        self.split_display = true;
        self.split_index = index;
        self
    }

    /// Sets the mask vertex group name.
    #[must_use]
    pub fn with_mask_group(mut self, name: impl Into<String>) -> Self {
        self.mask_group = name.into();
        self
    }

    /// Sets the polling cadence.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// The corner selector for split display, or `None` when unsplit.
    #[must_use]
    pub fn split_selector(&self) -> Option<usize> {
        self.split_display.then_some(self.split_index)
    }
}
