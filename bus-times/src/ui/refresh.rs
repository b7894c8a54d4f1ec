//! Queued fragment refreshes.

use std::collections::VecDeque;

use crate::domain::StopId;

use super::ViewRefresh;

/// Collects refresh requests for a driver to fulfil later.
///
/// The driver loads each fragment, swaps it into the page and then reports
/// completion to the application.
#[derive(Debug, Default)]
pub struct RefreshQueue {
    pending: VecDeque<StopId>,
}

impl RefreshQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest outstanding request.
    pub fn pop(&mut self) -> Option<StopId> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl ViewRefresh for RefreshQueue {
    fn request_refresh(&mut self, stop_id: &StopId) {
        // A newer request for the same stop supersedes the queued one
        self.pending.retain(|queued| queued != stop_id);
        self.pending.push_back(stop_id.clone());
    }
}
