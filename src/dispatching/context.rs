//! Dispatch context passed to selection policies.

use crate::models::JobId;

/// Runtime scheduling state visible to a policy.
///
/// Slots are numbered from 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchContext {
    /// Slot being decided.
    pub current_time: u32,
    /// Job that ran in the previous slot, if it is still active.
    pub running: Option<JobId>,
}

impl DispatchContext {
    /// Creates a context at the given slot with nothing running.
    pub fn at_time(current_time: u32) -> Self {
        Self {
            current_time,
            running: None,
        }
    }

    /// Sets the running job.
    pub fn with_running(mut self, running: Option<JobId>) -> Self {
        self.running = running;
        self
    }
}
