use crate::ManagedTab;

/// Read-only snapshot of the coordinator, published after every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoordinatorView {
    pub queued: usize,
    pub in_flight: bool,
    pub managed: Option<ManagedTab>,
    /// Number of requests consumed so far, successful or not.
    pub completed: u64,
}

impl CoordinatorView {
    pub fn is_idle(&self) -> bool {
        self.queued == 0 && !self.in_flight
    }
}
