use std::collections::VecDeque;

use crate::view_model::CoordinatorView;

pub type TabId = i64;
pub type WindowId = i64;

/// The single browser tab reused for dictionary pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagedTab {
    pub tab_id: TabId,
    pub window_id: Option<WindowId>,
}

/// How processing of one lookup request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The managed tab was still on the dictionary site and was navigated.
    Reused,
    /// A new tab was created and becomes the managed tab.
    Created(ManagedTab),
    /// A tab was requested but the browser returned no usable id.
    CreatedWithoutId,
    /// Some tab call failed unexpectedly.
    Failed,
}

/// Queue, in-flight flag and managed tab handle of the lookup tab coordinator.
///
/// At most one request is in flight; the queue is strictly FIFO.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoordinatorState {
    queue: VecDeque<String>,
    in_flight: bool,
    managed: Option<ManagedTab>,
    /// Tabs reported closed while the current request was in flight.
    removed_in_flight: Vec<TabId>,
    completed: u64,
}

impl CoordinatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> CoordinatorView {
        CoordinatorView {
            queued: self.queue.len(),
            in_flight: self.in_flight,
            managed: self.managed,
            completed: self.completed,
        }
    }

    pub fn managed(&self) -> Option<ManagedTab> {
        self.managed
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub(crate) fn enqueue(&mut self, url: String) {
        self.queue.push_back(url);
    }

    /// Pops the front request and marks it in flight, unless one is already running.
    pub(crate) fn start_next(&mut self) -> Option<(String, Option<ManagedTab>)> {
        if self.in_flight {
            return None;
        }
        let url = self.queue.pop_front()?;
        self.in_flight = true;
        self.removed_in_flight.clear();
        Some((url, self.managed))
    }

    pub(crate) fn finish(&mut self, outcome: LookupOutcome) {
        self.in_flight = false;
        self.completed += 1;
        match outcome {
            LookupOutcome::Reused => {}
            LookupOutcome::Created(tab) if self.removed_in_flight.contains(&tab.tab_id) => {
                self.managed = None;
            }
            LookupOutcome::Created(tab) => self.managed = Some(tab),
            LookupOutcome::CreatedWithoutId | LookupOutcome::Failed => self.managed = None,
        }
        self.removed_in_flight.clear();
    }

    /// Clears the handle if it names `tab_id`. While a request is in flight the
    /// id is also remembered, so a tab closed before its creation is reported
    /// never becomes the handle.
    pub(crate) fn forget_tab(&mut self, tab_id: TabId) -> bool {
        if self.in_flight {
            self.removed_in_flight.push(tab_id);
        }
        if self.managed.is_some_and(|tab| tab.tab_id == tab_id) {
            self.managed = None;
            true
        } else {
            false
        }
    }
}
