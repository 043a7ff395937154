use std::collections::HashMap;

use parking_lot::Mutex;

use crate::controllers::Action;

/// The single shared output region of the dashboard page. All actions paint
/// here; writes are guarded by per-action tickets so a superseded in-flight
/// action cannot overwrite the result of the one dispatched after it.
pub struct OutputRegion {
    inner: Mutex<RegionState>,
}

#[derive(Default)]
struct RegionState {
    tickets: HashMap<Action, u64>,
    fragment: String,
    status_line: String,
}

/// Handed out at dispatch time; stale once the same action is dispatched
/// again.
#[derive(Debug, Clone, Copy)]
pub struct Ticket {
    action: Action,
    seq: u64,
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub fragment: String,
    pub status_line: String,
}

impl OutputRegion {
    pub fn new() -> Self {
        OutputRegion {
            inner: Mutex::new(RegionState::default()),
        }
    }

    /// Registers a new invocation of `action`, superseding any in-flight one.
    pub fn begin(&self, action: Action) -> Ticket {
        let mut state = self.inner.lock();
        let seq = state.tickets.entry(action).or_insert(0);
        *seq += 1;
        Ticket { action, seq: *seq }
    }

    /// Paints the region if the ticket is still the latest for its action.
    /// Returns false when the write was dropped as stale. A ticket may
    /// publish more than once (progress message, then the result).
    pub fn publish(&self, ticket: &Ticket, fragment: String) -> bool {
        self.publish_with(ticket, || fragment)
    }

    /// Like `publish`, but the fragment is produced inside the currency
    /// check. Session transitions ride along in the closure so a stale
    /// response can neither paint nor mutate state.
    pub fn publish_with<F: FnOnce() -> String>(&self, ticket: &Ticket, render: F) -> bool {
        let mut state = self.inner.lock();
        let current = state.tickets.get(&ticket.action).copied().unwrap_or(0);
        if ticket.seq != current {
            tracing::warn!(
                "Dropping stale {} output (ticket {} superseded by {})",
                ticket.action.name(),
                ticket.seq,
                current
            );
            return false;
        }
        state.fragment = render();
        true
    }

    /// The persistent status line above the output region (dataset label).
    pub fn set_status(&self, text: String) {
        self.inner.lock().status_line = text;
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.inner.lock();
        Snapshot {
            fragment: state.fragment.clone(),
            status_line: state.status_line.clone(),
        }
    }
}

impl Default for OutputRegion {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_dispatch_wins_regardless_of_arrival_order() {
        let region = OutputRegion::new();
        let first = region.begin(Action::Preview);
        let second = region.begin(Action::Preview);

        // Second response lands first, then the first straggles in
        assert!(region.publish(&second, "n=2".to_string()));
        assert!(!region.publish(&first, "n=1".to_string()));
        assert_eq!(region.snapshot().fragment, "n=2");
    }

    #[test]
    fn stale_ticket_rejected_even_before_newer_publish() {
        let region = OutputRegion::new();
        let first = region.begin(Action::Preview);
        let second = region.begin(Action::Preview);

        assert!(!region.publish(&first, "n=1".to_string()));
        assert!(region.publish(&second, "n=2".to_string()));
        assert_eq!(region.snapshot().fragment, "n=2");
    }

    #[test]
    fn tickets_are_tracked_per_action() {
        let region = OutputRegion::new();
        let preview = region.begin(Action::Preview);
        let _summary = region.begin(Action::Summary);

        // A later Summary dispatch does not invalidate the Preview ticket
        assert!(region.publish(&preview, "table".to_string()));
    }

    #[test]
    fn ticket_can_publish_progress_then_result() {
        let region = OutputRegion::new();
        let ticket = region.begin(Action::Upload);
        assert!(region.publish(&ticket, "Uploading file...".to_string()));
        assert!(region.publish(&ticket, "File loaded".to_string()));
        assert_eq!(region.snapshot().fragment, "File loaded");
    }
}
