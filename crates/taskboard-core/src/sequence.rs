//! Request sequencing
//!
//! Overlapping requests may resolve in any order. Every request takes a
//! [`Ticket`] when it is issued, and its response may only be applied while that
//! ticket is still the latest one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Sequence number of an issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Hands out monotonically increasing tickets
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new request, superseding all earlier ones
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True while no request has been issued after `ticket`
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    pub fn latest(&self) -> Option<Ticket> {
        match self.latest.load(Ordering::SeqCst) {
            0 => None,
            n => Some(Ticket(n)),
        }
    }
}

/// A shared UI target written only by responses holding the latest ticket
#[derive(Debug)]
pub struct SequencedTarget<T> {
    sequencer: RequestSequencer,
    target: Arc<Mutex<T>>,
}

impl<T> SequencedTarget<T> {
    pub fn new(target: T) -> Self {
        Self {
            sequencer: RequestSequencer::new(),
            target: Arc::new(Mutex::new(target)),
        }
    }

    pub fn issue(&self) -> Ticket {
        self.sequencer.issue()
    }

    /// Shared handle to the target, for hosts that display it
    pub fn handle(&self) -> Arc<Mutex<T>> {
        Arc::clone(&self.target)
    }

    pub fn lock(&self) -> MutexGuard<'_, T> {
        // A panicked writer leaves the target in a displayable state, keep going
        self.target.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `update` if `ticket` is still the latest. Returns false when superseded.
    ///
    /// The ticket check happens under the target lock, so a superseded response
    /// can never overwrite what a newer one already wrote.
    pub fn apply_if_current(&self, ticket: Ticket, update: impl FnOnce(&mut T)) -> bool {
        let mut target = self.lock();
        if !self.sequencer.is_current(ticket) {
            return false;
        }
        update(&mut target);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ticket_supersedes_older() {
        let seq = RequestSequencer::new();
        assert_eq!(seq.latest(), None);

        let first = seq.issue();
        assert!(seq.is_current(first));

        let second = seq.issue();
        assert!(second > first);
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert_eq!(seq.latest(), Some(second));
    }

    #[test]
    fn test_superseded_update_is_dropped() {
        let target = SequencedTarget::new(Vec::<&str>::new());
        let old = target.issue();
        let new = target.issue();

        assert!(target.apply_if_current(new, |v| v.push("new")));
        assert!(!target.apply_if_current(old, |v| v.push("old")));
        assert_eq!(*target.lock(), vec!["new"]);
    }
}
