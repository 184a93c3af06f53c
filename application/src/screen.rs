//! Stale-fetch guarding of screen data.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Navigation generation counter.
///
/// Bumped on every navigation; a fetch started before the bump resolves
/// with an outdated [`Ticket`] and its result is dropped instead of being
/// applied to the new screen. There is no true cancellation: the fetch
/// may still complete, it just cannot be observed anymore.
#[derive(Clone, Debug, Default)]
pub struct Epoch(Arc<AtomicU64>);

impl Epoch {
    /// Advances to the next generation, expiring all issued [`Ticket`]s.
    pub fn bump(&self) {
        _ = self.0.fetch_add(1, Ordering::AcqRel);
    }

    /// Issues a [`Ticket`] of the current generation.
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        Ticket(self.0.load(Ordering::Acquire))
    }

    /// Checks whether the given `ticket` is still current.
    #[must_use]
    pub fn admits(&self, ticket: Ticket) -> bool {
        self.0.load(Ordering::Acquire) == ticket.0
    }
}

/// Generation captured when a fetch starts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ticket(u64);

#[cfg(test)]
mod spec {
    use super::Epoch;

    #[test]
    fn stale_tickets_are_not_admitted() {
        let epoch = Epoch::default();
        let ticket = epoch.ticket();
        assert!(epoch.admits(ticket));

        epoch.bump();
        assert!(!epoch.admits(ticket));
        assert!(epoch.admits(epoch.ticket()));
    }

    #[test]
    fn clones_share_the_generation() {
        let epoch = Epoch::default();
        let ticket = epoch.ticket();

        epoch.clone().bump();
        assert!(!epoch.admits(ticket));
    }
}
