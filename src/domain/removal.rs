use super::CandidateId;
use std::time::Duration;
use tokio::time::Instant;

/// A removal waiting for its grace period to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRemoval {
    pub id: CandidateId,
    /// Registry generation the decision was made in.
    pub generation: u64,
    pub due: Instant,
}

/// Defers registry removals until the exit grace period is over.
///
/// Timers are one-shot and never cancelled. Each `(id, generation)` pair can
/// be scheduled at most once, which is what keeps a decided card from being
/// removed twice.
#[derive(Debug)]
pub struct RemovalCoordinator {
    delay: Duration,
    pending: Vec<PendingRemoval>,
}

impl RemovalCoordinator {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Vec::new(),
        }
    }

    /// Starts the grace timer for `id`. Returns `false` if one is already
    /// running for the same candidate in the same generation.
    pub fn schedule(&mut self, id: CandidateId, generation: u64, now: Instant) -> bool {
        if self.is_pending(&id, generation) {
            return false;
        }
        self.pending.push(PendingRemoval {
            id,
            generation,
            due: now + self.delay,
        });
        true
    }

    pub fn is_pending(&self, id: &CandidateId, generation: u64) -> bool {
        self.pending
            .iter()
            .any(|p| &p.id == id && p.generation == generation)
    }

    /// Takes every removal whose deadline is at or before `now`, in
    /// deadline order.
    pub fn take_due(&mut self, now: Instant) -> Vec<PendingRemoval> {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = waiting;
        due.sort_by_key(|p| p.due);
        due
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
