use super::engine::{SwipeEngine, SwipeEvent};
use super::{Candidate, Outcome, SwipeSession};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Programmatic controls that act on the stack without a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directive {
    /// Restore the full original candidate list.
    Reload,
    ForceReject,
    ForceAccept,
}

impl Directive {
    /// Reload is always available; the swipe directives need a card.
    pub fn is_enabled(self, stack_is_empty: bool) -> bool {
        match self {
            Directive::Reload => true,
            Directive::ForceReject | Directive::ForceAccept => !stack_is_empty,
        }
    }
}

impl SwipeEngine {
    pub fn dispatch(&mut self, directive: Directive) -> Option<SwipeEvent> {
        self.dispatch_at(directive, Instant::now())
    }

    pub fn dispatch_at(&mut self, directive: Directive, now: Instant) -> Option<SwipeEvent> {
        match directive {
            Directive::Reload => self.on_reload(),
            Directive::ForceReject => self.force_at(Outcome::Rejected, now),
            Directive::ForceAccept => self.force_at(Outcome::Accepted, now),
        }
    }

    pub fn is_enabled(&self, directive: Directive) -> bool {
        directive.is_enabled(self.is_empty())
    }

    /// Resets the stack to the original source and drops any session.
    ///
    /// Removal timers already running keep going but belong to the previous
    /// generation, so they expire without touching the new stack.
    pub fn on_reload(&mut self) -> Option<SwipeEvent> {
        let source = self.source.clone();
        self.reset_registry(source)
    }

    /// Replaces the source list, then reloads from it.
    pub fn reload_with(&mut self, candidates: Vec<Candidate>) -> Option<SwipeEvent> {
        self.source = candidates.clone();
        self.reset_registry(candidates)
    }

    pub fn on_force_reject(&mut self) -> Option<SwipeEvent> {
        self.force_at(Outcome::Rejected, Instant::now())
    }

    pub fn on_force_accept(&mut self) -> Option<SwipeEvent> {
        self.force_at(Outcome::Accepted, Instant::now())
    }

    fn force_at(&mut self, outcome: Outcome, now: Instant) -> Option<SwipeEvent> {
        let Some(top) = self.registry.top() else {
            tracing::debug!(?outcome, "ignoring forced swipe on an empty stack");
            return None;
        };
        let id = top.id.clone();

        let already_settled = self
            .session
            .as_ref()
            .is_some_and(|s| s.candidate() == &id && s.is_settled());
        if already_settled || self.removals.is_pending(&id, self.registry.generation()) {
            tracing::debug!(%id, "card is already leaving, ignoring forced swipe");
            return None;
        }

        let committed_x = self.classifier.commit(outcome);
        self.session = Some(SwipeSession::forced(id.clone(), outcome, committed_x));
        self.commit(&id, outcome, now);

        Some(SwipeEvent::Settled {
            id,
            outcome,
            displacement: committed_x,
            at: Utc::now(),
        })
    }
}
