//! Swipe engine.
//!
//! The engine is an event-driven state machine with no internal threads.
//! Inputs arrive as discrete calls (pointer motion, release, directives) and
//! timer expiry is delivered by calling [`SwipeEngine::tick`], either from a
//! polling UI loop or from the async [`SwipeService`](crate::service::SwipeService).
//!
//! ## Card lifecycle
//!
//! ```text
//! Idle -> Dragging -> release -> Cancelled -> Idle
//!                             -> Accepted | Rejected -> (grace period) -> removed
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use super::dispatcher::Directive;
use super::{
    Candidate, CandidateId, CandidateRegistry, Classifier, DecisionRecord, DecisionStatistics,
    Displacement, Outcome, RemovalCoordinator, SwipeSession,
};
use crate::config::SwipeConfig;

/// Raw input delivered by a presentation collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeInput {
    DragChanged(Displacement),
    DragEnded,
    Directive(Directive),
}

/// Observable change produced by an input or a timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SwipeEvent {
    DragStarted {
        id: CandidateId,
    },
    Settled {
        id: CandidateId,
        outcome: Outcome,
        /// Horizontal offset the card settled at.
        displacement: f64,
        at: DateTime<Utc>,
    },
    Removed {
        id: CandidateId,
        at: DateTime<Utc>,
    },
    Reloaded {
        count: usize,
        at: DateTime<Utc>,
    },
}

/// Read-only copy of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub candidates: Vec<Candidate>,
    pub top: Option<CandidateId>,
    pub session: Option<SwipeSession>,
    pub is_empty: bool,
    pub pending_removals: usize,
    pub statistics: DecisionStatistics,
}

#[derive(Debug)]
pub struct SwipeEngine {
    /// Full candidate list that `Reload` restores.
    pub(super) source: Vec<Candidate>,
    pub(super) registry: CandidateRegistry,
    pub(super) classifier: Classifier,
    /// The only live session; always bound to the registry's top.
    pub(super) session: Option<SwipeSession>,
    pub(super) removals: RemovalCoordinator,
    pub(super) decisions: Vec<DecisionRecord>,
    /// Stack size at the last reset.
    pub(super) round_size: usize,
}

impl SwipeEngine {
    pub fn new(source: Vec<Candidate>) -> Self {
        Self::with_config(source, &SwipeConfig::default())
    }

    pub fn with_config(source: Vec<Candidate>, config: &SwipeConfig) -> Self {
        let registry = CandidateRegistry::new(source.clone());
        let round_size = registry.len();
        Self {
            source,
            registry,
            classifier: Classifier::from_config(config),
            session: None,
            removals: RemovalCoordinator::new(config.removal_delay()),
            decisions: Vec::new(),
            round_size,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn candidates(&self) -> &[Candidate] {
        self.registry.candidates()
    }

    pub fn top(&self) -> Option<&Candidate> {
        self.registry.top()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn session(&self) -> Option<&SwipeSession> {
        self.session.as_ref()
    }

    /// Live displacement of the top card; zero when nothing is in motion.
    pub fn displacement(&self) -> Displacement {
        self.session
            .as_ref()
            .map(|s| s.displacement())
            .unwrap_or(Displacement::ZERO)
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn pending_removals(&self) -> usize {
        self.removals.len()
    }

    /// When the next grace period ends, if any removal is waiting.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.removals.next_deadline()
    }

    pub fn decisions(&self) -> &[DecisionRecord] {
        &self.decisions
    }

    /// Names of accepted candidates since the last reload, in decision order.
    pub fn matches(&self) -> Vec<&str> {
        self.decisions
            .iter()
            .filter(|d| d.outcome == Outcome::Accepted)
            .map(|d| d.name.as_str())
            .collect()
    }

    pub fn statistics(&self) -> DecisionStatistics {
        let mut accepted = 0;
        let mut rejected = 0;

        for decision in &self.decisions {
            match decision.outcome {
                Outcome::Accepted => accepted += 1,
                Outcome::Rejected => rejected += 1,
                Outcome::Cancelled => {}
            }
        }

        DecisionStatistics {
            total_candidates: self.round_size,
            accepted,
            rejected,
        }
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            candidates: self.registry.candidates().to_vec(),
            top: self.registry.top().map(|c| c.id.clone()),
            session: self.session.clone(),
            is_empty: self.registry.is_empty(),
            pending_removals: self.removals.len(),
            statistics: self.statistics(),
        }
    }

    // ── Inputs ───────────────────────────────────────────────────────

    pub fn handle(&mut self, input: SwipeInput) -> Option<SwipeEvent> {
        self.handle_at(input, Instant::now())
    }

    pub fn handle_at(&mut self, input: SwipeInput, now: Instant) -> Option<SwipeEvent> {
        match input {
            SwipeInput::DragChanged(displacement) => self.on_drag_changed(displacement),
            SwipeInput::DragEnded => self.on_drag_ended_at(now),
            SwipeInput::Directive(directive) => self.dispatch_at(directive, now),
        }
    }

    /// Pointer motion on the top card.
    pub fn on_drag_changed(&mut self, displacement: Displacement) -> Option<SwipeEvent> {
        let id = self.registry.top()?.id.clone();
        self.drag(id, displacement)
    }

    /// Pointer motion addressed to a specific card. Anything but the top
    /// card is ignored.
    pub fn on_drag_changed_for(
        &mut self,
        id: &CandidateId,
        displacement: Displacement,
    ) -> Option<SwipeEvent> {
        if !self.registry.is_top(id) {
            tracing::debug!(%id, "ignoring drag on a card that is not on top");
            return None;
        }
        self.drag(id.clone(), displacement)
    }

    pub fn on_drag_ended(&mut self) -> Option<SwipeEvent> {
        self.on_drag_ended_at(Instant::now())
    }

    /// Pointer release: classifies the drag and settles the session.
    pub fn on_drag_ended_at(&mut self, now: Instant) -> Option<SwipeEvent> {
        let session = self.session.as_mut()?;
        if !session.is_dragging() {
            return None;
        }

        let classification = self.classifier.classify(session.displacement());
        session.settle(classification);
        let id = session.candidate().clone();

        if classification.outcome.is_committed() {
            self.commit(&id, classification.outcome, now);
        } else {
            tracing::debug!(%id, "release inside threshold, card springs back");
        }

        Some(SwipeEvent::Settled {
            id,
            outcome: classification.outcome,
            displacement: classification.committed_x,
            at: Utc::now(),
        })
    }

    pub fn tick(&mut self) -> Vec<SwipeEvent> {
        self.tick_at(Instant::now())
    }

    /// Executes every removal whose grace period has ended by `now`.
    pub fn tick_at(&mut self, now: Instant) -> Vec<SwipeEvent> {
        let mut events = Vec::new();

        for removal in self.removals.take_due(now) {
            if removal.generation != self.registry.generation() {
                tracing::debug!(id = %removal.id, "removal timer outlived a reload, ignoring");
                continue;
            }

            if self.registry.remove(&removal.id).is_none() {
                tracing::debug!(id = %removal.id, "candidate already removed");
                continue;
            }

            if self
                .session
                .as_ref()
                .is_some_and(|s| s.candidate() == &removal.id)
            {
                self.session = None;
            }

            tracing::info!(id = %removal.id, remaining = self.registry.len(), "candidate removed");
            events.push(SwipeEvent::Removed {
                id: removal.id,
                at: Utc::now(),
            });
        }

        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn drag(&mut self, id: CandidateId, displacement: Displacement) -> Option<SwipeEvent> {
        if self.session.as_ref().map_or(true, |s| s.candidate() != &id) {
            self.session = Some(SwipeSession::new(id.clone()));
        }

        let session = self.session.as_mut()?;
        let was_dragging = session.is_dragging();
        if !session.drag_to(displacement) {
            tracing::debug!(%id, "ignoring drag on a settled card");
            return None;
        }

        if !was_dragging && session.is_dragging() {
            Some(SwipeEvent::DragStarted { id })
        } else {
            None
        }
    }

    /// Records a committed decision and starts its grace period.
    pub(super) fn commit(&mut self, id: &CandidateId, outcome: Outcome, now: Instant) {
        let generation = self.registry.generation();
        if !self.removals.schedule(id.clone(), generation, now) {
            tracing::debug!(%id, "removal already scheduled");
            return;
        }

        if let Some(candidate) = self.registry.get(id) {
            self.decisions.push(DecisionRecord {
                id: id.clone(),
                name: candidate.name.clone(),
                outcome,
                at: Utc::now(),
            });
        }

        tracing::info!(%id, ?outcome, "card settled, removal scheduled");
    }

    pub(super) fn reset_registry(&mut self, candidates: Vec<Candidate>) -> Option<SwipeEvent> {
        self.registry.reset(candidates);
        self.session = None;
        self.decisions.clear();
        self.round_size = self.registry.len();

        tracing::info!(
            count = self.round_size,
            generation = self.registry.generation(),
            "candidates reloaded"
        );
        Some(SwipeEvent::Reloaded {
            count: self.round_size,
            at: Utc::now(),
        })
    }
}
