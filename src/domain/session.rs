use super::{CandidateId, Classification, Displacement, Outcome};
use serde::{Deserialize, Serialize};

/// Maximum tilt of a card dragged a full card width, in degrees.
const MAX_ROTATION_DEGREES: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// At rest, no displacement.
    Idle,
    /// Following the pointer, nothing committed yet.
    Dragging,
    /// Resolved into a decision that removes the card.
    Settled(Outcome),
}

/// Stamp a renderer shows over a card while it is displaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwipeIndicator {
    Like,
    Nope,
    None,
}

/// Transient interaction state of the topmost card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeSession {
    candidate: CandidateId,
    displacement: Displacement,
    phase: SessionPhase,
}

impl SwipeSession {
    pub fn new(candidate: CandidateId) -> Self {
        Self {
            candidate,
            displacement: Displacement::ZERO,
            phase: SessionPhase::Idle,
        }
    }

    /// A session that skipped dragging and went straight to a decision.
    pub(crate) fn forced(candidate: CandidateId, outcome: Outcome, committed_x: f64) -> Self {
        Self {
            candidate,
            displacement: Displacement::horizontal(committed_x),
            phase: SessionPhase::Settled(outcome),
        }
    }

    pub fn candidate(&self) -> &CandidateId {
        &self.candidate
    }

    pub fn displacement(&self) -> Displacement {
        self.displacement
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            SessionPhase::Settled(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.phase, SessionPhase::Settled(_))
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == SessionPhase::Dragging
    }

    /// Follows pointer motion. Returns `false` once settled, when motion no
    /// longer applies.
    pub(crate) fn drag_to(&mut self, displacement: Displacement) -> bool {
        if self.is_settled() {
            return false;
        }
        self.displacement = displacement;
        self.phase = if displacement.is_zero() {
            SessionPhase::Idle
        } else {
            SessionPhase::Dragging
        };
        true
    }

    /// Applies a release classification. A cancelled release returns the
    /// session to rest; a committed one parks it at the exit offset.
    pub(crate) fn settle(&mut self, classification: Classification) {
        match classification.outcome {
            Outcome::Cancelled => {
                self.displacement = Displacement::ZERO;
                self.phase = SessionPhase::Idle;
            }
            outcome => {
                self.displacement.x = classification.committed_x;
                self.phase = SessionPhase::Settled(outcome);
            }
        }
    }

    pub fn indicator(&self) -> SwipeIndicator {
        if self.displacement.x > 0.0 {
            SwipeIndicator::Like
        } else if self.displacement.x < 0.0 {
            SwipeIndicator::Nope
        } else {
            SwipeIndicator::None
        }
    }

    /// Tilt proportional to horizontal travel across a card of `card_width`.
    pub fn rotation_degrees(&self, card_width: f64) -> f64 {
        if card_width <= 0.0 {
            return 0.0;
        }
        self.displacement.x / card_width * MAX_ROTATION_DEGREES
    }
}
