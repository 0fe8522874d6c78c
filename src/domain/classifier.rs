use super::{Displacement, Outcome};
use crate::config::SwipeConfig;

/// Result of classifying a released drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub outcome: Outcome,
    /// Horizontal offset the card settles at: `±exit` when committed, `0`
    /// when it springs back.
    pub committed_x: f64,
}

/// Maps a final drag displacement to a decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    threshold: f64,
    exit: f64,
}

impl Classifier {
    pub fn new(threshold: f64, exit: f64) -> Self {
        Self { threshold, exit }
    }

    pub fn from_config(config: &SwipeConfig) -> Self {
        Self::new(config.decision_threshold, config.exit_displacement)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn exit_displacement(&self) -> f64 {
        self.exit
    }

    /// Only the horizontal component decides. The comparison is strict, so a
    /// release exactly on the threshold is cancelled.
    pub fn classify(&self, displacement: Displacement) -> Classification {
        let outcome = if displacement.x > self.threshold {
            Outcome::Accepted
        } else if displacement.x < -self.threshold {
            Outcome::Rejected
        } else {
            Outcome::Cancelled
        };

        Classification {
            outcome,
            committed_x: self.commit(outcome),
        }
    }

    /// Offset a card is sent to for `outcome`.
    pub fn commit(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Accepted => self.exit,
            Outcome::Rejected => -self.exit,
            Outcome::Cancelled => 0.0,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::from_config(&SwipeConfig::default())
    }
}
