//! Domain model of the swipe interaction engine.
//!
//! Candidates are stacked front-to-back; the last candidate in the stack is
//! the only one that accepts gestures. A gesture (or a forced directive)
//! settles into an [`Outcome`], and decided candidates leave the stack after
//! a grace period handled by the removal coordinator.

mod classifier;
mod dispatcher;
mod engine;
mod registry;
mod removal;
mod session;
mod source;

pub use classifier::{Classification, Classifier};
pub use dispatcher::Directive;
pub use engine::{EngineSnapshot, SwipeEngine, SwipeEvent, SwipeInput};
pub use registry::CandidateRegistry;
pub use removal::{PendingRemoval, RemovalCoordinator};
pub use session::{SessionPhase, SwipeIndicator, SwipeSession};
pub use source::{load_candidates, sample_candidates};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a candidate while it is in play.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// An entity displayed as a swipeable card.
///
/// Only `id` matters to the engine; the rest is carried for renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CandidateId::new(id),
            name: name.into(),
            tagline: String::new(),
            tags: Vec::new(),
            location: None,
            website: None,
            image: None,
        }
    }

    pub fn with_tagline(mut self, tagline: impl Into<String>) -> Self {
        self.tagline = tagline.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Pointer offset of a card from its resting position. `x` is horizontal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Displacement {
    pub x: f64,
    pub y: f64,
}

impl Displacement {
    pub const ZERO: Displacement = Displacement { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn horizontal(x: f64) -> Self {
        Self { x, y: 0.0 }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// How a gesture or directive resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Accepted,
    Rejected,
    /// Released inside the threshold; the card springs back.
    Cancelled,
}

impl Outcome {
    /// Whether this outcome removes the card from the stack.
    pub fn is_committed(self) -> bool {
        !matches!(self, Outcome::Cancelled)
    }
}

/// A committed decision, recorded at settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub id: CandidateId,
    pub name: String,
    pub outcome: Outcome,
    pub at: DateTime<Utc>,
}

/// Statistics about decisions made since the last reload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionStatistics {
    pub total_candidates: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl DecisionStatistics {
    pub fn decided(&self) -> usize {
        self.accepted + self.rejected
    }

    pub fn remaining(&self) -> usize {
        self.total_candidates.saturating_sub(self.decided())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_builder() {
        let candidate = Candidate::new("c-1", "Carla Ruiz")
            .with_tagline("Series A ed-tech CEO")
            .with_tags(["Education", "Product"])
            .with_location("Austin, TX");

        assert_eq!(candidate.id.as_str(), "c-1");
        assert_eq!(candidate.tags, vec!["Education", "Product"]);
        assert_eq!(candidate.location.as_deref(), Some("Austin, TX"));
        assert!(candidate.website.is_none());
    }

    #[test]
    fn test_candidate_deserializes_with_defaults() {
        let candidate: Candidate = serde_json::from_str(r#"{"id": "a", "name": "Alice"}"#).unwrap();
        assert_eq!(candidate.id, CandidateId::from("a"));
        assert!(candidate.tagline.is_empty());
        assert!(candidate.tags.is_empty());
    }

    #[test]
    fn test_candidate_id_is_transparent_in_json() {
        let json = serde_json::to_string(&CandidateId::new("bob")).unwrap();
        assert_eq!(json, "\"bob\"");
    }

    #[test]
    fn test_outcome_commitment() {
        assert!(Outcome::Accepted.is_committed());
        assert!(Outcome::Rejected.is_committed());
        assert!(!Outcome::Cancelled.is_committed());
    }

    #[test]
    fn test_statistics_remaining() {
        let stats = DecisionStatistics {
            total_candidates: 5,
            accepted: 2,
            rejected: 1,
        };
        assert_eq!(stats.decided(), 3);
        assert_eq!(stats.remaining(), 2);
    }
}
