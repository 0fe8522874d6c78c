//! Veer - a swipe interaction engine for reviewing a stack of candidates
//!
//! This crate provides the core swipe state machine, an async host for it,
//! and the terminal front-end used by the `veer` binary.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod tui;

// Re-export primary types for convenience
pub use config::{SwipeConfig, UserConfig};
pub use domain::{
    load_candidates, sample_candidates, Candidate, CandidateId, Classifier, DecisionRecord,
    DecisionStatistics, Directive, Displacement, EngineSnapshot, Outcome, SessionPhase,
    SwipeEngine, SwipeEvent, SwipeIndicator, SwipeInput, SwipeSession,
};
pub use error::{Result, VeerError};
pub use service::SwipeService;
