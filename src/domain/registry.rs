use super::{Candidate, CandidateId};
use std::collections::HashSet;

/// Ordered stack of candidates in play. The last element is topmost.
///
/// The only mutations are a full `reset` and single-element `remove`, so the
/// relative order of the remaining candidates never changes.
#[derive(Debug, Default)]
pub struct CandidateRegistry {
    candidates: Vec<Candidate>,
    generation: u64,
}

impl CandidateRegistry {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        let mut registry = Self::default();
        registry.reset(candidates);
        registry
    }

    /// Replaces the whole sequence and starts a new generation.
    ///
    /// Identities stay unique: a repeated identity keeps its first
    /// occurrence and later copies are dropped.
    pub fn reset(&mut self, candidates: Vec<Candidate>) {
        let mut seen = HashSet::with_capacity(candidates.len());
        self.candidates = candidates
            .into_iter()
            .filter(|candidate| {
                let fresh = seen.insert(candidate.id.clone());
                if !fresh {
                    tracing::warn!(id = %candidate.id, "dropping duplicate candidate identity");
                }
                fresh
            })
            .collect();
        self.generation += 1;
    }

    /// Removes the candidate with `id`. Absent identities are a no-op.
    pub fn remove(&mut self, id: &CandidateId) -> Option<Candidate> {
        let index = self.candidates.iter().position(|c| &c.id == id)?;
        Some(self.candidates.remove(index))
    }

    pub fn top(&self) -> Option<&Candidate> {
        self.candidates.last()
    }

    pub fn is_top(&self, id: &CandidateId) -> bool {
        self.top().is_some_and(|top| &top.id == id)
    }

    pub fn contains(&self, id: &CandidateId) -> bool {
        self.candidates.iter().any(|c| &c.id == id)
    }

    pub fn get(&self, id: &CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| &c.id == id)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Number of resets so far. Work scheduled against one generation must
    /// not touch a later one.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
