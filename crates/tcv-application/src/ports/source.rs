//! Candidate sources

use crate::model::CandidateClass;

/// Supplies the candidate classes discovery considers, in a stable order
pub trait CandidateSource {
    fn candidates(&self) -> Vec<CandidateClass>;
}

impl CandidateSource for Vec<CandidateClass> {
    fn candidates(&self) -> Vec<CandidateClass> {
        self.clone()
    }
}

impl CandidateSource for [CandidateClass] {
    fn candidates(&self) -> Vec<CandidateClass> {
        self.to_vec()
    }
}
