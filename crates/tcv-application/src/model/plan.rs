//! Test plan produced by discovery

use super::{CandidateClass, CandidateMethod};

/// One planned class with its selected methods, in discovery order
#[derive(Debug, Clone)]
pub struct PlanEntry {
    pub class: CandidateClass,
    pub methods: Vec<CandidateMethod>,
}

impl PlanEntry {
    pub fn new(class: CandidateClass, methods: Vec<CandidateMethod>) -> Self {
        Self { class, methods }
    }

    /// Number of test cases, counting each parameter row separately
    pub fn case_count(&self) -> usize {
        self.methods.iter().map(CandidateMethod::case_count).sum()
    }
}

/// The ordered classes and methods that will execute
///
/// Also carries every structurally valid class, which is registered as a
/// resolvable unit in each class container whether or not it was planned.
#[derive(Debug, Clone, Default)]
pub struct TestPlan {
    entries: Vec<PlanEntry>,
    resolvable: Vec<CandidateClass>,
}

impl TestPlan {
    pub fn new(entries: Vec<PlanEntry>, resolvable: Vec<CandidateClass>) -> Self {
        Self {
            entries,
            resolvable,
        }
    }

    /// Planned classes in execution order
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Classes registered with scoped lifetime in every class container
    pub fn resolvable(&self) -> &[CandidateClass] {
        &self.resolvable
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn class_count(&self) -> usize {
        self.entries.len()
    }

    pub fn method_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.methods.len()).sum()
    }

    pub fn case_count(&self) -> usize {
        self.entries.iter().map(PlanEntry::case_count).sum()
    }

    /// `Class.Method` names in execution order
    pub fn method_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|entry| {
                entry
                    .methods
                    .iter()
                    .map(move |method| format!("{}.{}", entry.class.name(), method.name()))
            })
            .collect()
    }
}
