//! Test discovery
//!
//! Decides which candidate classes and methods are tests. Structural rules
//! (visibility, exclusion, reserved lifecycle names, special names) apply
//! first, then tag filtering. Filtering never fails and never reorders.

use super::TagMatcher;
use crate::model::{CandidateClass, CandidateMethod, PlanEntry, TestPlan};
use tcv_domain::TagSet;
use tcv_domain::constants::is_lifecycle_method_name;
use tracing::{debug, trace};

/// Selects tests from candidates for one set of requested tags
#[derive(Debug, Clone, Default)]
pub struct DiscoveryFilter {
    requested: TagSet,
    retain_empty_classes: bool,
}

impl DiscoveryFilter {
    /// Create a filter; an empty tag set selects everything
    pub fn new(requested: TagSet) -> Self {
        Self {
            requested,
            retain_empty_classes: false,
        }
    }

    /// Keep planned classes whose methods were all filtered out
    pub fn with_retain_empty_classes(mut self, retain: bool) -> Self {
        self.retain_empty_classes = retain;
        self
    }

    pub fn requested_tags(&self) -> &TagSet {
        &self.requested
    }

    /// Classes that are public, not excluded and match the requested tags
    pub fn select_classes(&self, candidates: &[CandidateClass]) -> Vec<CandidateClass> {
        candidates
            .iter()
            .filter(|class| {
                is_test_class(class) && TagMatcher::matches(class.tags(), &self.requested)
            })
            .cloned()
            .collect()
    }

    /// Methods that are tests and match the requested tags
    pub fn select_methods(&self, methods: &[CandidateMethod]) -> Vec<CandidateMethod> {
        methods
            .iter()
            .filter(|method| {
                is_test_method(method) && TagMatcher::matches(method.tags(), &self.requested)
            })
            .cloned()
            .collect()
    }

    /// Build the plan for `candidates`
    ///
    /// Every structurally valid class becomes resolvable, regardless of tags.
    pub fn discover(&self, candidates: &[CandidateClass]) -> TestPlan {
        let resolvable: Vec<CandidateClass> = candidates
            .iter()
            .filter(|class| is_test_class(class))
            .cloned()
            .collect();

        let mut entries = Vec::new();
        for class in self.select_classes(candidates) {
            let methods = self.select_methods(class.methods());
            if methods.is_empty() && !self.retain_empty_classes {
                trace!(class = class.name(), "Dropping class with no selected methods");
                continue;
            }
            entries.push(PlanEntry::new(class, methods));
        }

        let plan = TestPlan::new(entries, resolvable);
        debug!(
            candidates = candidates.len(),
            classes = plan.class_count(),
            methods = plan.method_count(),
            tags = %self.requested,
            "Discovery complete"
        );
        plan
    }
}

fn is_test_class(class: &CandidateClass) -> bool {
    class.is_public() && !class.is_excluded()
}

fn is_test_method(method: &CandidateMethod) -> bool {
    !method.is_special_name() && !is_lifecycle_method_name(method.name()) && !method.is_excluded()
}
