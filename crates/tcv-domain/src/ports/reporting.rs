//! Result reporting port
//!
//! The host's result collection channel. Outcomes are pushed as soon as each
//! case finishes instead of being buffered until the end of the run.

use crate::value_objects::{CaseReport, RunSummary};
use async_trait::async_trait;

/// Receives run progress and per-case outcomes
#[async_trait]
pub trait ResultReporter: Send + Sync {
    /// Called once before the first class runs
    async fn run_started(&self, classes: usize, methods: usize) {
        let _ = (classes, methods);
    }

    /// Called before the cases of a class run
    async fn class_started(&self, class_name: &str) {
        let _ = class_name;
    }

    /// Called exactly once per test case
    async fn case_finished(&self, report: &CaseReport);

    /// Called once after the last class ran
    async fn run_finished(&self, summary: &RunSummary) {
        let _ = summary;
    }
}
