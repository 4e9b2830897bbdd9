//! Log-based result reporting
//!
//! Writes run progress and every case outcome through `tracing`.

use async_trait::async_trait;
use tcv_domain::ports::ResultReporter;
use tcv_domain::{CaseReport, Outcome, RunSummary};
use tracing::{error, info, warn};

/// Reporter that logs each outcome as it arrives
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl TracingReporter {
    /// Create a new tracing reporter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResultReporter for TracingReporter {
    async fn run_started(&self, classes: usize, methods: usize) {
        info!(classes, methods, "Starting test run");
    }

    async fn class_started(&self, class_name: &str) {
        info!("==== Executing cases for the class {class_name} ====");
    }

    async fn case_finished(&self, report: &CaseReport) {
        let case = report.case_name();
        let elapsed_ms = u64::try_from(report.duration.as_millis()).unwrap_or(u64::MAX);
        match &report.outcome {
            Outcome::Passed => info!(case = %case, elapsed_ms, "Passed"),
            Outcome::Failed(cause) => error!(case = %case, elapsed_ms, cause = %cause, "Failed"),
            Outcome::Skipped(reason) => warn!(
                case = %case,
                reason = reason.as_deref().unwrap_or("no reason given"),
                "Skipped"
            ),
        }
    }

    async fn run_finished(&self, summary: &RunSummary) {
        if summary.is_success() {
            info!("Test run finished: {summary}");
        } else {
            error!("Test run finished: {summary}");
        }
    }
}
