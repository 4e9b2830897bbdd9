//! Execution outcomes
//!
//! Every executed or skipped test case yields exactly one [`CaseReport`].
//! A run is summarized by the ordered list of reports.

use super::ParameterSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Result of a single test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Setup, body and cleanup all completed
    Passed,
    /// Resolution, a hook or the body failed; carries the cause verbatim
    Failed(String),
    /// The method carried a skip marker; carries its reason, if any
    Skipped(Option<String>),
}

impl Outcome {
    /// Whether the case passed
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Whether the case failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Whether the case was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed(cause) => write!(f, "failed: {cause}"),
            Self::Skipped(Some(reason)) => write!(f, "skipped: {reason}"),
            Self::Skipped(None) => write!(f, "skipped"),
        }
    }
}

/// Outcome of one test case together with what identifies it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    /// Name of the test class
    pub class_name: String,
    /// Name of the test method
    pub method_name: String,
    /// Argument row for parameterized cases
    pub parameters: Option<ParameterSet>,
    /// What happened
    pub outcome: Outcome,
    /// Wall time spent on hooks and body
    pub duration: Duration,
}

impl CaseReport {
    /// Display name of the case, including its argument row
    pub fn case_name(&self) -> String {
        match &self.parameters {
            Some(row) => format!("{}.{}{}", self.class_name, self.method_name, row),
            None => format!("{}.{}", self.class_name, self.method_name),
        }
    }
}

/// Ordered reports of a whole run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Reports in execution order
    pub reports: Vec<CaseReport>,
}

impl RunSummary {
    /// Number of reported cases
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// Number of passed cases
    pub fn passed(&self) -> usize {
        self.count(Outcome::is_passed)
    }

    /// Number of failed cases
    pub fn failed(&self) -> usize {
        self.count(Outcome::is_failed)
    }

    /// Number of skipped cases
    pub fn skipped(&self) -> usize {
        self.count(Outcome::is_skipped)
    }

    /// True when no case failed
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Outcomes in execution order
    pub fn outcomes(&self) -> Vec<&Outcome> {
        self.reports.iter().map(|report| &report.outcome).collect()
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.reports
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} skipped ({} total)",
            self.passed(),
            self.failed(),
            self.skipped(),
            self.total()
        )
    }
}
