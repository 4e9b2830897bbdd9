//! Test execution
//!
//! Drives a [`TestPlan`]: one container per class, one child scope per test
//! method, and Setup → body → Cleanup for every parameter row inside that
//! scope. Each method scope also carries a [`TestContext`] naming the class
//! and method. A failure is confined to the case it happened in unless the
//! error is fatal ([`Error::is_fatal`]), which aborts the run.
//!
//! ## Failure paths
//!
//! | Failing step | Outcome | Cleanup |
//! |--------------|---------|---------|
//! | fixture resolution | `Failed` for every row | not run |
//! | Setup | `Failed` | only with `execution.cleanup_after_failed_setup` |
//! | body | `Failed` with the body's cause | run |
//! | Cleanup only | `Failed` with the cleanup cause | - |
//!
//! The case scope and the class container are disposed on every path.

use crate::model::{
    CandidateClass, CandidateMethod, FixtureInstance, PlanEntry, TestContext, TestPlan,
};
use crate::ports::TestResult;
use crate::use_cases::ScopeBuilder;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tcv_domain::error::{Error, Result};
use tcv_domain::ports::ResultReporter;
use tcv_domain::{CaseReport, Outcome, ParameterSet, RunSummary};
use tcv_infrastructure::di::{ServiceCollection, ServiceProvider, ServiceScope};
use tracing::{debug, warn};

/// Runs test plans and reports every case as it finishes
pub struct ExecutionOrchestrator {
    scope_builder: ScopeBuilder,
    reporter: Arc<dyn ResultReporter>,
    cleanup_after_failed_setup: bool,
}

impl ExecutionOrchestrator {
    pub fn new(scope_builder: ScopeBuilder, reporter: Arc<dyn ResultReporter>) -> Self {
        Self {
            scope_builder,
            reporter,
            cleanup_after_failed_setup: false,
        }
    }

    /// Run Cleanup even when Setup failed for the same case
    pub fn with_cleanup_after_failed_setup(mut self, enabled: bool) -> Self {
        self.cleanup_after_failed_setup = enabled;
        self
    }

    /// Execute `plan`, classes and cases strictly in plan order
    ///
    /// Case failures are reported, not returned. The run itself only fails
    /// for a fatal error, such as a method declared on another fixture than
    /// the class it is planned under.
    pub async fn run(&self, plan: &TestPlan) -> Result<RunSummary> {
        validate(plan)?;
        self.reporter
            .run_started(plan.class_count(), plan.method_count())
            .await;

        let mut summary = RunSummary::default();
        for entry in plan.entries() {
            self.run_class(entry, plan.resolvable(), &mut summary)
                .await?;
        }

        self.reporter.run_finished(&summary).await;
        Ok(summary)
    }

    async fn run_class(
        &self,
        entry: &PlanEntry,
        resolvable: &[CandidateClass],
        summary: &mut RunSummary,
    ) -> Result<()> {
        let provider = self.scope_builder.build_class_scope(&entry.class, resolvable);
        self.reporter.class_started(entry.class.name()).await;

        let mut result = Ok(());
        for method in &entry.methods {
            result = self
                .run_method(&entry.class, method, &provider, summary)
                .await;
            if result.is_err() {
                break;
            }
        }

        provider.dispose().await;
        result
    }

    async fn run_method(
        &self,
        class: &CandidateClass,
        method: &CandidateMethod,
        provider: &ServiceProvider,
        summary: &mut RunSummary,
    ) -> Result<()> {
        if let Some(skip) = method.skip_marker() {
            let outcome = Outcome::Skipped(skip.reason.clone());
            let report = case_report(class, method, None, outcome, Duration::ZERO);
            self.report(report, summary).await;
            return Ok(());
        }

        let rows: Vec<Option<ParameterSet>> = if method.parameter_sets().is_empty() {
            vec![None]
        } else {
            method.parameter_sets().iter().cloned().map(Some).collect()
        };

        let started = Instant::now();
        let context = TestContext::new(class.name(), method.name());
        let mut case_services = ServiceCollection::new();
        case_services.add_instance(Arc::new(context));
        let scope = match provider.create_scope_with(case_services) {
            Ok(scope) => scope,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                self.report_all(class, method, rows, &e.to_string(), started, summary)
                    .await;
                return Ok(());
            }
        };

        let result = match resolve_fixture(class, &scope) {
            Ok(instance) => self.run_rows(class, method, &instance, rows, summary).await,
            Err(cause) => {
                debug!(
                    class = class.name(),
                    method = method.name(),
                    cause = %cause,
                    "Fixture resolution failed"
                );
                self.report_all(class, method, rows, &cause, started, summary)
                    .await;
                Ok(())
            }
        };

        scope.dispose().await;
        result
    }

    async fn run_rows(
        &self,
        class: &CandidateClass,
        method: &CandidateMethod,
        instance: &FixtureInstance,
        rows: Vec<Option<ParameterSet>>,
        summary: &mut RunSummary,
    ) -> Result<()> {
        for row in rows {
            let started = Instant::now();
            let args = row.clone().unwrap_or_else(ParameterSet::empty);
            let outcome = match self.run_case(class, method, instance, args).await {
                Ok(outcome) => outcome,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => Outcome::Failed(e.to_string()),
            };
            let report = case_report(class, method, row, outcome, started.elapsed());
            self.report(report, summary).await;
        }
        Ok(())
    }

    /// Setup, body and Cleanup for one row
    async fn run_case(
        &self,
        class: &CandidateClass,
        method: &CandidateMethod,
        instance: &FixtureInstance,
        row: ParameterSet,
    ) -> Result<Outcome> {
        if let Some(setup) = class.setup(instance) {
            debug!(class = class.name(), "Running Setup");
            if let Err(cause) = guard(setup?).await {
                if self.cleanup_after_failed_setup {
                    if let Err(cleanup_cause) = self.cleanup(class, instance).await? {
                        warn!(
                            class = class.name(),
                            cause = %cleanup_cause,
                            "Cleanup failed after failed Setup"
                        );
                    }
                }
                return Ok(Outcome::Failed(cause));
            }
        }

        let body = guard(method.invoke(Arc::clone(instance), row)?).await;
        let cleanup = self.cleanup(class, instance).await?;

        Ok(match (body, cleanup) {
            (Err(cause), Err(cleanup_cause)) => {
                warn!(
                    class = class.name(),
                    method = method.name(),
                    cause = %cleanup_cause,
                    "Cleanup failed after failed body"
                );
                Outcome::Failed(cause)
            }
            (Err(cause), Ok(())) | (Ok(()), Err(cause)) => Outcome::Failed(cause),
            (Ok(()), Ok(())) => Outcome::Passed,
        })
    }

    async fn cleanup(
        &self,
        class: &CandidateClass,
        instance: &FixtureInstance,
    ) -> Result<std::result::Result<(), String>> {
        match class.cleanup(instance) {
            Some(cleanup) => {
                debug!(class = class.name(), "Running Cleanup");
                Ok(guard(cleanup?).await)
            }
            None => Ok(Ok(())),
        }
    }

    async fn report_all(
        &self,
        class: &CandidateClass,
        method: &CandidateMethod,
        rows: Vec<Option<ParameterSet>>,
        cause: &str,
        started: Instant,
        summary: &mut RunSummary,
    ) {
        for row in rows {
            let outcome = Outcome::Failed(cause.to_string());
            let report = case_report(class, method, row, outcome, started.elapsed());
            self.report(report, summary).await;
        }
    }

    async fn report(&self, report: CaseReport, summary: &mut RunSummary) {
        self.reporter.case_finished(&report).await;
        summary.reports.push(report);
    }
}

impl std::fmt::Debug for ExecutionOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionOrchestrator")
            .field("scope_builder", &self.scope_builder)
            .field(
                "cleanup_after_failed_setup",
                &self.cleanup_after_failed_setup,
            )
            .finish_non_exhaustive()
    }
}

/// Reject plans whose methods were declared on another fixture than their class
fn validate(plan: &TestPlan) -> Result<()> {
    for entry in plan.entries() {
        for method in &entry.methods {
            if method.owner() != entry.class.fixture_type() {
                return Err(Error::invalid_plan(format!(
                    "method {} is declared on {} but planned under class {} ({})",
                    method.name(),
                    method.owner_name(),
                    entry.class.name(),
                    entry.class.fixture_name()
                )));
            }
        }
    }
    Ok(())
}

fn resolve_fixture(
    class: &CandidateClass,
    scope: &ServiceScope,
) -> std::result::Result<FixtureInstance, String> {
    match std::panic::catch_unwind(AssertUnwindSafe(|| class.resolve_fixture(scope))) {
        Ok(Ok(instance)) => Ok(instance),
        Ok(Err(e)) => Err(e.to_string()),
        Err(panic) => Err(panic_message(panic.as_ref())),
    }
}

/// Await a body or hook, turning errors and panics into a failure cause
async fn guard(future: BoxFuture<'static, TestResult>) -> std::result::Result<(), String> {
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(format!("{e:#}")),
        Err(panic) => Err(panic_message(panic.as_ref())),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}

fn case_report(
    class: &CandidateClass,
    method: &CandidateMethod,
    parameters: Option<ParameterSet>,
    outcome: Outcome,
    duration: Duration,
) -> CaseReport {
    CaseReport {
        class_name: class.name().to_string(),
        method_name: method.name().to_string(),
        parameters,
        outcome,
        duration,
    }
}
