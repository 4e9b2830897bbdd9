//! Execution orchestrator tests

use crate::test_utils::{
    BrokenCleanup, BrokenSetup, CollectingReporter, EventLog, KnowsItsCase, Plain, Recorder,
    TrackedResource, UsesResource, pass,
};
use std::sync::Arc;
use tcv_application::{
    CandidateClass, CandidateMethod, DiscoveryFilter, ExecutionOrchestrator, PlanEntry,
    ScopeBuilder, ServiceConfigurator, TestPlan, TestResult, TestingConvention,
};
use tcv_domain::ParameterSet;
use tcv_domain::error::Error;
use tcv_domain::{Outcome, TagSet, params};
use tcv_infrastructure::config::ConventionConfig;
use tcv_infrastructure::di::ServiceCollection;

fn with_log(log: &Arc<EventLog>) -> ServiceConfigurator {
    let log = Arc::clone(log);
    Arc::new(move |services: &mut ServiceCollection| log.register(services))
}

fn orchestrator(log: &Arc<EventLog>, reporter: &Arc<CollectingReporter>) -> ExecutionOrchestrator {
    let builder = ScopeBuilder::new(Some(with_log(log)), Arc::new(ConventionConfig::default()));
    ExecutionOrchestrator::new(builder, Arc::clone(reporter) as _)
}

fn plan(classes: Vec<CandidateClass>) -> TestPlan {
    DiscoveryFilter::new(TagSet::new()).discover(&classes)
}

fn recorder_class() -> tcv_application::ClassBuilder<Recorder> {
    CandidateClass::builder::<Recorder>("Recorder")
        .with_setup()
        .with_cleanup()
}

fn recording_body(event: &'static str) -> CandidateMethod {
    CandidateMethod::new::<Recorder, _, _>(event, move |fixture: Arc<Recorder>| async move {
        fixture.log.record(event);
        Ok(())
    })
}

async fn panics(_fixture: Arc<Recorder>) -> TestResult {
    panic!("index out of bounds")
}

async fn recorded_subtract(fixture: Arc<Recorder>, row: ParameterSet) -> TestResult {
    let x: i64 = row.arg(0)?;
    let y: i64 = row.arg(1)?;
    let expected: i64 = row.arg(2)?;
    fixture.log.record(format!("body({x})"));
    anyhow::ensure!(x - y == expected, "{x} - {y} != {expected}");
    Ok(())
}

async fn is_positive(_fixture: Arc<Recorder>, row: ParameterSet) -> TestResult {
    let value: i64 = row.arg(0)?;
    anyhow::ensure!(value > 0, "{value} is not positive");
    Ok(())
}

async fn recorded_failure(fixture: Arc<Recorder>) -> TestResult {
    fixture.log.record("body");
    anyhow::bail!("expected 4, got 5")
}

#[tokio::test]
async fn test_hooks_wrap_the_body() {
    let log = EventLog::shared();
    let reporter = CollectingReporter::shared();
    let plan = plan(vec![recorder_class().method(recording_body("body")).build()]);

    let summary = orchestrator(&log, &reporter).run(&plan).await.unwrap();

    assert_eq!(log.events(), vec!["create", "setup", "body", "cleanup"]);
    assert_eq!(summary.outcomes(), vec![&Outcome::Passed]);
}

#[tokio::test]
async fn test_each_row_gets_its_own_lifecycle_cycle() {
    let log = EventLog::shared();
    let reporter = CollectingReporter::shared();
    let subtract = CandidateMethod::parameterized::<Recorder, _, _>("Subtract", recorded_subtract)
        .with_row(params![5, 3, 2])
        .with_row(params![8, 5, 3]);
    let plan = plan(vec![recorder_class().method(subtract).build()]);

    let summary = orchestrator(&log, &reporter).run(&plan).await.unwrap();

    // One fixture per method, shared by its rows
    assert_eq!(
        log.events(),
        vec!["create", "setup", "body(5)", "cleanup", "setup", "body(8)", "cleanup"]
    );
    assert_eq!(summary.passed(), 2);
    let names: Vec<String> = summary.reports.iter().map(|r| r.case_name()).collect();
    assert_eq!(names, vec!["Recorder.Subtract(5, 3, 2)", "Recorder.Subtract(8, 5, 3)"]);
}

#[tokio::test]
async fn test_failing_row_does_not_stop_later_rows() {
    let log = EventLog::shared();
    let reporter = CollectingReporter::shared();
    let positive = CandidateMethod::parameterized::<Recorder, _, _>("IsPositive", is_positive)
        .with_rows([params![1], params![-1], params![2]]);
    let plan = plan(vec![recorder_class().method(positive).build()]);

    orchestrator(&log, &reporter).run(&plan).await.unwrap();

    assert_eq!(
        reporter.outcomes(),
        vec![
            Outcome::Passed,
            Outcome::Failed("-1 is not positive".to_string()),
            Outcome::Passed,
        ]
    );
    assert_eq!(log.count("cleanup"), 3);
}

#[tokio::test]
async fn test_skipped_method_runs_nothing() {
    let log = EventLog::shared();
    let reporter = CollectingReporter::shared();
    let plan = plan(vec![
        recorder_class()
            .method(
                recording_body("body")
                    .skip_because("flaky on CI")
                    .with_row(params![1])
                    .with_row(params![2]),
            )
            .build(),
    ]);

    let summary = orchestrator(&log, &reporter).run(&plan).await.unwrap();

    assert!(log.events().is_empty());
    assert_eq!(
        summary.outcomes(),
        vec![&Outcome::Skipped(Some("flaky on CI".to_string()))]
    );
}

#[tokio::test]
async fn test_cleanup_runs_after_failing_body() {
    let log = EventLog::shared();
    let reporter = CollectingReporter::shared();
    let failing = CandidateMethod::new::<Recorder, _, _>("Fails", recorded_failure);
    let plan = plan(vec![recorder_class().method(failing).build()]);

    let summary = orchestrator(&log, &reporter).run(&plan).await.unwrap();

    assert_eq!(log.events(), vec!["create", "setup", "body", "cleanup"]);
    assert_eq!(
        summary.outcomes(),
        vec![&Outcome::Failed("expected 4, got 5".to_string())]
    );
}

#[tokio::test]
async fn test_failed_setup_skips_body_and_cleanup() {
    let log = EventLog::shared();
    let reporter = CollectingReporter::shared();
    let class = CandidateClass::builder::<BrokenSetup>("BrokenSetup")
        .with_setup()
        .with_cleanup()
        .test("Never", |fixture: Arc<BrokenSetup>| async move {
            fixture.log.record("body");
            Ok(())
        })
        .build();

    let summary = orchestrator(&log, &reporter)
        .run(&plan(vec![class]))
        .await
        .unwrap();

    assert_eq!(log.events(), vec!["setup"]);
    assert_eq!(
        summary.outcomes(),
        vec![&Outcome::Failed("database unavailable".to_string())]
    );
}

#[tokio::test]
async fn test_cleanup_after_failed_setup_when_configured() {
    let log = EventLog::shared();
    let reporter = CollectingReporter::shared();
    let class = CandidateClass::builder::<BrokenSetup>("BrokenSetup")
        .with_setup()
        .with_cleanup()
        .test("Never", pass)
        .build();

    let summary = orchestrator(&log, &reporter)
        .with_cleanup_after_failed_setup(true)
        .run(&plan(vec![class]))
        .await
        .unwrap();

    assert_eq!(log.events(), vec!["setup", "cleanup"]);
    assert_eq!(summary.failed(), 1);
}

#[tokio::test]
async fn test_failing_cleanup_fails_the_case() {
    let log = EventLog::shared();
    let reporter = CollectingReporter::shared();
    let class = CandidateClass::builder::<BrokenCleanup>("BrokenCleanup")
        .with_cleanup()
        .test("Passes", pass)
        .build();

    let summary = orchestrator(&log, &reporter)
        .run(&plan(vec![class]))
        .await
        .unwrap();

    assert_eq!(
        summary.outcomes(),
        vec![&Outcome::Failed("temp dir still locked".to_string())]
    );
}

#[tokio::test]
async fn test_panicking_body_is_contained() {
    let log = EventLog::shared();
    let reporter = CollectingReporter::shared();
    let class = recorder_class()
        .test("Panics", panics)
        .method(recording_body("After"))
        .build();

    let summary = orchestrator(&log, &reporter)
        .run(&plan(vec![class]))
        .await
        .unwrap();

    assert_eq!(
        summary.outcomes(),
        vec![
            &Outcome::Failed("panicked: index out of bounds".to_string()),
            &Outcome::Passed,
        ]
    );
    assert_eq!(log.count("cleanup"), 2);
}

#[tokio::test]
async fn test_isolated_failure_between_passing_methods() {
    let log = EventLog::shared();
    let reporter = CollectingReporter::shared();
    let class = recorder_class()
        .method(recording_body("First"))
        .test("Second", |_| async move { anyhow::bail!("boom") })
        .method(recording_body("Third"))
        .build();

    let summary = orchestrator(&log, &reporter)
        .run(&plan(vec![class]))
        .await
        .unwrap();

    assert_eq!(
        summary.outcomes(),
        vec![
            &Outcome::Passed,
            &Outcome::Failed("boom".to_string()),
            &Outcome::Passed,
        ]
    );
    // A fresh fixture per method
    assert_eq!(log.count("create"), 3);
}

#[tokio::test]
async fn test_resolution_failure_fails_every_row() {
    let log = EventLog::shared();
    let reporter = CollectingReporter::shared();
    // TrackedResource is never registered
    let class = CandidateClass::builder::<UsesResource>("UsesResource")
        .method(
            CandidateMethod::parameterized::<UsesResource, _, _>("Rows", |_, _| async { Ok(()) })
                .with_rows([params![1], params![2]]),
        )
        .test("Plain", pass)
        .build();

    let summary = orchestrator(&log, &reporter)
        .run(&plan(vec![class]))
        .await
        .unwrap();

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.failed(), 3);
    assert!(matches!(
        &summary.reports[0].outcome,
        Outcome::Failed(cause) if cause.contains("TrackedResource")
    ));
}

#[tokio::test]
async fn test_fixture_sees_the_case_it_runs_for() {
    let log = EventLog::shared();
    let reporter = CollectingReporter::shared();
    let class = CandidateClass::builder::<KnowsItsCase>("KnowsItsCase")
        .test("First", pass)
        .test("Second", pass)
        .build();

    let summary = orchestrator(&log, &reporter)
        .run(&plan(vec![class]))
        .await
        .unwrap();

    assert_eq!(summary.passed(), 2);
    assert_eq!(log.events(), vec!["KnowsItsCase.First", "KnowsItsCase.Second"]);
}

#[tokio::test]
async fn test_case_scope_is_disposed_after_cleanup() {
    let log = EventLog::shared();
    let reporter = CollectingReporter::shared();
    let shared_log = Arc::clone(&log);
    let configure: ServiceConfigurator = Arc::new(move |services: &mut ServiceCollection| {
        shared_log.register(services);
        services.add_scoped_disposable::<TrackedResource, _>(|scope| {
            Ok(Arc::new(TrackedResource {
                log: scope.resolve::<EventLog>()?,
            }))
        });
    });
    let class = CandidateClass::builder::<UsesResource>("UsesResource")
        .test("First", |fixture: Arc<UsesResource>| async move {
            fixture.resource.log.record("body");
            Ok(())
        })
        .test("Second", |_| async move { anyhow::bail!("still disposed") })
        .build();

    let builder = ScopeBuilder::new(Some(configure), Arc::new(ConventionConfig::default()));
    ExecutionOrchestrator::new(builder, reporter)
        .run(&plan(vec![class]))
        .await
        .unwrap();

    assert_eq!(log.events(), vec!["body", "dispose", "dispose"]);
}

#[tokio::test]
async fn test_method_from_another_fixture_aborts_the_run() {
    let log = EventLog::shared();
    let reporter = CollectingReporter::shared();
    let class = CandidateClass::builder::<Plain>("Plain").build();
    let foreign = recording_body("Foreign");
    let plan = TestPlan::new(vec![PlanEntry::new(class.clone(), vec![foreign])], vec![class]);

    let err = orchestrator(&log, &reporter).run(&plan).await.unwrap_err();

    assert!(matches!(err, Error::InvalidPlan { .. }));
    assert!(reporter.events().is_empty());
    assert!(log.events().is_empty());
}

#[tokio::test]
async fn test_reporter_receives_progress_in_order() {
    let log = EventLog::shared();
    let reporter = CollectingReporter::shared();
    let plan = plan(vec![
        recorder_class()
            .method(recording_body("Works"))
            .method(recording_body("Skipped").skip())
            .build(),
    ]);

    orchestrator(&log, &reporter).run(&plan).await.unwrap();

    assert_eq!(
        reporter.events(),
        vec![
            "run_started(1, 2)",
            "class_started(Recorder)",
            "case_finished(Recorder.Works)",
            "case_finished(Recorder.Skipped)",
            "run_finished(2)",
        ]
    );
}

#[tokio::test]
async fn test_convention_discovers_and_executes() {
    let log = EventLog::shared();
    let reporter = CollectingReporter::shared();
    let shared_log = Arc::clone(&log);
    let convention = TestingConvention::builder()
        .tag("fast")
        .configure_additional_services(move |services| shared_log.register(services))
        .reporter(Arc::clone(&reporter) as _)
        .build();
    let classes = vec![
        recorder_class()
            .tag("fast")
            .method(recording_body("Quick").with_tag("fast"))
            .method(recording_body("Slow").with_tag("slow"))
            .build(),
    ];

    let summary = convention.run(&classes).await.unwrap();

    assert_eq!(summary.total(), 1);
    assert_eq!(log.events(), vec!["create", "setup", "Quick", "cleanup"]);
}

#[test]
fn test_convention_merges_configured_tags() {
    let mut config = ConventionConfig::default();
    config.discovery.tags = vec!["nightly".to_string()];

    let convention = TestingConvention::builder()
        .tag("smoke")
        .config(config)
        .build();

    let requested: Vec<&str> = convention.requested_tags().iter().collect();
    assert_eq!(requested, vec!["nightly", "smoke"]);
}
