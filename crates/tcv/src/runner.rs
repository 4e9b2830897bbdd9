//! Command line run
//!
//! Loads configuration, installs logging, then discovers and executes the
//! test classes linked into the running binary.

use std::path::PathBuf;
use tcv_application::{CandidateSource, LinkedCandidates, TestPlan, TestingConvention};
use tcv_infrastructure::config::ConfigLoader;
use tcv_infrastructure::di::ServiceCollection;
use tcv_infrastructure::logging::init_logging;
use tracing::info;

/// Options for [`run`]
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Explicit configuration file; default locations are searched otherwise
    pub config: Option<PathBuf>,
    /// Requested tags, merged with the configured ones
    pub tags: Vec<String>,
    /// Print the plan instead of executing it
    pub list: bool,
}

/// Run the linked test classes
///
/// Returns whether every case passed (always true for `list`).
pub async fn run<F>(
    options: &RunOptions,
    configure_additional_services: F,
) -> Result<bool, Box<dyn std::error::Error>>
where
    F: Fn(&mut ServiceCollection) + Send + Sync + 'static,
{
    let mut loader = ConfigLoader::new();
    if let Some(path) = &options.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;
    init_logging(&config.logging)?;

    let convention = TestingConvention::builder()
        .tags(options.tags.iter().cloned())
        .config(config)
        .configure_additional_services(configure_additional_services)
        .build();

    let plan = convention.discover(&LinkedCandidates.candidates());
    if options.list {
        print_plan(&plan);
        return Ok(true);
    }

    let summary = convention.execute(&plan).await?;
    info!(
        passed = summary.passed(),
        failed = summary.failed(),
        skipped = summary.skipped(),
        "Run complete"
    );
    Ok(summary.is_success())
}

fn print_plan(plan: &TestPlan) {
    for entry in plan.entries() {
        println!("{}", entry.class.name());
        for method in &entry.methods {
            let rows = method.parameter_sets();
            match method.skip_marker() {
                Some(_) => println!("  {} (skipped)", method.name()),
                None if rows.is_empty() => println!("  {}", method.name()),
                None => {
                    for row in rows {
                        println!("  {}{row}", method.name());
                    }
                }
            }
        }
    }
    println!(
        "{} classes, {} methods, {} cases",
        plan.class_count(),
        plan.method_count(),
        plan.case_count()
    );
}
