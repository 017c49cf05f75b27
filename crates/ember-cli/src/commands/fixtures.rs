//! Run fixture files

use ember_evm::InterpreterConfig;
use ember_evm_tests::{FixtureRunner, TestRunner, TestStats};
use serde_json::json;
use std::path::Path;
use std::process::ExitCode;

use crate::{output::Output, CliError};

/// Run a fixture file or directory; fails the process when any fixture fails
pub fn execute(
    path: &Path,
    filter: Option<String>,
    verbose: bool,
    config: InterpreterConfig,
    json: bool,
) -> Result<ExitCode, CliError> {
    if !path.exists() {
        return Err(CliError::InvalidInput(format!(
            "no such fixture file or directory: {}",
            path.display()
        )));
    }

    let mut fixture_runner = FixtureRunner::new(config, verbose);
    if let Some(filter) = filter {
        fixture_runner = fixture_runner.with_filter(filter);
    }

    let stats = TestRunner::new(fixture_runner, verbose).run_path(path)?;

    if json {
        report_json(&stats)?;
    } else {
        stats.print_summary();
    }

    Ok(if stats.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn report_json(stats: &TestStats) -> Result<(), CliError> {
    let failures: Vec<_> = stats
        .failures
        .iter()
        .map(|(name, reason)| json!({ "name": name, "reason": reason }))
        .collect();

    Output::new(true)
        .field_u64("total", stats.total as u64)
        .field_u64("passed", stats.passed as u64)
        .field_u64("failed", stats.failed as u64)
        .field_u64("skipped", stats.skipped as u64)
        .field_value("pass_rate", json!(stats.pass_rate()))
        .field_value("failures", failures.into())
        .print()
}
