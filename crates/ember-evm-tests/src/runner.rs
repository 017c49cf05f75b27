//! Test runner and statistics

use crate::error::TestResult;
use crate::fixture_test::{FixtureResults, FixtureRunner};
use std::path::Path;
use std::time::{Duration, Instant};

/// Aggregated test statistics
#[derive(Debug, Default)]
pub struct TestStats {
    /// Total fixtures executed
    pub total: usize,
    /// Fixtures passed
    pub passed: usize,
    /// Fixtures failed
    pub failed: usize,
    /// Fixtures skipped by the filter or unsupported
    pub skipped: usize,
    /// Total execution time
    pub duration: Duration,
    /// Failed fixture names with reasons
    pub failures: Vec<(String, String)>,
}

impl TestStats {
    /// Create empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the results of one file
    pub fn add_results(&mut self, results: &FixtureResults) {
        self.total += results.total();
        self.passed += results.passed.len();
        self.failed += results.failed.len();
        self.skipped += results.skipped.len();
        for (name, reason) in &results.failed {
            self.failures.push((name.clone(), reason.clone()));
        }
    }

    /// Whether every executed fixture passed
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Pass rate as percentage
    pub fn pass_rate(&self) -> f64 {
        let executed = self.passed + self.failed;
        if executed == 0 {
            return 100.0;
        }
        (self.passed as f64 / executed as f64) * 100.0
    }

    /// Print summary
    pub fn print_summary(&self) {
        println!("\n========================================");
        println!("Fixture Summary");
        println!("========================================");
        println!("Total:   {}", self.total);
        println!("Passed:  {}", self.passed);
        println!("Failed:  {}", self.failed);
        println!("Skipped: {}", self.skipped);
        println!("Pass Rate: {:.2}%", self.pass_rate());
        println!("Duration: {:.2}s", self.duration.as_secs_f64());

        if !self.failures.is_empty() {
            println!("\nFailed fixtures:");
            for (name, reason) in &self.failures {
                println!("  - {}: {}", name, reason);
            }
        }
    }
}

/// Runs fixture files, or directories of them
pub struct TestRunner {
    fixture_runner: FixtureRunner,
    verbose: bool,
}

impl TestRunner {
    /// Create new test runner
    pub fn new(fixture_runner: FixtureRunner, verbose: bool) -> Self {
        Self {
            fixture_runner,
            verbose,
        }
    }

    /// Run a fixture file, or every `.json` file below a directory
    pub fn run_path(&self, path: &Path) -> TestResult<TestStats> {
        let mut stats = TestStats::new();
        let start = Instant::now();

        if path.is_dir() {
            self.run_dir(path, &mut stats)?;
        } else {
            let results = self.fixture_runner.run_file(path)?;
            stats.add_results(&results);
        }

        stats.duration = start.elapsed();
        Ok(stats)
    }

    fn run_dir(&self, dir: &Path, stats: &mut TestStats) -> TestResult<()> {
        let mut entries = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort();

        for path in entries {
            if path.is_dir() {
                self.run_dir(&path, stats)?;
            } else if path.extension().is_some_and(|e| e == "json") {
                let results = self.fixture_runner.run_file(&path)?;
                if self.verbose {
                    println!(
                        "File: {:?} - {} passed, {} failed",
                        path,
                        results.passed.len(),
                        results.failed.len()
                    );
                }
                stats.add_results(&results);
            }
        }

        Ok(())
    }
}
