//! # ember-evm-tests
//!
//! JSON fixture harness for the ember interpreter.
//!
//! This crate provides:
//! - Fixture file parsing (hex code, context sections, expectations)
//! - Environment construction from fixture context
//! - Per-fixture execution and result comparison
//! - Result aggregation and reporting
//!
//! ## Fixture format
//!
//! A file is a JSON array of cases:
//!
//! ```json
//! [{
//!   "name": "ADD",
//!   "code": { "asm": "PUSH1 1\nPUSH1 1\nADD", "bin": "6001600101" },
//!   "expect": { "stack": ["0x2"], "success": true }
//! }]
//! ```
//!
//! `expect.stack` lists the final stack top first.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod environment;
mod error;
mod runner;
mod types;

pub use environment::build_environment;
pub use error::{TestError, TestResult};
pub use fixture_test::{FixtureResults, FixtureRunner};
pub use runner::{TestRunner, TestStats};
pub use types::*;
