#![forbid(unsafe_code)]
//! attest: a value-classifying assertion engine with hierarchical result aggregation.
//!
//! A [`Test`] body receives an [`Expect`] factory. Each `expect(value)` call classifies the value by its runtime
//! category and returns an [`Assertion`] offering the operations of that category. Every operation records one
//! [`Outcome`](outcome::Outcome) in the run's pool. Runs are grouped into a [`TestTree`](suite::TestTree), executed
//! concurrently, and aggregated into a [`ResultTree`](report::ResultTree) with a single status.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test bodies**: may return any error or panic; both are captured as an
//!   [`ExecutionError`](test::ExecutionError) and never take the runner down.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod assertion;
pub mod cli;
pub mod config;
pub mod expect;
pub mod outcome;
pub mod prelude;
pub mod report;
pub mod selfcheck;
pub mod suite;
pub mod test;

pub use assertion::{Assert, Assertion, Interruption};
pub use config::{OutputFormat, RunConfig};
pub use expect::{Expect, expect_factory};
pub use outcome::{Outcome, ResultPool};
pub use report::{ResultTree, Status, TestReporter, TestSummary};
pub use suite::{SuiteBuilder, TestDiscovery, TestTree, run_tree};
pub use test::{ExecutionError, Test, TestRun};
