//! Result hierarchy, status aggregation and reporters.
//!
//! ## TestReporter Trait
//!
//! Reporting is separated from execution: [`run_tree`](crate::suite::run_tree) produces a [`ResultTree`], and a
//! [`TestReporter`] renders it. Console and JSON reporters ship with the crate; other formats implement the trait.

use std::collections::{HashMap, HashSet};
use std::io;

use serde::Serialize;

use crate::outcome::Outcome;
use crate::test::{ExecutionError, TestRun};

mod console;
mod json;
mod summary;

pub use console::ConsoleReporter;
pub use json::JsonReporter;
pub use summary::TestSummary;

/// Aggregated status. Ordered by severity: `Error` outranks `Fail`, `Fail` outranks `Pass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    /// Display-only: a completed test that recorded nothing.
    Warning,
    Fail,
    Error,
}

/// Results mirroring the shape of the test tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultTree {
    /// A completed test and its outcomes, in recording order.
    Outcomes(Vec<Outcome>),
    /// A test that stopped early.
    Error(ExecutionError),
    /// Named children, in registration order.
    Group(Vec<(String, ResultTree)>),
}

impl From<TestRun> for ResultTree {
    fn from(run: TestRun) -> Self {
        match run {
            Ok(outcomes) => ResultTree::Outcomes(outcomes),
            Err(error) => ResultTree::Error(error),
        }
    }
}

impl ResultTree {
    /// A group whose repeated child names get ` (2)`, ` (3)`, ... suffixes so none is lost.
    pub fn group<I>(children: I) -> Self
    where
        I: IntoIterator<Item = (String, ResultTree)>,
    {
        let mut taken: HashSet<String> = HashSet::new();
        let mut next_suffix: HashMap<String, usize> = HashMap::new();
        let children = children
            .into_iter()
            .map(|(name, child)| {
                let unique = if taken.contains(&name) {
                    let suffix = next_suffix.entry(name.clone()).or_insert(2);
                    while taken.contains(&format!("{name} ({suffix})")) {
                        *suffix += 1;
                    }
                    format!("{name} ({suffix})")
                } else {
                    name
                };
                taken.insert(unique.clone());
                (unique, child)
            })
            .collect();
        ResultTree::Group(children)
    }

    /// Status used for aggregation and exit codes.
    ///
    /// ## Notes
    /// - Any execution error below makes the status `Error`; otherwise any failed outcome makes it `Fail`.
    /// - A completed test with no outcomes is `Pass` here; see [`display_status`](Self::display_status).
    pub fn status(&self) -> Status {
        match self {
            ResultTree::Outcomes(outcomes) if outcomes.iter().all(Outcome::is_pass) => Status::Pass,
            ResultTree::Outcomes(_) => Status::Fail,
            ResultTree::Error(_) => Status::Error,
            ResultTree::Group(children) => children
                .iter()
                .map(|(_, child)| child.status())
                .max()
                .unwrap_or(Status::Pass),
        }
    }

    /// Status used for presentation: like [`status`](Self::status), but a test that recorded nothing is a
    /// `Warning`.
    pub fn display_status(&self) -> Status {
        match self {
            ResultTree::Outcomes(outcomes) if outcomes.is_empty() => Status::Warning,
            other => other.status(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ResultTree> {
        match self {
            ResultTree::Group(children) => children.iter().find(|(child, _)| child == name).map(|(_, tree)| tree),
            _ => None,
        }
    }
}

/// Renders a finished run.
pub trait TestReporter {
    /// Called once the tests to run are known.
    fn on_run_start(&mut self, _test_count: usize) -> io::Result<()> {
        Ok(())
    }

    /// Called with the full result tree once every test has settled.
    fn on_run_complete(&mut self, results: &ResultTree, summary: &TestSummary) -> io::Result<()>;
}
