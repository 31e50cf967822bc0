//! Indented, colored console rendering of a result tree.

use std::io::{self, Write};

use super::{ResultTree, Status, TestReporter, TestSummary};
use crate::outcome::Outcome;

const INDENT: usize = 4;
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

fn color(status: Status) -> &'static str {
    match status {
        Status::Pass => "\x1b[32m",
        Status::Warning => "\x1b[33m",
        Status::Fail => "\x1b[31m",
        Status::Error => "\x1b[41;37m",
    }
}

/// Default console reporter.
///
/// Prints the tree with one line per group and test, colored by display status. Failed outcomes and stopped
/// tests are always listed; passing outcomes only in verbose mode.
pub struct ConsoleReporter<W: Write> {
    out: W,
    verbose: bool,
    color: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, verbose: bool, color: bool) -> Self {
        Self { out, verbose, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, status: Status, bold: bool) -> String {
        if !self.color {
            return text.to_string();
        }
        let weight = if bold { BOLD } else { "" };
        format!("{weight}{}{text}{RESET}", color(status))
    }

    fn line(&mut self, depth: usize, text: &str) -> io::Result<()> {
        writeln!(self.out, "{:width$}{text}", "", width = depth * INDENT)
    }

    fn write_children(&mut self, tree: &ResultTree, depth: usize) -> io::Result<()> {
        match tree {
            ResultTree::Group(children) => {
                for (name, child) in children {
                    let heading = self.paint(name, child.display_status(), name.starts_with('/'));
                    self.line(depth, &heading)?;
                    self.write_children(child, depth + 1)?;
                }
            }
            ResultTree::Outcomes(outcomes) if outcomes.is_empty() => {
                let warning = self.paint("⚠️ No assertions were made", Status::Warning, false);
                self.line(depth, &warning)?;
            }
            ResultTree::Outcomes(outcomes) => {
                for (index, outcome) in outcomes.iter().enumerate() {
                    self.write_outcome(index + 1, outcome, depth)?;
                }
            }
            ResultTree::Error(error) => {
                let plural = if error.assertion_index() == 1 { "" } else { "s" };
                let stopped = format!(
                    "⛔ Stopped after {} assertion{plural} ({})",
                    error.assertion_index(),
                    error.message()
                );
                let stopped = self.paint(&stopped, Status::Error, false);
                self.line(depth, &stopped)?;
            }
        }
        Ok(())
    }

    fn write_outcome(&mut self, number: usize, outcome: &Outcome, depth: usize) -> io::Result<()> {
        let name = outcome.name().map(|name| format!("({name}) ")).unwrap_or_default();
        let text = match outcome {
            Outcome::Pass { note, .. } if self.verbose => {
                let note = note.as_deref().map(|note| format!(" ({note})")).unwrap_or_default();
                self.paint(&format!("{number}. {name}✅ Passed{note}"), Status::Pass, false)
            }
            Outcome::Pass { .. } => return Ok(()),
            Outcome::Fail { reason, .. } => {
                self.paint(&format!("{number}. {name}❌ Failed: {reason}"), Status::Fail, false)
            }
        };
        self.line(depth, &text)
    }

    fn summary_line(&self, summary: &TestSummary) -> String {
        let mut parts = Vec::new();
        let counts = [
            (summary.passed, "passed", Status::Pass),
            (summary.failed, "failed", Status::Fail),
            (summary.errored, "stopped", Status::Error),
            (summary.warned, "without assertions", Status::Warning),
        ];
        for (count, label, status) in counts {
            if count > 0 {
                parts.push(self.paint(&format!("{count} {label}"), status, false));
            }
        }
        format!(
            "====== {} in {:.2}s ======",
            parts.join(", "),
            summary.duration.as_secs_f64()
        )
    }
}

impl<W: Write> TestReporter for ConsoleReporter<W> {
    fn on_run_start(&mut self, test_count: usize) -> io::Result<()> {
        let plural = if test_count == 1 { "" } else { "s" };
        writeln!(self.out, "collected {test_count} test{plural}")?;
        writeln!(self.out)
    }

    fn on_run_complete(&mut self, results: &ResultTree, summary: &TestSummary) -> io::Result<()> {
        self.write_children(results, 0)?;
        writeln!(self.out)?;
        let line = self.summary_line(summary);
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }
}
