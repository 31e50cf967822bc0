use std::time::Duration;

use super::{ResultTree, Status};

/// Per-test counts of a finished run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    /// Completed tests that recorded no outcome.
    pub warned: usize,
    /// Outcomes recorded across every completed test.
    pub assertions: usize,
    pub duration: Duration,
}

impl TestSummary {
    pub fn from_tree(tree: &ResultTree, duration: Duration) -> Self {
        let mut summary = Self {
            duration,
            ..Self::default()
        };
        summary.tally(tree);
        summary
    }

    fn tally(&mut self, tree: &ResultTree) {
        match tree {
            ResultTree::Group(children) => children.iter().for_each(|(_, child)| self.tally(child)),
            leaf => {
                self.total += 1;
                if let ResultTree::Outcomes(outcomes) = leaf {
                    self.assertions += outcomes.len();
                }
                match leaf.display_status() {
                    Status::Pass => self.passed += 1,
                    Status::Warning => self.warned += 1,
                    Status::Fail => self.failed += 1,
                    Status::Error => self.errored += 1,
                }
            }
        }
    }

    /// Whether the run should exit successfully. Strict runs also reject tests that recorded nothing.
    pub fn is_success(&self, strict: bool) -> bool {
        self.failed == 0 && self.errored == 0 && !(strict && self.warned > 0)
    }
}
