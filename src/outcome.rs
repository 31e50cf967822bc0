//! Assertion outcomes and the per-run log they are appended to.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

/// Result of one assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Pass {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    Fail {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        reason: String,
    },
}

impl Outcome {
    pub fn pass() -> Self {
        Outcome::Pass { name: None, note: None }
    }

    pub fn pass_with_note(note: impl Into<String>) -> Self {
        Outcome::Pass {
            name: None,
            note: Some(note.into()),
        }
    }

    /// A failure. An empty reason is replaced so every failure explains itself.
    pub fn fail(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Outcome::Fail {
            name: None,
            reason: if reason.is_empty() {
                "assertion failed".to_string()
            } else {
                reason
            },
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass { .. })
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Outcome::Pass { name, .. } | Outcome::Fail { name, .. } => name.as_deref(),
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Fail { reason, .. } => Some(reason),
            Outcome::Pass { .. } => None,
        }
    }

    pub fn note(&self) -> Option<&str> {
        match self {
            Outcome::Pass { note, .. } => note.as_deref(),
            Outcome::Fail { .. } => None,
        }
    }

    pub(crate) fn with_name(mut self, label: Option<String>) -> Self {
        match &mut self {
            Outcome::Pass { name, .. } | Outcome::Fail { name, .. } => *name = label,
        }
        self
    }
}

/// Append-only outcome log shared by every assertion created for one run.
///
/// Clones share the same log. Outcomes are kept in recording order.
#[derive(Debug, Clone, Default)]
pub struct ResultPool {
    outcomes: Arc<Mutex<Vec<Outcome>>>,
}

impl ResultPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `outcome`; returns whether it passed.
    pub fn push(&self, outcome: Outcome) -> bool {
        let passed = outcome.is_pass();
        self.outcomes.lock().push(outcome);
        passed
    }

    pub fn len(&self) -> usize {
        self.outcomes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.lock().is_empty()
    }

    pub fn snapshot(&self) -> Vec<Outcome> {
        self.outcomes.lock().clone()
    }
}
