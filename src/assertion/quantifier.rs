//! Universal and existential quantification over the elements, entries, keys or values of a collection.
//!
//! The per-element assertion runs against a private auto-naming pool. Only the aggregated outcome lands in the
//! caller's pool.

use std::ops::Range;

use attest_core::Value;

use super::{Assertion, Interruption, ValueAssertion};
use crate::expect::Expect;
use crate::outcome::Outcome;

/// How a quantified collection talks about its items.
pub(crate) struct Wording {
    /// Plural noun: `elements`, `entries`, `keys`, `values`.
    pub plural: &'static str,
    /// Describes a failing item given its position and value.
    pub describe: fn(usize, &Value) -> String,
}

/// Outcomes of one per-element assertion applied to every item.
pub(crate) struct ElementRun {
    outcomes: Vec<Outcome>,
    spans: Vec<Range<usize>>,
}

impl ElementRun {
    /// Apply `assertion` to each item in order. Stops at the first interruption.
    pub(crate) fn collect<F, R>(items: &[Value], mut assertion: F) -> Result<Self, Interruption>
    where
        F: FnMut(Assertion, usize) -> Result<R, Interruption>,
    {
        let (expect, pool) = Expect::auto_naming();
        let mut spans = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let start = pool.len();
            assertion(expect.expect(item), index)?;
            spans.push(start..pool.len());
        }
        Ok(Self {
            outcomes: pool.snapshot(),
            spans,
        })
    }

    /// The name shared by every nested outcome, if they agree on one.
    fn shared_name(&self) -> Option<&str> {
        let first = self.outcomes.first()?.name()?;
        self.outcomes
            .iter()
            .all(|outcome| outcome.name() == Some(first))
            .then_some(first)
    }

    /// Index of the item that produced the first failing outcome, with that outcome's reason.
    fn first_failure(&self) -> Option<(usize, &str)> {
        let (position, reason) = self
            .outcomes
            .iter()
            .enumerate()
            .find_map(|(position, outcome)| outcome.reason().map(|reason| (position, reason)))?;
        let item = self.spans.iter().position(|span| span.contains(&position))?;
        Some((item, reason))
    }

    fn any_pass(&self) -> bool {
        self.outcomes.iter().any(Outcome::is_pass)
    }

    /// Pass iff no nested outcome failed. Vacuously true for an empty collection.
    pub(crate) fn for_all(&self, base: &ValueAssertion, items: &[Value], wording: &Wording) -> bool {
        let outcome = match self.first_failure() {
            None => Outcome::pass(),
            Some((index, reason)) => {
                let item = items.get(index).unwrap_or(&Value::Undefined);
                Outcome::fail(format!("{} failed: {reason}", (wording.describe)(index, item)))
            }
        };
        base.record(
            || match self.shared_name() {
                Some(name) => format!("for all {}: {name}", wording.plural),
                None => format!("all {} match assertion", wording.plural),
            },
            outcome,
        )
    }

    /// Pass iff at least one nested outcome passed. False for an empty collection.
    pub(crate) fn for_some(&self, base: &ValueAssertion, wording: &Wording) -> bool {
        let outcome = if self.any_pass() {
            Outcome::pass()
        } else {
            Outcome::fail(format!("assertion failed for all {}", wording.plural))
        };
        base.record(
            || match self.shared_name() {
                Some(name) => format!("for some {}: {name}", wording.plural),
                None => format!("some {} match assertion", wording.plural),
            },
            outcome,
        )
    }
}
