//! Ordering, containment and shape checks for text.

use attest_core::format;
use attest_core::numeric::{self, RADIX_RANGE};
use attest_core::{Pattern, Value};

use super::{Interruption, ValueAssertion, impl_assert};

#[derive(Debug, Clone)]
pub struct TextAssertion {
    base: ValueAssertion,
}

impl_assert!(TextAssertion);

fn quoted(text: &str) -> String {
    format::single(&Value::from(text))
}

impl TextAssertion {
    pub(crate) fn new(base: ValueAssertion) -> Self {
        Self { base }
    }

    fn subject(&self) -> &str {
        self.base.value().as_text().unwrap_or_default()
    }

    /// Pass iff the subject sorts strictly before `other` (code-point order).
    pub fn to_come_before(&self, other: &str) -> bool {
        self.base.check(
            self.subject() < other,
            || format!("given string comes before {}", quoted(other)),
            || {
                format!(
                    "expected value to come before {}, but {} doesn't",
                    quoted(other),
                    self.base.rendered()
                )
            },
        )
    }

    /// Pass iff the subject sorts strictly after `other` (code-point order).
    pub fn to_come_after(&self, other: &str) -> bool {
        self.base.check(
            self.subject() > other,
            || format!("given string comes after {}", quoted(other)),
            || {
                format!(
                    "expected value to come after {}, but {} doesn't",
                    quoted(other),
                    self.base.rendered()
                )
            },
        )
    }

    /// Pass iff the subject reads the same reversed, character by character.
    pub fn to_be_palindromic(&self) -> bool {
        let subject = self.subject();
        self.base.check(
            subject.chars().eq(subject.chars().rev()),
            || "given string is palindromic".to_string(),
            || format!("expected string {} to be palindromic, but it isn't", self.base.rendered()),
        )
    }

    pub fn to_contain(&self, fragment: &str) -> bool {
        self.base.check(
            self.subject().contains(fragment),
            || format!("given string contains {}", quoted(fragment)),
            || {
                format!(
                    "expected string to contain {}, but {} doesn't",
                    quoted(fragment),
                    self.base.rendered()
                )
            },
        )
    }

    /// Pass iff a leading prefix of the subject reads as a decimal number (`"3.5kg"` does, `"kg"` doesn't).
    pub fn to_be_numeric(&self) -> bool {
        self.base.check(
            numeric::parses_as_float_prefix(self.subject()),
            || "given string is numeric".to_string(),
            || format!("expected string to be numeric, but {} isn't", self.base.rendered()),
        )
    }

    /// Pass iff every character is a digit in `radix`.
    ///
    /// ## Errors
    /// - [`Interruption::InvalidRadix`] when `radix` is outside 2..=32; nothing is recorded.
    pub fn to_be_numeric_in(&self, radix: u32) -> Result<bool, Interruption> {
        if !RADIX_RANGE.contains(&radix) {
            return Err(Interruption::InvalidRadix(radix));
        }
        let stray = numeric::first_unrecognized_digit(self.subject(), radix);
        Ok(self.base.check(
            stray.is_none(),
            || format!("given string is base-{radix} numeric"),
            || {
                let stray = stray.map(|c| format::single(&Value::from(c))).unwrap_or_default();
                format!(
                    "{} isn't numeric in base {radix}, since it contains {stray}",
                    self.base.rendered()
                )
            },
        ))
    }

    pub fn to_match(&self, pattern: impl Into<Pattern>) -> bool {
        let pattern = pattern.into();
        self.base.check(
            pattern.is_match(self.subject()),
            || format!("given string matches /{}/", pattern.source()),
            || {
                format!(
                    "expected string to match /{}/, but {} doesn't",
                    pattern.source(),
                    self.base.rendered()
                )
            },
        )
    }
}
