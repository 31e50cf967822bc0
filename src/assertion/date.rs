//! Ordering, validity and calendar-field checks for dates.
//!
//! Calendar and clock fields are read in the date's own UTC offset.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

use attest_core::format;
use attest_core::{DateValue, Value};

use super::{Interruption, ValueAssertion, impl_assert};
use crate::outcome::Outcome;

#[derive(Debug, Clone)]
pub struct DateAssertion {
    base: ValueAssertion,
}

impl_assert!(DateAssertion);

/// `on February 14th 2024`, `in 2024`, `on a 14th of February`, ...
fn describe_day(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Option<String> {
    let description = match (year, month, day) {
        (Some(y), Some(m), Some(d)) => format!("on {} {} {y}", format::month_name(m), format::ordinal(d)),
        (Some(y), Some(m), None) => format!("in {} {y}", format::month_name(m)),
        (Some(y), None, Some(d)) => format!("on a {} in {y}", format::ordinal(d)),
        (Some(y), None, None) => format!("in {y}"),
        (None, Some(m), Some(d)) => format!("on a {} of {}", format::ordinal(d), format::month_name(m)),
        (None, Some(m), None) => format!("in {}", format::month_name(m)),
        (None, None, Some(d)) => format!("on a {}", format::ordinal(d)),
        (None, None, None) => return None,
    };
    Some(description)
}

/// `Date is at 09:30`, `Date is at XX:30:15`, `Date is at 09:XX:XX.250`.
fn describe_time(hour: Option<u32>, minute: Option<u32>, second: Option<u32>, milli: Option<u32>) -> String {
    let part = |field: Option<u32>, width: usize| match field {
        Some(value) => format!("{value:0width$}"),
        None => "X".repeat(width),
    };
    let mut description = format!("Date is at {}:{}", part(hour, 2), part(minute, 2));
    if second.is_some() || milli.is_some() {
        description.push(':');
        description.push_str(&part(second, 2));
        if milli.is_some() {
            description.push('.');
            description.push_str(&part(milli, 3));
        }
    }
    description
}

impl DateAssertion {
    pub(crate) fn new(base: ValueAssertion) -> Self {
        Self { base }
    }

    fn subject(&self) -> DateValue {
        match self.base.value() {
            Value::Date(date) => *date,
            _ => DateValue::invalid(),
        }
    }

    fn bound(bound: impl Into<DateValue>) -> Result<DateTime<FixedOffset>, Interruption> {
        bound
            .into()
            .datetime()
            .copied()
            .ok_or(Interruption::InvalidBound)
    }

    /// Pass iff the subject is strictly earlier than `upper`.
    ///
    /// ## Errors
    /// - [`Interruption::InvalidBound`] when `upper` is an invalid date.
    pub fn to_be_before(&self, upper: impl Into<DateValue>) -> Result<bool, Interruption> {
        let upper = Self::bound(upper)?;
        let shown = format::date(&DateValue::from_datetime(upper));
        let subject = self.subject();
        Ok(self.base.check(
            subject.datetime().is_some_and(|date| *date < upper),
            || format!("given Date is before {shown}"),
            || format!("given Date ({}) is after {shown}", format::date(&subject)),
        ))
    }

    /// Pass iff the subject is strictly later than `lower`.
    ///
    /// ## Errors
    /// - [`Interruption::InvalidBound`] when `lower` is an invalid date.
    pub fn to_be_after(&self, lower: impl Into<DateValue>) -> Result<bool, Interruption> {
        let lower = Self::bound(lower)?;
        let shown = format::date(&DateValue::from_datetime(lower));
        let subject = self.subject();
        Ok(self.base.check(
            subject.datetime().is_some_and(|date| *date > lower),
            || format!("given Date is after {shown}"),
            || format!("given Date ({}) is before {shown}", format::date(&subject)),
        ))
    }

    pub fn to_be_valid(&self) -> bool {
        self.base.check(
            self.subject().is_valid(),
            || "given Date is valid".to_string(),
            || "given Date is invalid".to_string(),
        )
    }

    pub fn to_be_invalid(&self) -> bool {
        self.base.check(
            !self.subject().is_valid(),
            || "given Date is invalid".to_string(),
            || "given Date is valid".to_string(),
        )
    }

    /// Pass iff every given calendar field matches. `month` is 1-based.
    ///
    /// ## Errors
    /// - [`Interruption::MissingDateFields`] when no field is given.
    pub fn to_be_on(&self, year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Result<bool, Interruption> {
        let description = describe_day(year, month, day).ok_or(Interruption::MissingDateFields)?;
        let subject = self.subject();
        let outcome = match subject.datetime() {
            None => Outcome::fail("given Date is invalid"),
            Some(date) => match (year, month, day) {
                (Some(y), _, _) if date.year() != y => {
                    Outcome::fail(format!("Date falls in {}, not {y}", date.year()))
                }
                (_, Some(m), _) if date.month() != m => Outcome::fail(format!(
                    "Date falls in {}, not {}",
                    format::month_name(date.month()),
                    format::month_name(m)
                )),
                (_, _, Some(d)) if date.day() != d => Outcome::fail(format!(
                    "Date falls on the {} of the month, but {} doesn't",
                    format::ordinal(d),
                    format::date(&subject)
                )),
                _ => Outcome::pass(),
            },
        };
        Ok(self.base.record(|| format!("Date falls {description}"), outcome))
    }

    /// Pass iff every given clock field matches.
    ///
    /// ## Errors
    /// - [`Interruption::MissingTimeFields`] when no field is given.
    pub fn to_be_at(
        &self,
        hour: Option<u32>,
        minute: Option<u32>,
        second: Option<u32>,
        milli: Option<u32>,
    ) -> Result<bool, Interruption> {
        if hour.is_none() && minute.is_none() && second.is_none() && milli.is_none() {
            return Err(Interruption::MissingTimeFields);
        }
        let outcome = match self.subject().datetime() {
            None => Outcome::fail("given Date is invalid"),
            Some(date) => {
                let fields = [
                    ("hour", hour, date.hour()),
                    ("minute", minute, date.minute()),
                    ("second", second, date.second()),
                    ("millisecond", milli, date.timestamp_subsec_millis()),
                ];
                fields
                    .into_iter()
                    .find_map(|(unit, expected, actual)| {
                        expected
                            .filter(|&expected| expected != actual)
                            .map(|expected| format!("Date is at {unit} {actual}, not at {unit} {expected}"))
                    })
                    .map_or_else(Outcome::pass, Outcome::fail)
            }
        };
        Ok(self
            .base
            .record(|| describe_time(hour, minute, second, milli), outcome))
    }
}
