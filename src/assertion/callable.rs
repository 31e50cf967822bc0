//! Return-value, timing and throw checks for callables.
//!
//! A callable declaring parameters must be bound to arguments with [`VariadicCallable::with_args`] before any of
//! these checks apply.

use std::fmt;
use std::time::Instant;

use attest_core::format::{self, Connective};
use attest_core::{Callable, ErrorKind, Pattern, Value, deep_equals};

use super::{Interruption, ValueAssertion, impl_assert};
use crate::outcome::Outcome;

/// Unit for execution-time limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    #[default]
    Milliseconds,
    Seconds,
    Minutes,
}

impl TimeUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "ns",
            TimeUnit::Microseconds => "μs",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "sec",
            TimeUnit::Minutes => "min",
        }
    }

    pub fn from_nanos(self, nanos: f64) -> f64 {
        match self {
            TimeUnit::Nanoseconds => nanos,
            TimeUnit::Microseconds => nanos * 1e-3,
            TimeUnit::Milliseconds => nanos * 1e-6,
            TimeUnit::Seconds => nanos * 1e-9,
            TimeUnit::Minutes => nanos * 1e-9 / 60.0,
        }
    }

    /// Number of timed calls used when the caller does not choose one. Coarser units take fewer tries.
    pub fn default_tries(self) -> usize {
        match self {
            TimeUnit::Nanoseconds | TimeUnit::Microseconds => 1000,
            TimeUnit::Milliseconds => 500,
            TimeUnit::Seconds => 10,
            TimeUnit::Minutes => 1,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// How a thrown error's message must look.
#[derive(Debug, Clone)]
pub enum MessageMatcher {
    Exact(String),
    Matching(Pattern),
}

/// The error a callable is expected to throw.
#[derive(Debug, Clone)]
pub struct ThrowExpectation {
    kind: ErrorKind,
    message: Option<MessageMatcher>,
    cause: Option<Value>,
}

impl ThrowExpectation {
    /// Any error of `kind` (or a refinement of it, for [`ErrorKind::Error`]).
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            cause: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(MessageMatcher::Exact(message.into()));
        self
    }

    pub fn with_message_matching(mut self, pattern: impl Into<Pattern>) -> Self {
        self.message = Some(MessageMatcher::Matching(pattern.into()));
        self
    }

    pub fn with_cause(mut self, cause: impl Into<Value>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    fn describe(&self) -> String {
        let mut options = Vec::new();
        match &self.message {
            Some(MessageMatcher::Exact(message)) => {
                options.push(format!("message: {}", format::single(&Value::from(message))));
            }
            Some(MessageMatcher::Matching(pattern)) => options.push(format!("message ≈ /{}/", pattern.source())),
            None => {}
        }
        if let Some(cause) = &self.cause {
            options.push(format!("cause: {}", format::single(cause)));
        }
        if options.is_empty() {
            self.kind.to_string()
        } else {
            format!("{}{{{}}}", self.kind, options.join(", "))
        }
    }
}

impl From<ErrorKind> for ThrowExpectation {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

// ============================================================================
// Callable assertions
// ============================================================================

/// Assertions on a callable with its arguments fixed.
#[derive(Debug, Clone)]
pub struct CallableAssertion {
    base: ValueAssertion,
    callable: Callable,
    args: Vec<Value>,
}

impl_assert!(CallableAssertion, VariadicCallable);

fn callable_of(base: &ValueAssertion) -> Callable {
    match base.value() {
        Value::Callable(callable) => callable.clone(),
        _ => Callable::from_fn("f", || Value::Undefined),
    }
}

impl CallableAssertion {
    pub(crate) fn nullary(base: ValueAssertion) -> Self {
        let callable = callable_of(&base);
        Self {
            base,
            callable,
            args: Vec::new(),
        }
    }

    /// `name()` or `name(a, b)`, as used in names and reasons.
    fn label(&self) -> String {
        format!(
            "{}({})",
            self.callable.name(),
            format::sequence(&self.args, Connective::Comma)
        )
    }

    fn call(&self) -> Result<Value, attest_core::Thrown> {
        self.callable.call(&self.args)
    }

    /// Call once and pass iff the result deep-equals `expected`.
    ///
    /// ## Errors
    /// - [`Interruption::Thrown`] when the callable throws; nothing is recorded.
    pub fn to_return(&self, expected: impl Into<Value>) -> Result<bool, Interruption> {
        let expected = expected.into();
        let label = self.label();
        let result = self.call()?;
        Ok(self.base.check(
            deep_equals(&result, &expected),
            || format!("{label} = {}", format::single(&expected)),
            || {
                format!(
                    "expected {label} = {}, but was actually {}",
                    format::single(&expected),
                    format::single(&result)
                )
            },
        ))
    }

    /// Time the callable over the unit's default number of tries; pass iff the mean is at most `limit`.
    pub fn to_take_at_most(&self, limit: f64, unit: TimeUnit) -> Result<bool, Interruption> {
        self.to_take_at_most_over(limit, unit, unit.default_tries())
    }

    /// Time the callable over `tries` calls; pass iff the mean is at most `limit` in `unit`.
    ///
    /// ## Errors
    /// - [`Interruption::NonPositiveLimit`] / [`Interruption::ZeroTries`] for malformed arguments.
    /// - [`Interruption::Thrown`] when any timed call throws.
    #[tracing::instrument(skip_all, fields(callable = self.callable.name(), tries = tries))]
    pub fn to_take_at_most_over(&self, limit: f64, unit: TimeUnit, tries: usize) -> Result<bool, Interruption> {
        if limit.is_nan() || limit <= 0.0 {
            return Err(Interruption::NonPositiveLimit(format::number(limit)));
        }
        if tries == 0 {
            return Err(Interruption::ZeroTries);
        }

        let start = Instant::now();
        for _ in 0..tries {
            self.call()?;
        }
        let mean_nanos = start.elapsed().as_nanos() as f64 / tries as f64;
        let mean = unit.from_nanos(mean_nanos);
        let shown = format!("{}{unit}", format::precision(mean, 3));
        tracing::debug!(mean = %shown, "timed callable");

        let label = self.label();
        let bound = format::number(limit);
        let outcome = if mean <= limit {
            Outcome::pass_with_note(format!("took {shown}"))
        } else {
            Outcome::fail(format!("{label} took more than {bound}{unit} (specifically {shown})"))
        };
        Ok(self.base.record(|| format!("{label} takes ≤ {bound}{unit}"), outcome))
    }

    /// Call once and pass iff it throws an error matching `expected`.
    ///
    /// Never interrupts: a thrown error is the expected path, and a normal return is recorded as a failure.
    pub fn to_throw(&self, expected: impl Into<ThrowExpectation>) -> bool {
        let expected = expected.into();
        let label = self.label();
        let outcome = match self.call() {
            Ok(result) => Outcome::fail(format!(
                "{label} didn't throw an error (returned {} instead)",
                format::single(&result)
            )),
            Err(thrown) if !thrown.kind.is_a(&expected.kind) => Outcome::fail(format!(
                "expected {label} to throw {}, but threw {} instead",
                expected.kind, thrown.kind
            )),
            Err(thrown) => match (&expected.message, &expected.cause) {
                (Some(MessageMatcher::Exact(message)), _) if thrown.message != *message => {
                    Outcome::fail(format!(
                        "expected error message of {}, but was {} instead",
                        format::single(&Value::from(message)),
                        format::single(&Value::from(&thrown.message))
                    ))
                }
                (Some(MessageMatcher::Matching(pattern)), _) if !pattern.is_match(&thrown.message) => {
                    Outcome::fail(format!(
                        "expected error message to match /{}/, but {} doesn't",
                        pattern.source(),
                        format::single(&Value::from(&thrown.message))
                    ))
                }
                (_, Some(cause)) if !thrown.cause().is_some_and(|actual| deep_equals(actual, cause)) => {
                    Outcome::fail(format!(
                        "expected error cause to be {}, but was actually {}",
                        format::single(cause),
                        format::single(thrown.cause().unwrap_or(&Value::Undefined))
                    ))
                }
                _ => Outcome::pass(),
            },
        };
        self.base
            .record(|| format!("{label} throws {}", expected.describe()), outcome)
    }
}

/// A callable declaring parameters. Bind arguments with [`with_args`](Self::with_args) to reach callable checks.
#[derive(Debug, Clone)]
pub struct VariadicCallable {
    base: ValueAssertion,
}

impl VariadicCallable {
    pub(crate) fn new(base: ValueAssertion) -> Self {
        Self { base }
    }

    /// Fix the arguments every later call uses. Naming carries over.
    pub fn with_args<I>(self, args: I) -> CallableAssertion
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let callable = callable_of(&self.base);
        CallableAssertion {
            base: self.base,
            callable,
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use attest_core::{Callable, ErrorKind, Thrown, Value};

    use super::*;
    use crate::assertion::Assert;
    use crate::expect::expect_factory;

    fn throw_if_negative() -> Callable {
        Callable::with_arity("throwIfNeg", 1, |args| match args.first().and_then(Value::as_number) {
            Some(n) if n < 0.0 => {
                Err(Thrown::new(ErrorKind::RangeError, "negative number").with_cause(Value::record([("n", n)])))
            }
            Some(n) => Ok(Value::Number(n)),
            None => Err(Thrown::new(ErrorKind::TypeError, "expected a number")),
        })
    }

    #[test]
    fn return_values() {
        let (e, pool) = expect_factory();
        let answer = Callable::from_fn("answer", || 42);
        let a = e.expect(answer).auto_named().callable().unwrap();
        assert!(a.to_return(42).unwrap());
        assert!(!a.to_return(41).unwrap());
        let outcomes = pool.snapshot();
        assert_eq!(outcomes[0].name(), Some("answer() = 42"));
        assert_eq!(outcomes[1].reason(), Some("expected answer() = 41, but was actually 42"));
    }

    #[test]
    fn thrown_errors_interrupt_return_checks() {
        let (e, pool) = expect_factory();
        let a = e.expect(throw_if_negative()).variadic().unwrap().with_args([-1]);
        let err = a.to_return(1).unwrap_err();
        assert_eq!(err.to_string(), "RangeError: negative number");
        assert!(pool.is_empty());
    }

    #[test]
    fn throw_expectations() {
        let (e, pool) = expect_factory();
        let negative = e
            .expect(throw_if_negative())
            .auto_named()
            .variadic()
            .unwrap()
            .with_args([-1]);
        assert!(negative.to_throw(ErrorKind::RangeError));
        assert!(negative.to_throw(ErrorKind::Error));
        assert!(!negative.to_throw(ErrorKind::TypeError));
        assert!(negative.to_throw(
            ThrowExpectation::new(ErrorKind::RangeError)
                .with_message("negative number")
                .with_cause(Value::record([("n", -1)]))
        ));
        assert!(!negative.to_throw(ThrowExpectation::new(ErrorKind::RangeError).with_message("other")));
        assert!(!negative.to_throw(ThrowExpectation::new(ErrorKind::RangeError).with_cause(0)));

        let positive = e.expect(throw_if_negative()).variadic().unwrap().with_args([2]);
        assert!(!positive.to_throw(ErrorKind::RangeError));

        let outcomes = pool.snapshot();
        assert_eq!(outcomes[0].name(), Some("throwIfNeg(-1) throws RangeError"));
        assert_eq!(
            outcomes[2].reason(),
            Some("expected throwIfNeg(-1) to throw TypeError, but threw RangeError instead")
        );
        assert_eq!(
            outcomes[3].name(),
            Some("throwIfNeg(-1) throws RangeError{message: \"negative number\", cause: { 'n': -1 }}")
        );
        assert_eq!(
            outcomes[4].reason(),
            Some("expected error message of \"other\", but was \"negative number\" instead")
        );
        assert_eq!(
            outcomes[5].reason(),
            Some("expected error cause to be 0, but was actually { 'n': -1 }")
        );
        assert_eq!(
            outcomes[6].reason(),
            Some("throwIfNeg(2) didn't throw an error (returned 2 instead)")
        );
    }

    #[test]
    fn timing_arguments_are_validated() {
        let (e, pool) = expect_factory();
        let a = e.expect(Callable::from_fn("noop", || ())).callable().unwrap();
        assert!(matches!(
            a.to_take_at_most(0.0, TimeUnit::Milliseconds),
            Err(Interruption::NonPositiveLimit(_))
        ));
        assert!(matches!(
            a.to_take_at_most_over(1.0, TimeUnit::Seconds, 0),
            Err(Interruption::ZeroTries)
        ));
        assert!(pool.is_empty());
    }

    #[test]
    fn timing_records_a_note() {
        let (e, pool) = expect_factory();
        let a = e.expect(Callable::from_fn("noop", || ())).auto_named().callable().unwrap();
        assert!(a.to_take_at_most_over(1.0, TimeUnit::Seconds, 3).unwrap());
        let outcome = &pool.snapshot()[0];
        assert_eq!(outcome.name(), Some("noop() takes ≤ 1sec"));
        assert!(outcome.note().unwrap().starts_with("took "));
    }

    #[test]
    fn panics_surface_as_thrown_panic() {
        let (e, _) = expect_factory();
        let a = e.expect(Callable::new("boom", || panic!("kaboom"))).callable().unwrap();
        assert!(a.to_throw(ErrorKind::Panic));
    }
}
