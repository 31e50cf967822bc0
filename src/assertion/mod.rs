//! Assertion objects: the shared base capability and the per-category families built on it.
//!
//! Every assertion records exactly one [`Outcome`] per invoked operation into the pool it was created with, and
//! returns whether that outcome passed. Operations that cannot be evaluated at all (a malformed argument, an error
//! thrown by the code under test) return an [`Interruption`] instead of recording anything.

use thiserror::Error;

use attest_core::format;
use attest_core::{Category, Thrown, Value, deep_equals};

use crate::outcome::{Outcome, ResultPool};

mod big_int;
mod callable;
mod collection;
mod date;
mod keyed;
mod number;
mod quantifier;
mod text;

pub use big_int::BigIntAssertion;
pub use callable::{CallableAssertion, MessageMatcher, ThrowExpectation, TimeUnit, VariadicCallable};
pub use collection::{BufferAssertion, SequenceAssertion, SetAssertion};
pub use date::DateAssertion;
pub use keyed::{MapAssertion, ObjectAssertion};
pub use number::NumberAssertion;
pub use text::TextAssertion;

/// Why an operation stopped without recording an outcome.
#[derive(Debug, Clone, Error)]
pub enum Interruption {
    #[error("UsageError: given date is invalid")]
    InvalidBound,
    #[error("UsageError: no year, month or day to compare against")]
    MissingDateFields,
    #[error("UsageError: no hour, minute, second or millisecond to compare against")]
    MissingTimeFields,
    #[error("UsageError: time limit must be positive, got {0}")]
    NonPositiveLimit(String),
    #[error("UsageError: number of tries must be at least 1")]
    ZeroTries,
    #[error("UsageError: radix must be between 2 and 32, got {0}")]
    InvalidRadix(u32),
    #[error("RangeError: division by zero")]
    DivisionByZero,
    #[error("TypeError: expected a {expected} value, got a {actual} value")]
    CategoryMismatch { expected: &'static str, actual: Category },
    /// The code under test threw.
    #[error(transparent)]
    Thrown(#[from] Thrown),
}

// ============================================================================
// Base capability
// ============================================================================

/// State shared by every assertion family: the subject, the pool, and the naming mode.
#[derive(Debug, Clone)]
pub struct ValueAssertion {
    value: Value,
    pool: ResultPool,
    label: Option<String>,
    auto_name: bool,
}

impl ValueAssertion {
    pub(crate) fn new(value: Value, pool: ResultPool, auto_name: bool) -> Self {
        Self {
            value,
            pool,
            label: None,
            auto_name,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Append `outcome`, named by the explicit label, else by `auto_name` when auto-naming is on.
    pub(crate) fn record(&self, auto_name: impl FnOnce() -> String, outcome: Outcome) -> bool {
        let name = match &self.label {
            Some(label) => Some(label.clone()),
            None if self.auto_name => Some(auto_name()),
            None => None,
        };
        tracing::trace!(passed = outcome.is_pass(), name = name.as_deref(), "assertion recorded");
        self.pool.push(outcome.with_name(name))
    }

    /// Record a pass when `passed` holds, else a failure with the lazily built `reason`.
    pub(crate) fn check(
        &self,
        passed: bool,
        auto_name: impl FnOnce() -> String,
        reason: impl FnOnce() -> String,
    ) -> bool {
        let outcome = if passed { Outcome::pass() } else { Outcome::fail(reason()) };
        self.record(auto_name, outcome)
    }

    pub(crate) fn rendered(&self) -> String {
        format::single(&self.value)
    }

    fn check_equal(&self, expected: Value) -> bool {
        self.check(
            deep_equals(&self.value, &expected),
            || format!("value = {}", format::single(&expected)),
            || {
                format!(
                    "expected value to be {}, but was actually {}",
                    format::single(&expected),
                    self.rendered()
                )
            },
        )
    }

    fn check_unequal(&self, not_expected: Value) -> bool {
        self.check(
            !deep_equals(&self.value, &not_expected),
            || format!("value ≠ {}", format::single(&not_expected)),
            || format!("expected value not to be {}, but it was", format::single(&not_expected)),
        )
    }

    fn check_predicate(&self, predicate: impl FnOnce(&Value) -> bool) -> bool {
        self.check(
            predicate(&self.value),
            || "value matches predicate".to_string(),
            || "value did not match the predicate".to_string(),
        )
    }
}

/// Operations available on every assertion, whatever its category.
pub trait Assert: Sized {
    fn base(&self) -> &ValueAssertion;
    fn base_mut(&mut self) -> &mut ValueAssertion;

    /// Name every later outcome with `label`. Takes precedence over auto-naming.
    fn named(mut self, label: impl Into<String>) -> Self {
        self.base_mut().label = Some(label.into());
        self
    }

    /// Name every later outcome after the operation that produced it.
    fn auto_named(mut self) -> Self {
        self.base_mut().auto_name = true;
        self
    }

    fn value(&self) -> &Value {
        self.base().value()
    }

    /// Pass iff the subject deep-equals `expected`.
    fn to_be(&self, expected: impl Into<Value>) -> bool {
        self.base().check_equal(expected.into())
    }

    /// Pass iff the subject does not deep-equal `not_expected`.
    fn to_not_be(&self, not_expected: impl Into<Value>) -> bool {
        self.base().check_unequal(not_expected.into())
    }

    fn to_satisfy(&self, predicate: impl FnOnce(&Value) -> bool) -> bool {
        self.base().check_predicate(predicate)
    }
}

impl Assert for ValueAssertion {
    fn base(&self) -> &ValueAssertion {
        self
    }

    fn base_mut(&mut self) -> &mut ValueAssertion {
        self
    }
}

macro_rules! impl_assert {
    ($($ty:ty),* $(,)?) => {
        $(impl $crate::assertion::Assert for $ty {
            fn base(&self) -> &$crate::assertion::ValueAssertion {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::assertion::ValueAssertion {
                &mut self.base
            }
        })*
    };
}

pub(crate) use impl_assert;

// ============================================================================
// Category dispatch
// ============================================================================

/// An assertion specialized to the category of its subject.
///
/// Narrow with the accessors (`number()`, `sequence()`, ...) to reach category operations.
#[derive(Debug, Clone)]
pub enum Assertion {
    BigInt(BigIntAssertion),
    Boolean(ValueAssertion),
    Number(NumberAssertion),
    Text(TextAssertion),
    Buffer(BufferAssertion),
    Sequence(SequenceAssertion),
    Set(SetAssertion),
    Map(MapAssertion),
    Date(DateAssertion),
    Callable(CallableAssertion),
    Variadic(VariadicCallable),
    Object(ObjectAssertion),
    Other(ValueAssertion),
}

impl Assertion {
    pub(crate) fn classify(value: Value, pool: ResultPool, auto_name: bool) -> Self {
        let category = value.category();
        let base = ValueAssertion::new(value, pool, auto_name);
        match category {
            Category::BigInt => Assertion::BigInt(BigIntAssertion::new(base)),
            Category::Boolean => Assertion::Boolean(base),
            Category::Number => Assertion::Number(NumberAssertion::new(base)),
            Category::Text => Assertion::Text(TextAssertion::new(base)),
            Category::Buffer(_) => Assertion::Buffer(BufferAssertion::new(base)),
            Category::Sequence => Assertion::Sequence(SequenceAssertion::new(base)),
            Category::Set => Assertion::Set(SetAssertion::new(base)),
            Category::Map => Assertion::Map(MapAssertion::new(base)),
            Category::Date => Assertion::Date(DateAssertion::new(base)),
            Category::NullaryCallable => Assertion::Callable(CallableAssertion::nullary(base)),
            Category::VariadicCallable => Assertion::Variadic(VariadicCallable::new(base)),
            Category::Object => Assertion::Object(ObjectAssertion::new(base)),
            Category::Other => Assertion::Other(base),
        }
    }

    pub fn category(&self) -> Category {
        self.base().value().category()
    }

    fn mismatch(&self, expected: &'static str) -> Interruption {
        Interruption::CategoryMismatch {
            expected,
            actual: self.category(),
        }
    }
}

macro_rules! narrowing {
    ($($method:ident => $variant:ident($ty:ty), $expected:literal;)*) => {
        impl Assertion {
            $(
                #[doc = concat!("Narrow to [`", stringify!($ty), "`].")]
                pub fn $method(self) -> Result<$ty, Interruption> {
                    match self {
                        Assertion::$variant(inner) => Ok(inner),
                        other => Err(other.mismatch($expected)),
                    }
                }
            )*
        }
    };
}

narrowing! {
    big_int => BigInt(BigIntAssertion), "bigint";
    number => Number(NumberAssertion), "number";
    text => Text(TextAssertion), "string";
    buffer => Buffer(BufferAssertion), "typed array";
    sequence => Sequence(SequenceAssertion), "array";
    set => Set(SetAssertion), "set";
    map => Map(MapAssertion), "map";
    date => Date(DateAssertion), "date";
    callable => Callable(CallableAssertion), "function";
    variadic => Variadic(VariadicCallable), "function with parameters";
    object => Object(ObjectAssertion), "object";
}

impl Assert for Assertion {
    fn base(&self) -> &ValueAssertion {
        match self {
            Assertion::BigInt(a) => a.base(),
            Assertion::Boolean(a) | Assertion::Other(a) => a,
            Assertion::Number(a) => a.base(),
            Assertion::Text(a) => a.base(),
            Assertion::Buffer(a) => a.base(),
            Assertion::Sequence(a) => a.base(),
            Assertion::Set(a) => a.base(),
            Assertion::Map(a) => a.base(),
            Assertion::Date(a) => a.base(),
            Assertion::Callable(a) => a.base(),
            Assertion::Variadic(a) => a.base(),
            Assertion::Object(a) => a.base(),
        }
    }

    fn base_mut(&mut self) -> &mut ValueAssertion {
        match self {
            Assertion::BigInt(a) => a.base_mut(),
            Assertion::Boolean(a) | Assertion::Other(a) => a,
            Assertion::Number(a) => a.base_mut(),
            Assertion::Text(a) => a.base_mut(),
            Assertion::Buffer(a) => a.base_mut(),
            Assertion::Sequence(a) => a.base_mut(),
            Assertion::Set(a) => a.base_mut(),
            Assertion::Map(a) => a.base_mut(),
            Assertion::Date(a) => a.base_mut(),
            Assertion::Callable(a) => a.base_mut(),
            Assertion::Variadic(a) => a.base_mut(),
            Assertion::Object(a) => a.base_mut(),
        }
    }
}
