//! Ordering, divisibility and primality checks for arbitrary-precision integers.

use num_bigint::BigInt;

use attest_core::numeric::{self, Primality};
use attest_core::Value;

use super::{Interruption, ValueAssertion, impl_assert};

#[derive(Debug, Clone)]
pub struct BigIntAssertion {
    base: ValueAssertion,
}

impl_assert!(BigIntAssertion);

fn render(n: &BigInt) -> String {
    format!("{n}n")
}

impl BigIntAssertion {
    pub(crate) fn new(base: ValueAssertion) -> Self {
        Self { base }
    }

    fn subject(&self) -> BigInt {
        match self.base.value() {
            Value::BigInt(n) => n.clone(),
            _ => BigInt::default(),
        }
    }

    fn compare(&self, bound: &BigInt, symbol: &str, word: &str, holds: bool) -> bool {
        self.base.check(
            holds,
            || format!("n {symbol} {}", render(bound)),
            || format!("expected value {word} {}, but {} isn't", render(bound), render(&self.subject())),
        )
    }

    pub fn to_be_less_than(&self, bound: impl Into<BigInt>) -> bool {
        let bound = bound.into();
        self.compare(&bound, "<", "<", self.subject() < bound)
    }

    pub fn to_be_at_most(&self, bound: impl Into<BigInt>) -> bool {
        let bound = bound.into();
        self.compare(&bound, "≤", "<=", self.subject() <= bound)
    }

    pub fn to_be_greater_than(&self, bound: impl Into<BigInt>) -> bool {
        let bound = bound.into();
        self.compare(&bound, ">", ">", self.subject() > bound)
    }

    pub fn to_be_at_least(&self, bound: impl Into<BigInt>) -> bool {
        let bound = bound.into();
        self.compare(&bound, "≥", ">=", self.subject() >= bound)
    }

    /// Pass iff `divisor` divides the subject.
    ///
    /// ## Errors
    /// - [`Interruption::DivisionByZero`] when `divisor` is zero; nothing is recorded.
    pub fn to_be_divisible_by(&self, divisor: impl Into<BigInt>) -> Result<bool, Interruption> {
        let (divisor, n) = (divisor.into(), self.subject());
        let divides = numeric::big_divides(&divisor, &n).ok_or(Interruption::DivisionByZero)?;
        Ok(self.base.check(
            divides,
            || format!("{} divides n", render(&divisor)),
            || format!("expected value to be divisible by {}, but {} isn't", render(&divisor), render(&n)),
        ))
    }

    /// Pass iff the subject divides `dividend`.
    ///
    /// ## Errors
    /// - [`Interruption::DivisionByZero`] when the subject is zero; nothing is recorded.
    pub fn to_divide(&self, dividend: impl Into<BigInt>) -> Result<bool, Interruption> {
        let (dividend, n) = (dividend.into(), self.subject());
        let divides = numeric::big_divides(&n, &dividend).ok_or(Interruption::DivisionByZero)?;
        Ok(self.base.check(
            divides,
            || format!("n divides {}", render(&dividend)),
            || format!("expected value to divide {}, but {} doesn't", render(&dividend), render(&n)),
        ))
    }

    pub fn to_be_prime(&self) -> bool {
        let n = self.subject();
        let primality = numeric::primality(&n);
        self.base.check(
            primality == Primality::Prime,
            || "n is prime".to_string(),
            || match &primality {
                Primality::Composite { factor: Some(factor) } => format!(
                    "expected value to be prime, but {} isn't because it is divisible by {}",
                    render(&n),
                    render(factor)
                ),
                _ => format!("expected value to be prime, but {} isn't", render(&n)),
            },
        )
    }

    pub fn to_be_composite(&self) -> bool {
        let n = self.subject();
        let primality = numeric::primality(&n);
        self.base.check(
            matches!(primality, Primality::Composite { .. }),
            || "n is composite".to_string(),
            || match primality {
                Primality::Prime => format!("expected value to be composite, but {} is prime", render(&n)),
                _ => format!(
                    "expected value to be composite, but {} is neither prime nor composite",
                    render(&n)
                ),
            },
        )
    }
}
