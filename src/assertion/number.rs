//! Ordering, integrality, divisibility and primality checks for numbers.

use attest_core::format;
use attest_core::numeric::{self, Primality};

use super::{ValueAssertion, impl_assert};

#[derive(Debug, Clone)]
pub struct NumberAssertion {
    base: ValueAssertion,
}

impl_assert!(NumberAssertion);

impl NumberAssertion {
    pub(crate) fn new(base: ValueAssertion) -> Self {
        Self { base }
    }

    fn subject(&self) -> f64 {
        self.base.value().as_number().unwrap_or(f64::NAN)
    }

    fn compare(&self, bound: f64, symbol: &str, word: &str, holds: bool) -> bool {
        let bound = format::number(bound);
        self.base.check(
            holds,
            || format!("x {symbol} {bound}"),
            || format!("expected value {word} {bound}, but {} isn't", format::number(self.subject())),
        )
    }

    pub fn to_be_less_than(&self, bound: impl Into<f64>) -> bool {
        let bound = bound.into();
        self.compare(bound, "<", "<", self.subject() < bound)
    }

    pub fn to_be_at_most(&self, bound: impl Into<f64>) -> bool {
        let bound = bound.into();
        self.compare(bound, "≤", "<=", self.subject() <= bound)
    }

    pub fn to_be_greater_than(&self, bound: impl Into<f64>) -> bool {
        let bound = bound.into();
        self.compare(bound, ">", ">", self.subject() > bound)
    }

    pub fn to_be_at_least(&self, bound: impl Into<f64>) -> bool {
        let bound = bound.into();
        self.compare(bound, "≥", ">=", self.subject() >= bound)
    }

    pub fn to_be_an_integer(&self) -> bool {
        let x = self.subject();
        self.base.check(
            numeric::is_integer(x),
            || "x is an integer".to_string(),
            || format!("expected value to be an integer, but {} isn't", format::number(x)),
        )
    }

    /// Pass iff `divisor` divides the subject exactly. Zero divides nothing.
    pub fn to_be_divisible_by(&self, divisor: impl Into<f64>) -> bool {
        let (divisor, x) = (divisor.into(), self.subject());
        self.base.check(
            numeric::divides(divisor, x),
            || format!("{} divides x", format::number(divisor)),
            || {
                format!(
                    "expected value to be divisible by {}, but {} isn't",
                    format::number(divisor),
                    format::number(x)
                )
            },
        )
    }

    /// Pass iff the subject divides `dividend` exactly.
    pub fn to_divide(&self, dividend: impl Into<f64>) -> bool {
        let (dividend, x) = (dividend.into(), self.subject());
        self.base.check(
            numeric::divides(x, dividend),
            || format!("x divides {}", format::number(dividend)),
            || {
                format!(
                    "expected value to divide {}, but {} doesn't",
                    format::number(dividend),
                    format::number(x)
                )
            },
        )
    }

    /// Pass iff the subject is an integer above 1 with no factor besides 1 and itself.
    pub fn to_be_prime(&self) -> bool {
        let x = self.subject();
        let primality = numeric::primality_f64(x);
        self.base.check(
            primality == Primality::Prime,
            || "x is prime".to_string(),
            || match &primality {
                Primality::Composite { factor: Some(factor) } => format!(
                    "expected value to be prime, but {} isn't because it is divisible by {factor}",
                    format::number(x)
                ),
                _ => format!("expected value to be prime, but {} isn't", format::number(x)),
            },
        )
    }

    /// Pass iff the subject is an integer above 1 that is not prime.
    pub fn to_be_composite(&self) -> bool {
        let x = self.subject();
        let primality = numeric::primality_f64(x);
        let composite = matches!(primality, Primality::Composite { .. });
        self.base.check(
            composite,
            || "x is composite".to_string(),
            || match primality {
                Primality::Prime => format!("expected value to be composite, but {} is prime", format::number(x)),
                _ => format!(
                    "expected value to be composite, but {} is neither prime nor composite",
                    format::number(x)
                ),
            },
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::assertion::Assert;
    use crate::expect::expect_factory;

    #[test]
    fn ordering_reasons_and_names() {
        let (e, pool) = expect_factory();
        let x = e.expect(3).auto_named().number().unwrap();
        assert!(x.to_be_less_than(4));
        assert!(!x.to_be_at_most(2));
        assert!(x.to_be_at_least(3));
        let outcomes = pool.snapshot();
        assert_eq!(outcomes[0].name(), Some("x < 4"));
        assert_eq!(outcomes[1].name(), Some("x ≤ 2"));
        assert_eq!(outcomes[1].reason(), Some("expected value <= 2, but 3 isn't"));
        assert_eq!(outcomes[2].name(), Some("x ≥ 3"));
    }

    #[test]
    fn nan_satisfies_no_ordering() {
        let (e, _) = expect_factory();
        let x = e.expect(f64::NAN).number().unwrap();
        assert!(!x.to_be_less_than(0));
        assert!(!x.to_be_at_least(0));
        assert!(!x.to_be_an_integer());
        assert!(!x.to_be_prime());
        assert!(!x.to_be_composite());
    }

    #[test]
    fn primality_reasons() {
        let (e, pool) = expect_factory();
        assert!(!e.expect(9).number().unwrap().to_be_prime());
        assert!(!e.expect(7).number().unwrap().to_be_composite());
        assert!(!e.expect(1).number().unwrap().to_be_composite());
        assert!(e.expect(2).number().unwrap().to_be_prime());
        let outcomes = pool.snapshot();
        assert_eq!(
            outcomes[0].reason(),
            Some("expected value to be prime, but 9 isn't because it is divisible by 3")
        );
        assert_eq!(outcomes[1].reason(), Some("expected value to be composite, but 7 is prime"));
        assert_eq!(
            outcomes[2].reason(),
            Some("expected value to be composite, but 1 is neither prime nor composite")
        );
    }

    #[test]
    fn divisibility() {
        let (e, pool) = expect_factory();
        let x = e.expect(12).auto_named().number().unwrap();
        assert!(x.to_be_divisible_by(4));
        assert!(!x.to_be_divisible_by(0));
        assert!(x.to_divide(36));
        assert!(!x.to_divide(5));
        let outcomes = pool.snapshot();
        assert_eq!(outcomes[0].name(), Some("4 divides x"));
        assert_eq!(outcomes[2].name(), Some("x divides 36"));
        assert_eq!(outcomes[3].reason(), Some("expected value to divide 5, but 12 doesn't"));
    }
}
