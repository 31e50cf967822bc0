//! Numeric helpers behind number, bigint and numeric-text assertions.

use std::ops::RangeInclusive;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

/// Radixes accepted by base-N numeric text checks.
pub const RADIX_RANGE: RangeInclusive<u32> = 2..=32;

/// Primality classification of an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primality {
    Prime,
    /// Divisible by `factor` (the smallest factor above 1 below [`EXACT_LIMIT`]); `None` when the bounded search
    /// gave up.
    Composite { factor: Option<BigInt> },
    /// Not an integer above 1.
    Neither,
}

/// Classify an arbitrary-precision integer.
///
/// ## Returns
/// - [`Primality::Neither`] for `n <= 1`.
/// - [`Primality::Composite`] with the smallest factor (2 for even numbers).
/// - [`Primality::Prime`] otherwise.
///
/// ## Notes
/// - Below [`EXACT_LIMIT`] trial division settles everything, so the factor is always the smallest.
/// - Above it, Miller-Rabin decides primality. A composite's factor comes from trial division over the first
///   [`FACTOR_SEARCH_LIMIT`] odd candidates, then a bounded Pollard rho; the rho factor need not be the smallest,
///   and when both give up the factor is `None`.
pub fn primality(n: &BigInt) -> Primality {
    if n <= &BigInt::one() {
        return Primality::Neither;
    }
    if let Some(small) = n.to_u64().filter(|&small| small < EXACT_LIMIT) {
        return match smallest_factor_u64(small) {
            Some(factor) => Primality::Composite {
                factor: Some(BigInt::from(factor)),
            },
            None => Primality::Prime,
        };
    }
    if is_probable_prime(n) {
        return Primality::Prime;
    }
    Primality::Composite {
        factor: find_factor(n),
    }
}

/// Classify a float; non-integral and non-finite values are [`Primality::Neither`].
pub fn primality_f64(x: f64) -> Primality {
    if !is_integer(x) {
        return Primality::Neither;
    }
    match BigInt::from_f64(x) {
        Some(n) => primality(&n),
        None => Primality::Neither,
    }
}

pub fn is_integer(x: f64) -> bool {
    x.is_finite() && x.trunc() == x
}

/// Integers below this are classified by trial division alone.
pub const EXACT_LIMIT: u64 = 1 << 40;

/// Odd trial divisors tried on large composites before Pollard rho.
pub const FACTOR_SEARCH_LIMIT: u64 = 1 << 20;

/// Pollard rho steps per polynomial, and polynomials tried.
const RHO_STEPS: usize = 1 << 16;
const RHO_POLYNOMIALS: u32 = 4;
const RHO_BATCH: usize = 64;

/// Miller-Rabin witnesses; exact below 3.3 * 10^24, a strong probable-prime test above.
const WITNESSES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

fn smallest_factor_u64(n: u64) -> Option<u64> {
    if n % 2 == 0 {
        return (n != 2).then_some(2);
    }
    let mut candidate = 3u64;
    while candidate <= n / candidate {
        if n % candidate == 0 {
            return Some(candidate);
        }
        candidate += 2;
    }
    None
}

/// Miller-Rabin over [`WITNESSES`]; `n` must exceed every witness.
fn is_probable_prime(n: &BigInt) -> bool {
    if (n % 2u32).is_zero() {
        return false;
    }
    let one = BigInt::one();
    let two = BigInt::from(2);
    let n_minus_one = n - &one;
    let shift = n_minus_one.trailing_zeros().unwrap_or(0);
    let odd = &n_minus_one >> shift;

    WITNESSES.iter().all(|&witness| {
        let mut x = BigInt::from(witness).modpow(&odd, n);
        if x == one || x == n_minus_one {
            return true;
        }
        for _ in 1..shift {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                return true;
            }
        }
        false
    })
}

/// A nontrivial factor of the composite `n`, if a bounded search finds one.
fn find_factor(n: &BigInt) -> Option<BigInt> {
    if (n % 2u32).is_zero() {
        return Some(BigInt::from(2));
    }
    let mut candidate = 3u64;
    for _ in 0..FACTOR_SEARCH_LIMIT {
        if (n % candidate).is_zero() {
            return Some(BigInt::from(candidate));
        }
        candidate += 2;
    }
    (1..=RHO_POLYNOMIALS).find_map(|offset| pollard_rho(n, offset))
}

/// Floyd-cycle Pollard rho with `x^2 + offset`, taking one gcd per batch of steps.
fn pollard_rho(n: &BigInt, offset: u32) -> Option<BigInt> {
    let step = |x: &BigInt| (x * x + offset) % n;
    let (mut tortoise, mut hare) = (BigInt::from(2), BigInt::from(2));
    let mut product = BigInt::one();
    for index in 1..=RHO_STEPS {
        tortoise = step(&tortoise);
        hare = step(&step(&hare));
        product = (product * (&tortoise - &hare).abs()) % n;
        if index % RHO_BATCH != 0 {
            continue;
        }
        let divisor = gcd(product.clone(), n.clone());
        if !divisor.is_one() {
            return (&divisor != n).then_some(divisor);
        }
    }
    None
}

fn gcd(mut a: BigInt, mut b: BigInt) -> BigInt {
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// Whether `d` divides `n` exactly. Zero divides nothing.
pub fn divides(d: f64, n: f64) -> bool {
    d != 0.0 && (n % d) == 0.0
}

/// Exact remainder check for big integers; `None` when `d` is zero.
pub fn big_divides(d: &BigInt, n: &BigInt) -> Option<bool> {
    if d.is_zero() {
        return None;
    }
    Some((n % d.abs()).is_zero())
}

/// First character of `text` that is not a digit in `radix`.
///
/// ## Notes
/// - Signs, separators and whitespace are not digits.
/// - Callers validate `radix` against [`RADIX_RANGE`].
pub fn first_unrecognized_digit(text: &str, radix: u32) -> Option<char> {
    text.chars().find(|c| c.to_digit(radix).is_none())
}

/// Whether a leading prefix of `text` reads as a decimal float.
///
/// Leading whitespace and a sign are allowed, `Infinity` counts, and at least one digit must appear before or
/// after an optional decimal point. Trailing garbage is ignored: `"3.5kg"` is numeric, `"kg"` and `"."` are not.
pub fn parses_as_float_prefix(text: &str) -> bool {
    let trimmed = text.trim_start();
    let unsigned = trimmed
        .strip_prefix('+')
        .or_else(|| trimmed.strip_prefix('-'))
        .unwrap_or(trimmed);
    if unsigned.starts_with("Infinity") {
        return true;
    }
    let integral = leading_digits(unsigned);
    let fractional = unsigned[integral..]
        .strip_prefix('.')
        .map_or(0, leading_digits);
    integral + fractional > 0
}

fn leading_digits(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}
