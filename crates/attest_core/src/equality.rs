//! Structural deep equality over [`Value`]s.
//!
//! ## Notes
//! - NaN equals NaN here, so the relation stays reflexive for every value except invalid dates.
//! - Values of different runtime categories are never equal (`1` vs `1n`, `[1]` vs `{ 0: 1 }`).
//! - Recursion is bounded by [`MAX_DEPTH`]; deeper structures compare unequal instead of overflowing the stack.

use crate::value::{NumericBuffer, Value};

/// Deepest nesting compared before giving up.
pub const MAX_DEPTH: usize = 256;

/// Compare two values structurally.
///
/// ## Parameters
/// - `lhs`, `rhs`: values to compare.
///
/// ## Returns
/// - `true` when both values share a category and agree element-wise, entry-wise or by value.
///
/// ## Notes
/// - Sequences and buffers compare in order; sets compare by size and membership both ways; maps and records by
///   key set and per-key value in both directions, ignoring insertion order.
/// - Dates are equal only when both are valid and denote the same instant.
/// - Callables and patterns compare by identity.
pub fn deep_equals(lhs: &Value, rhs: &Value) -> bool {
    equals_at(lhs, rhs, 0)
}

fn equals_at(lhs: &Value, rhs: &Value, depth: usize) -> bool {
    if depth > MAX_DEPTH {
        return false;
    }
    let next = depth + 1;
    match (lhs, rhs) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(*a, *b),
        (Value::BigInt(a), Value::BigInt(b)) => a == b,
        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::Sequence(a), Value::Sequence(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| equals_at(x, y, next))
        }
        (Value::Set(a), Value::Set(b)) => {
            let contained = |xs: &[Value], ys: &[Value]| xs.iter().all(|x| ys.iter().any(|y| equals_at(x, y, next)));
            a.len() == b.len() && contained(a, b) && contained(b, a)
        }
        (Value::Map(a), Value::Map(b)) => {
            let contained = |xs: &[(Value, Value)], ys: &[(Value, Value)]| {
                xs.iter().all(|(key, value)| {
                    ys.iter()
                        .find(|(other, _)| equals_at(key, other, next))
                        .is_some_and(|(_, other)| equals_at(value, other, next))
                })
            };
            a.len() == b.len() && contained(a, b) && contained(b, a)
        }
        (Value::Object(a), Value::Object(b)) => {
            let contained = |xs: &[(String, Value)], ys: &[(String, Value)]| {
                xs.iter().all(|(key, value)| {
                    ys.iter()
                        .find(|(other, _)| key == other)
                        .is_some_and(|(_, other)| equals_at(value, other, next))
                })
            };
            a.len() == b.len() && contained(a, b) && contained(b, a)
        }
        (Value::Buffer(a), Value::Buffer(b)) => buffers_equal(a, b),
        (Value::Date(a), Value::Date(b)) => match (a.datetime(), b.datetime()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
        (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
        (Value::Pattern(a), Value::Pattern(b)) => a.ptr_eq(b),
        (Value::Error(a), Value::Error(b)) => {
            a.kind == b.kind
                && a.message == b.message
                && match (a.cause(), b.cause()) {
                    (None, None) => true,
                    (Some(x), Some(y)) => equals_at(x, y, next),
                    _ => false,
                }
        }
        _ => false,
    }
}

fn numbers_equal(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn buffers_equal(a: &NumericBuffer, b: &NumericBuffer) -> bool {
    a.kind() == b.kind()
        && a.len() == b.len()
        && a.to_f64_vec()
            .into_iter()
            .zip(b.to_f64_vec())
            .all(|(x, y)| numbers_equal(x, y))
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use proptest::prelude::*;

    use super::*;
    use crate::value::{Callable, DateValue};

    #[test]
    fn primitives() {
        assert!(deep_equals(&1.into(), &1.0.into()));
        assert!(deep_equals(&0.0.into(), &(-0.0).into()));
        assert!(deep_equals(&f64::NAN.into(), &f64::NAN.into()));
        assert!(!deep_equals(&1.into(), &BigInt::from(1).into()));
        assert!(!deep_equals(&Value::Null, &Value::Undefined));
        assert!(!deep_equals(&"1".into(), &1.into()));
    }

    #[test]
    fn sequences_are_ordered() {
        assert!(deep_equals(&vec![1, 2, 3].into(), &vec![1, 2, 3].into()));
        assert!(!deep_equals(&vec![1, 2, 3].into(), &vec![3, 2, 1].into()));
        assert!(!deep_equals(&vec![1, 2].into(), &vec![1, 2, 3].into()));
    }

    #[test]
    fn sets_and_maps_ignore_order() {
        assert!(deep_equals(&Value::set([1, 2, 3]), &Value::set([3, 1, 2])));
        assert!(!deep_equals(&Value::set([1, 2]), &Value::set([1, 2, 3])));
        assert!(deep_equals(
            &Value::map([("a", 1), ("b", 2)]),
            &Value::map([("b", 2), ("a", 1)])
        ));
        assert!(!deep_equals(
            &Value::map([("a", 1), ("b", 2)]),
            &Value::map([("a", 1), ("b", 3)])
        ));
        assert!(deep_equals(
            &Value::record([("x", vec![1, 2]), ("y", vec![3])]),
            &Value::record([("y", vec![3]), ("x", vec![1, 2])])
        ));
    }

    #[test]
    fn raw_collections_with_repeats_compare_both_ways() {
        let repeated = Value::Set(vec![1.into(), 1.into()]);
        let distinct = Value::Set(vec![1.into(), 2.into()]);
        assert!(!deep_equals(&repeated, &distinct));
        assert!(!deep_equals(&distinct, &repeated));

        let repeated = Value::Map(vec![("a".into(), 1.into()), ("a".into(), 1.into())]);
        let distinct = Value::map([("a", 1), ("b", 1)]);
        assert!(!deep_equals(&repeated, &distinct));
        assert!(!deep_equals(&distinct, &repeated));

        let repeated = Value::Object(vec![("a".to_string(), 1.into()), ("a".to_string(), 1.into())]);
        let distinct = Value::record([("a", 1), ("b", 1)]);
        assert!(!deep_equals(&repeated, &distinct));
        assert!(!deep_equals(&distinct, &repeated));
    }

    #[test]
    fn records_never_equal_sequences() {
        assert!(!deep_equals(&Value::record([("0", 1)]), &vec![1].into()));
        assert!(!deep_equals(&Value::map([("a", 1)]), &Value::record([("a", 1)])));
    }

    #[test]
    fn buffers_compare_kind_and_elements() {
        let a = Value::Buffer(NumericBuffer::Uint8(vec![1, 2]));
        let b = Value::Buffer(NumericBuffer::Uint16(vec![1, 2]));
        assert!(deep_equals(&a, &a.clone()));
        assert!(!deep_equals(&a, &b));
    }

    #[test]
    fn dates() {
        let a = DateValue::parse("2024-02-14T10:00:00+01:00");
        let b = DateValue::parse("2024-02-14T09:00:00Z");
        assert!(deep_equals(&a.into(), &b.into()));
        assert!(!deep_equals(&DateValue::invalid().into(), &DateValue::invalid().into()));
    }

    #[test]
    fn callables_compare_by_identity() {
        let f = Callable::from_fn("f", || 1);
        let g = Callable::from_fn("f", || 1);
        assert!(deep_equals(&f.clone().into(), &f.clone().into()));
        assert!(!deep_equals(&f.into(), &g.into()));
    }

    #[test]
    fn depth_limit_fails_closed() {
        let mut deep = Value::from(1);
        for _ in 0..(MAX_DEPTH + 8) {
            deep = Value::Sequence(vec![deep]);
        }
        assert!(!deep_equals(&deep, &deep.clone()));
    }

    // ========================================================================
    // Properties
    // ========================================================================

    fn leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<f64>().prop_map(Value::Number),
            any::<bool>().prop_map(Value::Bool),
            "[a-z]{0,6}".prop_map(Value::Text),
            any::<i64>().prop_map(|n| Value::BigInt(BigInt::from(n))),
            Just(Value::Null),
        ]
    }

    fn nested() -> impl Strategy<Value = Value> {
        leaf().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::set),
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Set),
                prop::collection::vec((inner.clone(), inner.clone()), 0..3).prop_map(Value::Map),
                prop::collection::vec(("[a-c]", inner.clone()), 0..4).prop_map(Value::record),
                prop::collection::vec(("[a-c]", inner), 0..4).prop_map(Value::Object),
            ]
        })
    }

    proptest! {
        #[test]
        fn reflexive(value in nested()) {
            prop_assert!(deep_equals(&value, &value.clone()));
        }

        #[test]
        fn symmetric(a in nested(), b in nested()) {
            prop_assert_eq!(deep_equals(&a, &b), deep_equals(&b, &a));
        }
    }
}
