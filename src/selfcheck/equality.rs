use attest_core::Value;

use crate::assertion::Assert;
use crate::test::Test;

fn record<const N: usize>(entries: [(&str, i32); N]) -> Value {
    Value::record(entries)
}

pub(super) fn tests() -> Vec<Test> {
    vec![
        Test::new("Arrays", |e| {
            e.expect([1, 2, 3]).named("Equal arrays").to_be([1, 2, 3]);
            e.expect([1, 2, 3]).named("Unequal arrays").to_not_be([1, 2, 4]);

            e.expect([1, 2, 3]).named("Fewer entries").to_not_be([1, 2]);
            e.expect([1, 2, 3]).named("Extra entry").to_not_be([1, 2, 3, 4]);
            e.expect(vec![vec![1], vec![2, 3]]).named("Nested arrays").to_be(vec![vec![1], vec![2, 3]]);
            Ok(())
        }),
        Test::new("Other objects", |e| {
            let abc = record([("a", 1), ("b", 2), ("c", 3)]);
            e.expect(&abc).named("Equal objects").to_be(record([("a", 1), ("b", 2), ("c", 3)]));
            e.expect(&abc).named("Reordered keys").to_be(record([("c", 3), ("a", 1), ("b", 2)]));
            e.expect(&abc).named("Unequal value").to_not_be(record([("a", 1), ("b", 4), ("c", 3)]));

            e.expect(&abc).named("Different key").to_not_be(record([("a", 1), ("b", 2), ("d", 3)]));
            e.expect(record([("a", 1), ("b", 2), ("d", 3)]))
                .named("Different key (swapped)")
                .to_not_be(&abc);

            e.expect(&abc).named("Missing key").to_not_be(record([("a", 1), ("b", 2)]));
            e.expect(record([("a", 1), ("b", 2)])).named("Missing key (swapped)").to_not_be(&abc);

            e.expect(&abc)
                .named("Additional key")
                .to_not_be(record([("a", 1), ("b", 2), ("c", 3), ("d", 4)]));
            e.expect(record([("a", 1), ("b", 2), ("c", 3), ("d", 4)]))
                .named("Additional key (swapped)")
                .to_not_be(&abc);
            Ok(())
        }),
        Test::new("Across categories", |e| {
            e.expect(1).named("Number is not a string").to_not_be("1");
            e.expect(Value::Null).named("Null is not undefined").to_not_be(Value::Undefined);
            e.expect(f64::NAN).named("NaN equals NaN").to_be(f64::NAN);
            e.expect(Value::set([1, 2])).named("Set is not an array").to_not_be([1, 2]);
            Ok(())
        }),
    ]
}
