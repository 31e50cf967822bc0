use crate::assertion::Assert;
use crate::test::Test;

pub(super) fn tests() -> Vec<Test> {
    vec![
        Test::new("Addition", |e| {
            e.expect(1 + 1).named("1 + 1 = 2").to_be(2);
            e.expect(2 + 2).named("2 + 2 = 4").to_be(4);
            e.expect(4 + 4).named("4 + 4 = 8").to_be(8);
            e.expect(8 + 8).named("8 + 8 = 16").to_be(16);

            e.expect(8 + -2).named("8 + -2 = 6").to_be(6);
            e.expect(8 + -2).named("8 + -2 ≠ 10").to_not_be(10);
            Ok(())
        }),
        Test::new("Subtraction", |e| {
            e.expect(3 - 2).named("3 - 2 = 1").to_be(1);
            e.expect(3 - 2).named("3 - 2 ≠ 2").to_not_be(2);
            Ok(())
        }),
        Test::new("Multiplication", |e| {
            e.expect(3 * 5).named("3 * 5 = 15").to_be(15);
            e.expect(3 * 5).named("3 * 5 ≠ 20").to_not_be(20);
            e.expect(0.1 * 3.0).named("0.1 * 3 is not exactly 0.3").to_not_be(0.3);
            Ok(())
        }),
    ]
}
