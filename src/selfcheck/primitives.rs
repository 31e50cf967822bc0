use num_bigint::BigInt;
use regex::Regex;

use crate::assertion::Assert;
use crate::expect::expect_factory;
use crate::test::Test;

pub(super) fn number_tests() -> Vec<Test> {
    vec![
        Test::new("Less than (or equal to)", |e| {
            e.expect(1).named("1 < 2").number()?.to_be_less_than(2);
            e.expect(1).named("1 <= 2").number()?.to_be_at_most(2);
            e.expect(1).named("1 <= 1").number()?.to_be_at_most(1);
            Ok(())
        }),
        Test::new("Greater than (or equal to)", |e| {
            e.expect(2).named("2 > 1").number()?.to_be_greater_than(1);
            e.expect(2).named("2 >= 1").number()?.to_be_at_least(1);
            e.expect(1).named("1 >= 1").number()?.to_be_at_least(1);
            Ok(())
        }),
        Test::new("Divisibility", |e| {
            e.expect(3).named("3 is an integer").number()?.to_be_an_integer();
            e.expect(111).named("111 is divisible by 37").number()?.to_be_divisible_by(37);
            e.expect(37).named("37 divides 111").number()?.to_divide(111);
            e.expect(37).named("37 is prime").number()?.to_be_prime();
            e.expect(39).named("39 isn't prime").number()?.to_be_composite();
            Ok(())
        }),
        Test::new("Neither prime nor composite", |e| {
            let (scratch, _) = expect_factory();
            for n in [-7.0, 0.0, 1.0, 2.5] {
                let neither = !scratch.expect(n).number()?.to_be_prime() && !scratch.expect(n).number()?.to_be_composite();
                e.expect(neither).named(format!("{n} is neither prime nor composite")).to_be(true);
            }
            Ok(())
        }),
    ]
}

pub(super) fn big_int_tests() -> Vec<Test> {
    vec![
        Test::new("Less than (or equal to)", |e| {
            e.expect(BigInt::from(1)).auto_named().big_int()?.to_be_less_than(2);
            e.expect(BigInt::from(1)).auto_named().big_int()?.to_be_at_most(2);
            e.expect(BigInt::from(1)).auto_named().big_int()?.to_be_at_most(1);
            Ok(())
        }),
        Test::new("Greater than (or equal to)", |e| {
            e.expect(BigInt::from(2)).auto_named().big_int()?.to_be_greater_than(1);
            e.expect(BigInt::from(2)).auto_named().big_int()?.to_be_at_least(1);
            e.expect(BigInt::from(1)).auto_named().big_int()?.to_be_at_least(1);
            Ok(())
        }),
        Test::new("Divisibility", |e| {
            e.expect(BigInt::from(111)).auto_named().big_int()?.to_be_divisible_by(37)?;
            e.expect(BigInt::from(37)).auto_named().big_int()?.to_divide(111)?;
            e.expect(BigInt::from(37)).auto_named().big_int()?.to_be_prime();
            e.expect(BigInt::from(39)).auto_named().big_int()?.to_be_composite();
            let mersenne = (BigInt::from(1) << 31u32) - 1;
            e.expect(mersenne).named("2^31 - 1 is prime").big_int()?.to_be_prime();
            Ok(())
        }),
    ]
}

pub(super) fn text_tests() -> Vec<Test> {
    vec![
        Test::new("Comparing strings", |e| {
            e.expect("aaa").auto_named().text()?.to_come_before("zzz");
            e.expect("zzz").auto_named().text()?.to_come_after("aaa");
            Ok(())
        }),
        Test::new("String formats", |e| {
            e.expect("123").auto_named().text()?.to_be_numeric();
            e.expect("123.456").auto_named().text()?.to_be_numeric();
            e.expect("123456789ABCDEF").auto_named().text()?.to_be_numeric_in(16)?;

            e.expect("Hello").auto_named().text()?.to_contain("ello");
            e.expect("girafarig").auto_named().text()?.to_be_palindromic();

            let uppercase = Regex::new("[A-Z]+")?;
            e.expect("ABC").auto_named().text()?.to_match(uppercase);
            Ok(())
        }),
    ]
}
