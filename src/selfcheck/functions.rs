use std::hint::black_box;

use attest_core::{Callable, ErrorKind, Thrown, Value};
use regex::Regex;

use crate::assertion::{Assert, ThrowExpectation, TimeUnit};
use crate::test::Test;

fn identity() -> Callable {
    Callable::with_arity("identity", 1, |args| Ok(args.first().cloned().unwrap_or(Value::Undefined)))
}

fn square() -> Callable {
    Callable::with_arity("square", 1, |args| match args.first().and_then(Value::as_number) {
        Some(n) => Ok(Value::from(n * n)),
        None => Err(Thrown::new(ErrorKind::TypeError, "n is not a number")),
    })
}

fn throw_if_neg() -> Callable {
    Callable::with_arity("throwIfNeg", 1, |args| {
        let n = args.first().and_then(Value::as_number).unwrap_or_default();
        if n < 0.0 {
            Err(Thrown::new(ErrorKind::RangeError, "n is negative").with_cause(n))
        } else {
            Ok(Value::Undefined)
        }
    })
}

fn sum_below(limit: u64) -> u64 {
    (0..black_box(limit)).fold(0, |sum, i| sum.wrapping_add(i))
}

pub(super) fn tests() -> Vec<Test> {
    vec![
        Test::new("Non-argument function", |e| {
            e.expect(Callable::from_fn("one", || 1)).auto_named().callable()?.to_return(1)?;
            Ok(())
        }),
        Test::new("Argument function", |e| {
            e.expect(identity()).auto_named().variadic()?.with_args([1]).to_return(1)?;
            e.expect(square()).auto_named().variadic()?.with_args([2]).to_return(4)?;
            Ok(())
        }),
        Test::new("Timing tests", |e| {
            e.expect(Callable::from_fn("noop", || ()))
                .auto_named()
                .callable()?
                .to_take_at_most(1.0, TimeUnit::Milliseconds)?;
            e.expect(Callable::from_fn("sumBelow", || sum_below(10_000)))
                .auto_named()
                .callable()?
                .to_take_at_most_over(250.0, TimeUnit::Milliseconds, 20)?;
            Ok(())
        }),
        Test::new("Throw detection", |e| {
            let negative = Regex::new("negative")?;
            let is_negative = Regex::new("is negative")?;
            let throwing = || e.expect(throw_if_neg()).auto_named().variadic().map(|f| f.with_args([-1]));

            throwing()?.to_throw(ErrorKind::Error);
            throwing()?.to_throw(ErrorKind::RangeError);
            throwing()?.to_throw(ThrowExpectation::new(ErrorKind::Error).with_message("n is negative"));
            throwing()?.to_throw(ThrowExpectation::new(ErrorKind::Error).with_message_matching(negative));
            throwing()?.to_throw(ThrowExpectation::new(ErrorKind::Error).with_cause(-1));
            throwing()?.to_throw(
                ThrowExpectation::new(ErrorKind::Error)
                    .with_message_matching(is_negative)
                    .with_cause(-1),
            );
            Ok(())
        }),
        Test::new_async("Awaited result", |e| async move {
            let answer = tokio::task::spawn_blocking(|| 6 * 7).await?;
            e.expect(answer).named("awaited value is 42").to_be(42);
            Ok(())
        }),
    ]
}
