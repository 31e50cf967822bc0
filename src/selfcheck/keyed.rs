use attest_core::Value;
use regex::Regex;

use crate::assertion::{Assert, Assertion, Interruption};
use crate::test::Test;

type Narrow<T> = fn(Assertion) -> Result<T, Interruption>;

/// The same three tests run against a map and an object, narrowed with `narrow`.
macro_rules! keyed_tests {
    ($subject:expr, $narrow:expr) => {{
        let narrow = $narrow;
        vec![
            Test::new("Key tests", move |e| {
                let lowercase = Regex::new("[a-z]")?;
                narrow(e.expect($subject).auto_named())?.to_have_key("a");
                narrow(e.expect($subject).auto_named())?
                    .for_all_keys(|key| Ok(key.text()?.to_match(&lowercase)))?;
                narrow(e.expect($subject).auto_named())?.for_some_keys(|key| Ok(key.to_be("c")))?;
                Ok(())
            }),
            Test::new("Value tests", move |e| {
                narrow(e.expect($subject).auto_named())?.to_have_value(1);
                narrow(e.expect($subject).auto_named())?
                    .for_all_values(|value| Ok(value.auto_named().number()?.to_be_at_least(0)))?;
                narrow(e.expect($subject).auto_named())?
                    .for_some_values(|value| Ok(value.auto_named().number()?.to_be_prime()))?;
                Ok(())
            }),
            Test::new("Entry tests", move |e| {
                narrow(e.expect($subject).auto_named())?.to_have_entry("a", 1);
                narrow(e.expect($subject).auto_named())?.to_be_of_size(3);
                Ok(())
            }),
        ]
    }};
}

fn abc_map() -> Value {
    Value::map([("a", 1), ("b", 2), ("c", 3)])
}

fn abc_object() -> Value {
    Value::record([("a", 1), ("b", 2), ("c", 3)])
}

pub(super) fn map_tests() -> Vec<Test> {
    let narrow: Narrow<_> = Assertion::map;
    keyed_tests!(abc_map(), narrow)
}

pub(super) fn object_tests() -> Vec<Test> {
    let narrow: Narrow<_> = Assertion::object;
    keyed_tests!(abc_object(), narrow)
}
