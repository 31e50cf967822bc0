//! Key, value, entry and size checks for maps and keyed records.

use attest_core::{Value, deep_equals, format};

use super::quantifier::{ElementRun, Wording};
use super::{Assertion, Interruption, ValueAssertion, impl_assert};
use crate::outcome::Outcome;

fn describe_key(_: usize, key: &Value) -> String {
    format!("key {}", format::single(key))
}

fn describe_value(_: usize, value: &Value) -> String {
    format!("value {}", format::single(value))
}

const KEY_WORDING: Wording = Wording {
    plural: "keys",
    describe: describe_key,
};

const VALUE_WORDING: Wording = Wording {
    plural: "values",
    describe: describe_value,
};

/// Entries of a map or record, keys lifted to [`Value`]s.
struct Entries {
    noun: &'static str,
    keys: Vec<Value>,
    values: Vec<Value>,
}

impl Entries {
    fn of(value: &Value) -> Self {
        match value {
            Value::Map(entries) => Self {
                noun: "map",
                keys: entries.iter().map(|(key, _)| key.clone()).collect(),
                values: entries.iter().map(|(_, value)| value.clone()).collect(),
            },
            Value::Object(entries) => Self {
                noun: "object",
                keys: entries.iter().map(|(key, _)| Value::from(key)).collect(),
                values: entries.iter().map(|(_, value)| value.clone()).collect(),
            },
            _ => Self {
                noun: "object",
                keys: Vec::new(),
                values: Vec::new(),
            },
        }
    }

    fn lookup(&self, key: &Value) -> Option<&Value> {
        self.keys
            .iter()
            .position(|candidate| deep_equals(candidate, key))
            .and_then(|index| self.values.get(index))
    }

    fn to_have_key(&self, base: &ValueAssertion, key: Value) -> bool {
        base.check(
            self.lookup(&key).is_some(),
            || format!("given {} has key {}", self.noun, format::single(&key)),
            || format!("{} does not have key {}", self.noun, format::single(&key)),
        )
    }

    fn to_have_value(&self, base: &ValueAssertion, value: Value) -> bool {
        base.check(
            self.values.iter().any(|candidate| deep_equals(candidate, &value)),
            || format!("given {} has value {}", self.noun, format::single(&value)),
            || format!("{} does not have value {}", self.noun, format::single(&value)),
        )
    }

    fn to_have_entry(&self, base: &ValueAssertion, key: Value, value: Value) -> bool {
        let outcome = match self.lookup(&key) {
            Some(found) if deep_equals(found, &value) => Outcome::pass(),
            Some(_) => Outcome::fail(format!(
                "{} does have key {}, but it does not map to {}",
                self.noun,
                format::single(&key),
                format::single(&value)
            )),
            None => Outcome::fail(format!("{} does not have key {}", self.noun, format::single(&key))),
        };
        base.record(
            || {
                format!(
                    "given {} has {} -> {}",
                    self.noun,
                    format::single(&key),
                    format::single(&value)
                )
            },
            outcome,
        )
    }

    fn to_be_of_size(&self, base: &ValueAssertion, size: usize) -> bool {
        let actual = self.keys.len();
        base.check(
            actual == size,
            || format!("given {} has {size} entries", self.noun),
            || format!("{} has {actual} entries, not {size}", self.noun),
        )
    }
}

macro_rules! keyed_assertion {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            base: ValueAssertion,
        }

        impl_assert!($name);

        impl $name {
            pub(crate) fn new(base: ValueAssertion) -> Self {
                Self { base }
            }

            fn entries(&self) -> Entries {
                Entries::of(self.base.value())
            }

            pub fn to_have_key(&self, key: impl Into<Value>) -> bool {
                self.entries().to_have_key(&self.base, key.into())
            }

            pub fn to_have_value(&self, value: impl Into<Value>) -> bool {
                self.entries().to_have_value(&self.base, value.into())
            }

            /// Pass iff `key` is present and maps to a value deep-equal to `value`.
            pub fn to_have_entry(&self, key: impl Into<Value>, value: impl Into<Value>) -> bool {
                self.entries().to_have_entry(&self.base, key.into(), value.into())
            }

            pub fn to_be_of_size(&self, size: usize) -> bool {
                self.entries().to_be_of_size(&self.base, size)
            }

            pub fn for_all_keys<F, R>(&self, mut assertion: F) -> Result<bool, Interruption>
            where
                F: FnMut(Assertion) -> Result<R, Interruption>,
            {
                let keys = self.entries().keys;
                let run = ElementRun::collect(&keys, |key, _| assertion(key))?;
                Ok(run.for_all(&self.base, &keys, &KEY_WORDING))
            }

            pub fn for_some_keys<F, R>(&self, mut assertion: F) -> Result<bool, Interruption>
            where
                F: FnMut(Assertion) -> Result<R, Interruption>,
            {
                let keys = self.entries().keys;
                let run = ElementRun::collect(&keys, |key, _| assertion(key))?;
                Ok(run.for_some(&self.base, &KEY_WORDING))
            }

            pub fn for_all_values<F, R>(&self, mut assertion: F) -> Result<bool, Interruption>
            where
                F: FnMut(Assertion) -> Result<R, Interruption>,
            {
                let values = self.entries().values;
                let run = ElementRun::collect(&values, |value, _| assertion(value))?;
                Ok(run.for_all(&self.base, &values, &VALUE_WORDING))
            }

            pub fn for_some_values<F, R>(&self, mut assertion: F) -> Result<bool, Interruption>
            where
                F: FnMut(Assertion) -> Result<R, Interruption>,
            {
                let values = self.entries().values;
                let run = ElementRun::collect(&values, |value, _| assertion(value))?;
                Ok(run.for_some(&self.base, &VALUE_WORDING))
            }
        }
    };
}

keyed_assertion!(
    /// Assertions on an insertion-ordered map. Keys are matched by deep equality.
    MapAssertion
);

keyed_assertion!(
    /// Assertions on a keyed record with text keys.
    ObjectAssertion
);
