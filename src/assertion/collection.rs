//! Assertions over ordered sequences, numeric buffers and sets.

use std::borrow::Cow;

use attest_core::format::{self, Connective};
use attest_core::{Value, deep_equals};

use super::quantifier::{ElementRun, Wording};
use super::{Assertion, Interruption, ValueAssertion, impl_assert};
use crate::outcome::Outcome;

fn describe_indexed_element(index: usize, value: &Value) -> String {
    format!("element #{} ({})", index + 1, format::single(value))
}

fn describe_indexed_entry(index: usize, value: &Value) -> String {
    format!("entry #{} ({})", index + 1, format::single(value))
}

fn describe_element(_: usize, value: &Value) -> String {
    format!("element {}", format::single(value))
}

const SEQUENCE_WORDING: Wording = Wording {
    plural: "elements",
    describe: describe_indexed_element,
};

const BUFFER_WORDING: Wording = Wording {
    plural: "entries",
    describe: describe_indexed_entry,
};

const SET_WORDING: Wording = Wording {
    plural: "elements",
    describe: describe_element,
};

fn contains(items: &[Value], wanted: &Value) -> bool {
    items.iter().any(|item| deep_equals(item, wanted))
}

/// Drop values that reappear later in the list, so `(3, 2, 1, 3)` becomes `(2, 1, 3)`.
fn dedupe_keep_last(values: Vec<Value>) -> Vec<Value> {
    values
        .iter()
        .enumerate()
        .filter(|(index, value)| !values[index + 1..].iter().any(|later| deep_equals(later, value)))
        .map(|(_, value)| value.clone())
        .collect()
}

fn collect_values<I>(values: I) -> Vec<Value>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    values.into_iter().map(Into::into).collect()
}

/// Membership checks shared by every collection family.
struct Items<'a> {
    noun: &'static str,
    items: Cow<'a, [Value]>,
}

impl Items<'_> {
    fn to_contain(&self, base: &ValueAssertion, element: Value) -> bool {
        base.check(
            contains(&self.items, &element),
            || format!("given {} contains {}", self.noun, format::single(&element)),
            || {
                format!(
                    "expected {} to contain {}, but {} doesn't",
                    self.noun,
                    format::single(&element),
                    base.rendered()
                )
            },
        )
    }

    fn to_contain_all_of(&self, base: &ValueAssertion, elements: Vec<Value>) -> bool {
        let elements = dedupe_keep_last(elements);
        let missing: Vec<Value> = elements
            .iter()
            .filter(|element| !contains(&self.items, element))
            .cloned()
            .collect();
        base.check(
            missing.is_empty(),
            || format!("given {} contains {}", self.noun, format::sequence(&elements, Connective::And)),
            || format!("{} doesn't contain {}", self.noun, format::sequence(&missing, Connective::And)),
        )
    }

    fn to_contain_some_of(&self, base: &ValueAssertion, elements: Vec<Value>) -> bool {
        let elements = dedupe_keep_last(elements);
        base.check(
            elements.iter().any(|element| contains(&self.items, element)),
            || format!("given {} contains {}", self.noun, format::sequence(&elements, Connective::Or)),
            || format!("{} does not contain {}", self.noun, format::sequence(&elements, Connective::Nor)),
        )
    }

    fn to_be_of_length(&self, base: &ValueAssertion, length: usize) -> bool {
        base.check(
            self.items.len() == length,
            || format!("given {} is of length {length}", self.noun),
            || format!("expected {} of length {length}, but it has length {}", self.noun, self.items.len()),
        )
    }

    fn to_contain_sequence(&self, base: &ValueAssertion, needle: Vec<Value>) -> bool {
        let noun = self.noun;
        let haystack: &[Value] = &self.items;
        let outcome = if needle.is_empty() {
            Outcome::pass_with_note("sequence is empty")
        } else if needle.len() > haystack.len() {
            Outcome::fail(format!(
                "{noun} of length {} can not contain sequence of length {}",
                haystack.len(),
                needle.len()
            ))
        } else {
            let found = haystack
                .windows(needle.len())
                .position(|window| window.iter().zip(&needle).all(|(a, b)| deep_equals(a, b)));
            match found {
                Some(_) if needle.len() == haystack.len() => Outcome::pass_with_note(format!("{noun} is sequence")),
                Some(start) => Outcome::pass_with_note(format!(
                    "sequence is at indices {start}-{}",
                    start + needle.len() - 1
                )),
                None => Outcome::fail(format!("{noun} does not contain sequence")),
            }
        };
        base.record(
            || {
                if needle.is_empty() {
                    format!("given {noun} contains empty sequence")
                } else {
                    format!("given {noun} contains {}", format::sequence(&needle, Connective::Comma))
                }
            },
            outcome,
        )
    }
}

// ============================================================================
// Sequences
// ============================================================================

/// Assertions on an ordered sequence.
#[derive(Debug, Clone)]
pub struct SequenceAssertion {
    base: ValueAssertion,
}

impl_assert!(SequenceAssertion, BufferAssertion, SetAssertion);

impl SequenceAssertion {
    pub(crate) fn new(base: ValueAssertion) -> Self {
        Self { base }
    }

    fn elements(&self) -> &[Value] {
        match self.base.value() {
            Value::Sequence(items) => items,
            _ => &[],
        }
    }

    fn items(&self) -> Items<'_> {
        Items {
            noun: "array",
            items: Cow::Borrowed(self.elements()),
        }
    }

    pub fn to_contain(&self, element: impl Into<Value>) -> bool {
        self.items().to_contain(&self.base, element.into())
    }

    /// Pass iff every given element (duplicates ignored) is present.
    pub fn to_contain_all_of<I>(&self, elements: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.items().to_contain_all_of(&self.base, collect_values(elements))
    }

    /// Pass iff at least one given element is present.
    pub fn to_contain_some_of<I>(&self, elements: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.items().to_contain_some_of(&self.base, collect_values(elements))
    }

    pub fn to_be_of_length(&self, length: usize) -> bool {
        self.items().to_be_of_length(&self.base, length)
    }

    /// Pass iff the elements appear contiguously and in order. The empty sequence is always contained.
    pub fn to_contain_sequence<I>(&self, sequence: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.items().to_contain_sequence(&self.base, collect_values(sequence))
    }

    /// Run `assertion` on every element (with its index); pass iff none of the nested outcomes failed.
    pub fn for_all_elements<F, R>(&self, assertion: F) -> Result<bool, Interruption>
    where
        F: FnMut(Assertion, usize) -> Result<R, Interruption>,
    {
        let items = self.elements();
        Ok(ElementRun::collect(items, assertion)?.for_all(&self.base, items, &SEQUENCE_WORDING))
    }

    /// Run `assertion` on every element (with its index); pass iff any nested outcome passed.
    pub fn for_some_elements<F, R>(&self, assertion: F) -> Result<bool, Interruption>
    where
        F: FnMut(Assertion, usize) -> Result<R, Interruption>,
    {
        Ok(ElementRun::collect(self.elements(), assertion)?.for_some(&self.base, &SEQUENCE_WORDING))
    }
}

// ============================================================================
// Numeric buffers
// ============================================================================

/// Assertions on a fixed-width numeric buffer. Elements are compared as numbers.
#[derive(Debug, Clone)]
pub struct BufferAssertion {
    base: ValueAssertion,
    elements: Vec<Value>,
    noun: &'static str,
}

impl BufferAssertion {
    pub(crate) fn new(base: ValueAssertion) -> Self {
        let (elements, noun) = match base.value() {
            Value::Buffer(buffer) => (buffer.elements(), buffer.kind().as_str()),
            _ => (Vec::new(), "typed array"),
        };
        Self { base, elements, noun }
    }

    fn items(&self) -> Items<'_> {
        Items {
            noun: self.noun,
            items: Cow::Borrowed(&self.elements),
        }
    }

    pub fn to_contain(&self, element: impl Into<Value>) -> bool {
        self.items().to_contain(&self.base, element.into())
    }

    pub fn to_contain_all_of<I>(&self, elements: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.items().to_contain_all_of(&self.base, collect_values(elements))
    }

    pub fn to_contain_some_of<I>(&self, elements: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.items().to_contain_some_of(&self.base, collect_values(elements))
    }

    pub fn to_be_of_length(&self, length: usize) -> bool {
        self.items().to_be_of_length(&self.base, length)
    }

    pub fn to_contain_sequence<I>(&self, sequence: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.items().to_contain_sequence(&self.base, collect_values(sequence))
    }

    pub fn for_all_elements<F, R>(&self, assertion: F) -> Result<bool, Interruption>
    where
        F: FnMut(Assertion, usize) -> Result<R, Interruption>,
    {
        Ok(ElementRun::collect(&self.elements, assertion)?.for_all(&self.base, &self.elements, &BUFFER_WORDING))
    }

    pub fn for_some_elements<F, R>(&self, assertion: F) -> Result<bool, Interruption>
    where
        F: FnMut(Assertion, usize) -> Result<R, Interruption>,
    {
        Ok(ElementRun::collect(&self.elements, assertion)?.for_some(&self.base, &BUFFER_WORDING))
    }
}

// ============================================================================
// Sets
// ============================================================================

/// Assertions on an unordered set.
#[derive(Debug, Clone)]
pub struct SetAssertion {
    base: ValueAssertion,
}

impl SetAssertion {
    pub(crate) fn new(base: ValueAssertion) -> Self {
        Self { base }
    }

    fn elements(&self) -> &[Value] {
        match self.base.value() {
            Value::Set(items) => items,
            _ => &[],
        }
    }

    fn items(&self) -> Items<'_> {
        Items {
            noun: "set",
            items: Cow::Borrowed(self.elements()),
        }
    }

    pub fn to_contain(&self, element: impl Into<Value>) -> bool {
        self.items().to_contain(&self.base, element.into())
    }

    pub fn to_contain_all_of<I>(&self, elements: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.items().to_contain_all_of(&self.base, collect_values(elements))
    }

    pub fn to_contain_some_of<I>(&self, elements: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.items().to_contain_some_of(&self.base, collect_values(elements))
    }

    pub fn to_be_of_size(&self, size: usize) -> bool {
        let actual = self.elements().len();
        self.base.check(
            actual == size,
            || format!("set has size {size}"),
            || format!("set is of size {actual}, not {size}"),
        )
    }

    pub fn for_all_elements<F, R>(&self, mut assertion: F) -> Result<bool, Interruption>
    where
        F: FnMut(Assertion) -> Result<R, Interruption>,
    {
        let items = self.elements();
        let run = ElementRun::collect(items, |element, _| assertion(element))?;
        Ok(run.for_all(&self.base, items, &SET_WORDING))
    }

    pub fn for_some_elements<F, R>(&self, mut assertion: F) -> Result<bool, Interruption>
    where
        F: FnMut(Assertion) -> Result<R, Interruption>,
    {
        let run = ElementRun::collect(self.elements(), |element, _| assertion(element))?;
        Ok(run.for_some(&self.base, &SET_WORDING))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use attest_core::NumericBuffer;

    use super::*;
    use crate::assertion::Assert;
    use crate::expect::expect_factory;
    use crate::outcome::ResultPool;

    fn last(pool: &ResultPool) -> Outcome {
        pool.snapshot().pop().unwrap()
    }

    #[test]
    fn all_of_ignores_duplicates_and_lists_missing() {
        let (e, pool) = expect_factory();
        let a = e.expect(vec![1, 2, 3]).auto_named().sequence().unwrap();
        assert!(a.to_contain_all_of([3, 2, 1, 3]));
        assert_eq!(last(&pool).name(), Some("given array contains 2, 1 and 3"));
        assert!(!a.to_contain_all_of([4, 1, 5]));
        assert_eq!(last(&pool).reason(), Some("array doesn't contain 4 and 5"));
    }

    #[test]
    fn some_of_uses_nor_on_failure() {
        let (e, pool) = expect_factory();
        let a = e.expect(vec![1, 2]).sequence().unwrap();
        assert!(a.to_contain_some_of([9, 2]));
        assert!(!a.to_contain_some_of([7, 8, 9]));
        assert_eq!(last(&pool).reason(), Some("array does not contain 7, 8 nor 9"));
        assert!(!a.to_contain_some_of(Vec::<i32>::new()));
    }

    #[test]
    fn sequence_search_reaches_the_last_offset() {
        let (e, pool) = expect_factory();
        let a = e.expect(vec![1, 2, 3, 4]).sequence().unwrap();
        assert!(a.to_contain_sequence([3, 4]));
        assert_eq!(last(&pool).note(), Some("sequence is at indices 2-3"));
        assert!(a.to_contain_sequence([1, 2, 3, 4]));
        assert_eq!(last(&pool).note(), Some("array is sequence"));
        assert!(a.to_contain_sequence(Vec::<i32>::new()));
        assert_eq!(last(&pool).note(), Some("sequence is empty"));
        assert!(!a.to_contain_sequence([2, 4]));
        assert_eq!(last(&pool).reason(), Some("array does not contain sequence"));
        assert!(!a.to_contain_sequence([1, 2, 3, 4, 5]));
        assert_eq!(
            last(&pool).reason(),
            Some("array of length 4 can not contain sequence of length 5")
        );
    }

    #[test]
    fn for_all_reports_the_failing_index() {
        let (e, pool) = expect_factory();
        let a = e.expect(vec![1, 2, 30, 4]).sequence().unwrap();
        let passed = a
            .for_all_elements(|element, _| Ok(element.number()?.to_be_less_than(10)))
            .unwrap();
        assert!(!passed);
        assert_eq!(
            last(&pool).reason(),
            Some("element #3 (30) failed: expected value < 10, but 30 isn't")
        );
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn quantifier_names_follow_nested_names() {
        let (e, pool) = expect_factory();
        let a = e.expect(vec![2, 4]).auto_named().sequence().unwrap();
        a.for_all_elements(|element, _| Ok(element.number()?.to_be_divisible_by(2))).unwrap();
        assert_eq!(last(&pool).name(), Some("for all elements: 2 divides x"));
        a.for_some_elements(|element, index| Ok(element.named(format!("#{index}")).to_be(4))).unwrap();
        assert_eq!(last(&pool).name(), Some("some elements match assertion"));
    }

    #[test]
    fn empty_collections_and_quantifiers() {
        let (e, pool) = expect_factory();
        let a = e.expect(Vec::<i32>::new()).sequence().unwrap();
        assert!(a.for_all_elements(|element, _| Ok(element.to_be(1))).unwrap());
        assert!(!a.for_some_elements(|element, _| Ok(element.to_be(1))).unwrap());
        assert_eq!(last(&pool).reason(), Some("assertion failed for all elements"));
    }

    #[test]
    fn quantifier_propagates_interruptions() {
        let (e, pool) = expect_factory();
        let a = e.expect(vec!["a"]).sequence().unwrap();
        assert!(a.for_all_elements(|element, _| Ok(element.number()?.to_be_an_integer())).is_err());
        assert!(pool.is_empty());
    }

    #[test]
    fn buffers_share_the_sequence_family() {
        let (e, pool) = expect_factory();
        let a = e
            .expect(NumericBuffer::Float64(vec![0.5, 1.5, 2.5]))
            .auto_named()
            .buffer()
            .unwrap();
        assert!(a.to_contain(1.5));
        assert_eq!(last(&pool).name(), Some("given Float64Array contains 1.5"));
        assert!(a.to_contain_sequence([1.5, 2.5]));
        assert!(!a.for_all_elements(|entry, _| Ok(entry.number()?.to_be_an_integer())).unwrap());
        assert_eq!(
            last(&pool).reason(),
            Some("entry #1 (0.5) failed: expected value to be an integer, but 0.5 isn't")
        );
    }

    #[test]
    fn sets() {
        let (e, pool) = expect_factory();
        let a = e.expect(Value::set([1, 2, 3])).auto_named().set().unwrap();
        assert!(a.to_be_of_size(3));
        assert_eq!(last(&pool).name(), Some("set has size 3"));
        assert!(!a.to_be_of_size(2));
        assert_eq!(last(&pool).reason(), Some("set is of size 3, not 2"));
        assert!(!a.for_all_elements(|element| Ok(element.number()?.to_be_less_than(3))).unwrap());
        assert_eq!(
            last(&pool).reason(),
            Some("element 3 failed: expected value < 3, but 3 isn't")
        );
    }
}
