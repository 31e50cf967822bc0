use attest_core::{NumericBuffer, Value};

use crate::assertion::Assert;
use crate::test::Test;

pub(super) fn sequence_tests() -> Vec<Test> {
    vec![
        Test::new("Containment assertions", |e| {
            e.expect([1, 2, 3]).auto_named().sequence()?.to_contain(1);
            e.expect([1, 2, 3]).auto_named().sequence()?.to_contain_all_of([3, 2, 1, 3]);
            e.expect([1, 2, 3]).auto_named().sequence()?.to_contain_some_of([4, 6, 2, 5, 2]);
            e.expect([1, 2, 3, 4]).auto_named().sequence()?.to_contain_sequence([3, 4]);
            Ok(())
        }),
        Test::new("Assertions on elements", |e| {
            e.expect([1, 2, 3])
                .sequence()?
                .for_all_elements(|element, _| Ok(element.auto_named().number()?.to_be_at_most(3)))?;
            e.expect([1, 2, 3])
                .sequence()?
                .for_some_elements(|element, _| Ok(element.auto_named().number()?.to_be_greater_than(2)))?;
            e.expect(Vec::<i32>::new())
                .named("every element of an empty array")
                .sequence()?
                .for_all_elements(|element, _| Ok(element.to_be(0)))?;
            Ok(())
        }),
        Test::new("Other assertions", |e| {
            e.expect([1, 2, 3]).auto_named().sequence()?.to_be_of_length(3);
            Ok(())
        }),
    ]
}

pub(super) fn set_tests() -> Vec<Test> {
    vec![
        Test::new("Containment assertions", |e| {
            let s1 = Value::set([1, 2, 3]);
            e.expect(&s1).auto_named().set()?.to_contain(1);
            e.expect(&s1).auto_named().set()?.to_contain_all_of([3, 2, 1, 3]);
            e.expect(&s1).auto_named().set()?.to_contain_some_of([4, 6, 2, 5, 2]);
            Ok(())
        }),
        Test::new("Assertions on elements", |e| {
            let s1 = Value::set([1, 2, 3]);
            e.expect(&s1)
                .auto_named()
                .set()?
                .for_all_elements(|element| Ok(element.auto_named().number()?.to_be_at_most(3)))?;
            e.expect(&s1)
                .auto_named()
                .set()?
                .for_some_elements(|element| Ok(element.auto_named().number()?.to_be_greater_than(2)))?;
            Ok(())
        }),
        Test::new("Other assertions", |e| {
            e.expect(Value::set([1, 2, 3, 3, 2])).auto_named().set()?.to_be_of_size(3);
            Ok(())
        }),
    ]
}

pub(super) fn float64_tests() -> Vec<Test> {
    vec![
        Test::new("Containment assertions", |e| {
            let arr1 = NumericBuffer::Float64(vec![1.0, 2.0, 3.0]);
            let arr2 = NumericBuffer::Float64((0..=10).map(f64::from).collect());
            e.expect(arr1.clone()).auto_named().buffer()?.to_contain(1);
            e.expect(arr1.clone()).auto_named().buffer()?.to_contain_all_of([3, 2, 1, 3]);
            e.expect(arr1).auto_named().buffer()?.to_contain_some_of([4, 6, 2, 5, 2]);
            e.expect(arr2).auto_named().buffer()?.to_contain_sequence([5, 6, 7]);
            Ok(())
        }),
        Test::new("Assertions on elements", |e| {
            let arr1 = NumericBuffer::Float64(vec![1.0, 2.0, 3.0]);
            e.expect(arr1.clone())
                .auto_named()
                .buffer()?
                .for_all_elements(|entry, _| Ok(entry.auto_named().number()?.to_be_at_most(3)))?;
            e.expect(arr1)
                .auto_named()
                .buffer()?
                .for_some_elements(|entry, _| Ok(entry.auto_named().number()?.to_be_greater_than(2)))?;
            Ok(())
        }),
        Test::new("Other assertions", |e| {
            e.expect(NumericBuffer::Float64(vec![1.0, 2.0, 3.0]))
                .auto_named()
                .buffer()?
                .to_be_of_length(3);
            Ok(())
        }),
    ]
}

pub(super) fn uint8_tests() -> Vec<Test> {
    vec![Test::new("Byte buffers", |e| {
        let bytes = NumericBuffer::Uint8(b"attest".to_vec());
        e.expect(bytes.clone()).auto_named().buffer()?.to_contain(u8::from(b't'));
        e.expect(bytes.clone()).auto_named().buffer()?.to_contain_sequence(*b"tes");
        e.expect(bytes.clone()).auto_named().buffer()?.to_be_of_length(6);
        e.expect(bytes)
            .named("bytes are lowercase ASCII")
            .buffer()?
            .for_all_elements(|byte, _| Ok(byte.number()?.to_be_greater_than(96)))?;
        Ok(())
    })]
}
