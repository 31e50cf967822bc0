//! Everything a test file needs in one import.
//!
//! ```ignore
//! use attest::prelude::*;
//!
//! let test = Test::new("Addition", |e| {
//!     e.expect(1 + 1).named("1 + 1 = 2").to_be(2);
//!     e.expect(9).auto_named().number()?.to_be_composite();
//!     Ok(())
//! });
//! ```

pub use crate::assertion::{
    Assert, Assertion, BigIntAssertion, BufferAssertion, CallableAssertion, DateAssertion, Interruption,
    MapAssertion, MessageMatcher, NumberAssertion, ObjectAssertion, SequenceAssertion, SetAssertion, TextAssertion,
    ThrowExpectation, TimeUnit, ValueAssertion, VariadicCallable,
};
pub use crate::expect::{Expect, expect_factory};
pub use crate::suite::{SuiteBuilder, TestDiscovery};
pub use crate::test::Test;

pub use attest_core::{Callable, DateValue, ErrorKind, NumericBuffer, Pattern, Thrown, Value};
