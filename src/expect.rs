//! The `expect` entry point handed to test bodies.

use attest_core::Value;

use crate::assertion::Assertion;
use crate::outcome::ResultPool;

/// Creates assertions bound to one result pool.
///
/// Cheap to clone; clones record into the same pool.
#[derive(Debug, Clone, Default)]
pub struct Expect {
    pool: ResultPool,
    auto_name: bool,
}

impl Expect {
    /// Classify `value` and return the assertion for its category.
    pub fn expect(&self, value: impl Into<Value>) -> Assertion {
        Assertion::classify(value.into(), self.pool.clone(), self.auto_name)
    }

    /// An auto-naming factory over a fresh pool, used for per-element assertions.
    pub(crate) fn auto_naming() -> (Self, ResultPool) {
        let pool = ResultPool::new();
        let expect = Self {
            pool: pool.clone(),
            auto_name: true,
        };
        (expect, pool)
    }
}

/// A fresh pool and an [`Expect`] recording into it.
pub fn expect_factory() -> (Expect, ResultPool) {
    let pool = ResultPool::new();
    let expect = Expect {
        pool: pool.clone(),
        auto_name: false,
    };
    (expect, pool)
}
