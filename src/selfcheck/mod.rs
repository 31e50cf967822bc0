//! Bundled suite exercising every assertion family.
//!
//! The `attest` binary runs it; every test here is expected to pass.

use crate::suite::SuiteBuilder;

mod arithmetic;
mod collections;
mod dates;
mod equality;
mod functions;
mod keyed;
mod primitives;

/// Every bundled test, grouped by the family it exercises.
pub fn suite() -> SuiteBuilder {
    SuiteBuilder::new()
        .register("arithmetic", arithmetic::tests())
        .register("equality", equality::tests())
        .register("type-specific/primitives/number", primitives::number_tests())
        .register("type-specific/primitives/bigint", primitives::big_int_tests())
        .register("type-specific/primitives/string", primitives::text_tests())
        .register("type-specific/collections/array", collections::sequence_tests())
        .register("type-specific/collections/set", collections::set_tests())
        .register("type-specific/collections/map", keyed::map_tests())
        .register("type-specific/collections/typed-arrays/Float64Array", collections::float64_tests())
        .register("type-specific/collections/typed-arrays/Uint8Array", collections::uint8_tests())
        .register("type-specific/function", functions::tests())
        .register("type-specific/date", dates::tests())
        .register("type-specific/generic-object", keyed::object_tests())
}
