//! Provide the runtime value model and the pure semantic helpers of the attest assertion engine.
//!
//! This crate is intentionally small and dependency-light. It contains deterministic helpers that both:
//! - the assertion layer uses to classify, compare and describe values, and
//! - reporters rely on for reproducible `reason`/`name` text.
//!
//! ## Notes
//!
//! - This is a “semantic core” crate: **no IO**, no global state, no knowledge of result pools or tests.
//! - Current scope: the [`Value`] model and its category classifier, structural deep equality, the formatting
//!   contract used in assertion messages, and numeric helpers (primality, radix digits, float-prefix parsing).

pub mod equality;
pub mod format;
pub mod numeric;
pub mod value;

pub use equality::deep_equals;
pub use value::{
    BufferKind, CallResult, Callable, Category, DateValue, ErrorKind, NumericBuffer, Pattern, Thrown, Value,
    classify,
};
