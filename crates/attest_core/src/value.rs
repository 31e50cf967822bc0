//! Runtime values inspected by assertions, and the category classifier.
//!
//! A [`Value`] is an owned tree: containers own their elements, so no value can reach itself and every
//! traversal over a value terminates.

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use num_bigint::BigInt;
use regex::Regex;
use thiserror::Error;

use crate::equality::deep_equals;

/// A value handed to `expect`.
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(BigInt),
    Text(String),
    Sequence(Vec<Value>),
    /// Elements are unique under [`deep_equals`]; build through [`Value::set`].
    Set(Vec<Value>),
    /// Insertion-ordered entries with unique keys; build through [`Value::map`].
    Map(Vec<(Value, Value)>),
    Buffer(NumericBuffer),
    Date(DateValue),
    Callable(Callable),
    /// Plain keyed record; build through [`Value::record`].
    Object(Vec<(String, Value)>),
    Pattern(Pattern),
    Error(Thrown),
}

impl Value {
    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Build a set, dropping elements deep-equal to one already present.
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            let item = item.into();
            if !unique.iter().any(|seen| deep_equals(seen, &item)) {
                unique.push(item);
            }
        }
        Value::Set(unique)
    }

    /// Build a map. A repeated key keeps its first position and takes the last value.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let mut out: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            let (key, value) = (key.into(), value.into());
            match out.iter_mut().find(|(existing, _)| deep_equals(existing, &key)) {
                Some(slot) => slot.1 = value,
                None => out.push((key, value)),
            }
        }
        Value::Map(out)
    }

    /// Build a keyed record. A repeated key keeps its first position and takes the last value.
    pub fn record<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut out: Vec<(String, Value)> = Vec::new();
        for (key, value) in entries {
            let (key, value) = (key.into(), value.into());
            match out.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => out.push((key, value)),
            }
        }
        Value::Object(out)
    }

    pub fn category(&self) -> Category {
        classify(self)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Category of a value, deciding which assertion operations apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    BigInt,
    Boolean,
    Number,
    Text,
    Buffer(BufferKind),
    Sequence,
    Set,
    Map,
    Date,
    NullaryCallable,
    VariadicCallable,
    Object,
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::BigInt => "bigint",
            Category::Boolean => "boolean",
            Category::Number => "number",
            Category::Text => "string",
            Category::Buffer(kind) => kind.as_str(),
            Category::Sequence => "array",
            Category::Set => "set",
            Category::Map => "map",
            Category::Date => "date",
            Category::NullaryCallable => "function",
            Category::VariadicCallable => "function with parameters",
            Category::Object => "object",
            Category::Other => "value",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide the category of a value.
///
/// ## Parameters
/// - `value`: any value.
///
/// ## Returns
/// - The first matching category, checked in a fixed order: bigint, boolean, number, text, buffer kinds,
///   sequence, set, map, date, nullary callable, variadic callable, keyed object.
///
/// ## Notes
/// - Total: `Undefined`, `Null`, patterns and errors have no richer operations and map to [`Category::Other`].
pub fn classify(value: &Value) -> Category {
    match value {
        Value::BigInt(_) => Category::BigInt,
        Value::Bool(_) => Category::Boolean,
        Value::Number(_) => Category::Number,
        Value::Text(_) => Category::Text,
        Value::Buffer(buffer) => Category::Buffer(buffer.kind()),
        Value::Sequence(_) => Category::Sequence,
        Value::Set(_) => Category::Set,
        Value::Map(_) => Category::Map,
        Value::Date(_) => Category::Date,
        Value::Callable(callable) if callable.arity() == 0 => Category::NullaryCallable,
        Value::Callable(_) => Category::VariadicCallable,
        Value::Object(_) => Category::Object,
        Value::Undefined | Value::Null | Value::Pattern(_) | Value::Error(_) => Category::Other,
    }
}

// ============================================================================
// Numeric buffers
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Uint8,
    Uint16,
    Uint32,
    Float64,
}

impl BufferKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BufferKind::Uint8 => "Uint8Array",
            BufferKind::Uint16 => "Uint16Array",
            BufferKind::Uint32 => "Uint32Array",
            BufferKind::Float64 => "Float64Array",
        }
    }
}

/// Fixed-width numeric buffer. Elements read out as numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericBuffer {
    Uint8(Vec<u8>),
    Uint16(Vec<u16>),
    Uint32(Vec<u32>),
    Float64(Vec<f64>),
}

impl NumericBuffer {
    pub fn kind(&self) -> BufferKind {
        match self {
            NumericBuffer::Uint8(_) => BufferKind::Uint8,
            NumericBuffer::Uint16(_) => BufferKind::Uint16,
            NumericBuffer::Uint32(_) => BufferKind::Uint32,
            NumericBuffer::Float64(_) => BufferKind::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NumericBuffer::Uint8(v) => v.len(),
            NumericBuffer::Uint16(v) => v.len(),
            NumericBuffer::Uint32(v) => v.len(),
            NumericBuffer::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            NumericBuffer::Uint8(v) => v.iter().map(|&x| f64::from(x)).collect(),
            NumericBuffer::Uint16(v) => v.iter().map(|&x| f64::from(x)).collect(),
            NumericBuffer::Uint32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            NumericBuffer::Float64(v) => v.clone(),
        }
    }

    /// Elements as [`Value::Number`]s, in order.
    pub fn elements(&self) -> Vec<Value> {
        self.to_f64_vec().into_iter().map(Value::Number).collect()
    }
}

// ============================================================================
// Dates
// ============================================================================

/// A point in time with its own UTC offset, or an invalid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateValue(Option<DateTime<FixedOffset>>);

impl DateValue {
    pub fn invalid() -> Self {
        DateValue(None)
    }

    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime<Tz: TimeZone>(datetime: DateTime<Tz>) -> Self {
        let offset = datetime.offset().fix();
        DateValue(Some(datetime.with_timezone(&offset)))
    }

    /// Build a UTC date from calendar fields; out-of-range fields give an invalid date.
    pub fn from_ymd_hms_milli(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32, milli: u32) -> Self {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_milli_opt(hour, minute, second, milli))
            .map(|naive| Self::from_datetime(Utc.from_utc_datetime(&naive)))
            .unwrap_or_default()
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        Self::from_ymd_hms_milli(year, month, day, 0, 0, 0, 0)
    }

    /// Parse RFC 3339 (`2024-02-14T09:30:00+01:00`) or a bare `YYYY-MM-DD` as UTC midnight.
    /// Anything else gives an invalid date.
    pub fn parse(text: &str) -> Self {
        if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
            return DateValue(Some(datetime));
        }
        match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            Ok(date) => date
                .and_hms_opt(0, 0, 0)
                .map(|naive| Self::from_datetime(Utc.from_utc_datetime(&naive)))
                .unwrap_or_default(),
            Err(_) => Self::invalid(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    pub fn datetime(&self) -> Option<&DateTime<FixedOffset>> {
        self.0.as_ref()
    }
}

impl Default for DateValue {
    fn default() -> Self {
        Self::invalid()
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateValue {
    fn from(datetime: DateTime<Tz>) -> Self {
        Self::from_datetime(datetime)
    }
}

impl From<&str> for DateValue {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

// ============================================================================
// Callables
// ============================================================================

pub type CallResult = Result<Value, Thrown>;

type CallableFn = dyn Fn(&[Value]) -> CallResult + Send + Sync;

/// A function under test. Identity is the shared closure: clones compare equal, separate constructions do not.
#[derive(Clone)]
pub struct Callable {
    name: Option<String>,
    arity: usize,
    func: Arc<CallableFn>,
}

impl Callable {
    /// A callable taking no parameters.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn() -> CallResult + Send + Sync + 'static,
    {
        Self::with_arity(name, 0, move |_| func())
    }

    /// A callable taking no parameters that never throws.
    pub fn from_fn<F, T>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Into<Value>,
    {
        Self::with_arity(name, 0, move |_| Ok(func().into()))
    }

    /// A callable declaring `arity` parameters. Arguments are passed through unchecked.
    pub fn with_arity<F>(name: impl Into<String>, arity: usize, func: F) -> Self
    where
        F: Fn(&[Value]) -> CallResult + Send + Sync + 'static,
    {
        let name = name.into();
        Self {
            name: (!name.is_empty()).then_some(name),
            arity,
            func: Arc::new(func),
        }
    }

    /// Declared name, or `f` for anonymous callables.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("f")
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Invoke with `args`. A panic inside the callable is reported as a thrown [`ErrorKind::Panic`].
    pub fn call(&self, args: &[Value]) -> CallResult {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.func)(args))) {
            Ok(result) => result,
            Err(payload) => Err(Thrown::new(ErrorKind::Panic, panic_message(payload.as_ref()))),
        }
    }

    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name())
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panicked with a non-string payload".to_string()
    }
}

// ============================================================================
// Patterns
// ============================================================================

/// A compiled regular expression; identity is the shared compiled program.
#[derive(Debug, Clone)]
pub struct Pattern(Arc<Regex>);

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self::from)
    }

    pub fn regex(&self) -> &Regex {
        &self.0
    }

    pub fn source(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }

    pub fn ptr_eq(&self, other: &Pattern) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Pattern(Arc::new(regex))
    }
}

impl From<&Regex> for Pattern {
    fn from(regex: &Regex) -> Self {
        Pattern(Arc::new(regex.clone()))
    }
}

// ============================================================================
// Thrown errors
// ============================================================================

/// Kind of a thrown error. `Error` is the base kind every other kind refines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Error,
    TypeError,
    RangeError,
    ValueError,
    IndexError,
    KeyError,
    ZeroDivisionError,
    Panic,
    Custom(String),
}

impl ErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorKind::Error => "Error",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::ValueError => "ValueError",
            ErrorKind::IndexError => "IndexError",
            ErrorKind::KeyError => "KeyError",
            ErrorKind::ZeroDivisionError => "ZeroDivisionError",
            ErrorKind::Panic => "Panic",
            ErrorKind::Custom(name) => name,
        }
    }

    /// Whether an error of this kind satisfies an expectation of `expected`.
    pub fn is_a(&self, expected: &ErrorKind) -> bool {
        *expected == ErrorKind::Error || self == expected
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error raised by code under test, rendered as `Kind: message`.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct Thrown {
    pub kind: ErrorKind,
    pub message: String,
    pub cause: Option<Box<Value>>,
}

impl Thrown {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<Value>) -> Self {
        self.cause = Some(Box::new(cause.into()));
        self
    }

    pub fn cause(&self) -> Option<&Value> {
        self.cause.as_deref()
    }
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! number_from {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(n: $ty) -> Self {
                Value::Number(n as f64)
            }
        })*
    };
}

number_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Text(c.to_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::BigInt(n)
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::sequence(items)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::sequence(items)
    }
}

impl<T: Into<Value>> From<BTreeSet<T>> for Value {
    fn from(items: BTreeSet<T>) -> Self {
        Value::set(items)
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(entries: BTreeMap<K, V>) -> Self {
        Value::map(entries)
    }
}

impl From<NumericBuffer> for Value {
    fn from(buffer: NumericBuffer) -> Self {
        Value::Buffer(buffer)
    }
}

impl From<DateValue> for Value {
    fn from(date: DateValue) -> Self {
        Value::Date(date)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(datetime: DateTime<Tz>) -> Self {
        Value::Date(DateValue::from_datetime(datetime))
    }
}

impl From<Callable> for Value {
    fn from(callable: Callable) -> Self {
        Value::Callable(callable)
    }
}

impl From<Pattern> for Value {
    fn from(pattern: Pattern) -> Self {
        Value::Pattern(pattern)
    }
}

impl From<Regex> for Value {
    fn from(regex: Regex) -> Self {
        Value::Pattern(regex.into())
    }
}

impl From<Thrown> for Value {
    fn from(thrown: Thrown) -> Self {
        Value::Error(thrown)
    }
}
