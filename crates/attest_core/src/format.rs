//! Render values and value lists the way assertion names and failure reasons show them.
//!
//! ## Notes
//! - Output is deterministic: the same value always renders to the same text.
//! - Single-character text renders in single quotes (`'a'`), longer text in double quotes (`"abc"`).

use std::fmt::{self, Write};

use crate::value::{DateValue, NumericBuffer, Value};

/// Nesting beyond this renders as `…`.
const MAX_RENDER_DEPTH: usize = 32;

/// How the final pair of a rendered list is joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
    Nor,
    Comma,
}

impl Connective {
    fn word(self) -> &'static str {
        match self {
            Connective::And => " and ",
            Connective::Or => " or ",
            Connective::Nor => " nor ",
            Connective::Comma => ", ",
        }
    }
}

/// Render one value.
pub fn single(value: &Value) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_value(&mut out, value, 0);
    out
}

/// Render a list as comma-separated items with `connective` between the last two.
///
/// ## Examples
/// - `[1, 2, 3]` with [`Connective::And`] renders `1, 2 and 3`.
/// - `[1]` renders `1`; an empty list renders an empty string.
pub fn sequence(values: &[Value], connective: Connective) -> String {
    match values {
        [] => String::new(),
        [only] => single(only),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(single).collect();
            format!("{}{}{}", head.join(", "), connective.word(), single(last))
        }
    }
}

/// Render a number like a JavaScript number literal: `3`, `-0.5`, `NaN`, `Infinity`.
pub fn number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{n}")
    }
}

/// Render `x` with `digits` significant digits, in fixed notation.
pub fn precision(x: f64, digits: usize) -> String {
    if !x.is_finite() {
        return number(x);
    }
    let digits = digits.max(1) as i32;
    if x == 0.0 {
        return format!("{:.*}", (digits - 1) as usize, 0.0);
    }
    let magnitude = x.abs().log10().floor() as i32;
    let decimals = (digits - 1 - magnitude).max(0) as usize;
    format!("{x:.decimals$}")
}

/// English ordinal: `1st`, `2nd`, `3rd`, `11th`, `22nd`.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Month name for a 1-based month number.
pub fn month_name(month: u32) -> String {
    const MONTHS: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    match month.checked_sub(1).and_then(|index| MONTHS.get(index as usize)) {
        Some(name) => (*name).to_string(),
        None => format!("month {month}"),
    }
}

/// Render a date as `Wed Feb 14 2024 09:30:00.000`, with ` UTC+hh:mm` for non-zero offsets.
pub fn date(value: &DateValue) -> String {
    let Some(datetime) = value.datetime() else {
        return "Invalid Date".to_string();
    };
    let rendered = datetime.format("%a %b %d %Y %H:%M:%S%.3f");
    if datetime.offset().local_minus_utc() == 0 {
        rendered.to_string()
    } else {
        format!("{rendered} UTC{}", datetime.format("%:z"))
    }
}

/// Render into any writer; [`single`] is the `String` entry point.
fn write_value(out: &mut impl Write, value: &Value, depth: usize) -> fmt::Result {
    if depth > MAX_RENDER_DEPTH {
        return out.write_char('…');
    }
    let next = depth + 1;
    match value {
        Value::Undefined => out.write_str("undefined"),
        Value::Null => out.write_str("null"),
        Value::Bool(b) => write!(out, "{b}"),
        Value::Number(n) => out.write_str(&number(*n)),
        Value::BigInt(n) => write!(out, "{n}n"),
        Value::Text(s) => write_text(out, s),
        Value::Sequence(items) => {
            out.write_char('[')?;
            write_joined(out, items.iter(), next)?;
            out.write_char(']')
        }
        Value::Set(items) if items.is_empty() => out.write_str("{}"),
        Value::Set(items) => {
            out.write_str("{ ")?;
            write_joined(out, items.iter(), next)?;
            out.write_str(" }")
        }
        Value::Map(entries) if entries.is_empty() => out.write_str("{}"),
        Value::Map(entries) => {
            out.write_str("{ ")?;
            for (index, (key, value)) in entries.iter().enumerate() {
                if index > 0 {
                    out.write_str(", ")?;
                }
                write_value(out, key, next)?;
                out.write_str(": ")?;
                write_value(out, value, next)?;
            }
            out.write_str(" }")
        }
        Value::Object(entries) if entries.is_empty() => out.write_str("{}"),
        Value::Object(entries) => {
            out.write_str("{ ")?;
            for (index, (key, value)) in entries.iter().enumerate() {
                if index > 0 {
                    out.write_str(", ")?;
                }
                write_text(out, key)?;
                out.write_str(": ")?;
                write_value(out, value, next)?;
            }
            out.write_str(" }")
        }
        Value::Buffer(buffer) => write!(out, "{} [{}]", buffer.kind().as_str(), buffer_items(buffer)),
        Value::Date(date_value) => out.write_str(&date(date_value)),
        Value::Callable(callable) => write!(out, "[function {}]", callable.name()),
        Value::Pattern(pattern) => write!(out, "/{}/", pattern.source()),
        Value::Error(thrown) => write!(out, "{thrown}"),
    }
}

/// Single-character text in single quotes, anything else in double quotes.
fn write_text(out: &mut impl Write, text: &str) -> fmt::Result {
    if text.chars().count() == 1 {
        write!(out, "'{text}'")
    } else {
        write!(out, "\"{text}\"")
    }
}

fn write_joined<'a>(out: &mut impl Write, items: impl Iterator<Item = &'a Value>, depth: usize) -> fmt::Result {
    for (index, item) in items.enumerate() {
        if index > 0 {
            out.write_str(", ")?;
        }
        write_value(out, item, depth)?;
    }
    Ok(())
}

fn buffer_items(buffer: &NumericBuffer) -> String {
    buffer
        .to_f64_vec()
        .into_iter()
        .map(number)
        .collect::<Vec<_>>()
        .join(", ")
}
