#![no_main]

use attest_core::numeric::{RADIX_RANGE, first_unrecognized_digit, parses_as_float_prefix};
use attest_core::{DateValue, Value, deep_equals, format};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parses_as_float_prefix(s);
        for radix in RADIX_RANGE {
            let _ = first_unrecognized_digit(s, radix);
        }

        // Formatting and equality must accept any text or date input
        let text = Value::from(s);
        let _ = format::single(&text);
        assert!(deep_equals(&text, &text));
        let date = Value::from(DateValue::parse(s));
        let _ = format::single(&date);
    }
});
