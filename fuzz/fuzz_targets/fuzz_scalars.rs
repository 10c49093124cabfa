#![no_main]

use libfuzzer_sys::fuzz_target;
use yamlmodem::{Scalar, ScalarStyle, parse_decimal, parse_float, parse_integer, resolve};

// Whatever the resolver types as a number must realize as that number.
fuzz_target!(|text: &str| {
    match resolve(text, None, Some(ScalarStyle::Plain)) {
        Scalar::Integer => {
            parse_integer(text).unwrap_or_else(|e| panic!("{text:?} typed as int: {e}"));
        }
        Scalar::Float => {
            parse_float(text).unwrap_or_else(|e| panic!("{text:?} typed as float: {e}"));
            parse_decimal(text).unwrap_or_else(|e| panic!("{text:?} typed as float: {e}"));
        }
        Scalar::Null | Scalar::Bool(_) | Scalar::String => {}
    }
});
