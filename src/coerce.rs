//! Applies a path [`Directive`] to the raw value of a flat entry.

use crate::error::{JpathError, Result};
use crate::path::Directive;
use crate::value::FlatValue;
use serde_json::{Number, Value};

/// Separator for the `[]` directive.
pub const CSV_SEPARATOR: char = ',';

/// Returns the leaf value to store for `key`.
///
/// Without a directive the value is stored as-is. `bool()` never fails: any
/// string other than exactly `"true"` becomes `false`.
///
/// # Errors
/// Returns [`JpathError::CoercionError`] when `[]` is applied to a
/// non-string, or `num()` to text which is not a finite decimal number or
/// is an integer outside the `i64`/`u64` range.
pub fn coerce(key: &str, value: FlatValue, directive: Option<Directive>) -> Result<Value> {
    let Some(directive) = directive else {
        return Ok(value.into_json());
    };

    match (directive, value) {
        (Directive::SplitCsv, FlatValue::String(s)) => Ok(Value::Array(
            s.split(CSV_SEPARATOR)
                .map(|piece| Value::String(piece.to_string()))
                .collect(),
        )),
        (Directive::CoerceNumber, FlatValue::String(s)) => parse_number(&s)
            .map(Value::Number)
            .ok_or_else(|| coercion_error(key, directive, format!("{:?} is not a number", s))),
        (Directive::CoerceNumber, FlatValue::Number(n)) => Ok(Value::Number(n)),
        (Directive::CoerceBool, FlatValue::String(s)) => Ok(Value::Bool(s == "true")),
        (Directive::CoerceBool, FlatValue::Bool(b)) => Ok(Value::Bool(b)),
        (Directive::CoerceBool, _) => Ok(Value::Bool(false)),
        (directive, value) => Err(coercion_error(
            key,
            directive,
            format!("expected a string but found {}", value.kind()),
        )),
    }
}

/// Integers keep an integer rendering, anything with a fraction or an
/// exponent becomes a float. Non-finite values are rejected, and so is
/// integer text outside the `i64`/`u64` range.
fn parse_number(s: &str) -> Option<Number> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(n.into());
    }
    if let Ok(n) = s.parse::<u64>() {
        return Some(n.into());
    }
    if is_integer_text(s) {
        return None;
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

fn is_integer_text(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn coercion_error(key: &str, directive: Directive, reason: String) -> JpathError {
    JpathError::CoercionError {
        path: key.to_string(),
        directive: directive.to_string(),
        reason,
    }
}
