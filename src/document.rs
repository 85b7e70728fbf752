//! Typed access to loosely-typed storefront documents.
//!
//! Storefront responses are property lists whose field types drift between
//! endpoints and server versions. These helpers extract what the bridge needs
//! and report a mismatch as `None` so callers fail closed with a precise
//! error instead of guessing.

use plist::{Dictionary, Value};

/// The value as a dictionary, if it is one.
pub fn dict(value: &Value) -> Option<&Dictionary> {
    value.as_dictionary()
}

/// The value as an array, if it is one.
pub fn array(value: &Value) -> Option<&[Value]> {
    value.as_array().map(Vec::as_slice)
}

/// Text rendering of a scalar field. Absent and non-scalar values are empty.
pub fn string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Integer(i)) => i.to_string(),
        Some(Value::Real(r)) => r.to_string(),
        Some(Value::Boolean(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Coerces a numeric field to `i64`.
///
/// Integers of any width are accepted up to `i64::MAX`. Reals and numeric
/// strings are accepted when they hold an exact integer in range.
pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => i
            .as_signed()
            .or_else(|| i.as_unsigned().and_then(|u| i64::try_from(u).ok())),
        Value::Real(r) => exact_integer(*r),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(exact_integer))
        }
        _ => None,
    }
}

/// Raw bytes of a data or string field.
pub fn bytes(value: &Value) -> Option<&[u8]> {
    match value {
        Value::Data(data) => Some(data),
        Value::String(s) => Some(s.as_bytes()),
        _ => None,
    }
}

fn exact_integer(value: f64) -> Option<i64> {
    // i64::MAX rounds up to 2^63 as f64, hence the strict upper bound.
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    if value.is_finite() && value.fract() == 0.0 && in_range {
        Some(value as i64)
    } else {
        None
    }
}
