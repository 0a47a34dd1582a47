//! Lax coercion from loosely typed JSON
//!
//! Models tend to quote numbers and spell booleans as words. These helpers
//! accept the common spellings and reject everything else; `null` is never
//! accepted.

use serde_json::Value;

use crate::error::ValueError;

/// Short name of a JSON value's type, for diagnostics
#[must_use]
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Non-empty trimmed text
///
/// # Errors
/// `WrongType` for non-strings, `Empty` for blank strings
pub fn as_text(value: &Value) -> Result<&str, ValueError> {
    let text = value
        .as_str()
        .ok_or_else(|| ValueError::wrong_type("string", value_kind(value)))?
        .trim();
    if text.is_empty() {
        return Err(ValueError::Empty);
    }
    Ok(text)
}

/// Integer from integer, integral float, or integer string
///
/// # Errors
/// `WrongType` if no integer reading exists
pub fn as_integer(value: &Value) -> Result<i64, ValueError> {
    let wrong = || ValueError::wrong_type("integer", value_kind(value));
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if n.is_u64() {
                // above i64::MAX; no field accepts anything that large
                Err(ValueError::wrong_type("signed 64-bit integer", "integer"))
            } else {
                n.as_f64().and_then(integral).ok_or_else(wrong)
            }
        }
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
                .ok_or_else(wrong)
        }
        _ => Err(wrong()),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn integral(f: f64) -> Option<i64> {
    // f64 loses integer precision well before i64::MAX
    const LIMIT: f64 = 9_007_199_254_740_992.0;
    (f.is_finite() && f.fract() == 0.0 && f.abs() <= LIMIT).then(|| f as i64)
}

/// Finite float from number or numeric string
///
/// # Errors
/// `WrongType` if no finite float reading exists
pub fn as_float(value: &Value) -> Result<f64, ValueError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|f| f.is_finite())
        .ok_or_else(|| ValueError::wrong_type("number", value_kind(value)))
}

/// Boolean from bool, 0/1, or a yes/no word
///
/// # Errors
/// `WrongType` if the value has no boolean reading
pub fn as_bool(value: &Value) -> Result<bool, ValueError> {
    let wrong = || ValueError::wrong_type("boolean", value_kind(value));
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(wrong()),
        },
        Value::String(s) => bool_word(s).ok_or_else(wrong),
        _ => Err(wrong()),
    }
}

/// Boolean reading of a word, if any
#[must_use]
pub fn bool_word(word: &str) -> Option<bool> {
    match word.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Exactly two integers, from an array or a `WxH` / `W,H` string
///
/// # Errors
/// `WrongArity` for arrays of the wrong length, `WrongType` otherwise
pub fn as_integer_pair(value: &Value) -> Result<(i64, i64), ValueError> {
    match value {
        Value::Array(items) => match items.as_slice() {
            [a, b] => Ok((as_integer(a)?, as_integer(b)?)),
            _ => Err(ValueError::WrongArity {
                expected: 2,
                actual: items.len(),
            }),
        },
        Value::String(s) => {
            let parts: Vec<&str> = s
                .split(|c: char| c == 'x' || c == 'X' || c == ',' || c == '*')
                .map(str::trim)
                .collect();
            match parts.as_slice() {
                [a, b] => {
                    let a = as_integer(&Value::String((*a).to_string()))?;
                    let b = as_integer(&Value::String((*b).to_string()))?;
                    Ok((a, b))
                }
                _ => Err(ValueError::wrong_type("a pair of integers", "string")),
            }
        }
        _ => Err(ValueError::wrong_type(
            "a pair of integers",
            value_kind(value),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_spellings() {
        assert_eq!(as_integer(&json!(12)), Ok(12));
        assert_eq!(as_integer(&json!(12.0)), Ok(12));
        assert_eq!(as_integer(&json!(" 12 ")), Ok(12));
        assert_eq!(as_integer(&json!("12.0")), Ok(12));
        assert!(as_integer(&json!(12.5)).is_err());
        assert!(as_integer(&json!("twelve")).is_err());
        assert!(as_integer(&json!(true)).is_err());
        assert!(as_integer(&Value::Null).is_err());
    }

    #[test]
    fn integer_beyond_i64_is_wrong_type() {
        assert_eq!(
            as_integer(&json!(u64::MAX)),
            Err(ValueError::wrong_type("signed 64-bit integer", "integer"))
        );
    }

    #[test]
    fn float_spellings() {
        assert_eq!(as_float(&json!(0.5)), Ok(0.5));
        assert_eq!(as_float(&json!(1)), Ok(1.0));
        assert_eq!(as_float(&json!("0.25")), Ok(0.25));
        assert!(as_float(&json!("NaN")).is_err());
        assert!(as_float(&json!("inf")).is_err());
        assert!(as_float(&json!([0.5])).is_err());
    }

    #[test]
    fn bool_spellings() {
        assert_eq!(as_bool(&json!(true)), Ok(true));
        assert_eq!(as_bool(&json!(0)), Ok(false));
        assert_eq!(as_bool(&json!("Yes")), Ok(true));
        assert_eq!(as_bool(&json!("off")), Ok(false));
        assert!(as_bool(&json!(2)).is_err());
        assert!(as_bool(&json!("maybe")).is_err());
        assert!(as_bool(&Value::Null).is_err());
    }

    #[test]
    fn pair_spellings() {
        assert_eq!(as_integer_pair(&json!([1024, 768])), Ok((1024, 768)));
        assert_eq!(as_integer_pair(&json!(["1920", 1080.0])), Ok((1920, 1080)));
        assert_eq!(as_integer_pair(&json!("1280x720")), Ok((1280, 720)));
        assert_eq!(as_integer_pair(&json!("1280, 720")), Ok((1280, 720)));
    }

    #[test]
    fn pair_wrong_arity() {
        assert_eq!(
            as_integer_pair(&json!([1024])),
            Err(ValueError::WrongArity {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            as_integer_pair(&json!([1, 2, 3])),
            Err(ValueError::WrongArity {
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(
            as_integer_pair(&json!(1024)),
            Err(ValueError::wrong_type("a pair of integers", "integer"))
        );
    }

    #[test]
    fn text_rejects_blank() {
        assert_eq!(as_text(&json!("  blue ")), Ok("blue"));
        assert_eq!(as_text(&json!("   ")), Err(ValueError::Empty));
        assert!(as_text(&json!(5)).is_err());
    }

    #[test]
    fn kinds() {
        assert_eq!(value_kind(&json!(1)), "integer");
        assert_eq!(value_kind(&json!(1.5)), "float");
        assert_eq!(value_kind(&json!({})), "object");
    }
}
