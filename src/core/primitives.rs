use serde_json::Value;

/// Coerces a loosely-typed JSON field into a finite number.
///
/// Numbers pass through, strings are trimmed and parsed with either `.` or `,`
/// as decimal separator. Everything else, including non-finite results, is
/// treated as missing.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()),
        Value::String(text) => parse_decimal_text(text),
        _ => None,
    }
}

/// Coerces a JSON field into an integer, rejecting fractional values.
#[must_use]
pub fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|v| v.is_finite() && v.fract() == 0.0)
                .and_then(f64_to_i64)
        }),
        Value::String(text) => {
            let trimmed = text.trim();
            if let Ok(parsed) = trimmed.parse::<i64>() {
                return Some(parsed);
            }
            parse_decimal_text(trimmed)
                .filter(|v| v.fract() == 0.0)
                .and_then(f64_to_i64)
        }
        _ => None,
    }
}

fn parse_decimal_text(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn f64_to_i64(value: f64) -> Option<i64> {
    if value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_numbers_and_decimal_strings() {
        assert_eq!(coerce_number(&json!(12.5)), Some(12.5));
        assert_eq!(coerce_number(&json!("12.5")), Some(12.5));
        assert_eq!(coerce_number(&json!(" 12,5 ")), Some(12.5));
        assert_eq!(coerce_number(&json!("1e3")), Some(1000.0));
    }

    #[test]
    fn malformed_values_become_missing() {
        assert_eq!(coerce_number(&json!("")), None);
        assert_eq!(coerce_number(&json!("abc")), None);
        assert_eq!(coerce_number(&json!("NaN")), None);
        assert_eq!(coerce_number(&json!("inf")), None);
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!([1])), None);
    }

    #[test]
    fn integers_reject_fractions() {
        assert_eq!(coerce_integer(&json!("2001")), Some(2001));
        assert_eq!(coerce_integer(&json!(2001.0)), Some(2001));
        assert_eq!(coerce_integer(&json!("2001.0")), Some(2001));
        assert_eq!(coerce_integer(&json!("2001.5")), None);
        assert_eq!(coerce_integer(&json!("year")), None);
    }
}
