//! Numeric text detection.

use super::Value;

/// Parse numeric text into a number value.
///
/// Accepts surrounding ASCII whitespace, an optional sign, digits with an
/// optional fraction and an optional exponent. Text without fraction or
/// exponent becomes `Value::Int` unless it overflows, in which case it becomes
/// `Value::Float`. Returns `None` for anything else, including `inf`, `nan`,
/// hex literals and empty text.
pub fn parse_numeric(text: &str) -> Option<Value> {
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
    if !is_numeric_literal(trimmed) {
        return None;
    }
    let integral = !trimmed.contains(&['.', 'e', 'E'][..]);
    if integral {
        if let Ok(n) = trimmed.parse::<i64>() {
            return Some(Value::Int(n));
        }
    }
    trimmed.parse::<f64>().ok().map(Value::Float)
}

fn is_numeric_literal(text: &str) -> bool {
    let mut chars = text.chars().peekable();
    if matches!(chars.peek(), Some('+' | '-')) {
        chars.next();
    }

    let mut mantissa_digits = 0usize;
    while chars.next_if(char::is_ascii_digit).is_some() {
        mantissa_digits += 1;
    }
    if chars.next_if_eq(&'.').is_some() {
        while chars.next_if(char::is_ascii_digit).is_some() {
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return false;
    }

    if chars.next_if(|c| matches!(c, 'e' | 'E')).is_some() {
        chars.next_if(|c| matches!(c, '+' | '-'));
        let mut exponent_digits = 0usize;
        while chars.next_if(char::is_ascii_digit).is_some() {
            exponent_digits += 1;
        }
        if exponent_digits == 0 {
            return false;
        }
    }

    chars.next().is_none()
}
