use crate::types::JsValue;

// ToBoolean. NaN is nonzero, so it coerces to true.
pub fn to_boolean(val: &JsValue) -> bool {
    match val {
        JsValue::Undefined | JsValue::Null => false,
        JsValue::Number(n) => *n != 0.0,
        JsValue::String(s) => !s.is_empty(),
        JsValue::Boolean(b) => *b,
        JsValue::Function(_) | JsValue::Object(_) | JsValue::Array(_) => true,
    }
}

// ToNumber. Strings are never parsed.
pub fn to_number(val: &JsValue) -> f64 {
    match val {
        JsValue::Number(n) => *n,
        JsValue::Boolean(b) => *b as u8 as f64,
        _ => f64::NAN,
    }
}

/// ToString. Always yields a freshly allocated buffer.
pub fn to_js_string(val: &JsValue) -> String {
    format!("{val}")
}

/// Prefix parse of a decimal integer in the manner of C `atol`: leading
/// whitespace, an optional sign, then digits up to the first non-digit.
/// No digits at all yields 0.
pub(crate) fn parse_leading_integer(s: &str) -> f64 {
    let trimmed = s.trim_start_matches([' ', '\t', '\n', '\x0b', '\x0c', '\r']);
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let mut n: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        n = n.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    // negate as an integer so "-0" yields +0
    let n = if negative { n.saturating_neg() } else { n };
    n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::JsFunction;
    use crate::types::{ArrayId, ObjectId};

    fn samples() -> Vec<(JsValue, bool)> {
        let obj = ObjectId {
            index: 0,
            generation: 0,
        };
        let arr = ArrayId {
            index: 0,
            generation: 0,
        };
        let func = JsFunction::native("f", 0, |_, _, _| Ok(JsValue::Undefined));
        vec![
            (JsValue::Undefined, false),
            (JsValue::Null, false),
            (JsValue::Number(0.0), false),
            (JsValue::Number(-0.0), false),
            (JsValue::Number(2.5), true),
            (JsValue::Number(f64::NAN), true),
            (JsValue::string(""), false),
            (JsValue::string("x"), true),
            (JsValue::Boolean(false), false),
            (JsValue::Boolean(true), true),
            (JsValue::Function(func), true),
            (JsValue::Object(obj), true),
            (JsValue::Array(arr), true),
        ]
    }

    #[test]
    fn to_boolean_table() {
        for (value, expected) in samples() {
            assert_eq!(to_boolean(&value), expected, "to_boolean({value:?})");
        }
    }

    #[test]
    fn to_number_never_parses_strings() {
        assert_eq!(to_number(&JsValue::Number(4.0)), 4.0);
        assert_eq!(to_number(&JsValue::Boolean(true)), 1.0);
        assert_eq!(to_number(&JsValue::Boolean(false)), 0.0);
        assert!(to_number(&JsValue::string("12")).is_nan());
        assert!(to_number(&JsValue::Null).is_nan());
        assert!(to_number(&JsValue::Undefined).is_nan());
    }

    #[test]
    fn to_string_table() {
        assert_eq!(to_js_string(&JsValue::Number(3.5)), "3.500000");
        assert_eq!(to_js_string(&JsValue::string("s")), "s");
        assert_eq!(to_js_string(&JsValue::Boolean(true)), "true");
        assert_eq!(to_js_string(&JsValue::Null), "null");
        assert_eq!(to_js_string(&JsValue::Undefined), "undefined");
        let func = JsFunction::native("f", 0, |_, _, _| Ok(JsValue::Undefined));
        assert_eq!(to_js_string(&JsValue::Function(func)), "[function]");
        let obj = ObjectId {
            index: 3,
            generation: 1,
        };
        assert_eq!(to_js_string(&JsValue::Object(obj)), "[object Object]");
    }

    #[test]
    fn leading_integer() {
        assert_eq!(parse_leading_integer("42"), 42.0);
        assert_eq!(parse_leading_integer("  -17abc"), -17.0);
        assert_eq!(parse_leading_integer("+8"), 8.0);
        assert_eq!(parse_leading_integer("3.9"), 3.0);
        assert_eq!(parse_leading_integer("abc"), 0.0);
        assert_eq!(parse_leading_integer(""), 0.0);
        let zero = parse_leading_integer("-0");
        assert!(zero.is_sign_positive());
        assert_eq!(to_js_string(&JsValue::Number(zero)), "0.000000");
    }
}
