use crate::error::{RuntimeError, RuntimeResult};
use crate::runtime::JsFunction;
use std::fmt;

#[derive(Clone, Debug)]
pub enum JsValue {
    Undefined,
    Null,
    Number(f64),
    String(String),
    Boolean(bool),
    Function(JsFunction),
    Object(ObjectId),
    Array(ArrayId),
}

/// Discriminant of a `JsValue`, used to index the operator tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Undefined,
    Null,
    Number,
    String,
    Boolean,
    Function,
    Object,
    Array,
}

pub const TAG_COUNT: usize = 8;

impl Tag {
    pub const ALL: [Tag; TAG_COUNT] = [
        Tag::Undefined,
        Tag::Null,
        Tag::Number,
        Tag::String,
        Tag::Boolean,
        Tag::Function,
        Tag::Object,
        Tag::Array,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Tag::Undefined => "undefined",
            Tag::Null => "null",
            Tag::Number => "number",
            Tag::String => "string",
            Tag::Boolean => "boolean",
            Tag::Function => "function",
            Tag::Object => "object",
            Tag::Array => "array",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle to an object slot in the runtime heap. The generation makes a
/// handle to a released (and possibly reused) slot detectable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId {
    pub index: usize,
    pub generation: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArrayId {
    pub index: usize,
    pub generation: u32,
}

impl JsValue {
    pub fn string(s: impl Into<String>) -> Self {
        JsValue::String(s.into())
    }

    pub fn tag(&self) -> Tag {
        match self {
            JsValue::Undefined => Tag::Undefined,
            JsValue::Null => Tag::Null,
            JsValue::Number(_) => Tag::Number,
            JsValue::String(_) => Tag::String,
            JsValue::Boolean(_) => Tag::Boolean,
            JsValue::Function(_) => Tag::Function,
            JsValue::Object(_) => Tag::Object,
            JsValue::Array(_) => Tag::Array,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, JsValue::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsValue::Null)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, JsValue::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, JsValue::String(_))
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, JsValue::Number(n) if n.is_nan())
    }

    fn wrong_variant(&self, expected: Tag) -> RuntimeError {
        RuntimeError::WrongVariant {
            expected,
            found: self.tag(),
        }
    }

    pub fn as_number(&self) -> RuntimeResult<f64> {
        match self {
            JsValue::Number(n) => Ok(*n),
            other => Err(other.wrong_variant(Tag::Number)),
        }
    }

    pub fn as_str(&self) -> RuntimeResult<&str> {
        match self {
            JsValue::String(s) => Ok(s),
            other => Err(other.wrong_variant(Tag::String)),
        }
    }

    pub fn as_boolean(&self) -> RuntimeResult<bool> {
        match self {
            JsValue::Boolean(b) => Ok(*b),
            other => Err(other.wrong_variant(Tag::Boolean)),
        }
    }

    pub fn as_function(&self) -> RuntimeResult<&JsFunction> {
        match self {
            JsValue::Function(f) => Ok(f),
            other => Err(other.wrong_variant(Tag::Function)),
        }
    }

    pub fn as_object(&self) -> RuntimeResult<ObjectId> {
        match self {
            JsValue::Object(id) => Ok(*id),
            other => Err(other.wrong_variant(Tag::Object)),
        }
    }

    pub fn as_array(&self) -> RuntimeResult<ArrayId> {
        match self {
            JsValue::Array(id) => Ok(*id),
            other => Err(other.wrong_variant(Tag::Array)),
        }
    }
}

impl From<f64> for JsValue {
    fn from(n: f64) -> Self {
        JsValue::Number(n)
    }
}

impl From<bool> for JsValue {
    fn from(b: bool) -> Self {
        JsValue::Boolean(b)
    }
}

impl From<&str> for JsValue {
    fn from(s: &str) -> Self {
        JsValue::String(s.to_string())
    }
}

impl From<String> for JsValue {
    fn from(s: String) -> Self {
        JsValue::String(s)
    }
}

pub mod number_ops {
    pub fn add(x: f64, y: f64) -> f64 {
        x + y
    }

    pub fn subtract(x: f64, y: f64) -> f64 {
        x - y
    }

    pub fn multiply(x: f64, y: f64) -> f64 {
        x * y
    }

    pub fn divide(x: f64, y: f64) -> f64 {
        x / y
    }

    // C fmod: result takes the sign of the dividend
    pub fn remainder(x: f64, y: f64) -> f64 {
        x % y
    }

    pub fn less_than(x: f64, y: f64) -> bool {
        x < y
    }

    pub fn equal(x: f64, y: f64) -> bool {
        x == y
    }

    /// printf("%f") rendering: six fractional digits, no exponent.
    pub fn to_string(x: f64) -> String {
        if x.is_nan() {
            return "nan".to_string();
        }
        if x.is_infinite() {
            return if x > 0.0 { "inf" } else { "-inf" }.to_string();
        }
        format!("{x:.6}")
    }
}

impl fmt::Display for JsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsValue::Undefined => write!(f, "undefined"),
            JsValue::Null => write!(f, "null"),
            JsValue::Number(n) => write!(f, "{}", number_ops::to_string(*n)),
            JsValue::String(s) => write!(f, "{s}"),
            JsValue::Boolean(b) => write!(f, "{b}"),
            JsValue::Function(_) => write!(f, "[function]"),
            JsValue::Object(_) => write!(f, "[object Object]"),
            // arrays hit the default branch of the C runtime's formatter
            JsValue::Array(_) => write!(f, "null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_formatting() {
        assert_eq!(number_ops::to_string(3.5), "3.500000");
        assert_eq!(number_ops::to_string(42.0), "42.000000");
        assert_eq!(number_ops::to_string(-0.25), "-0.250000");
        assert_eq!(number_ops::to_string(1.0 / 3.0), "0.333333");
        assert_eq!(number_ops::to_string(f64::NAN), "nan");
        assert_eq!(number_ops::to_string(f64::INFINITY), "inf");
        assert_eq!(number_ops::to_string(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn remainder_follows_dividend_sign() {
        assert_eq!(number_ops::remainder(7.5, 2.0), 1.5);
        assert_eq!(number_ops::remainder(-7.0, 3.0), -1.0);
        assert!(number_ops::remainder(1.0, 0.0).is_nan());
    }

    #[test]
    fn tags_index_densely() {
        for (i, tag) in Tag::ALL.iter().enumerate() {
            assert_eq!(tag.index(), i);
        }
    }

    #[test]
    fn checked_access() {
        let n = JsValue::Number(1.5);
        assert_eq!(n.as_number().ok(), Some(1.5));
        assert!(matches!(
            n.as_str(),
            Err(RuntimeError::WrongVariant {
                expected: Tag::String,
                found: Tag::Number
            })
        ));
        let s = JsValue::string("hi");
        assert_eq!(s.as_str().ok(), Some("hi"));
        assert!(s.as_boolean().is_err());
        assert!(JsValue::Null.as_object().is_err());
        assert!(JsValue::Undefined.as_function().is_err());
        assert!(JsValue::Boolean(true).as_array().is_err());
    }

    #[test]
    fn display_values() {
        assert_eq!(format!("{}", JsValue::Undefined), "undefined");
        assert_eq!(format!("{}", JsValue::Null), "null");
        assert_eq!(format!("{}", JsValue::Boolean(false)), "false");
        assert_eq!(format!("{}", JsValue::Number(2.0)), "2.000000");
        assert_eq!(format!("{}", JsValue::string("hi")), "hi");
        let obj = ObjectId {
            index: 0,
            generation: 0,
        };
        assert_eq!(format!("{}", JsValue::Object(obj)), "[object Object]");
    }
}
