//! Contains the `JsonValue` enum, the decoded tree produced by `parse`.
use crate::error::ParseError;
use num_bigint::BigInt;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A decoded number.
///
/// Lexemes without a `.` are integers; lexemes with one are floats.
/// Integers take the narrowest variant that holds them exactly.
#[derive(Debug, PartialEq, Clone)]
pub enum JsonNumber {
    /// A signed 64-bit integer.
    I64(i64),
    /// A non-negative integer too large for `i64`.
    U64(u64),
    /// An integer outside both `i64` and `u64`.
    Big(BigInt),
    /// A 64-bit floating-point number.
    F64(f64),
}

impl JsonNumber {
    /// Returns `true` for `I64`, `U64` and `Big`.
    pub fn is_integer(&self) -> bool {
        !matches!(self, JsonNumber::F64(_))
    }

    /// Returns `true` for `F64`.
    pub fn is_float(&self) -> bool {
        matches!(self, JsonNumber::F64(_))
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonNumber::I64(n) => write!(f, "{}", n),
            JsonNumber::U64(n) => write!(f, "{}", n),
            JsonNumber::Big(n) => write!(f, "{}", n),
            JsonNumber::F64(n) => write!(f, "{}", n),
        }
    }
}

/// A node of the decoded tree.
#[derive(Debug, PartialEq, Clone)]
pub enum JsonValue {
    /// `null`.
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// An integer or a float.
    Number(JsonNumber),
    /// The raw characters between the quotes, escapes left untouched.
    String(String),
    /// An ordered list of values.
    Array(Vec<JsonValue>),
    /// A map of keys to values. Later duplicate keys replace earlier ones.
    Object(BTreeMap<String, JsonValue>),
}

impl JsonValue {
    /// Parses a source string into a `JsonValue`.
    ///
    /// Shorthand for [`crate::parse`].
    pub fn parse(input: &str) -> Result<JsonValue, ParseError> {
        crate::parse(input)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is an integer that fits in `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonValue::Number(JsonNumber::I64(n)) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number if this is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            JsonValue::Number(JsonNumber::I64(n)) => u64::try_from(*n).ok(),
            JsonValue::Number(JsonNumber::U64(n)) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number if this is an integer of any size.
    pub fn as_big_int(&self) -> Option<BigInt> {
        match self {
            JsonValue::Number(JsonNumber::I64(n)) => Some(BigInt::from(*n)),
            JsonValue::Number(JsonNumber::U64(n)) => Some(BigInt::from(*n)),
            JsonValue::Number(JsonNumber::Big(n)) => Some(n.clone()),
            _ => None,
        }
    }

    /// Returns any number widened to `f64`. Big integers round to the
    /// nearest `f64`, or to infinity past `f64::MAX`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(JsonNumber::I64(n)) => Some(*n as f64),
            JsonValue::Number(JsonNumber::U64(n)) => Some(*n as f64),
            JsonValue::Number(JsonNumber::Big(n)) => n.to_string().parse().ok(),
            JsonValue::Number(JsonNumber::F64(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<JsonValue>> {
        match self {
            JsonValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, JsonValue>> {
        match self {
            JsonValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Looks up `key` if this is an object.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|o| o.get(key))
    }
}

impl FromStr for JsonValue {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Boolean(b)
    }
}

impl From<i64> for JsonValue {
    fn from(n: i64) -> Self {
        JsonValue::Number(JsonNumber::I64(n))
    }
}

impl From<f64> for JsonValue {
    fn from(n: f64) -> Self {
        JsonValue::Number(JsonNumber::F64(n))
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(a: Vec<JsonValue>) -> Self {
        JsonValue::Array(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_kinds() {
        assert!(JsonNumber::I64(-3).is_integer());
        assert!(JsonNumber::U64(u64::MAX).is_integer());
        assert!(JsonNumber::Big(BigInt::from(u64::MAX) + 1).is_integer());
        assert!(JsonNumber::F64(0.5).is_float());
        assert!(!JsonNumber::F64(1.0).is_integer());
    }

    #[test]
    fn test_number_display() {
        assert_eq!(JsonNumber::I64(-42).to_string(), "-42");
        assert_eq!(JsonNumber::U64(18446744073709551615).to_string(), "18446744073709551615");
        assert_eq!(JsonNumber::F64(2.5).to_string(), "2.5");
        assert_eq!(
            JsonNumber::Big(BigInt::from(i64::MIN) - 1).to_string(),
            "-9223372036854775809"
        );
    }

    #[test]
    fn test_big_int_accessors() {
        let big: BigInt = "123456789012345678901234567890".parse().unwrap();
        let v = JsonValue::Number(JsonNumber::Big(big.clone()));
        assert_eq!(v.as_big_int(), Some(big));
        assert_eq!(v.as_i64(), None);
        assert_eq!(v.as_u64(), None);
        let widened = v.as_f64().unwrap();
        assert!((widened - 1.2345678901234568e29).abs() < 1e14);

        assert_eq!(JsonValue::from(-7i64).as_big_int(), Some(BigInt::from(-7)));
        assert_eq!(JsonValue::from(0.5).as_big_int(), None);
    }

    #[test]
    fn test_accessors() {
        let mut map = BTreeMap::new();
        map.insert("name".to_string(), JsonValue::from("Alice"));
        map.insert("age".to_string(), JsonValue::from(30i64));
        let obj = JsonValue::Object(map);

        assert_eq!(obj.get("name").and_then(JsonValue::as_str), Some("Alice"));
        assert_eq!(obj.get("age").and_then(JsonValue::as_i64), Some(30));
        assert_eq!(obj.get("age").and_then(JsonValue::as_f64), Some(30.0));
        assert!(obj.get("missing").is_none());
        assert!(obj.as_array().is_none());

        assert_eq!(JsonValue::from(-1i64).as_u64(), None);
        assert_eq!(
            JsonValue::Number(JsonNumber::U64(u64::MAX)).as_u64(),
            Some(u64::MAX)
        );
        assert_eq!(JsonValue::from(true).as_bool(), Some(true));
        assert!(JsonValue::Null.is_null());
        assert_eq!(JsonValue::from(1.5).as_i64(), None);
    }

    #[test]
    fn test_from_str() {
        let v: JsonValue = "[1, 2.5]".parse().unwrap();
        assert_eq!(
            v,
            JsonValue::from(vec![JsonValue::from(1i64), JsonValue::from(2.5)])
        );
        assert_eq!(JsonValue::parse("null").unwrap(), JsonValue::Null);
    }
}
