//! Dynamic value representation.
//!
//! This module provides the closed `Value` enum exchanged across the guest
//! boundary. Primitive values are stored inline, while objects and functions
//! are referenced by the [`ObjectId`] their heap assigned at construction.

use crate::{HostError, HostResult};
use std::fmt;

/// Identity of a host object.
///
/// Assigned once by the object heap and never reused, so two values holding
/// the same `ObjectId` refer to the same host object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Wraps a raw heap slot number.
    pub fn from_raw(raw: u32) -> Self {
        ObjectId(raw)
    }

    /// Returns the raw heap slot number.
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents any dynamic host value.
///
/// # Examples
///
/// ```
/// use core_types::{ObjectId, Value};
///
/// let undefined = Value::Undefined;
/// let number = Value::Number(42.0);
/// let object = Value::Object(ObjectId::from_raw(5));
///
/// assert_eq!(undefined.type_of(), "undefined");
/// assert_eq!(number.type_of(), "number");
/// assert_eq!(object.as_object("example").unwrap(), ObjectId::from_raw(5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The undefined value
    Undefined,
    /// The null value
    Null,
    /// Boolean (true or false)
    Boolean(bool),
    /// IEEE 754 double-precision number
    Number(f64),
    /// String, identified by content
    String(String),
    /// Host object (plain object, array, buffer, typed view, wrapper)
    Object(ObjectId),
    /// Callable host object
    Function(ObjectId),
}

impl Value {
    /// Returns the `typeof` name for this value.
    ///
    /// ```
    /// use core_types::Value;
    ///
    /// assert_eq!(Value::Null.type_of(), "object");
    /// assert_eq!(Value::String("x".into()).type_of(), "string");
    /// ```
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object", // historical quirk
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    /// Returns the identity of an object or function value.
    ///
    /// # Errors
    ///
    /// Returns `HostError::TypeMismatch` naming `context` for primitives.
    pub fn as_object(&self, context: &'static str) -> HostResult<ObjectId> {
        match self {
            Value::Object(id) | Value::Function(id) => Ok(*id),
            other => Err(HostError::type_mismatch(context, "object", other.describe())),
        }
    }

    /// Returns the numeric payload of a number value.
    ///
    /// # Errors
    ///
    /// Returns `HostError::TypeMismatch` naming `context` for anything else.
    pub fn as_number(&self, context: &'static str) -> HostResult<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(HostError::type_mismatch(context, "number", other.describe())),
        }
    }

    /// Returns true for `null` and `undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Short description used in diagnostics, e.g. `number 3` or `object #12`.
    pub fn describe(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Boolean(b) => format!("boolean {}", b),
            Value::Number(_) => format!("number {}", self),
            Value::String(s) => format!("string {:?}", s),
            Value::Object(id) => format!("object {}", id),
            Value::Function(id) => format!("function {}", id),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// String conversion, following the host's `String()` rules:
/// - undefined → "undefined"
/// - null → "null"
/// - boolean → "true" or "false"
/// - number → shortest round-trip digits, exponent form below 1e-6 and
///   from 1e21 up
/// - object → "[object Object]"
///
/// Arrays need the heap to join their elements and are handled there.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Number(n) => f.write_str(&number_to_string(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::Object(_) => write!(f, "[object Object]"),
            Value::Function(_) => write!(f, "function () {{ [native code] }}"),
        }
    }
}

/// Formats a number the way the host's `Number.prototype.toString()` does.
fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let mut buffer = ryu::Buffer::new();
    let (digits, point) = decimal_digits(buffer.format_finite(n.abs()));
    let sign = if n < 0.0 { "-" } else { "" };
    let k = digits.len() as i32;

    let body = if k <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{}.{}", int, frac)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat(-point as usize), digits)
    } else {
        let exponent = point - 1;
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", lead, exp_sign, exponent.abs())
        } else {
            format!("{}.{}e{}{}", lead, rest, exp_sign, exponent.abs())
        }
    };
    format!("{}{}", sign, body)
}

/// Splits ryu output into significant digits (no leading or trailing
/// zeros) and the position of the decimal point relative to them.
fn decimal_digits(formatted: &str) -> (String, i32) {
    let (mantissa, exponent) = match formatted.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (formatted, 0),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mut point = int.len() as i32 + exponent;

    let all = format!("{}{}", int, frac);
    let trimmed = all.trim_start_matches('0');
    point -= (all.len() - trimmed.len()) as i32;
    (trimmed.trim_end_matches('0').to_string(), point)
}
