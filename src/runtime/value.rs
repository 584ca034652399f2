use std::fmt;

use crate::error::{Error, Result};

/// Runtime value representation
///
/// `Bool` and `None` are distinct tags, but they keep the behavior of the
/// language's historical encoding: booleans act as the integers 0 and 1, and
/// `None` acts as the text `"None"` everywhere except comparisons, where any
/// `"None"` text is also treated as the sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit integer value
    Int(i64),
    /// 64-bit floating-point value
    Float(f64),
    /// String value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// The `None` sentinel
    None,
}

impl Value {
    /// Creates a text value
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "str",
            Value::Bool(_) => "bool",
            Value::None => "NoneType",
        }
    }

    /// True for the sentinel, including its text spelling
    pub fn is_none(&self) -> bool {
        match self {
            Value::None => true,
            Value::Text(s) => s == "None",
            _ => false,
        }
    }

    /// Condition truth: only the integer 1 (or `True`) counts as true
    pub fn is_true(&self) -> bool {
        matches!(self, Value::Int(1) | Value::Bool(true))
    }

    /// Collapse `Bool` to `Int` and `None` to its text form
    pub fn normalized(self) -> Value {
        match self {
            Value::Bool(b) => Value::Int(b as i64),
            Value::None => Value::text("None"),
            other => other,
        }
    }

    /// Numeric view used by comparisons
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Returns the string slice of a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Unary minus. Only numbers change sign; other values pass through.
    pub fn negate(self) -> Value {
        match self {
            Value::Int(n) => Value::Int(n.wrapping_neg()),
            Value::Float(f) => Value::Float(-f),
            other => other,
        }
    }

    /// Conversion performed by the `int()` builtin
    pub fn to_int(&self) -> Result<Value> {
        match self {
            Value::Int(n) => Ok(Value::Int(*n)),
            Value::Bool(b) => Ok(Value::Int(*b as i64)),
            Value::Float(f) => Ok(Value::Int(f.trunc() as i64)),
            Value::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| Error::InvalidConversion { value: s.clone() }),
            Value::None => Err(Error::InvalidConversion {
                value: "None".to_string(),
            }),
        }
    }

    /// Form used for the first argument of `print`: floats get one decimal
    pub fn to_print_first(&self) -> String {
        match self {
            Value::Float(f) => format!("{:.1}", f),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Text(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", *b as i64),
            Value::None => write!(f, "None"),
        }
    }
}
