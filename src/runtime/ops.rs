//! Binary operator semantics
//!
//! Both tables are total: every pair of operand types maps to either a value
//! or an explicit error.

use crate::error::{Error, Result};
use crate::lexer::TokenKind;
use crate::runtime::Value;

/// Arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl ArithOp {
    /// Operator spelled by a token, if any
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(ArithOp::Add),
            TokenKind::Minus => Some(ArithOp::Sub),
            TokenKind::Star => Some(ArithOp::Mul),
            TokenKind::Slash => Some(ArithOp::Div),
            _ => None,
        }
    }

    /// Source spelling
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
}

impl CompareOp {
    /// Operator spelled by a token, if any
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Eq => Some(CompareOp::Eq),
            TokenKind::NotEq => Some(CompareOp::NotEq),
            TokenKind::Lt => Some(CompareOp::Lt),
            TokenKind::LtEq => Some(CompareOp::LtEq),
            TokenKind::Gt => Some(CompareOp::Gt),
            TokenKind::GtEq => Some(CompareOp::GtEq),
            _ => None,
        }
    }

    /// Source spelling
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::NotEq => "!=",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
        }
    }

    fn test<T: PartialOrd + ?Sized>(&self, a: &T, b: &T) -> bool {
        match self {
            CompareOp::Eq => a == b,
            CompareOp::NotEq => a != b,
            CompareOp::Lt => a < b,
            CompareOp::LtEq => a <= b,
            CompareOp::Gt => a > b,
            CompareOp::GtEq => a >= b,
        }
    }
}

/// Apply an arithmetic operator
pub fn arithmetic(op: ArithOp, left: Value, right: Value) -> Result<Value> {
    let mismatch = Error::InvalidOperation {
        op: op.symbol(),
        left_type: left.type_name(),
        right_type: right.type_name(),
    };

    match (op, left.normalized(), right.normalized()) {
        (_, Value::Int(a), Value::Int(b)) => int_arithmetic(op, a, b),
        (_, Value::Float(a), Value::Float(b)) => Ok(Value::Float(float_arithmetic(op, a, b))),
        (_, Value::Int(a), Value::Float(b)) => {
            Ok(Value::Float(float_arithmetic(op, a as f64, b)))
        }
        (_, Value::Float(a), Value::Int(b)) => {
            Ok(Value::Float(float_arithmetic(op, a, b as f64)))
        }
        (ArithOp::Add, Value::Text(a), Value::Text(b)) => Ok(Value::Text(a + &b)),
        (ArithOp::Mul, Value::Text(s), Value::Int(n))
        | (ArithOp::Mul, Value::Int(n), Value::Text(s)) => {
            repeat(&s, n).map(Value::Text).ok_or(mismatch)
        }
        _ => Err(mismatch),
    }
}

fn int_arithmetic(op: ArithOp, a: i64, b: i64) -> Result<Value> {
    let n = match op {
        ArithOp::Add => a.wrapping_add(b),
        ArithOp::Sub => a.wrapping_sub(b),
        ArithOp::Mul => a.wrapping_mul(b),
        ArithOp::Div => {
            if b == 0 {
                return Err(Error::DivisionByZero);
            }
            a.wrapping_div(b)
        }
    };
    Ok(Value::Int(n))
}

fn float_arithmetic(op: ArithOp, a: f64, b: f64) -> f64 {
    match op {
        ArithOp::Add => a + b,
        ArithOp::Sub => a - b,
        ArithOp::Mul => a * b,
        ArithOp::Div => a / b,
    }
}

/// `None` when the result cannot be allocated
fn repeat(s: &str, n: i64) -> Option<String> {
    if n <= 0 {
        return Some(String::new());
    }
    let n = usize::try_from(n).ok()?;
    let total = s.len().checked_mul(n)?;

    let mut out = String::new();
    out.try_reserve_exact(total).ok()?;
    for _ in 0..n {
        out.push_str(s);
    }
    Some(out)
}

/// Apply a comparison operator
///
/// The `None` sentinel equals only itself and differs from everything.
/// Text compares lexicographically with text; text against a number is never
/// equal (nor unequal) and cannot be ordered.
pub fn compare(left: &Value, right: &Value, op: CompareOp) -> Result<bool> {
    if left.is_none() || right.is_none() {
        return Ok((left.is_none() && right.is_none()) || op == CompareOp::NotEq);
    }

    match (left.as_text(), right.as_text()) {
        (Some(a), Some(b)) => Ok(op.test(a, b)),
        (Some(_), None) | (None, Some(_)) => match op {
            CompareOp::Eq | CompareOp::NotEq => Ok(false),
            _ => Err(Error::InvalidComparison { op: op.symbol() }),
        },
        (None, None) => match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => Ok(op.test(&a, &b)),
            _ => Err(Error::InvalidComparison { op: op.symbol() }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_arithmetic() {
        assert_eq!(
            arithmetic(ArithOp::Add, Value::Int(2), Value::Int(3)),
            Ok(Value::Int(5))
        );
        assert_eq!(
            arithmetic(ArithOp::Sub, Value::Int(2), Value::Int(3)),
            Ok(Value::Int(-1))
        );
        assert_eq!(
            arithmetic(ArithOp::Div, Value::Int(7), Value::Int(2)),
            Ok(Value::Int(3))
        );
        assert_eq!(
            arithmetic(ArithOp::Div, Value::Int(-7), Value::Int(2)),
            Ok(Value::Int(-3))
        );
    }

    #[test]
    fn test_mixed_arithmetic_promotes() {
        assert_eq!(
            arithmetic(ArithOp::Add, Value::Float(2.0), Value::Int(3)),
            Ok(Value::Float(5.0))
        );
        assert_eq!(
            arithmetic(ArithOp::Div, Value::Int(1), Value::Float(4.0)),
            Ok(Value::Float(0.25))
        );
    }

    #[test]
    fn test_bool_acts_as_int() {
        assert_eq!(
            arithmetic(ArithOp::Add, Value::Bool(true), Value::Int(1)),
            Ok(Value::Int(2))
        );
    }

    #[test]
    fn test_text_operations() {
        assert_eq!(
            arithmetic(ArithOp::Add, Value::text("a"), Value::text("b")),
            Ok(Value::text("ab"))
        );
        assert_eq!(
            arithmetic(ArithOp::Mul, Value::text("ab"), Value::Int(3)),
            Ok(Value::text("ababab"))
        );
        assert_eq!(
            arithmetic(ArithOp::Mul, Value::Int(3), Value::text("ab")),
            Ok(Value::text("ababab"))
        );
        assert_eq!(
            arithmetic(ArithOp::Mul, Value::text("ab"), Value::Int(-2)),
            Ok(Value::text(""))
        );
    }

    #[test]
    fn test_unallocatable_repetition_is_an_error() {
        assert_eq!(
            arithmetic(ArithOp::Mul, Value::text("ab"), Value::Int(100_000_000_000_000)),
            Err(Error::InvalidOperation {
                op: "*",
                left_type: "str",
                right_type: "int",
            })
        );
        assert_eq!(
            arithmetic(ArithOp::Mul, Value::Int(i64::MAX), Value::text("abc")),
            Err(Error::InvalidOperation {
                op: "*",
                left_type: "int",
                right_type: "str",
            })
        );
    }

    #[test]
    fn test_invalid_operations() {
        assert_eq!(
            arithmetic(ArithOp::Add, Value::text("a"), Value::Int(1)),
            Err(Error::InvalidOperation {
                op: "+",
                left_type: "str",
                right_type: "int",
            })
        );
        assert!(arithmetic(ArithOp::Sub, Value::text("a"), Value::text("b")).is_err());
        assert!(arithmetic(ArithOp::Mul, Value::text("a"), Value::text("b")).is_err());
        assert!(arithmetic(ArithOp::Div, Value::text("a"), Value::Int(2)).is_err());
        assert!(arithmetic(ArithOp::Mul, Value::text("a"), Value::Float(2.0)).is_err());
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            arithmetic(ArithOp::Div, Value::Int(1), Value::Int(0)),
            Err(Error::DivisionByZero)
        );
        assert_eq!(
            arithmetic(ArithOp::Div, Value::Float(1.0), Value::Int(0)),
            Ok(Value::Float(f64::INFINITY))
        );
    }

    #[test]
    fn test_none_comparisons() {
        assert_eq!(compare(&Value::None, &Value::None, CompareOp::Eq), Ok(true));
        assert_eq!(compare(&Value::None, &Value::Int(5), CompareOp::NotEq), Ok(true));
        assert_eq!(compare(&Value::None, &Value::Int(5), CompareOp::Eq), Ok(false));
        assert_eq!(compare(&Value::None, &Value::Int(5), CompareOp::Lt), Ok(false));
        assert_eq!(
            compare(&Value::text("None"), &Value::None, CompareOp::Eq),
            Ok(true)
        );
    }

    #[test]
    fn test_text_comparisons() {
        assert_eq!(
            compare(&Value::text("abc"), &Value::text("abd"), CompareOp::Lt),
            Ok(true)
        );
        assert_eq!(
            compare(&Value::text("b"), &Value::text("abc"), CompareOp::GtEq),
            Ok(true)
        );
    }

    #[test]
    fn test_text_against_number() {
        assert_eq!(
            compare(&Value::Int(1), &Value::text("1"), CompareOp::Eq),
            Ok(false)
        );
        assert_eq!(
            compare(&Value::Int(1), &Value::text("1"), CompareOp::NotEq),
            Ok(false)
        );
        assert_eq!(
            compare(&Value::Int(1), &Value::text("1"), CompareOp::Lt),
            Err(Error::InvalidComparison { op: "<" })
        );
    }

    #[test]
    fn test_numeric_comparisons_promote() {
        assert_eq!(
            compare(&Value::Int(2), &Value::Float(2.0), CompareOp::Eq),
            Ok(true)
        );
        assert_eq!(
            compare(&Value::Float(1.5), &Value::Int(2), CompareOp::Lt),
            Ok(true)
        );
        assert_eq!(
            compare(&Value::Bool(true), &Value::Int(1), CompareOp::Eq),
            Ok(true)
        );
    }
}
