use crate::error::{Error, Result};
use crate::runtime::Value;

/// LIFO of intermediate expression results
#[derive(Debug, Clone, Default)]
pub struct ValueStack {
    values: Vec<Value>,
}

impl ValueStack {
    /// Creates an empty stack
    pub fn new() -> Self {
        ValueStack { values: Vec::new() }
    }

    /// Push a value
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Pop the most recent value. An empty stack means the grammar driver is broken.
    pub fn pop(&mut self) -> Result<Value> {
        self.values.pop().ok_or(Error::StackUnderflow)
    }

    /// Pop the right operand, then the left one
    pub fn pop_pair(&mut self) -> Result<(Value, Value)> {
        let right = self.pop()?;
        let left = self.pop()?;
        Ok((left, right))
    }

    /// Replace the top value with `f(top)`
    pub fn map_top(&mut self, f: impl FnOnce(Value) -> Value) -> Result<()> {
        let top = self.pop()?;
        self.push(f(top));
        Ok(())
    }

    /// Returns true if the stack holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_pair_order() {
        let mut stack = ValueStack::new();
        stack.push(Value::Int(1));
        stack.push(Value::Int(2));

        let (left, right) = stack.pop_pair().unwrap();
        assert_eq!(left, Value::Int(1));
        assert_eq!(right, Value::Int(2));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_underflow() {
        let mut stack = ValueStack::new();
        stack.push(Value::Int(1));
        assert_eq!(stack.pop_pair(), Err(Error::StackUnderflow));
    }

    #[test]
    fn test_map_top() {
        let mut stack = ValueStack::new();
        stack.push(Value::Int(4));
        stack.map_top(Value::negate).unwrap();
        assert_eq!(stack.pop(), Ok(Value::Int(-4)));
    }
}
