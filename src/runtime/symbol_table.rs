use std::collections::HashMap;

use crate::runtime::Value;

/// Global name table
///
/// The language has exactly one scope. Assignment inserts or overwrites;
/// nothing is ever removed during a run.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    variables: HashMap<String, Value>,
}

impl SymbolTable {
    /// Creates an empty table
    pub fn new() -> Self {
        SymbolTable {
            variables: HashMap::new(),
        }
    }

    /// Bind `name` to `value`, replacing any previous binding
    pub fn assign(&mut self, name: &str, value: Value) {
        tracing::trace!(name, %value, "assign");
        self.variables.insert(name.to_string(), value);
    }

    /// Look up a name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Number of bound names
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if no name is bound
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Get all bound names (sorted)
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.variables.keys().cloned().collect();
        names.sort();
        names
    }
}
