//! Interpreter configuration

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`InterpreterConfig::max_loop_iterations`]
pub const MAX_ITERATIONS_ENV: &str = "SNAKELET_MAX_ITERATIONS";

/// Runtime limits for an interpreter run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Maximum number of times a single `while` statement may run its body;
    /// `None` runs loops until their condition fails
    pub max_loop_iterations: Option<usize>,
}

impl InterpreterConfig {
    /// Defaults, with a loop limit only when `SNAKELET_MAX_ITERATIONS` is set
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(MAX_ITERATIONS_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        InterpreterConfig {
            max_loop_iterations: value.and_then(|s| s.trim().parse::<usize>().ok()),
        }
    }

    /// Cap every `while` statement at `limit` iterations
    pub fn with_max_loop_iterations(mut self, limit: usize) -> Self {
        self.max_loop_iterations = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InterpreterConfig::default();
        assert_eq!(config.max_loop_iterations, None);
    }

    #[test]
    fn test_env_value_sets_limit() {
        assert_eq!(
            InterpreterConfig::from_env_value(Some("250")).max_loop_iterations,
            Some(250)
        );
        assert_eq!(InterpreterConfig::from_env_value(Some("lots")), InterpreterConfig::default());
        assert_eq!(InterpreterConfig::from_env_value(None), InterpreterConfig::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: InterpreterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, InterpreterConfig::default());

        let config: InterpreterConfig =
            serde_json::from_str(r#"{"max_loop_iterations": 5}"#).unwrap();
        assert_eq!(config.max_loop_iterations, Some(5));
    }
}
