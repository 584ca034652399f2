//! # snakelet - a small indentation-sensitive scripting language
//!
//! snakelet lexes and runs a Python-like language: assignment, arithmetic,
//! string and boolean expressions, `print`, `if`/`else`, `while`,
//! `def`/`return`/`global` declarations, and the builtins `input()` and
//! `int()`.
//!
//! ## Quick Start
//!
//! ```rust
//! use snakelet::{run_source, InterpreterConfig, ScriptedInput};
//!
//! # fn main() -> snakelet::Result<()> {
//! let code = "\
//! i = 0
//! while i < 3:
//!     print(i)
//!     i = i + 1
//! ";
//!
//! let mut out = Vec::new();
//! run_source(code, &mut out, ScriptedInput::default(), InterpreterConfig::default())?;
//! assert_eq!(String::from_utf8(out).unwrap(), "0\n1\n2\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Source Code → IndentScanner → Tokens → Interpreter → Output
//! ```
//!
//! There is no syntax tree. The [`Interpreter`] has one method per grammar
//! rule; each recognizes its construct and executes it in the same step.
//! Unexecuted blocks (a false `if` branch, the final test of a `while`, a
//! `def` body) are skipped by scanning `Indent`/`Dedent` columns.
//!
//! - [`IndentScanner`] - tokenizes source, emitting `Indent`/`Dedent`
//! - [`Interpreter`] - parses and executes in one pass
//! - [`Value`] - runtime value representation
//! - [`SymbolTable`] - the single global scope
//!
//! ## Error Handling
//!
//! Every failure, from an unterminated string to `'a' + 1`, is returned as an
//! [`Error`]:
//!
//! ```rust
//! # use snakelet::{run_source, InterpreterConfig, ScriptedInput};
//! let mut out = Vec::new();
//! let err = run_source("print(1 < 'x')\n", &mut out, ScriptedInput::default(),
//!                      InterpreterConfig::default()).unwrap_err();
//! assert!(err.to_string().contains("compare string with number"));
//! ```

pub mod config;
pub mod error;
pub mod lexer;
pub mod runtime;

/// Version of the snakelet interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export main types
pub use config::InterpreterConfig;
pub use error::{Error, ErrorTier, Result};
pub use lexer::{IndentScanner, Token, TokenKind};
pub use runtime::{Interpreter, LineSource, ScriptedInput, StdinSource, SymbolTable, Value};

/// Tokenize and run `source`, writing program output to `out`
///
/// Returns the global names as they stand when the program ends.
pub fn run_source<W, R>(
    source: &str,
    out: W,
    input: R,
    config: InterpreterConfig,
) -> Result<SymbolTable>
where
    W: std::io::Write,
    R: LineSource,
{
    let tokens = lexer::tokenize(source)?;
    let mut interpreter = Interpreter::with_config(&tokens, out, input, config);
    interpreter.run()?;
    let (_, symbols) = interpreter.finish();
    Ok(symbols)
}
