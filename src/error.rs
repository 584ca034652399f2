//! Error types for the snakelet interpreter

use thiserror::Error;

/// Interpreter errors
///
/// Lexing, parsing and evaluation all report through this one type. Since the
/// interpreter parses and executes in a single pass, a syntax error further
/// down a program surfaces only after the statements before it have run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Lexer errors
    /// Character that starts no token
    ///
    /// **Triggered by:** a lone `!`, `$`, `.5` and friends
    #[error("Unexpected character '{ch}' on line {line}")]
    UnexpectedCharacter {
        /// Offending character
        ch: char,
        /// Line number where it appears
        line: usize,
    },

    /// String literal without a closing quote on the same line
    #[error("Unterminated string on line {line}")]
    UnterminatedString {
        /// Line on which the string starts
        line: usize,
    },

    /// Dedent to a column that matches no enclosing block
    ///
    /// **Example:** a block indented to column 5 followed by a line at column 3
    #[error("Indentation error on line {line}: column {column} matches no enclosing block")]
    IndentationError {
        /// Line of the misaligned token
        line: usize,
        /// Column the line starts at
        column: usize,
    },

    // Parse errors
    /// Token category did not match the grammar
    #[error("Syntax error on line {line}: expected {expected}, got {got} '{lexeme}'")]
    UnexpectedToken {
        /// Line of the offending token
        line: usize,
        /// Expected token category
        expected: String,
        /// Actual token category
        got: String,
        /// Lexeme of the offending token
        lexeme: String,
    },

    /// Cursor ran past the final token
    #[error("Unexpected end of file")]
    UnexpectedEof,

    /// Numeric literal that cannot be represented
    #[error("Invalid {kind} literal '{lexeme}' on line {line}")]
    InvalidLiteral {
        /// `int` or `float`
        kind: &'static str,
        /// Literal text
        lexeme: String,
        /// Line of the literal
        line: usize,
    },

    // Runtime errors
    /// Read of a name that was never assigned
    ///
    /// **Prevention:** assign the name before reading it
    #[error("Name {name} not declared (line {line})")]
    UndefinedVariable {
        /// Variable name
        name: String,
        /// Line of the read
        line: usize,
    },

    /// Arithmetic between operand types that have no meaning together
    ///
    /// **Example:** `'a' + 1`, `'a' - 'b'`
    #[error("Invalid operation: {op} on types {left_type} and {right_type}")]
    InvalidOperation {
        /// Operator symbol
        op: &'static str,
        /// Left operand type
        left_type: &'static str,
        /// Right operand type
        right_type: &'static str,
    },

    /// Ordering comparison between text and a number
    ///
    /// **Example:** `1 < '1'`
    #[error("Invalid comparison: cannot compare string with number using {op}")]
    InvalidComparison {
        /// Operator symbol
        op: &'static str,
    },

    /// Builtin conversion failure, e.g. `int('abc')`
    #[error("Invalid literal for int(): {value}")]
    InvalidConversion {
        /// Display form of the rejected value
        value: String,
    },

    /// Integer division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Loop ran longer than the configured limit
    #[error("Too many iterations (limit: {limit})")]
    TooManyIterations {
        /// Maximum allowed iterations
        limit: usize,
    },

    /// Value stack popped while empty; always an interpreter bug
    #[error("Internal error: value stack underflow")]
    StackUnderflow,

    /// Console read or write failure
    #[error("I/O error: {0}")]
    Io(String),
}

/// Which tier an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTier {
    /// Lexical, syntax and name-resolution diagnostics
    Syntax,
    /// Type mismatches and other faults raised while evaluating
    Runtime,
    /// Interpreter bugs and host failures
    Internal,
}

impl Error {
    /// Classify the error tier
    pub fn classify(&self) -> ErrorTier {
        match self {
            Error::UnexpectedCharacter { .. }
            | Error::UnterminatedString { .. }
            | Error::IndentationError { .. }
            | Error::UnexpectedToken { .. }
            | Error::UnexpectedEof
            | Error::InvalidLiteral { .. }
            | Error::UndefinedVariable { .. } => ErrorTier::Syntax,

            Error::InvalidOperation { .. }
            | Error::InvalidComparison { .. }
            | Error::InvalidConversion { .. }
            | Error::DivisionByZero
            | Error::TooManyIterations { .. } => ErrorTier::Runtime,

            Error::StackUnderflow | Error::Io(_) => ErrorTier::Internal,
        }
    }

    /// Line number the error points at, when it has one
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::UnexpectedCharacter { line, .. }
            | Error::UnterminatedString { line }
            | Error::IndentationError { line, .. }
            | Error::UnexpectedToken { line, .. }
            | Error::InvalidLiteral { line, .. }
            | Error::UndefinedVariable { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

/// Result type for snakelet operations
pub type Result<T> = std::result::Result<T, Error>;
