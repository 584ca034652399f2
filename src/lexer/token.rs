use serde::{Deserialize, Serialize};

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The category of token
    pub kind: TokenKind,
    /// Source text of the token (decoded content for strings)
    pub lexeme: String,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed).
    /// For `Dedent` this is the column being returned to.
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }
}

/// All token categories of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Special
    /// End of file marker
    Eof,
    /// Unrecognized input; always fatal
    Error,

    // Literals and names
    /// Integer literal
    UnsignedInt,
    /// Floating-point literal
    UnsignedFloat,
    /// String literal
    String,
    /// Identifier that is not a keyword
    Name,

    // Keywords
    /// `print`
    Print,
    /// `None`
    None,
    /// `True`
    True,
    /// `False`
    False,
    /// `pass`
    Pass,
    /// `if`
    If,
    /// `else`
    Else,
    /// `while`
    While,
    /// `def`
    Def,
    /// `return`
    Return,
    /// `global`
    Global,
    /// `input`
    Input,
    /// `int`
    Int,

    // Operators
    /// Assignment operator (=)
    Assign,
    /// Plus operator (+)
    Plus,
    /// Minus operator (-)
    Minus,
    /// Star operator (*)
    Star,
    /// Slash operator (/)
    Slash,
    /// Equality operator (==)
    Eq,
    /// Inequality operator (!=)
    NotEq,
    /// Less than operator (<)
    Lt,
    /// Less than or equal operator (<=)
    LtEq,
    /// Greater than operator (>)
    Gt,
    /// Greater than or equal operator (>=)
    GtEq,

    // Delimiters
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Comma delimiter
    Comma,
    /// Colon delimiter
    Colon,

    // Layout
    /// End of a logical line
    Newline,
    /// Indentation increased
    Indent,
    /// Indentation decreased by one level
    Dedent,
}

impl TokenKind {
    /// Look up a reserved word
    pub fn keyword(s: &str) -> Option<TokenKind> {
        let kind = match s {
            "print" => TokenKind::Print,
            "None" => TokenKind::None,
            "True" => TokenKind::True,
            "False" => TokenKind::False,
            "pass" => TokenKind::Pass,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "def" => TokenKind::Def,
            "return" => TokenKind::Return,
            "global" => TokenKind::Global,
            "input" => TokenKind::Input,
            "int" => TokenKind::Int,
            _ => return None,
        };
        Some(kind)
    }

    /// Look up an operator or delimiter spelled by `s` (one or two characters)
    pub fn operator(s: &str) -> Option<TokenKind> {
        let kind = match s {
            "=" => TokenKind::Assign,
            "(" => TokenKind::LeftParen,
            ")" => TokenKind::RightParen,
            "+" => TokenKind::Plus,
            "-" => TokenKind::Minus,
            "*" => TokenKind::Star,
            "/" => TokenKind::Slash,
            "<" => TokenKind::Lt,
            ">" => TokenKind::Gt,
            "," => TokenKind::Comma,
            ":" => TokenKind::Colon,
            "!" => TokenKind::Error,
            "==" => TokenKind::Eq,
            "!=" => TokenKind::NotEq,
            "<=" => TokenKind::LtEq,
            ">=" => TokenKind::GtEq,
            _ => return None,
        };
        Some(kind)
    }

    /// Upper-case category name used in diagnostics and token dumps
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Error => "ERROR",
            TokenKind::UnsignedInt => "UNSIGNEDINT",
            TokenKind::UnsignedFloat => "UNSIGNEDFLOAT",
            TokenKind::String => "STRING",
            TokenKind::Name => "NAME",
            TokenKind::Print => "PRINT",
            TokenKind::None => "NONE",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Pass => "PASS",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::Def => "DEF",
            TokenKind::Return => "RETURN",
            TokenKind::Global => "GLOBAL",
            TokenKind::Input => "INPUT",
            TokenKind::Int => "INT",
            TokenKind::Assign => "ASSIGNOP",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "TIMES",
            TokenKind::Slash => "DIV",
            TokenKind::Eq => "EQUAL",
            TokenKind::NotEq => "NOTEQUAL",
            TokenKind::Lt => "LESSTHAN",
            TokenKind::LtEq => "LESSEQUAL",
            TokenKind::Gt => "GREATERTHAN",
            TokenKind::GtEq => "GREATEREQUAL",
            TokenKind::LeftParen => "LEFTPARENT",
            TokenKind::RightParen => "RIGHTPARENT",
            TokenKind::Comma => "COMMA",
            TokenKind::Colon => "COLON",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
