//! Lexical analysis for snakelet
//!
//! Converts source text into a stream of tokens, encoding block structure
//! with synthetic `Indent`/`Dedent` tokens.

mod indent_scanner;
mod token;

pub use indent_scanner::IndentScanner;
pub use token::{Token, TokenKind};

use crate::error::Result;

/// Tokenize a whole source text
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    IndentScanner::new(source).scan_tokens()
}

/// Render tokens one per line as `<lexeme> <CATEGORY>`, followed by a count
pub fn dump_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let lexeme = match token.kind {
            TokenKind::Newline => "\\n",
            _ => token.lexeme.as_str(),
        };
        out.push_str(lexeme);
        out.push(' ');
        out.push_str(token.kind.name());
        out.push('\n');
    }
    out.push_str(&format!("length of tokenlist {}\n", tokens.len()));
    out
}
