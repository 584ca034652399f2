use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};

/// Read-only token sequence with a single movable position
#[derive(Debug, Clone)]
pub struct Cursor<'t> {
    tokens: &'t [Token],
    index: usize,
}

impl<'t> Cursor<'t> {
    /// Creates a cursor on the first token.
    ///
    /// `tokens` must be non-empty; the lexer always terminates it with `Eof`.
    /// Reading from a cursor over an empty slice panics.
    pub fn new(tokens: &'t [Token]) -> Self {
        debug_assert!(!tokens.is_empty(), "token sequence must end with Eof");
        Cursor { tokens, index: 0 }
    }

    /// The token under the cursor
    pub fn current(&self) -> &'t Token {
        let tokens: &'t [Token] = self.tokens;
        &tokens[self.index.min(tokens.len().saturating_sub(1))]
    }

    /// Category of the token under the cursor
    pub fn kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Category of the token after the current one
    pub fn peek_next(&self) -> TokenKind {
        self.tokens
            .get(self.index + 1)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    /// Move to the next token
    pub fn advance(&mut self) -> Result<()> {
        if self.index + 1 >= self.tokens.len() {
            return Err(Error::UnexpectedEof);
        }
        self.index += 1;
        Ok(())
    }

    /// Require the current token to be `expected`, then step past it
    pub fn consume(&mut self, expected: TokenKind) -> Result<&'t Token> {
        let token = self.current();
        if token.kind != expected {
            return Err(self.unexpected(expected.name()));
        }
        self.advance()?;
        Ok(token)
    }

    /// Syntax error at the current token
    pub fn unexpected(&self, expected: &str) -> Error {
        let token = self.current();
        Error::UnexpectedToken {
            line: token.line,
            expected: expected.to_string(),
            got: token.kind.name().to_string(),
            lexeme: token.lexeme.clone(),
        }
    }

    /// Current index, for rewinding
    pub fn position(&self) -> usize {
        self.index
    }

    /// Jump back to a position previously returned by [`Cursor::position`]
    pub fn seek(&mut self, position: usize) {
        self.index = position;
    }
}
