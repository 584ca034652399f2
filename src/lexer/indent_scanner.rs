use super::token::{Token, TokenKind};
use crate::error::{Error, Result};

/// Scanner for the indentation-sensitive surface syntax
///
/// Produces the whole token sequence in one pass. Block structure is encoded
/// with synthetic `Indent`/`Dedent` tokens derived from the column of the first
/// token on each logical line (the off-side rule).
pub struct IndentScanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Start position of current token
    start: usize,
    /// Line on which the current token starts
    start_line: usize,
    /// Column at which the current token starts
    start_column: usize,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Columns of the open blocks, strictly increasing, bottom is always 1
    indents: Vec<usize>,
    /// No token has been produced on the current line yet
    at_line_start: bool,
}

impl IndentScanner {
    /// Creates a new scanner, appending a final newline when the source lacks one
    pub fn new(source: &str) -> Self {
        let mut source: Vec<char> = source.chars().collect();
        if source.last() != Some(&'\n') {
            source.push('\n');
        }

        IndentScanner {
            source,
            tokens: Vec::new(),
            start: 0,
            start_line: 1,
            start_column: 1,
            current: 0,
            line: 1,
            column: 1,
            indents: vec![1],
            at_line_start: true,
        }
    }

    /// Scans all tokens from source code and returns them as a vector
    ///
    /// The sequence always ends with the `Dedent`s that close every open block
    /// followed by a single `Eof`.
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.start_column = self.column;
            self.scan_token()?;
        }

        self.dedent_to(1, self.line)?;
        self.tokens
            .push(Token::new(TokenKind::Eof, String::new(), self.line, 1));

        tracing::debug!(
            tokens = self.tokens.len(),
            lines = self.line - 1,
            "lexed source"
        );
        Ok(std::mem::take(&mut self.tokens))
    }

    fn scan_token(&mut self) -> Result<()> {
        let c = self.advance();

        match c {
            ' ' | '\t' | '\r' | '\x0c' => {}

            '\n' => self.end_line(),

            '#' => self.skip_line_comment(),

            '\'' | '"' => {
                self.begin_token()?;
                self.scan_string(c)?;
            }

            c if c.is_ascii_digit() => {
                self.begin_token()?;
                self.scan_number();
            }

            c if c.is_alphabetic() || c == '_' => {
                self.begin_token()?;
                self.scan_identifier_or_keyword();
            }

            c => {
                self.begin_token()?;
                self.scan_operator(c)?;
            }
        }

        Ok(())
    }

    /// Apply the off-side rule when the current token is the first on its line
    fn begin_token(&mut self) -> Result<()> {
        if !self.at_line_start {
            return Ok(());
        }
        self.at_line_start = false;

        let column = self.start_column;
        if column > self.current_indent() {
            self.indents.push(column);
            self.tokens
                .push(Token::new(TokenKind::Indent, String::new(), self.start_line, column));
            Ok(())
        } else {
            self.dedent_to(column, self.start_line)
        }
    }

    /// Pop blocks until `column` is the innermost open level
    fn dedent_to(&mut self, column: usize, line: usize) -> Result<()> {
        while self.current_indent() > column {
            self.indents.pop();
            let level = self.current_indent();
            self.tokens
                .push(Token::new(TokenKind::Dedent, String::new(), line, level));
        }

        if self.current_indent() != column {
            return Err(Error::IndentationError { line, column });
        }
        Ok(())
    }

    fn current_indent(&self) -> usize {
        self.indents.last().copied().unwrap_or(1)
    }

    /// Newline ends a logical line only if the line produced a token
    fn end_line(&mut self) {
        if !self.at_line_start {
            self.tokens.push(Token::new(
                TokenKind::Newline,
                "\n",
                self.start_line,
                self.start_column,
            ));
        }
        self.line += 1;
        self.column = 1;
        self.at_line_start = true;
    }

    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
    }

    fn scan_string(&mut self, quote: char) -> Result<()> {
        let mut value = String::new();

        loop {
            if self.is_at_end() || self.peek() == '\n' {
                return Err(Error::UnterminatedString {
                    line: self.start_line,
                });
            }

            let c = self.advance();
            if c == quote {
                break;
            }

            if c != '\\' {
                value.push(c);
                continue;
            }

            if self.is_at_end() {
                return Err(Error::UnterminatedString {
                    line: self.start_line,
                });
            }
            match self.advance() {
                'n' => value.push('\n'),
                't' => value.push('\t'),
                '\n' => {
                    // escaped line break continues the literal on the next line
                    self.line += 1;
                    self.column = 1;
                    value.push('n');
                }
                other => value.push(other),
            }
        }

        self.tokens.push(Token::new(
            TokenKind::String,
            value,
            self.start_line,
            self.start_column,
        ));
        Ok(())
    }

    /// Digits and dots form one literal; any dot makes it a float
    fn scan_number(&mut self) {
        let mut kind = TokenKind::UnsignedInt;
        while self.peek().is_ascii_digit() || self.peek() == '.' {
            if self.peek() == '.' {
                kind = TokenKind::UnsignedFloat;
            }
            self.advance();
        }

        self.add_token(kind);
    }

    fn scan_identifier_or_keyword(&mut self) {
        while self.peek().is_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Name);
        self.add_token(kind);
    }

    /// Two-character operators win over their one-character prefix
    fn scan_operator(&mut self, c: char) -> Result<()> {
        let pair: String = [c, self.peek()].iter().collect();
        if let Some(kind) = TokenKind::operator(&pair) {
            self.advance();
            self.add_token(kind);
            return Ok(());
        }

        match TokenKind::operator(&c.to_string()) {
            Some(kind) if kind != TokenKind::Error => {
                self.add_token(kind);
                Ok(())
            }
            _ => Err(Error::UnexpectedCharacter {
                ch: c,
                line: self.start_line,
            }),
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        self.column += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme: String = self.source[self.start..self.current].iter().collect();
        self.tokens.push(Token::new(
            kind,
            lexeme,
            self.start_line,
            self.start_column,
        ));
    }
}
