use std::io::Write;

use crate::config::InterpreterConfig;
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};
use crate::runtime::ops::{self, ArithOp, CompareOp};
use crate::runtime::{Cursor, LineSource, SymbolTable, Value, ValueStack};

/// Fused parser and executor
///
/// Walks the token sequence with one cursor. Every grammar rule is a method
/// that both recognizes its construct and performs its effect, so no syntax
/// tree is ever built:
///
/// ```text
/// program      → stmt* EOF
/// stmt         → simplestmt NEWLINE | ifstmt | whilestmt | defstmt
/// simplestmt   → assignment | functioncall | printstmt | pass | return | global
/// codeblock    → NEWLINE INDENT stmt+ DEDENT
/// relexpr      → expr [ relop expr ]
/// expr         → term (( + | - ) term)*
/// term         → factor (( * | / ) factor)*
/// factor       → (+|-) factor | literal | NAME | functioncall | ( relexpr )
///              | input ( [STRING] ) | int ( relexpr )
/// ```
///
/// Expression rules leave their result on the value stack. Blocks that are
/// not executed are passed over by [`Interpreter::skip_block`], which looks
/// only at token categories and columns.
pub struct Interpreter<'t, W: Write, R: LineSource> {
    cursor: Cursor<'t>,
    stack: ValueStack,
    symbols: SymbolTable,
    out: W,
    input: R,
    config: InterpreterConfig,
}

impl<'t, W: Write, R: LineSource> Interpreter<'t, W, R> {
    /// Creates an interpreter over `tokens` with no loop limit
    pub fn new(tokens: &'t [Token], out: W, input: R) -> Self {
        Self::with_config(tokens, out, input, InterpreterConfig::default())
    }

    /// Creates an interpreter with explicit limits
    pub fn with_config(tokens: &'t [Token], out: W, input: R, config: InterpreterConfig) -> Self {
        Interpreter {
            cursor: Cursor::new(tokens),
            stack: ValueStack::new(),
            symbols: SymbolTable::new(),
            out,
            input,
            config,
        }
    }

    /// Global names bound so far
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Mutable access to the global names, e.g. to seed values
    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    /// Consume the interpreter, returning the output sink and the final names
    pub fn finish(self) -> (W, SymbolTable) {
        (self.out, self.symbols)
    }

    /// Execute the whole program
    pub fn run(&mut self) -> Result<()> {
        while self.starts_statement() {
            self.stmt()?;
            debug_assert!(self.stack.is_empty(), "statement left values on the stack");
        }

        if self.cursor.kind() != TokenKind::Eof {
            return Err(self.cursor.unexpected("statement or EOF"));
        }
        self.out.flush()?;
        Ok(())
    }

    /// Evaluate one `relexpr` at the cursor and return its value
    pub fn eval_expression(&mut self) -> Result<Value> {
        self.relexpr()?;
        self.stack.pop()
    }

    fn starts_statement(&self) -> bool {
        matches!(
            self.cursor.kind(),
            TokenKind::Name
                | TokenKind::Print
                | TokenKind::Pass
                | TokenKind::Return
                | TokenKind::Global
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Def
        )
    }

    fn stmt(&mut self) -> Result<()> {
        match self.cursor.kind() {
            TokenKind::If => self.if_stmt(),
            TokenKind::While => self.while_stmt(),
            TokenKind::Def => self.def_stmt(),
            _ => {
                self.simple_stmt()?;
                self.cursor.consume(TokenKind::Newline)?;
                Ok(())
            }
        }
    }

    fn simple_stmt(&mut self) -> Result<()> {
        match self.cursor.kind() {
            TokenKind::Name => match self.cursor.peek_next() {
                TokenKind::Assign => self.assignment_stmt(),
                TokenKind::LeftParen => self.function_call(),
                _ => {
                    self.cursor.advance()?;
                    Err(self.cursor.unexpected("ASSIGNOP or LEFTPARENT"))
                }
            },
            TokenKind::Print => self.print_stmt(),
            TokenKind::Pass => self.cursor.consume(TokenKind::Pass).map(|_| ()),
            TokenKind::Return => self.return_stmt(),
            TokenKind::Global => self.global_stmt(),
            _ => Err(self.cursor.unexpected("statement")),
        }
    }

    // NAME "=" relexpr
    fn assignment_stmt(&mut self) -> Result<()> {
        let name = self.cursor.consume(TokenKind::Name)?;
        self.cursor.consume(TokenKind::Assign)?;
        self.relexpr()?;
        let value = self.stack.pop()?;
        self.symbols.assign(&name.lexeme, value);
        Ok(())
    }

    // "print" "(" [relexpr ("," relexpr)* [","]] ")"
    //
    // Each argument is written as soon as it is evaluated.
    fn print_stmt(&mut self) -> Result<()> {
        self.cursor.consume(TokenKind::Print)?;
        self.cursor.consume(TokenKind::LeftParen)?;

        if self.cursor.kind() != TokenKind::RightParen {
            self.relexpr()?;
            let first = self.stack.pop()?;
            write!(self.out, "{}", first.to_print_first())?;

            while self.cursor.kind() == TokenKind::Comma {
                self.cursor.advance()?;
                if self.cursor.kind() == TokenKind::RightParen {
                    break;
                }
                self.relexpr()?;
                let value = self.stack.pop()?;
                write!(self.out, " {}", value)?;
            }
        }

        writeln!(self.out)?;
        self.cursor.consume(TokenKind::RightParen)?;
        Ok(())
    }

    // NAME "(" [relexpr ("," relexpr)*] ")"
    //
    // Arguments are evaluated for their side effects; user functions have no
    // callable body.
    fn function_call(&mut self) -> Result<()> {
        let name = self.cursor.consume(TokenKind::Name)?;
        self.cursor.consume(TokenKind::LeftParen)?;

        let mut args = 0;
        if self.cursor.kind() != TokenKind::RightParen {
            self.relexpr()?;
            self.stack.pop()?;
            args += 1;
            while self.cursor.kind() == TokenKind::Comma {
                self.cursor.advance()?;
                self.relexpr()?;
                self.stack.pop()?;
                args += 1;
            }
        }
        self.cursor.consume(TokenKind::RightParen)?;

        tracing::debug!(name = %name.lexeme, args, line = name.line, "function call has no body to run");
        Ok(())
    }

    // "return" [relexpr]
    fn return_stmt(&mut self) -> Result<()> {
        self.cursor.consume(TokenKind::Return)?;
        if self.cursor.kind() != TokenKind::Newline {
            self.relexpr()?;
            self.stack.pop()?;
        }
        Ok(())
    }

    // "global" NAME ("," NAME)*
    fn global_stmt(&mut self) -> Result<()> {
        self.cursor.consume(TokenKind::Global)?;
        self.cursor.consume(TokenKind::Name)?;
        while self.cursor.kind() == TokenKind::Comma {
            self.cursor.advance()?;
            self.cursor.consume(TokenKind::Name)?;
        }
        Ok(())
    }

    // "if" relexpr ":" codeblock ["else" ":" codeblock]
    fn if_stmt(&mut self) -> Result<()> {
        self.cursor.consume(TokenKind::If)?;
        self.relexpr()?;
        self.cursor.consume(TokenKind::Colon)?;
        let taken = self.stack.pop()?.is_true();

        self.branch(taken)?;

        if self.cursor.kind() == TokenKind::Else {
            self.cursor.advance()?;
            self.cursor.consume(TokenKind::Colon)?;
            self.branch(!taken)?;
        }
        Ok(())
    }

    // "while" relexpr ":" codeblock
    //
    // The condition is re-read from its first token after every pass through
    // the body.
    fn while_stmt(&mut self) -> Result<()> {
        self.cursor.consume(TokenKind::While)?;
        let condition = self.cursor.position();
        let limit = self.config.max_loop_iterations;
        let mut iterations = 0usize;

        loop {
            self.relexpr()?;
            self.cursor.consume(TokenKind::Colon)?;
            if !self.stack.pop()?.is_true() {
                break;
            }

            iterations += 1;
            if let Some(limit) = limit.filter(|&limit| iterations > limit) {
                return Err(Error::TooManyIterations { limit });
            }
            self.codeblock()?;
            self.cursor.seek(condition);
        }

        self.skip_block()?;
        tracing::debug!(iterations, "loop finished");
        Ok(())
    }

    // "def" NAME "(" [NAME ("," NAME)*] ")" ":" codeblock
    //
    // The body is passed over by indentation alone; nothing callable is
    // stored and statements inside it are never checked, so a malformed body
    // is not reported.
    fn def_stmt(&mut self) -> Result<()> {
        self.cursor.consume(TokenKind::Def)?;
        let name = self.cursor.consume(TokenKind::Name)?;
        self.cursor.consume(TokenKind::LeftParen)?;

        let mut params = Vec::new();
        if self.cursor.kind() != TokenKind::RightParen {
            params.push(self.cursor.consume(TokenKind::Name)?.lexeme.as_str());
            while self.cursor.kind() == TokenKind::Comma {
                self.cursor.advance()?;
                params.push(self.cursor.consume(TokenKind::Name)?.lexeme.as_str());
            }
        }
        self.cursor.consume(TokenKind::RightParen)?;
        self.cursor.consume(TokenKind::Colon)?;
        self.skip_block()?;

        tracing::debug!(name = %name.lexeme, ?params, "declared function");
        Ok(())
    }

    fn branch(&mut self, taken: bool) -> Result<()> {
        if taken {
            self.codeblock()
        } else {
            self.skip_block()
        }
    }

    // NEWLINE INDENT stmt+ DEDENT
    fn codeblock(&mut self) -> Result<()> {
        self.cursor.consume(TokenKind::Newline)?;
        self.cursor.consume(TokenKind::Indent)?;

        if !self.starts_statement() {
            return Err(self.cursor.unexpected("statement"));
        }
        while self.starts_statement() {
            self.stmt()?;
        }

        self.cursor.consume(TokenKind::Dedent)?;
        Ok(())
    }

    /// Move past a block without executing it
    ///
    /// Records the column of the block's first token and advances to the first
    /// `Dedent` returning to a column left of it. Nested blocks only ever
    /// dedent to columns at or right of that mark, so they are passed over.
    fn skip_block(&mut self) -> Result<()> {
        self.cursor.consume(TokenKind::Newline)?;
        let block_column = self.cursor.current().column;
        let first_line = self.cursor.current().line;
        self.cursor.consume(TokenKind::Indent)?;

        loop {
            let token = self.cursor.current();
            self.cursor.advance()?;
            if token.kind == TokenKind::Dedent && token.column < block_column {
                break;
            }
        }

        tracing::debug!(line = first_line, column = block_column, "skipped block");
        Ok(())
    }

    // expr [relop expr]
    fn relexpr(&mut self) -> Result<()> {
        self.expr()?;

        if let Some(op) = CompareOp::from_token(self.cursor.kind()) {
            self.cursor.advance()?;
            self.expr()?;
            let (left, right) = self.stack.pop_pair()?;
            let result = ops::compare(&left, &right, op)?;
            self.stack.push(Value::Bool(result));
        }
        Ok(())
    }

    // term (("+" | "-") term)*
    fn expr(&mut self) -> Result<()> {
        self.term()?;

        while let Some(op @ (ArithOp::Add | ArithOp::Sub)) = ArithOp::from_token(self.cursor.kind())
        {
            self.cursor.advance()?;
            self.term()?;
            self.apply(op)?;
        }
        Ok(())
    }

    // factor (("*" | "/") factor)*
    fn term(&mut self) -> Result<()> {
        self.factor()?;

        while let Some(op @ (ArithOp::Mul | ArithOp::Div)) = ArithOp::from_token(self.cursor.kind())
        {
            self.cursor.advance()?;
            self.factor()?;
            self.apply(op)?;
        }
        Ok(())
    }

    fn apply(&mut self, op: ArithOp) -> Result<()> {
        let (left, right) = self.stack.pop_pair()?;
        self.stack.push(ops::arithmetic(op, left, right)?);
        Ok(())
    }

    fn factor(&mut self) -> Result<()> {
        let token = self.cursor.current();

        match token.kind {
            TokenKind::Plus => {
                self.cursor.advance()?;
                self.factor()
            }
            TokenKind::Minus => {
                self.cursor.advance()?;
                self.factor()?;
                self.stack.map_top(Value::negate)
            }
            TokenKind::UnsignedInt => {
                let n = token
                    .lexeme
                    .parse::<i64>()
                    .map_err(|_| invalid_literal("int", token))?;
                self.push_literal(Value::Int(n))
            }
            TokenKind::UnsignedFloat => {
                let f = token
                    .lexeme
                    .parse::<f64>()
                    .map_err(|_| invalid_literal("float", token))?;
                self.push_literal(Value::Float(f))
            }
            TokenKind::String => self.push_literal(Value::text(token.lexeme.as_str())),
            TokenKind::True => self.push_literal(Value::Bool(true)),
            TokenKind::False => self.push_literal(Value::Bool(false)),
            TokenKind::None => self.push_literal(Value::None),
            TokenKind::Name if self.cursor.peek_next() == TokenKind::LeftParen => {
                self.function_call()?;
                self.stack.push(Value::None);
                Ok(())
            }
            TokenKind::Name => {
                let value = self.symbols.get(&token.lexeme).cloned().ok_or_else(|| {
                    Error::UndefinedVariable {
                        name: token.lexeme.clone(),
                        line: token.line,
                    }
                })?;
                self.push_literal(value)
            }
            TokenKind::LeftParen => {
                self.cursor.advance()?;
                self.relexpr()?;
                self.cursor.consume(TokenKind::RightParen)?;
                Ok(())
            }
            TokenKind::Input => self.input_call(),
            TokenKind::Int => {
                self.cursor.advance()?;
                self.cursor.consume(TokenKind::LeftParen)?;
                self.relexpr()?;
                let value = self.stack.pop()?;
                self.stack.push(value.to_int()?);
                self.cursor.consume(TokenKind::RightParen)?;
                Ok(())
            }
            _ => Err(self.cursor.unexpected("factor")),
        }
    }

    fn push_literal(&mut self, value: Value) -> Result<()> {
        self.stack.push(value);
        self.cursor.advance()
    }

    // "input" "(" [STRING] ")"
    fn input_call(&mut self) -> Result<()> {
        self.cursor.consume(TokenKind::Input)?;
        self.cursor.consume(TokenKind::LeftParen)?;
        if self.cursor.kind() == TokenKind::String {
            let prompt = self.cursor.consume(TokenKind::String)?;
            write!(self.out, "{}", prompt.lexeme)?;
            self.out.flush()?;
        }
        self.cursor.consume(TokenKind::RightParen)?;

        let line = self.input.read_line()?.unwrap_or_default();
        self.stack.push(Value::Text(line));
        Ok(())
    }
}

fn invalid_literal(kind: &'static str, token: &Token) -> Error {
    Error::InvalidLiteral {
        kind,
        lexeme: token.lexeme.clone(),
        line: token.line,
    }
}
