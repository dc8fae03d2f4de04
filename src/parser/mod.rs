//! Recursive-descent parser.
//!
//! Reads from a pre-tokenized `Vec<Token>` with a one-token lookahead
//! (`peek`/`advance` over an index, which plays the role of the original's
//! single buffered lookahead token). On error the reporter is set and the
//! current rule unwinds via `Err(())` — `()` carries no payload because the
//! actual error already lives in the `Reporter`; every caller up the chain
//! propagates with `?` until the line loop catches it and resyncs to the
//! next EOL.

pub mod ast;

#[cfg(test)]
mod tests;

use ast::*;

use crate::error::{ErrorKind, Reporter, Span};
use crate::lexer::token::{Token, TokenClass};
use crate::options::{CommentPolicy, LanguageOptions, LineNumberMode};

type PResult<T> = Result<T, ()>;

pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    options: LanguageOptions,
    reporter: Reporter,
    previous_label: i32,
    saw_any_label: bool,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], options: LanguageOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            options,
            reporter: Reporter::new(),
            previous_label: 0,
            saw_any_label: false,
        }
    }

    /// Parses the whole token stream. Always returns a (possibly partial)
    /// `Program`; callers must consult `reporter()` for failure.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::new();
        while !self.at(TokenClass::Eof) {
            if self.at(TokenClass::Eol) {
                self.advance();
                continue;
            }
            match self.parse_line() {
                Ok(Some(line)) => program.lines.push(line),
                Ok(None) => {}
                Err(()) => self.resync_to_eol(),
            }
        }
        program
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn into_reporter(self) -> Reporter {
        self.reporter
    }

    // -- token stream helpers --------------------------------------------

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_class(&self) -> &TokenClass {
        &self.peek().class
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn at(&self, class: TokenClass) -> bool {
        std::mem::discriminant(self.peek_class()) == std::mem::discriminant(&class)
    }

    fn peek_ahead_class(&self) -> &TokenClass {
        let idx = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[idx].class
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn error(&mut self, kind: ErrorKind) -> PResult<()> {
        let span = self.span();
        let label = if self.saw_any_label {
            Some(self.previous_label)
        } else {
            None
        };
        self.reporter.set(kind, span, label);
        Err(())
    }

    fn expect(&mut self, class: TokenClass, kind: ErrorKind) -> PResult<Token> {
        if self.at(class) {
            Ok(self.advance())
        } else {
            self.error(kind)?;
            unreachable!()
        }
    }

    fn resync_to_eol(&mut self) {
        while !self.at(TokenClass::Eol) && !self.at(TokenClass::Eof) {
            self.advance();
        }
        if self.at(TokenClass::Eol) {
            self.advance();
        }
    }

    // -- grammar ----------------------------------------------------------

    fn parse_line(&mut self) -> PResult<Option<ProgramLine>> {
        let label = self.parse_label()?;
        let statement = self.parse_statement()?;
        match self.peek_class() {
            TokenClass::Eol | TokenClass::Eof => {
                if self.at(TokenClass::Eol) {
                    self.advance();
                }
            }
            _ => self.error(ErrorKind::UnexpectedParameter)?,
        }
        if matches!(statement, Statement::None) {
            // An unlabeled blank/comment-only line carries no information
            // and is always dropped. A labeled one is kept only when
            // comments are enabled, so GOTO/GOSUB can still target it.
            let keep_placeholder = label != 0 && self.options.comments == CommentPolicy::Enabled;
            if !keep_placeholder {
                return Ok(None);
            }
        }
        Ok(Some(ProgramLine { label, statement }))
    }

    fn parse_label(&mut self) -> PResult<i32> {
        let explicit = if let TokenClass::Number(n) = self.peek_class() {
            let n = *n;
            self.advance();
            Some(n)
        } else {
            None
        };

        let label = match (self.options.line_numbers, explicit) {
            (LineNumberMode::Mandatory, None) => {
                self.error(ErrorKind::InvalidLineNumber)?;
                unreachable!()
            }
            (LineNumberMode::Optional, None) => 0,
            (LineNumberMode::Optional, Some(n)) => n as i32,
            (LineNumberMode::Implied, None) => self.previous_label + 1,
            (LineNumberMode::Implied, Some(n)) => n as i32,
            (LineNumberMode::Mandatory, Some(n)) => {
                let n = n as i32;
                if self.saw_any_label && n <= self.previous_label {
                    self.error(ErrorKind::InvalidLineNumber)?;
                    unreachable!()
                }
                n
            }
        };

        if self.options.exceeds_line_limit(label) {
            self.error(ErrorKind::InvalidLineNumber)?;
            unreachable!()
        }

        if label != 0 || self.options.line_numbers != LineNumberMode::Optional {
            self.previous_label = label;
            self.saw_any_label = true;
        }
        Ok(label)
    }

    fn parse_statement(&mut self) -> PResult<Statement> {
        match self.peek_class().clone() {
            TokenClass::Let => self.parse_let(),
            TokenClass::If => self.parse_if(),
            TokenClass::Goto => {
                self.advance();
                Ok(Statement::Goto {
                    target: self.parse_expr()?,
                })
            }
            TokenClass::Gosub => {
                self.advance();
                Ok(Statement::Gosub {
                    target: self.parse_expr()?,
                })
            }
            TokenClass::Return => {
                self.advance();
                Ok(Statement::Return)
            }
            TokenClass::End => {
                self.advance();
                Ok(Statement::End)
            }
            TokenClass::Print => self.parse_print(),
            TokenClass::Input => self.parse_input(),
            TokenClass::Peek => self.parse_peek(),
            TokenClass::Poke => self.parse_poke(),
            TokenClass::Eol | TokenClass::Eof => Ok(Statement::None),
            // Bare `A=5` is a missing-LET assignment, not an unrecognised
            // command — the parser recognises the shape and blames the
            // missing keyword specifically.
            TokenClass::Variable(_) if matches!(self.peek_ahead_class(), TokenClass::Equal) => {
                self.error(ErrorKind::InvalidAssignment)?;
                unreachable!()
            }
            _ => {
                self.error(ErrorKind::UnrecognisedCommand)?;
                unreachable!()
            }
        }
    }

    fn parse_let(&mut self) -> PResult<Statement> {
        self.advance(); // LET
        let var = self.parse_variable(ErrorKind::InvalidVariable)?;
        self.expect(TokenClass::Equal, ErrorKind::InvalidAssignment)?;
        let expr = self.parse_expr()?;
        Ok(Statement::Let { var, expr })
    }

    fn parse_if(&mut self) -> PResult<Statement> {
        self.advance(); // IF
        let left = self.parse_expr()?;
        let op = self.parse_relop()?;
        let right = self.parse_expr()?;
        self.expect(TokenClass::Then, ErrorKind::ThenExpected)?;
        let then_stmt = Box::new(self.parse_then_statement()?);
        Ok(Statement::If {
            left,
            op,
            right,
            then_stmt,
        })
    }

    /// The statement that follows THEN. Identical to `parse_statement`
    /// except that IF is rejected here: the grammar forbids IF-in-IF.
    fn parse_then_statement(&mut self) -> PResult<Statement> {
        if self.at(TokenClass::If) {
            self.error(ErrorKind::UnrecognisedCommand)?;
            unreachable!()
        }
        self.parse_statement()
    }

    fn parse_relop(&mut self) -> PResult<RelOp> {
        let op = match self.peek_class() {
            TokenClass::Equal => RelOp::Equal,
            TokenClass::Unequal => RelOp::Unequal,
            TokenClass::LessThan => RelOp::LessThan,
            TokenClass::LessOrEqual => RelOp::LessOrEqual,
            TokenClass::GreaterThan => RelOp::GreaterThan,
            TokenClass::GreaterOrEqual => RelOp::GreaterOrEqual,
            _ => {
                self.error(ErrorKind::InvalidOperator)?;
                unreachable!()
            }
        };
        self.advance();
        Ok(op)
    }

    fn parse_print(&mut self) -> PResult<Statement> {
        self.advance(); // PRINT
        let mut items = Vec::new();
        if matches!(self.peek_class(), TokenClass::Eol | TokenClass::Eof) {
            return Ok(Statement::Print { items });
        }
        items.push(self.parse_print_item()?);
        while self.at(TokenClass::Comma) {
            self.advance();
            items.push(self.parse_print_item()?);
        }
        Ok(Statement::Print { items })
    }

    fn parse_print_item(&mut self) -> PResult<PrintItem> {
        if let TokenClass::Str(s) = self.peek_class().clone() {
            self.advance();
            Ok(PrintItem::Str(s))
        } else {
            Ok(PrintItem::Expr(self.parse_expr()?))
        }
    }

    fn parse_input(&mut self) -> PResult<Statement> {
        self.advance(); // INPUT
        let mut vars = vec![self.parse_variable(ErrorKind::InvalidVariable)?];
        while self.at(TokenClass::Comma) {
            self.advance();
            vars.push(self.parse_variable(ErrorKind::InvalidVariable)?);
        }
        Ok(Statement::Input { vars })
    }

    fn parse_peek(&mut self) -> PResult<Statement> {
        self.advance(); // PEEK
        let var = self.parse_variable(ErrorKind::InvalidVariable)?;
        self.expect(TokenClass::Comma, ErrorKind::InvalidExpression)?;
        let address = self.parse_expr()?;
        Ok(Statement::Peek { var, address })
    }

    fn parse_poke(&mut self) -> PResult<Statement> {
        self.advance(); // POKE
        let address = self.parse_expr()?;
        self.expect(TokenClass::Comma, ErrorKind::InvalidExpression)?;
        let value = self.parse_expr()?;
        Ok(Statement::Poke { address, value })
    }

    fn parse_variable(&mut self, on_error: ErrorKind) -> PResult<u8> {
        if let TokenClass::Variable(idx) = *self.peek_class() {
            self.advance();
            if (1..=26).contains(&idx) {
                return Ok(idx);
            }
        }
        self.error(on_error)?;
        unreachable!()
    }

    fn parse_expr(&mut self) -> PResult<Expr> {
        let head = self.parse_term()?;
        let mut tail = Vec::new();
        loop {
            let op = match self.peek_class() {
                TokenClass::Plus => AddOp::Add,
                TokenClass::Minus => AddOp::Sub,
                _ => break,
            };
            self.advance();
            tail.push((op, self.parse_term()?));
        }
        Ok(Expr { head, tail })
    }

    fn parse_term(&mut self) -> PResult<Term> {
        let head = self.parse_signed_factor()?;
        let mut tail = Vec::new();
        loop {
            let op = match self.peek_class() {
                TokenClass::Multiply => MulOp::Multiply,
                TokenClass::Divide => MulOp::Divide,
                _ => break,
            };
            self.advance();
            tail.push((op, self.parse_signed_factor()?));
        }
        Ok(Term { head, tail })
    }

    fn parse_signed_factor(&mut self) -> PResult<SignedFactor> {
        let sign = match self.peek_class() {
            TokenClass::Minus => {
                self.advance();
                Sign::Negative
            }
            TokenClass::Plus => {
                self.advance();
                Sign::Positive
            }
            _ => Sign::Positive,
        };
        Ok(SignedFactor {
            sign,
            factor: self.parse_factor()?,
        })
    }

    fn parse_factor(&mut self) -> PResult<Factor> {
        match self.peek_class().clone() {
            TokenClass::Variable(idx) if (1..=26).contains(&idx) => {
                self.advance();
                Ok(Factor::Variable(idx))
            }
            TokenClass::Number(n) => {
                self.advance();
                Ok(Factor::Value(n))
            }
            TokenClass::LeftParenthesis => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenClass::RightParenthesis, ErrorKind::MissingParen)?;
                Ok(Factor::Parenthesized(Box::new(expr)))
            }
            _ => {
                self.error(ErrorKind::InvalidExpression)?;
                unreachable!()
            }
        }
    }
}

/// Tokenizes and parses `source` in one call, returning the (possibly
/// partial) program alongside whatever error was recorded.
pub fn parse(
    source: &str,
    vocabulary: &crate::vocabulary::Vocabulary,
    options: LanguageOptions,
) -> (Program, Reporter) {
    let tokens = crate::lexer::tokenize(source, vocabulary);
    let mut parser = Parser::new(&tokens, options);
    let program = parser.parse_program();
    (program, parser.into_reporter())
}
