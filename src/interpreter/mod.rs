//! Tree-walking interpreter.
//!
//! Executes a [`Program`] in place. Variables and the sandboxed [`Memory`]
//! live on the `Interpreter` itself and persist across calls to [`run`] —
//! the REPL relies on this to keep variables alive across instant
//! statements, even though each `run` gets a fresh GOSUB stack, current-line
//! pointer and stopped flag, and a fresh [`Reporter`].
//!
//! [`run`]: Interpreter::run


use std::io::{Read, Write};

use crate::error::{ErrorKind, Reporter, Span};
use crate::memory::Memory;
use crate::options::{LanguageOptions, LineNumberMode};
use crate::parser::ast::*;

const LIMIT_MIN: i64 = -32768;
const LIMIT_MAX: i64 = 32767;

/// A source of input characters for `INPUT`, read one byte at a time —
/// mirroring the original's `getchar()` loop. Only ASCII digits, `-` and
/// whitespace are meaningful; anything else just terminates a field.
pub trait CharSource {
    fn next_char(&mut self) -> Option<char>;
}

/// Adapts any `Read` (stdin, a cursor over a test string, ...) into a
/// [`CharSource`].
pub struct ByteCharSource<R: Read> {
    reader: R,
}

impl<R: Read> ByteCharSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> CharSource for ByteCharSource<R> {
    fn next_char(&mut self) -> Option<char> {
        let mut buf = [0u8; 1];
        match self.reader.read(&mut buf) {
            Ok(1) => Some(buf[0] as char),
            _ => None,
        }
    }
}

pub struct Interpreter {
    vars: [i64; 27],
    memory: Memory,
    options: LanguageOptions,
}

impl Interpreter {
    pub fn new(options: LanguageOptions) -> Self {
        Self {
            vars: [0; 27],
            memory: Memory::new(),
            options,
        }
    }

    pub fn var(&self, idx: u8) -> i64 {
        self.vars[idx as usize]
    }

    /// Executes `program` to completion (END, falling off the end, or an
    /// error). Variables and memory persist into the next call.
    pub fn run<W: Write>(
        &mut self,
        program: &Program,
        input: &mut dyn CharSource,
        output: &mut W,
    ) -> Reporter {
        let mut run = Run {
            program,
            vars: &mut self.vars,
            memory: &mut self.memory,
            options: self.options,
            gosub_stack: Vec::new(),
            current: if program.lines.is_empty() { None } else { Some(0) },
            stopped: false,
            reporter: Reporter::new(),
            input,
            output,
        };
        run.exec();
        run.reporter
    }
}

struct Run<'a, W: Write> {
    program: &'a Program,
    vars: &'a mut [i64; 27],
    memory: &'a mut Memory,
    options: LanguageOptions,
    gosub_stack: Vec<usize>,
    current: Option<usize>,
    stopped: bool,
    reporter: Reporter,
    input: &'a mut dyn CharSource,
    output: &'a mut W,
}

type EResult<T> = Result<T, ()>;

impl<'a, W: Write> Run<'a, W> {
    fn current_label(&self) -> Option<i32> {
        self.current.map(|i| self.program.lines[i].label)
    }

    fn fail(&mut self, kind: ErrorKind) -> EResult<()> {
        let label = self.current_label();
        self.reporter.set(kind, Span::default(), label);
        Err(())
    }

    fn exec(&mut self) {
        while !self.stopped && !self.reporter.has_error() {
            let Some(idx) = self.current else { break };
            let statement = self.program.lines[idx].statement.clone();
            let default_next = self.next_in_source_order(idx);
            match self.exec_statement(&statement, default_next) {
                Ok(()) => {}
                Err(()) => break,
            }
        }
    }

    fn next_in_source_order(&self, idx: usize) -> Option<usize> {
        if idx + 1 < self.program.lines.len() {
            Some(idx + 1)
        } else {
            None
        }
    }

    fn exec_statement(&mut self, stmt: &Statement, default_next: Option<usize>) -> EResult<()> {
        match stmt {
            Statement::Let { var, expr } => {
                let value = self.eval_expr(expr)?;
                self.vars[*var as usize] = value;
                self.current = default_next;
            }
            Statement::If { left, op, right, then_stmt } => {
                let l = self.eval_expr(left)?;
                let r = self.eval_expr(right)?;
                if compare(l, r, *op) {
                    self.current = default_next;
                    return self.exec_statement(then_stmt, default_next);
                } else {
                    self.current = default_next;
                }
            }
            Statement::Goto { target } => {
                let label = self.eval_expr(target)?;
                self.current = Some(self.find_label(label)?);
            }
            Statement::Gosub { target } => {
                if self.gosub_stack.len() >= self.options.gosub_limit {
                    return self.fail(ErrorKind::TooManyGosubs);
                }
                let label = self.eval_expr(target)?;
                let target_idx = self.find_label(label)?;
                if let Some(ret) = default_next {
                    self.gosub_stack.push(ret);
                } else {
                    // Falling off the end after GOSUB returns nowhere; the
                    // original still treats this as a valid return address.
                    self.gosub_stack.push(self.program.lines.len());
                }
                self.current = Some(target_idx);
            }
            Statement::Return => {
                match self.gosub_stack.pop() {
                    Some(ret) if ret < self.program.lines.len() => self.current = Some(ret),
                    Some(_) => self.current = None,
                    None => return self.fail(ErrorKind::ReturnWithoutGosub),
                }
            }
            Statement::End => {
                self.stopped = true;
            }
            Statement::Print { items } => {
                self.exec_print(items)?;
                self.current = default_next;
            }
            Statement::Input { vars } => {
                for var in vars {
                    let value = self.read_input_number();
                    self.vars[*var as usize] = value;
                }
                self.current = default_next;
            }
            Statement::Peek { var, address } => {
                let addr = self.eval_expr(address)?;
                self.vars[*var as usize] = self.memory.peek(addr as i32) as i64;
                self.current = default_next;
            }
            Statement::Poke { address, value } => {
                let addr = self.eval_expr(address)?;
                let val = self.eval_expr(value)?;
                self.memory.poke(addr as i32, val as i32);
                self.current = default_next;
            }
            Statement::None => {
                self.current = default_next;
            }
        }
        Ok(())
    }

    fn exec_print(&mut self, items: &[PrintItem]) -> EResult<()> {
        let mut any = false;
        for item in items {
            any = true;
            match item {
                PrintItem::Str(s) => {
                    let _ = write!(self.output, "{s}");
                }
                PrintItem::Expr(e) => {
                    let v = self.eval_expr(e)?;
                    let _ = write!(self.output, "{v}");
                }
            }
        }
        if any {
            let _ = writeln!(self.output);
        }
        Ok(())
    }

    fn read_input_number(&mut self) -> i64 {
        let mut negative = false;
        let mut seen_sign = false;
        let mut digits = String::new();
        loop {
            match self.input.next_char() {
                None => break,
                Some(c) if c.is_ascii_digit() => digits.push(c),
                Some('-') if !seen_sign && digits.is_empty() => {
                    negative = true;
                    seen_sign = true;
                }
                Some(_) if digits.is_empty() => {
                    seen_sign = false;
                    continue;
                }
                Some(_) => break,
            }
        }
        let magnitude: i64 = digits.parse().unwrap_or(0);
        if negative { -magnitude } else { magnitude }
    }

    fn find_label(&mut self, label: i64) -> EResult<usize> {
        let label = label as i32;
        let found = match self.options.line_numbers {
            LineNumberMode::Optional => self.program.find_label_exact(label),
            LineNumberMode::Implied | LineNumberMode::Mandatory => {
                self.program.find_label_ceiling(label)
            }
        };
        match found {
            Some(idx) => Ok(idx),
            None => {
                self.fail(ErrorKind::InvalidLineNumber)?;
                unreachable!()
            }
        }
    }

    fn clamp(&mut self, value: i64) -> EResult<i64> {
        if value < LIMIT_MIN || value > LIMIT_MAX {
            self.fail(ErrorKind::Overflow)?;
            unreachable!()
        }
        Ok(value)
    }

    fn eval_expr(&mut self, expr: &Expr) -> EResult<i64> {
        let mut acc = self.eval_term(&expr.head)?;
        for (op, term) in &expr.tail {
            let rhs = self.eval_term(term)?;
            acc = self.clamp(match op {
                AddOp::Add => acc + rhs,
                AddOp::Sub => acc - rhs,
            })?;
        }
        Ok(acc)
    }

    fn eval_term(&mut self, term: &Term) -> EResult<i64> {
        let mut acc = self.eval_signed_factor(&term.head)?;
        for (op, factor) in &term.tail {
            let rhs = self.eval_signed_factor(factor)?;
            acc = match op {
                MulOp::Multiply => self.clamp(acc * rhs)?,
                MulOp::Divide => {
                    if rhs == 0 {
                        self.fail(ErrorKind::DivideByZero)?;
                        unreachable!()
                    }
                    self.clamp(acc / rhs)?
                }
            };
        }
        Ok(acc)
    }

    fn eval_signed_factor(&mut self, sf: &SignedFactor) -> EResult<i64> {
        let value = self.eval_factor(&sf.factor)?;
        Ok(match sf.sign {
            Sign::Positive => value,
            Sign::Negative => -value,
        })
    }

    fn eval_factor(&mut self, factor: &Factor) -> EResult<i64> {
        match factor {
            Factor::Variable(idx) => Ok(self.vars[*idx as usize]),
            Factor::Value(n) => self.clamp(*n),
            Factor::Parenthesized(expr) => self.eval_expr(expr),
        }
    }
}

fn compare(l: i64, r: i64, op: RelOp) -> bool {
    match op {
        RelOp::Equal => l == r,
        RelOp::Unequal => l != r,
        RelOp::LessThan => l < r,
        RelOp::LessOrEqual => l <= r,
        RelOp::GreaterThan => l > r,
        RelOp::GreaterOrEqual => l >= r,
    }
}
