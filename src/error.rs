//! Sticky error sentinel and source location tracking.
//!
//! The interpreter core never unwinds on error: every fallible step returns
//! `Result<T, Error>` and the top-level driver (parser, interpreter, REPL)
//! records the first failure into a [`Reporter`]. Once a [`Reporter`] holds
//! an error it stays there until the reporter itself is reconstructed —
//! later `set` calls are ignored.

use thiserror::Error;

/// A location in the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// One entry per `E_*` code in the language core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("Invalid line number")]
    InvalidLineNumber,
    #[error("Unrecognised command")]
    UnrecognisedCommand,
    #[error("Invalid variable")]
    InvalidVariable,
    #[error("Invalid assignment")]
    InvalidAssignment,
    #[error("Invalid expression")]
    InvalidExpression,
    #[error("Missing )")]
    MissingParen,
    #[error("Invalid PRINT output")]
    InvalidPrintOutput,
    #[error("Bad command line")]
    BadCommandLine,
    #[error("File not found")]
    FileNotFound,
    #[error("Invalid operator")]
    InvalidOperator,
    #[error("THEN expected")]
    ThenExpected,
    #[error("Unexpected parameter")]
    UnexpectedParameter,
    #[error("RETURN without GOSUB")]
    ReturnWithoutGosub,
    #[error("Divide by zero")]
    DivideByZero,
    #[error("Overflow")]
    Overflow,
    #[error("Out of memory")]
    Memory,
    #[error("Too many gosubs")]
    TooManyGosubs,
}

impl ErrorKind {
    /// Parse-time errors are diagnosed by the tokenizer/parser; the rest are
    /// either runtime or systemic. Used to pick the `Parse error:`/`Runtime
    /// error:` message prefix.
    pub fn is_parse_time(self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidLineNumber
                | ErrorKind::UnrecognisedCommand
                | ErrorKind::InvalidVariable
                | ErrorKind::InvalidAssignment
                | ErrorKind::InvalidExpression
                | ErrorKind::MissingParen
                | ErrorKind::InvalidPrintOutput
                | ErrorKind::InvalidOperator
                | ErrorKind::ThenExpected
                | ErrorKind::UnexpectedParameter
        )
    }

    /// The `E_*` numeric code, in declaration order starting after
    /// `E_NONE` (0). Used as the process exit code and as the generated
    /// C program's `E_RETURN_WITHOUT_GOSUB` define.
    pub fn code(self) -> i32 {
        match self {
            ErrorKind::InvalidLineNumber => 1,
            ErrorKind::UnrecognisedCommand => 2,
            ErrorKind::InvalidVariable => 3,
            ErrorKind::InvalidAssignment => 4,
            ErrorKind::InvalidExpression => 5,
            ErrorKind::MissingParen => 6,
            ErrorKind::InvalidPrintOutput => 7,
            ErrorKind::BadCommandLine => 8,
            ErrorKind::FileNotFound => 9,
            ErrorKind::InvalidOperator => 10,
            ErrorKind::ThenExpected => 11,
            ErrorKind::UnexpectedParameter => 12,
            ErrorKind::ReturnWithoutGosub => 13,
            ErrorKind::DivideByZero => 14,
            ErrorKind::Overflow => 15,
            ErrorKind::Memory => 16,
            ErrorKind::TooManyGosubs => 17,
        }
    }
}

/// A recorded error: kind plus the location and line label it occurred at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    pub span: Span,
    /// The line label the error occurred on, or `None` if there wasn't one
    /// (e.g. a REPL instant statement, or an error before any line was read).
    pub label: Option<i32>,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span, label: Option<i32>) -> Self {
        Self { kind, span, label }
    }

    /// Render the localized, fully decorated message:
    /// `<Parse|Runtime> error: <message>, source line N, source column M, line label L`
    pub fn render(&self) -> String {
        let prefix = if self.kind.is_parse_time() {
            "Parse error"
        } else {
            "Runtime error"
        };
        let mut out = format!("{prefix}: {}", self.kind);
        if self.span.line > 0 {
            out.push_str(&format!(
                ", source line {}, source column {}",
                self.span.line, self.span.column
            ));
        }
        if let Some(label) = self.label {
            out.push_str(&format!(", line label {label}"));
        }
        out
    }
}

/// Records at most one error per session. The first non-success `set` wins;
/// later calls are silently ignored until the reporter is reconstructed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    error: Option<Error>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `kind` at `span`/`label` unless an error is already recorded.
    /// Returns `true` if this call actually recorded the error.
    pub fn set(&mut self, kind: ErrorKind, span: Span, label: Option<i32>) -> bool {
        if self.error.is_some() {
            return false;
        }
        self.error = Some(Error::new(kind, span, label));
        true
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<Error> {
        self.error
    }

    pub fn clear(&mut self) {
        self.error = None;
    }
}
