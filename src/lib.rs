//! # Tiny BASIC
//!
//! A tokenizer, recursive-descent parser, tree-walking interpreter,
//! canonical formatter, and C transpiler for a small BASIC dialect, plus a
//! line-numbered REPL.
//!
//! ## Pipeline
//!
//! 1. **Lexer** — tokenizes source text into a stream of [`lexer::token::Token`]s.
//! 2. **Parser** — recursive descent over the token stream into a [`parser::ast::Program`].
//! 3. **Interpreter** — walks the AST directly, or
//! 4. **Formatter** — renders the AST back to canonical source, or
//! 5. **Codegen** — translates the AST into a standalone C program.
//!
//! ## Example
//!
//! ```rust
//! use tbasic::options::LanguageOptions;
//! use tbasic::parser::parse;
//! use tbasic::vocabulary::Vocabulary;
//! use tbasic::interpreter::{ByteCharSource, Interpreter};
//!
//! let vocabulary = Vocabulary::english();
//! let (program, reporter) = parse("10 PRINT \"HELLO\"\n20 END\n", &vocabulary, LanguageOptions::default());
//! assert!(!reporter.has_error());
//!
//! let mut interpreter = Interpreter::new(LanguageOptions::default());
//! let mut output = Vec::new();
//! let mut input = ByteCharSource::new(std::io::empty());
//! interpreter.run(&program, &mut input, &mut output);
//! assert_eq!(String::from_utf8(output).unwrap(), "HELLO\n");
//! ```

pub mod codegen;
pub mod error;
pub mod formatter;
pub mod interpreter;
pub mod lexer;
pub mod memory;
pub mod options;
pub mod parser;
pub mod repl;
pub mod vocabulary;
