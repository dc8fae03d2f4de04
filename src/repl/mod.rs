//! Line-numbered REPL.
//!
//! Holds a fixed-size table of program lines addressed by label and a
//! single shared [`Interpreter`] so that variables survive across instant
//! statements and `RUN`s. The command dispatch lives here, independent of
//! any particular line-editing front end, so it can be driven by tests
//! without a terminal; [`crate`]'s `tbasic-repl` binary wires it to
//! `rustyline`.

#[cfg(test)]
mod tests;

use std::io::{self, Write};

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::interpreter::{ByteCharSource, CharSource, Interpreter};
use crate::options::LanguageOptions;
use crate::parser::parse;
use crate::vocabulary::Vocabulary;

const LINE_SLOTS: usize = 4096;
const MAX_LINE_LENGTH: usize = 256;

pub enum Outcome {
    Continue,
    Quit,
}

pub struct Repl {
    lines: Vec<Option<String>>,
    interpreter: Interpreter,
    vocabulary: Vocabulary,
    options: LanguageOptions,
}

impl Repl {
    pub fn new(options: LanguageOptions, vocabulary: Vocabulary) -> Self {
        Self {
            lines: vec![None; LINE_SLOTS],
            interpreter: Interpreter::new(options),
            vocabulary,
            options,
        }
    }

    pub fn help_text(&self) -> &str {
        self.vocabulary.text_help
    }

    pub fn title_text(&self) -> &str {
        self.vocabulary.text_repl_title
    }

    /// Handles one line of REPL input: trims it, dispatches on its shape,
    /// and writes any resulting output. Returns [`Outcome::Quit`] on
    /// `SYSTEM`/`EXIT`.
    pub fn handle_line<W: Write>(
        &mut self,
        raw: &str,
        input: &mut dyn CharSource,
        output: &mut W,
    ) -> Outcome {
        let trimmed = raw.trim_start().trim_end();
        if trimmed.len() > MAX_LINE_LENGTH {
            let _ = writeln!(output, "{}", self.vocabulary.text_too_long);
            return Outcome::Continue;
        }
        if trimmed.is_empty() {
            return Outcome::Continue;
        }

        let upper = trimmed.to_ascii_uppercase();
        if upper == self.vocabulary.cmd_system || upper == self.vocabulary.cmd_exit {
            return Outcome::Quit;
        }
        if upper == self.vocabulary.cmd_help || trimmed == "?" {
            let _ = writeln!(output, "{}", self.vocabulary.text_help);
            return Outcome::Continue;
        }
        if upper == self.vocabulary.cmd_list || upper.starts_with(&format!("{} ", self.vocabulary.cmd_list)) {
            self.do_list(&upper, output);
            return Outcome::Continue;
        }
        if upper == self.vocabulary.cmd_run || upper.starts_with(&format!("{} ", self.vocabulary.cmd_run)) {
            self.do_run(&upper, input, output);
            return Outcome::Continue;
        }
        if let Some(rest) = trimmed.strip_prefix('?') {
            self.do_print_line(rest, output);
            return Outcome::Continue;
        }
        if let Some(rest) = trimmed.strip_prefix('/') {
            self.do_delete_line(rest);
            return Outcome::Continue;
        }
        if trimmed.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            self.do_store_line(trimmed);
            return Outcome::Continue;
        }
        self.do_instant_statement(trimmed, input, output);
        Outcome::Continue
    }

    fn do_list(&self, upper: &str, output: &mut dyn Write) {
        let arg = upper
            .strip_prefix(self.vocabulary.cmd_list)
            .unwrap_or("")
            .trim();
        let (start, end) = if arg.is_empty() {
            (0, LINE_SLOTS - 1)
        } else if let Some((lo, hi)) = arg.split_once('-') {
            (
                lo.trim().parse().unwrap_or(0),
                hi.trim().parse().unwrap_or(LINE_SLOTS - 1),
            )
        } else {
            (arg.parse().unwrap_or(0), LINE_SLOTS - 1)
        };
        for (idx, slot) in self.lines.iter().enumerate() {
            if idx < start || idx > end {
                continue;
            }
            if let Some(text) = slot {
                let _ = writeln!(output, "{idx:5} {text}");
            }
        }
    }

    fn do_run<W: Write>(&mut self, upper: &str, input: &mut dyn CharSource, output: &mut W) {
        let arg = upper
            .strip_prefix(self.vocabulary.cmd_run)
            .unwrap_or("")
            .trim();
        let start: usize = if arg.is_empty() { 0 } else { arg.parse().unwrap_or(0) };

        let mut buffer = String::new();
        for (idx, slot) in self.lines.iter().enumerate().skip(start) {
            if let Some(text) = slot {
                buffer.push_str(&idx.to_string());
                buffer.push(' ');
                buffer.push_str(text);
                buffer.push('\n');
            }
        }

        let (program, reporter) = parse(&buffer, &self.vocabulary, self.options);
        if let Some(err) = reporter.error() {
            let _ = writeln!(output, "{}", err.render());
            return;
        }
        let reporter = self.interpreter.run(&program, input, output);
        if let Some(err) = reporter.error() {
            let _ = writeln!(output, "{}", err.render());
        }
    }

    fn do_print_line(&self, rest: &str, output: &mut dyn Write) {
        if let Ok(idx) = rest.trim().parse::<usize>() {
            if let Some(Some(text)) = self.lines.get(idx) {
                let _ = writeln!(output, "{idx:5} {text}");
            }
        }
    }

    fn do_delete_line(&mut self, rest: &str) {
        if let Ok(idx) = rest.trim().parse::<usize>() {
            if idx < self.lines.len() {
                self.lines[idx] = None;
            }
        }
    }

    fn do_store_line(&mut self, trimmed: &str) {
        let (number_part, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((n, r)) => (n, r.trim_start()),
            None => (trimmed, ""),
        };
        if let Ok(idx) = number_part.parse::<usize>() {
            if idx < self.lines.len() {
                self.lines[idx] = if rest.is_empty() {
                    None
                } else {
                    Some(rest.to_string())
                };
            }
        }
    }

    fn do_instant_statement<W: Write>(&mut self, trimmed: &str, input: &mut dyn CharSource, output: &mut W) {
        let source = format!("{trimmed}\n");
        let (program, reporter) = parse(&source, &self.vocabulary, self.options);
        if let Some(err) = reporter.error() {
            let _ = writeln!(output, "{}", err.render());
            return;
        }
        let reporter = self.interpreter.run(&program, input, output);
        if let Some(err) = reporter.error() {
            let _ = writeln!(output, "{}", err.render());
        }
    }
}

/// Drives a [`Repl`] from a terminal using `rustyline` for line editing.
/// Lines that read back as an error message are printed in red.
pub fn run_interactive(options: LanguageOptions, vocabulary: Vocabulary) -> io::Result<()> {
    let mut repl = Repl::new(options, vocabulary);
    print!("{}", repl.title_text());
    io::stdout().flush()?;

    let mut editor =
        DefaultEditor::new().map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let mut stdin_source = ByteCharSource::new(io::stdin());

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                let mut buffer = Vec::new();
                let outcome = repl.handle_line(&line, &mut stdin_source, &mut buffer);
                print_captured(&buffer);
                if matches!(outcome, Outcome::Quit) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(_) => break,
        }
    }
    Ok(())
}

fn print_captured(buffer: &[u8]) {
    let text = String::from_utf8_lossy(buffer);
    for line in text.lines() {
        if line.starts_with("Parse error") || line.starts_with("Runtime error") {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
}
