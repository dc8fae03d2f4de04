//! Keyword/message table.
//!
//! spec scopes out "localization of keyword and message text" as an
//! external collaborator — this is the configurable table that a localized
//! build would swap out. The tokenizer, parser, formatter, C generator and
//! REPL all look keywords and fixed text up through a `&Vocabulary` rather
//! than hard-coding strings.

/// A table of keyword spellings and fixed message/help text.
///
/// `Vocabulary::english()` is the only constructor shipped today; a second
/// language would add another constructor returning the same shape with
/// different field values.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub kw_let: &'static str,
    pub kw_if: &'static str,
    pub kw_then: &'static str,
    pub kw_goto: &'static str,
    pub kw_gosub: &'static str,
    pub kw_return: &'static str,
    pub kw_end: &'static str,
    pub kw_print: &'static str,
    pub kw_input: &'static str,
    pub kw_rem: &'static str,
    pub kw_peek: &'static str,
    pub kw_poke: &'static str,

    pub cmd_help: &'static str,
    pub cmd_system: &'static str,
    pub cmd_exit: &'static str,
    pub cmd_run: &'static str,
    pub cmd_list: &'static str,

    pub text_help: &'static str,
    pub text_too_long: &'static str,
    pub text_repl_title: &'static str,
}

impl Vocabulary {
    pub fn english() -> Self {
        Self {
            kw_let: "LET",
            kw_if: "IF",
            kw_then: "THEN",
            kw_goto: "GOTO",
            kw_gosub: "GOSUB",
            kw_return: "RETURN",
            kw_end: "END",
            kw_print: "PRINT",
            kw_input: "INPUT",
            kw_rem: "REM",
            kw_peek: "PEEK",
            kw_poke: "POKE",

            cmd_help: "HELP",
            cmd_system: "SYSTEM",
            cmd_exit: "EXIT",
            cmd_run: "RUN",
            cmd_list: "LIST",

            text_help: "SYSTEM: Exit to OS\nRUN: Run the program\nLIST: List the program.",
            text_too_long: "Input line is too long",
            text_repl_title: "Tiny Basic V2.0\n",
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::english()
    }
}
