use super::*;
use crate::interpreter::ByteCharSource;
use std::io::Cursor;

fn new_repl() -> Repl {
    Repl::new(LanguageOptions::default(), Vocabulary::english())
}

fn no_input() -> ByteCharSource<Cursor<Vec<u8>>> {
    ByteCharSource::new(Cursor::new(Vec::new()))
}

#[test]
fn stores_and_lists_a_numbered_line() {
    let mut repl = new_repl();
    let mut out = Vec::new();
    let mut input = no_input();
    repl.handle_line("10 PRINT 1", &mut input, &mut out);
    repl.handle_line("LIST", &mut input, &mut out);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("PRINT 1"));
}

#[test]
fn deleting_a_line_removes_it_from_listing() {
    let mut repl = new_repl();
    let mut out = Vec::new();
    let mut input = no_input();
    repl.handle_line("10 PRINT 1", &mut input, &mut out);
    repl.handle_line("/10", &mut input, &mut out);
    out.clear();
    repl.handle_line("LIST", &mut input, &mut out);
    assert!(String::from_utf8(out).unwrap().trim().is_empty());
}

#[test]
fn run_executes_stored_program() {
    let mut repl = new_repl();
    let mut out = Vec::new();
    let mut input = no_input();
    repl.handle_line("10 LET A=5", &mut input, &mut out);
    repl.handle_line("20 PRINT A", &mut input, &mut out);
    repl.handle_line("30 END", &mut input, &mut out);
    out.clear();
    repl.handle_line("RUN", &mut input, &mut out);
    assert_eq!(String::from_utf8(out).unwrap(), "5\n");
}

#[test]
fn instant_statement_executes_immediately_and_shares_variables() {
    let mut repl = new_repl();
    let mut out = Vec::new();
    let mut input = no_input();
    repl.handle_line("LET A=7", &mut input, &mut out);
    out.clear();
    repl.handle_line("PRINT A", &mut input, &mut out);
    assert_eq!(String::from_utf8(out).unwrap(), "7\n");
}

#[test]
fn system_and_exit_quit() {
    let mut repl = new_repl();
    let mut out = Vec::new();
    let mut input = no_input();
    assert!(matches!(
        repl.handle_line("SYSTEM", &mut input, &mut out),
        Outcome::Quit
    ));
    assert!(matches!(
        repl.handle_line("exit", &mut input, &mut out),
        Outcome::Quit
    ));
}

#[test]
fn help_and_bare_question_mark_print_help_text() {
    let mut repl = new_repl();
    let mut out = Vec::new();
    let mut input = no_input();
    repl.handle_line("HELP", &mut input, &mut out);
    repl.handle_line("?", &mut input, &mut out);
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("SYSTEM").count(), 2);
}

#[test]
fn query_line_prints_a_single_stored_line() {
    let mut repl = new_repl();
    let mut out = Vec::new();
    let mut input = no_input();
    repl.handle_line("10 PRINT 1", &mut input, &mut out);
    out.clear();
    repl.handle_line("?10", &mut input, &mut out);
    assert!(String::from_utf8(out).unwrap().contains("PRINT 1"));
}

#[test]
fn overly_long_line_is_rejected() {
    let mut repl = new_repl();
    let mut out = Vec::new();
    let mut input = no_input();
    let long_line = "A".repeat(300);
    repl.handle_line(&long_line, &mut input, &mut out);
    assert!(String::from_utf8(out).unwrap().contains("too long"));
}

#[test]
fn run_from_offset_skips_earlier_lines() {
    let mut repl = new_repl();
    let mut out = Vec::new();
    let mut input = no_input();
    repl.handle_line("10 LET A=1", &mut input, &mut out);
    repl.handle_line("20 LET A=2", &mut input, &mut out);
    repl.handle_line("30 PRINT A", &mut input, &mut out);
    out.clear();
    repl.handle_line("RUN 20", &mut input, &mut out);
    assert_eq!(String::from_utf8(out).unwrap(), "2\n");
}
