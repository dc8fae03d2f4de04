use super::*;
use crate::options::LanguageOptions;
use crate::parser::parse;
use crate::vocabulary::Vocabulary;

fn roundtrip(source: &str) -> (String, String) {
    let vocab = Vocabulary::english();
    let (program, reporter) = parse(source, &vocab, LanguageOptions::default());
    assert!(!reporter.has_error(), "{:?}", reporter.error());
    let first = format_program(&program);
    let (program2, reporter2) = parse(&first, &vocab, LanguageOptions::default());
    assert!(!reporter2.has_error(), "{:?}", reporter2.error());
    let second = format_program(&program2);
    (first, second)
}

#[test]
fn formats_let() {
    let (first, second) = roundtrip("10 LET A = 1 + 2\n");
    assert_eq!(first, "   10 LET A=1+2\n");
    assert_eq!(first, second);
}

#[test]
fn formats_unlabeled_line_with_six_spaces() {
    let vocab = Vocabulary::english();
    let (program, reporter) = parse("LET A = 1\n", &vocab, LanguageOptions::default());
    assert!(!reporter.has_error());
    let out = format_program(&program);
    assert_eq!(out, "      LET A=1\n");
}

#[test]
fn formats_if_then() {
    let (first, second) = roundtrip("10 IF A<=5 THEN GOTO 20\n");
    assert_eq!(first, "   10 IF A<=5 THEN GOTO 20\n");
    assert_eq!(first, second);
}

#[test]
fn formats_print_with_strings_and_expressions() {
    let (first, second) = roundtrip("10 PRINT \"X=\",A,\"Y=\",B\n");
    assert_eq!(first, "   10 PRINT \"X=\",A,\"Y=\",B\n");
    assert_eq!(first, second);
}

#[test]
fn formats_peek_and_poke_with_comma_space() {
    let (first, second) = roundtrip("10 PEEK A, 100\n20 POKE 100, 5\n");
    assert_eq!(first, "   10 PEEK A, 100\n   20 POKE 100, 5\n");
    assert_eq!(first, second);
}

#[test]
fn preserves_parenthesized_subexpressions() {
    let (first, second) = roundtrip("10 LET A=(1+2)*3\n");
    assert_eq!(first, "   10 LET A=(1+2)*3\n");
    assert_eq!(first, second);
}

#[test]
fn formats_signed_tail_factor() {
    let (first, second) = roundtrip("10 LET A=3*-4\n");
    assert_eq!(first, "   10 LET A=3*-4\n");
    assert_eq!(first, second);
}

#[test]
fn round_trip_is_byte_identical_across_many_statement_kinds() {
    let source = "10 LET A=1\n20 INPUT B,C\n30 GOSUB 100\n40 END\n100 RETURN\n";
    let (first, second) = roundtrip(source);
    assert_eq!(first, second);
}
