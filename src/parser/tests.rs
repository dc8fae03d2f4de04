use super::*;
use crate::options::{CommentPolicy, LanguageOptions, LineNumberMode};
use crate::vocabulary::Vocabulary;

fn parse_ok(source: &str) -> Program {
    let vocab = Vocabulary::english();
    let (program, reporter) = parse(source, &vocab, LanguageOptions::default());
    assert!(!reporter.has_error(), "unexpected error: {:?}", reporter.error());
    program
}

#[test]
fn parses_let_statement() {
    let program = parse_ok("10 LET A = 1 + 2 * 3\n");
    assert_eq!(program.lines.len(), 1);
    assert_eq!(program.lines[0].label, 10);
    match &program.lines[0].statement {
        Statement::Let { var, expr } => {
            assert_eq!(*var, 1);
            assert_eq!(expr.tail.len(), 1);
        }
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn parses_if_then_goto() {
    let program = parse_ok("10 IF A < 5 THEN GOTO 20\n");
    match &program.lines[0].statement {
        Statement::If { op, then_stmt, .. } => {
            assert_eq!(*op, RelOp::LessThan);
            assert!(matches!(**then_stmt, Statement::Goto { .. }));
        }
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn parses_print_with_strings_and_expressions() {
    let program = parse_ok("10 PRINT \"X=\", A, \"Y=\", B\n");
    match &program.lines[0].statement {
        Statement::Print { items } => assert_eq!(items.len(), 4),
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn parses_empty_print() {
    let program = parse_ok("10 PRINT\n");
    match &program.lines[0].statement {
        Statement::Print { items } => assert!(items.is_empty()),
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn blank_unlabeled_line_is_dropped_from_the_ast() {
    let program = parse_ok("10 END\n\n");
    assert_eq!(program.lines.len(), 1);
}

#[test]
fn mandatory_mode_requires_strictly_increasing_labels() {
    let vocab = Vocabulary::english();
    let mut opts = LanguageOptions::default();
    opts.set_line_numbers(LineNumberMode::Mandatory);
    let (_program, reporter) = parse("10 END\n5 END\n", &vocab, opts);
    assert!(reporter.has_error());
    assert_eq!(reporter.error().unwrap().kind, ErrorKind::InvalidLineNumber);
}

#[test]
fn mandatory_mode_rejects_missing_label() {
    let vocab = Vocabulary::english();
    let mut opts = LanguageOptions::default();
    opts.set_line_numbers(LineNumberMode::Mandatory);
    let (_program, reporter) = parse("END\n", &vocab, opts);
    assert!(reporter.has_error());
    assert_eq!(reporter.error().unwrap().kind, ErrorKind::InvalidLineNumber);
}

#[test]
fn implied_mode_assigns_sequential_labels() {
    let vocab = Vocabulary::english();
    let mut opts = LanguageOptions::default();
    opts.set_line_numbers(LineNumberMode::Implied);
    let (program, reporter) = parse("LET A=1\nLET B=2\n", &vocab, opts);
    assert!(!reporter.has_error());
    assert_eq!(program.lines[0].label, 1);
    assert_eq!(program.lines[1].label, 2);
}

#[test]
fn line_limit_rejects_labels_above_it() {
    let vocab = Vocabulary::english();
    let mut opts = LanguageOptions::default();
    opts.set_line_limit(100);
    let (_program, reporter) = parse("200 END\n", &vocab, opts);
    assert!(reporter.has_error());
    assert_eq!(reporter.error().unwrap().kind, ErrorKind::InvalidLineNumber);
}

#[test]
fn missing_then_is_an_error() {
    let vocab = Vocabulary::english();
    let (_program, reporter) = parse("10 IF A = 1 GOTO 20\n", &vocab, LanguageOptions::default());
    assert!(reporter.has_error());
    assert_eq!(reporter.error().unwrap().kind, ErrorKind::ThenExpected);
}

#[test]
fn unmatched_paren_is_missing_paren_error() {
    let vocab = Vocabulary::english();
    let (_program, reporter) = parse("10 LET A = (1 + 2\n", &vocab, LanguageOptions::default());
    assert!(reporter.has_error());
    assert_eq!(reporter.error().unwrap().kind, ErrorKind::MissingParen);
}

#[test]
fn parser_resyncs_after_error_and_keeps_parsing_subsequent_lines() {
    let vocab = Vocabulary::english();
    let (program, reporter) = parse("10 @@@\n20 END\n", &vocab, LanguageOptions::default());
    assert!(reporter.has_error());
    assert!(program.lines.iter().any(|l| l.label == 20));
}

#[test]
fn comment_policy_default_is_enabled() {
    assert_eq!(LanguageOptions::default().comments, CommentPolicy::Enabled);
}

#[test]
fn labeled_comment_only_line_survives_as_a_jump_target_when_comments_enabled() {
    let program = parse_ok("10 REM a note\n20 GOTO 10\n");
    assert_eq!(program.lines.len(), 2);
    assert_eq!(program.lines[0].label, 10);
    assert!(matches!(program.lines[0].statement, Statement::None));
}

#[test]
fn labeled_comment_only_line_is_dropped_when_comments_disabled() {
    let vocab = Vocabulary::english();
    let mut opts = LanguageOptions::default();
    opts.set_comments(CommentPolicy::Disabled);
    let (program, reporter) = parse("10 REM a note\n20 END\n", &vocab, opts);
    assert!(!reporter.has_error());
    assert_eq!(program.lines.len(), 1);
    assert_eq!(program.lines[0].label, 20);
}

#[test]
fn poke_and_peek_parse() {
    let program = parse_ok("10 POKE 100, 5\n20 PEEK A, 100\n");
    assert!(matches!(program.lines[0].statement, Statement::Poke { .. }));
    assert!(matches!(program.lines[1].statement, Statement::Peek { .. }));
}

#[test]
fn if_is_not_self_nestable() {
    let vocab = Vocabulary::english();
    let (_program, reporter) = parse(
        "10 IF A=1 THEN IF B=2 THEN GOTO 20\n",
        &vocab,
        LanguageOptions::default(),
    );
    assert!(reporter.has_error());
    assert_eq!(reporter.error().unwrap().kind, ErrorKind::UnrecognisedCommand);
}

#[test]
fn bare_assignment_missing_let_is_invalid_assignment_not_unrecognised_command() {
    let vocab = Vocabulary::english();
    let (_program, reporter) = parse("A=5\n", &vocab, LanguageOptions::default());
    assert!(reporter.has_error());
    assert_eq!(reporter.error().unwrap().kind, ErrorKind::InvalidAssignment);
}
