use super::*;
use crate::options::{LanguageOptions, LineNumberMode};
use crate::parser::parse;
use crate::vocabulary::Vocabulary;

fn compile(source: &str, options: LanguageOptions) -> String {
    let vocab = Vocabulary::english();
    let (program, reporter) = parse(source, &vocab, options);
    assert!(!reporter.has_error(), "{:?}", reporter.error());
    generate_c(&program, &options)
}

#[test]
fn emits_standard_headers_and_define() {
    let c = compile("10 END\n", LanguageOptions::default());
    assert!(c.contains("#include <stdio.h>"));
    assert!(c.contains("#include <stdlib.h>"));
    assert!(c.contains(&format!(
        "#define E_RETURN_WITHOUT_GOSUB {}",
        ErrorKind::ReturnWithoutGosub.code()
    )));
}

#[test]
fn declares_every_referenced_variable() {
    let c = compile("10 LET A=1\n20 LET B=A+2\n", LanguageOptions::default());
    assert!(c.contains("short int A;"));
    assert!(c.contains("short int B;"));
}

#[test]
fn emits_bas_input_helper_only_when_input_is_used() {
    let with_input = compile("10 INPUT A\n", LanguageOptions::default());
    assert!(with_input.contains("bas_input"));
    let without_input = compile("10 LET A=1\n", LanguageOptions::default());
    assert!(!without_input.contains("bas_input"));
}

#[test]
fn optional_mode_dispatches_with_equality() {
    let c = compile("10 END\n", LanguageOptions::default());
    assert!(c.contains("if (label == 10) goto lbl_10;"));
}

#[test]
fn implied_mode_dispatches_with_less_or_equal() {
    let mut opts = LanguageOptions::default();
    opts.set_line_numbers(LineNumberMode::Implied);
    let c = compile("LET A=1\nLET B=2\n", opts);
    assert!(c.contains("if (label <= 1) goto lbl_1;"));
    assert!(c.contains("if (label <= 2) goto lbl_2;"));
}

#[test]
fn translates_control_flow_statements() {
    let c = compile("10 GOTO 20\n20 GOSUB 30\n30 RETURN\n", LanguageOptions::default());
    assert!(c.contains("label = 20; goto goto_block;"));
    assert!(c.contains("bas_exec(30);"));
    assert!(c.contains("return;"));
}

#[test]
fn translates_print_into_printf_with_format_and_args() {
    let c = compile("10 PRINT \"X=\",A\n", LanguageOptions::default());
    assert!(c.contains("printf(\"X=%d\\n\", A);"));
}

#[test]
fn emits_signed_tail_factor_in_a_term() {
    let c = compile("10 LET A=3*-4\n", LanguageOptions::default());
    assert!(c.contains("A = 3 * -4;"));
}

#[test]
fn main_calls_bas_exec_then_exits() {
    let c = compile("10 END\n", LanguageOptions::default());
    assert!(c.contains("bas_exec(0);"));
    assert!(c.contains("exit(E_RETURN_WITHOUT_GOSUB);"));
}
