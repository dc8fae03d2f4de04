//! C source-code generator.
//!
//! Translates an AST into a standalone, compilable C program. The runtime
//! shape of the generated program mirrors the interpreter: one function,
//! `bas_exec`, dispatches on a line label the way the interpreter's
//! `find_label` does — including the same `==` vs `<=` distinction driven
//! by the line-number policy, so a GOTO to a missing IMPLIED label rounds
//! up identically in both the interpreter and the compiled binary.

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::error::ErrorKind;
use crate::options::{LanguageOptions, LineNumberMode};
use crate::parser::ast::*;

pub fn generate_c(program: &Program, options: &LanguageOptions) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "#include <stdio.h>");
    let _ = writeln!(out, "#include <stdlib.h>");
    let _ = writeln!(
        out,
        "#define E_RETURN_WITHOUT_GOSUB {}",
        ErrorKind::ReturnWithoutGosub.code()
    );
    out.push('\n');

    let vars = referenced_variables(program);
    for v in &vars {
        let _ = writeln!(out, "short int {};", var_char(*v));
    }
    if !vars.is_empty() {
        out.push('\n');
    }

    if has_input(program) {
        out.push_str(
            "static int bas_input(void) {\n\
             \tint sign = 1, value = 0, c;\n\
             \twhile ((c = getchar()) != EOF && c != '-' && (c < '0' || c > '9')) {}\n\
             \tif (c == '-') { sign = -1; c = getchar(); }\n\
             \twhile (c >= '0' && c <= '9') { value = value * 10 + (c - '0'); c = getchar(); }\n\
             \treturn sign * value;\n\
             }\n\n",
        );
    }

    let _ = writeln!(out, "void bas_exec(int label) {{");
    out.push_str("\tif (!label) goto lbl_start;\n");
    let op = match options.line_numbers {
        LineNumberMode::Optional => "==",
        LineNumberMode::Implied | LineNumberMode::Mandatory => "<=",
    };
    for line in &program.lines {
        if line.label != 0 {
            let _ = writeln!(out, "\tif (label {op} {}) goto lbl_{};", line.label, line.label);
        }
    }
    out.push_str("\tgoto_block:\n");

    for (i, line) in program.lines.iter().enumerate() {
        if i == 0 {
            out.push_str("\tlbl_start:\n");
        }
        if line.label != 0 {
            let _ = writeln!(out, "\tlbl_{}:", line.label);
        }
        emit_statement(&line.statement, &mut out, 1);
    }

    out.push_str("}\n\n");
    out.push_str("int main(void) {\n\tbas_exec(0);\n\texit(E_RETURN_WITHOUT_GOSUB);\n}\n");
    out
}

fn emit_statement(stmt: &Statement, out: &mut String, indent: usize) {
    let pad = "\t".repeat(indent);
    match stmt {
        Statement::Let { var, expr } => {
            let _ = writeln!(out, "{pad}{} = {};", var_char(*var), emit_expr(expr));
        }
        Statement::If { left, op, right, then_stmt } => {
            let _ = writeln!(
                out,
                "{pad}if ({} {} {}) {{",
                emit_expr(left),
                relop_c(*op),
                emit_expr(right)
            );
            emit_statement(then_stmt, out, indent + 1);
            let _ = writeln!(out, "{pad}}}");
        }
        Statement::Goto { target } => {
            let _ = writeln!(out, "{pad}label = {}; goto goto_block;", emit_expr(target));
        }
        Statement::Gosub { target } => {
            let _ = writeln!(out, "{pad}bas_exec({});", emit_expr(target));
        }
        Statement::Return => {
            let _ = writeln!(out, "{pad}return;");
        }
        Statement::End => {
            let _ = writeln!(out, "{pad}exit(0);");
        }
        Statement::Print { items } => {
            let mut format = String::new();
            let mut args = Vec::new();
            for item in items {
                match item {
                    PrintItem::Str(s) => format.push_str(&escape_c_string(s)),
                    PrintItem::Expr(e) => {
                        format.push_str("%d");
                        args.push(emit_expr(e));
                    }
                }
            }
            format.push_str("\\n");
            if args.is_empty() {
                let _ = writeln!(out, "{pad}printf(\"{format}\");");
            } else {
                let _ = writeln!(out, "{pad}printf(\"{format}\", {});", args.join(", "));
            }
        }
        Statement::Input { vars } => {
            for v in vars {
                let _ = writeln!(out, "{pad}{} = bas_input();", var_char(*v));
            }
        }
        Statement::Peek { var, address } => {
            let _ = writeln!(
                out,
                "{pad}{} = *(short int *)({});",
                var_char(*var),
                emit_expr(address)
            );
        }
        Statement::Poke { address, value } => {
            let _ = writeln!(
                out,
                "{pad}*(short int *)({}) = {};",
                emit_expr(address),
                emit_expr(value)
            );
        }
        Statement::None => {}
    }
}

fn relop_c(op: RelOp) -> &'static str {
    match op {
        RelOp::Equal => "==",
        RelOp::Unequal => "!=",
        RelOp::LessThan => "<",
        RelOp::LessOrEqual => "<=",
        RelOp::GreaterThan => ">",
        RelOp::GreaterOrEqual => ">=",
    }
}

fn var_char(idx: u8) -> char {
    (b'A' + idx - 1) as char
}

fn escape_c_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn emit_expr(expr: &Expr) -> String {
    let mut out = emit_term(&expr.head);
    for (op, term) in &expr.tail {
        let sym = match op {
            AddOp::Add => '+',
            AddOp::Sub => '-',
        };
        out = format!("{out} {sym} {}", emit_term(term));
    }
    out
}

fn emit_term(term: &Term) -> String {
    let mut out = emit_signed_factor(&term.head);
    for (op, factor) in &term.tail {
        let sym = match op {
            MulOp::Multiply => '*',
            MulOp::Divide => '/',
        };
        out = format!("{out} {sym} {}", emit_signed_factor(factor));
    }
    out
}

fn emit_signed_factor(sf: &SignedFactor) -> String {
    let value = emit_factor(&sf.factor);
    match sf.sign {
        Sign::Positive => value,
        Sign::Negative => format!("-{value}"),
    }
}

fn emit_factor(factor: &Factor) -> String {
    match factor {
        Factor::Variable(idx) => var_char(*idx).to_string(),
        Factor::Value(n) => n.to_string(),
        Factor::Parenthesized(expr) => format!("({})", emit_expr(expr)),
    }
}

fn referenced_variables(program: &Program) -> BTreeSet<u8> {
    let mut vars = BTreeSet::new();
    for line in &program.lines {
        collect_statement(&line.statement, &mut vars);
    }
    vars
}

fn collect_statement(stmt: &Statement, vars: &mut BTreeSet<u8>) {
    match stmt {
        Statement::Let { var, expr } => {
            vars.insert(*var);
            collect_expr(expr, vars);
        }
        Statement::If { left, right, then_stmt, .. } => {
            collect_expr(left, vars);
            collect_expr(right, vars);
            collect_statement(then_stmt, vars);
        }
        Statement::Goto { target } | Statement::Gosub { target } => collect_expr(target, vars),
        Statement::Print { items } => {
            for item in items {
                if let PrintItem::Expr(e) = item {
                    collect_expr(e, vars);
                }
            }
        }
        Statement::Input { vars: vs } => vars.extend(vs.iter().copied()),
        Statement::Peek { var, address } => {
            vars.insert(*var);
            collect_expr(address, vars);
        }
        Statement::Poke { address, value } => {
            collect_expr(address, vars);
            collect_expr(value, vars);
        }
        Statement::Return | Statement::End | Statement::None => {}
    }
}

fn collect_expr(expr: &Expr, vars: &mut BTreeSet<u8>) {
    collect_term(&expr.head, vars);
    for (_, term) in &expr.tail {
        collect_term(term, vars);
    }
}

fn collect_term(term: &Term, vars: &mut BTreeSet<u8>) {
    collect_factor(&term.head.factor, vars);
    for (_, factor) in &term.tail {
        collect_factor(&factor.factor, vars);
    }
}

fn collect_factor(factor: &Factor, vars: &mut BTreeSet<u8>) {
    match factor {
        Factor::Variable(idx) => {
            vars.insert(*idx);
        }
        Factor::Value(_) => {}
        Factor::Parenthesized(expr) => collect_expr(expr, vars),
    }
}

fn has_input(program: &Program) -> bool {
    program
        .lines
        .iter()
        .any(|l| matches!(l.statement, Statement::Input { .. }))
}
