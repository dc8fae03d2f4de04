//! Canonical source formatter.
//!
//! Renders an AST back to source text. Re-parsing the output and
//! formatting again must be byte-identical — the formatter never consults
//! [`LanguageOptions`] beyond what the parser already baked into the
//! labels, so there is nothing left that could make two passes disagree.

#[cfg(test)]
mod tests;

use std::fmt::Write as _;

use crate::parser::ast::*;

/// Formats a whole program, one line per original `ProgramLine`.
pub fn format_program(program: &Program) -> String {
    let mut out = String::new();
    for line in &program.lines {
        format_line(line, &mut out);
    }
    out
}

fn format_line(line: &ProgramLine, out: &mut String) {
    if line.label != 0 {
        let _ = write!(out, "{:>5} ", line.label);
    } else {
        out.push_str("      ");
    }
    format_statement(&line.statement, out);
    out.push('\n');
}

fn format_statement(stmt: &Statement, out: &mut String) {
    match stmt {
        Statement::Let { var, expr } => {
            out.push_str("LET ");
            out.push(var_char(*var));
            out.push('=');
            format_expr(expr, out);
        }
        Statement::If { left, op, right, then_stmt } => {
            out.push_str("IF ");
            format_expr(left, out);
            out.push_str(relop_str(*op));
            format_expr(right, out);
            out.push_str(" THEN ");
            format_statement(then_stmt, out);
        }
        Statement::Goto { target } => {
            out.push_str("GOTO ");
            format_expr(target, out);
        }
        Statement::Gosub { target } => {
            out.push_str("GOSUB ");
            format_expr(target, out);
        }
        Statement::Return => out.push_str("RETURN"),
        Statement::End => out.push_str("END"),
        Statement::Print { items } => {
            out.push_str("PRINT ");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                match item {
                    PrintItem::Str(s) => {
                        out.push('"');
                        out.push_str(s);
                        out.push('"');
                    }
                    PrintItem::Expr(e) => format_expr(e, out),
                }
            }
        }
        Statement::Input { vars } => {
            out.push_str("INPUT ");
            for (i, v) in vars.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push(var_char(*v));
            }
        }
        Statement::Peek { var, address } => {
            out.push_str("PEEK ");
            out.push(var_char(*var));
            out.push_str(", ");
            format_expr(address, out);
        }
        Statement::Poke { address, value } => {
            out.push_str("POKE ");
            format_expr(address, out);
            out.push_str(", ");
            format_expr(value, out);
        }
        Statement::None => {}
    }
}

fn relop_str(op: RelOp) -> &'static str {
    match op {
        RelOp::Equal => "=",
        RelOp::Unequal => "<>",
        RelOp::LessThan => "<",
        RelOp::LessOrEqual => "<=",
        RelOp::GreaterThan => ">",
        RelOp::GreaterOrEqual => ">=",
    }
}

fn var_char(idx: u8) -> char {
    (b'A' + idx - 1) as char
}

fn format_expr(expr: &Expr, out: &mut String) {
    format_term(&expr.head, out);
    for (op, term) in &expr.tail {
        out.push(match op {
            AddOp::Add => '+',
            AddOp::Sub => '-',
        });
        format_term(term, out);
    }
}

fn format_term(term: &Term, out: &mut String) {
    format_signed_factor(&term.head, out);
    for (op, factor) in &term.tail {
        out.push(match op {
            MulOp::Multiply => '*',
            MulOp::Divide => '/',
        });
        format_signed_factor(factor, out);
    }
}

fn format_signed_factor(sf: &SignedFactor, out: &mut String) {
    if sf.sign == Sign::Negative {
        out.push('-');
    }
    format_factor(&sf.factor, out);
}

fn format_factor(factor: &Factor, out: &mut String) {
    match factor {
        Factor::Variable(idx) => out.push(var_char(*idx)),
        Factor::Value(n) => {
            let _ = write!(out, "{n}");
        }
        Factor::Parenthesized(expr) => {
            out.push('(');
            format_expr(expr, out);
            out.push(')');
        }
    }
}
