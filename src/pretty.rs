use crate::parser::ast::*;

/// Pretty-print a `Program` AST back into valid Ceres source text.
///
/// Lowered trees print with their coercions visible: conversion nodes
/// render as the explicit cast syntax they stand for (`float(_)`,
/// `int(_)`, `char(_)`), and resolved operator variants render as
/// their surface symbol.
pub fn pretty_print(program: &Program) -> String {
    let mut pp = PrettyPrinter::new();
    pp.emit_program(program);
    pp.buf
}

struct PrettyPrinter {
    buf: String,
    indent: usize,
}

impl PrettyPrinter {
    fn new() -> Self {
        Self { buf: String::new(), indent: 0 }
    }

    fn write(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn newline(&mut self) {
        self.buf.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.buf.push_str("    ");
        }
    }

    fn indent(&mut self) {
        self.indent += 1;
    }

    fn dedent(&mut self) {
        self.indent -= 1;
    }

    // ── Program ──────────────────────────────────────────────────────

    fn emit_program(&mut self, program: &Program) {
        for g in &program.globals {
            self.write(&format!("{} {};", g.node.ty, g.node.name.node));
            self.newline();
        }

        for (i, func) in program.functions.iter().enumerate() {
            if i > 0 || !program.globals.is_empty() {
                self.newline();
            }
            self.emit_function(&func.node);
        }
    }

    fn emit_function(&mut self, func: &Function) {
        self.write(&format!("{} {}(", func.return_type, func.name.node));
        for (i, p) in func.params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&format!("{} {}", p.node.ty, p.node.name.node));
        }
        self.write(") {");
        self.newline();
        self.indent();

        for local in &func.locals {
            self.write_indent();
            self.write(&format!("{} {};", local.node.ty, local.node.name.node));
            self.newline();
        }

        for stmt in &func.body.node.stmts {
            self.emit_stmt(&stmt.node);
        }

        self.dedent();
        self.write("}");
        self.newline();
    }

    // ── Statements ───────────────────────────────────────────────────

    fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Skip => {
                self.write_indent();
                self.write(";");
                self.newline();
            }
            Stmt::Assign { target, value } => {
                self.write_indent();
                self.write(&target.node);
                self.write(" = ");
                self.emit_expr(&value.node);
                self.write(";");
                self.newline();
            }
            Stmt::If { cond, then_branch, else_branch } => {
                self.write_indent();
                self.write("if (");
                self.emit_expr(&cond.node);
                self.write(")");
                self.emit_child(&then_branch.node);
                if !matches!(else_branch.node, Stmt::Skip) {
                    self.write_indent();
                    self.write("else");
                    self.emit_child(&else_branch.node);
                }
            }
            Stmt::While { cond, body } => {
                self.write_indent();
                self.write("while (");
                self.emit_expr(&cond.node);
                self.write(")");
                self.emit_child(&body.node);
            }
            Stmt::Block(block) => {
                self.write_indent();
                self.write("{");
                self.newline();
                self.indent();
                for s in &block.stmts {
                    self.emit_stmt(&s.node);
                }
                self.dedent();
                self.write_indent();
                self.write("}");
                self.newline();
            }
            Stmt::Return { value, .. } => {
                self.write_indent();
                self.write("return ");
                self.emit_expr(&value.node);
                self.write(";");
                self.newline();
            }
            Stmt::Call { name, args } => {
                self.write_indent();
                self.write(&name.node);
                self.emit_args(args);
                self.write(";");
                self.newline();
            }
        }
    }

    /// A statement hanging off `if`/`while`: blocks cuddle the header,
    /// anything else goes on its own indented line.
    fn emit_child(&mut self, stmt: &Stmt) {
        if let Stmt::Block(block) = stmt {
            self.write(" {");
            self.newline();
            self.indent();
            for s in &block.stmts {
                self.emit_stmt(&s.node);
            }
            self.dedent();
            self.write_indent();
            self.write("}");
            self.newline();
        } else {
            self.newline();
            self.indent();
            self.emit_stmt(stmt);
            self.dedent();
        }
    }

    // ── Expressions ──────────────────────────────────────────────────

    fn emit_expr(&mut self, expr: &Expr) {
        self.emit_expr_prec(expr, 0, false);
    }

    fn emit_expr_prec(&mut self, expr: &Expr, parent: u8, right_of_parent: bool) {
        match expr {
            Expr::IntLit(n) => self.write(&n.to_string()),
            // Debug formatting keeps the decimal point, so the text
            // re-lexes as a float literal.
            Expr::FloatLit(x) => self.write(&format!("{x:?}")),
            Expr::CharLit(c) => self.write(&char_literal(*c)),
            Expr::BoolLit(b) => self.write(if *b { "true" } else { "false" }),
            Expr::Var(name) => self.write(name),
            Expr::Binary { op, lhs, rhs } => {
                let level = prec(*op);
                let parens = level < parent || (level == parent && right_of_parent);
                if parens {
                    self.write("(");
                }
                self.emit_expr_prec(&lhs.node, level, false);
                self.write(&format!(" {} ", op.symbol()));
                self.emit_expr_prec(&rhs.node, level, true);
                if parens {
                    self.write(")");
                }
            }
            Expr::Unary { op, operand } => match op {
                UnaryOp::Not | UnaryOp::Neg | UnaryOp::NegInt | UnaryOp::NegFloat => {
                    self.write(if matches!(op, UnaryOp::Not) { "!" } else { "-" });
                    if matches!(operand.node, Expr::Binary { .. }) {
                        self.write("(");
                        self.emit_expr(&operand.node);
                        self.write(")");
                    } else {
                        self.emit_expr_prec(&operand.node, u8::MAX, false);
                    }
                }
                UnaryOp::IntCast | UnaryOp::CharToInt | UnaryOp::FloatToInt => {
                    self.write("int(");
                    self.emit_expr(&operand.node);
                    self.write(")");
                }
                UnaryOp::FloatCast | UnaryOp::IntToFloat => {
                    self.write("float(");
                    self.emit_expr(&operand.node);
                    self.write(")");
                }
                UnaryOp::CharCast | UnaryOp::IntToChar => {
                    self.write("char(");
                    self.emit_expr(&operand.node);
                    self.write(")");
                }
            },
            Expr::Call { name, args } => {
                self.write(&name.node);
                self.emit_args(args);
            }
        }
    }

    fn emit_args(&mut self, args: &[crate::span::Spanned<Expr>]) {
        self.write("(");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expr(&arg.node);
        }
        self.write(")");
    }
}

fn prec(op: BinOp) -> u8 {
    match op.symbol() {
        "||" => 1,
        "&&" => 2,
        "==" | "!=" => 3,
        "<" | "<=" | ">" | ">=" => 4,
        "+" | "-" => 5,
        _ => 6, // "*" and "/"
    }
}

fn char_literal(c: char) -> String {
    match c {
        '\n' => "'\\n'".to_string(),
        '\t' => "'\\t'".to_string(),
        '\r' => "'\\r'".to_string(),
        '\\' => "'\\\\'".to_string(),
        '\'' => "'\\''".to_string(),
        '\0' => "'\\0'".to_string(),
        c => format!("'{c}'"),
    }
}
