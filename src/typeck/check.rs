use crate::diagnostics::CompileError;
use crate::parser::ast::*;
use crate::span::Spanned;
use crate::types::Type;
use super::assignable;
use super::env::{self, TypeMap};

/// Body checker for one function. `env` is the same merged map the
/// lowering pass sees; `vars` holds only value bindings (globals,
/// locals, params), so a function name used as a variable is caught
/// here instead of silently typing as its return type.
pub(crate) struct Checker<'a> {
    func: &'a Function,
    functions: &'a [Spanned<Function>],
    vars: TypeMap,
}

pub(crate) fn check_function(
    func: &Function,
    functions: &[Spanned<Function>],
    globals: &TypeMap,
) -> Result<(), CompileError> {
    let mut vars = globals.clone();
    if !func.locals.is_empty() {
        vars.merge(&env::typing(&func.locals));
    }
    if !func.params.is_empty() {
        vars.merge(&env::typing(&func.params));
    }
    let checker = Checker { func, functions, vars };
    checker.check_stmts(&func.body.node.stmts)
}

impl Checker<'_> {
    fn check_stmts(&self, stmts: &[Spanned<Stmt>]) -> Result<(), CompileError> {
        for stmt in stmts {
            self.check_stmt(stmt)?;
        }
        Ok(())
    }

    fn lookup_var(&self, name: &Spanned<String>) -> Result<Type, CompileError> {
        if let Some(ty) = self.vars.lookup(&name.node) {
            return Ok(ty);
        }
        let msg = if self.functions.iter().any(|f| f.node.name.node == name.node) {
            format!("'{}' is a function, not a variable", name.node)
        } else {
            format!("undefined variable '{}'", name.node)
        };
        Err(CompileError::type_err(msg, name.span))
    }

    fn check_stmt(&self, stmt: &Spanned<Stmt>) -> Result<(), CompileError> {
        match &stmt.node {
            Stmt::Skip => Ok(()),
            Stmt::Assign { target, value } => {
                let target_ty = self.lookup_var(target)?;
                let value_ty = self.check_expr(value)?;
                if !assignable(target_ty, value_ty) {
                    return Err(CompileError::type_err(
                        format!(
                            "type mismatch in assignment: expected {target_ty}, found {value_ty}"
                        ),
                        value.span,
                    ));
                }
                Ok(())
            }
            Stmt::If { cond, then_branch, else_branch } => {
                self.check_cond(cond, "if")?;
                self.check_stmt(then_branch)?;
                self.check_stmt(else_branch)
            }
            Stmt::While { cond, body } => {
                self.check_cond(cond, "while")?;
                self.check_stmt(body)
            }
            Stmt::Block(block) => self.check_stmts(&block.stmts),
            Stmt::Return { value, .. } => {
                if self.func.return_type == Type::Void {
                    return Err(CompileError::type_err(
                        format!("return in void function '{}'", self.func.name.node),
                        stmt.span,
                    ));
                }
                let value_ty = self.check_expr(value)?;
                if value_ty != self.func.return_type {
                    return Err(CompileError::type_err(
                        format!(
                            "return type mismatch: expected {}, found {value_ty}",
                            self.func.return_type
                        ),
                        value.span,
                    ));
                }
                Ok(())
            }
            Stmt::Call { name, args } => {
                let callee = self.check_call_args(name, args)?;
                if callee.return_type != Type::Void {
                    return Err(CompileError::type_err(
                        format!(
                            "call statement requires a void function; '{}' returns {}",
                            name.node, callee.return_type
                        ),
                        name.span,
                    ));
                }
                Ok(())
            }
        }
    }

    fn check_cond(&self, cond: &Spanned<Expr>, kind: &str) -> Result<(), CompileError> {
        let cond_ty = self.check_expr(cond)?;
        if cond_ty != Type::Bool {
            return Err(CompileError::type_err(
                format!("{kind} condition must be bool, found {cond_ty}"),
                cond.span,
            ));
        }
        Ok(())
    }

    fn check_expr(&self, expr: &Spanned<Expr>) -> Result<Type, CompileError> {
        match &expr.node {
            Expr::IntLit(_) => Ok(Type::Int),
            Expr::FloatLit(_) => Ok(Type::Float),
            Expr::CharLit(_) => Ok(Type::Char),
            Expr::BoolLit(_) => Ok(Type::Bool),
            Expr::Var(name) => self.lookup_var(&Spanned::new(name.clone(), expr.span)),
            Expr::Binary { op, lhs, rhs } => {
                let lt = self.check_expr(lhs)?;
                let rt = self.check_expr(rhs)?;
                if op.is_arithmetic() {
                    for (t, side) in [(lt, lhs), (rt, rhs)] {
                        if !t.is_numeric() {
                            return Err(CompileError::type_err(
                                format!("cannot apply '{}' to a {t} operand", op.symbol()),
                                side.span,
                            ));
                        }
                    }
                    if lt == Type::Char && rt == Type::Char {
                        return Err(CompileError::type_err(
                            format!("cannot apply '{}' to two char operands", op.symbol()),
                            expr.span,
                        ));
                    }
                    lt.widened(rt).ok_or_else(|| {
                        CompileError::internal("numeric operands with no common type")
                    })
                } else if op.is_relational() {
                    let comparable = (lt == Type::Bool && rt == Type::Bool)
                        || (lt.is_numeric() && rt.is_numeric());
                    if !comparable {
                        return Err(CompileError::type_err(
                            format!("cannot compare {lt} and {rt}"),
                            expr.span,
                        ));
                    }
                    Ok(Type::Bool)
                } else if op.is_logical() {
                    for (t, side) in [(lt, lhs), (rt, rhs)] {
                        if t != Type::Bool {
                            return Err(CompileError::type_err(
                                format!("'{}' requires bool operands, found {t}", op.symbol()),
                                side.span,
                            ));
                        }
                    }
                    Ok(Type::Bool)
                } else {
                    Err(CompileError::internal("resolved operator in unchecked tree"))
                }
            }
            Expr::Unary { op, operand } => {
                let t = self.check_expr(operand)?;
                match op {
                    UnaryOp::Not => {
                        if t != Type::Bool {
                            return Err(CompileError::type_err(
                                format!("cannot apply '!' to type {t}"),
                                expr.span,
                            ));
                        }
                        Ok(Type::Bool)
                    }
                    UnaryOp::Neg => match t {
                        Type::Int | Type::Float => Ok(t),
                        _ => Err(CompileError::type_err(
                            format!("cannot negate type {t}"),
                            expr.span,
                        )),
                    },
                    UnaryOp::IntCast => {
                        if !t.is_numeric() {
                            return Err(CompileError::type_err(
                                format!("cannot cast {t} to int"),
                                expr.span,
                            ));
                        }
                        Ok(Type::Int)
                    }
                    UnaryOp::FloatCast => {
                        if t != Type::Int {
                            return Err(CompileError::type_err(
                                format!("'float(...)' requires an int operand, found {t}"),
                                expr.span,
                            ));
                        }
                        Ok(Type::Float)
                    }
                    UnaryOp::CharCast => {
                        if t != Type::Int {
                            return Err(CompileError::type_err(
                                format!("'char(...)' requires an int operand, found {t}"),
                                expr.span,
                            ));
                        }
                        Ok(Type::Char)
                    }
                    _ => Err(CompileError::internal("resolved operator in unchecked tree")),
                }
            }
            Expr::Call { name, args } => {
                let callee = self.check_call_args(name, args)?;
                if callee.return_type == Type::Void {
                    return Err(CompileError::type_err(
                        format!("void function '{}' used in an expression", name.node),
                        expr.span,
                    ));
                }
                Ok(callee.return_type)
            }
        }
    }

    /// Arity and argument types for a call in either position.
    /// Argument types must equal the parameter types exactly; the
    /// lowering pass inserts no call-boundary coercions.
    fn check_call_args(
        &self,
        name: &Spanned<String>,
        args: &[Spanned<Expr>],
    ) -> Result<&Function, CompileError> {
        let callee = self
            .functions
            .iter()
            .find(|f| f.node.name.node == name.node)
            .map(|f| &f.node)
            .ok_or_else(|| {
                CompileError::type_err(format!("unknown function '{}'", name.node), name.span)
            })?;

        if args.len() != callee.params.len() {
            return Err(CompileError::type_err(
                format!(
                    "function '{}' expects {} arguments, found {}",
                    name.node,
                    callee.params.len(),
                    args.len()
                ),
                name.span,
            ));
        }

        for (arg, param) in args.iter().zip(&callee.params) {
            let arg_ty = self.check_expr(arg)?;
            if arg_ty != param.node.ty {
                return Err(CompileError::type_err(
                    format!(
                        "argument type mismatch in call to '{}': expected {}, found {arg_ty}",
                        name.node, param.node.ty
                    ),
                    arg.span,
                ));
            }
        }

        Ok(callee)
    }
}
