//! Explicit-coercion lowering.
//!
//! Rewrites a type-checked program so that every implicit widening the
//! usual-conversion rules allow (char < int < float) appears as an
//! explicit conversion node, and every arithmetic/relational operator
//! is resolved to the variant for the type it executes at. The result
//! is a new `Program`; the input tree is never mutated. Downstream
//! consumers of the lowered tree never have to reason about implicit
//! promotion.
//!
//! The pass assumes `typeck::type_check` accepted the program. Every
//! failure below is an Internal error: reachable only on an ill-typed
//! or already-lowered input.

use crate::diagnostics::CompileError;
use crate::parser::ast::*;
use crate::span::Spanned;
use crate::typeck::env::{self, TypeMap};
use crate::typeck::infer::type_of;
use crate::types::Type;

/// Lower every function body; globals and function order are
/// preserved untouched.
pub fn coerce_program(program: &Program, globals: &TypeMap) -> Result<Program, CompileError> {
    let mut functions = Vec::with_capacity(program.functions.len());
    for func in &program.functions {
        let fenv = env::function_env(&program.functions, globals, &func.node);
        let body = coerce_block(&func.node.body, &program.functions, &fenv)?;
        functions.push(Spanned::new(
            Function {
                return_type: func.node.return_type,
                name: func.node.name.clone(),
                params: func.node.params.clone(),
                locals: func.node.locals.clone(),
                body,
            },
            func.span,
        ));
    }
    Ok(Program { globals: program.globals.clone(), functions })
}

fn coerce_block(
    block: &Spanned<Block>,
    functions: &[Spanned<Function>],
    env: &TypeMap,
) -> Result<Spanned<Block>, CompileError> {
    let mut stmts = Vec::with_capacity(block.node.stmts.len());
    for stmt in &block.node.stmts {
        stmts.push(coerce_stmt(stmt, functions, env)?);
    }
    Ok(Spanned::new(Block { stmts }, block.span))
}

fn coerce_stmt(
    stmt: &Spanned<Stmt>,
    functions: &[Spanned<Function>],
    env: &TypeMap,
) -> Result<Spanned<Stmt>, CompileError> {
    let lowered = match &stmt.node {
        Stmt::Skip => Stmt::Skip,
        Stmt::Assign { target, value } => {
            // Source type is computed on the original expression; the
            // lowering of the value happens independently.
            let mut source_ty = type_of(&value.node, functions, env)?;
            let mut value = coerce_expr(value, functions, env)?;
            let target_ty = env.lookup(&target.node).ok_or_else(|| {
                CompileError::internal(format!("assignment to unbound '{}'", target.node))
            })?;
            if target_ty == Type::Float && source_ty == Type::Int {
                value = convert(UnaryOp::IntToFloat, value);
                source_ty = Type::Float;
            } else if target_ty == Type::Int && source_ty == Type::Char {
                value = convert(UnaryOp::CharToInt, value);
                source_ty = Type::Int;
            }
            if source_ty != target_ty {
                return Err(CompileError::internal(format!(
                    "assignment to '{}' left {source_ty} where {target_ty} was declared",
                    target.node
                )));
            }
            Stmt::Assign { target: target.clone(), value }
        }
        Stmt::If { cond, then_branch, else_branch } => Stmt::If {
            cond: coerce_expr(cond, functions, env)?,
            then_branch: Box::new(coerce_stmt(then_branch, functions, env)?),
            else_branch: Box::new(coerce_stmt(else_branch, functions, env)?),
        },
        Stmt::While { cond, body } => Stmt::While {
            cond: coerce_expr(cond, functions, env)?,
            body: Box::new(coerce_stmt(body, functions, env)?),
        },
        Stmt::Block(block) => {
            let mut stmts = Vec::with_capacity(block.stmts.len());
            for member in &block.stmts {
                stmts.push(coerce_stmt(member, functions, env)?);
            }
            Stmt::Block(Block { stmts })
        }
        Stmt::Return { target, value } => Stmt::Return {
            target: target.clone(),
            value: coerce_expr(value, functions, env)?,
        },
        Stmt::Call { name, args } => Stmt::Call {
            name: name.clone(),
            args: coerce_args(args, functions, env)?,
        },
    };
    Ok(Spanned::new(lowered, stmt.span))
}

fn coerce_expr(
    expr: &Spanned<Expr>,
    functions: &[Spanned<Function>],
    env: &TypeMap,
) -> Result<Spanned<Expr>, CompileError> {
    match &expr.node {
        // Leaves carry no sub-expressions to coerce.
        Expr::IntLit(_)
        | Expr::FloatLit(_)
        | Expr::CharLit(_)
        | Expr::BoolLit(_)
        | Expr::Var(_) => Ok(expr.clone()),

        Expr::Binary { op, lhs, rhs } => {
            // Operand types come from the original subtrees, before
            // either side is rewritten.
            let lt = type_of(&lhs.node, functions, env)?;
            let rt = type_of(&rhs.node, functions, env)?;
            let lhs = coerce_expr(lhs, functions, env)?;
            let rhs = coerce_expr(rhs, functions, env)?;

            // The usual-conversion ladder, first match wins:
            // float beats int beats char beats bool.
            let (op, lhs, rhs) = if lt == Type::Float || rt == Type::Float {
                (
                    resolve_binary(*op, Type::Float)?,
                    widen_to_float(lhs, lt),
                    widen_to_float(rhs, rt),
                )
            } else if lt == Type::Int || rt == Type::Int {
                (
                    resolve_binary(*op, Type::Int)?,
                    widen_to_int(lhs, lt),
                    widen_to_int(rhs, rt),
                )
            } else if lt == Type::Char || rt == Type::Char {
                (resolve_binary(*op, Type::Char)?, lhs, rhs)
            } else if lt == Type::Bool || rt == Type::Bool {
                (resolve_binary(*op, Type::Bool)?, lhs, rhs)
            } else {
                return Err(CompileError::internal(format!(
                    "binary operands typed {lt} and {rt}"
                )));
            };

            Ok(Spanned::new(
                Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) },
                expr.span,
            ))
        }

        Expr::Unary { op, operand } => {
            let t = type_of(&operand.node, functions, env)?;
            let operand = coerce_expr(operand, functions, env)?;
            let op = match op {
                // Logical negation is type-invariant.
                UnaryOp::Not => UnaryOp::Not,
                UnaryOp::Neg => match t {
                    Type::Int => UnaryOp::NegInt,
                    Type::Float => UnaryOp::NegFloat,
                    _ => {
                        return Err(CompileError::internal(format!(
                            "negation of a {t} operand"
                        )));
                    }
                },
                // The surface casts resolve against the operand type
                // the checker guaranteed: float(e) and char(e) take an
                // int, int(e) narrows from float or char and is a
                // no-op on int.
                UnaryOp::FloatCast => UnaryOp::IntToFloat,
                UnaryOp::CharCast => UnaryOp::IntToChar,
                UnaryOp::IntCast => match t {
                    Type::Float => UnaryOp::FloatToInt,
                    Type::Char => UnaryOp::CharToInt,
                    _ => UnaryOp::IntCast,
                },
                resolved => {
                    return Err(CompileError::internal(format!(
                        "operator '{resolved:?}' already resolved in lowering input"
                    )));
                }
            };
            Ok(Spanned::new(
                Expr::Unary { op, operand: Box::new(operand) },
                expr.span,
            ))
        }

        Expr::Call { name, args } => Ok(Spanned::new(
            Expr::Call {
                name: name.clone(),
                args: coerce_args(args, functions, env)?,
            },
            expr.span,
        )),
    }
}

fn coerce_args(
    args: &[Spanned<Expr>],
    functions: &[Spanned<Function>],
    env: &TypeMap,
) -> Result<Vec<Spanned<Expr>>, CompileError> {
    let mut lowered = Vec::with_capacity(args.len());
    for arg in args {
        lowered.push(coerce_expr(arg, functions, env)?);
    }
    Ok(lowered)
}

fn resolve_binary(op: BinOp, ty: Type) -> Result<BinOp, CompileError> {
    op.for_operand_type(ty).ok_or_else(|| {
        CompileError::internal(format!("no {ty} variant of '{}'", op.symbol()))
    })
}

/// Wrap `operand` in a conversion node. The node adopts the operand's
/// span, since it has no surface syntax of its own.
fn convert(op: UnaryOp, operand: Spanned<Expr>) -> Spanned<Expr> {
    let span = operand.span;
    Spanned::new(Expr::Unary { op, operand: Box::new(operand) }, span)
}

/// Widen an operand already known to sit under float in the ladder.
/// A char widens along char < int < float, so it takes both steps.
fn widen_to_float(operand: Spanned<Expr>, from: Type) -> Spanned<Expr> {
    match from {
        Type::Int => convert(UnaryOp::IntToFloat, operand),
        Type::Char => convert(UnaryOp::IntToFloat, convert(UnaryOp::CharToInt, operand)),
        _ => operand,
    }
}

fn widen_to_int(operand: Spanned<Expr>, from: Type) -> Spanned<Expr> {
    match from {
        Type::Char => convert(UnaryOp::CharToInt, operand),
        _ => operand,
    }
}
