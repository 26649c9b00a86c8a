//! The type oracle: the static type of an expression under an
//! environment. Total over well-formed ASTs on both sides of the
//! lowering pass: resolved operator variants and conversion nodes
//! type like anything else, so a lowered tree can be re-typed.
//!
//! Callers run after legality checking; anything the checker would
//! have rejected surfaces here as an Internal error.

use crate::diagnostics::CompileError;
use crate::parser::ast::*;
use crate::span::Spanned;
use crate::typeck::env::TypeMap;
use crate::types::Type;

pub fn type_of(
    expr: &Expr,
    functions: &[Spanned<Function>],
    env: &TypeMap,
) -> Result<Type, CompileError> {
    match expr {
        Expr::IntLit(_) => Ok(Type::Int),
        Expr::FloatLit(_) => Ok(Type::Float),
        Expr::CharLit(_) => Ok(Type::Char),
        Expr::BoolLit(_) => Ok(Type::Bool),
        Expr::Var(name) => env.lookup(name).ok_or_else(|| {
            CompileError::internal(format!("unbound identifier '{name}' during typing"))
        }),
        Expr::Binary { op, lhs, rhs } => {
            if op.is_logical() || op.is_relational() {
                return Ok(Type::Bool);
            }
            if op.is_arithmetic() {
                let lt = type_of(&lhs.node, functions, env)?;
                let rt = type_of(&rhs.node, functions, env)?;
                return lt.widened(rt).ok_or_else(|| {
                    CompileError::internal(format!(
                        "no common type for '{}' operands typed {lt} and {rt}",
                        op.symbol()
                    ))
                });
            }
            // Resolved variants carry their execution type.
            use BinOp::*;
            match op {
                IntAdd | IntSub | IntMul | IntDiv => Ok(Type::Int),
                FloatAdd | FloatSub | FloatMul | FloatDiv => Ok(Type::Float),
                _ => Ok(Type::Bool), // resolved relational variants
            }
        }
        Expr::Unary { op, operand } => match op {
            UnaryOp::Not => Ok(Type::Bool),
            UnaryOp::Neg => {
                let t = type_of(&operand.node, functions, env)?;
                match t {
                    Type::Int | Type::Float => Ok(t),
                    _ => Err(CompileError::internal(format!("negation of a {t} operand"))),
                }
            }
            UnaryOp::IntCast => Ok(Type::Int),
            UnaryOp::FloatCast => Ok(Type::Float),
            UnaryOp::CharCast => Ok(Type::Char),
            UnaryOp::NegInt => Ok(Type::Int),
            UnaryOp::NegFloat => Ok(Type::Float),
            UnaryOp::IntToFloat => Ok(Type::Float),
            UnaryOp::CharToInt => Ok(Type::Int),
            UnaryOp::FloatToInt => Ok(Type::Int),
            UnaryOp::IntToChar => Ok(Type::Char),
        },
        Expr::Call { name, .. } => functions
            .iter()
            .find(|f| f.node.name.node == name.node)
            .map(|f| f.node.return_type)
            .ok_or_else(|| {
                CompileError::internal(format!("call to unknown function '{}'", name.node))
            }),
    }
}
