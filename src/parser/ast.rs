use crate::span::Spanned;
use crate::types::Type;

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub globals: Vec<Spanned<Decl>>,
    pub functions: Vec<Spanned<Function>>,
}

/// A single `type name` binding. Globals, parameters, and locals all
/// share this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub name: Spanned<String>,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub return_type: Type,
    pub name: Spanned<String>,
    pub params: Vec<Spanned<Decl>>,
    pub locals: Vec<Spanned<Decl>>,
    pub body: Spanned<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// The empty statement, `;`. Also stands in for an omitted else
    /// branch.
    Skip,
    Assign {
        target: Spanned<String>,
        value: Spanned<Expr>,
    },
    If {
        cond: Spanned<Expr>,
        then_branch: Box<Spanned<Stmt>>,
        else_branch: Box<Spanned<Stmt>>,
    },
    While {
        cond: Spanned<Expr>,
        body: Box<Spanned<Stmt>>,
    },
    Block(Block),
    /// `target` names the enclosing function; the lowering pass leaves
    /// it untouched.
    Return {
        target: Spanned<String>,
        value: Spanned<Expr>,
    },
    /// Statement-position call. Only legal against void functions.
    Call {
        name: Spanned<String>,
        args: Vec<Spanned<Expr>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntLit(i64),
    FloatLit(f64),
    CharLit(char),
    BoolLit(bool),
    Var(String),
    Binary {
        op: BinOp,
        lhs: Box<Spanned<Expr>>,
        rhs: Box<Spanned<Expr>>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Spanned<Expr>>,
    },
    Call {
        name: Spanned<String>,
        args: Vec<Spanned<Expr>>,
    },
}

/// Binary operators. `Add` through `Or` are what the parser emits; the
/// variants below them are resolved forms only the lowering pass
/// produces, fixing the type the operation executes at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,

    IntAdd,
    IntSub,
    IntMul,
    IntDiv,
    FloatAdd,
    FloatSub,
    FloatMul,
    FloatDiv,
    IntEq,
    IntNotEq,
    IntLt,
    IntLtEq,
    IntGt,
    IntGtEq,
    FloatEq,
    FloatNotEq,
    FloatLt,
    FloatLtEq,
    FloatGt,
    FloatGtEq,
    CharEq,
    CharNotEq,
    CharLt,
    CharLtEq,
    CharGt,
    CharGtEq,
    BoolEq,
    BoolNotEq,
    BoolLt,
    BoolLtEq,
    BoolGt,
    BoolGtEq,
}

impl BinOp {
    /// Surface arithmetic operator, not yet resolved to a variant.
    pub fn is_arithmetic(self) -> bool {
        matches!(self, BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div)
    }

    /// Surface relational operator, not yet resolved to a variant.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::NotEq | BinOp::Lt | BinOp::LtEq | BinOp::Gt | BinOp::GtEq
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }

    /// Resolve a surface operator to its variant for `ty`, the type the
    /// operation executes at. Arithmetic operators have int and float
    /// variants; relational operators have variants for all four value
    /// types; `&&`/`||` are boolean-only and resolve to themselves.
    /// `None` means the combination is outside the operator table.
    pub fn for_operand_type(self, ty: Type) -> Option<BinOp> {
        use BinOp::*;
        match (self, ty) {
            (Add, Type::Int) => Some(IntAdd),
            (Sub, Type::Int) => Some(IntSub),
            (Mul, Type::Int) => Some(IntMul),
            (Div, Type::Int) => Some(IntDiv),
            (Add, Type::Float) => Some(FloatAdd),
            (Sub, Type::Float) => Some(FloatSub),
            (Mul, Type::Float) => Some(FloatMul),
            (Div, Type::Float) => Some(FloatDiv),

            (Eq, Type::Int) => Some(IntEq),
            (NotEq, Type::Int) => Some(IntNotEq),
            (Lt, Type::Int) => Some(IntLt),
            (LtEq, Type::Int) => Some(IntLtEq),
            (Gt, Type::Int) => Some(IntGt),
            (GtEq, Type::Int) => Some(IntGtEq),

            (Eq, Type::Float) => Some(FloatEq),
            (NotEq, Type::Float) => Some(FloatNotEq),
            (Lt, Type::Float) => Some(FloatLt),
            (LtEq, Type::Float) => Some(FloatLtEq),
            (Gt, Type::Float) => Some(FloatGt),
            (GtEq, Type::Float) => Some(FloatGtEq),

            (Eq, Type::Char) => Some(CharEq),
            (NotEq, Type::Char) => Some(CharNotEq),
            (Lt, Type::Char) => Some(CharLt),
            (LtEq, Type::Char) => Some(CharLtEq),
            (Gt, Type::Char) => Some(CharGt),
            (GtEq, Type::Char) => Some(CharGtEq),

            (Eq, Type::Bool) => Some(BoolEq),
            (NotEq, Type::Bool) => Some(BoolNotEq),
            (Lt, Type::Bool) => Some(BoolLt),
            (LtEq, Type::Bool) => Some(BoolLtEq),
            (Gt, Type::Bool) => Some(BoolGt),
            (GtEq, Type::Bool) => Some(BoolGtEq),

            (And | Or, Type::Bool) => Some(self),

            _ => None,
        }
    }

    /// The surface symbol; resolved variants render as the symbol of
    /// the operator they came from.
    pub fn symbol(self) -> &'static str {
        use BinOp::*;
        match self {
            Add | IntAdd | FloatAdd => "+",
            Sub | IntSub | FloatSub => "-",
            Mul | IntMul | FloatMul => "*",
            Div | IntDiv | FloatDiv => "/",
            Eq | IntEq | FloatEq | CharEq | BoolEq => "==",
            NotEq | IntNotEq | FloatNotEq | CharNotEq | BoolNotEq => "!=",
            Lt | IntLt | FloatLt | CharLt | BoolLt => "<",
            LtEq | IntLtEq | FloatLtEq | CharLtEq | BoolLtEq => "<=",
            Gt | IntGt | FloatGt | CharGt | BoolGt => ">",
            GtEq | IntGtEq | FloatGtEq | CharGtEq | BoolGtEq => ">=",
            And => "&&",
            Or => "||",
        }
    }
}

/// Unary operators. `Not` through `CharCast` come from the parser;
/// the rest are resolved forms the lowering pass produces. The four
/// `*To*` variants are the pure conversions the pass inserts to make
/// implicit coercions explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    /// Surface cast `int(e)`.
    IntCast,
    /// Surface cast `float(e)`.
    FloatCast,
    /// Surface cast `char(e)`.
    CharCast,

    NegInt,
    NegFloat,
    IntToFloat,
    CharToInt,
    FloatToInt,
    IntToChar,
}

impl UnaryOp {
    /// True for operators only the lowering pass emits.
    pub fn is_resolved(self) -> bool {
        matches!(
            self,
            UnaryOp::NegInt
                | UnaryOp::NegFloat
                | UnaryOp::IntToFloat
                | UnaryOp::CharToInt
                | UnaryOp::FloatToInt
                | UnaryOp::IntToChar
        )
    }

    /// True for the four pure conversion operators.
    pub fn is_conversion(self) -> bool {
        matches!(
            self,
            UnaryOp::IntToFloat | UnaryOp::CharToInt | UnaryOp::FloatToInt | UnaryOp::IntToChar
        )
    }
}
