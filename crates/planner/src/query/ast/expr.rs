//! Defines the AST for SQL expressions.

use crate::query::ast::select::Select;
use model::core::{data_type::DataType, value::Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column or table identifier, e.g., `users` or `users.id`.
    Identifier(Ident),

    /// A bound literal, rendered as a placeholder.
    Value(Value),

    /// A literal inlined into the SQL text, e.g. the `1` in `SELECT 1`.
    Constant(Value),

    /// A binary operation, e.g., `column = 'value'` or `a + b`.
    BinaryOp(Box<BinaryOp>),

    /// Logical negation, `NOT (expr)`.
    Not(Box<Expr>),

    IsNull(Box<Expr>),

    IsNotNull(Box<Expr>),

    /// `expr LIKE pattern [ESCAPE 'c']`
    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape: Option<char>,
    },

    /// A function call, e.g., `COUNT(*)` or `LOWER(name)`.
    FunctionCall(FunctionCall),

    /// `POSITION(needle IN haystack)`, 1-based.
    Position {
        needle: Box<Expr>,
        haystack: Box<Expr>,
    },

    /// `EXTRACT(field FROM expr)`
    Extract { field: DateField, expr: Box<Expr> },

    /// `CAST(expr AS type)`, the type name is chosen by the dialect.
    Cast { expr: Box<Expr>, data_type: DataType },

    CurrentTimestamp,

    /// `EXISTS (SELECT ...)`
    Exists(Box<Select>),

    /// A scalar subquery, `(SELECT ...)`.
    Subquery(Box<Select>),

    /// `*` or `alias.*`
    Wildcard { qualifier: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub qualifier: Option<String>, // e.g., the 'users' in 'users.id'
    pub name: String,              // e.g., the 'id' in 'users.id'
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub left: Expr,
    pub op: BinaryOperator,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub wildcard: bool, // represents the '*' in 'COUNT(*)'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Comparison
    Eq,    // =
    NotEq, // <>
    Lt,    // <
    LtEq,  // <=
    Gt,    // >
    GtEq,  // >=

    // Logical
    And,
    Or,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Expr {
    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
        Expr::BinaryOp(Box::new(BinaryOp { left, op, right }))
    }

    pub fn and(left: Expr, right: Expr) -> Expr {
        Expr::binary(left, BinaryOperator::And, right)
    }

    pub fn not(expr: Expr) -> Expr {
        Expr::Not(Box::new(expr))
    }

    pub fn function(name: &str, args: Vec<Expr>) -> Expr {
        Expr::FunctionCall(FunctionCall {
            name: name.to_string(),
            args,
            wildcard: false,
        })
    }

    pub fn count_all() -> Expr {
        Expr::FunctionCall(FunctionCall {
            name: "COUNT".to_string(),
            args: Vec::new(),
            wildcard: true,
        })
    }

    /// Folds a list of conditions with `AND`. `None` for an empty list.
    pub fn conjunction(conditions: impl IntoIterator<Item = Expr>) -> Option<Expr> {
        conditions.into_iter().reduce(Expr::and)
    }
}
