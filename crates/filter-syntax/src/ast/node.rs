use crate::ast::{
    function::FunctionKind,
    literal::Literal,
    member::Member,
    operator::{BinaryOperator, UnaryOperator},
};
use serde::{Deserialize, Serialize};

/// A node of a parsed `$filter` expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterNode {
    Binary {
        left: Box<FilterNode>,
        operator: BinaryOperator,
        right: Box<FilterNode>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<FilterNode>,
    },
    Member(Member),
    Literal(Literal),
    /// `Namespace.EnumType'Member'`
    TypedLiteral { enum_type: String, value: String },
    FunctionCall {
        kind: FunctionKind,
        args: Vec<FilterNode>,
    },
    /// A type name, used as a `cast`/`isof` argument
    TypeCheck { type_name: String },
    /// `@name` parameter alias
    Alias(String),
}

impl FilterNode {
    pub fn binary(left: FilterNode, operator: BinaryOperator, right: FilterNode) -> Self {
        FilterNode::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn unary(operator: UnaryOperator, operand: FilterNode) -> Self {
        FilterNode::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn not(operand: FilterNode) -> Self {
        Self::unary(UnaryOperator::Not, operand)
    }

    pub fn member(names: &[&str]) -> Self {
        FilterNode::Member(Member::path(names))
    }

    pub fn string(text: &str) -> Self {
        FilterNode::Literal(Literal::string(text))
    }

    pub fn integer(value: i64) -> Self {
        FilterNode::Literal(Literal::integer(value))
    }

    pub fn call(kind: FunctionKind, args: Vec<FilterNode>) -> Self {
        FilterNode::FunctionCall { kind, args }
    }

    pub fn is_null_literal(&self) -> bool {
        matches!(self, FilterNode::Literal(literal) if literal.is_null())
    }
}
