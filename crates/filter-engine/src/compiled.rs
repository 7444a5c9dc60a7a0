use crate::{
    error::{FilterError, Result},
    path::AttributePath,
};
use filter_syntax::ast::literal::Literal;
use model::{
    core::data_type::DataType,
    metadata::{entity::Attribute, function::FunctionParameter},
};
use planner::query::ast::expr::Expr;

/// Declared type and facets used to coerce literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHint {
    pub data_type: DataType,
    pub max_length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub nullable: bool,
    pub enum_type: Option<String>,
}

impl TypeHint {
    pub fn of(data_type: DataType) -> Self {
        Self {
            data_type,
            max_length: None,
            precision: None,
            scale: None,
            nullable: true,
            enum_type: None,
        }
    }

    pub fn enumeration(enum_type: &str) -> Self {
        Self {
            enum_type: Some(enum_type.to_string()),
            ..Self::of(DataType::Enum)
        }
    }

    /// Returns `None` for complex and collection attributes.
    pub fn from_attribute(attribute: &Attribute) -> Option<Self> {
        Some(Self {
            data_type: attribute.data_type()?,
            max_length: attribute.max_length,
            precision: attribute.precision,
            scale: attribute.scale,
            nullable: attribute.nullable,
            enum_type: attribute.enum_type().map(String::from),
        })
    }

    pub fn from_parameter(parameter: &FunctionParameter) -> Self {
        Self {
            data_type: parameter.data_type,
            max_length: parameter.max_length,
            precision: parameter.precision,
            scale: parameter.scale,
            nullable: true,
            enum_type: parameter.enum_type.clone(),
        }
    }

    /// Same type without length, precision and scale restrictions.
    pub fn loose(&self) -> Self {
        Self {
            enum_type: self.enum_type.clone(),
            ..Self::of(self.data_type)
        }
    }
}

/// Result of compiling one filter node.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledExpression {
    Predicate(Expr),
    Value { expr: Expr, hint: TypeHint },
    Path {
        expr: Expr,
        hint: TypeHint,
        path: AttributePath,
    },
    /// `EXISTS (...)` or a combination of them
    Subquery(Expr),
    /// Not yet coerced; the type comes from whatever it is combined with.
    Literal(Literal),
    /// Target type of a `cast`
    Type(DataType),
}

impl CompiledExpression {
    pub fn hint(&self) -> Option<&TypeHint> {
        match self {
            CompiledExpression::Value { hint, .. } | CompiledExpression::Path { hint, .. } => {
                Some(hint)
            }
            _ => None,
        }
    }

    pub fn is_predicate(&self) -> bool {
        match self {
            CompiledExpression::Predicate(_) | CompiledExpression::Subquery(_) => true,
            other => other.hint().is_some_and(|h| h.data_type == DataType::Boolean),
        }
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            CompiledExpression::Predicate(_) => "predicate".to_string(),
            CompiledExpression::Value { hint, .. } => format!("{} value", hint.data_type),
            CompiledExpression::Path { path, .. } => format!("member '{path}'"),
            CompiledExpression::Subquery(_) => "subquery".to_string(),
            CompiledExpression::Literal(literal) => format!("literal {literal}"),
            CompiledExpression::Type(data_type) => format!("type {data_type}"),
        }
    }

    /// Unwraps a boolean expression. Boolean values and paths are accepted as
    /// they are, anything else is rejected.
    pub fn into_predicate(self) -> Result<Expr> {
        if !self.is_predicate() {
            return Err(FilterError::NotSupported(format!(
                "{} used as a condition",
                self.describe()
            )));
        }
        match self {
            CompiledExpression::Predicate(expr)
            | CompiledExpression::Subquery(expr)
            | CompiledExpression::Value { expr, .. }
            | CompiledExpression::Path { expr, .. } => Ok(expr),
            other => Err(FilterError::StructuralError(format!(
                "{} passed the predicate check",
                other.describe()
            ))),
        }
    }
}

/// A compiled operand in value position.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    pub expr: Expr,
    pub hint: TypeHint,
    /// Set for the `null` literal
    pub null: bool,
}

impl Operand {
    pub fn data_type(&self) -> DataType {
        self.hint.data_type
    }
}
