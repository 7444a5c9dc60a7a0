use crate::{
    compiled::{CompiledExpression, Operand, TypeHint},
    error::{FilterError, Result},
    literal::LiteralCoercer,
};
use filter_syntax::ast::{
    literal::{Literal, LiteralKind},
    operator::BinaryOperator,
};
use model::core::data_type::DataType;
use planner::query::ast::expr::{BinaryOperator as SqlOperator, Expr};
use tracing::trace;

/// Builds comparison, boolean and arithmetic nodes from compiled operands.
pub struct OperatorComposer<'a> {
    coercer: &'a LiteralCoercer<'a>,
}

impl<'a> OperatorComposer<'a> {
    pub fn new(coercer: &'a LiteralCoercer<'a>) -> Self {
        Self { coercer }
    }

    pub fn compose(
        &self,
        op: BinaryOperator,
        left: CompiledExpression,
        right: CompiledExpression,
    ) -> Result<CompiledExpression> {
        trace!(%op, left = %left.describe(), right = %right.describe(), "Composing operator");
        match op {
            BinaryOperator::Eq
            | BinaryOperator::Ne
            | BinaryOperator::Gt
            | BinaryOperator::Ge
            | BinaryOperator::Lt
            | BinaryOperator::Le => self.compare(op, left, right),
            BinaryOperator::And | BinaryOperator::Or => self.logical(op, left, right),
            BinaryOperator::Add
            | BinaryOperator::Sub
            | BinaryOperator::Mul
            | BinaryOperator::Div
            | BinaryOperator::Mod => self.arithmetic(op, left, right),
            BinaryOperator::Has => Err(FilterError::NotSupported("has".to_string())),
        }
    }

    pub fn compare(
        &self,
        op: BinaryOperator,
        left: CompiledExpression,
        right: CompiledExpression,
    ) -> Result<CompiledExpression> {
        // `contains(...) eq true` and friends
        if left.is_predicate_like() && boolean_literal(&right).is_some() {
            return predicate_equality(op, left, boolean_literal(&right));
        }
        if right.is_predicate_like() && boolean_literal(&left).is_some() {
            return predicate_equality(op, right, boolean_literal(&left));
        }

        let (left, right) = self.operands(left, right)?;

        if left.null || right.null {
            let other = if left.null { right } else { left };
            return match op {
                BinaryOperator::Eq => Ok(CompiledExpression::Predicate(Expr::IsNull(Box::new(
                    other.expr,
                )))),
                BinaryOperator::Ne => Ok(CompiledExpression::Predicate(Expr::IsNotNull(
                    Box::new(other.expr),
                ))),
                _ => Err(FilterError::NotSupported(format!("'{op}' with null"))),
            };
        }

        check_comparable(&left.hint, &right.hint)?;
        let sql_op = sql_operator(op)?;
        Ok(CompiledExpression::Predicate(Expr::binary(
            left.expr, sql_op, right.expr,
        )))
    }

    pub fn logical(
        &self,
        op: BinaryOperator,
        left: CompiledExpression,
        right: CompiledExpression,
    ) -> Result<CompiledExpression> {
        let left = left.into_predicate()?;
        let right = right.into_predicate()?;
        let sql_op = sql_operator(op)?;
        Ok(CompiledExpression::Predicate(Expr::binary(left, sql_op, right)))
    }

    pub fn arithmetic(
        &self,
        op: BinaryOperator,
        left: CompiledExpression,
        right: CompiledExpression,
    ) -> Result<CompiledExpression> {
        // Facets of the other side do not restrict an arithmetic operand
        let right_hint = arithmetic_hint(&left, right.hint().map(TypeHint::loose));
        let left = self.coercer.operand(left, right_hint.as_ref())?;
        let left_hint = arithmetic_hint(&right, (!left.null).then(|| left.hint.loose()));
        let right = self.coercer.operand(right, left_hint.as_ref())?;

        if left.null || right.null {
            return Err(FilterError::NotSupported(format!("'{op}' with null")));
        }
        let result_type = DataType::widen(left.data_type(), right.data_type()).ok_or_else(|| {
            FilterError::NotSupported(format!(
                "'{op}' on {} and {}",
                left.data_type(),
                right.data_type()
            ))
        })?;

        let sql_op = sql_operator(op)?;
        Ok(CompiledExpression::Value {
            expr: Expr::binary(left.expr, sql_op, right.expr),
            hint: TypeHint::of(result_type),
        })
    }

    pub fn not(&self, operand: CompiledExpression) -> Result<CompiledExpression> {
        if !operand.is_predicate() {
            return Err(FilterError::NotSupported(format!(
                "'not' on {}",
                operand.describe()
            )));
        }
        Ok(CompiledExpression::Predicate(Expr::not(operand.into_predicate()?)))
    }

    /// Unary minus, only on literals.
    pub fn negate(&self, operand: CompiledExpression) -> Result<CompiledExpression> {
        match operand {
            CompiledExpression::Literal(literal)
                if matches!(
                    literal.kind,
                    LiteralKind::Integer | LiteralKind::Decimal | LiteralKind::Double
                ) =>
            {
                let text = match literal.text.strip_prefix('-') {
                    Some(positive) => positive.to_string(),
                    None => format!("-{}", literal.text),
                };
                Ok(CompiledExpression::Literal(Literal::new(text, literal.kind)))
            }
            other => Err(FilterError::NotSupported(format!(
                "'-' on {}",
                other.describe()
            ))),
        }
    }

    /// Left operand first: a literal on the left takes the right side's type,
    /// a literal on the right takes whatever the left side ended up as.
    fn operands(
        &self,
        left: CompiledExpression,
        right: CompiledExpression,
    ) -> Result<(Operand, Operand)> {
        let right_hint = right.hint().cloned();
        let left = self.coercer.operand(left, right_hint.as_ref())?;
        let left_hint = (!left.null).then(|| left.hint.clone());
        let right = self.coercer.operand(right, left_hint.as_ref())?;
        Ok((left, right))
    }
}

impl CompiledExpression {
    /// Predicates and subqueries, but not boolean values.
    fn is_predicate_like(&self) -> bool {
        matches!(
            self,
            CompiledExpression::Predicate(_) | CompiledExpression::Subquery(_)
        )
    }
}

/// A literal wider than the other side keeps its own type (`Area mul 1.5`).
fn arithmetic_hint(operand: &CompiledExpression, hint: Option<TypeHint>) -> Option<TypeHint> {
    let hint = hint?;
    match operand {
        CompiledExpression::Literal(literal) => {
            let own = LiteralCoercer::intrinsic_type(literal.kind);
            (DataType::widen(hint.data_type, own) == Some(hint.data_type)).then_some(hint)
        }
        _ => Some(hint),
    }
}

fn boolean_literal(operand: &CompiledExpression) -> Option<bool> {
    match operand {
        CompiledExpression::Literal(literal) if literal.kind == LiteralKind::Boolean => {
            Some(literal.text == "true")
        }
        _ => None,
    }
}

fn predicate_equality(
    op: BinaryOperator,
    predicate: CompiledExpression,
    literal: Option<bool>,
) -> Result<CompiledExpression> {
    let expected = literal.ok_or_else(|| {
        FilterError::StructuralError("predicate compared with a non-boolean".to_string())
    })?;
    let keep = match op {
        BinaryOperator::Eq => expected,
        BinaryOperator::Ne => !expected,
        _ => {
            return Err(FilterError::NotSupported(format!(
                "'{op}' between a condition and a boolean"
            )));
        }
    };
    let expr = predicate.into_predicate()?;
    Ok(CompiledExpression::Predicate(if keep {
        expr
    } else {
        Expr::not(expr)
    }))
}

fn check_comparable(left: &TypeHint, right: &TypeHint) -> Result<()> {
    if !left.data_type.is_comparable_with(&right.data_type) {
        return Err(FilterError::NotSupported(format!(
            "comparison of {} with {}",
            left.data_type, right.data_type
        )));
    }
    if let (Some(l), Some(r)) = (&left.enum_type, &right.enum_type) {
        if l != r {
            return Err(FilterError::invalid_value(
                r.as_str(),
                l.as_str(),
                format!("expected a member of {l}"),
            ));
        }
    }
    Ok(())
}

fn sql_operator(op: BinaryOperator) -> Result<SqlOperator> {
    Ok(match op {
        BinaryOperator::Eq => SqlOperator::Eq,
        BinaryOperator::Ne => SqlOperator::NotEq,
        BinaryOperator::Gt => SqlOperator::Gt,
        BinaryOperator::Ge => SqlOperator::GtEq,
        BinaryOperator::Lt => SqlOperator::Lt,
        BinaryOperator::Le => SqlOperator::LtEq,
        BinaryOperator::And => SqlOperator::And,
        BinaryOperator::Or => SqlOperator::Or,
        BinaryOperator::Add => SqlOperator::Add,
        BinaryOperator::Sub => SqlOperator::Sub,
        BinaryOperator::Mul => SqlOperator::Mul,
        BinaryOperator::Div => SqlOperator::Div,
        BinaryOperator::Mod => SqlOperator::Mod,
        BinaryOperator::Has => return Err(FilterError::NotSupported("has".to_string())),
    })
}
