//! Correlated subqueries for member paths that cross relationships.

use crate::{
    context::{Binding, FilterContext},
    error::{FilterError, Result},
    path::{NavigationStep, StepKind},
};
use model::{core::value::Value, metadata::association::JoinColumn};
use planner::query::{
    ast::{
        common::{JoinKind, TableRef},
        expr::{BinaryOperator, Expr},
    },
    builder::select::{FromState, SelectBuilder},
    qualified,
};
use tracing::debug;

/// What the innermost subquery produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Innermost {
    /// `EXISTS (SELECT 1 ... WHERE <residual>)`
    Exists,
    /// `(SELECT COUNT(*) ...)`, the residual is ignored
    Count,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NavigationSubqueryBuilder;

impl NavigationSubqueryBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Builds one subquery per step, each correlated to the level above.
    /// The first step joins back to `anchor`, the context the member path
    /// started from, while new levels hang below `parent`.
    ///
    /// `residual` runs against the innermost level and returns its extra
    /// condition, if any.
    pub fn build<F>(
        &self,
        parent: &FilterContext<'_>,
        anchor: &FilterContext<'_>,
        steps: &[NavigationStep<'_>],
        innermost: Innermost,
        binding: Binding<'_>,
        residual: F,
    ) -> Result<Expr>
    where
        F: FnOnce(&FilterContext<'_>) -> Result<Option<Expr>>,
    {
        if steps.is_empty() {
            return Err(FilterError::StructuralError(
                "navigation without a relationship hop".to_string(),
            ));
        }
        debug!(
            hops = steps.len(),
            anchor = %anchor.alias,
            path = %steps.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join("/"),
            "Building navigation subquery"
        );
        self.level(parent, &anchor.alias, steps, innermost, binding, residual)
    }

    fn level<F>(
        &self,
        parent: &FilterContext<'_>,
        correlate_to: &str,
        steps: &[NavigationStep<'_>],
        innermost: Innermost,
        binding: Binding<'_>,
        residual: F,
    ) -> Result<Expr>
    where
        F: FnOnce(&FilterContext<'_>) -> Result<Option<Expr>>,
    {
        let Some((step, rest)) = steps.split_first() else {
            return Err(FilterError::StructuralError(
                "navigation chain ended early".to_string(),
            ));
        };
        let last = rest.is_empty();
        let ctx = parent.child(
            step.target,
            if last { binding } else { Binding::Navigation(None) },
        );
        let correlated = self.correlated_select(step, correlate_to, &ctx, innermost, last)?;

        if last && innermost == Innermost::Count {
            debug!(alias = %ctx.alias, step = %step.name, "Counting related rows");
            return Ok(Expr::Subquery(Box::new(correlated.build())));
        }

        let condition = if last {
            residual(&ctx)?
        } else {
            Some(self.level(&ctx, &ctx.alias, rest, innermost, binding, residual)?)
        };
        let select = match condition {
            Some(condition) => correlated.where_clause(condition),
            None => correlated,
        };
        Ok(Expr::Exists(Box::new(select.build())))
    }

    /// `SELECT 1 FROM target [JOIN link table] WHERE <correlation>`
    fn correlated_select(
        &self,
        step: &NavigationStep<'_>,
        parent_alias: &str,
        ctx: &FilterContext<'_>,
        innermost: Innermost,
        last: bool,
    ) -> Result<SelectBuilder<FromState>> {
        let alias = ctx.alias.as_str();
        let columns = if last && innermost == Innermost::Count {
            vec![Expr::count_all()]
        } else {
            vec![Expr::Constant(Value::Int(1))]
        };
        let builder = SelectBuilder::new()
            .select(columns)
            .from(TableRef::from(step.target.table()), Some(alias));

        let source = |column: &str| qualified(parent_alias, &format!("{}{column}", step.source_prefix));

        match step.kind {
            StepKind::Association(association) => match &association.join_table {
                None => {
                    let correlation = join_condition(&association.join_columns, |jc| {
                        Expr::binary(
                            qualified(alias, &jc.target),
                            BinaryOperator::Eq,
                            source(&jc.source),
                        )
                    })?;
                    Ok(builder.where_clause(correlation))
                }
                Some(join_table) => {
                    let link = ctx.session.next_alias();
                    let on = join_condition(&join_table.inverse_columns, |jc| {
                        Expr::binary(
                            qualified(&link, &jc.source),
                            BinaryOperator::Eq,
                            qualified(alias, &jc.target),
                        )
                    })?;
                    let correlation = join_condition(&association.join_columns, |jc| {
                        Expr::binary(
                            qualified(&link, &jc.target),
                            BinaryOperator::Eq,
                            source(&jc.source),
                        )
                    })?;
                    Ok(builder
                        .join(
                            JoinKind::Inner,
                            TableRef::from(&join_table.table),
                            Some(link.as_str()),
                            on,
                        )
                        .where_clause(correlation))
                }
            },
            StepKind::ElementCollection { join_columns } => {
                let correlation = join_condition(join_columns, |jc| {
                    Expr::binary(
                        qualified(alias, &jc.target),
                        BinaryOperator::Eq,
                        source(&jc.source),
                    )
                })?;
                Ok(builder.where_clause(correlation))
            }
        }
    }
}

fn join_condition(columns: &[JoinColumn], pair: impl Fn(&JoinColumn) -> Expr) -> Result<Expr> {
    Expr::conjunction(columns.iter().map(pair)).ok_or_else(|| {
        FilterError::StructuralError("relationship declares no join columns".to_string())
    })
}
