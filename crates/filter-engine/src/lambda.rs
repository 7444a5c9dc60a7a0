use crate::{
    context::{Binding, FilterContext},
    error::Result,
    navigation::{Innermost, NavigationSubqueryBuilder},
    path::NavigationStep,
};
use planner::query::ast::expr::Expr;
use tracing::debug;

/// `any` and `all` over a collection reached by `steps`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LambdaQuantifierBuilder {
    navigation: NavigationSubqueryBuilder,
}

impl LambdaQuantifierBuilder {
    pub fn new(navigation: NavigationSubqueryBuilder) -> Self {
        Self { navigation }
    }

    /// `EXISTS (... WHERE <body>)`. Without a variable there is no body and
    /// any element satisfies it.
    pub fn build_any<F>(
        &self,
        parent: &FilterContext<'_>,
        anchor: &FilterContext<'_>,
        steps: &[NavigationStep<'_>],
        variable: Option<&str>,
        body: F,
    ) -> Result<Expr>
    where
        F: Fn(&FilterContext<'_>) -> Result<Expr>,
    {
        debug!(quantifier = "any", variable, hops = steps.len(), "Building lambda");
        match variable {
            Some(variable) => self.navigation.build(
                parent,
                anchor,
                steps,
                Innermost::Exists,
                Binding::Lambda(variable),
                |ctx| body(ctx).map(Some),
            ),
            None => self.navigation.build(
                parent,
                anchor,
                steps,
                Innermost::Exists,
                Binding::Navigation(None),
                |_| Ok(None),
            ),
        }
    }

    /// `EXISTS (... WHERE <body>) AND NOT EXISTS (... WHERE NOT <body>)`.
    ///
    /// An empty collection has no matching element, so `all` is false for it.
    pub fn build_all<F>(
        &self,
        parent: &FilterContext<'_>,
        anchor: &FilterContext<'_>,
        steps: &[NavigationStep<'_>],
        variable: &str,
        body: F,
    ) -> Result<Expr>
    where
        F: Fn(&FilterContext<'_>) -> Result<Expr>,
    {
        debug!(quantifier = "all", variable, hops = steps.len(), "Building lambda");
        let matching = self.navigation.build(
            parent,
            anchor,
            steps,
            Innermost::Exists,
            Binding::Lambda(variable),
            |ctx| body(ctx).map(Some),
        )?;
        let violating = self.navigation.build(
            parent,
            anchor,
            steps,
            Innermost::Exists,
            Binding::Lambda(variable),
            |ctx| body(ctx).map(|condition| Some(Expr::not(condition))),
        )?;
        Ok(Expr::and(matching, Expr::not(violating)))
    }
}
