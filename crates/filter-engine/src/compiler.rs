use crate::{
    compiled::CompiledExpression,
    context::{FilterContext, Session},
    error::{FilterError, Result},
    visitor::ExpressionVisitor,
};
use filter_syntax::ast::node::FilterNode;
use model::metadata::{entity::EntityType, provider::MetadataProvider};
use planner::query::{
    ast::{common::TableRef, expr::Expr, select::Select},
    builder::select::SelectBuilder,
};
use tracing::debug;

/// Turns a parsed `$filter` into a backend predicate.
pub trait FilterCompiler {
    type Filter;

    fn compile(&self, filter: &FilterNode) -> std::result::Result<Self::Filter, FilterError>;
}

/// Compiles filters on one entity type into SQL predicates over the alias
/// `t0`.
pub struct SqlFilterCompiler<'a> {
    provider: &'a dyn MetadataProvider,
    entity: &'a EntityType,
    visitor: ExpressionVisitor,
}

impl<'a> SqlFilterCompiler<'a> {
    pub fn new(provider: &'a dyn MetadataProvider, entity_type: &str) -> Result<Self> {
        let entity = provider
            .entity_type(entity_type)
            .ok_or_else(|| FilterError::InvalidPath {
                path: entity_type.to_string(),
                owner: "schema".to_string(),
            })?;
        Ok(Self {
            provider,
            entity,
            visitor: ExpressionVisitor::new(),
        })
    }

    pub fn entity(&self) -> &'a EntityType {
        self.entity
    }

    /// `SELECT t0.* FROM <table> AS t0 WHERE <filter>`
    pub fn select(&self, filter: &FilterNode) -> Result<Select> {
        let predicate = self.compile(filter)?;
        Ok(SelectBuilder::new()
            .select(vec![Expr::Wildcard {
                qualifier: Some(ROOT_ALIAS.to_string()),
            }])
            .from(TableRef::from(&self.entity.table), Some(ROOT_ALIAS))
            .where_clause(predicate)
            .build())
    }
}

const ROOT_ALIAS: &str = "t0";

impl FilterCompiler for SqlFilterCompiler<'_> {
    type Filter = Expr;

    fn compile(&self, filter: &FilterNode) -> Result<Expr> {
        let session = Session::new(self.provider);
        let root = FilterContext::root(&session, self.entity);
        debug!(entity = %self.entity.name, "Compiling filter");

        let compiled = self.visitor.compile(filter, &root)?;
        if let CompiledExpression::Literal(literal) = &compiled {
            return Err(FilterError::NotSupported(format!(
                "literal {literal} used as a filter"
            )));
        }
        compiled.into_predicate()
    }
}
