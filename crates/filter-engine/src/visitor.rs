use crate::{
    compiled::{CompiledExpression, TypeHint},
    context::{Binding, FilterContext, Pinned},
    error::{FilterError, Result},
    function::{FunctionResolver, NamedArgument},
    lambda::LambdaQuantifierBuilder,
    literal::LiteralCoercer,
    navigation::{Innermost, NavigationSubqueryBuilder},
    operator::OperatorComposer,
    path::{AttributePath, AttributePathResolver, NavigationStep},
};
use filter_syntax::ast::{
    member::{FunctionArg, Lambda, Member, MemberSegment},
    node::FilterNode,
    operator::{BinaryOperator, UnaryOperator},
};
use model::core::data_type::DataType;
use planner::query::{ast::expr::Expr, qualified};
use tracing::{debug, trace};

const IT: &str = "$it";

/// Compiles filter nodes against a chain of query contexts.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpressionVisitor {
    navigation: NavigationSubqueryBuilder,
    lambdas: LambdaQuantifierBuilder,
}

/// What a member path denotes once the context it starts from is known.
enum Target<'n, 'c> {
    /// `$it` or a lambda variable on its own
    Element,
    Attribute(AttributePath),
    /// Relationship hops followed by a remainder that has to be compiled
    /// inside the innermost subquery. `offset` is where the remainder starts.
    Navigation {
        steps: Vec<NavigationStep<'c>>,
        offset: usize,
    },
    /// `$count` over a single hop
    Count(Vec<NavigationStep<'c>>),
    Any {
        steps: Vec<NavigationStep<'c>>,
        lambda: Option<&'n Lambda>,
    },
    All {
        steps: Vec<NavigationStep<'c>>,
        lambda: &'n Lambda,
    },
    Function {
        name: &'n str,
        args: &'n [FunctionArg],
    },
}

struct MemberTarget<'n, 'c> {
    anchor: &'c FilterContext<'c>,
    target: Target<'n, 'c>,
}

/// A member whose navigation re-scopes the expression around it.
struct Navigating<'n, 'c> {
    member: &'n Member,
    anchor: &'c FilterContext<'c>,
    steps: Vec<NavigationStep<'c>>,
    offset: usize,
}

impl ExpressionVisitor {
    pub fn new() -> Self {
        let navigation = NavigationSubqueryBuilder::new();
        Self {
            navigation,
            lambdas: LambdaQuantifierBuilder::new(navigation),
        }
    }

    pub fn compile(&self, node: &FilterNode, ctx: &FilterContext<'_>) -> Result<CompiledExpression> {
        match node {
            FilterNode::Binary {
                left,
                operator,
                right,
            } => self.compile_binary(node, left, *operator, right, ctx),
            FilterNode::Unary { operator, operand } => {
                let operand = self.compile(operand, ctx)?;
                let coercer = LiteralCoercer::new(ctx.provider());
                let composer = OperatorComposer::new(&coercer);
                match operator {
                    UnaryOperator::Not => composer.not(operand),
                    UnaryOperator::Minus => composer.negate(operand),
                }
            }
            FilterNode::Member(member) => self.compile_member(node, member, ctx),
            FilterNode::Literal(literal) => Ok(CompiledExpression::Literal(literal.clone())),
            FilterNode::TypedLiteral { enum_type, value } => {
                let (value, hint) =
                    LiteralCoercer::new(ctx.provider()).coerce_enum(enum_type, value, None)?;
                Ok(CompiledExpression::Value {
                    expr: Expr::Value(value),
                    hint,
                })
            }
            FilterNode::FunctionCall { kind, args } => {
                let nodes: Vec<&FilterNode> = args.iter().collect();
                if let Some(navigating) = self.single_navigation(&nodes, ctx)? {
                    return self.rescope(node, ctx, &navigating);
                }
                let compiled = args
                    .iter()
                    .map(|arg| self.compile(arg, ctx))
                    .collect::<Result<Vec<_>>>()?;
                let coercer = LiteralCoercer::new(ctx.provider());
                FunctionResolver::new(ctx.provider(), &coercer).resolve(*kind, compiled)
            }
            FilterNode::TypeCheck { type_name } => DataType::from_type_name(type_name)
                .map(CompiledExpression::Type)
                .map_err(|_| FilterError::NotSupported(format!("type {type_name}"))),
            FilterNode::Alias(name) => Err(FilterError::NotSupported(format!("alias @{name}"))),
        }
    }

    fn compile_binary(
        &self,
        node: &FilterNode,
        left: &FilterNode,
        operator: BinaryOperator,
        right: &FilterNode,
        ctx: &FilterContext<'_>,
    ) -> Result<CompiledExpression> {
        if operator == BinaryOperator::Has {
            return Err(FilterError::NotSupported("has".to_string()));
        }
        if operator.is_comparison() {
            if let Some(navigating) = self.single_navigation(&[left, right], ctx)? {
                return self.rescope(node, ctx, &navigating);
            }
        }

        let left = self.compile(left, ctx)?;
        let right = self.compile(right, ctx)?;
        let coercer = LiteralCoercer::new(ctx.provider());
        OperatorComposer::new(&coercer).compose(operator, left, right)
    }

    fn compile_member(
        &self,
        node: &FilterNode,
        member: &Member,
        ctx: &FilterContext<'_>,
    ) -> Result<CompiledExpression> {
        let MemberTarget { anchor, target } = self.analyze(member, ctx)?;
        trace!(%member, alias = %anchor.alias, "Compiling member");

        match target {
            Target::Element => {
                // Only primitive collection elements are values
                let path = AttributePathResolver::new(anchor.provider())
                    .element_path(&anchor.scope)
                    .ok_or_else(|| {
                        FilterError::NotSupported(format!("'{member}' used as a value"))
                    })?;
                Ok(path_expression(&anchor.alias, path))
            }
            Target::Attribute(path) => Ok(path_expression(&anchor.alias, path)),
            Target::Navigation { steps, offset } => {
                let navigating = Navigating {
                    member,
                    anchor,
                    steps,
                    offset,
                };
                self.rescope(node, ctx, &navigating)
            }
            Target::Count(steps) => {
                let expr = self.navigation.build(
                    ctx,
                    anchor,
                    &steps,
                    Innermost::Count,
                    Binding::Navigation(None),
                    |_| Ok(None),
                )?;
                Ok(CompiledExpression::Value {
                    expr,
                    hint: TypeHint {
                        nullable: false,
                        ..TypeHint::of(DataType::Long)
                    },
                })
            }
            Target::Any { steps, lambda } => {
                let expr = self.lambdas.build_any(
                    ctx,
                    anchor,
                    &steps,
                    lambda.map(|l| l.variable.as_str()),
                    |inner| match lambda {
                        Some(lambda) => self.compile(&lambda.body, inner)?.into_predicate(),
                        None => Err(FilterError::StructuralError(
                            "any() without a variable has no body".to_string(),
                        )),
                    },
                )?;
                Ok(CompiledExpression::Subquery(expr))
            }
            Target::All { steps, lambda } => {
                let expr = self.lambdas.build_all(
                    ctx,
                    anchor,
                    &steps,
                    &lambda.variable,
                    |inner| self.compile(&lambda.body, inner)?.into_predicate(),
                )?;
                Ok(CompiledExpression::Subquery(expr))
            }
            Target::Function { name, args } => {
                let nodes: Vec<&FilterNode> = args.iter().map(|arg| &arg.value).collect();
                if let Some(navigating) = self.single_navigation(&nodes, ctx)? {
                    return self.rescope(node, ctx, &navigating);
                }
                let args = args
                    .iter()
                    .map(|arg| {
                        Ok(NamedArgument {
                            name: arg.name.clone(),
                            value: self.compile(&arg.value, ctx)?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                let coercer = LiteralCoercer::new(ctx.provider());
                FunctionResolver::new(ctx.provider(), &coercer).resolve_custom(name, args)
            }
        }
    }

    /// Compiles `node` again inside the subqueries opened by the navigating
    /// member, which then resolves from where its hops end.
    fn rescope(
        &self,
        node: &FilterNode,
        ctx: &FilterContext<'_>,
        navigating: &Navigating<'_, '_>,
    ) -> Result<CompiledExpression> {
        debug!(
            member = %navigating.member,
            hops = navigating.steps.len(),
            depth = ctx.depth(),
            "Re-scoping expression through navigation"
        );
        let pinned = Binding::Navigation(Some(Pinned {
            member: navigating.member,
            offset: navigating.offset,
        }));
        let expr = self.navigation.build(
            ctx,
            navigating.anchor,
            &navigating.steps,
            Innermost::Exists,
            pinned,
            |inner| self.compile(node, inner)?.into_predicate().map(Some),
        )?;
        Ok(CompiledExpression::Subquery(expr))
    }

    /// The navigating member among `nodes`, looking through arithmetic,
    /// unary minus and function arguments. Two of them are not supported.
    fn single_navigation<'n, 'c>(
        &self,
        nodes: &[&'n FilterNode],
        ctx: &'c FilterContext<'c>,
    ) -> Result<Option<Navigating<'n, 'c>>> {
        let mut found = Vec::new();
        for node in nodes {
            self.collect_navigation(node, ctx, &mut found)?;
        }
        if found.len() > 1 {
            let members: Vec<String> = found.iter().map(|n| n.member.to_string()).collect();
            return Err(FilterError::NotSupported(format!(
                "navigation on both sides: {}",
                members.join(", ")
            )));
        }
        Ok(found.pop())
    }

    fn collect_navigation<'n, 'c>(
        &self,
        node: &'n FilterNode,
        ctx: &'c FilterContext<'c>,
        found: &mut Vec<Navigating<'n, 'c>>,
    ) -> Result<()> {
        match node {
            FilterNode::Member(member) => {
                let MemberTarget { anchor, target } = self.analyze(member, ctx)?;
                match target {
                    Target::Navigation { steps, offset } => found.push(Navigating {
                        member,
                        anchor,
                        steps,
                        offset,
                    }),
                    Target::Function { args, .. } => {
                        for arg in args {
                            self.collect_navigation(&arg.value, ctx, found)?;
                        }
                    }
                    _ => {}
                }
            }
            FilterNode::Binary {
                left,
                operator,
                right,
            } if operator.is_arithmetic() => {
                self.collect_navigation(left, ctx, found)?;
                self.collect_navigation(right, ctx, found)?;
            }
            FilterNode::Unary {
                operator: UnaryOperator::Minus,
                operand,
            } => self.collect_navigation(operand, ctx, found)?,
            FilterNode::FunctionCall { args, .. } => {
                for arg in args {
                    self.collect_navigation(arg, ctx, found)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn analyze<'n, 'c>(
        &self,
        member: &'n Member,
        ctx: &'c FilterContext<'c>,
    ) -> Result<MemberTarget<'n, 'c>> {
        let (anchor, start) = anchor(member, ctx);
        let segments = member.segments.get(start..).unwrap_or_default();
        let split = segments
            .iter()
            .position(|s| !matches!(s, MemberSegment::Property(_)))
            .unwrap_or(segments.len());
        let (properties, tail) = segments.split_at(split);
        let names: Vec<String> = properties
            .iter()
            .filter_map(|s| match s {
                MemberSegment::Property(name) => Some(name.clone()),
                _ => None,
            })
            .collect();

        if let [first, second, ..] = tail {
            return Err(FilterError::NotSupported(format!(
                "'{second}' after '{first}'"
            )));
        }

        let target = match tail.first() {
            None if names.is_empty() => Target::Element,
            None => {
                let resolution =
                    AttributePathResolver::new(anchor.provider()).resolve(&anchor.scope, &names)?;
                let offset = resolution.steps.last().map(|step| start + step.end);
                match (resolution.leaf, offset) {
                    (Some(leaf), None) => Target::Attribute(leaf),
                    (Some(_), Some(offset)) => Target::Navigation {
                        steps: resolution.steps,
                        offset,
                    },
                    (None, _) => {
                        return Err(FilterError::NotSupported(format!(
                            "navigation property '{member}' used as a value"
                        )));
                    }
                }
            }
            Some(MemberSegment::Count) => {
                let mut steps = collection(anchor, &names, member)?;
                if steps.len() == 1 {
                    Target::Count(steps)
                } else {
                    // Everything up to the counted hop becomes EXISTS
                    let offset = start + steps[steps.len() - 2].end;
                    steps.pop();
                    Target::Navigation { steps, offset }
                }
            }
            Some(MemberSegment::Any(lambda)) => Target::Any {
                steps: collection(anchor, &names, member)?,
                lambda: lambda.as_ref(),
            },
            Some(MemberSegment::All(lambda)) => Target::All {
                steps: collection(anchor, &names, member)?,
                lambda,
            },
            Some(MemberSegment::Function { name, args }) => {
                if start > 0 || !names.is_empty() {
                    return Err(FilterError::NotSupported(format!("bound function '{name}'")));
                }
                Target::Function { name, args }
            }
            Some(MemberSegment::Property(name)) => {
                return Err(FilterError::StructuralError(format!(
                    "property '{name}' left in the tail of '{member}'"
                )));
            }
        };
        Ok(MemberTarget { anchor, target })
    }
}

/// Context a member path starts from and the index of its first segment
/// to resolve there.
fn anchor<'c>(member: &Member, ctx: &'c FilterContext<'c>) -> (&'c FilterContext<'c>, usize) {
    if let Some(pinned) = ctx.pinned(member) {
        return pinned;
    }
    if let Some(MemberSegment::Property(first)) = member.segments.first() {
        if first == IT {
            return (ctx.outermost(), 1);
        }
        if let Some(scope) = ctx.lambda_scope(first) {
            return (scope, 1);
        }
    }
    (ctx.member_scope(), 0)
}

/// Hops of a path that has to end on a collection.
fn collection<'c>(
    anchor: &'c FilterContext<'c>,
    names: &[String],
    member: &Member,
) -> Result<Vec<NavigationStep<'c>>> {
    let not_a_collection =
        || FilterError::NotSupported(format!("'{member}' does not address a collection"));
    if names.is_empty() {
        return Err(not_a_collection());
    }
    let resolution = AttributePathResolver::new(anchor.provider()).resolve(&anchor.scope, names)?;
    let ends_on_collection = resolution.leaf.is_none()
        && resolution
            .steps
            .last()
            .is_some_and(|step| step.is_collection());
    if !ends_on_collection {
        return Err(not_a_collection());
    }
    Ok(resolution.steps)
}

fn path_expression(alias: &str, path: AttributePath) -> CompiledExpression {
    CompiledExpression::Path {
        expr: qualified(alias, &path.column),
        hint: path.hint.clone(),
        path,
    }
}
