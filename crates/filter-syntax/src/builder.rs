use crate::{
    ast::{
        function::FunctionKind,
        literal::{Literal, LiteralKind},
        member::{FunctionArg, Lambda, Member, MemberSegment},
        node::FilterNode,
        operator::{BinaryOperator, UnaryOperator},
    },
    errors::BuildError,
    parser::{FilterParser, Rule},
};
use pest::{Parser, iterators::Pair};
use tracing::debug;

pub type BuildResult<T> = Result<T, BuildError>;

/// Parse `$filter` text into a typed AST
pub fn parse(input: &str) -> BuildResult<FilterNode> {
    let mut pairs = FilterParser::parse(Rule::filter, input)?;
    let filter = pairs
        .next()
        .ok_or_else(|| BuildError::new("Empty input", 1, 1))?;

    let expression = filter
        .into_inner()
        .find(|pair| pair.as_rule() == Rule::expression)
        .ok_or_else(|| BuildError::new("Empty filter expression", 1, 1))?;

    let node = build_expression(expression)?;
    debug!(filter = input, "Parsed filter expression");
    Ok(node)
}

fn error_at(pair: &Pair<Rule>, message: impl Into<String>) -> BuildError {
    let (line, column) = pair.line_col();
    BuildError::new(message, line, column)
}

fn first_inner<'i>(pair: &Pair<'i, Rule>) -> BuildResult<Pair<'i, Rule>> {
    pair.clone()
        .into_inner()
        .next()
        .ok_or_else(|| error_at(pair, format!("Empty {:?}", pair.as_rule())))
}

fn build_expression(pair: Pair<Rule>) -> BuildResult<FilterNode> {
    match pair.as_rule() {
        Rule::expression => {
            let inner = first_inner(&pair)?;
            build_expression(inner)
        }
        Rule::logical_or
        | Rule::logical_and
        | Rule::comparison
        | Rule::additive
        | Rule::multiplicative => build_binary_chain(pair),
        Rule::unary => build_unary(pair),
        _ => build_primary(pair),
    }
}

/// Folds `a op b op c` into `((a op b) op c)`.
fn build_binary_chain(pair: Pair<Rule>) -> BuildResult<FilterNode> {
    let span_pair = pair.clone();
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| error_at(&span_pair, "Missing left operand"))?;
    let mut left = build_expression(first)?;

    while let Some(op_pair) = inner.next() {
        let operator = BinaryOperator::from_keyword(op_pair.as_str()).ok_or_else(|| {
            error_at(&op_pair, format!("Unknown operator: {}", op_pair.as_str()))
        })?;
        let right_pair = inner
            .next()
            .ok_or_else(|| error_at(&op_pair, "Missing right operand"))?;
        let right = build_expression(right_pair)?;
        left = FilterNode::binary(left, operator, right);
    }

    Ok(left)
}

fn build_unary(pair: Pair<Rule>) -> BuildResult<FilterNode> {
    let mut operators = Vec::new();
    let mut operand = None;

    for inner in pair.clone().into_inner() {
        match inner.as_rule() {
            Rule::op_not => operators.push(UnaryOperator::Not),
            Rule::op_neg => operators.push(UnaryOperator::Minus),
            _ => operand = Some(build_primary(inner)?),
        }
    }

    let mut node = operand.ok_or_else(|| error_at(&pair, "Missing operand"))?;
    // Innermost operator binds first
    for operator in operators.into_iter().rev() {
        node = FilterNode::unary(operator, node);
    }
    Ok(node)
}

fn build_primary(pair: Pair<Rule>) -> BuildResult<FilterNode> {
    match pair.as_rule() {
        Rule::expression => build_expression(pair),
        Rule::lit_null => Ok(FilterNode::Literal(Literal::null())),
        Rule::lit_boolean => Ok(literal(&pair, LiteralKind::Boolean)),
        Rule::lit_integer => Ok(literal(&pair, LiteralKind::Integer)),
        Rule::lit_decimal => Ok(literal(&pair, LiteralKind::Decimal)),
        Rule::lit_double => Ok(literal(&pair, LiteralKind::Double)),
        Rule::lit_date => Ok(literal(&pair, LiteralKind::Date)),
        Rule::lit_time => Ok(literal(&pair, LiteralKind::TimeOfDay)),
        Rule::lit_datetime => Ok(literal(&pair, LiteralKind::DateTimeOffset)),
        Rule::lit_guid => Ok(literal(&pair, LiteralKind::Guid)),
        Rule::lit_string => Ok(FilterNode::Literal(Literal::string(string_value(pair)?))),
        Rule::lit_enum => build_enum_literal(pair),
        Rule::call => build_call(pair),
        Rule::type_ref => Ok(FilterNode::TypeCheck {
            type_name: pair.as_str().to_string(),
        }),
        Rule::alias => Ok(FilterNode::Alias(
            pair.as_str().trim_start_matches('@').to_string(),
        )),
        Rule::member => build_member(pair),
        rule => Err(error_at(
            &pair,
            format!("Unexpected rule in expression: {rule:?}"),
        )),
    }
}

fn literal(pair: &Pair<Rule>, kind: LiteralKind) -> FilterNode {
    FilterNode::Literal(Literal::new(pair.as_str(), kind))
}

/// Strips the quotes and collapses `''` escapes.
fn string_value(pair: Pair<Rule>) -> BuildResult<String> {
    let inner = first_inner(&pair)?;
    Ok(inner.as_str().replace("''", "'"))
}

fn build_enum_literal(pair: Pair<Rule>) -> BuildResult<FilterNode> {
    let span_pair = pair.clone();
    let mut enum_type = None;
    let mut value = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::qualified_name => enum_type = Some(inner.as_str().to_string()),
            Rule::lit_string => value = Some(string_value(inner)?),
            _ => {}
        }
    }

    match (enum_type, value) {
        (Some(enum_type), Some(value)) => Ok(FilterNode::TypedLiteral { enum_type, value }),
        _ => Err(error_at(&span_pair, "Malformed enum literal")),
    }
}

fn build_call(pair: Pair<Rule>) -> BuildResult<FilterNode> {
    let mut name = String::new();
    let mut args = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::qualified_name => name = inner.as_str().to_string(),
            Rule::call_arg => args.push(build_call_arg(inner)?),
            _ => {}
        }
    }

    // Built-in names only match with positional arguments; anything else is
    // left to the function catalog.
    let positional = args.iter().all(|arg| arg.name.is_none());
    match FunctionKind::from_name(&name) {
        Some(kind) if positional => Ok(FilterNode::FunctionCall {
            kind,
            args: args.into_iter().map(|arg| arg.value).collect(),
        }),
        _ => Ok(FilterNode::Member(Member::new(vec![
            MemberSegment::Function { name, args },
        ]))),
    }
}

fn build_call_arg(pair: Pair<Rule>) -> BuildResult<FunctionArg> {
    let span_pair = pair.clone();
    let mut name = None;
    let mut value = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::param_name => name = Some(inner.as_str().to_string()),
            Rule::expression => value = Some(build_expression(inner)?),
            _ => {}
        }
    }

    let value = value.ok_or_else(|| error_at(&span_pair, "Missing argument value"))?;
    Ok(FunctionArg { name, value })
}

fn build_member(pair: Pair<Rule>) -> BuildResult<FilterNode> {
    let mut segments = Vec::new();

    for inner in pair.into_inner() {
        let segment = match inner.as_rule() {
            Rule::property => MemberSegment::Property(inner.as_str().to_string()),
            Rule::count_segment => MemberSegment::Count,
            Rule::any_segment => MemberSegment::Any(build_lambda(inner)?),
            Rule::all_segment => {
                let span_pair = inner.clone();
                let lambda = build_lambda(inner)?
                    .ok_or_else(|| error_at(&span_pair, "all() requires a lambda"))?;
                MemberSegment::All(lambda)
            }
            rule => {
                return Err(error_at(
                    &inner,
                    format!("Unexpected rule in member path: {rule:?}"),
                ));
            }
        };
        segments.push(segment);
    }

    Ok(FilterNode::Member(Member::new(segments)))
}

fn build_lambda(pair: Pair<Rule>) -> BuildResult<Option<Lambda>> {
    let mut variable = None;
    let mut body = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::lambda_variable => variable = Some(inner.as_str().to_string()),
            Rule::expression => body = Some(build_expression(inner)?),
            _ => {}
        }
    }

    Ok(match (variable, body) {
        (Some(variable), Some(body)) => Some(Lambda {
            variable,
            body: Box::new(body),
        }),
        _ => None,
    })
}
