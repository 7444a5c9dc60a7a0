use super::{FunctionResolver, check_arity};
use crate::{
    compiled::{CompiledExpression, Operand, TypeHint},
    error::{FilterError, Result},
};
use filter_syntax::ast::{function::FunctionKind, literal::LiteralKind};
use model::core::{data_type::DataType, value::Value};
use planner::query::ast::expr::{BinaryOperator, DateField, Expr};

const LIKE_ESCAPE: char = '\\';

fn arity(kind: FunctionKind) -> (usize, usize) {
    match kind {
        FunctionKind::Now => (0, 0),
        FunctionKind::Length
        | FunctionKind::ToLower
        | FunctionKind::ToUpper
        | FunctionKind::Trim
        | FunctionKind::Year
        | FunctionKind::Month
        | FunctionKind::Day
        | FunctionKind::Hour
        | FunctionKind::Minute
        | FunctionKind::Second
        | FunctionKind::Date
        | FunctionKind::Time
        | FunctionKind::Round
        | FunctionKind::Floor
        | FunctionKind::Ceiling => (1, 1),
        FunctionKind::Contains
        | FunctionKind::StartsWith
        | FunctionKind::EndsWith
        | FunctionKind::IndexOf
        | FunctionKind::Concat
        | FunctionKind::Cast => (2, 2),
        FunctionKind::Substring => (2, 3),
        FunctionKind::IsOf => (1, 2),
    }
}

impl FunctionResolver<'_> {
    /// Maps a built-in call onto its SQL counterpart.
    pub fn resolve(
        &self,
        kind: FunctionKind,
        args: Vec<CompiledExpression>,
    ) -> Result<CompiledExpression> {
        let (min, max) = arity(kind);
        check_arity(kind.name(), min, max, args.len())?;

        let name = kind.name();
        let mut args = args.into_iter();
        let mut next = || {
            args.next().ok_or_else(|| {
                FilterError::StructuralError(format!("{name}: argument missing after arity check"))
            })
        };

        match kind {
            FunctionKind::Contains | FunctionKind::StartsWith | FunctionKind::EndsWith => {
                let subject = self.string_operand(name, next()?)?;
                let (pattern, escape) = self.like_pattern(kind, next()?)?;
                Ok(CompiledExpression::Predicate(Expr::Like {
                    expr: Box::new(subject.expr),
                    pattern: Box::new(pattern),
                    escape,
                }))
            }
            FunctionKind::Length => {
                let subject = self.string_operand(name, next()?)?;
                Ok(value(
                    Expr::function("CHAR_LENGTH", vec![subject.expr]),
                    DataType::Long,
                ))
            }
            FunctionKind::IndexOf => {
                let haystack = self.string_operand(name, next()?)?;
                let needle = self.string_operand(name, next()?)?;
                let position = Expr::Position {
                    needle: Box::new(needle.expr),
                    haystack: Box::new(haystack.expr),
                };
                // POSITION is 1-based and answers 0 when absent
                Ok(value(
                    Expr::binary(position, BinaryOperator::Sub, Expr::Constant(Value::Int(1))),
                    DataType::Long,
                ))
            }
            FunctionKind::Substring => {
                let subject = self.string_operand(name, next()?)?;
                let mut call_args = vec![subject.expr, self.substring_start(next()?)?];
                if let Some(length) = args.next() {
                    let length = self.typed_operand(
                        name,
                        length,
                        Some(&TypeHint::of(DataType::Int)),
                        DataType::is_integral,
                    )?;
                    call_args.push(length.expr);
                }
                Ok(value(Expr::function("SUBSTRING", call_args), DataType::String))
            }
            FunctionKind::ToLower | FunctionKind::ToUpper | FunctionKind::Trim => {
                let subject = self.string_operand(name, next()?)?;
                let sql_name = match kind {
                    FunctionKind::ToLower => "LOWER",
                    FunctionKind::ToUpper => "UPPER",
                    _ => "TRIM",
                };
                Ok(value(Expr::function(sql_name, vec![subject.expr]), DataType::String))
            }
            FunctionKind::Concat => {
                let left = self.string_operand(name, next()?)?;
                let right = self.string_operand(name, next()?)?;
                Ok(value(
                    Expr::function("CONCAT", vec![left.expr, right.expr]),
                    DataType::String,
                ))
            }
            FunctionKind::Year
            | FunctionKind::Month
            | FunctionKind::Day
            | FunctionKind::Hour
            | FunctionKind::Minute
            | FunctionKind::Second => {
                let (field, accepts): (DateField, fn(&DataType) -> bool) = match kind {
                    FunctionKind::Year => (DateField::Year, has_date_part),
                    FunctionKind::Month => (DateField::Month, has_date_part),
                    FunctionKind::Day => (DateField::Day, has_date_part),
                    FunctionKind::Hour => (DateField::Hour, has_time_part),
                    FunctionKind::Minute => (DateField::Minute, has_time_part),
                    _ => (DateField::Second, has_time_part),
                };
                let subject = self.typed_operand(name, next()?, None, accepts)?;
                Ok(value(
                    Expr::Extract {
                        field,
                        expr: Box::new(subject.expr),
                    },
                    DataType::Int,
                ))
            }
            FunctionKind::Date | FunctionKind::Time => {
                let (target, accepts): (DataType, fn(&DataType) -> bool) =
                    if kind == FunctionKind::Date {
                        (DataType::Date, has_date_part)
                    } else {
                        (DataType::Time, has_time_part)
                    };
                let subject = self.typed_operand(name, next()?, None, accepts)?;
                Ok(value(
                    Expr::Cast {
                        expr: Box::new(subject.expr),
                        data_type: target,
                    },
                    target,
                ))
            }
            FunctionKind::Now => Ok(value(Expr::CurrentTimestamp, DataType::Timestamp)),
            FunctionKind::Round | FunctionKind::Floor | FunctionKind::Ceiling => {
                let subject = self.typed_operand(name, next()?, None, DataType::is_numeric)?;
                let sql_name = match kind {
                    FunctionKind::Round => "ROUND",
                    FunctionKind::Floor => "FLOOR",
                    _ => "CEILING",
                };
                Ok(CompiledExpression::Value {
                    expr: Expr::function(sql_name, vec![subject.expr]),
                    hint: subject.hint.loose(),
                })
            }
            FunctionKind::Cast => {
                let subject = next()?;
                let target = match next()? {
                    CompiledExpression::Type(data_type) => data_type,
                    other => {
                        return Err(FilterError::NotSupported(format!(
                            "cast to {}",
                            other.describe()
                        )));
                    }
                };
                if !matches!(target, DataType::String | DataType::Date) {
                    return Err(FilterError::NotSupported(format!("cast to {target}")));
                }
                let subject = self.coercer.operand(subject, None)?;
                Ok(value(
                    Expr::Cast {
                        expr: Box::new(subject.expr),
                        data_type: target,
                    },
                    target,
                ))
            }
            FunctionKind::IsOf => Err(FilterError::NotSupported("isof".to_string())),
        }
    }

    fn string_operand(&self, function: &str, arg: CompiledExpression) -> Result<Operand> {
        self.typed_operand(
            function,
            arg,
            Some(&TypeHint::of(DataType::String)),
            DataType::is_textual,
        )
    }

    /// A literal pattern is escaped and wrapped in `%`, anything else is
    /// wrapped with `CONCAT` as it is.
    fn like_pattern(
        &self,
        kind: FunctionKind,
        arg: CompiledExpression,
    ) -> Result<(Expr, Option<char>)> {
        let (leading, trailing) = match kind {
            FunctionKind::StartsWith => (false, true),
            FunctionKind::EndsWith => (true, false),
            _ => (true, true),
        };

        if let CompiledExpression::Literal(literal) = &arg {
            if literal.kind == LiteralKind::String {
                let (escaped, changed) = escape_like(&literal.text);
                let mut pattern = String::with_capacity(escaped.len() + 2);
                if leading {
                    pattern.push('%');
                }
                pattern.push_str(&escaped);
                if trailing {
                    pattern.push('%');
                }
                let escape = changed.then_some(LIKE_ESCAPE);
                return Ok((Expr::Value(Value::String(pattern)), escape));
            }
        }

        let operand = self.string_operand(kind.name(), arg)?;
        let wildcard = || Expr::Constant(Value::String("%".to_string()));
        let mut parts = Vec::with_capacity(3);
        if leading {
            parts.push(wildcard());
        }
        parts.push(operand.expr);
        if trailing {
            parts.push(wildcard());
        }
        Ok((Expr::function("CONCAT", parts), None))
    }

    /// Start positions are 0-based in filters and 1-based in SQL.
    fn substring_start(&self, arg: CompiledExpression) -> Result<Expr> {
        if let CompiledExpression::Literal(literal) = &arg {
            if literal.kind == LiteralKind::Integer {
                let start = literal
                    .text
                    .parse::<i32>()
                    .ok()
                    .and_then(|start| start.checked_add(1))
                    .ok_or_else(|| {
                        FilterError::invalid_value(&literal.text, DataType::Int, "out of range")
                    })?;
                return Ok(Expr::Value(Value::Int(start)));
            }
        }
        let start = self.typed_operand(
            "substring",
            arg,
            Some(&TypeHint::of(DataType::Int)),
            DataType::is_integral,
        )?;
        Ok(Expr::binary(
            start.expr,
            BinaryOperator::Add,
            Expr::Constant(Value::Int(1)),
        ))
    }
}

fn value(expr: Expr, data_type: DataType) -> CompiledExpression {
    CompiledExpression::Value {
        expr,
        hint: TypeHint::of(data_type),
    }
}

fn has_date_part(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Date | DataType::Timestamp)
}

fn has_time_part(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Time | DataType::Timestamp)
}

/// Escapes LIKE wildcards. The flag tells whether anything was escaped.
fn escape_like(text: &str) -> (String, bool) {
    let mut escaped = String::with_capacity(text.len());
    let mut changed = false;
    for c in text.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
            changed = true;
        }
        escaped.push(c);
    }
    (escaped, changed)
}
