use crate::{
    compiled::{CompiledExpression, Operand, TypeHint},
    error::{FilterError, Result},
};
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use filter_syntax::ast::literal::{Literal, LiteralKind};
use model::{
    core::{data_type::DataType, value::Value},
    metadata::{
        enums::{EnumStorage, EnumType},
        provider::MetadataProvider,
    },
};
use planner::query::ast::expr::Expr;
use std::str::FromStr;
use uuid::Uuid;

/// Turns filter literals into backend values.
pub struct LiteralCoercer<'a> {
    provider: &'a dyn MetadataProvider,
}

impl<'a> LiteralCoercer<'a> {
    pub fn new(provider: &'a dyn MetadataProvider) -> Self {
        Self { provider }
    }

    /// Type a literal has when nothing else is known about it.
    pub fn intrinsic_type(kind: LiteralKind) -> DataType {
        match kind {
            LiteralKind::Null => DataType::Null,
            LiteralKind::Boolean => DataType::Boolean,
            LiteralKind::Integer => DataType::Long,
            LiteralKind::Decimal => DataType::Decimal,
            LiteralKind::Double => DataType::Double,
            LiteralKind::String => DataType::String,
            LiteralKind::Date => DataType::Date,
            LiteralKind::TimeOfDay => DataType::Time,
            LiteralKind::DateTimeOffset => DataType::Timestamp,
            LiteralKind::Guid => DataType::Uuid,
        }
    }

    /// Coerces `literal` to `hint`, or to its own type without one. The
    /// `null` token is always a null, whatever the hint says.
    pub fn coerce(&self, literal: &Literal, hint: Option<&TypeHint>) -> Result<Value> {
        if literal.is_null() {
            return Ok(Value::Null);
        }
        match hint {
            Some(hint) if hint.data_type != DataType::Null => self.coerce_to(literal, hint),
            _ => coerce_intrinsic(literal),
        }
    }

    /// Resolves `EnumType'Member'`, checking it against the enum type the
    /// other operand expects.
    pub fn coerce_enum(
        &self,
        enum_type: &str,
        member: &str,
        hint: Option<&TypeHint>,
    ) -> Result<(Value, TypeHint)> {
        let written = format!("{enum_type}'{member}'");
        let declared = self
            .provider
            .enum_type(enum_type)
            .ok_or_else(|| FilterError::invalid_value(&written, enum_type, "unknown enum type"))?;

        if let Some(expected) = hint.and_then(|h| h.enum_type.as_deref()) {
            let expected_name = self
                .provider
                .enum_type(expected)
                .map_or(expected, |e| e.name.as_str());
            if expected_name != declared.name {
                return Err(FilterError::invalid_value(
                    &written,
                    expected_name,
                    format!("expected a member of {expected_name}"),
                ));
            }
        }

        let value = enum_value(declared, member)?;
        Ok((value, TypeHint::enumeration(&declared.name)))
    }

    /// Brings any compiled operand into value position. Literals are coerced
    /// with `hint`.
    pub fn operand(&self, compiled: CompiledExpression, hint: Option<&TypeHint>) -> Result<Operand> {
        match compiled {
            CompiledExpression::Literal(literal) if literal.is_null() => Ok(Operand {
                expr: Expr::Constant(Value::Null),
                hint: hint.cloned().unwrap_or_else(|| TypeHint::of(DataType::Null)),
                null: true,
            }),
            CompiledExpression::Literal(literal) => {
                let value = self.coerce(&literal, hint)?;
                let hint = match hint {
                    Some(hint) if hint.data_type != DataType::Null => hint.clone(),
                    _ => TypeHint::of(value.data_type()),
                };
                Ok(Operand {
                    expr: Expr::Value(value),
                    hint,
                    null: false,
                })
            }
            CompiledExpression::Value { expr, hint } | CompiledExpression::Path { expr, hint, .. } => {
                Ok(Operand {
                    expr,
                    hint,
                    null: false,
                })
            }
            CompiledExpression::Predicate(expr) | CompiledExpression::Subquery(expr) => Ok(Operand {
                expr,
                hint: TypeHint::of(DataType::Boolean),
                null: false,
            }),
            CompiledExpression::Type(data_type) => Err(FilterError::NotSupported(format!(
                "type {data_type} used as a value"
            ))),
        }
    }

    fn coerce_to(&self, literal: &Literal, hint: &TypeHint) -> Result<Value> {
        let text = literal.text.as_str();
        let target = hint.data_type;
        let mismatch = || {
            FilterError::invalid_value(
                literal.to_string(),
                target,
                format!("{:?} literal does not convert", literal.kind),
            )
        };

        match target {
            DataType::Boolean => match literal.kind {
                LiteralKind::Boolean => parse_bool(text),
                _ => Err(mismatch()),
            },
            DataType::Byte | DataType::Short | DataType::Int | DataType::Long => {
                if literal.kind != LiteralKind::Integer {
                    return Err(mismatch());
                }
                parse_integral(text, target)
            }
            DataType::Float | DataType::Double => match literal.kind {
                LiteralKind::Integer | LiteralKind::Decimal | LiteralKind::Double => {
                    parse_float(text)
                }
                _ => Err(mismatch()),
            },
            DataType::Decimal => match literal.kind {
                LiteralKind::Integer | LiteralKind::Decimal | LiteralKind::Double => {
                    let value = parse_decimal(text)?;
                    check_decimal_facets(text, &value, hint)?;
                    Ok(Value::Decimal(value))
                }
                _ => Err(mismatch()),
            },
            DataType::String | DataType::Char => {
                if literal.kind != LiteralKind::String {
                    return Err(mismatch());
                }
                if let Some(max_length) = hint.max_length {
                    if text.chars().count() > max_length as usize {
                        return Err(FilterError::invalid_value(
                            text,
                            target,
                            format!("longer than {max_length} characters"),
                        ));
                    }
                }
                Ok(Value::String(text.to_string()))
            }
            DataType::Uuid => match literal.kind {
                LiteralKind::Guid | LiteralKind::String => parse_uuid(text),
                _ => Err(mismatch()),
            },
            DataType::Date => match literal.kind {
                LiteralKind::Date | LiteralKind::String => parse_date(text).map(Value::Date),
                _ => Err(mismatch()),
            },
            DataType::Time => match literal.kind {
                LiteralKind::TimeOfDay | LiteralKind::String => parse_time(text).map(Value::Time),
                _ => Err(mismatch()),
            },
            DataType::Timestamp => match literal.kind {
                LiteralKind::DateTimeOffset | LiteralKind::String => {
                    parse_timestamp(text).map(Value::Timestamp)
                }
                LiteralKind::Date => {
                    let midnight = parse_date(text)?
                        .and_hms_opt(0, 0, 0)
                        .ok_or_else(|| FilterError::invalid_value(text, target, "no midnight"))?;
                    Ok(Value::Timestamp(midnight.and_utc()))
                }
                _ => Err(mismatch()),
            },
            DataType::Enum => {
                if literal.kind != LiteralKind::String {
                    return Err(mismatch());
                }
                let declared = hint
                    .enum_type
                    .as_deref()
                    .and_then(|name| self.provider.enum_type(name))
                    .ok_or_else(|| {
                        FilterError::invalid_value(text, target, "enum type is unknown")
                    })?;
                enum_value(declared, text)
            }
            DataType::Binary | DataType::Geometry => Err(FilterError::NotSupported(format!(
                "literal of type {target}"
            ))),
            DataType::Null => coerce_intrinsic(literal),
        }
    }
}

fn coerce_intrinsic(literal: &Literal) -> Result<Value> {
    let text = literal.text.as_str();
    match literal.kind {
        LiteralKind::Null => Ok(Value::Null),
        LiteralKind::Boolean => parse_bool(text),
        // Smallest of Int and Long, Decimal beyond that
        LiteralKind::Integer => match text.parse::<i64>() {
            Ok(v) => Ok(i32::try_from(v).map_or(Value::Long(v), Value::Int)),
            Err(_) => parse_decimal(text).map(Value::Decimal),
        },
        LiteralKind::Decimal => parse_decimal(text).map(Value::Decimal),
        LiteralKind::Double => parse_float(text),
        LiteralKind::String => Ok(Value::String(text.to_string())),
        LiteralKind::Date => parse_date(text).map(Value::Date),
        LiteralKind::TimeOfDay => parse_time(text).map(Value::Time),
        LiteralKind::DateTimeOffset => parse_timestamp(text).map(Value::Timestamp),
        LiteralKind::Guid => parse_uuid(text),
    }
}

fn enum_value(declared: &EnumType, member: &str) -> Result<Value> {
    let unknown = || {
        FilterError::invalid_value(
            member,
            &declared.name,
            format!("no such member of {}", declared.name),
        )
    };
    match declared.storage {
        EnumStorage::Name if declared.has_member(member) => {
            Ok(Value::Enum(declared.name.clone(), member.to_string()))
        }
        EnumStorage::Name => Err(unknown()),
        EnumStorage::Ordinal => declared
            .ordinal_of(member)
            .map(Value::Long)
            .ok_or_else(unknown),
    }
}

fn parse_bool(text: &str) -> Result<Value> {
    match text {
        "true" => Ok(Value::Boolean(true)),
        "false" => Ok(Value::Boolean(false)),
        _ => Err(FilterError::invalid_value(text, DataType::Boolean, "not a boolean")),
    }
}

fn parse_integral(text: &str, target: DataType) -> Result<Value> {
    let out_of_range = || FilterError::invalid_value(text, target, "out of range");
    let value = text.parse::<i64>().map_err(|_| out_of_range())?;
    match target {
        DataType::Byte => {
            if !(0..=255).contains(&value) {
                return Err(out_of_range());
            }
            i16::try_from(value).map(Value::Short).map_err(|_| out_of_range())
        }
        DataType::Short => i16::try_from(value).map(Value::Short).map_err(|_| out_of_range()),
        DataType::Int => i32::try_from(value).map(Value::Int).map_err(|_| out_of_range()),
        _ => Ok(Value::Long(value)),
    }
}

fn parse_float(text: &str) -> Result<Value> {
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Value::Float(v)),
        _ => Err(FilterError::invalid_value(text, DataType::Double, "not a finite number")),
    }
}

fn parse_decimal(text: &str) -> Result<BigDecimal> {
    BigDecimal::from_str(text)
        .map_err(|e| FilterError::invalid_value(text, DataType::Decimal, e.to_string()))
}

/// Significant digits and fractional digits, ignoring trailing zeros.
fn decimal_shape(value: &BigDecimal) -> (i64, i64) {
    let (unscaled, exponent) = value.as_bigint_and_exponent();
    let text = unscaled.to_string();
    let mut digits = text.trim_start_matches('-').to_string();
    let mut scale = exponent;
    while scale > 0 && digits.len() > 1 && digits.ends_with('0') {
        digits.pop();
        scale -= 1;
    }
    let digit_count = digits.len() as i64;
    let precision = if scale < 0 {
        digit_count - scale
    } else {
        digit_count.max(scale)
    };
    (precision, scale.max(0))
}

fn check_decimal_facets(text: &str, value: &BigDecimal, hint: &TypeHint) -> Result<()> {
    let (precision, scale) = decimal_shape(value);
    if let Some(max_scale) = hint.scale {
        if scale > i64::from(max_scale) {
            return Err(FilterError::invalid_value(
                text,
                DataType::Decimal,
                format!("more than {max_scale} fractional digits"),
            ));
        }
    }
    if let Some(max_precision) = hint.precision {
        let allowed = match hint.scale {
            Some(max_scale) => i64::from(max_precision) - i64::from(max_scale) + scale,
            None => i64::from(max_precision),
        };
        if precision > allowed {
            return Err(FilterError::invalid_value(
                text,
                DataType::Decimal,
                format!("exceeds precision {max_precision}"),
            ));
        }
    }
    Ok(())
}

fn parse_uuid(text: &str) -> Result<Value> {
    Uuid::parse_str(text)
        .map(Value::Uuid)
        .map_err(|e| FilterError::invalid_value(text, DataType::Uuid, e.to_string()))
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| FilterError::invalid_value(text, DataType::Date, e.to_string()))
}

fn parse_time(text: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .map_err(|e| FilterError::invalid_value(text, DataType::Time, e.to_string()))
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| FilterError::invalid_value(text, DataType::Timestamp, e.to_string()))
}
