use super::{FunctionResolver, NamedArgument};
use crate::{
    compiled::{CompiledExpression, TypeHint},
    error::{FilterError, Result},
};
use model::{
    core::data_type::DataType,
    metadata::function::{FunctionDescriptor, ReturnKind},
};
use planner::query::ast::expr::Expr;
use std::collections::HashMap;
use tracing::debug;

impl FunctionResolver<'_> {
    /// Resolves a database function from the catalog. Arguments are bound by
    /// parameter name and emitted in declaration order.
    pub fn resolve_custom(
        &self,
        name: &str,
        args: Vec<NamedArgument>,
    ) -> Result<CompiledExpression> {
        let descriptor = self.lookup(name)?;
        let data_type = scalar_return_type(descriptor)?;

        let mut bound: HashMap<&str, CompiledExpression> = HashMap::new();
        for (index, arg) in args.into_iter().enumerate() {
            let Some(arg_name) = arg.name else {
                return Err(FilterError::UnboundParameter {
                    function: name.to_string(),
                    parameter: format!("argument {}", index + 1),
                });
            };
            let Some(parameter) = descriptor.parameter(&arg_name) else {
                return Err(FilterError::UnknownParameter {
                    function: name.to_string(),
                    parameter: arg_name,
                });
            };
            if bound.insert(parameter.name.as_str(), arg.value).is_some() {
                return Err(FilterError::DuplicateParameter {
                    function: name.to_string(),
                    parameter: parameter.name.clone(),
                });
            }
        }

        let mut call_args = Vec::with_capacity(descriptor.parameters.len());
        for parameter in &descriptor.parameters {
            let value = bound.remove(parameter.name.as_str()).ok_or_else(|| {
                FilterError::UnboundParameter {
                    function: name.to_string(),
                    parameter: parameter.name.clone(),
                }
            })?;
            let hint = TypeHint::from_parameter(parameter);
            let operand = self.coercer.operand(value, Some(&hint))?;
            call_args.push(operand.expr);
        }

        debug!(
            function = name,
            db_name = %descriptor.db_name,
            arguments = call_args.len(),
            "Resolved custom function"
        );
        Ok(CompiledExpression::Value {
            expr: Expr::function(&descriptor.db_name, call_args),
            hint: TypeHint::of(data_type),
        })
    }

    /// Full name first, then the part after the last dot.
    fn lookup(&self, name: &str) -> Result<&FunctionDescriptor> {
        self.provider
            .function(name)
            .or_else(|| {
                name.rsplit_once('.')
                    .and_then(|(_, local)| self.provider.function(local))
            })
            .ok_or_else(|| FilterError::NotSupported(name.to_string()))
    }
}

fn scalar_return_type(descriptor: &FunctionDescriptor) -> Result<DataType> {
    let return_type = &descriptor.return_type;
    if return_type.collection {
        return Err(FilterError::NotSupportedForComparison(format!(
            "'{}' returns a collection",
            descriptor.name
        )));
    }
    if !descriptor.returns_scalar() {
        return Err(FilterError::NotSupportedForComparison(format!(
            "'{}' returns a {:?} value",
            descriptor.name, return_type.kind
        )));
    }
    match (return_type.data_type, return_type.kind) {
        (Some(data_type), _) => Ok(data_type),
        (None, ReturnKind::Enum) => Ok(DataType::Enum),
        (None, ReturnKind::Geospatial) => Ok(DataType::Geometry),
        (None, _) => Err(FilterError::StructuralError(format!(
            "function '{}' declares no return type",
            descriptor.name
        ))),
    }
}
