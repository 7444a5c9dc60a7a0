//! Built-in and database-native function calls.

use crate::{
    compiled::{CompiledExpression, Operand, TypeHint},
    error::{FilterError, Result},
    literal::LiteralCoercer,
};
use model::{core::data_type::DataType, metadata::provider::MetadataProvider};

pub mod builtin;
pub mod custom;

/// An argument of a custom function call, compiled but not yet bound.
#[derive(Debug, Clone)]
pub struct NamedArgument {
    pub name: Option<String>,
    pub value: CompiledExpression,
}

pub struct FunctionResolver<'a> {
    provider: &'a dyn MetadataProvider,
    coercer: &'a LiteralCoercer<'a>,
}

impl<'a> FunctionResolver<'a> {
    pub fn new(provider: &'a dyn MetadataProvider, coercer: &'a LiteralCoercer<'a>) -> Self {
        Self { provider, coercer }
    }

    /// Brings an argument into value position and checks its type class.
    fn typed_operand(
        &self,
        function: &str,
        arg: CompiledExpression,
        hint: Option<&TypeHint>,
        accepts: fn(&DataType) -> bool,
    ) -> Result<Operand> {
        let operand = self.coercer.operand(arg, hint)?;
        if operand.null {
            return Err(FilterError::NotSupported(format!("{function} with null")));
        }
        if !accepts(&operand.hint.data_type) {
            return Err(FilterError::NotSupported(format!(
                "{function} on {}",
                operand.hint.data_type
            )));
        }
        Ok(operand)
    }
}

/// Fails unless `actual` lies in `min..=max`.
fn check_arity(function: &str, min: usize, max: usize, actual: usize) -> Result<()> {
    if (min..=max).contains(&actual) {
        return Ok(());
    }
    let expected = if min == max {
        min.to_string()
    } else {
        format!("{min} to {max}")
    };
    Err(FilterError::ArityMismatch {
        function: function.to_string(),
        expected,
        actual,
    })
}
