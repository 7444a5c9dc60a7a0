use crate::error::CliError;
use model::core::value::Value;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct RenderedFilter {
    pub sql: String,
    pub params: Vec<Value>,
}

/// SQL on the first line, then one parameter per line in placeholder order.
pub fn write_sql(out: &mut impl Write, rendered: &RenderedFilter) -> Result<(), CliError> {
    writeln!(out, "{}", rendered.sql)?;
    for (index, param) in rendered.params.iter().enumerate() {
        writeln!(out, "{}: {param}", index + 1)?;
    }
    Ok(())
}

pub fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(out, "{json}")?;
    Ok(())
}
