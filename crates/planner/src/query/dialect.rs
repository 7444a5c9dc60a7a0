//! Defines the `Dialect` trait for database-specific SQL syntax.

use model::core::{
    data_type::{DataType, SqlDialect},
    value::Value,
};

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - PostgreSQL uses double quotes: `"my_column"`
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a parameterized query.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - MySQL uses `?`
    fn get_placeholder(&self, index: usize) -> String;

    /// Renders a generic `DataType` into a database-specific SQL type string.
    fn render_data_type(&self, data_type: &DataType, max_length: Option<usize>) -> String;

    /// Renders a value inline, as a SQL literal.
    fn render_literal(&self, value: &Value) -> String {
        value.to_string()
    }

    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident.replace('"', "\"\""))
    }

    fn get_placeholder(&self, index: usize) -> String {
        // PostgreSQL uses $1, $2, etc.
        format!("${}", index + 1)
    }

    fn render_data_type(&self, data_type: &DataType, max_length: Option<usize>) -> String {
        let mut type_name = data_type.postgres_name().into_owned();
        if data_type.supports_length(SqlDialect::Postgres) {
            if let Some(max_len) = max_length {
                type_name = format!("{type_name}({max_len})");
            }
        }
        type_name
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#"`{}`"#, ident.replace('`', "``"))
    }

    fn get_placeholder(&self, _index: usize) -> String {
        // MySQL uses ?
        "?".into()
    }

    fn render_data_type(&self, data_type: &DataType, max_length: Option<usize>) -> String {
        let mut type_name = data_type.mysql_name().into_owned();
        if data_type.supports_length(SqlDialect::MySql) {
            if let Some(max_len) = max_length {
                type_name = format!("{type_name}({max_len})");
            }
        }
        type_name
    }

    fn render_literal(&self, value: &Value) -> String {
        // Backslash starts an escape sequence inside MySQL string literals
        match value {
            Value::String(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "''")),
            other => other.to_string(),
        }
    }

    fn name(&self) -> String {
        "MySQL".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier_escapes_quotes() {
        assert_eq!(Postgres.quote_identifier(r#"we"ird"#), r#""we""ird""#);
        assert_eq!(MySql.quote_identifier("we`ird"), "`we``ird`");
    }

    #[test]
    fn test_render_literal_backslash() {
        let value = Value::String("\\".to_string());
        assert_eq!(Postgres.render_literal(&value), r"'\'");
        assert_eq!(MySql.render_literal(&value), r"'\\'");
    }

    #[test]
    fn test_render_data_type_for_casts() {
        assert_eq!(Postgres.render_data_type(&DataType::String, None), "VARCHAR");
        assert_eq!(MySql.render_data_type(&DataType::String, None), "CHAR");
        assert_eq!(Postgres.render_data_type(&DataType::Char, Some(3)), "CHAR(3)");
        assert_eq!(MySql.render_data_type(&DataType::Date, Some(3)), "DATE");
    }
}
