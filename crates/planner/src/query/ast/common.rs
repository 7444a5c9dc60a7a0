//! Defines common, reusable AST nodes for building SQL queries.

use model::metadata::entity::TableName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}

impl From<&TableName> for TableRef {
    fn from(table: &TableName) -> Self {
        TableRef {
            schema: table.schema.clone(),
            name: table.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
}
