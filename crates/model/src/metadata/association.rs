use crate::metadata::entity::TableName;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    #[default]
    ToOne,
    ToMany,
}

/// One column pair of a join condition.
///
/// `source` names a column of the owning side and `target` a column of the
/// other side (the target table, or the join table when one is declared).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinColumn {
    pub source: String,
    pub target: String,
}

/// Link table of a many-to-many association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinTable {
    pub table: TableName,
    /// `source` is a join-table column, `target` a column of the target table.
    pub inverse_columns: Vec<JoinColumn>,
}

/// A navigation property from one structured type to an entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Association {
    pub name: String,
    pub target: String,
    #[serde(default)]
    pub cardinality: Cardinality,
    pub join_columns: Vec<JoinColumn>,
    #[serde(default)]
    pub join_table: Option<JoinTable>,
}

impl Association {
    pub fn is_collection(&self) -> bool {
        self.cardinality == Cardinality::ToMany
    }
}
