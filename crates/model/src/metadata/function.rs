use crate::core::data_type::DataType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    Primitive,
    Enum,
    Geospatial,
    Complex,
    Entity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnType {
    pub kind: ReturnKind,
    #[serde(rename = "type", default)]
    pub data_type: Option<DataType>,
    #[serde(default)]
    pub collection: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    #[serde(default)]
    pub enum_type: Option<String>,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
}

/// A database-native function exposed to filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// Name used in filter expressions.
    pub name: String,
    /// Name of the function in the database.
    pub db_name: String,
    #[serde(default)]
    pub parameters: Vec<FunctionParameter>,
    pub return_type: ReturnType,
}

impl FunctionDescriptor {
    pub fn parameter(&self, name: &str) -> Option<&FunctionParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn returns_scalar(&self) -> bool {
        matches!(
            self.return_type.kind,
            ReturnKind::Primitive | ReturnKind::Enum | ReturnKind::Geospatial
        )
    }
}
