use crate::{
    core::data_type::DataType,
    metadata::association::{Association, JoinColumn},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A possibly schema-qualified table name. Serialized as `schema.table`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TableName {
    pub schema: Option<String>,
    pub name: String,
}

impl TableName {
    pub fn new(name: &str) -> Self {
        Self {
            schema: None,
            name: name.to_string(),
        }
    }
}

impl From<String> for TableName {
    fn from(value: String) -> Self {
        match value.split_once('.') {
            Some((schema, name)) => Self {
                schema: Some(schema.to_string()),
                name: name.to_string(),
            },
            None => Self {
                schema: None,
                name: value,
            },
        }
    }
}

impl From<TableName> for String {
    fn from(value: TableName) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// An entity type: a structured type backed by its own table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityType {
    pub name: String,
    pub table: TableName,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub associations: Vec<Association>,
}

/// A complex (embedded) type. Its columns live in the table of whatever embeds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexType {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub associations: Vec<Association>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    /// Backing column, defaults to the attribute name.
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
    #[serde(flatten)]
    pub kind: AttributeKind,
}

fn default_nullable() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributeKind {
    Primitive {
        #[serde(rename = "type")]
        data_type: DataType,
    },
    Enum {
        enum_type: String,
    },
    Complex {
        complex_type: String,
        /// Prepended to every column of the embedded type.
        #[serde(default)]
        column_prefix: Option<String>,
    },
    /// A collection of values or complex instances stored in a side table
    /// that has no entity type of its own.
    ElementCollection {
        table: TableName,
        join_columns: Vec<JoinColumn>,
        element: CollectionElement,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionElement {
    Primitive {
        column: String,
        #[serde(rename = "type")]
        data_type: DataType,
    },
    Complex {
        complex_type: String,
    },
}

impl Attribute {
    pub fn column(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }

    /// The scalar type of the attribute, `None` for complex and collection attributes.
    pub fn data_type(&self) -> Option<DataType> {
        match &self.kind {
            AttributeKind::Primitive { data_type } => Some(*data_type),
            AttributeKind::Enum { .. } => Some(DataType::Enum),
            AttributeKind::Complex { .. } | AttributeKind::ElementCollection { .. } => None,
        }
    }

    pub fn enum_type(&self) -> Option<&str> {
        match &self.kind {
            AttributeKind::Enum { enum_type } => Some(enum_type),
            _ => None,
        }
    }

    pub fn is_element_collection(&self) -> bool {
        matches!(self.kind, AttributeKind::ElementCollection { .. })
    }
}

/// A structured type as seen by path resolution: an entity or a complex type.
#[derive(Debug, Clone, Copy)]
pub enum StructuredType<'a> {
    Entity(&'a EntityType),
    Complex(&'a ComplexType),
}

impl<'a> StructuredType<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            StructuredType::Entity(e) => &e.name,
            StructuredType::Complex(c) => &c.name,
        }
    }

    pub fn attributes(&self) -> &'a [Attribute] {
        match self {
            StructuredType::Entity(e) => &e.attributes,
            StructuredType::Complex(c) => &c.attributes,
        }
    }

    pub fn associations(&self) -> &'a [Association] {
        match self {
            StructuredType::Entity(e) => &e.associations,
            StructuredType::Complex(c) => &c.associations,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&'a Attribute> {
        self.attributes().iter().find(|a| a.name == name)
    }

    pub fn association(&self, name: &str) -> Option<&'a Association> {
        self.associations().iter().find(|a| a.name == name)
    }
}
