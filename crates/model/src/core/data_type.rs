use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, collections::HashMap, fmt};

/// Declared type of an attribute, function parameter or literal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum DataType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Decimal,
    String,
    Char,
    Uuid,
    Date,
    Time,
    Timestamp,
    Binary,
    Enum,
    Geometry,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    MySql,
    Postgres,
}

lazy_static! {
    static ref EDM_TYPE_MAP: HashMap<&'static str, DataType> = build_edm_type_map();
    static ref SQL_TYPE_MAP: HashMap<&'static str, DataType> = build_sql_type_map();
}

impl DataType {
    /// Resolves either an OData EDM name (`Edm.Int32`) or a SQL type name
    /// (`INTEGER`, `varchar`) to a declared type.
    pub fn from_type_name(type_name: &str) -> Result<Self, String> {
        let trimmed = type_name.trim();
        if let Some(data_type) = EDM_TYPE_MAP.get(trimmed) {
            return Ok(*data_type);
        }

        let normalized = Self::normalize_type_name(trimmed);
        SQL_TYPE_MAP
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| format!("Unknown type name: {type_name}"))
    }

    pub fn edm_name(&self) -> &'static str {
        match self {
            DataType::Boolean => "Edm.Boolean",
            DataType::Byte => "Edm.Byte",
            DataType::Short => "Edm.Int16",
            DataType::Int => "Edm.Int32",
            DataType::Long => "Edm.Int64",
            DataType::Float => "Edm.Single",
            DataType::Double => "Edm.Double",
            DataType::Decimal => "Edm.Decimal",
            DataType::String => "Edm.String",
            DataType::Char => "Edm.String",
            DataType::Uuid => "Edm.Guid",
            DataType::Date => "Edm.Date",
            DataType::Time => "Edm.TimeOfDay",
            DataType::Timestamp => "Edm.DateTimeOffset",
            DataType::Binary => "Edm.Binary",
            DataType::Enum => "Edm.Enum",
            DataType::Geometry => "Edm.Geometry",
            DataType::Null => "Edm.Null",
        }
    }

    pub fn mysql_name(&self) -> Cow<'_, str> {
        match self {
            DataType::Boolean => Cow::Borrowed("BOOLEAN"),
            DataType::Byte => Cow::Borrowed("TINYINT UNSIGNED"),
            DataType::Short => Cow::Borrowed("SMALLINT"),
            DataType::Int => Cow::Borrowed("INT"),
            DataType::Long => Cow::Borrowed("BIGINT"),
            DataType::Float => Cow::Borrowed("FLOAT"),
            DataType::Double => Cow::Borrowed("DOUBLE"),
            DataType::Decimal => Cow::Borrowed("DECIMAL"),
            DataType::String => Cow::Borrowed("CHAR"),
            DataType::Char => Cow::Borrowed("CHAR"),
            DataType::Uuid => Cow::Borrowed("CHAR(36)"),
            DataType::Date => Cow::Borrowed("DATE"),
            DataType::Time => Cow::Borrowed("TIME"),
            DataType::Timestamp => Cow::Borrowed("DATETIME"),
            DataType::Binary => Cow::Borrowed("BINARY"),
            DataType::Enum => Cow::Borrowed("CHAR"),
            DataType::Geometry => Cow::Borrowed("GEOMETRY"),
            DataType::Null => Cow::Borrowed("NULL"),
        }
    }

    pub fn postgres_name(&self) -> Cow<'_, str> {
        match self {
            DataType::Boolean => Cow::Borrowed("BOOLEAN"),
            DataType::Byte | DataType::Short => Cow::Borrowed("SMALLINT"),
            DataType::Int => Cow::Borrowed("INTEGER"),
            DataType::Long => Cow::Borrowed("BIGINT"),
            DataType::Float => Cow::Borrowed("REAL"),
            DataType::Double => Cow::Borrowed("DOUBLE PRECISION"),
            DataType::Decimal => Cow::Borrowed("DECIMAL"),
            DataType::String | DataType::Enum => Cow::Borrowed("VARCHAR"),
            DataType::Char => Cow::Borrowed("CHAR"),
            DataType::Uuid => Cow::Borrowed("UUID"),
            DataType::Date => Cow::Borrowed("DATE"),
            DataType::Time => Cow::Borrowed("TIME"),
            DataType::Timestamp => Cow::Borrowed("TIMESTAMP WITH TIME ZONE"),
            DataType::Binary => Cow::Borrowed("BYTEA"),
            DataType::Geometry => Cow::Borrowed("GEOMETRY"),
            DataType::Null => Cow::Borrowed("NULL"),
        }
    }

    pub fn supports_length(&self, dialect: SqlDialect) -> bool {
        match dialect {
            SqlDialect::Postgres => matches!(self, DataType::String | DataType::Char),
            SqlDialect::MySql => {
                matches!(self, DataType::String | DataType::Char | DataType::Binary)
            }
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric_rank().is_some()
    }

    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            DataType::Byte | DataType::Short | DataType::Int | DataType::Long
        )
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, DataType::String | DataType::Char)
    }

    /// Position in the numeric promotion ladder, `None` for non-numeric types.
    pub fn numeric_rank(&self) -> Option<u8> {
        match self {
            DataType::Byte => Some(1),
            DataType::Short => Some(2),
            DataType::Int => Some(3),
            DataType::Long => Some(4),
            DataType::Decimal => Some(5),
            DataType::Float => Some(6),
            DataType::Double => Some(7),
            _ => None,
        }
    }

    /// Result type of an arithmetic operation between two numeric operands.
    ///
    /// Integral operands widen to the larger integral type. Decimal wins over
    /// integers, and floating point wins over everything.
    pub fn widen(left: DataType, right: DataType) -> Option<DataType> {
        let (l, r) = (left.numeric_rank()?, right.numeric_rank()?);
        let wider = if l >= r { left } else { right };
        Some(match wider {
            DataType::Byte => DataType::Short,
            other => other,
        })
    }

    /// Whether values of the two types may meet in a comparison.
    pub fn is_comparable_with(&self, other: &DataType) -> bool {
        if self == other || *self == DataType::Null || *other == DataType::Null {
            return true;
        }
        if self.is_numeric() && other.is_numeric() {
            return true;
        }
        if self.is_textual() && other.is_textual() {
            return true;
        }
        matches!(
            (self, other),
            (DataType::Enum, DataType::String)
                | (DataType::String, DataType::Enum)
                | (DataType::Uuid, DataType::String)
                | (DataType::String, DataType::Uuid)
                | (DataType::Date, DataType::Timestamp)
                | (DataType::Timestamp, DataType::Date)
        )
    }

    fn normalize_type_name(type_name: &str) -> String {
        type_name.trim().to_uppercase()
    }
}

impl TryFrom<&str> for DataType {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        DataType::from_type_name(s)
    }
}

impl TryFrom<String> for DataType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        DataType::from_type_name(&s)
    }
}

impl From<DataType> for String {
    fn from(data_type: DataType) -> Self {
        data_type.edm_name().to_string()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.edm_name())
    }
}

fn build_edm_type_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("Edm.Boolean", Boolean),
        ("Edm.Byte", Byte),
        ("Edm.SByte", Short),
        ("Edm.Int16", Short),
        ("Edm.Int32", Int),
        ("Edm.Int64", Long),
        ("Edm.Single", Float),
        ("Edm.Double", Double),
        ("Edm.Decimal", Decimal),
        ("Edm.String", String),
        ("Edm.Guid", Uuid),
        ("Edm.Date", Date),
        ("Edm.TimeOfDay", Time),
        ("Edm.DateTimeOffset", Timestamp),
        ("Edm.Binary", Binary),
        ("Edm.Enum", Enum),
        ("Edm.Geometry", Geometry),
        ("Edm.GeometryPoint", Geometry),
        ("Edm.Geography", Geometry),
        ("Edm.GeographyPoint", Geometry),
        ("Edm.Null", Null),
    ];

    let mut map = HashMap::new();
    for (name, data_type) in entries {
        map.insert(name, data_type);
    }
    map
}

fn build_sql_type_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("BOOLEAN", Boolean),
        ("BOOL", Boolean),
        ("TINYINT", Byte),
        ("SMALLINT", Short),
        ("INT2", Short),
        ("INT", Int),
        ("INTEGER", Int),
        ("INT4", Int),
        ("BIGINT", Long),
        ("INT8", Long),
        ("REAL", Float),
        ("FLOAT", Float),
        ("FLOAT4", Float),
        ("DOUBLE", Double),
        ("DOUBLE PRECISION", Double),
        ("FLOAT8", Double),
        ("DECIMAL", Decimal),
        ("NUMERIC", Decimal),
        ("VARCHAR", String),
        ("CHARACTER VARYING", String),
        ("TEXT", String),
        ("CHAR", Char),
        ("CHARACTER", Char),
        ("BPCHAR", Char),
        ("UUID", Uuid),
        ("DATE", Date),
        ("TIME", Time),
        ("TIMESTAMP", Timestamp),
        ("TIMESTAMPTZ", Timestamp),
        ("DATETIME", Timestamp),
        ("BYTEA", Binary),
        ("BINARY", Binary),
        ("VARBINARY", Binary),
        ("BLOB", Binary),
        ("ENUM", Enum),
        ("GEOMETRY", Geometry),
        ("NULL", Null),
    ];

    let mut map = HashMap::new();
    for (name, data_type) in entries {
        map.insert(name, data_type);
    }
    map
}
