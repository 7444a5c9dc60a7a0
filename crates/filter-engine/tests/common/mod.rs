#![allow(dead_code)]

use filter_engine::{FilterCompiler, SqlFilterCompiler, error::FilterError};
use filter_syntax::parse;
use model::{core::value::Value, metadata::schema::Schema};
use planner::query::{
    dialect::{MySql, Postgres},
    renderer::render_to_sql,
};

pub const SCHEMA: &str = r#"{
    "namespace": "com.sap.olingo.jpa",
    "entity_types": [
        {
            "name": "BusinessPartner",
            "table": "OLINGO.BusinessPartner",
            "keys": ["ID"],
            "attributes": [
                { "name": "ID", "kind": "primitive", "type": "Edm.String", "max_length": 32 },
                { "name": "Country", "kind": "primitive", "type": "Edm.String", "max_length": 4 },
                { "name": "ETag", "kind": "primitive", "type": "Edm.Int64" },
                { "name": "Active", "kind": "primitive", "type": "Edm.Boolean" },
                { "name": "CreationDate", "kind": "primitive", "type": "Edm.Date" },
                { "name": "Era", "kind": "enum", "enum_type": "IsoEra" },
                { "name": "AccessUnit", "kind": "enum", "enum_type": "ChronoUnit" },
                {
                    "name": "AdministrativeInformation",
                    "kind": "complex",
                    "complex_type": "AdministrativeInformation"
                },
                {
                    "name": "Comments",
                    "kind": "element_collection",
                    "table": "OLINGO.Comment",
                    "join_columns": [{ "source": "ID", "target": "BusinessPartnerID" }],
                    "element": { "primitive": { "column": "Text", "type": "Edm.String" } }
                },
                {
                    "name": "InhouseAddress",
                    "kind": "element_collection",
                    "table": "OLINGO.InhouseAddress",
                    "join_columns": [{ "source": "ID", "target": "ParentID" }],
                    "element": { "complex": { "complex_type": "InhouseAddress" } }
                }
            ],
            "associations": [
                {
                    "name": "Roles",
                    "target": "BusinessPartnerRole",
                    "cardinality": "to_many",
                    "join_columns": [{ "source": "ID", "target": "BusinessPartnerID" }]
                },
                {
                    "name": "Teams",
                    "target": "Team",
                    "cardinality": "to_many",
                    "join_columns": [{ "source": "ID", "target": "PersonID" }],
                    "join_table": {
                        "table": "OLINGO.Membership",
                        "inverse_columns": [{ "source": "TeamID", "target": "TeamKey" }]
                    }
                }
            ]
        },
        {
            "name": "BusinessPartnerRole",
            "table": "OLINGO.BusinessPartnerRole",
            "attributes": [
                { "name": "BusinessPartnerID", "kind": "primitive", "type": "Edm.String" },
                { "name": "RoleCategory", "column": "Category", "kind": "primitive", "type": "Edm.String" }
            ],
            "associations": [
                {
                    "name": "BusinessPartner",
                    "target": "BusinessPartner",
                    "join_columns": [{ "source": "BusinessPartnerID", "target": "ID" }]
                }
            ]
        },
        {
            "name": "Team",
            "table": "OLINGO.Team",
            "attributes": [
                { "name": "TeamKey", "kind": "primitive", "type": "Edm.String" },
                { "name": "Name", "kind": "primitive", "type": "Edm.String" }
            ]
        },
        {
            "name": "Person",
            "table": "OLINGO.Person",
            "attributes": [
                { "name": "ID", "kind": "primitive", "type": "Edm.String" },
                { "name": "FirstName", "kind": "primitive", "type": "Edm.String" },
                { "name": "LastName", "kind": "primitive", "type": "Edm.String" }
            ]
        },
        {
            "name": "AdministrativeDivision",
            "table": "OLINGO.AdministrativeDivision",
            "attributes": [
                { "name": "CodeID", "kind": "primitive", "type": "Edm.String" },
                { "name": "DivisionCode", "kind": "primitive", "type": "Edm.String" },
                { "name": "ParentCodeID", "kind": "primitive", "type": "Edm.String" },
                { "name": "ParentDivisionCode", "kind": "primitive", "type": "Edm.String" },
                { "name": "Area", "kind": "primitive", "type": "Edm.Int64" },
                { "name": "Population", "kind": "primitive", "type": "Edm.Int64" }
            ],
            "associations": [
                {
                    "name": "Parent",
                    "target": "AdministrativeDivision",
                    "join_columns": [
                        { "source": "ParentCodeID", "target": "CodeID" },
                        { "source": "ParentDivisionCode", "target": "DivisionCode" }
                    ]
                },
                {
                    "name": "Children",
                    "target": "AdministrativeDivision",
                    "cardinality": "to_many",
                    "join_columns": [
                        { "source": "CodeID", "target": "ParentCodeID" },
                        { "source": "DivisionCode", "target": "ParentDivisionCode" }
                    ]
                }
            ]
        }
    ],
    "complex_types": [
        {
            "name": "AdministrativeInformation",
            "attributes": [
                {
                    "name": "Created",
                    "kind": "complex",
                    "complex_type": "ChangeInformation",
                    "column_prefix": "Created"
                },
                {
                    "name": "Updated",
                    "kind": "complex",
                    "complex_type": "ChangeInformation",
                    "column_prefix": "Updated"
                }
            ]
        },
        {
            "name": "ChangeInformation",
            "attributes": [
                { "name": "By", "kind": "primitive", "type": "Edm.String" },
                { "name": "At", "kind": "primitive", "type": "Edm.DateTimeOffset" }
            ],
            "associations": [
                {
                    "name": "User",
                    "target": "Person",
                    "join_columns": [{ "source": "By", "target": "ID" }]
                }
            ]
        },
        {
            "name": "InhouseAddress",
            "attributes": [
                { "name": "Building", "kind": "primitive", "type": "Edm.String" },
                { "name": "Floor", "kind": "primitive", "type": "Edm.Int16" },
                { "name": "RoomNumber", "kind": "primitive", "type": "Edm.Int32" }
            ]
        }
    ],
    "enum_types": [
        {
            "name": "IsoEra",
            "members": [{ "name": "BCE" }, { "name": "CE" }]
        },
        {
            "name": "ChronoUnit",
            "storage": "ordinal",
            "members": [
                { "name": "NANOS" },
                { "name": "MICROS" },
                { "name": "MILLIS" },
                { "name": "SECONDS" }
            ]
        }
    ],
    "functions": [
        {
            "name": "PopulationDensity",
            "db_name": "\"OLINGO\".\"PopulationDensity\"",
            "parameters": [
                { "name": "Area", "type": "Edm.Int64" },
                { "name": "Population", "type": "Edm.Int64" }
            ],
            "return_type": { "kind": "primitive", "type": "Edm.Double" }
        },
        {
            "name": "Siblings",
            "db_name": "\"OLINGO\".\"Siblings\"",
            "parameters": [
                { "name": "CodeID", "type": "Edm.String" },
                { "name": "DivisionCode", "type": "Edm.String" }
            ],
            "return_type": { "kind": "entity", "collection": true }
        }
    ]
}"#;

pub fn schema() -> Schema {
    Schema::from_json(SCHEMA).unwrap()
}

/// Compiles `filter` on `entity` and renders it for PostgreSQL.
pub fn compile(entity: &str, filter: &str) -> Result<(String, Vec<Value>), FilterError> {
    let schema = schema();
    let compiler = SqlFilterCompiler::new(&schema, entity)?;
    let node = parse(filter).unwrap();
    let expr = compiler.compile(&node)?;
    Ok(render_to_sql(&expr, &Postgres))
}

pub fn compile_mysql(entity: &str, filter: &str) -> Result<(String, Vec<Value>), FilterError> {
    let schema = schema();
    let compiler = SqlFilterCompiler::new(&schema, entity)?;
    let expr = compiler.compile(&parse(filter).unwrap())?;
    Ok(render_to_sql(&expr, &MySql))
}

pub fn partner(filter: &str) -> (String, Vec<Value>) {
    compile("BusinessPartner", filter).unwrap()
}

pub fn partner_err(filter: &str) -> FilterError {
    compile("BusinessPartner", filter).unwrap_err()
}

pub fn division(filter: &str) -> (String, Vec<Value>) {
    compile("AdministrativeDivision", filter).unwrap()
}

pub fn string(text: &str) -> Value {
    Value::String(text.to_string())
}

/// `(("t{n}".<target> = "t{m}".<source>) AND ...)` for the division hierarchy.
pub fn children_correlation(child: &str, parent: &str) -> String {
    format!(
        r#"(("{child}"."ParentCodeID" = "{parent}"."CodeID") AND ("{child}"."ParentDivisionCode" = "{parent}"."DivisionCode"))"#
    )
}

pub fn roles_correlation(child: &str, parent: &str) -> String {
    format!(r#"("{child}"."BusinessPartnerID" = "{parent}"."ID")"#)
}
