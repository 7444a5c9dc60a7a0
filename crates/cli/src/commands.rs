use clap::{Parser, ValueEnum};
use planner::query::dialect::{Dialect, MySql, Postgres};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "odata-filter",
    version = "0.1.0",
    about = "Compiles OData $filter expressions into SQL predicates"
)]
pub struct Cli {
    #[arg(long, help = "Path of the JSON schema describing the entity types")]
    pub schema: PathBuf,

    #[arg(long, help = "Entity type the filter applies to")]
    pub entity: String,

    #[arg(long, value_enum, default_value_t = DialectKind::Postgres)]
    pub dialect: DialectKind,

    #[arg(long, value_enum, default_value_t = OutputFormat::Sql)]
    pub format: OutputFormat,

    #[arg(
        long,
        help = "Wrap the predicate in a SELECT over the entity's table"
    )]
    pub select: bool,

    #[arg(short, long, help = "Log compilation steps at debug level")]
    pub verbose: bool,

    /// The $filter expression
    pub filter: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialectKind {
    Postgres,
    Mysql,
}

impl DialectKind {
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            DialectKind::Postgres => &Postgres,
            DialectKind::Mysql => &MySql,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// SQL followed by one bound parameter per line
    Sql,
    /// `{ "sql": ..., "params": [...] }`
    Json,
    /// The parsed filter tree, before compilation
    Ast,
}
