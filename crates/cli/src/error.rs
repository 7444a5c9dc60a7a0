use filter_engine::FilterError;
use filter_syntax::errors::BuildError;
use model::metadata::error::MetadataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to load the schema: {0}")]
    Schema(#[from] MetadataError),

    #[error("Failed to parse the filter: {0}")]
    Parse(#[from] BuildError),

    #[error("Failed to compile the filter: {0}")]
    Compile(#[from] FilterError),

    #[error("Failed to serialize output to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
