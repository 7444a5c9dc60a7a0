use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read schema file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("type '{name}' is declared more than once")]
    DuplicateType { name: String },

    #[error("'{owner}' references unknown {kind} '{reference}'")]
    UnknownReference {
        owner: String,
        kind: &'static str,
        reference: String,
    },
}
