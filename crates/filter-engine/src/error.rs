use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid path: '{path}' is not a member of '{owner}'")]
    InvalidPath { path: String, owner: String },

    #[error("Invalid value '{value}' for {target}: {reason}")]
    InvalidValue {
        value: String,
        target: String,
        reason: String,
    },

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Not supported for comparison: {0}")]
    NotSupportedForComparison(String),

    #[error("Function '{function}' expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        function: String,
        expected: String,
        actual: usize,
    },

    #[error("Function '{function}' has no argument bound to parameter '{parameter}'")]
    UnboundParameter { function: String, parameter: String },

    #[error("Function '{function}' has no parameter '{parameter}'")]
    UnknownParameter { function: String, parameter: String },

    #[error("Function '{function}' has parameter '{parameter}' bound more than once")]
    DuplicateParameter { function: String, parameter: String },

    #[error("Internal error: {0}")]
    StructuralError(String),
}

/// Who is to blame for a failed compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The filter itself is wrong
    Client,
    /// Valid filter using a construct this compiler does not implement
    Unsupported,
    /// A compiler invariant was violated
    Defect,
}

impl FilterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FilterError::InvalidPath { .. }
            | FilterError::InvalidValue { .. }
            | FilterError::ArityMismatch { .. }
            | FilterError::UnboundParameter { .. }
            | FilterError::UnknownParameter { .. }
            | FilterError::DuplicateParameter { .. } => ErrorCategory::Client,
            FilterError::NotSupported(_) | FilterError::NotSupportedForComparison(_) => {
                ErrorCategory::Unsupported
            }
            FilterError::StructuralError(_) => ErrorCategory::Defect,
        }
    }

    /// HTTP status code a request handler should answer with.
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Client => 400,
            ErrorCategory::Unsupported => 501,
            ErrorCategory::Defect => 500,
        }
    }

    pub(crate) fn invalid_value(
        value: impl Into<String>,
        target: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        FilterError::InvalidValue {
            value: value.into(),
            target: target.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
