use crate::parser::Rule;
use pest::error::{Error as PestError, LineColLocation};
use thiserror::Error;

/// Error type for AST building
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Parse error at line {line}, column {column}: {message}")]
pub struct BuildError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl BuildError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

impl From<PestError<Rule>> for BuildError {
    fn from(err: PestError<Rule>) -> Self {
        let (line, column) = match err.line_col {
            LineColLocation::Pos((line, col)) => (line, col),
            LineColLocation::Span((line, col), _) => (line, col),
        };
        BuildError {
            message: format!("Syntax error: {}", err.variant.message()),
            line,
            column,
        }
    }
}
