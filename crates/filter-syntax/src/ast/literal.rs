use serde::{Deserialize, Serialize};
use std::fmt;

/// The intrinsic type the parser assigned to a literal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralKind {
    Null,
    Boolean,
    Integer,
    Decimal,
    Double,
    String,
    Date,
    TimeOfDay,
    DateTimeOffset,
    Guid,
}

/// A literal as written in the filter. String literals are stored unquoted
/// and unescaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub text: String,
    pub kind: LiteralKind,
}

impl Literal {
    pub fn new(text: impl Into<String>, kind: LiteralKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::new(text, LiteralKind::String)
    }

    pub fn integer(value: i64) -> Self {
        Self::new(value.to_string(), LiteralKind::Integer)
    }

    pub fn null() -> Self {
        Self::new("null", LiteralKind::Null)
    }

    /// The `null` token. A quoted `'null'` is a string, not a null.
    pub fn is_null(&self) -> bool {
        self.kind != LiteralKind::String && self.text.eq_ignore_ascii_case("null")
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LiteralKind::String => write!(f, "'{}'", self.text.replace('\'', "''")),
            _ => write!(f, "{}", self.text),
        }
    }
}
