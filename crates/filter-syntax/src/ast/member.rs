use crate::ast::node::FilterNode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `/`-separated member path, possibly ending in a lambda or `$count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub segments: Vec<MemberSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MemberSegment {
    /// Attribute, association, `$it` or a lambda variable
    Property(String),
    Count,
    /// `any()` without a lambda tests for a non-empty collection
    Any(Option<Lambda>),
    All(Lambda),
    /// A call the parser could not map to a built-in function
    Function { name: String, args: Vec<FunctionArg> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lambda {
    pub variable: String,
    pub body: Box<FilterNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionArg {
    /// Parameter name for `Name=value` arguments
    pub name: Option<String>,
    pub value: FilterNode,
}

impl Member {
    pub fn new(segments: Vec<MemberSegment>) -> Self {
        Self { segments }
    }

    pub fn path(names: &[&str]) -> Self {
        Self::new(
            names
                .iter()
                .map(|name| MemberSegment::Property(name.to_string()))
                .collect(),
        )
    }

    pub fn last(&self) -> Option<&MemberSegment> {
        self.segments.last()
    }

    /// True when the final segment is `any(...)` or `all(...)`.
    pub fn is_lambda(&self) -> bool {
        matches!(
            self.last(),
            Some(MemberSegment::Any(_)) | Some(MemberSegment::All(_))
        )
    }

    pub fn is_count(&self) -> bool {
        matches!(self.last(), Some(MemberSegment::Count))
    }
}

impl fmt::Display for MemberSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberSegment::Property(name) => write!(f, "{name}"),
            MemberSegment::Count => write!(f, "$count"),
            MemberSegment::Any(None) => write!(f, "any()"),
            MemberSegment::Any(Some(lambda)) => write!(f, "any({}:...)", lambda.variable),
            MemberSegment::All(lambda) => write!(f, "all({}:...)", lambda.variable),
            MemberSegment::Function { name, .. } => write!(f, "{name}(...)"),
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.segments.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", parts.join("/"))
    }
}
