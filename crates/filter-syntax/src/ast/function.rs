use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in filter functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionKind {
    Contains,
    StartsWith,
    EndsWith,
    Length,
    IndexOf,
    Substring,
    ToLower,
    ToUpper,
    Trim,
    Concat,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Date,
    Time,
    Now,
    Round,
    Floor,
    Ceiling,
    Cast,
    IsOf,
}

impl FunctionKind {
    pub const ALL: [FunctionKind; 24] = [
        FunctionKind::Contains,
        FunctionKind::StartsWith,
        FunctionKind::EndsWith,
        FunctionKind::Length,
        FunctionKind::IndexOf,
        FunctionKind::Substring,
        FunctionKind::ToLower,
        FunctionKind::ToUpper,
        FunctionKind::Trim,
        FunctionKind::Concat,
        FunctionKind::Year,
        FunctionKind::Month,
        FunctionKind::Day,
        FunctionKind::Hour,
        FunctionKind::Minute,
        FunctionKind::Second,
        FunctionKind::Date,
        FunctionKind::Time,
        FunctionKind::Now,
        FunctionKind::Round,
        FunctionKind::Floor,
        FunctionKind::Ceiling,
        FunctionKind::Cast,
        FunctionKind::IsOf,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FunctionKind::Contains => "contains",
            FunctionKind::StartsWith => "startswith",
            FunctionKind::EndsWith => "endswith",
            FunctionKind::Length => "length",
            FunctionKind::IndexOf => "indexof",
            FunctionKind::Substring => "substring",
            FunctionKind::ToLower => "tolower",
            FunctionKind::ToUpper => "toupper",
            FunctionKind::Trim => "trim",
            FunctionKind::Concat => "concat",
            FunctionKind::Year => "year",
            FunctionKind::Month => "month",
            FunctionKind::Day => "day",
            FunctionKind::Hour => "hour",
            FunctionKind::Minute => "minute",
            FunctionKind::Second => "second",
            FunctionKind::Date => "date",
            FunctionKind::Time => "time",
            FunctionKind::Now => "now",
            FunctionKind::Round => "round",
            FunctionKind::Floor => "floor",
            FunctionKind::Ceiling => "ceiling",
            FunctionKind::Cast => "cast",
            FunctionKind::IsOf => "isof",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
