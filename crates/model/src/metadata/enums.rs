use serde::{Deserialize, Serialize};

/// How an enum attribute is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumStorage {
    #[default]
    Name,
    Ordinal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    /// Explicit ordinal. Members without one take their position.
    #[serde(default)]
    pub value: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumType {
    pub name: String,
    pub members: Vec<EnumMember>,
    #[serde(default)]
    pub storage: EnumStorage,
}

impl EnumType {
    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }

    pub fn ordinal_of(&self, name: &str) -> Option<i64> {
        self.members
            .iter()
            .enumerate()
            .find(|(_, m)| m.name == name)
            .map(|(idx, m)| m.value.unwrap_or(idx as i64))
    }
}
