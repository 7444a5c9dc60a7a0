use crate::metadata::{
    association::Association,
    entity::{Attribute, AttributeKind, CollectionElement, ComplexType, EntityType},
    enums::EnumType,
    error::MetadataError,
    function::FunctionDescriptor,
    provider::MetadataProvider,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};
use tracing::debug;

/// Entity metadata loaded from a JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Optional namespace. Names may then be referenced with or without it.
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub entity_types: Vec<EntityType>,
    #[serde(default)]
    pub complex_types: Vec<ComplexType>,
    #[serde(default)]
    pub enum_types: Vec<EnumType>,
    #[serde(default)]
    pub functions: Vec<FunctionDescriptor>,
}

impl Schema {
    pub fn from_json(source: &str) -> Result<Self, MetadataError> {
        let schema: Schema = serde_json::from_str(source)?;
        schema.validate()?;
        debug!(
            entities = schema.entity_types.len(),
            complex = schema.complex_types.len(),
            enums = schema.enum_types.len(),
            functions = schema.functions.len(),
            "Loaded schema"
        );
        Ok(schema)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MetadataError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// Checks that names are unique and every type reference resolves.
    pub fn validate(&self) -> Result<(), MetadataError> {
        let mut seen = HashSet::new();
        let names = self
            .entity_types
            .iter()
            .map(|e| &e.name)
            .chain(self.complex_types.iter().map(|c| &c.name))
            .chain(self.enum_types.iter().map(|e| &e.name));
        for name in names {
            if !seen.insert(name.as_str()) {
                return Err(MetadataError::DuplicateType { name: name.clone() });
            }
        }

        for entity in &self.entity_types {
            self.validate_members(&entity.name, &entity.attributes, &entity.associations)?;
        }
        for complex in &self.complex_types {
            self.validate_members(&complex.name, &complex.attributes, &complex.associations)?;
        }
        for function in &self.functions {
            for param in &function.parameters {
                if let Some(enum_type) = &param.enum_type {
                    self.require_enum(&function.name, enum_type)?;
                }
            }
        }
        Ok(())
    }

    fn validate_members(
        &self,
        owner: &str,
        attributes: &[Attribute],
        associations: &[Association],
    ) -> Result<(), MetadataError> {
        for attribute in attributes {
            match &attribute.kind {
                AttributeKind::Primitive { .. } => {}
                AttributeKind::Enum { enum_type } => self.require_enum(owner, enum_type)?,
                AttributeKind::Complex { complex_type, .. } => {
                    self.require_complex(owner, complex_type)?
                }
                AttributeKind::ElementCollection { element, .. } => {
                    if let CollectionElement::Complex { complex_type } = element {
                        self.require_complex(owner, complex_type)?;
                    }
                }
            }
        }
        for association in associations {
            if self.entity_type(&association.target).is_none() {
                return Err(MetadataError::UnknownReference {
                    owner: owner.to_string(),
                    kind: "entity type",
                    reference: association.target.clone(),
                });
            }
        }
        Ok(())
    }

    fn require_enum(&self, owner: &str, name: &str) -> Result<(), MetadataError> {
        match self.enum_type(name) {
            Some(_) => Ok(()),
            None => Err(MetadataError::UnknownReference {
                owner: owner.to_string(),
                kind: "enum type",
                reference: name.to_string(),
            }),
        }
    }

    fn require_complex(&self, owner: &str, name: &str) -> Result<(), MetadataError> {
        match self.complex_type(name) {
            Some(_) => Ok(()),
            None => Err(MetadataError::UnknownReference {
                owner: owner.to_string(),
                kind: "complex type",
                reference: name.to_string(),
            }),
        }
    }

    /// Matches `name` exactly, or with the schema namespace stripped off.
    fn matches(&self, declared: &str, name: &str) -> bool {
        if declared == name {
            return true;
        }
        match &self.namespace {
            Some(ns) => name
                .strip_prefix(ns.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .is_some_and(|local| local == declared),
            None => false,
        }
    }
}

impl MetadataProvider for Schema {
    fn entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|e| self.matches(&e.name, name))
    }

    fn complex_type(&self, name: &str) -> Option<&ComplexType> {
        self.complex_types.iter().find(|c| self.matches(&c.name, name))
    }

    fn enum_type(&self, name: &str) -> Option<&EnumType> {
        self.enum_types.iter().find(|e| self.matches(&e.name, name))
    }

    fn function(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.functions.iter().find(|f| self.matches(&f.name, name))
    }
}
