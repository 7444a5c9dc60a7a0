use crate::{
    compiled::TypeHint,
    context::Scope,
    error::{FilterError, Result},
};
use model::metadata::{
    association::{Association, JoinColumn},
    entity::{Attribute, AttributeKind, CollectionElement, StructuredType},
    provider::MetadataProvider,
};
use std::fmt;

/// A leaf attribute reached without crossing a relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributePath {
    /// Member names within the current table, complex attributes included
    pub elements: Vec<String>,
    /// Column in the current table, with complex-type prefixes applied
    pub column: String,
    pub hint: TypeHint,
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.elements.join("/"))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum StepKind<'a> {
    Association(&'a Association),
    ElementCollection { join_columns: &'a [JoinColumn] },
}

/// One hop from a table to a related table.
#[derive(Debug, Clone)]
pub struct NavigationStep<'a> {
    pub name: String,
    pub target: Scope<'a>,
    pub kind: StepKind<'a>,
    /// Prefix of the complex attributes crossed before the hop, applied to
    /// the source-side join columns
    pub source_prefix: String,
    /// Index of the first path segment after this hop
    pub end: usize,
}

impl NavigationStep<'_> {
    pub fn is_collection(&self) -> bool {
        match self.kind {
            StepKind::Association(association) => association.is_collection(),
            StepKind::ElementCollection { .. } => true,
        }
    }
}

/// A member path split into relationship hops and the attribute reached
/// after the last one.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    pub steps: Vec<NavigationStep<'a>>,
    /// `None` when the path ends on a relationship
    pub leaf: Option<AttributePath>,
}

pub struct AttributePathResolver<'a> {
    provider: &'a dyn MetadataProvider,
}

impl<'a> AttributePathResolver<'a> {
    pub fn new(provider: &'a dyn MetadataProvider) -> Self {
        Self { provider }
    }

    /// Resolves `names` against `scope`. Fails on the first segment that is
    /// not a member of the type it is looked up in.
    pub fn resolve(&self, scope: &Scope<'a>, names: &[String]) -> Result<Resolution<'a>> {
        if names.is_empty() {
            return Err(FilterError::StructuralError(format!(
                "empty attribute path on '{}'",
                scope.name()
            )));
        }

        let mut steps = Vec::new();
        let mut current = *scope;
        let mut owner = current.structured();
        let mut prefix = String::new();
        let mut elements: Vec<String> = Vec::new();

        for (index, name) in names.iter().enumerate() {
            let last = index + 1 == names.len();
            let Some(structured) = owner else {
                return Err(FilterError::InvalidPath {
                    path: name.clone(),
                    owner: current.name(),
                });
            };

            if let Some(attribute) = structured.attribute(name) {
                match &attribute.kind {
                    AttributeKind::Primitive { .. } | AttributeKind::Enum { .. } => {
                        if !last {
                            return Err(FilterError::InvalidPath {
                                path: names[index + 1].clone(),
                                owner: format!("{}/{}", structured.name(), name),
                            });
                        }
                        elements.push(name.clone());
                        let hint = self.hint_for(attribute)?;
                        return Ok(Resolution {
                            steps,
                            leaf: Some(AttributePath {
                                elements,
                                column: format!("{prefix}{}", attribute.column()),
                                hint,
                            }),
                        });
                    }
                    AttributeKind::Complex {
                        complex_type,
                        column_prefix,
                    } => {
                        if last {
                            return Err(FilterError::NotSupported(format!(
                                "complex attribute '{name}' used as a value"
                            )));
                        }
                        let complex = self.provider.complex_type(complex_type).ok_or_else(|| {
                            FilterError::InvalidPath {
                                path: complex_type.clone(),
                                owner: structured.name().to_string(),
                            }
                        })?;
                        prefix.push_str(column_prefix.as_deref().unwrap_or_default());
                        elements.push(name.clone());
                        owner = Some(StructuredType::Complex(complex));
                    }
                    AttributeKind::ElementCollection {
                        table,
                        join_columns,
                        element,
                    } => {
                        let target = match element {
                            CollectionElement::Primitive { column, data_type } => {
                                Scope::PrimitiveCollection {
                                    table,
                                    column,
                                    data_type: *data_type,
                                }
                            }
                            CollectionElement::Complex { complex_type } => {
                                let element =
                                    self.provider.complex_type(complex_type).ok_or_else(|| {
                                        FilterError::InvalidPath {
                                            path: complex_type.clone(),
                                            owner: structured.name().to_string(),
                                        }
                                    })?;
                                Scope::ComplexCollection { table, element }
                            }
                        };
                        steps.push(NavigationStep {
                            name: name.clone(),
                            target,
                            kind: StepKind::ElementCollection { join_columns },
                            source_prefix: std::mem::take(&mut prefix),
                            end: index + 1,
                        });
                        current = target;
                        owner = target.structured();
                        elements.clear();
                    }
                }
            } else if let Some(association) = structured.association(name) {
                let entity = self.provider.entity_type(&association.target).ok_or_else(|| {
                    FilterError::InvalidPath {
                        path: association.target.clone(),
                        owner: structured.name().to_string(),
                    }
                })?;
                let target = Scope::Entity(entity);
                steps.push(NavigationStep {
                    name: name.clone(),
                    target,
                    kind: StepKind::Association(association),
                    source_prefix: std::mem::take(&mut prefix),
                    end: index + 1,
                });
                current = target;
                owner = target.structured();
                elements.clear();
            } else {
                return Err(FilterError::InvalidPath {
                    path: name.clone(),
                    owner: structured.name().to_string(),
                });
            }
        }

        Ok(Resolution { steps, leaf: None })
    }

    /// Hint for the element of a primitive element collection.
    pub fn element_path(&self, scope: &Scope<'a>) -> Option<AttributePath> {
        match scope {
            Scope::PrimitiveCollection {
                column, data_type, ..
            } => Some(AttributePath {
                elements: Vec::new(),
                column: column.to_string(),
                hint: TypeHint::of(*data_type),
            }),
            _ => None,
        }
    }

    fn hint_for(&self, attribute: &Attribute) -> Result<TypeHint> {
        let mut hint = TypeHint::from_attribute(attribute).ok_or_else(|| {
            FilterError::StructuralError(format!("attribute '{}' has no scalar type", attribute.name))
        })?;
        // Canonical enum name so literals of the same type compare equal
        if let Some(enum_type) = &hint.enum_type {
            if let Some(declared) = self.provider.enum_type(enum_type) {
                hint.enum_type = Some(declared.name.clone());
            }
        }
        Ok(hint)
    }
}
