use crate::metadata::{
    association::Association,
    entity::{Attribute, ComplexType, EntityType, StructuredType},
    enums::EnumType,
    function::FunctionDescriptor,
};

/// Read-only access to entity metadata and the custom function catalog.
pub trait MetadataProvider: Send + Sync {
    fn entity_type(&self, name: &str) -> Option<&EntityType>;

    fn complex_type(&self, name: &str) -> Option<&ComplexType>;

    fn enum_type(&self, name: &str) -> Option<&EnumType>;

    /// Looks up a custom function by the name used in filter expressions.
    fn function(&self, name: &str) -> Option<&FunctionDescriptor>;

    fn structured_type(&self, name: &str) -> Option<StructuredType<'_>> {
        self.entity_type(name)
            .map(StructuredType::Entity)
            .or_else(|| self.complex_type(name).map(StructuredType::Complex))
    }

    fn resolve_attribute(&self, type_name: &str, name: &str) -> Option<&Attribute> {
        self.structured_type(type_name)?.attribute(name)
    }

    fn resolve_association(&self, type_name: &str, name: &str) -> Option<&Association> {
        self.structured_type(type_name)?.association(name)
    }
}
