use filter_syntax::ast::member::Member;
use model::{
    core::data_type::DataType,
    metadata::{
        entity::{ComplexType, EntityType, StructuredType, TableName},
        provider::MetadataProvider,
    },
};
use std::cell::Cell;

/// Rows a query context ranges over.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    Entity(&'a EntityType),
    /// Table of an element collection holding complex values
    ComplexCollection {
        table: &'a TableName,
        element: &'a ComplexType,
    },
    /// Table of an element collection holding one primitive column
    PrimitiveCollection {
        table: &'a TableName,
        column: &'a str,
        data_type: DataType,
    },
}

impl<'a> Scope<'a> {
    pub fn table(&self) -> &'a TableName {
        match self {
            Scope::Entity(entity) => &entity.table,
            Scope::ComplexCollection { table, .. } | Scope::PrimitiveCollection { table, .. } => {
                table
            }
        }
    }

    /// The type whose members can be addressed, if any.
    pub fn structured(&self) -> Option<StructuredType<'a>> {
        match self {
            Scope::Entity(entity) => Some(StructuredType::Entity(entity)),
            Scope::ComplexCollection { element, .. } => Some(StructuredType::Complex(element)),
            Scope::PrimitiveCollection { .. } => None,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Scope::Entity(entity) => entity.name.clone(),
            Scope::ComplexCollection { element, .. } => element.name.clone(),
            Scope::PrimitiveCollection { table, .. } => table.to_string(),
        }
    }
}

/// State shared by every context of one compilation.
///
/// Hands out table aliases; not meant to be shared between threads.
pub struct Session<'a> {
    provider: &'a dyn MetadataProvider,
    aliases: Cell<usize>,
}

impl<'a> Session<'a> {
    pub fn new(provider: &'a dyn MetadataProvider) -> Self {
        Self {
            provider,
            aliases: Cell::new(0),
        }
    }

    pub fn provider(&self) -> &'a dyn MetadataProvider {
        self.provider
    }

    pub fn next_alias(&self) -> String {
        let index = self.aliases.get();
        self.aliases.set(index + 1);
        format!("t{index}")
    }
}

/// How a query level was opened.
#[derive(Debug, Clone, Copy)]
pub enum Binding<'a> {
    Root,
    /// `any`/`all` with a variable naming the collection element
    Lambda(&'a str),
    /// A relationship hop made for a member path. Unprefixed members skip
    /// these levels.
    Navigation(Option<Pinned<'a>>),
}

/// The member whose navigation opened a level, and where its remaining
/// segments start.
#[derive(Debug, Clone, Copy)]
pub struct Pinned<'a> {
    pub member: &'a Member,
    pub offset: usize,
}

/// One query level: the root query or a correlated subquery.
pub struct FilterContext<'a> {
    pub session: &'a Session<'a>,
    pub scope: Scope<'a>,
    pub alias: String,
    pub parent: Option<&'a FilterContext<'a>>,
    pub binding: Binding<'a>,
}

impl<'a> FilterContext<'a> {
    pub fn root(session: &'a Session<'a>, entity: &'a EntityType) -> Self {
        Self {
            session,
            scope: Scope::Entity(entity),
            alias: session.next_alias(),
            parent: None,
            binding: Binding::Root,
        }
    }

    /// Opens a subquery level below this one.
    pub fn child<'b>(&'b self, scope: Scope<'b>, binding: Binding<'b>) -> FilterContext<'b> {
        FilterContext {
            session: self.session,
            scope,
            alias: self.session.next_alias(),
            parent: Some(self),
            binding,
        }
    }

    pub fn provider(&self) -> &'a dyn MetadataProvider {
        self.session.provider()
    }

    /// The outermost context, addressed by `$it`.
    pub fn outermost(&self) -> &FilterContext<'a> {
        let mut current = self;
        while let Some(parent) = current.parent {
            current = parent;
        }
        current
    }

    /// Nearest context (this one included) that bound `variable`.
    pub fn lambda_scope(&self, variable: &str) -> Option<&FilterContext<'a>> {
        let mut current = Some(self);
        while let Some(ctx) = current {
            if matches!(ctx.binding, Binding::Lambda(name) if name == variable) {
                return Some(ctx);
            }
            current = ctx.parent;
        }
        None
    }

    /// Context unprefixed member paths are resolved against.
    pub fn member_scope(&self) -> &FilterContext<'a> {
        let mut current = self;
        while let (Binding::Navigation(_), Some(parent)) = (current.binding, current.parent) {
            current = parent;
        }
        current
    }

    /// Level opened for `member`, with the index of its first unresolved
    /// segment.
    pub fn pinned(&self, member: &Member) -> Option<(&FilterContext<'a>, usize)> {
        let mut current = Some(self);
        while let Some(ctx) = current {
            if let Binding::Navigation(Some(pinned)) = ctx.binding {
                if std::ptr::eq(pinned.member, member) {
                    return Some((ctx, pinned.offset));
                }
            }
            current = ctx.parent;
        }
        None
    }

    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent;
        while let Some(ctx) = current {
            depth += 1;
            current = ctx.parent;
        }
        depth
    }
}
