use super::{Operator, Type};

/// A property of the queried type, named by the object query.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRef {
    pub name: String,

    /// `Unknown` until resolved against a source
    pub ty: Type,

    /// The column the property resolved to
    pub column: Option<ColumnRef>,
}

/// A fully qualified column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub schema: String,

    pub table: String,

    pub column: String,

    pub ty: Type,
}

impl PropertyRef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: Type::Unknown,
            column: None,
        }
    }
}

impl From<PropertyRef> for Operator {
    fn from(value: PropertyRef) -> Self {
        Self::Property(value)
    }
}

/// Looks up property names against the mappings of one source.
pub trait PropertyResolver {
    fn resolve_property(&self, name: &str) -> Option<ColumnRef>;
}
