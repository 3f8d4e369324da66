use crate::schema::TypeId;

/// The target side of a map, many-to-one or many-to-many property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    /// The associated type. Resolved to its mapping when statements are
    /// generated.
    pub target: TypeId,

    /// Explicit join (or association) table name. When unset, the name is
    /// derived from the owner and target tables.
    pub join_table: Option<String>,
}

/// A named check constraint attached to a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub name: String,

    /// The check expression, as SQL
    pub check: String,
}

impl Association {
    pub fn new(target: TypeId) -> Self {
        Self {
            target,
            join_table: None,
        }
    }
}

impl Constraint {
    pub fn check(name: &str, check: &str) -> Self {
        Self {
            name: name.to_string(),
            check: check.to_string(),
        }
    }
}
