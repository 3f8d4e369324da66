use super::{Association, Constraint};
use crate::schema::{Name, TypeId};
use crate::stmt::{Type, Value};
use std::fmt;

/// One mapped member of a class: a column, a foreign reference, or an
/// association.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// The logical (object model) name
    pub name: String,

    /// Column name in the owning mapping's table
    pub column: String,

    /// Name of the private field backing the property in generated code
    pub storage: String,

    pub kind: PropertyKind,

    /// Value type. Associations report the type of the target's key once
    /// resolved, and `Unknown` until then.
    pub ty: Type,

    pub nullable: bool,

    pub unique: bool,

    pub indexed: bool,

    /// True if the database assigns the value on insert
    pub auto_increment: bool,

    /// Maximum length for string and byte columns
    pub max_length: Option<usize>,

    /// Declared default. When unset, the type's default applies.
    pub default: Option<Value>,

    pub constraints: Vec<Constraint>,

    /// Rows referencing this identity are removed by the database when the
    /// referenced row is deleted.
    pub cascade_delete: bool,

    /// SQL expression for computed columns. Computed columns are never
    /// written.
    pub computed: Option<String>,

    /// The type whose mapping owns the property
    pub owner: TypeId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    /// Caller-assigned key column
    Identity,

    /// Database-assigned key column added by surrogate key assignment
    AutoIdentity,

    /// Scalar column
    Reference,

    /// Single foreign reference stored as a column on the owner's table
    Map(Association),

    /// Single association stored in an association table
    ManyToOneSingle(Association),

    /// List association stored in an association table
    ManyToOneList(Association),

    /// List association stored in a join table shared by both sides
    ManyToMany(Association),
}

impl Property {
    fn new(name: &str, kind: PropertyKind, ty: Type) -> Self {
        Self {
            name: name.to_string(),
            column: name.to_string(),
            storage: Name::new(name).storage_name(),
            kind,
            ty,
            nullable: false,
            unique: false,
            indexed: false,
            auto_increment: false,
            max_length: None,
            default: None,
            constraints: vec![],
            cascade_delete: false,
            computed: None,
            owner: TypeId(usize::MAX),
        }
    }

    pub fn identity(name: &str, ty: Type) -> Self {
        let mut property = Self::new(name, PropertyKind::Identity, ty);
        property.unique = true;
        property.indexed = true;
        property
    }

    /// A generated database-assigned integer key.
    pub fn auto_identity(name: &str) -> Self {
        let mut property = Self::new(name, PropertyKind::AutoIdentity, Type::I32);
        property.unique = true;
        property.indexed = true;
        property.auto_increment = true;
        property
    }

    pub fn reference(name: &str, ty: Type) -> Self {
        Self::new(name, PropertyKind::Reference, ty)
    }

    pub fn map(name: &str, target: TypeId) -> Self {
        let mut property = Self::new(name, PropertyKind::Map(Association::new(target)), Type::Unknown);
        property.nullable = true;
        property
    }

    pub fn many_to_one(name: &str, target: TypeId) -> Self {
        Self::new(
            name,
            PropertyKind::ManyToOneSingle(Association::new(target)),
            Type::Unknown,
        )
    }

    pub fn many_to_one_list(name: &str, target: TypeId) -> Self {
        Self::new(
            name,
            PropertyKind::ManyToOneList(Association::new(target)),
            Type::Unknown,
        )
    }

    pub fn many_to_many(name: &str, target: TypeId) -> Self {
        Self::new(
            name,
            PropertyKind::ManyToMany(Association::new(target)),
            Type::Unknown,
        )
    }

    pub fn column(mut self, column: &str) -> Self {
        self.column = column.to_string();
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Marks an identity as database-assigned.
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn cascade_delete(mut self) -> Self {
        self.cascade_delete = true;
        self
    }

    pub fn computed(mut self, expr: &str) -> Self {
        self.computed = Some(expr.to_string());
        self
    }

    /// Names the join table of a many-to-many or many-to-one association.
    ///
    /// # Panics
    ///
    /// Panics if the property is not an association.
    #[track_caller]
    pub fn join_table(mut self, table: &str) -> Self {
        match self.association_mut() {
            Some(association) => association.join_table = Some(table.to_string()),
            None => panic!("`{}` is not an association", self.name),
        }
        self
    }

    pub fn is_identity(&self) -> bool {
        matches!(self.kind, PropertyKind::Identity | PropertyKind::AutoIdentity)
    }

    /// Returns `true` for keys added by surrogate key assignment.
    pub fn is_auto_identity(&self) -> bool {
        matches!(self.kind, PropertyKind::AutoIdentity)
    }

    /// Returns `true` for identities the database assigns on insert, whether
    /// generated or declared.
    pub fn is_auto_increment(&self) -> bool {
        self.is_identity() && self.auto_increment
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.kind, PropertyKind::Reference)
    }

    pub fn is_map(&self) -> bool {
        matches!(self.kind, PropertyKind::Map(_))
    }

    pub fn association(&self) -> Option<&Association> {
        match &self.kind {
            PropertyKind::Map(association)
            | PropertyKind::ManyToOneSingle(association)
            | PropertyKind::ManyToOneList(association)
            | PropertyKind::ManyToMany(association) => Some(association),
            _ => None,
        }
    }

    fn association_mut(&mut self) -> Option<&mut Association> {
        match &mut self.kind {
            PropertyKind::Map(association)
            | PropertyKind::ManyToOneSingle(association)
            | PropertyKind::ManyToOneList(association)
            | PropertyKind::ManyToMany(association) => Some(association),
            _ => None,
        }
    }

    /// The value an unassigned property holds: the declared default, else the
    /// type's default.
    pub fn default_or_type_default(&self) -> Value {
        self.default
            .clone()
            .unwrap_or_else(|| self.ty.default_value())
    }

    /// Two properties are similar when they share a name and resolved type,
    /// whatever their kind.
    pub fn is_similar(&self, other: &Property) -> bool {
        self.name == other.name
            && self.ty == other.ty
            && self.association().map(|a| a.target) == other.association().map(|a| a.target)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similarity_ignores_identity() {
        let id = Property::identity("Code", Type::String);
        let reference = Property::reference("Code", Type::String);
        assert!(id.is_similar(&reference));

        let other_type = Property::reference("Code", Type::I32);
        assert!(!id.is_similar(&other_type));
    }

    #[test]
    fn declared_auto_increment_is_not_generated() {
        let id = Property::identity("ID", Type::I64).auto_increment();
        assert!(id.is_identity());
        assert!(id.is_auto_increment());
        assert!(!id.is_auto_identity());

        let generated = Property::auto_identity("ID");
        assert!(generated.is_auto_increment());
        assert!(generated.is_auto_identity());
    }

    #[test]
    fn storage_name_is_derived() {
        assert_eq!(Property::reference("FirstName", Type::String).storage, "_first_name");
    }
}
