use crate::stmt::Type;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    pub ty: Type,

    pub nullable: bool,

    /// Maximum length for string and byte columns
    pub max_length: Option<usize>,

    /// True if the column is part of the table's key
    pub identity: bool,

    /// True if the database assigns the value on insert
    pub auto_increment: bool,

    pub unique: bool,

    /// SQL expression of a computed column
    pub computed: Option<String>,

    /// Set when the column references another table's key column
    pub foreign_key: Option<ForeignKey>,
}

/// The key column a foreign key column points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub schema: String,

    pub table: String,

    pub column: String,

    /// Rows are removed when the referenced row is deleted.
    pub cascade_delete: bool,
}

impl Column {
    pub(crate) fn new(name: String, ty: Type) -> Self {
        Self {
            name,
            ty,
            nullable: false,
            max_length: None,
            identity: false,
            auto_increment: false,
            unique: false,
            computed: None,
            foreign_key: None,
        }
    }

    pub fn is_foreign_key(&self) -> bool {
        self.foreign_key.is_some()
    }
}
