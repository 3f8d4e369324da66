use super::Column;

/// A database table, as seen by the mappings of one data source.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub schema: String,

    /// Name of the table
    pub name: String,

    /// The table's columns
    pub columns: Vec<Column>,

    /// True for association and join tables, which back no mapping of their
    /// own.
    pub join: bool,
}

impl Table {
    pub(crate) fn new(schema: &str, name: &str) -> Self {
        Self {
            schema: schema.to_string(),
            name: name.to_string(),
            columns: vec![],
            join: false,
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn identity_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|column| column.identity)
    }

    /// Adds a column unless one with the same name exists.
    pub(crate) fn push(&mut self, column: Column) {
        if self.column(&column.name).is_none() {
            self.columns.push(column);
        }
    }
}
