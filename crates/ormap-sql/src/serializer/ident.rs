use super::{Formatter, Params, ToSql};

use ormap_core::{schema::Mapping, stmt::ColumnRef};

/// A bracket-quoted identifier. A closing bracket inside the name is
/// doubled.
pub(crate) struct Ident<S>(pub(crate) S);

/// `[schema].[table]`
#[derive(Clone, Copy)]
pub(crate) struct TableName<'a> {
    pub(crate) schema: &'a str,
    pub(crate) name: &'a str,
}

/// `[schema].[table].[column]`
#[derive(Clone, Copy)]
pub(crate) struct ColumnName<'a> {
    pub(crate) table: TableName<'a>,
    pub(crate) column: &'a str,
}

impl<'a> TableName<'a> {
    pub(crate) fn of(mapping: &'a Mapping) -> Self {
        Self {
            schema: &mapping.schema,
            name: &mapping.table,
        }
    }

    pub(crate) fn column(self, column: &'a str) -> ColumnName<'a> {
        ColumnName {
            table: self,
            column,
        }
    }
}

impl<'a> From<&'a ColumnRef> for ColumnName<'a> {
    fn from(column: &'a ColumnRef) -> Self {
        TableName {
            schema: &column.schema,
            name: &column.table,
        }
        .column(&column.column)
    }
}

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push('[');
        for ch in self.0.as_ref().chars() {
            if ch == ']' {
                f.dst.push(']');
            }
            f.dst.push(ch);
        }
        f.dst.push(']');
    }
}

impl ToSql for TableName<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, Ident(self.schema) "." Ident(self.name));
    }
}

impl ToSql for ColumnName<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, self.table "." Ident(self.column));
    }
}
