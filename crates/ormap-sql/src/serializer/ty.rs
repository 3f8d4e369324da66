use super::{Formatter, Params, ToSql};

use ormap_core::stmt::Type;

/// The T-SQL name of a type. Strings and bytes use `max_length` when known.
pub(crate) struct SqlType<'a> {
    pub(crate) ty: &'a Type,
    pub(crate) max_length: Option<usize>,
}

impl<'a> SqlType<'a> {
    pub(crate) fn new(ty: &'a Type) -> Self {
        Self {
            ty,
            max_length: None,
        }
    }
}

impl ToSql for SqlType<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let length = |f: &mut Formatter<'_, T>| match self.max_length {
            Some(max_length) => fmt!(f, "(" max_length ")"),
            None => fmt!(f, "(max)"),
        };

        match self.ty {
            Type::Bool => fmt!(f, "bit"),
            Type::I16 => fmt!(f, "smallint"),
            Type::I32 => fmt!(f, "int"),
            Type::I64 => fmt!(f, "bigint"),
            Type::F64 => fmt!(f, "float"),
            Type::Uuid => fmt!(f, "uniqueidentifier"),
            Type::String => {
                fmt!(f, "nvarchar");
                length(f);
            }
            Type::Bytes => {
                fmt!(f, "varbinary");
                length(f);
            }
            Type::List(_) | Type::Null | Type::Unknown => fmt!(f, "sql_variant"),
        }
    }
}
