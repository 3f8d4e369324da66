#[macro_use]
mod fmt;
pub(crate) use fmt::ToSql;

mod delim;
pub(crate) use delim::Comma;

mod ident;
pub(crate) use ident::{ColumnName, Ident, TableName};

mod operator;

mod params;
pub use params::{Params, Placeholder};
pub(crate) use params::Variable;

mod select;
pub use select::render;
pub(crate) use select::Joins;

mod ty;
pub(crate) use ty::SqlType;

use crate::{Param, Query};

/// Accumulates the statements of one batch and the parameters they
/// reference.
#[derive(Debug, Default)]
pub struct Serializer {
    sql: String,

    params: Vec<Param>,
}

pub(crate) struct Formatter<'a, T> {
    /// Where to write the serialized SQL
    pub(crate) dst: &'a mut String,

    /// Where to store parameters
    pub(crate) params: &'a mut T,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one statement, terminated by `;`. Statements of a batch are
    /// separated by a newline.
    pub(crate) fn statement(&mut self, f: impl FnOnce(&mut Formatter<'_, Vec<Param>>)) {
        if !self.sql.is_empty() {
            self.sql.push('\n');
        }

        let mut fmt = Formatter {
            dst: &mut self.sql,
            params: &mut self.params,
        };

        f(&mut fmt);

        self.sql.push(';');
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn finish(self) -> Query {
        Query {
            sql: self.sql,
            params: self.params,
        }
    }
}
