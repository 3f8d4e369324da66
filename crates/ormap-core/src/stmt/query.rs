use super::{ColumnRef, Expression, Operator};
use crate::schema::TypeId;

/// A query over the objects of one type, independent of any data source.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectQuery {
    /// The queried type
    pub ty: TypeId,

    /// Predicate over the queried object
    pub filter: Option<Expression>,

    pub order_by: Vec<OrderBy>,

    /// Rows to skip; zero skips nothing
    pub skip: u64,

    /// Rows to return; zero returns all
    pub take: u64,

    /// Properties to select; empty selects every column of the chain
    pub projection: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// Member of the queried object
    pub expr: Expression,

    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// An object query specialized to one data source.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryData {
    /// The data source name
    pub source: String,

    pub ty: TypeId,

    /// Columns to select
    pub projection: Vec<ColumnRef>,

    /// The optimized predicate. `None` selects every row.
    pub filter: Option<Operator>,

    pub order_by: Vec<(ColumnRef, Direction)>,

    pub skip: u64,

    pub take: u64,
}

impl ObjectQuery {
    pub fn new(ty: TypeId) -> Self {
        Self {
            ty,
            filter: None,
            order_by: vec![],
            skip: 0,
            take: 0,
            projection: vec![],
        }
    }

    pub fn filter(mut self, filter: impl Into<Expression>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn order_by(mut self, property: &str, direction: Direction) -> Self {
        self.order_by.push(OrderBy {
            expr: Expression::member(property),
            direction,
        });
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    pub fn take(mut self, take: u64) -> Self {
        self.take = take;
        self
    }

    pub fn select<'a>(mut self, properties: impl IntoIterator<Item = &'a str>) -> Self {
        self.projection
            .extend(properties.into_iter().map(String::from));
        self
    }
}

impl Direction {
    pub fn is_desc(self) -> bool {
        matches!(self, Self::Desc)
    }
}

impl QueryData {
    /// Returns `true` if the predicate rejects every row.
    pub fn is_always_false(&self) -> bool {
        self.filter
            .as_ref()
            .and_then(Operator::as_bool_constant)
            == Some(false)
    }
}
