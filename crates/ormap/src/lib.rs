mod loadable;
pub use loadable::Loadable;

pub mod orm;
pub use orm::{Builder, Orm};

pub use ormap_core::{
    err,
    schema::{self, DataSource, Mapping, Property, TypeId, TypeRegistry},
    stmt::{self, Direction, Expression, Instance, ObjectQuery, Record, Type, Value},
    Error, Result,
};

pub use ormap_sql::{BoundParam, Operation, Param, ParamKind, ParamSource, Query};
