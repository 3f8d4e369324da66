#[macro_use]
pub mod serializer;
pub use serializer::{render, Params, Placeholder, Serializer};

pub mod gen;
pub use gen::{associations, generate, generate_association, Operation};

mod query;
pub use query::{BoundParam, Param, ParamKind, ParamSource, Query};
