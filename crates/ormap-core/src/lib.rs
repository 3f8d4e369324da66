mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::{MappingSource, TypeRegistry};

pub mod stmt;

/// A Result type alias that uses ormap's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
