pub mod app;
pub use app::{TypeDef, TypeId, TypeKind, TypeRegistry};

mod builder;
pub use builder::{Builder, Declaration};

pub mod db;

pub mod mapping;
pub use mapping::{Association, Constraint, Mapping, Property, PropertyKind};

mod name;
pub use name::Name;

mod resolve;
pub use resolve::{find_concrete_types, resolve};

mod source;
pub use source::{Chain, DataSource, MappingSource};

mod tree;
pub use tree::{NodeId, TypeTree};

mod verify;
