mod builder;
pub use builder::Builder;

use crate::{Operation, Query, Result};

use indexmap::IndexMap;
use ormap_core::{
    schema::{db::Table, TypeId, TypeRegistry},
    stmt::{ObjectQuery, QueryData},
    Error, MappingSource,
};
use std::sync::Arc;
use tracing::debug;

/// Shared state between all `Orm` clones.
#[derive(Debug)]
struct Shared {
    registry: Arc<TypeRegistry>,

    /// Assembled sources, highest priority first
    sources: Vec<Arc<MappingSource>>,
}

/// Handle to the assembled mapping metadata of every data source.
///
/// Cloning is cheap; clones share the same frozen metadata and may be used
/// from any thread.
#[derive(Debug, Clone)]
pub struct Orm {
    shared: Arc<Shared>,
}

impl Orm {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.shared.registry
    }

    /// Every source, highest priority first.
    pub fn sources(&self) -> impl Iterator<Item = &MappingSource> {
        self.shared.sources.iter().map(|source| &**source)
    }

    pub fn source(&self, name: &str) -> Option<&MappingSource> {
        self.sources().find(|source| source.name() == name)
    }

    /// A shared handle to one source.
    pub fn source_arc(&self, name: &str) -> Option<Arc<MappingSource>> {
        self.shared
            .sources
            .iter()
            .find(|source| source.name() == name)
            .cloned()
    }

    /// The highest priority writable source that maps `ty`.
    pub fn source_for(&self, ty: TypeId) -> Option<&MappingSource> {
        self.sources()
            .find(|source| source.descriptor().write && source.maps_type(ty))
    }

    /// Generates the statements of `op` for `ty` against one source.
    pub fn generate_queries(&self, op: Operation, ty: TypeId, source: &str) -> Result<Vec<Query>> {
        ormap_sql::generate(op, ty, self.expect_source(source)?)
    }

    /// Generates an association statement for one named association of `ty`.
    pub fn generate_association(
        &self,
        op: Operation,
        ty: TypeId,
        property: &str,
        source: &str,
    ) -> Result<Query> {
        ormap_sql::generate_association(op, ty, property, self.expect_source(source)?)
    }

    /// Translates an object query for every readable source mapping its type.
    pub fn translate(&self, query: &ObjectQuery) -> Result<IndexMap<String, QueryData>> {
        ormap_core::stmt::translate(query, self.sources())
    }

    /// Translates and renders an object query, one `SELECT` per source.
    pub fn compile(&self, query: &ObjectQuery) -> Result<IndexMap<String, Query>> {
        let translated = self.translate(query)?;
        let mut ret = IndexMap::new();

        for (name, data) in translated {
            let source = self.expect_source(&name)?;
            ret.insert(name, ormap_sql::render(&data, source)?);
        }

        debug!(
            ty = self.registry().name(query.ty),
            sources = ret.len(),
            "compiled object query"
        );

        Ok(ret)
    }

    /// Table descriptors of one source.
    pub fn tables(&self, source: &str) -> Result<Vec<Table>> {
        self.expect_source(source)?.tables()
    }

    fn expect_source(&self, name: &str) -> Result<&MappingSource> {
        self.source(name)
            .ok_or_else(|| Error::configuration(format!("unknown data source `{name}`")))
    }
}
