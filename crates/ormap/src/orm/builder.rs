use super::{Orm, Shared};
use crate::Result;

use ormap_core::{
    schema::{self, DataSource, Declaration, Mapping, TypeRegistry},
    Error,
};
use std::sync::Arc;
use tracing::debug;

/// Configures and assembles an [`Orm`].
#[derive(Debug, Default)]
pub struct Builder {
    registry: Option<Arc<TypeRegistry>>,

    /// Data source descriptors, in declaration order
    sources: Vec<DataSource>,

    declarations: Vec<Declaration>,

    /// Schema builder
    core: schema::Builder,
}

impl Builder {
    /// Sets the registry the mapped types are declared in.
    pub fn registry(&mut self, registry: impl Into<Arc<TypeRegistry>>) -> &mut Self {
        self.registry = Some(registry.into());
        self
    }

    pub fn data_source(&mut self, source: DataSource) -> &mut Self {
        self.sources.push(source);
        self
    }

    pub fn data_sources(&mut self, sources: impl IntoIterator<Item = DataSource>) -> &mut Self {
        self.sources.extend(sources);
        self
    }

    /// Declares a mapping for the named data source.
    pub fn mapping(&mut self, source: &str, mapping: Mapping) -> &mut Self {
        self.declarations.push(Declaration {
            source: source.to_string(),
            mapping,
        });
        self
    }

    /// Schema for mappings that do not name one. Defaults to `dbo`.
    pub fn default_schema(&mut self, schema: &str) -> &mut Self {
        self.core.default_schema(schema);
        self
    }

    /// Base name of generated surrogate identities. Defaults to `ID`.
    pub fn identity_name(&mut self, name: &str) -> &mut Self {
        self.core.identity_name(name);
        self
    }

    pub fn build(&mut self) -> Result<Orm> {
        let Some(registry) = self.registry.clone() else {
            return Err(Error::configuration("no type registry configured"));
        };

        let sources = self
            .core
            .assemble(
                registry.clone(),
                &self.sources,
                std::mem::take(&mut self.declarations),
            )?
            .into_iter()
            .map(Arc::new)
            .collect::<Vec<_>>();

        debug!(sources = sources.len(), types = registry.len(), "built orm");

        Ok(Orm {
            shared: Arc::new(Shared { registry, sources }),
        })
    }
}
