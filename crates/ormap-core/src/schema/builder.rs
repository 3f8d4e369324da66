mod index;
mod merge;
mod prune;
mod reduce;
mod surrogate;

use super::{
    find_concrete_types, mapping::DEFAULT_SCHEMA, resolve, DataSource, Mapping, MappingSource,
    TypeRegistry,
};
use crate::{Error, Result};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

/// Assembles [`MappingSource`]s from mapping declarations.
#[derive(Debug)]
pub struct Builder {
    /// Base name of generated surrogate identities
    identity_name: String,

    /// Schema for mappings that do not name one
    default_schema: String,
}

/// A mapping declared for one data source.
#[derive(Debug, Clone)]
pub struct Declaration {
    /// Name of the data source the mapping belongs to
    pub source: String,

    pub mapping: Mapping,
}

/// Used to track state while one source is assembled
struct BuildSource<'a> {
    /// Build options
    builder: &'a Builder,

    /// The source as it is built
    source: MappingSource,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            identity_name: "ID".to_string(),
            default_schema: DEFAULT_SCHEMA.to_string(),
        }
    }

    pub fn identity_name(&mut self, name: &str) -> &mut Self {
        self.identity_name = name.to_string();
        self
    }

    pub fn default_schema(&mut self, schema: &str) -> &mut Self {
        self.default_schema = schema.to_string();
        self
    }

    /// Assembles one source per descriptor, ordered by descending priority.
    ///
    /// Every declaration must name a described source.
    pub fn assemble(
        &self,
        registry: Arc<TypeRegistry>,
        descriptors: &[DataSource],
        declarations: Vec<Declaration>,
    ) -> Result<Vec<MappingSource>> {
        let mut per_source: IndexMap<&str, Vec<Mapping>> = IndexMap::new();

        for descriptor in descriptors {
            if per_source.insert(&descriptor.name, vec![]).is_some() {
                return Err(Error::configuration(format!(
                    "data source `{}` described twice",
                    descriptor.name
                )));
            }
        }

        for declaration in declarations {
            let Some(mappings) = per_source.get_mut(&declaration.source[..]) else {
                return Err(Error::configuration(format!(
                    "mapping for `{}` names unknown data source `{}`",
                    registry.name(declaration.mapping.ty),
                    declaration.source
                )));
            };
            mappings.push(declaration.mapping);
        }

        let mut sources = descriptors
            .iter()
            .zip(per_source.into_values())
            .map(|(descriptor, mappings)| {
                self.build(registry.clone(), descriptor.clone(), mappings)
            })
            .collect::<Result<Vec<_>>>()?;

        sources.sort_by(|a, b| b.descriptor.priority.cmp(&a.descriptor.priority));
        Ok(sources)
    }

    /// Runs the assembly pipeline for a single source.
    pub fn build(
        &self,
        registry: Arc<TypeRegistry>,
        descriptor: DataSource,
        mappings: Vec<Mapping>,
    ) -> Result<MappingSource> {
        let mut builder = BuildSource {
            builder: self,
            source: MappingSource::new(descriptor, registry),
        };

        builder
            .add_mappings(mappings)
            .map_err(|err| err.context(builder.source_context()))?;

        builder.resolve_trees();

        let optimize = builder.source.descriptor.optimize;

        if optimize {
            builder.merge();
        }

        builder.build_indexes();

        if optimize {
            builder.reduce();
            builder.prune();
        }

        builder.assign_surrogate_keys();

        let source = builder.source;
        source
            .verify()
            .map_err(|err| err.context(crate::err!("assembling data source `{}`", source.name())))?;

        debug!(
            source = source.name(),
            mappings = source.mappings.len(),
            concrete = source.concrete.len(),
            aliases = source.aliases.len(),
            "assembled mapping source"
        );

        Ok(source)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildSource<'_> {
    fn source_context(&self) -> Error {
        crate::err!("assembling data source `{}`", self.source.name())
    }

    fn add_mappings(&mut self, mappings: Vec<Mapping>) -> Result<()> {
        for mut mapping in mappings {
            let registry = &self.source.registry;

            if !registry.contains(mapping.ty) {
                return Err(Error::configuration(format!(
                    "mapping for table `{}` names an unregistered type",
                    mapping.table
                )));
            }

            if self.source.mappings.contains_key(&mapping.ty) {
                return Err(Error::configuration(format!(
                    "type `{}` mapped twice",
                    registry.name(mapping.ty)
                )));
            }

            for property in mapping.associations() {
                let target = property.association().map(|association| association.target);
                if target.is_some_and(|target| !registry.contains(target)) {
                    return Err(Error::configuration(format!(
                        "`{}::{}` targets an unregistered type",
                        registry.name(mapping.ty),
                        property.name
                    )));
                }
            }

            if mapping.schema.is_empty() {
                mapping.schema = self.builder.default_schema.clone();
            }

            self.source.mappings.insert(mapping.ty, mapping);
        }

        debug!(
            source = self.source.name(),
            mappings = self.source.mappings.len(),
            "added mappings"
        );
        Ok(())
    }

    fn resolve_trees(&mut self) {
        let source = &mut self.source;

        for ty in source.mappings.keys() {
            let tree = resolve(&source.registry, *ty, |ty| source.mappings.contains_key(&ty));
            source.trees.insert(*ty, tree);
        }

        source.concrete = find_concrete_types(&source.trees);

        debug!(
            source = source.name(),
            trees = source.trees.len(),
            concrete = source.concrete.len(),
            "resolved type hierarchy"
        );
    }
}
