use crate::schema::{Mapping, MappingSource, NodeId, Property, PropertyKind, TypeId, TypeTree};
use crate::{Error, Result};

/// The identities keying the rows of a type: those of the first
/// identity-bearing mapping in its chain.
#[derive(Debug, Clone, Copy)]
pub struct Key<'a> {
    pub mapping: &'a Mapping,

    pub identities: &'a [Property],
}

/// A column holding one identity of another mapping.
#[derive(Debug, Clone)]
pub struct KeyColumn<'a> {
    pub column: String,

    /// The identity the column stores
    pub identity: &'a Property,
}

/// The table storing a many-to-one or many-to-many association.
#[derive(Debug, Clone)]
pub struct JoinTable<'a> {
    pub schema: String,

    pub name: String,

    /// Columns holding the owner's key
    pub owner: Vec<KeyColumn<'a>>,

    /// Columns holding the target's key
    pub target: Vec<KeyColumn<'a>>,

    /// The owner side, resolved
    pub owner_key: Key<'a>,

    /// The target side, resolved
    pub target_key: Key<'a>,
}

impl MappingSource {
    /// The key of `ty`, if its chain declares any identity.
    ///
    /// Works for any mapped type of the source, including ancestors that
    /// anchor no tree of their own.
    pub fn key(&self, ty: TypeId) -> Option<Key<'_>> {
        let ty = self.resolve_alias(ty);
        let (tree, node) = self.node(ty)?;

        std::iter::once(node)
            .chain(tree.ancestors(node))
            .filter_map(|node| self.mappings.get(&tree.ty(node)))
            .find(|mapping| mapping.has_identity())
            .map(|mapping| Key {
                mapping,
                identities: &mapping.identities,
            })
    }

    /// The tree node holding `ty`, preferring the tree `ty` anchors.
    pub fn node(&self, ty: TypeId) -> Option<(&TypeTree, NodeId)> {
        if let Some(tree) = self.trees.get(&ty) {
            return Some((tree, tree.root()));
        }

        self.trees
            .values()
            .find_map(|tree| tree.find(ty).map(|node| (tree, node)))
    }

    /// Resolves the target of an association declared by `owner`.
    pub fn association_target(&self, owner: &Mapping, property: &Property) -> Result<Key<'_>> {
        let Some(association) = property.association() else {
            return Err(self.anomaly(owner, property, "not an association"));
        };

        if self.mapping(association.target).is_none() {
            return Err(self.anomaly(
                owner,
                property,
                &format!("no mapping for `{}`", self.type_name(association.target)),
            ));
        }

        self.key(association.target).ok_or_else(|| {
            self.anomaly(
                owner,
                property,
                &format!("`{}` has no identity", self.type_name(association.target)),
            )
        })
    }

    /// The key of the mapping declaring an association.
    pub fn owner_key(&self, owner: &Mapping, property: &Property) -> Result<Key<'_>> {
        self.key(owner.ty)
            .ok_or_else(|| self.anomaly(owner, property, "owner has no identity"))
    }

    /// Names the join table of a many-to-one or many-to-many property and its
    /// key columns.
    pub fn join_table<'a>(&'a self, owner: &'a Mapping, property: &'a Property) -> Result<JoinTable<'a>> {
        let target_key = self.association_target(owner, property)?;
        let owner_key = self.owner_key(owner, property)?;

        let explicit = property
            .association()
            .and_then(|association| association.join_table.clone());

        let name = match &property.kind {
            PropertyKind::ManyToMany(_) => {
                explicit.unwrap_or_else(|| format!("{}{}", owner.table, target_key.mapping.table))
            }
            PropertyKind::ManyToOneSingle(_) | PropertyKind::ManyToOneList(_) => {
                explicit.unwrap_or_else(|| format!("{}{}", owner.table, property.name))
            }
            _ => return Err(self.anomaly(owner, property, "no join table for this property")),
        };

        let owner_columns: Vec<_> = owner_key
            .identities
            .iter()
            .map(|identity| KeyColumn {
                column: format!("{}{}", owner.table, identity.column),
                identity,
            })
            .collect();

        let target_columns = target_key
            .identities
            .iter()
            .map(|identity| {
                let mut column = format!("{}{}", target_key.mapping.table, identity.column);
                if owner_columns.iter().any(|existing| existing.column == column) {
                    column = format!("{}{}", property.name, identity.column);
                }
                KeyColumn { column, identity }
            })
            .collect();

        Ok(JoinTable {
            schema: owner.schema.clone(),
            name,
            owner: owner_columns,
            target: target_columns,
            owner_key,
            target_key,
        })
    }

    /// The foreign key columns a map property adds to its owner's table.
    pub fn map_columns<'a>(&'a self, owner: &'a Mapping, property: &'a Property) -> Result<Vec<KeyColumn<'a>>> {
        if !property.is_map() {
            return Err(self.anomaly(owner, property, "not a map property"));
        }

        let target_key = self.association_target(owner, property)?;
        Ok(target_key
            .identities
            .iter()
            .map(|identity| KeyColumn {
                column: format!("{}{}", property.name, identity.column),
                identity,
            })
            .collect())
    }

    fn anomaly(&self, owner: &Mapping, property: &Property, message: &str) -> Error {
        Error::resolution_anomaly(self.type_name(owner.ty), &property.name, message)
    }
}

/// Name of the column a descendant table uses to reference an ancestor's
/// identity.
pub fn ancestor_key_column(ancestor: &Mapping, identity: &Property) -> String {
    format!("{}{}", ancestor.table, identity.column)
}
