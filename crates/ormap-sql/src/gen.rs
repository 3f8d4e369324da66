mod delete;
mod insert;
mod insert_bulk;
mod join;
mod load;
mod names;
mod update;

use names::Names;

use crate::{Param, Query};
use ormap_core::{
    schema::{
        db::{ancestor_key_column, KeyColumn},
        Chain, Mapping, Property, TypeId,
    },
    Error, MappingSource, Result,
};
use tracing::debug;

/// The statement kinds generated for a concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Inserts one object, reading back database-assigned keys
    Insert,

    /// Inserts the given number of objects
    InsertBulk(usize),

    Update,

    Delete,

    /// Loads the targets of every association
    LoadProperties,

    /// Links an owner to one association target
    JoinSave,

    /// Unlinks an owner from one association target
    JoinDelete,
}

/// Generates the statements of `op` for the concrete type `ty`.
///
/// Association operations yield one query per association of the chain, in
/// the order of [`associations`]. Statements bind object values through
/// [`Query::bind`]: instance `0` is the object itself. Bulk inserts read row
/// `n` from instance `n`; association statements read the target from
/// instance `1`.
pub fn generate(op: Operation, ty: TypeId, source: &MappingSource) -> Result<Vec<Query>> {
    let chain = source.chain(ty)?;

    let queries = match op {
        Operation::Insert => vec![insert::insert(chain)],
        Operation::InsertBulk(rows) => insert_bulk::insert_bulk(chain, rows),
        Operation::Update => update::update(chain)?,
        Operation::Delete => delete::delete(chain),
        Operation::LoadProperties | Operation::JoinSave | Operation::JoinDelete => {
            associations(chain)
                .into_iter()
                .map(|(owner, property)| association(op, source, owner, property))
                .collect::<Result<_>>()?
        }
    };

    debug!(
        source = source.name(),
        ty = source.type_name(ty),
        ?op,
        statements = queries.len(),
        "generated statements"
    );

    Ok(queries)
}

/// Generates the statement of an association operation for one named
/// association of `ty`.
pub fn generate_association(
    op: Operation,
    ty: TypeId,
    property: &str,
    source: &MappingSource,
) -> Result<Query> {
    let chain = source.chain(ty)?;

    let Some((owner, property)) = associations(chain)
        .into_iter()
        .find(|(_, candidate)| candidate.name == property)
    else {
        return Err(Error::configuration(format!(
            "type `{}` has no association `{}` in data source `{}`",
            source.type_name(ty),
            property,
            source.name()
        )));
    };

    association(op, source, owner, property)
}

/// The associations of a chain with their declaring mappings, the requested
/// type's own first.
pub fn associations<'a>(chain: Chain<'a>) -> Vec<(&'a Mapping, &'a Property)> {
    chain
        .mappings()
        .flat_map(|mapping| mapping.associations().map(move |property| (mapping, property)))
        .collect()
}

fn association(
    op: Operation,
    source: &MappingSource,
    owner: &Mapping,
    property: &Property,
) -> Result<Query> {
    match op {
        Operation::LoadProperties => load::load(source, owner, property),
        Operation::JoinSave => join::save(source, owner, property),
        Operation::JoinDelete => join::delete(source, owner, property),
        _ => Err(Error::configuration(format!(
            "{op:?} is not an association operation"
        ))),
    }
}

/// Instance an association statement reads the owner from
const OWNER: usize = 0;

/// Instance an association statement reads the target from
const TARGET: usize = 1;

/// Columns of the owner's table identifying one owner row: the owner's own
/// identities, else the key of an immediate identity-bearing ancestor.
fn owner_row<'a>(
    source: &'a MappingSource,
    owner: &'a Mapping,
    property: &Property,
) -> Result<Vec<KeyColumn<'a>>> {
    if owner.has_identity() {
        return Ok(owner
            .identities
            .iter()
            .map(|identity| KeyColumn {
                column: identity.column.clone(),
                identity,
            })
            .collect());
    }

    let ancestor = source.node(owner.ty).and_then(|(tree, node)| {
        tree.children(node)
            .iter()
            .filter_map(|child| source.mapping(tree.ty(*child)))
            .find(|mapping| mapping.has_identity())
    });

    let Some(ancestor) = ancestor else {
        return Err(Error::resolution_anomaly(
            source.type_name(owner.ty),
            &property.name,
            "owner rows have no key",
        ));
    };

    Ok(ancestor
        .identities
        .iter()
        .map(|identity| KeyColumn {
            column: ancestor_key_column(ancestor, identity),
            identity,
        })
        .collect())
}

/// A parameter named after a key column, bound to the identity it stores.
fn key_param(column: &KeyColumn<'_>, instance: usize) -> Param {
    Param::property(column.column.clone(), column.identity, instance)
}
