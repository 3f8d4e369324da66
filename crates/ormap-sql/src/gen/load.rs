use super::{key_param, owner_row, OWNER};
use crate::serializer::{Comma, Ident, Joins, TableName, ToSql};
use crate::{Query, Serializer};
use ormap_core::{
    schema::{Mapping, Property, PropertyKind},
    Error, MappingSource, Result,
};

/// Selects the targets of one association of an owner object.
///
/// Map targets are found through the foreign key on the owner's row, the
/// other associations through their join table.
pub(super) fn load(source: &MappingSource, owner: &Mapping, property: &Property) -> Result<Query> {
    let target = source.association_target(owner, property)?;
    let Some(association) = property.association() else {
        return Err(anomaly(source, owner, property, "not an association"));
    };

    let chain = source.chain(association.target).map_err(|err| {
        err.context(anomaly(
            source,
            owner,
            property,
            "association target is not a concrete type",
        ))
    })?;

    let joins = Joins::new(chain);
    let columns: Vec<_> = joins
        .nodes()
        .iter()
        .flat_map(|node| {
            let mapping = chain.mapping(*node);
            let table = TableName::of(mapping);
            mapping
                .identities
                .iter()
                .chain(&mapping.references)
                .map(move |property| table.column(&property.column))
        })
        .collect();

    let key_table = TableName::of(target.mapping);
    let mut serializer = Serializer::new();

    match &property.kind {
        PropertyKind::Map(_) => {
            let owner_table = TableName::of(owner);
            let foreign_keys = source.map_columns(owner, property)?;
            let owner_key = owner_row(source, owner, property)?;

            serializer.statement(|f| {
                fmt!(f, "SELECT " Comma(columns) " FROM " joins " INNER JOIN " owner_table " AS [owner] ON ");

                let mut s = "";
                for foreign_key in &foreign_keys {
                    let target_column = key_table.column(&foreign_key.identity.column);
                    fmt!(f, s "[owner]." Ident(&foreign_key.column) " = " target_column);
                    s = " AND ";
                }

                fmt!(f, " WHERE ");

                let mut s = "";
                for key in &owner_key {
                    fmt!(f, s "[owner]." Ident(&key.column) " = " key_param(key, OWNER));
                    s = " AND ";
                }
            });
        }
        PropertyKind::ManyToOneSingle(_)
        | PropertyKind::ManyToOneList(_)
        | PropertyKind::ManyToMany(_) => {
            let join = source.join_table(owner, property)?;
            let join_table = TableName {
                schema: &join.schema,
                name: &join.name,
            };

            serializer.statement(|f| {
                fmt!(f, "SELECT " Comma(columns) " FROM " joins " INNER JOIN " join_table " ON ");

                let mut s = "";
                for key in &join.target {
                    let join_column = join_table.column(&key.column);
                    let target_column = key_table.column(&key.identity.column);
                    fmt!(f, s join_column " = " target_column);
                    s = " AND ";
                }

                fmt!(f, " WHERE ");

                let mut s = "";
                for key in &join.owner {
                    let join_column = join_table.column(&key.column);
                    fmt!(f, s join_column " = " key_param(key, OWNER));
                    s = " AND ";
                }
            });
        }
        _ => return Err(anomaly(source, owner, property, "not an association")),
    }

    Ok(serializer.finish())
}

fn anomaly(source: &MappingSource, owner: &Mapping, property: &Property, message: &str) -> Error {
    Error::resolution_anomaly(source.type_name(owner.ty), &property.name, message)
}
