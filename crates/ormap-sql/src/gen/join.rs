use super::{key_param, owner_row, OWNER, TARGET};
use crate::serializer::{Comma, Formatter, Ident, Params, TableName, ToSql};
use crate::{Query, Serializer};
use ormap_core::{
    schema::{db::JoinTable, Mapping, Property, PropertyKind},
    Error, MappingSource, Result,
};

/// Links the owner (instance `0`) to a target (instance `1`).
///
/// A single many-to-one association first clears the owner's existing link.
/// Map associations set the foreign key on the owner's row.
pub(super) fn save(source: &MappingSource, owner: &Mapping, property: &Property) -> Result<Query> {
    let mut serializer = Serializer::new();

    match &property.kind {
        PropertyKind::Map(_) => {
            set_foreign_key(&mut serializer, source, owner, property, true)?;
        }
        PropertyKind::ManyToOneSingle(_) => {
            let join = source.join_table(owner, property)?;
            let table = table_name(&join);

            serializer.statement(|f| {
                fmt!(f, "DELETE FROM " table " WHERE ");
                key_predicate(f, table, &join, false);
            });

            insert_link(&mut serializer, &join);
        }
        PropertyKind::ManyToOneList(_) | PropertyKind::ManyToMany(_) => {
            let join = source.join_table(owner, property)?;
            insert_link(&mut serializer, &join);
        }
        _ => return Err(not_an_association(source, owner, property)),
    }

    Ok(serializer.finish())
}

/// Unlinks the owner (instance `0`) from a target (instance `1`).
pub(super) fn delete(
    source: &MappingSource,
    owner: &Mapping,
    property: &Property,
) -> Result<Query> {
    let mut serializer = Serializer::new();

    match &property.kind {
        PropertyKind::Map(_) => {
            set_foreign_key(&mut serializer, source, owner, property, false)?;
        }
        PropertyKind::ManyToOneSingle(_)
        | PropertyKind::ManyToOneList(_)
        | PropertyKind::ManyToMany(_) => {
            let join = source.join_table(owner, property)?;
            let table = table_name(&join);

            serializer.statement(|f| {
                fmt!(f, "DELETE FROM " table " WHERE ");
                key_predicate(f, table, &join, true);
            });
        }
        _ => return Err(not_an_association(source, owner, property)),
    }

    Ok(serializer.finish())
}

fn insert_link(serializer: &mut Serializer, join: &JoinTable<'_>) {
    let table = table_name(join);
    let keys = || {
        join.owner
            .iter()
            .map(|key| (key, OWNER))
            .chain(join.target.iter().map(|key| (key, TARGET)))
    };

    serializer.statement(|f| {
        let columns = Comma(keys().map(|(key, _)| Ident(&key.column)));
        let values = Comma(keys().map(|(key, instance)| key_param(key, instance)));

        fmt!(f, "INSERT INTO " table " (" columns ") VALUES (" values ")");
    });
}

/// Sets, or clears, the foreign key a map association stores on the
/// owner's row.
fn set_foreign_key(
    serializer: &mut Serializer,
    source: &MappingSource,
    owner: &Mapping,
    property: &Property,
    set: bool,
) -> Result<()> {
    let table = TableName::of(owner);
    let foreign_keys = source.map_columns(owner, property)?;
    let owner_key = owner_row(source, owner, property)?;

    serializer.statement(|f| {
        fmt!(f, "UPDATE " table " SET ");

        let mut s = "";
        for foreign_key in &foreign_keys {
            fmt!(f, s Ident(&foreign_key.column) " = ");

            if set {
                fmt!(f, key_param(foreign_key, TARGET));
            } else {
                fmt!(f, "NULL");
            }

            s = ", ";
        }

        fmt!(f, " WHERE ");

        let mut s = "";
        for key in &owner_key {
            let column = table.column(&key.column);
            fmt!(f, s column " = " key_param(key, OWNER));
            s = " AND ";
        }
    });

    Ok(())
}

/// Matches the owner's rows of a join table, and the target's too when
/// `target` is set.
fn key_predicate<P: Params>(
    f: &mut Formatter<'_, P>,
    table: TableName<'_>,
    join: &JoinTable<'_>,
    target: bool,
) {
    let targets = if target { &join.target[..] } else { &[] };
    let keys = join
        .owner
        .iter()
        .map(|key| (key, OWNER))
        .chain(targets.iter().map(|key| (key, TARGET)));

    let mut s = "";
    for (key, instance) in keys {
        let column = table.column(&key.column);
        fmt!(f, s column " = " key_param(key, instance));
        s = " AND ";
    }
}

fn table_name<'a>(join: &'a JoinTable<'_>) -> TableName<'a> {
    TableName {
        schema: &join.schema,
        name: &join.name,
    }
}

fn not_an_association(source: &MappingSource, owner: &Mapping, property: &Property) -> Error {
    Error::resolution_anomaly(
        source.type_name(owner.ty),
        &property.name,
        "not an association",
    )
}
