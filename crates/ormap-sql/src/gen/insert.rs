use super::Names;
use crate::serializer::{Comma, Formatter, Ident, Params, SqlType, TableName, ToSql, Variable};
use crate::{Param, Query, Serializer};
use ormap_core::schema::{db::ancestor_key_column, Chain, NodeId};

/// A column written by an insert.
pub(super) struct Column {
    pub(super) name: String,
    pub(super) value: ColumnValue,
}

pub(super) enum ColumnValue {
    Param(Param),

    /// An ancestor key captured earlier in the batch
    Temp(String),
}

/// Inserts one object, ancestors first, as a single batch.
///
/// Keys flow from ancestor rows to descendant rows through batch
/// temporaries. Database-assigned keys of the hierarchy roots are selected
/// back once every row is written.
pub(super) fn insert(chain: Chain<'_>) -> Query {
    let mut serializer = Serializer::new();
    let names = Names::new(chain);

    declare_temps(&mut serializer, chain, names);
    insert_rows(&mut serializer, chain, names);
    select_keys(&mut serializer, chain, names);

    serializer.finish()
}

/// Declares a temporary for every auto identity, and for every assigned
/// identity an ancestor row passes down.
pub(super) fn declare_temps(serializer: &mut Serializer, chain: Chain<'_>, names: Names<'_>) {
    for node in chain.nodes() {
        let mapping = chain.mapping(node);

        for identity in &mapping.identities {
            if !identity.is_auto_increment() && node == chain.root() {
                continue;
            }

            let temp = Variable(names.temp(mapping, identity));
            let ty = SqlType {
                ty: &identity.ty,
                max_length: identity.max_length,
            };

            serializer.statement(|f| fmt!(f, "DECLARE " temp " " ty));
        }
    }
}

/// Writes the chain's rows, ancestors before the rows referencing them.
pub(super) fn insert_rows(serializer: &mut Serializer, chain: Chain<'_>, names: Names<'_>) {
    for node in chain.tree().post_order() {
        let mapping = chain.mapping(node);
        let table = TableName::of(mapping);
        let columns = columns(chain, names, node);

        serializer.statement(|f| {
            fmt!(f, "INSERT INTO " table);
            values(f, columns);
        });

        for identity in &mapping.identities {
            let temp = Variable(names.temp(mapping, identity));

            if identity.is_auto_increment() {
                serializer.statement(|f| fmt!(f, "SET " temp " = SCOPE_IDENTITY()"));
            } else if node != chain.root() {
                let param = names.param(mapping, identity);
                serializer.statement(|f| fmt!(f, "SET " temp " = " param));
            }
        }
    }
}

/// Selects the database-assigned keys of the hierarchy roots.
pub(super) fn select_keys(serializer: &mut Serializer, chain: Chain<'_>, names: Names<'_>) {
    let keys: Vec<_> = chain
        .nodes()
        .into_iter()
        .filter(|node| chain.children(*node).is_empty())
        .flat_map(|node| {
            let mapping = chain.mapping(node);
            mapping
                .identities
                .iter()
                .filter(|identity| identity.is_auto_increment())
                .map(move |identity| {
                    (
                        Variable(names.temp(mapping, identity)),
                        Ident(names.qualified(mapping, identity)),
                    )
                })
        })
        .collect();

    if keys.is_empty() {
        return;
    }

    serializer.statement(|f| {
        fmt!(f, "SELECT ");

        let mut s = "";
        for (temp, alias) in keys {
            fmt!(f, s temp " AS " alias);
            s = ", ";
        }
    });
}

/// The columns a node's insert writes: scalar references, assigned
/// identities, then the keys of its immediate ancestors.
pub(super) fn columns(chain: Chain<'_>, names: Names<'_>, node: NodeId) -> Vec<Column> {
    let mapping = chain.mapping(node);
    let mut columns = vec![];

    for reference in &mapping.references {
        if reference.computed.is_some() {
            continue;
        }

        columns.push(Column {
            name: reference.column.clone(),
            value: ColumnValue::Param(names.param(mapping, reference)),
        });
    }

    for identity in &mapping.identities {
        if identity.is_auto_increment() {
            continue;
        }

        columns.push(Column {
            name: identity.column.clone(),
            value: ColumnValue::Param(names.param(mapping, identity)),
        });
    }

    for child in chain.children(node) {
        let ancestor = chain.mapping(*child);

        for identity in &ancestor.identities {
            columns.push(Column {
                name: ancestor_key_column(ancestor, identity),
                value: ColumnValue::Temp(names.temp(ancestor, identity)),
            });
        }
    }

    columns
}

/// ` ([a], [b]) VALUES (@a, @b)`, or ` DEFAULT VALUES` without columns.
fn values<P: Params>(f: &mut Formatter<'_, P>, columns: Vec<Column>) {
    if columns.is_empty() {
        fmt!(f, " DEFAULT VALUES");
        return;
    }

    let (idents, values): (Vec<_>, Vec<_>) = columns
        .into_iter()
        .map(|column| (Ident(column.name), column.value))
        .unzip();

    fmt!(f, " (" Comma(idents) ") VALUES (" Comma(values) ")");
}

impl ToSql for ColumnValue {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            ColumnValue::Param(param) => param.to_sql(f),
            ColumnValue::Temp(temp) => Variable(temp).to_sql(f),
        }
    }
}
