use super::insert::{self, ColumnValue};
use super::Names;
use crate::serializer::{Comma, Formatter, Ident, Params, TableName, ToSql};
use crate::{Query, Serializer};
use ormap_core::schema::{Chain, Property};

/// Rows accepted by one multi-row `VALUES` clause
const MAX_ROWS: usize = 1000;

/// Parameters accepted by one request
const MAX_PARAMS: usize = 2100;

/// Inserts `rows` objects, row `n` reading instance `n`.
///
/// Rows are split into batches that respect the server's row and parameter
/// limits; every batch is one query.
pub(super) fn insert_bulk(chain: Chain<'_>, rows: usize) -> Vec<Query> {
    if rows == 0 {
        return vec![];
    }

    if chain.nodes().len() == 1 {
        single_table(chain, rows)
    } else {
        multi_table(chain, rows)
    }
}

/// One multi-row insert per batch, returning assigned keys with `OUTPUT`.
fn single_table(chain: Chain<'_>, rows: usize) -> Vec<Query> {
    let root = chain.root();
    let mapping = chain.mapping(root);
    let table = TableName::of(mapping);

    let outputs: Vec<&Property> = mapping
        .identities
        .iter()
        .filter(|identity| identity.is_auto_increment())
        .collect();

    let width = param_count(chain, root);
    let batch = rows_per_batch(width);

    batches(rows, batch)
        .map(|(start, end)| {
            let mut serializer = Serializer::new();

            if width == 0 {
                for _ in start..end {
                    serializer.statement(|f| {
                        fmt!(f, "INSERT INTO " table);
                        output(f, &outputs);
                        fmt!(f, " DEFAULT VALUES");
                    });
                }
            } else {
                serializer.statement(|f| {
                    let columns = insert::columns(chain, Names::row(chain, start), root);
                    let idents = Comma(columns.iter().map(|column| Ident(&column.name)));

                    fmt!(f, "INSERT INTO " table " (" idents ")");
                    output(f, &outputs);
                    fmt!(f, " VALUES ");

                    let mut s = "";
                    for row in start..end {
                        let values = insert::columns(chain, Names::row(chain, row), root)
                            .into_iter()
                            .map(|column| column.value);

                        fmt!(f, s "(" Comma(values) ")");
                        s = ", ";
                    }
                });
            }

            serializer.finish()
        })
        .collect()
}

/// The single-object batch repeated per row. Temporaries are declared once
/// per batch and reused by every row.
fn multi_table(chain: Chain<'_>, rows: usize) -> Vec<Query> {
    let width = chain
        .nodes()
        .into_iter()
        .map(|node| param_count(chain, node))
        .sum();
    let batch = rows_per_batch(width);

    batches(rows, batch)
        .map(|(start, end)| {
            let mut serializer = Serializer::new();
            insert::declare_temps(&mut serializer, chain, Names::new(chain));

            for row in start..end {
                let names = Names::row(chain, row);
                insert::insert_rows(&mut serializer, chain, names);
                insert::select_keys(&mut serializer, chain, names);
            }

            serializer.finish()
        })
        .collect()
}

fn output<P: Params>(f: &mut Formatter<'_, P>, outputs: &[&Property]) {
    if outputs.is_empty() {
        return;
    }

    fmt!(f, " OUTPUT ");

    let mut s = "";
    for identity in outputs {
        fmt!(f, s "INSERTED." Ident(&identity.column));
        s = ", ";
    }
}

fn param_count(chain: Chain<'_>, node: ormap_core::schema::NodeId) -> usize {
    insert::columns(chain, Names::new(chain), node)
        .iter()
        .filter(|column| matches!(column.value, ColumnValue::Param(_)))
        .count()
}

fn rows_per_batch(params_per_row: usize) -> usize {
    ((MAX_PARAMS - 1) / params_per_row.max(1)).clamp(1, MAX_ROWS)
}

/// `[start, end)` row ranges of at most `batch` rows.
fn batches(rows: usize, batch: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..rows)
        .step_by(batch)
        .map(move |start| (start, (start + batch).min(rows)))
}
