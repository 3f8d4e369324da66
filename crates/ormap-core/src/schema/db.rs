mod column;
pub use column::{Column, ForeignKey};

mod join;
pub use join::{ancestor_key_column, JoinTable, Key, KeyColumn};

mod table;
pub use table::Table;

use super::{Mapping, MappingSource, Property};
use crate::Result;

impl MappingSource {
    /// Describes the tables the source's mappings read and write, join
    /// tables included.
    ///
    /// The descriptors are read-only; nothing here issues DDL.
    pub fn tables(&self) -> Result<Vec<Table>> {
        let mut tables: Vec<Table> = vec![];

        for mapping in self.mappings() {
            tables.push(self.mapping_table(mapping)?);

            for property in mapping.many_to_one.iter().chain(&mapping.many_to_many) {
                let join = self.join_table(mapping, property)?;

                if tables
                    .iter()
                    .any(|table| table.schema == join.schema && table.name == join.name)
                {
                    continue;
                }

                tables.push(join_descriptor(&join));
            }
        }

        Ok(tables)
    }

    fn mapping_table(&self, mapping: &Mapping) -> Result<Table> {
        let mut table = Table::new(&mapping.schema, &mapping.table);

        for identity in &mapping.identities {
            let mut column = property_column(identity);
            column.identity = true;
            table.push(column);
        }

        if let Some((tree, node)) = self.node(mapping.ty) {
            for child in tree.children(node) {
                let Some(ancestor) = self.mappings.get(&tree.ty(*child)) else {
                    continue;
                };

                for identity in &ancestor.identities {
                    let mut column = Column::new(ancestor_key_column(ancestor, identity), identity.ty.clone());
                    column.unique = true;
                    column.foreign_key = Some(ForeignKey {
                        schema: ancestor.schema.clone(),
                        table: ancestor.table.clone(),
                        column: identity.column.clone(),
                        cascade_delete: identity.cascade_delete,
                    });
                    table.push(column);
                }
            }
        }

        for reference in &mapping.references {
            table.push(property_column(reference));
        }

        for map in &mapping.maps {
            let target = self.association_target(mapping, map)?;

            for key_column in self.map_columns(mapping, map)? {
                let mut column = Column::new(key_column.column, key_column.identity.ty.clone());
                column.nullable = true;
                column.foreign_key = Some(ForeignKey {
                    schema: target.mapping.schema.clone(),
                    table: target.mapping.table.clone(),
                    column: key_column.identity.column.clone(),
                    cascade_delete: map.cascade_delete,
                });
                table.push(column);
            }
        }

        Ok(table)
    }
}

fn join_descriptor(join: &JoinTable<'_>) -> Table {
    let mut table = Table::new(&join.schema, &join.name);
    table.join = true;

    let sides = [(&join.owner, &join.owner_key, true), (&join.target, &join.target_key, false)];

    for (key_columns, key, cascade_delete) in sides {
        for key_column in key_columns {
            let mut column = Column::new(key_column.column.clone(), key_column.identity.ty.clone());
            column.foreign_key = Some(ForeignKey {
                schema: key.mapping.schema.clone(),
                table: key.mapping.table.clone(),
                column: key_column.identity.column.clone(),
                cascade_delete,
            });
            table.push(column);
        }
    }

    table
}

fn property_column(property: &Property) -> Column {
    let mut column = Column::new(property.column.clone(), property.ty.clone());
    column.nullable = property.nullable;
    column.max_length = property.max_length;
    column.auto_increment = property.auto_increment;
    column.unique = property.unique;
    column.computed = property.computed.clone();
    column
}
