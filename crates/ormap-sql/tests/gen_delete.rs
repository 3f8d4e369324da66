mod common;
use common::*;

use ormap_core::schema::{Mapping, Property};
use ormap_core::stmt::Type;
use ormap_sql::{generate, Operation};
use pretty_assertions::assert_eq;

fn sql(queries: &[ormap_sql::Query]) -> Vec<&str> {
    queries.iter().map(|query| &query.sql[..]).collect()
}

#[test]
fn single_table_delete() {
    let model = model();
    let source = build(&model, vec![person(&model)]);

    let queries = generate(Operation::Delete, model.person, &source).unwrap();
    assert_eq!(
        sql(&queries),
        ["DELETE FROM [dbo].[Person] WHERE [dbo].[Person].[ID] = @ID;"]
    );
}

#[test]
fn hierarchy_deletes_descendant_rows_first() {
    let model = model();
    let source = hierarchy(&model);

    let queries = generate(Operation::Delete, model.manager, &source).unwrap();
    assert_eq!(
        sql(&queries),
        [
            "DELETE FROM [dbo].[Manager] WHERE [dbo].[Manager].[ID] = @ManagerID;",
            "DELETE FROM [dbo].[Employee] WHERE [dbo].[Employee].[ID] = @EmployeeID;",
            "DELETE FROM [dbo].[Person] WHERE [dbo].[Person].[ID] = @PersonID;",
        ]
    );
}

#[test]
fn cascading_keys_delete_ancestor_rows_first() {
    let model = model();
    let person = Mapping::new(model.person, "Person")
        .property(id().cascade_delete())
        .property(Property::reference("Name", Type::String));
    let employee = Mapping::new(model.employee, "Employee")
        .property(id())
        .property(Property::reference("Salary", Type::F64));
    let source = build(&model, vec![person, employee]);

    let queries = generate(Operation::Delete, model.employee, &source).unwrap();
    assert_eq!(
        sql(&queries),
        [
            "DELETE FROM [dbo].[Person] WHERE [dbo].[Person].[ID] = @PersonID;",
            "DELETE FROM [dbo].[Employee] WHERE [dbo].[Employee].[ID] = @EmployeeID;",
        ]
    );
}

#[test]
fn declared_order_overrides_hierarchy_depth() {
    let model = model();
    let person = person(&model).order(1);
    let source = build(&model, vec![person, employee(&model)]);

    let queries = generate(Operation::Delete, model.employee, &source).unwrap();
    assert_eq!(
        sql(&queries),
        [
            "DELETE FROM [dbo].[Person] WHERE [dbo].[Person].[ID] = @PersonID;",
            "DELETE FROM [dbo].[Employee] WHERE [dbo].[Employee].[ID] = @EmployeeID;",
        ]
    );
}

#[test]
fn redeclared_key_still_deletes_descendant_row() {
    let model = model();
    let person = Mapping::new(model.person, "Person")
        .property(Property::identity("ID", Type::I32))
        .property(Property::reference("Name", Type::String));
    let employee = Mapping::new(model.employee, "Employee")
        .property(Property::identity("ID", Type::I32))
        .property(Property::reference("Salary", Type::F64));
    let source = build(&model, vec![person, employee]);

    let queries = generate(Operation::Delete, model.employee, &source).unwrap();
    assert_eq!(
        sql(&queries),
        [
            "DELETE FROM [dbo].[Employee] WHERE [dbo].[Employee].[ID] = @EmployeeID;",
            "DELETE FROM [dbo].[Person] WHERE [dbo].[Person].[ID] = @PersonID;",
        ]
    );
}
