mod common;
use common::*;

use ormap_core::schema::Mapping;
use ormap_core::stmt::{Record, Value};
use ormap_sql::{generate, Operation};
use pretty_assertions::assert_eq;

#[test]
fn single_table_update() {
    let model = model();
    let source = build(&model, vec![person(&model)]);

    let queries = generate(Operation::Update, model.person, &source).unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(
        queries[0].sql,
        "UPDATE [dbo].[Person] SET [Name] = @Name, [Age] = @Age WHERE [dbo].[Person].[ID] = @ID;"
    );
    assert_eq!(param_names(&queries[0]), ["Name", "Age", "ID"]);
}

#[test]
fn hierarchy_update_joins_ancestor_tables() {
    let model = model();
    let source = hierarchy(&model);

    let queries = generate(Operation::Update, model.manager, &source).unwrap();
    let sql: Vec<_> = queries.iter().map(|query| &query.sql[..]).collect();

    assert_eq!(
        sql,
        [
            "UPDATE [dbo].[Person] SET [Name] = @Name, [Age] = @Age \
             WHERE [dbo].[Person].[ID] = @PersonID;",
            "UPDATE [dbo].[Employee] SET [Salary] = @Salary \
             FROM [dbo].[Employee] \
             INNER JOIN [dbo].[Person] ON [dbo].[Person].[ID] = [dbo].[Employee].[PersonID] \
             WHERE [dbo].[Employee].[ID] = @EmployeeID AND [dbo].[Person].[ID] = @PersonID;",
            "UPDATE [dbo].[Manager] SET [Level] = @Level \
             FROM [dbo].[Manager] \
             INNER JOIN [dbo].[Employee] ON [dbo].[Employee].[ID] = [dbo].[Manager].[EmployeeID] \
             INNER JOIN [dbo].[Person] ON [dbo].[Person].[ID] = [dbo].[Employee].[PersonID] \
             WHERE [dbo].[Manager].[ID] = @ManagerID AND [dbo].[Employee].[ID] = @EmployeeID \
             AND [dbo].[Person].[ID] = @PersonID;",
        ]
    );
}

#[test]
fn qualified_keys_bind_owned_values() {
    let model = model();
    let source = hierarchy(&model);

    let queries = generate(Operation::Update, model.manager, &source).unwrap();

    let mut manager = Record::new();
    manager
        .set("Level", 2)
        .set_owned(model.manager, "ID", 7)
        .set_owned(model.employee, "ID", 6)
        .set_owned(model.person, "ID", 5);

    let params = queries[2].bind(&[&manager]).unwrap();
    assert_eq!(bound(&params, "ManagerID"), &Value::I32(7));
    assert_eq!(bound(&params, "EmployeeID"), &Value::I32(6));
    assert_eq!(bound(&params, "PersonID"), &Value::I32(5));
}

#[test]
fn mapping_without_references_updates_nothing() {
    let model = model();
    let group = Mapping::new(model.group, "Group").property(id());
    let source = build(&model, vec![group]);

    let queries = generate(Operation::Update, model.group, &source).unwrap();
    assert!(queries.is_empty());
}
