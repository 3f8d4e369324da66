mod common;
use common::*;

use ormap_core::stmt::{Record, Value};
use ormap_sql::{generate, generate_association, Operation};
use pretty_assertions::assert_eq;

fn sql(model: &Model, op: Operation, property: &str) -> String {
    let source = associations(model);
    generate_association(op, model.person, property, &source)
        .unwrap()
        .sql
}

#[test]
fn load_properties_covers_every_association() {
    let model = model();
    let source = associations(&model);

    let queries = generate(Operation::LoadProperties, model.person, &source).unwrap();
    assert_eq!(queries.len(), 3);

    let names: Vec<_> = ormap_sql::associations(source.chain(model.person).unwrap())
        .into_iter()
        .map(|(_, property)| &property.name[..])
        .collect();
    assert_eq!(names, ["Address", "Mentor", "Groups"]);
}

#[test]
fn load_map_target_through_owner_foreign_key() {
    let model = model();

    assert_eq!(
        sql(&model, Operation::LoadProperties, "Address"),
        "SELECT [dbo].[Address].[ID], [dbo].[Address].[Street] FROM [dbo].[Address] \
         INNER JOIN [dbo].[Person] AS [owner] ON [owner].[AddressID] = [dbo].[Address].[ID] \
         WHERE [owner].[ID] = @ID;"
    );
}

#[test]
fn load_many_to_many_through_join_table() {
    let model = model();

    assert_eq!(
        sql(&model, Operation::LoadProperties, "Groups"),
        "SELECT [dbo].[Group].[ID], [dbo].[Group].[Title] FROM [dbo].[Group] \
         INNER JOIN [dbo].[PersonGroup] ON [dbo].[PersonGroup].[GroupID] = [dbo].[Group].[ID] \
         WHERE [dbo].[PersonGroup].[PersonID] = @PersonID;"
    );
}

#[test]
fn load_self_reference() {
    let model = model();

    assert_eq!(
        sql(&model, Operation::LoadProperties, "Mentor"),
        "SELECT [dbo].[Person].[ID], [dbo].[Person].[Name], [dbo].[Person].[Age] FROM [dbo].[Person] \
         INNER JOIN [dbo].[PersonMentor] ON [dbo].[PersonMentor].[MentorID] = [dbo].[Person].[ID] \
         WHERE [dbo].[PersonMentor].[PersonID] = @PersonID;"
    );
}

#[test]
fn save_and_delete_map_link() {
    let model = model();

    assert_eq!(
        sql(&model, Operation::JoinSave, "Address"),
        "UPDATE [dbo].[Person] SET [AddressID] = @AddressID WHERE [dbo].[Person].[ID] = @ID;"
    );
    assert_eq!(
        sql(&model, Operation::JoinDelete, "Address"),
        "UPDATE [dbo].[Person] SET [AddressID] = NULL WHERE [dbo].[Person].[ID] = @ID;"
    );
}

#[test]
fn save_and_delete_many_to_many_link() {
    let model = model();

    assert_eq!(
        sql(&model, Operation::JoinSave, "Groups"),
        "INSERT INTO [dbo].[PersonGroup] ([PersonID], [GroupID]) VALUES (@PersonID, @GroupID);"
    );
    assert_eq!(
        sql(&model, Operation::JoinDelete, "Groups"),
        "DELETE FROM [dbo].[PersonGroup] \
         WHERE [dbo].[PersonGroup].[PersonID] = @PersonID AND [dbo].[PersonGroup].[GroupID] = @GroupID;"
    );
}

#[test]
fn saving_a_single_link_replaces_the_previous_one() {
    let model = model();
    let source = associations(&model);

    let query =
        generate_association(Operation::JoinSave, model.person, "Mentor", &source).unwrap();
    assert_eq!(
        lines(&query),
        [
            "DELETE FROM [dbo].[PersonMentor] WHERE [dbo].[PersonMentor].[PersonID] = @PersonID;",
            "INSERT INTO [dbo].[PersonMentor] ([PersonID], [MentorID]) VALUES (@PersonID, @MentorID);",
        ]
    );
    assert_eq!(param_names(&query), ["PersonID", "MentorID"]);

    let owner = Record::new().with("ID", 1);
    let mentor = Record::new().with("ID", 2);
    let params = query.bind(&[&owner, &mentor]).unwrap();

    assert_eq!(bound(&params, "PersonID"), &Value::I32(1));
    assert_eq!(bound(&params, "MentorID"), &Value::I32(2));
}

#[test]
fn unknown_association_is_a_configuration_error() {
    let model = model();
    let source = associations(&model);

    let err = generate_association(Operation::JoinSave, model.person, "Friends", &source)
        .unwrap_err();
    assert!(err.is_configuration());

    let err =
        generate_association(Operation::Insert, model.person, "Groups", &source).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn inherited_association_keys_the_declaring_row() {
    let model = model();
    let person = person(&model).property(ormap_core::schema::Property::many_to_many(
        "Groups",
        model.group,
    ));
    let source = build(&model, vec![person, employee(&model), group(&model)]);

    let query =
        generate_association(Operation::JoinSave, model.employee, "Groups", &source).unwrap();
    assert_eq!(
        query.sql,
        "INSERT INTO [dbo].[PersonGroup] ([PersonID], [GroupID]) VALUES (@PersonID, @GroupID);"
    );
}
