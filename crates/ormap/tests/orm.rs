use ormap::{
    DataSource, Expression, Mapping, ObjectQuery, Operation, Orm, Property, Record, Type,
    TypeId, TypeRegistry, Value,
};
use pretty_assertions::assert_eq;

struct Fixture {
    orm: Orm,
    person: TypeId,
    employee: TypeId,
}

fn fixture() -> Fixture {
    let mut registry = TypeRegistry::new();
    let person = registry.class("Person").register().unwrap();
    let employee = registry.class("Employee").extends(person).register().unwrap();

    let orm = Orm::builder()
        .registry(registry)
        .data_source(DataSource::new("archive").priority(1).write(false))
        .data_source(DataSource::new("main").priority(10))
        .mapping(
            "main",
            Mapping::new(person, "Person")
                .property(Property::identity("ID", Type::I32).auto_increment())
                .property(Property::reference("Name", Type::String).max_length(50))
                .property(Property::reference("Age", Type::I32)),
        )
        .mapping(
            "main",
            Mapping::new(employee, "Employee")
                .property(Property::identity("ID", Type::I32).auto_increment())
                .property(Property::reference("Salary", Type::F64)),
        )
        .mapping(
            "archive",
            Mapping::new(person, "Person")
                .schema("archive")
                .property(Property::identity("ID", Type::I32))
                .property(Property::reference("Name", Type::String)),
        )
        .build()
        .unwrap();

    Fixture {
        orm,
        person,
        employee,
    }
}

#[test]
fn sources_are_ordered_by_priority() {
    let Fixture { orm, person, employee } = fixture();

    let names: Vec<_> = orm.sources().map(|source| source.name()).collect();
    assert_eq!(names, ["main", "archive"]);

    assert_eq!(orm.source_for(person).unwrap().name(), "main");
    assert_eq!(orm.source_for(employee).unwrap().name(), "main");
    assert!(orm.source("archive").unwrap().maps_type(person));
    assert!(orm.source("reporting").is_none());
}

#[test]
fn compile_renders_one_select_per_source() {
    let Fixture { orm, person, .. } = fixture();

    let query = ObjectQuery::new(person).filter(Expression::eq(Expression::member("Name"), "Al"));
    let compiled = orm.compile(&query).unwrap();

    let sql: Vec<_> = compiled
        .iter()
        .map(|(name, query)| (&name[..], &query.sql[..]))
        .collect();

    assert_eq!(
        sql,
        [
            (
                "main",
                "SELECT [dbo].[Person].[ID], [dbo].[Person].[Name], [dbo].[Person].[Age] \
                 FROM [dbo].[Person] WHERE ([dbo].[Person].[Name] = @p0);"
            ),
            (
                "archive",
                "SELECT [archive].[Person].[ID], [archive].[Person].[Name] \
                 FROM [archive].[Person] WHERE ([archive].[Person].[Name] = @p0);"
            ),
        ]
    );

    let params = compiled["main"].bind(&[]).unwrap();
    assert_eq!(params[0].value, Value::from("Al"));
}

#[test]
fn generates_statements_against_a_named_source() {
    let Fixture { orm, employee, .. } = fixture();

    let queries = orm
        .generate_queries(Operation::Insert, employee, "main")
        .unwrap();
    assert_eq!(queries.len(), 1);
    assert!(queries[0]
        .sql
        .starts_with("DECLARE @EmployeeID_Temp int;\nDECLARE @PersonID_Temp int;\n"));

    let record = Record::new()
        .with("Name", "Ann")
        .with("Age", 30)
        .with("Salary", 10.0);
    let params = queries[0].bind(&[&record]).unwrap();
    assert_eq!(params.len(), 3);

    let err = orm
        .generate_queries(Operation::Insert, employee, "reporting")
        .unwrap_err();
    assert!(err.is_configuration());

    let err = orm
        .generate_queries(Operation::Insert, employee, "archive")
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn exposes_table_descriptors() {
    let Fixture { orm, .. } = fixture();

    let tables = orm.tables("main").unwrap();
    let names: Vec<_> = tables.iter().map(|table| &table.name[..]).collect();
    assert_eq!(names, ["Person", "Employee"]);

    assert!(orm.tables("reporting").unwrap_err().is_configuration());
}

#[test]
fn build_requires_a_registry() {
    let err = Orm::builder()
        .data_source(DataSource::new("main"))
        .build()
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn build_rejects_declarations_for_unknown_sources() {
    let mut registry = TypeRegistry::new();
    let person = registry.class("Person").register().unwrap();

    let err = Orm::builder()
        .registry(registry)
        .data_source(DataSource::new("main"))
        .mapping("other", Mapping::new(person, "Person"))
        .build()
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn identity_convention_applies_to_every_source() {
    let mut registry = TypeRegistry::new();
    let tag = registry.class("Tag").register().unwrap();

    let orm = Orm::builder()
        .registry(registry)
        .default_schema("app")
        .identity_name("Key")
        .data_sources([DataSource::new("main"), DataSource::new("copy")])
        .mapping(
            "main",
            Mapping::new(tag, "Tag").property(Property::reference("Label", Type::String)),
        )
        .mapping(
            "copy",
            Mapping::new(tag, "Tag").property(Property::reference("Label", Type::String)),
        )
        .build()
        .unwrap();

    for source in orm.sources() {
        let mapping = source.mapping(tag).unwrap();
        assert_eq!(mapping.schema, "app");
        assert_eq!(mapping.identities[0].name, "Key");
    }
}

#[test]
fn handle_is_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Orm>();

    let Fixture { orm, person, .. } = fixture();

    let handles: Vec<_> = (0..4)
        .map(|age| {
            let orm = orm.clone();
            std::thread::spawn(move || {
                let query = ObjectQuery::new(person)
                    .filter(Expression::gt(Expression::member("Age"), age));
                orm.compile(&query).unwrap()["main"].sql.clone()
            })
        })
        .collect();

    for handle in handles {
        let sql = handle.join().unwrap();
        assert!(sql.ends_with("WHERE ([dbo].[Person].[Age] > @p0);"));
    }
}

#[test]
fn assembly_logs_through_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let Fixture { orm, .. } = fixture();
    assert_eq!(orm.sources().count(), 2);
}
