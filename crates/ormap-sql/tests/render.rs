mod common;
use common::*;

use ormap_core::stmt::{self, Direction, Expression, ObjectQuery, Value};
use ormap_core::MappingSource;
use ormap_sql::{render, ParamSource, Query};
use pretty_assertions::assert_eq;

fn compile(source: &MappingSource, query: &ObjectQuery) -> Query {
    let translated = stmt::translate(query, [source]).unwrap();
    render(&translated[source.name()], source).unwrap()
}

fn constants(query: &Query) -> Vec<Value> {
    query
        .params
        .iter()
        .map(|param| match &param.source {
            ParamSource::Constant(value) => value.clone(),
            ParamSource::Property { .. } => panic!("unexpected property parameter"),
        })
        .collect()
}

#[test]
fn filter_ordering_and_paging() {
    let model = model();
    let source = build(&model, vec![person(&model)]);

    let query = ObjectQuery::new(model.person)
        .filter(Expression::and(
            Expression::member("Name").starts_with("A"),
            Expression::ge(Expression::member("Age"), 18),
        ))
        .order_by("Name", Direction::Desc)
        .skip(10)
        .take(5);

    let compiled = compile(&source, &query);
    assert_eq!(
        compiled.sql,
        "SELECT [dbo].[Person].[ID], [dbo].[Person].[Name], [dbo].[Person].[Age] \
         FROM [dbo].[Person] \
         WHERE (([dbo].[Person].[Name] LIKE @p0) AND ([dbo].[Person].[Age] >= @p1)) \
         ORDER BY [dbo].[Person].[Name] DESC OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY;"
    );
    assert_eq!(constants(&compiled), [Value::from("A%"), Value::I32(18)]);
}

#[test]
fn negation_is_pushed_into_comparisons() {
    let model = model();
    let source = build(&model, vec![person(&model)]);

    let negated = ObjectQuery::new(model.person).filter(Expression::not(Expression::lt(
        Expression::member("Age"),
        18,
    )));
    let direct =
        ObjectQuery::new(model.person).filter(Expression::ge(Expression::member("Age"), 18));

    assert_eq!(compile(&source, &negated), compile(&source, &direct));

    let twice = ObjectQuery::new(model.person).filter(Expression::not(Expression::not(
        Expression::ge(Expression::member("Age"), 18),
    )));
    assert_eq!(compile(&source, &twice), compile(&source, &direct));

    let negated_like = ObjectQuery::new(model.person).filter(Expression::not(
        Expression::member("Name").contains("50%"),
    ));
    let compiled = compile(&source, &negated_like);
    assert!(compiled
        .sql
        .ends_with("WHERE ([dbo].[Person].[Name] NOT LIKE @p0);"));
    assert_eq!(constants(&compiled), [Value::from("%50[%]%")]);
}

#[test]
fn null_comparisons_render_as_null_tests() {
    let model = model();
    let source = build(&model, vec![person(&model)]);

    let query = ObjectQuery::new(model.person).filter(Expression::or(
        Expression::eq(Expression::member("Name"), Value::Null),
        Expression::ne(Value::Null, Expression::member("Age")),
    ));

    let compiled = compile(&source, &query);
    assert!(compiled.sql.ends_with(
        "WHERE (([dbo].[Person].[Name] IS NULL) OR ([dbo].[Person].[Age] IS NOT NULL));"
    ));
    assert!(compiled.params.is_empty());
}

#[test]
fn unfiltered_and_always_false_queries() {
    let model = model();
    let source = build(&model, vec![person(&model)]);

    let all = compile(&source, &ObjectQuery::new(model.person).select(["Name"]));
    assert_eq!(all.sql, "SELECT [dbo].[Person].[Name] FROM [dbo].[Person];");

    let none = compile(
        &source,
        &ObjectQuery::new(model.person).filter(Expression::gt(1, 2)),
    );
    assert!(none.sql.ends_with("FROM [dbo].[Person] WHERE (1 = 0);"));
}

#[test]
fn paging_without_ordering() {
    let model = model();
    let source = build(&model, vec![person(&model)]);

    let compiled = compile(
        &source,
        &ObjectQuery::new(model.person).select(["ID"]).skip(20),
    );
    assert_eq!(
        compiled.sql,
        "SELECT [dbo].[Person].[ID] FROM [dbo].[Person] ORDER BY (SELECT NULL) OFFSET 20 ROWS;"
    );
}

#[test]
fn hierarchy_select_joins_ancestor_tables() {
    let model = model();
    let source = hierarchy(&model);

    let query = ObjectQuery::new(model.manager)
        .select(["Level", "Name"])
        .filter(Expression::gt(Expression::member("Salary"), 1000.0));

    let compiled = compile(&source, &query);
    assert_eq!(
        compiled.sql,
        "SELECT [dbo].[Manager].[Level], [dbo].[Person].[Name] \
         FROM [dbo].[Manager] \
         INNER JOIN [dbo].[Employee] ON [dbo].[Employee].[ID] = [dbo].[Manager].[EmployeeID] \
         INNER JOIN [dbo].[Person] ON [dbo].[Person].[ID] = [dbo].[Employee].[PersonID] \
         WHERE ([dbo].[Employee].[Salary] > @p0);"
    );
}

#[test]
fn predicate_specializes_per_source() {
    let model = model();
    let main = build(&model, vec![person(&model)]);
    let archive = ormap_core::schema::Builder::new()
        .build(
            model.registry.clone(),
            ormap_core::schema::DataSource::new("archive"),
            vec![ormap_core::schema::Mapping::new(model.person, "Person")
                .schema("archive")
                .property(id())
                .property(ormap_core::schema::Property::reference(
                    "Name",
                    ormap_core::stmt::Type::String,
                ))],
        )
        .unwrap();

    let query = ObjectQuery::new(model.person).filter(Expression::and(
        Expression::eq(Expression::member("Name"), "Al"),
        Expression::gt(Expression::member("Age"), 18),
    ));

    let translated = stmt::translate(&query, [&main, &archive]).unwrap();

    let main_sql = render(&translated["main"], &main).unwrap().sql;
    assert!(main_sql.ends_with(
        "WHERE (([dbo].[Person].[Name] = @p0) AND ([dbo].[Person].[Age] > @p1));"
    ));

    let archive_sql = render(&translated["archive"], &archive).unwrap().sql;
    assert_eq!(
        archive_sql,
        "SELECT [archive].[Person].[ID], [archive].[Person].[Name] FROM [archive].[Person] \
         WHERE ([archive].[Person].[Name] = @p0);"
    );
}
