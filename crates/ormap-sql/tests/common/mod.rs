#![allow(dead_code)]

use ormap_core::schema::{Builder, DataSource, Mapping, Property, TypeId, TypeRegistry};
use ormap_core::stmt::Type;
use ormap_core::MappingSource;
use ormap_sql::{BoundParam, Query};
use std::sync::Arc;

/// `Manager : Employee : Person`, plus `Address` and `Group` for
/// associations.
pub struct Model {
    pub registry: Arc<TypeRegistry>,
    pub person: TypeId,
    pub employee: TypeId,
    pub manager: TypeId,
    pub address: TypeId,
    pub group: TypeId,
}

pub fn model() -> Model {
    let mut registry = TypeRegistry::new();

    let person = registry.class("Person").register().unwrap();
    let employee = registry
        .class("Employee")
        .extends(person)
        .register()
        .unwrap();
    let manager = registry
        .class("Manager")
        .extends(employee)
        .register()
        .unwrap();
    let address = registry.class("Address").register().unwrap();
    let group = registry.class("Group").register().unwrap();

    Model {
        registry: Arc::new(registry),
        person,
        employee,
        manager,
        address,
        group,
    }
}

pub fn id() -> Property {
    Property::identity("ID", Type::I32).auto_increment()
}

pub fn person(model: &Model) -> Mapping {
    Mapping::new(model.person, "Person")
        .property(id())
        .property(Property::reference("Name", Type::String).max_length(100))
        .property(Property::reference("Age", Type::I32))
}

pub fn employee(model: &Model) -> Mapping {
    Mapping::new(model.employee, "Employee")
        .property(id())
        .property(Property::reference("Salary", Type::F64))
}

pub fn manager(model: &Model) -> Mapping {
    Mapping::new(model.manager, "Manager")
        .property(id())
        .property(Property::reference("Level", Type::I32))
}

pub fn address(model: &Model) -> Mapping {
    Mapping::new(model.address, "Address")
        .property(id())
        .property(Property::reference("Street", Type::String))
}

pub fn group(model: &Model) -> Mapping {
    Mapping::new(model.group, "Group")
        .property(id())
        .property(Property::reference("Title", Type::String))
}

/// `Person` with a map to `Address`, a many-to-many to `Group` and a
/// single self reference.
pub fn person_with_associations(model: &Model) -> Mapping {
    person(model)
        .property(Property::map("Address", model.address))
        .property(Property::many_to_one("Mentor", model.person))
        .property(Property::many_to_many("Groups", model.group))
}

pub fn build(model: &Model, mappings: Vec<Mapping>) -> MappingSource {
    Builder::new()
        .build(model.registry.clone(), DataSource::new("main"), mappings)
        .unwrap()
}

pub fn hierarchy(model: &Model) -> MappingSource {
    build(model, vec![person(model), employee(model), manager(model)])
}

pub fn associations(model: &Model) -> MappingSource {
    build(
        model,
        vec![person_with_associations(model), address(model), group(model)],
    )
}

pub fn param_names(query: &Query) -> Vec<&str> {
    query.params.iter().map(|param| &param.name[..]).collect()
}

pub fn bound<'a>(params: &'a [BoundParam], name: &str) -> &'a ormap_core::stmt::Value {
    &params
        .iter()
        .find(|param| param.name == name)
        .unwrap_or_else(|| panic!("no parameter @{name}"))
        .value
}

/// The statements of a batch, one per line.
pub fn lines(query: &Query) -> Vec<&str> {
    query.sql.lines().collect()
}
