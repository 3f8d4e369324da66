#![allow(dead_code)]

use ormap_core::schema::{Builder, DataSource, Mapping, Property, TypeId, TypeRegistry};
use ormap_core::stmt::Type;
use ormap_core::MappingSource;
use std::sync::Arc;

/// `Manager : Employee : Person : INamed`, with `Employee` also
/// implementing `INamed`, plus `Address` and `Group`.
pub struct Model {
    pub registry: Arc<TypeRegistry>,
    pub named: TypeId,
    pub person: TypeId,
    pub employee: TypeId,
    pub manager: TypeId,
    pub address: TypeId,
    pub group: TypeId,
}

pub fn model() -> Model {
    let mut registry = TypeRegistry::new();

    let named = registry.interface("INamed").register().unwrap();
    let person = registry
        .class("Person")
        .implements([named])
        .register()
        .unwrap();
    let employee = registry
        .class("Employee")
        .extends(person)
        .implements([named])
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
        named,
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

pub fn build(model: &Model, mappings: Vec<Mapping>) -> MappingSource {
    build_with(model, DataSource::new("main"), mappings)
}

pub fn build_with(model: &Model, descriptor: DataSource, mappings: Vec<Mapping>) -> MappingSource {
    Builder::new()
        .build(model.registry.clone(), descriptor, mappings)
        .unwrap()
}
