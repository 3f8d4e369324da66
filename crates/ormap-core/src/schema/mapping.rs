mod association;
pub use association::{Association, Constraint};

mod property;
pub use property::{Property, PropertyKind};

use super::TypeId;

/// Schema used for mappings that do not name one, unless the builder
/// overrides it.
pub const DEFAULT_SCHEMA: &str = "dbo";

/// Maps one class type onto one table of one data source.
///
/// Mappings are declared by the host and rewritten by the assembly pipeline
/// (merge, reduce, surrogate keys). They are frozen once the owning
/// [`MappingSource`](super::MappingSource) is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    /// The mapped type
    pub ty: TypeId,

    pub table: String,

    /// Database schema. Left empty to use the builder's default schema.
    pub schema: String,

    /// Prefix applied to generated column names
    pub prefix: String,

    /// Suffix applied to generated column names
    pub suffix: String,

    /// Statement ordering hint. Lower orders are emitted first.
    pub order: i32,

    /// Whether the pipeline may fold this mapping into a related one when it
    /// declares no identity.
    pub merge: bool,

    pub identities: Vec<Property>,

    pub references: Vec<Property>,

    pub maps: Vec<Property>,

    pub many_to_one: Vec<Property>,

    pub many_to_many: Vec<Property>,
}

impl Mapping {
    pub fn new(ty: TypeId, table: &str) -> Self {
        Self {
            ty,
            table: table.to_string(),
            schema: String::new(),
            prefix: String::new(),
            suffix: String::new(),
            order: 0,
            merge: true,
            identities: vec![],
            references: vec![],
            maps: vec![],
            many_to_one: vec![],
            many_to_many: vec![],
        }
    }

    pub fn schema(mut self, schema: &str) -> Self {
        self.schema = schema.to_string();
        self
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    /// Adds a property, binding it to this mapping.
    pub fn property(mut self, property: Property) -> Self {
        self.push(property);
        self
    }

    /// Adds a property to the collection matching its kind and rebinds its
    /// owner to this mapping's type.
    pub fn push(&mut self, mut property: Property) {
        property.owner = self.ty;

        let collection = match property.kind {
            PropertyKind::Identity | PropertyKind::AutoIdentity => &mut self.identities,
            PropertyKind::Reference => &mut self.references,
            PropertyKind::Map(_) => &mut self.maps,
            PropertyKind::ManyToOneSingle(_) | PropertyKind::ManyToOneList(_) => {
                &mut self.many_to_one
            }
            PropertyKind::ManyToMany(_) => &mut self.many_to_many,
        };

        collection.push(property);
    }

    /// Every property, collection by collection.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.identities
            .iter()
            .chain(&self.references)
            .chain(&self.maps)
            .chain(&self.many_to_one)
            .chain(&self.many_to_many)
    }

    /// Map, many-to-one and many-to-many properties.
    pub fn associations(&self) -> impl Iterator<Item = &Property> {
        self.maps
            .iter()
            .chain(&self.many_to_one)
            .chain(&self.many_to_many)
    }

    pub(crate) fn collections_mut(&mut self) -> [&mut Vec<Property>; 5] {
        [
            &mut self.identities,
            &mut self.references,
            &mut self.maps,
            &mut self.many_to_one,
            &mut self.many_to_many,
        ]
    }

    pub fn property_by_name(&self, name: &str) -> Option<&Property> {
        self.properties().find(|property| property.name == name)
    }

    pub fn has_identity(&self) -> bool {
        !self.identities.is_empty()
    }

    /// Applies the mapping's prefix and suffix to a generated name.
    pub fn generated_name(&self, base: &str) -> String {
        format!("{}{}{}", self.prefix, base, self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::Type;

    #[test]
    fn push_routes_by_kind_and_binds_owner() {
        let owner = TypeId(3);
        let target = TypeId(4);

        let mapping = Mapping::new(owner, "Person")
            .property(Property::identity("ID", Type::I32))
            .property(Property::reference("Name", Type::String))
            .property(Property::map("Address", target))
            .property(Property::many_to_one_list("Phones", target))
            .property(Property::many_to_many("Groups", target));

        assert_eq!(mapping.identities.len(), 1);
        assert_eq!(mapping.references.len(), 1);
        assert_eq!(mapping.maps.len(), 1);
        assert_eq!(mapping.many_to_one.len(), 1);
        assert_eq!(mapping.many_to_many.len(), 1);
        assert!(mapping.properties().all(|p| p.owner == owner));
        assert!(mapping.schema.is_empty());
    }

    #[test]
    fn generated_names_use_prefix_and_suffix() {
        let mapping = Mapping::new(TypeId(0), "Person").prefix("P_").suffix("_X");
        assert_eq!(mapping.generated_name("ID"), "P_ID_X");
    }
}
