use super::Value;
use crate::schema::{Property, TypeId};
use indexmap::IndexMap;

/// Supplies property values of one object when statement parameters are
/// bound.
///
/// Implemented by generated entity code, or by [`Record`] for callers that
/// hold values by name.
pub trait Instance {
    /// The current value of `property`, or `None` when it was never set.
    fn value(&self, property: &Property) -> Option<Value>;
}

/// Property values keyed by name.
///
/// A value set with [`Record::set_owned`] applies only to properties of that
/// owner, which disambiguates names repeated along a hierarchy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: IndexMap<(Option<TypeId>, String), Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.values.insert((None, name.to_string()), value.into());
        self
    }

    pub fn set_owned(&mut self, owner: TypeId, name: &str, value: impl Into<Value>) -> &mut Self {
        self.values
            .insert((Some(owner), name.to_string()), value.into());
        self
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(&(None, name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Instance for Record {
    fn value(&self, property: &Property) -> Option<Value> {
        self.values
            .get(&(Some(property.owner), property.name.clone()))
            .or_else(|| self.values.get(&(None, property.name.clone())))
            .cloned()
    }
}

impl<T: Instance + ?Sized> Instance for &T {
    fn value(&self, property: &Property) -> Option<Value> {
        (**self).value(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::Type;

    #[test]
    fn owned_values_take_precedence() {
        let mut name = Property::reference("Name", Type::String);
        name.owner = TypeId(1);

        let mut record = Record::new();
        record.set("Name", "plain").set_owned(TypeId(1), "Name", "owned");
        assert_eq!(record.value(&name), Some(Value::from("owned")));

        name.owner = TypeId(2);
        assert_eq!(record.value(&name), Some(Value::from("plain")));
    }
}
