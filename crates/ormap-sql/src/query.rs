use ormap_core::{
    schema::Property,
    stmt::{Instance, Type, Value},
    Result,
};

/// A generated SQL batch and the parameters it expects.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub sql: String,

    pub params: Vec<Param>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Name without the leading `@`
    pub name: String,

    pub kind: ParamKind,

    pub source: ParamSource,
}

/// How the driver declares the parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    /// Unicode string, with the column's maximum length when known
    String { max_length: Option<usize> },

    Typed(Type),
}

/// Where a parameter's value comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamSource {
    /// A property of one of the instances passed to [`Query::bind`]
    Property { property: Property, instance: usize },

    /// A literal captured while compiling an object query
    Constant(Value),
}

/// A parameter with its value, ready for the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParam {
    pub name: String,

    pub kind: ParamKind,

    pub value: Value,
}

impl Query {
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|param| param.name == name)
    }

    /// Binds every parameter to a value.
    ///
    /// Property parameters read instance `instance` of `instances`. A value
    /// that is unset or equal to the property's default binds `NULL` when the
    /// property is nullable, and the default otherwise.
    pub fn bind(&self, instances: &[&dyn Instance]) -> Result<Vec<BoundParam>> {
        self.params
            .iter()
            .map(|param| {
                Ok(BoundParam {
                    name: param.name.clone(),
                    kind: param.kind.clone(),
                    value: param.value(instances)?,
                })
            })
            .collect()
    }
}

impl Param {
    pub fn property(name: impl Into<String>, property: &Property, instance: usize) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::for_type(&property.ty, property.max_length),
            source: ParamSource::Property {
                property: property.clone(),
                instance,
            },
        }
    }

    pub fn constant(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::for_type(&value.ty(), None),
            source: ParamSource::Constant(value),
        }
    }

    fn value(&self, instances: &[&dyn Instance]) -> Result<Value> {
        let (property, instance) = match &self.source {
            ParamSource::Constant(value) => return Ok(value.clone()),
            ParamSource::Property { property, instance } => (property, *instance),
        };

        let Some(instance) = instances.get(instance) else {
            return Err(ormap_core::err!(
                "parameter @{} reads instance {} but only {} were supplied",
                self.name,
                instance,
                instances.len()
            ));
        };

        let default = property.default_or_type_default();

        Ok(match instance.value(property) {
            Some(value) if value != default && !value.is_null() => value,
            _ if property.nullable => Value::Null,
            _ => default,
        })
    }
}

impl ParamKind {
    pub fn for_type(ty: &Type, max_length: Option<usize>) -> Self {
        match ty {
            Type::String => Self::String { max_length },
            ty => Self::Typed(ty.clone()),
        }
    }
}
