use crate::{Error, Result};
use indexmap::IndexMap;
use std::fmt;

/// Uniquely identifies a class or interface within a [`TypeRegistry`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A class: at most one base class, any number of interfaces.
    Class,

    /// An interface (capability): only other interfaces as ancestors.
    Interface,
}

/// Declares one type of the object model together with its immediate
/// ancestors.
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub id: TypeId,

    pub name: String,

    pub kind: TypeKind,

    /// Base class, for classes that extend another class
    pub base: Option<TypeId>,

    /// Directly implemented interfaces, in declaration order
    pub interfaces: Vec<TypeId>,
}

/// The object model's type hierarchy.
///
/// Types may only reference types registered before them, so the hierarchy is
/// acyclic by construction.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    types: IndexMap<TypeId, TypeDef>,
}

/// A type being declared; see [`TypeRegistry::class`].
#[must_use]
pub struct TypeDecl<'a> {
    registry: &'a mut TypeRegistry,
    name: String,
    kind: TypeKind,
    base: Option<TypeId>,
    interfaces: Vec<TypeId>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts declaring a class named `name`.
    pub fn class(&mut self, name: &str) -> TypeDecl<'_> {
        self.decl(name, TypeKind::Class)
    }

    /// Starts declaring an interface named `name`.
    pub fn interface(&mut self, name: &str) -> TypeDecl<'_> {
        self.decl(name, TypeKind::Interface)
    }

    fn decl(&mut self, name: &str, kind: TypeKind) -> TypeDecl<'_> {
        TypeDecl {
            registry: self,
            name: name.to_string(),
            kind,
            base: None,
            interfaces: vec![],
        }
    }

    /// Get a type by ID
    ///
    /// # Panics
    ///
    /// Panics if the type ID does not exist in the registry.
    pub fn get(&self, id: impl Into<TypeId>) -> &TypeDef {
        self.types.get(&id.into()).expect("invalid type ID")
    }

    pub fn try_get(&self, id: impl Into<TypeId>) -> Option<&TypeDef> {
        self.types.get(&id.into())
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.types.contains_key(&id)
    }

    pub fn by_name(&self, name: &str) -> Option<TypeId> {
        self.types
            .values()
            .find(|def| def.name == name)
            .map(|def| def.id)
    }

    /// The type's name, or a placeholder for unknown IDs. Used in messages.
    pub fn name(&self, id: TypeId) -> &str {
        self.try_get(id).map(|def| &def.name[..]).unwrap_or("<unknown>")
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Immediate ancestors: the base class first, then the interfaces.
    pub fn immediate_ancestors(&self, id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        let def = self.try_get(id);
        def.and_then(|def| def.base)
            .into_iter()
            .chain(def.into_iter().flat_map(|def| def.interfaces.iter().copied()))
    }

    /// Returns `true` if `ancestor` is `id` or any transitive ancestor of it.
    pub fn is_assignable(&self, id: TypeId, ancestor: TypeId) -> bool {
        if id == ancestor {
            return true;
        }

        self.immediate_ancestors(id)
            .any(|parent| self.is_assignable(parent, ancestor))
    }
}

impl TypeDecl<'_> {
    /// Sets the base class.
    pub fn extends(mut self, base: TypeId) -> Self {
        self.base = Some(base);
        self
    }

    /// Adds implemented interfaces.
    pub fn implements(mut self, interfaces: impl IntoIterator<Item = TypeId>) -> Self {
        self.interfaces.extend(interfaces);
        self
    }

    /// Validates the declaration and adds it to the registry.
    pub fn register(self) -> Result<TypeId> {
        let registry = self.registry;

        if registry.by_name(&self.name).is_some() {
            return Err(Error::configuration(format!(
                "type `{}` registered twice",
                self.name
            )));
        }

        if let Some(base) = self.base {
            match registry.try_get(base) {
                Some(def) if def.kind == TypeKind::Class && self.kind == TypeKind::Class => {}
                Some(def) => {
                    return Err(Error::configuration(format!(
                        "`{}` cannot extend `{}`; only classes extend classes",
                        self.name, def.name
                    )))
                }
                None => {
                    return Err(Error::configuration(format!(
                        "base type of `{}` is not registered",
                        self.name
                    )))
                }
            }
        }

        for interface in &self.interfaces {
            match registry.try_get(*interface) {
                Some(def) if def.kind == TypeKind::Interface => {}
                Some(def) => {
                    return Err(Error::configuration(format!(
                        "`{}` cannot implement class `{}`",
                        self.name, def.name
                    )))
                }
                None => {
                    return Err(Error::configuration(format!(
                        "an interface of `{}` is not registered",
                        self.name
                    )))
                }
            }
        }

        let id = TypeId(registry.types.len());
        registry.types.insert(
            id,
            TypeDef {
                id,
                name: self.name,
                kind: self.kind,
                base: self.base,
                interfaces: self.interfaces,
            },
        );

        Ok(id)
    }
}

impl From<&Self> for TypeId {
    fn from(src: &Self) -> Self {
        *src
    }
}

impl From<&TypeDef> for TypeId {
    fn from(value: &TypeDef) -> Self {
        value.id
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TypeId({})", self.0)
    }
}
