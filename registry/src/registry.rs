//! The Registry - immutable type lookup.

use crate::{CapabilityIndex, RegistryError, RegistryResult};
use plc_core::{Type, Value};
use std::collections::HashMap;

/// Handles to the built-in types.
#[derive(Debug, Clone)]
pub(crate) struct Builtins {
    pub any: Type,
    pub nil: Type,
    pub comparable: Type,
    pub boolean: Type,
    pub integer: Type,
    pub decimal: Type,
    pub character: Type,
    pub string: Type,
    pub integer_iterable: Type,
}

impl Builtins {
    pub fn all(&self) -> [&Type; 9] {
        [
            &self.any,
            &self.nil,
            &self.comparable,
            &self.boolean,
            &self.integer,
            &self.decimal,
            &self.character,
            &self.string,
            &self.integer_iterable,
        ]
    }
}

/// The Registry provides lookup of types and their assignability.
/// It is immutable after construction.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Types by name.
    types: HashMap<String, Type>,
    /// Precomputed capability relationships.
    capabilities: CapabilityIndex,
    builtins: Builtins,
}

impl Registry {
    pub(crate) fn new(
        types: HashMap<String, Type>,
        capabilities: CapabilityIndex,
        builtins: Builtins,
    ) -> Self {
        Self {
            types,
            capabilities,
            builtins,
        }
    }

    /// A registry holding only the built-in types.
    pub fn builtin() -> Self {
        crate::RegistryBuilder::new().build()
    }

    // ==================== Type Lookups ====================

    /// Resolve a type by name.
    pub fn resolve(&self, name: &str) -> RegistryResult<Type> {
        self.get_type(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownType(name.to_string()))
    }

    /// Get a type by name.
    pub fn get_type(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    /// Get all types.
    pub fn all_types(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }

    /// Get the number of types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    // ==================== Assignability ====================

    /// Whether a value of type `source` may be used where `target` is expected.
    pub fn is_assignable(&self, target: &Type, source: &Type) -> bool {
        *target == self.builtins.any
            || target == source
            || self.capabilities.satisfies(target.name(), source.name())
    }

    /// Whether `name` names a capability type.
    pub fn is_capability(&self, name: &str) -> bool {
        self.capabilities.is_capability(name)
    }

    /// The nominal type a runtime value was constructed from.
    pub fn type_of(&self, value: &Value) -> Type {
        match value {
            Value::Nil => self.nil(),
            Value::Boolean(_) => self.boolean(),
            Value::Integer(_) => self.integer(),
            Value::Decimal(_) => self.decimal(),
            Value::Character(_) => self.character(),
            Value::String(_) => self.string(),
            Value::Sequence(_) => self.integer_iterable(),
            Value::Object(object) => object.ty.clone(),
        }
    }

    // ==================== Built-in Types ====================

    pub fn any(&self) -> Type {
        self.builtins.any.clone()
    }

    pub fn nil(&self) -> Type {
        self.builtins.nil.clone()
    }

    pub fn comparable(&self) -> Type {
        self.builtins.comparable.clone()
    }

    pub fn boolean(&self) -> Type {
        self.builtins.boolean.clone()
    }

    pub fn integer(&self) -> Type {
        self.builtins.integer.clone()
    }

    pub fn decimal(&self) -> Type {
        self.builtins.decimal.clone()
    }

    pub fn character(&self) -> Type {
        self.builtins.character.clone()
    }

    pub fn string(&self) -> Type {
        self.builtins.string.clone()
    }

    pub fn integer_iterable(&self) -> Type {
        self.builtins.integer_iterable.clone()
    }
}
