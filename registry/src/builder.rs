//! RegistryBuilder for constructing an immutable Registry.

use crate::{builtin, Builtins, CapabilityIndex, Registry};
use plc_core::{Scope, Type};
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

/// Errors that can occur during registry construction or lookup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("Duplicate type name: {0}")]
    DuplicateTypeName(String),

    #[error("Unknown type: {0}")]
    UnknownType(String),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Builder for constructing an immutable Registry.
///
/// A new builder already holds the built-in types; callers only add object
/// types and extra capabilities on top of them.
#[derive(Debug)]
pub struct RegistryBuilder {
    /// Types being built, by name.
    types: HashMap<String, Type>,
    /// Capability relationships being built.
    capabilities: CapabilityIndex,
    builtins: Builtins,
}

impl RegistryBuilder {
    /// Create a builder seeded with the built-in types.
    pub fn new() -> Self {
        let builtins = Builtins {
            any: Type::new(builtin::ANY, "Object"),
            nil: Type::new(builtin::NIL, "Void"),
            comparable: Type::new(builtin::COMPARABLE, "Comparable"),
            boolean: Type::new(builtin::BOOLEAN, "boolean"),
            integer: Type::new(builtin::INTEGER, "int"),
            decimal: Type::new(builtin::DECIMAL, "double"),
            character: Type::new(builtin::CHARACTER, "char"),
            string: Type::new(builtin::STRING, "String"),
            integer_iterable: Type::new(builtin::INTEGER_ITERABLE, "Iterable<Integer>"),
        };

        let mut types = HashMap::new();
        for ty in builtins.all() {
            types.insert(ty.name().to_string(), ty.clone());
        }

        // Boolean is not comparable.
        let mut capabilities = CapabilityIndex::new();
        for satisfier in [
            builtin::INTEGER,
            builtin::DECIMAL,
            builtin::CHARACTER,
            builtin::STRING,
        ] {
            capabilities.insert(builtin::COMPARABLE, satisfier);
        }

        Self {
            types,
            capabilities,
            builtins,
        }
    }

    /// Add a type with no members.
    pub fn add_type(
        &mut self,
        name: impl Into<String>,
        external_name: impl Into<String>,
    ) -> RegistryResult<Type> {
        self.add_object_type(name, external_name, Scope::root())
    }

    /// Add an object type whose fields and methods live in `members`.
    pub fn add_object_type(
        &mut self,
        name: impl Into<String>,
        external_name: impl Into<String>,
        members: Rc<Scope>,
    ) -> RegistryResult<Type> {
        let name = name.into();
        if self.types.contains_key(&name) {
            return Err(RegistryError::DuplicateTypeName(name));
        }
        let ty = Type::with_members(name.clone(), external_name, members);
        self.types.insert(name, ty.clone());
        Ok(ty)
    }

    /// Declare that values of `satisfier` may flow into `capability`.
    /// Both types must already be registered.
    pub fn add_capability(&mut self, capability: &str, satisfier: &str) -> RegistryResult<()> {
        for name in [capability, satisfier] {
            if !self.types.contains_key(name) {
                return Err(RegistryError::UnknownType(name.to_string()));
            }
        }
        self.capabilities.insert(capability, satisfier);
        Ok(())
    }

    /// Build the immutable Registry.
    pub fn build(self) -> Registry {
        Registry::new(self.types, self.capabilities, self.builtins)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
