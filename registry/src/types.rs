//! Built-in type names and the capability index.

use std::collections::{HashMap, HashSet};

/// Names of the types every registry carries.
pub mod builtin {
    pub const ANY: &str = "Any";
    pub const NIL: &str = "Nil";
    pub const COMPARABLE: &str = "Comparable";
    pub const BOOLEAN: &str = "Boolean";
    pub const INTEGER: &str = "Integer";
    pub const DECIMAL: &str = "Decimal";
    pub const CHARACTER: &str = "Character";
    pub const STRING: &str = "String";
    pub const INTEGER_ITERABLE: &str = "IntegerIterable";
}

/// Which types satisfy each capability type.
///
/// A capability is a pseudo-type (such as Comparable) that accepts values of
/// every type listed for it.
#[derive(Debug, Clone, Default)]
pub struct CapabilityIndex {
    satisfied_by: HashMap<String, HashSet<String>>,
}

impl CapabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, capability: &str, satisfier: &str) {
        self.satisfied_by
            .entry(capability.to_string())
            .or_default()
            .insert(satisfier.to_string());
    }

    /// Whether `type_name` satisfies `capability`.
    pub fn satisfies(&self, capability: &str, type_name: &str) -> bool {
        self.satisfied_by
            .get(capability)
            .is_some_and(|set| set.contains(type_name))
    }

    /// Whether `name` is a capability type.
    pub fn is_capability(&self, name: &str) -> bool {
        self.satisfied_by.contains_key(name)
    }
}
