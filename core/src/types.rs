//! Nominal types.

use crate::Scope;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A nominal type.
///
/// Types are cheap to clone: every clone shares the same definition. Two types
/// are equal when their names are equal; the registry guarantees names are unique.
#[derive(Clone)]
pub struct Type {
    inner: Rc<TypeDef>,
}

struct TypeDef {
    name: String,
    external_name: String,
    members: Rc<Scope>,
}

impl Type {
    /// Create a type with an empty member scope.
    pub fn new(name: impl Into<String>, external_name: impl Into<String>) -> Self {
        Self::with_members(name, external_name, Scope::root())
    }

    /// Create a type whose fields and methods live in `members`.
    pub fn with_members(
        name: impl Into<String>,
        external_name: impl Into<String>,
        members: Rc<Scope>,
    ) -> Self {
        Self {
            inner: Rc::new(TypeDef {
                name: name.into(),
                external_name: external_name.into(),
                members,
            }),
        }
    }

    /// The name programs refer to this type by.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The identifier of this type in the target environment.
    pub fn external_name(&self) -> &str {
        &self.inner.external_name
    }

    /// The scope exposing this type's member fields and methods.
    pub fn members(&self) -> &Rc<Scope> {
        &self.inner.members
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.inner.name == other.inner.name
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.name.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({})", self.inner.name)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}
