//! PLC Type Registry
//!
//! Catalog of nominal types and their assignability relationships.
//! The registry is immutable after construction via RegistryBuilder.

mod builder;
mod registry;
mod types;

pub use builder::{RegistryBuilder, RegistryError, RegistryResult};
pub use registry::Registry;
pub(crate) use registry::Builtins;
pub use types::*;
