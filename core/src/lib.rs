//! PLC Core Types
//!
//! This crate provides the foundational types shared by the analyzer and the interpreter:
//! - Nominal types (Type) with their attached member scope
//! - Lexical environments (Scope) holding variable and function bindings
//! - Runtime values (the Value enum and object instances)
//! - Runtime error types

mod error;
mod scope;
mod types;
mod value;

pub use error::*;
pub use scope::*;
pub use types::*;
pub use value::*;
