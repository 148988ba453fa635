//! PLC Analyzer
//!
//! Name resolution and type checking against the Registry.
//! Fills the type and binding slots of a parsed tree in place:
//! - every expression records its type
//! - every access and call records the binding it resolved to
//! - every declaration, field and method records the binding it introduced

mod analyzer;
mod error;

pub use analyzer::Analyzer;
pub use error::{AnalyzerResult, SemanticError};
