//! PLC Interpreter
//!
//! Tree-walking evaluation of parsed programs:
//! - runs with or without prior analysis, resolving names against live scopes
//! - methods are closures over their defining scope
//! - RETURN travels upward as a `Completion` until a call frame catches it
//! - `print` writes to a configurable `Output`

mod completion;
mod interpreter;
mod ops;
mod output;

pub use completion::Completion;
pub use interpreter::Interpreter;
pub use ops::{apply_binary, divide_decimal};
pub use output::{Output, OutputBuffer};
