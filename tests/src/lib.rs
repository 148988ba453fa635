//! PLC Integration Test Framework
//!
//! Provides a fluent API for writing end-to-end tests against PLC.
//!
//! # Structure
//!
//! - **programs/** - `.plc` files split into steps with `--# name` markers;
//!   every step is a complete program with its own `main`
//! - **tests/** - Test orchestration (Rust: program file + per-step assertions)
//!
//! # Example
//!
//! ```ignore
//! use plc_tests::prelude::*;
//!
//! pub fn scenario() -> Scenario {
//!     Scenario::new("recursion")
//!         .program("recursion.plc")
//!         .step("factorial", |a| a.returns(120))
//!         .step("countdown", |a| a.prints(["3", "2", "1"]))
//! }
//!
//! #[test]
//! fn test() {
//!     scenario().run().unwrap();
//! }
//! ```

mod assertion;
mod error;
mod loader;
mod runner;
mod scenario;

pub use assertion::{Assertion, AssertionBuilder, Outcome};
pub use error::{ScenarioError, ScenarioResult};
pub use loader::ProgramFile;
pub use runner::{run_program, Mode};
pub use scenario::Scenario;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::assertion::{Assertion, AssertionBuilder, Outcome};
    pub use crate::error::{ScenarioError, ScenarioResult};
    pub use crate::runner::{run_program, Mode};
    pub use crate::scenario::Scenario;
    pub use plc_core::Value;
}
