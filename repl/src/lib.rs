//! PLC REPL library - run, check and interactively evaluate PLC programs.
//!
//! Split into modules:
//!
//! - `config`: Command-line options
//! - `repl`: Core REPL state and execution
//! - `block`: Classifying and collecting multi-line input
//! - `format`: Help text and diagnostics

mod block;
mod config;
mod format;
mod repl;

pub use block::{parse_block, Block};
pub use config::Config;
pub use format::{format_summary, format_value, print_help};
pub use repl::Repl;
