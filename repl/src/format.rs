//! Output formatting utilities for the REPL.

use plc_core::Value;
use plc_parser::Program;

/// Format a value for display in the REPL.
///
/// Unlike `print`, strings and characters are shown quoted.
pub fn format_value(v: &Value) -> String {
    match v {
        Value::String(s) => format!("\"{}\"", s),
        Value::Character(c) => format!("'{}'", c),
        Value::Sequence(items) => {
            let items: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", items.join(", "))
        }
        other => other.to_string(),
    }
}

/// One-line summary of a parsed program for verbose output.
pub fn format_summary(program: &Program) -> String {
    let statements: usize = program.methods.iter().map(|m| m.statements.len()).sum();
    format!(
        "{} fields, {} methods, {} top-level statements",
        program.fields.len(),
        program.methods.len(),
        statements
    )
}

/// Print help information.
pub fn print_help() {
    println!("PLC REPL Commands:");
    println!("  verbose        Toggle verbose mode");
    println!("  help           Show this help");
    println!("  quit, exit     Exit");
    println!();
    println!("Input:");
    println!("  DEF ... END    Define a method");
    println!("  LET ...;       Define a variable");
    println!("  <stmt>;        Run statements");
    println!("  <expr>         Evaluate and show an expression");
}
