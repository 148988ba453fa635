//! Running a single program through the pipeline.

use plc_analyzer::Analyzer;
use plc_core::Value;
use plc_interpreter::{Interpreter, Output};
use plc_parser::parse_program;
use plc_registry::Registry;

use crate::assertion::Outcome;

/// How far a step goes through the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Parse, analyze, then run.
    #[default]
    Checked,
    /// Parse and run; the interpreter's dynamic checks are the only checks.
    Script,
    /// Parse and analyze only.
    AnalyzeOnly,
}

/// Run one program and collect what it returned and printed.
///
/// Errors are prefixed with the stage that raised them:
/// `parse error:`, `semantic error:` or `runtime error:`.
pub fn run_program(source: &str, mode: Mode) -> Result<Outcome, String> {
    let registry = Registry::builtin();
    let program = parse_program(source).map_err(|e| format!("parse error: {}", e))?;

    if mode != Mode::Script {
        Analyzer::new(&registry)
            .analyze(&program)
            .map_err(|e| format!("semantic error: {}", e))?;
    }
    if mode == Mode::AnalyzeOnly {
        return Ok(Outcome {
            value: Value::Nil,
            output: Vec::new(),
        });
    }

    let (output, buffer) = Output::captured();
    let interpreter = Interpreter::new(&registry).with_output(output);
    let value = interpreter
        .run(&program)
        .map_err(|e| format!("runtime error: {}", e))?;

    Ok(Outcome {
        value,
        output: buffer.take(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_prefixes() {
        let parse = run_program("DEF", Mode::Checked).unwrap_err();
        let semantic = run_program("", Mode::Checked).unwrap_err();
        let runtime = run_program("DEF main(): Integer DO RETURN 1 / 0; END", Mode::Checked)
            .unwrap_err();

        assert!(parse.starts_with("parse error: "));
        assert!(semantic.starts_with("semantic error: "));
        assert_eq!(runtime, "runtime error: Division by zero");
    }

    #[test]
    fn test_analyze_only_does_not_run() {
        let outcome = run_program(
            "DEF main(): Integer DO print(1); RETURN 1; END",
            Mode::AnalyzeOnly,
        )
        .unwrap();
        assert_eq!(outcome.value, Value::Nil);
        assert!(outcome.output.is_empty());
    }
}
