//! Scenario definition and builder.

use std::path::{Path, PathBuf};

use crate::assertion::{Assertion, AssertionBuilder};
use crate::error::{ScenarioError, ScenarioResult};
use crate::loader::ProgramFile;
use crate::runner::{run_program, Mode};

/// A step in a scenario with its assertion.
#[derive(Debug)]
pub struct Step {
    /// Step name (matches `--# name` in the program file).
    pub name: String,
    /// Assertion to verify the result.
    pub assertion: Assertion,
}

/// A complete test scenario.
pub struct Scenario {
    /// Scenario name (for reporting).
    name: String,
    /// Path to the program file.
    program_path: Option<PathBuf>,
    /// Program file given inline.
    program: Option<ProgramFile>,
    /// Pipeline stages each step goes through.
    mode: Mode,
    /// Steps with assertions.
    steps: Vec<Step>,
    /// Base path for resolving relative paths.
    base_path: PathBuf,
}

impl Scenario {
    /// Create a new scenario with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            program_path: None,
            program: None,
            mode: Mode::default(),
            steps: Vec::new(),
            base_path: programs_root(),
        }
    }

    /// Set the base path for resolving relative paths.
    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Set the program file path (relative to programs/).
    pub fn program(mut self, path: impl Into<PathBuf>) -> Self {
        self.program_path = Some(path.into());
        self
    }

    /// Load the program file from a string.
    pub fn source(mut self, source: &str) -> ScenarioResult<Self> {
        self.program = Some(ProgramFile::parse(source)?);
        Ok(self)
    }

    /// Set how far each step goes through the pipeline.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Add a step with an assertion.
    ///
    /// The step name must match a `--# name` marker in the program file.
    pub fn step<F>(mut self, name: impl Into<String>, assertion_fn: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let name = name.into();
        let assertion = assertion_fn(AssertionBuilder::new()).build();
        self.steps.push(Step { name, assertion });
        self
    }

    /// Run every step and verify its assertion, stopping at the first failure.
    pub fn run(&self) -> ScenarioResult<()> {
        let program = self.load_program()?;
        for step in &self.steps {
            let source = program
                .get_step(&step.name)
                .ok_or_else(|| ScenarioError::step_not_found(&step.name))?;
            let result = run_program(&source, self.mode);
            step.assertion.verify(&step.name, &result)?;
        }
        Ok(())
    }

    /// Get the scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Get the program file, loading it from disk if needed.
    pub fn load_program(&self) -> ScenarioResult<ProgramFile> {
        if let Some(ref program) = self.program {
            return Ok(program.clone());
        }

        match &self.program_path {
            Some(path) => ProgramFile::load(&self.resolve_path(path)),
            None => Err(ScenarioError::missing_program(&self.name)),
        }
    }

    /// Resolve a path relative to the base path.
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }
}

/// The `programs/` directory of this crate.
fn programs_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("programs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_builder() {
        let scenario = Scenario::new("test")
            .program("basics.plc")
            .step("hello", |a| a.prints(["Hello, World!"]))
            .step("add", |a| a.returns(2));

        assert_eq!(scenario.name(), "test");
        assert_eq!(scenario.steps().len(), 2);
    }

    #[test]
    fn test_inline_scenario_runs() {
        let source = r#"
--# add
DEF main(): Integer DO RETURN 1 + 1; END

--# fail
DEF main(): Integer DO RETURN 1 / 0; END
"#;

        Scenario::new("inline")
            .source(source)
            .unwrap()
            .step("add", |a| a.returns(2).silent())
            .step("fail", |a| a.error("Division by zero"))
            .run()
            .unwrap();
    }

    #[test]
    fn test_missing_step_is_reported() {
        let err = Scenario::new("inline")
            .source("--# only\nDEF main(): Integer DO RETURN 0; END")
            .unwrap()
            .step("other", |a| a.returns(0))
            .run()
            .unwrap_err();
        assert!(matches!(err, ScenarioError::StepNotFound { .. }));
    }

    #[test]
    fn test_missing_program() {
        let err = Scenario::new("empty").run().unwrap_err();
        assert!(matches!(err, ScenarioError::MissingProgram { .. }));
    }
}
