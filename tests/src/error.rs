//! Error types for the test framework.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur when running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Failed to read a file.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to split a program file into steps.
    #[error("failed to parse program file '{path}': {message}")]
    ProgramParse { path: PathBuf, message: String },

    /// Assertion failed.
    #[error("assertion failed for step '{step}': {message}")]
    AssertionFailed { step: String, message: String },

    /// Step not found in program file.
    #[error("step '{step}' not found in program file")]
    StepNotFound { step: String },

    /// No program file or inline source.
    #[error("no program specified for scenario '{scenario}'")]
    MissingProgram { scenario: String },
}

impl ScenarioError {
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    pub fn program_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ProgramParse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn step_not_found(step: impl Into<String>) -> Self {
        Self::StepNotFound { step: step.into() }
    }

    pub fn missing_program(scenario: impl Into<String>) -> Self {
        Self::MissingProgram {
            scenario: scenario.into(),
        }
    }
}
