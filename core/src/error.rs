//! Runtime error types.

use thiserror::Error;

/// Errors raised while executing a program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// No variable with this name is visible.
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String },

    /// No function with this name and arity is visible.
    #[error("Undefined function '{name}/{arity}'")]
    UndefinedFunction { name: String, arity: usize },

    /// A function was invoked with the wrong number of arguments.
    #[error("Function '{name}' expects {expected} arguments, got {actual}")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// A value of the wrong kind reached an operation.
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Operator applied to operands it does not support.
    #[error("Invalid operator '{op}' for values {left} and {right}")]
    InvalidOperator {
        op: String,
        left: String,
        right: String,
    },

    /// Member access on something that is not an object.
    #[error("Cannot access member '{member}' on {actual}")]
    InvalidReceiver { member: String, actual: String },

    /// The receiver's type has no such member.
    #[error("Unknown member '{member}' on type '{type_name}'")]
    UnknownMember { member: String, type_name: String },

    /// Assignment to something other than a variable or field.
    #[error("Invalid assignment target")]
    InvalidAssignmentTarget,

    #[error("Division by zero")]
    DivisionByZero,

    /// A RETURN reached the top level without an enclosing call.
    #[error("RETURN outside of a function")]
    ReturnOutsideFunction,
}

impl RuntimeError {
    pub fn undefined_variable(name: impl Into<String>) -> Self {
        Self::UndefinedVariable { name: name.into() }
    }

    pub fn undefined_function(name: impl Into<String>, arity: usize) -> Self {
        Self::UndefinedFunction {
            name: name.into(),
            arity,
        }
    }

    pub fn arity_mismatch(name: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ArityMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }

    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_operator(
        op: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self::InvalidOperator {
            op: op.into(),
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn invalid_receiver(member: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::InvalidReceiver {
            member: member.into(),
            actual: actual.into(),
        }
    }

    pub fn unknown_member(member: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::UnknownMember {
            member: member.into(),
            type_name: type_name.into(),
        }
    }
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
