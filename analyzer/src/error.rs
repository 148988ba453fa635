//! Analyzer error types.

use plc_core::Type;
use thiserror::Error;

/// Errors that can occur during analysis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    /// Unknown type name.
    #[error("Unknown type '{name}'")]
    UnknownType { name: String },

    /// No zero-argument main returning Integer.
    #[error("Missing method 'main' with no parameters and return type Integer")]
    MissingMain,

    /// More than one zero-argument main.
    #[error("Method 'main' with no parameters is defined more than once")]
    DuplicateMain,

    /// Declaration with neither a type nor an initializer.
    #[error("Declaration of '{name}' needs a type or an initial value")]
    InvalidDeclaration { name: String },

    /// Assignment to something other than a variable or field.
    #[error("Cannot assign to a {kind} expression")]
    InvalidAssignmentTarget { kind: String },

    /// Value type does not flow into the expected type.
    #[error("Type {source_type} is not assignable to {target}")]
    NotAssignable { target: String, source_type: String },

    /// A construct whose body must not be empty.
    #[error("{construct} body must contain at least one statement")]
    EmptyBlock { construct: String },

    /// Literal outside its type's range.
    #[error("{type_name} literal {literal} is out of range")]
    LiteralOutOfRange { literal: String, type_name: String },

    /// Expression with no effect used as a statement.
    #[error("A {kind} expression cannot be used as a statement")]
    InvalidStatementExpression { kind: String },

    /// Parentheses around something other than a binary expression.
    #[error("Only binary expressions may be grouped, found {kind}")]
    InvalidGroup { kind: String },

    /// Undefined variable.
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String },

    /// No function with this name and arity.
    #[error("Undefined function '{name}/{arity}'")]
    UndefinedFunction { name: String, arity: usize },

    /// The receiver's type has no such member.
    #[error("Unknown member '{member}' on type '{type_name}'")]
    UnknownMember { member: String, type_name: String },

    /// Invalid operator for types.
    #[error("Invalid operator '{op}' for types {left} and {right}")]
    InvalidOperator {
        op: String,
        left: String,
        right: String,
    },

    /// RETURN outside any method body.
    #[error("RETURN outside of a method")]
    ReturnOutsideMethod,
}

impl SemanticError {
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    pub fn invalid_declaration(name: impl Into<String>) -> Self {
        Self::InvalidDeclaration { name: name.into() }
    }

    pub fn invalid_assignment_target(kind: impl Into<String>) -> Self {
        Self::InvalidAssignmentTarget { kind: kind.into() }
    }

    pub fn not_assignable(target: &Type, source: &Type) -> Self {
        Self::NotAssignable {
            target: target.name().to_string(),
            source_type: source.name().to_string(),
        }
    }

    pub fn empty_block(construct: impl Into<String>) -> Self {
        Self::EmptyBlock {
            construct: construct.into(),
        }
    }

    pub fn literal_out_of_range(literal: impl ToString, type_name: impl Into<String>) -> Self {
        Self::LiteralOutOfRange {
            literal: literal.to_string(),
            type_name: type_name.into(),
        }
    }

    pub fn invalid_statement_expression(kind: impl Into<String>) -> Self {
        Self::InvalidStatementExpression { kind: kind.into() }
    }

    pub fn invalid_group(kind: impl Into<String>) -> Self {
        Self::InvalidGroup { kind: kind.into() }
    }

    pub fn undefined_variable(name: impl Into<String>) -> Self {
        Self::UndefinedVariable { name: name.into() }
    }

    pub fn undefined_function(name: impl Into<String>, arity: usize) -> Self {
        Self::UndefinedFunction {
            name: name.into(),
            arity,
        }
    }

    pub fn unknown_member(member: impl Into<String>, ty: &Type) -> Self {
        Self::UnknownMember {
            member: member.into(),
            type_name: ty.name().to_string(),
        }
    }

    pub fn invalid_operator(op: impl ToString, left: &Type, right: &Type) -> Self {
        Self::InvalidOperator {
            op: op.to_string(),
            left: left.name().to_string(),
            right: right.name().to_string(),
        }
    }
}

/// Result type for analyzer operations.
pub type AnalyzerResult<T> = Result<T, SemanticError>;
