//! Statement completions.

use plc_core::Value;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Fell through to the next statement.
    Normal,
    /// Executed a RETURN; the value travels up to the enclosing call frame.
    Return(Value),
}

impl Completion {
    pub fn is_return(&self) -> bool {
        matches!(self, Completion::Return(_))
    }

    /// The value a call frame produces when its body finishes this way.
    pub fn into_value(self) -> Value {
        match self {
            Completion::Normal => Value::Nil,
            Completion::Return(value) => value,
        }
    }
}
