//! Assertion types and builders for verifying step results.

use plc_core::Value;

use crate::error::{ScenarioError, ScenarioResult};

/// What a successful step produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The value `main()` returned (Nil when the step was only analyzed).
    pub value: Value,
    /// Lines written by `print`.
    pub output: Vec<String>,
}

/// A complete assertion for a step result.
#[derive(Default)]
pub struct Assertion {
    // Success assertions
    pub returns: Option<Value>,
    pub prints: Option<Vec<String>>,
    pub printed: Vec<String>,

    // Error assertions
    pub error: Option<String>,
    pub error_pattern: Option<String>,

    // Custom assertion function
    #[allow(clippy::type_complexity)]
    pub custom: Option<Box<dyn Fn(&Outcome) -> bool>>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("returns", &self.returns)
            .field("prints", &self.prints)
            .field("printed", &self.printed)
            .field("error", &self.error)
            .field("error_pattern", &self.error_pattern)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Assertion {
    /// Create a new empty assertion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the assertion against a result.
    pub fn verify(&self, step: &str, result: &Result<Outcome, String>) -> ScenarioResult<()> {
        // Check error expectations first
        if let Some(ref expected_error) = self.error {
            return match result {
                Err(msg) if msg.contains(expected_error) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', got: {}", expected_error, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "expected error containing '{}', but step succeeded",
                        expected_error
                    ),
                )),
            };
        }

        if let Some(ref pattern) = self.error_pattern {
            let re = regex_lite::Regex::new(pattern).map_err(|e| {
                ScenarioError::assertion_failed(step, format!("invalid regex pattern: {}", e))
            })?;
            return match result {
                Err(msg) if re.is_match(msg) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error matching '{}', got: {}", pattern, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error matching '{}', but step succeeded", pattern),
                )),
            };
        }

        let outcome = result.as_ref().map_err(|msg| {
            ScenarioError::assertion_failed(step, format!("step failed: {}", msg))
        })?;

        if let Some(ref expected) = self.returns {
            if &outcome.value != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected main() to return {}, got {}", expected, outcome.value),
                ));
            }
        }

        if let Some(ref expected) = self.prints {
            if &outcome.output != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected output {:?}, got {:?}", expected, outcome.output),
                ));
            }
        }

        for line in &self.printed {
            if !outcome.output.contains(line) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected output to contain {:?}, got {:?}", line, outcome.output),
                ));
            }
        }

        if let Some(ref custom) = self.custom {
            if !custom(outcome) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    "custom assertion failed",
                ));
            }
        }

        Ok(())
    }
}

/// Builder for assertions.
#[derive(Default)]
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> Assertion {
        self.assertion
    }

    /// Assert the value `main()` returns.
    pub fn returns(mut self, value: impl Into<Value>) -> Self {
        self.assertion.returns = Some(value.into());
        self
    }

    /// Assert the complete printed output, line by line.
    pub fn prints<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assertion.prints = Some(lines.into_iter().map(Into::into).collect());
        self
    }

    /// Assert that nothing was printed.
    pub fn silent(mut self) -> Self {
        self.assertion.prints = Some(Vec::new());
        self
    }

    /// Assert that one printed line equals `line`.
    pub fn printed(mut self, line: impl Into<String>) -> Self {
        self.assertion.printed.push(line.into());
        self
    }

    /// Assert that the step fails with a message containing `contains`.
    pub fn error(mut self, contains: impl Into<String>) -> Self {
        self.assertion.error = Some(contains.into());
        self
    }

    /// Assert that the step fails with a message matching a regex.
    pub fn error_matches(mut self, pattern: impl Into<String>) -> Self {
        self.assertion.error_pattern = Some(pattern.into());
        self
    }

    /// Add a custom check on the outcome.
    pub fn assert_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Outcome) -> bool + 'static,
    {
        self.assertion.custom = Some(Box::new(f));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(value: i64, output: &[&str]) -> Result<Outcome, String> {
        Ok(Outcome {
            value: Value::from(value),
            output: output.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn test_returns_and_prints() {
        let assertion = AssertionBuilder::new().returns(0).prints(["a", "b"]).build();
        assert!(assertion.verify("s", &outcome(0, &["a", "b"])).is_ok());
        assert!(assertion.verify("s", &outcome(1, &["a", "b"])).is_err());
        assert!(assertion.verify("s", &outcome(0, &["a"])).is_err());
    }

    #[test]
    fn test_error_expectations() {
        let failed: Result<Outcome, String> = Err("runtime error: Division by zero".into());

        let contains = AssertionBuilder::new().error("Division").build();
        let pattern = AssertionBuilder::new().error_matches("^runtime error: ").build();
        let other = AssertionBuilder::new().error_matches("^semantic error: ").build();

        assert!(contains.verify("s", &failed).is_ok());
        assert!(pattern.verify("s", &failed).is_ok());
        assert!(other.verify("s", &failed).is_err());
        assert!(contains.verify("s", &outcome(0, &[])).is_err());
    }

    #[test]
    fn test_unexpected_failure_reports_message() {
        let failed: Result<Outcome, String> = Err("parse error: boom".into());
        let err = AssertionBuilder::new().returns(0).build().verify("s", &failed).unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
