//! Loader for program files.
//!
//! Splits `.plc` files into steps at step markers (`--# step_name`).

use std::collections::HashMap;
use std::path::Path;

use crate::error::{ScenarioError, ScenarioResult};

/// A program file split into named steps.
#[derive(Debug, Clone)]
pub struct ProgramFile {
    /// The raw file content.
    pub source: String,
    /// Map of step name to program source.
    pub steps: HashMap<String, String>,
    /// Steps in order of appearance.
    pub step_order: Vec<String>,
    /// Parameters per step (step name -> (param name -> value))
    pub step_params: HashMap<String, HashMap<String, String>>,
}

impl ProgramFile {
    /// Split a program file given as a string.
    ///
    /// Lines starting with `--` are markers or comments and never reach the
    /// PLC parser. `-- @param $name = value` replaces `$name` in its step.
    pub fn parse(source: &str) -> ScenarioResult<Self> {
        let mut steps = HashMap::new();
        let mut step_order = Vec::new();
        let mut step_params: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_step: Option<String> = None;
        let mut current_content = String::new();
        let mut current_params: HashMap<String, String> = HashMap::new();

        let mut finish = |name: &str, content: &str, params: &HashMap<String, String>| {
            let content = content.trim();
            if !content.is_empty() {
                steps.insert(name.to_string(), content.to_string());
            }
            if !params.is_empty() {
                step_params.insert(name.to_string(), params.clone());
            }
        };

        for line in source.lines() {
            let trimmed = line.trim();

            if let Some(suffix) = trimmed.strip_prefix("--#") {
                if let Some(ref step_name) = current_step {
                    finish(step_name, &current_content, &current_params);
                }

                let step_name = suffix.trim().to_string();
                if step_name.is_empty() {
                    return Err(ScenarioError::program_parse(
                        "<inline>",
                        "empty step name after --#",
                    ));
                }
                if step_order.contains(&step_name) {
                    return Err(ScenarioError::program_parse(
                        "<inline>",
                        format!("duplicate step '{}'", step_name),
                    ));
                }
                step_order.push(step_name.clone());
                current_step = Some(step_name);
                current_content.clear();
                current_params.clear();
            } else if current_step.is_some() {
                if let Some(param_str) = trimmed.strip_prefix("-- @param ") {
                    if let Some((name, value)) = parse_param_def(param_str) {
                        current_params.insert(name, value);
                    }
                } else if !trimmed.starts_with("--") {
                    current_content.push_str(line);
                    current_content.push('\n');
                }
            }
            // Lines before the first step marker are file-level comments
        }

        if let Some(ref step_name) = current_step {
            finish(step_name, &current_content, &current_params);
        }

        Ok(Self {
            source: source.to_string(),
            steps,
            step_order,
            step_params,
        })
    }

    /// Load and split a program file from disk.
    pub fn load(path: &Path) -> ScenarioResult<Self> {
        let source =
            std::fs::read_to_string(path).map_err(|e| ScenarioError::file_read(path, e))?;
        Self::parse(&source).map_err(|e| ScenarioError::program_parse(path, e.to_string()))
    }

    /// Get the program for a step with parameters substituted.
    pub fn get_step(&self, name: &str) -> Option<String> {
        let program = self.steps.get(name)?;
        let Some(params) = self.step_params.get(name) else {
            return Some(program.clone());
        };

        let mut result = program.clone();
        for (param_name, param_value) in params {
            result = result.replace(&format!("${}", param_name), param_value);
        }
        Some(result)
    }

    /// Get all step names in order.
    pub fn step_names(&self) -> &[String] {
        &self.step_order
    }
}

/// Parse a parameter definition from `$name = value` format.
fn parse_param_def(s: &str) -> Option<(String, String)> {
    let (name, value) = s.split_once('=')?;
    let name = name.trim().trim_start_matches('$').to_string();
    if name.is_empty() {
        return None;
    }
    Some((name, value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_into_steps() {
        let source = r#"
-- Arithmetic programs

--# add
DEF main(): Integer DO RETURN 1 + 1; END

--# hello
-- prints a greeting
DEF main(): Integer DO
    print("Hello, World!");
    RETURN 0;
END
"#;

        let file = ProgramFile::parse(source).unwrap();

        assert_eq!(file.step_order, vec!["add", "hello"]);
        assert!(file.get_step("add").unwrap().contains("1 + 1"));
        let hello = file.get_step("hello").unwrap();
        assert!(hello.contains("print"));
        assert!(!hello.contains("greeting"));
        assert!(file.get_step("missing").is_none());
    }

    #[test]
    fn test_param_substitution() {
        let source = r#"
--# fact
-- @param $n = 10
DEF main(): Integer DO RETURN $n; END
"#;

        let file = ProgramFile::parse(source).unwrap();

        assert_eq!(
            file.get_step("fact").unwrap(),
            "DEF main(): Integer DO RETURN 10; END"
        );
    }

    #[test]
    fn test_rejects_duplicate_and_empty_steps() {
        assert!(ProgramFile::parse("--# a\nx\n--# a\ny").is_err());
        assert!(ProgramFile::parse("--#\nx").is_err());
    }
}
