//! Command-line options.

/// Options for the `plc` binary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Stage diagnostics on stderr.
    pub verbose: bool,
    /// Analyze without running.
    pub check: bool,
    /// Run without analysis.
    pub script: bool,
    /// Source files, run in order.
    pub files: Vec<String>,
}

impl Config {
    /// Parse arguments (without the program name).
    pub fn from_args<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        for arg in args {
            match arg.as_str() {
                "-v" | "--verbose" => config.verbose = true,
                "--check" => config.check = true,
                "--script" => config.script = true,
                flag if flag.starts_with('-') => {
                    return Err(format!("Unknown option: {}", flag));
                }
                _ => config.files.push(arg),
            }
        }

        if config.check && config.script {
            return Err("--check and --script cannot be combined".to_string());
        }
        Ok(config)
    }
}
