//! Core REPL state and execution.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::rc::Rc;

use plc_analyzer::Analyzer;
use plc_core::{Scope, Value};
use plc_interpreter::{Interpreter, Output};
use plc_parser::{parse_program, Program};
use plc_registry::Registry;

use crate::block::{parse_block, Block};
use crate::format::{format_summary, format_value, print_help};

/// REPL state.
pub struct Repl {
    registry: Registry,
    /// Live bindings. Like `analysis`, each accepted input nests one scope deeper.
    interpreter: Interpreter,
    /// Where analysis of the next interactive input starts.
    /// Each accepted input nests one scope deeper, so earlier definitions stay visible.
    analysis: Rc<Scope>,
    output: Output,
    verbose: bool,
    script: bool,
}

impl Repl {
    /// Create a new REPL instance printing to stdout.
    pub fn new() -> Self {
        Self::with_output(Output::Stdout)
    }

    /// Create a REPL whose programs print to `output`.
    pub fn with_output(output: Output) -> Self {
        let registry = Registry::builtin();
        let interpreter = Interpreter::new(&registry).with_output(output.clone());
        let analysis = Rc::clone(Analyzer::new(&registry).scope());
        Self {
            registry,
            interpreter,
            analysis,
            output,
            verbose: false,
            script: false,
        }
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Skip static analysis and rely on the interpreter's dynamic checks.
    pub fn set_script(&mut self, script: bool) {
        self.script = script;
    }

    /// Toggle verbose mode.
    pub fn toggle_verbose(&mut self) {
        self.verbose = !self.verbose;
        println!("Verbose mode: {}", self.verbose);
    }

    // ==================== Whole Programs ====================

    /// Parse and analyze a program without running it.
    pub fn check_source(&self, source: &str) -> Result<Program, String> {
        let program = self.parse_source(source)?;
        Analyzer::new(&self.registry)
            .analyze(&program)
            .map_err(|e| format!("Semantic error: {}", e))?;
        if self.verbose {
            eprintln!("[analyze] ok");
        }
        Ok(program)
    }

    /// Run a program in a fresh interpreter and return what `main()` returned.
    pub fn run_source(&self, source: &str) -> Result<Value, String> {
        let program = if self.script {
            self.parse_source(source)?
        } else {
            self.check_source(source)?
        };

        let interpreter = Interpreter::new(&self.registry).with_output(self.output.clone());
        let value = interpreter
            .run(&program)
            .map_err(|e| format!("Runtime error: {}", e))?;
        if self.verbose {
            eprintln!("[run] main returned {}", format_value(&value));
        }
        Ok(value)
    }

    /// Check a file.
    pub fn check_file(&self, path: &Path) -> Result<(), String> {
        let content = read_file(path)?;
        self.check_source(&content).map(|_| ())
    }

    /// Run a file.
    pub fn run_file(&self, path: &Path) -> Result<Value, String> {
        let content = read_file(path)?;
        if self.verbose {
            eprintln!("Loading: {}", path.display());
        }
        self.run_source(&content)
    }

    fn parse_source(&self, source: &str) -> Result<Program, String> {
        let program = parse_program(source).map_err(|e| format!("Parse error: {}", e))?;
        if self.verbose {
            eprintln!("[parse] {}", format_summary(&program));
        }
        Ok(program)
    }

    // ==================== Interactive Input ====================

    /// Execute one complete piece of interactive input.
    ///
    /// Returns the text to show: a bare expression's value, a note for a
    /// definition, or nothing for statements.
    pub fn execute(&mut self, input: &str) -> Result<String, String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let block = parse_block(trimmed).map_err(|e| format!("Parse error: {}", e))?;
        let analyzer = Analyzer::with_scope(&self.registry, &self.analysis);
        if !self.script {
            let analyzed = match &block {
                Block::Method(method) => analyzer.analyze_method(method),
                Block::Stmts(stmts) => stmts.iter().try_for_each(|s| analyzer.analyze_stmt(s)),
                Block::Expr(expr) => analyzer.analyze_expr(expr).map(|ty| {
                    if self.verbose {
                        eprintln!("[analyze] {}", ty);
                    }
                }),
            };
            analyzed.map_err(|e| format!("Semantic error: {}", e))?;
        }

        // Definitions land in a child scope that is kept only if the whole input runs.
        let session = Interpreter::with_scope(&self.registry, self.interpreter.scope())
            .with_output(self.output.clone());
        let shown = match &block {
            Block::Method(method) => session.execute_method(method).map(|()| {
                format!("Defined {}/{}", method.name, method.parameters.len())
            }),
            Block::Stmts(stmts) => stmts
                .iter()
                .try_for_each(|s| session.execute(s).map(|_| ()))
                .map(|()| String::new()),
            Block::Expr(expr) => session
                .evaluate(expr)
                .map(|value| format_value(&value)),
        }
        .map_err(|e| format!("Runtime error: {}", e))?;

        self.interpreter = session;
        self.analysis = Rc::clone(analyzer.scope());
        Ok(shown)
    }

    /// Run the interactive REPL.
    pub fn interactive(&mut self) {
        println!("PLC REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type 'help' for commands, 'quit' to exit");
        println!();

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut buffer = String::new();

        loop {
            let prompt = if buffer.is_empty() { "plc> " } else { "....> " };
            print!("{}", prompt);
            let _ = stdout.flush();

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }

            if buffer.is_empty() {
                match line.trim() {
                    "quit" | "exit" => break,
                    "help" => {
                        print_help();
                        continue;
                    }
                    "verbose" => {
                        self.toggle_verbose();
                        continue;
                    }
                    _ => {}
                }
            }

            buffer.push_str(&line);
            match parse_block(&buffer) {
                Err(e) if e.is_eof() && !buffer.trim().is_empty() => continue,
                _ => {}
            }

            let input = std::mem::take(&mut buffer);
            match self.execute(&input) {
                Ok(output) if !output.is_empty() => println!("{}", output),
                Ok(_) => {}
                Err(e) => eprintln!("Error: {}", e),
            }
        }

        println!("Goodbye!");
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}
