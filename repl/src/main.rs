//! PLC - run, check or interactively evaluate PLC programs.
//!
//! This is the entry point for the `plc` binary.

use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::process;

use plc_repl::{Config, Repl};

const USAGE: &str = "Usage: plc [-v|--verbose] [--check] [--script] [FILE...]";

fn main() {
    let config = match Config::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    let mut repl = Repl::new();
    repl.set_verbose(config.verbose);
    repl.set_script(config.script);

    // Run or check any files passed as arguments
    for file in &config.files {
        let path = Path::new(file);
        let result = if config.check {
            repl.check_file(path)
        } else {
            repl.run_file(path).map(|_| ())
        };
        if let Err(e) = result {
            eprintln!("Error in {}: {}", file, e);
            process::exit(1);
        }
    }
    if !config.files.is_empty() {
        return;
    }

    // Interactive mode if stdin is a terminal, otherwise run the piped program
    let stdin = io::stdin();
    if stdin.is_terminal() {
        repl.interactive();
        return;
    }

    let mut input = String::new();
    if let Err(e) = stdin.lock().read_to_string(&mut input) {
        eprintln!("Error reading stdin: {}", e);
        process::exit(1);
    }
    let result = if config.check {
        repl.check_source(&input).map(|_| ())
    } else {
        repl.run_source(&input).map(|_| ())
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
