//! Example: Execute snakelet scripts from files, printing the final globals
//!
//! Usage: cargo run --example run_file <script.py>

use snakelet::{run_source, InterpreterConfig, StdinSource};
use std::env;
use std::fs;
use std::io;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo run --example run_file <script.py>");
        process::exit(1);
    }

    let file_path = &args[1];

    let code = match fs::read_to_string(file_path) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("Error reading file '{}': {}", file_path, err);
            process::exit(1);
        }
    };

    println!("Executing: {}", file_path);
    println!("{}", "=".repeat(60));

    let stdout = io::stdout();
    match run_source(&code, stdout.lock(), StdinSource, InterpreterConfig::from_env()) {
        Ok(symbols) => {
            println!("{}", "=".repeat(60));
            if symbols.is_empty() {
                println!("(no globals)");
            } else {
                println!("{} globals:", symbols.len());
            }
            for name in symbols.names() {
                if let Some(value) = symbols.get(&name) {
                    println!("{} = {} ({})", name, value, value.type_name());
                }
            }
        }
        Err(err) => {
            match err.line() {
                Some(line) => eprintln!("\nError [{:?}] at line {}: {}", err.classify(), line, err),
                None => eprintln!("\nError [{:?}]: {}", err.classify(), err),
            }
            process::exit(1);
        }
    }
}
