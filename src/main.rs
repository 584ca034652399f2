use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use snakelet::{lexer, Interpreter, InterpreterConfig, StdinSource};

/// snakelet runs scripts written in a small, indentation-sensitive,
/// Python-like language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print the token list instead of running the script.
    #[arg(short, long)]
    tokens: bool,

    /// Together with --tokens, print the tokens as a JSON array.
    #[arg(long, requires = "tokens")]
    json: bool,

    /// Maximum number of iterations for any single while loop.
    #[arg(long, value_name = "N")]
    max_iterations: Option<usize>,

    /// Script to run.
    file: PathBuf,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                print!("{}", err);
                process::exit(1);
            }
        },
    };

    if let Err(err) = run(&args) {
        println!("{:#}", err);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("Can not read input file {}", args.file.display()))?;
    let tokens = lexer::tokenize(&source)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.tokens {
        if args.json {
            serde_json::to_writer_pretty(&mut out, &tokens)?;
            writeln!(out)?;
        } else {
            write!(out, "{}", lexer::dump_tokens(&tokens))?;
        }
        return Ok(());
    }

    let mut config = InterpreterConfig::from_env();
    if let Some(limit) = args.max_iterations {
        config = config.with_max_loop_iterations(limit);
    }

    let mut interpreter = Interpreter::with_config(&tokens, out, StdinSource, config);
    interpreter.run()?;
    Ok(())
}
