//! Example: Execute funlang scripts from files
//!
//! Usage: cargo run --example run_file <script.fun> [--ast]
//!
//! Set `RUST_LOG=funlang=trace` to see calls and definitions on stderr, and
//! `FUNLANG_MAX_ITERATIONS` / `FUNLANG_MAX_CALL_DEPTH` to bound runaway scripts.

use anyhow::{bail, Context, Result};
use funlang::{EvalConfig, Interpreter};
use std::env;
use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    init_tracing();

    let mut args = env::args().skip(1);
    let Some(file_path) = args.next() else {
        eprintln!("Usage: cargo run --example run_file <script.fun> [--ast]");
        eprintln!("\nExample scripts in demos/:");
        eprintln!("  - fibonacci.fun");
        eprintln!("  - closures.fun");
        eprintln!("  - short_circuit.fun");
        std::process::exit(1);
    };
    let dump_ast = match args.next().as_deref() {
        None => false,
        Some("--ast") => true,
        Some(other) => bail!("unknown option '{}'", other),
    };

    let code = fs::read_to_string(&file_path)
        .with_context(|| format!("Error reading file '{}'", file_path))?;

    let program = funlang::parse_program(&code)
        .with_context(|| format!("Failed to parse '{}'", file_path))?;

    if dump_ast {
        println!("{}", serde_json::to_string_pretty(&program)?);
        return Ok(());
    }

    let mut interpreter = Interpreter::new().with_config(EvalConfig::from_env());
    if let Some(value) = interpreter
        .execute(&program)
        .with_context(|| format!("Execution of '{}' aborted", file_path))?
    {
        eprintln!("returned {}", value);
    }

    Ok(())
}

/// Logs go to stderr so they never interleave with program output
fn init_tracing() {
    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
