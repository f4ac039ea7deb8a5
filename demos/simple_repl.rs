//! Simple REPL (Read-Eval-Print Loop) for funlang
//!
//! Usage: cargo run --example simple_repl
//!
//! Declarations persist between lines; `clear` forgets them.

use funlang::{EvalConfig, Interpreter};
use std::io::{self, Write};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }

    println!("funlang REPL v{}", funlang::VERSION);
    println!("Type 'exit' to quit, 'help' for examples.");
    println!();

    let config = EvalConfig::from_env();
    let mut interpreter = Interpreter::new().with_config(config);
    let mut line_num = 1;

    loop {
        print!("fun[{}]> ", line_num);
        io::stdout().flush()?;

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(err) => {
                eprintln!("Error reading input: {}", err);
                continue;
            }
        }

        match input.trim() {
            "" => continue,
            "exit" | "quit" => break,
            "help" => {
                print_help();
                continue;
            }
            "clear" => {
                interpreter.reset();
                println!("Environment cleared.");
                continue;
            }
            code => match funlang::run(code, &mut interpreter) {
                Ok(Some(value)) => println!("  => {}", value),
                Ok(None) => {}
                Err(err) => eprintln!("  error: {}", err),
            },
        }

        line_num += 1;
    }

    Ok(())
}

fn print_help() {
    println!();
    println!("Examples:");
    println!("  var x = 10");
    println!("  x = x * 2 println(x)");
    println!("  fun sq(n) {{ return n * n }}");
    println!("  println(sq(x), sq(3))");
    println!("  return sq(4)              // shows => 16");
    println!();
    println!("Commands: help, clear, exit");
    println!();
}
