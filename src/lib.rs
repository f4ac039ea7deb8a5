//! # Funlang - A Tiny Imperative Language
//!
//! [![License: MIT](https://img.shields.io/badge/License-MIT-yellow.svg)](https://opensource.org/licenses/MIT)
//!
//! A tree-walking interpreter for a small imperative language whose only
//! runtime type is a 64-bit signed integer. Programs have nested functions
//! with lexical closures, `var` declarations, `while`, `if`/`else`, `return`
//! and short-circuit `||`/`&&`.
//!
//! ## Quick Start
//!
//! ```rust
//! use funlang::{Interpreter, Parser, Scanner};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! # fn main() -> funlang::Result<()> {
//! let code = r#"
//!     fun fib(n) {
//!         if (n <= 1) return n
//!         return fib(n - 1) + fib(n - 2)
//!     }
//!     println(fib(10))
//! "#;
//!
//! // Tokenize (scan)
//! let mut scanner = Scanner::new(code);
//! let tokens = scanner.scan_tokens()?;
//!
//! // Parse into AST
//! let mut parser = Parser::new(tokens);
//! let program = parser.parse()?;
//!
//! // Execute, capturing println output
//! let output = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&output);
//! let mut interpreter = Interpreter::with_println(move |args| {
//!     sink.borrow_mut().push(args.to_vec())
//! });
//! interpreter.execute(&program)?;
//!
//! assert_eq!(*output.borrow(), vec![vec![55]]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! - `fun name(a, b) { ... }` defines a function in the current scope
//! - `var x = expr` declares a variable; without an initializer it holds 0
//! - `x = expr` overwrites an existing variable
//! - `while (cond) stmt`, `if (cond) stmt else stmt`, `return expr`
//! - Operators from weakest: `||`, `&&`, `== !=`, `< <= > >=`, `+ -`, `* / %`
//! - `// comment` runs to the end of the line
//!
//! Statements need no separators. Zero is false, anything else is true.
//!
//! ### Scoping
//!
//! Every block, loop iteration, branch and call gets a child scope that
//! starts as a snapshot of its parent. A function only sees what was visible
//! where it was defined, plus itself:
//!
//! ```rust
//! # fn main() -> funlang::Result<()> {
//! let mut interpreter = funlang::Interpreter::with_println(|_| {});
//! let err = funlang::run("fun a() { b() } fun b() { } a()", &mut interpreter);
//! assert!(err.is_err()); // `b` is declared after `a` captured its scope
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Scanner → Tokens → Parser → AST → Interpreter → println output
//! ```
//!
//! - [`Scanner`] - Tokenizes source code into tokens
//! - [`Parser`] - Parses tokens into an Abstract Syntax Tree (AST)
//! - [`Interpreter`] - Runs programs against a persistent top-level scope
//! - [`Evaluator`] - Evaluates statements and expressions in one scope
//! - [`Scope`] - Snapshot-copied variable and function tables
//! - [`ToolRegistry`] - Built-in functions
//!
//! ## Error Handling
//!
//! Every stage returns [`Result`]; nothing is recovered inside the
//! interpreter. See [`Error`] for the failure kinds.
//!
//! ```rust
//! use funlang::{Error, Interpreter};
//!
//! let mut interpreter = Interpreter::with_println(|_| {});
//! match funlang::run("println(1 / 0)", &mut interpreter) {
//!     Err(Error::ArithmeticFailure { left, right, .. }) => assert_eq!((left, right), (1, 0)),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```
//!
//! ## License
//!
//! MIT

/// Version of the funlang interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod tools;

// Re-export main types
pub use error::{Error, Result};
pub use lexer::{Scanner, Token, TokenKind};
pub use parser::{BinaryOp, Block, Expression, FunctionDecl, Parser, Statement};
pub use runtime::{EvalConfig, Evaluator, Function, Interpreter, Scope, Value, ValueCell};
pub use tools::{Tool, ToolRegistry};

/// Scans and parses `source` into a program
pub fn parse_program(source: &str) -> Result<Block> {
    let tokens = Scanner::new(source).scan_tokens()?;
    Parser::new(tokens).parse()
}

/// Parses `source` and executes it with `interpreter`
pub fn run(source: &str, interpreter: &mut Interpreter) -> Result<Option<Value>> {
    let program = parse_program(source)?;
    interpreter.execute(&program)
}
