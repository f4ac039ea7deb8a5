//! Runtime execution for funlang programs
//!
//! A tree-walking evaluator over snapshot-copied scopes. Variables are shared
//! cells, so a closure and the scope it came from observe each other's writes.

mod config;
mod environment;
mod evaluator;
mod function;
mod interpreter;
mod operators;
mod value;

pub use config::EvalConfig;
pub use environment::{Binding, BindingTable, Scope};
pub use evaluator::Evaluator;
pub use function::{Closure, Function};
pub use interpreter::Interpreter;
pub use operators::apply_binary_op;
pub use value::{is_truthy, Value, ValueCell};
