//! Funlang Parser Module
//!
//! Parses the token stream into an Abstract Syntax Tree (AST).

mod ast;
mod source_parser;

pub use ast::{BinaryOp, Block, Expression, FunctionDecl, Precedence, Statement};
pub use source_parser::Parser;
