//! Error types for the funlang interpreter

use thiserror::Error;

use crate::parser::BinaryOp;
use crate::runtime::Value;

/// Funlang interpreter errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Parse errors
    /// Syntax error encountered during parsing
    ///
    /// **Triggered by:** A token that does not fit the grammar
    /// **Example:** `var = 5` (missing variable name)
    #[error("Syntax error at line {line}, column {col}: {message}")]
    SyntaxError {
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        col: usize,
        /// Error description
        message: String,
    },

    /// Lexical error (bad character, oversized literal)
    #[error("Parse error: {0}")]
    ParseError(String),

    // Runtime errors
    /// Reference to a name that is not visible from the current scope
    ///
    /// **Triggered by:** Reading or assigning an undeclared variable, calling an
    /// undefined function, or calling a sibling function declared after the caller
    /// **Example:** `x = 1` (when `x` was never declared with `var`)
    #[error("{kind} '{name}' is not found in current scope")]
    NameNotFound {
        /// "variable" or "function"
        kind: &'static str,
        /// The missing name
        name: String,
    },

    /// A name declared twice directly in the same scope
    ///
    /// **Triggered by:** `var x = 1 var x = 2` in one block
    /// **Prevention:** Shadow in a nested block instead, or assign with `x = 2`
    #[error("{kind} '{name}' already exists in the current scope")]
    DuplicateDeclaration {
        /// "variable" or "function"
        kind: &'static str,
        /// The re-declared name
        name: String,
    },

    /// Function invoked with the wrong number of arguments
    #[error("Expected {expected} arguments, found {found} when calling function {function}")]
    ArityMismatch {
        /// Function name
        function: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        found: usize,
    },

    /// Integer division or modulo by zero
    ///
    /// **Triggered by:** `x / 0`, `x % 0`
    #[error("Arithmetic failure: {left} {op} {right}")]
    ArithmeticFailure {
        /// Operator that failed
        op: BinaryOp,
        /// Left operand
        left: Value,
        /// Right operand
        right: Value,
    },

    // Resource errors
    /// A single `while` ran more iterations than the configured limit
    #[error("Too many iterations (limit: {limit})")]
    TooManyIterations {
        /// Maximum allowed iterations
        limit: usize,
    },

    /// User function calls nested deeper than the configured limit
    #[error("Call depth exceeded (limit: {limit})")]
    CallDepthExceeded {
        /// Maximum allowed depth
        limit: usize,
    },
}

impl Error {
    /// True for errors produced by the scanner or parser
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::SyntaxError { .. } | Error::ParseError(_))
    }
}

/// Result type for funlang operations
pub type Result<T> = std::result::Result<T, Error>;
