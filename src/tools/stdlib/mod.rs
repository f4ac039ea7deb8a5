//! Standard library tools for funlang

pub mod io_basic;

pub use io_basic::{format_line, Println};

use crate::tools::ToolRegistry;

/// Register all standard library tools
pub fn register_all(registry: &mut ToolRegistry) {
    registry.register(Println::stdout());
}
