//! Tool system for funlang
//!
//! Built-in functions are tools: named, optionally fixed-arity callables that
//! the interpreter binds into its root scope before any program runs.

pub mod stdlib;

use crate::error::{Error, Result};
use crate::runtime::{BindingTable, Function, Scope, Value};
use std::collections::HashMap;
use std::rc::Rc;

/// Tool trait - every built-in function implements this
pub trait Tool {
    /// Name the program calls the tool by
    fn name(&self) -> &str;

    /// Tool description
    fn description(&self) -> &str;

    /// Execute the tool; `None` is delivered to the program as 0
    fn execute(&self, args: &[Value]) -> Result<Option<Value>>;

    /// Check if tool requires specific number of arguments
    fn arity(&self) -> Option<usize> {
        None // None means variadic
    }
}

/// Tool registry
pub struct ToolRegistry {
    tools: HashMap<String, Rc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create new registry with the standard library, printing to stdout
    pub fn new() -> Self {
        let mut registry = ToolRegistry::empty();
        stdlib::register_all(&mut registry);
        registry
    }

    /// Create a registry whose `println` hands its arguments to `sink`
    pub fn with_println(sink: impl Fn(&[Value]) + 'static) -> Self {
        let mut registry = ToolRegistry::new();
        registry.register(stdlib::Println::new(sink));
        registry
    }

    /// Create empty registry (for testing)
    pub fn empty() -> Self {
        ToolRegistry {
            tools: HashMap::new(),
        }
    }

    /// Register a tool, replacing any tool of the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Rc::new(tool));
    }

    /// Get tool by exact name
    pub fn get(&self, name: &str) -> Result<Rc<dyn Tool>> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NameNotFound {
                kind: "function",
                name: name.to_string(),
            })
    }

    /// Check if tool exists
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// List all tool names
    pub fn list_tools(&self) -> Vec<String> {
        let mut names: Vec<_> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get tool count
    pub fn count(&self) -> usize {
        self.tools.len()
    }

    /// Root scope with every tool declared as a function
    pub fn root_scope(&self) -> Scope {
        let functions: BindingTable<Function> = self
            .tools
            .iter()
            .map(|(name, tool)| (name.clone(), Function::Native(Rc::clone(tool))))
            .collect();
        Scope::with_functions(functions)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestTool;

    impl Tool for TestTool {
        fn name(&self) -> &str {
            "answer"
        }

        fn description(&self) -> &str {
            "A test tool"
        }

        fn execute(&self, args: &[Value]) -> Result<Option<Value>> {
            if args.is_empty() {
                Ok(Some(42))
            } else {
                Ok(Some(args[0]))
            }
        }
    }

    #[test]
    fn test_tool_registration() {
        let mut registry = ToolRegistry::empty();
        registry.register(TestTool);

        assert!(registry.has("answer"));
        assert!(!registry.has("ANSWER"));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut registry = ToolRegistry::empty();
        registry.register(TestTool);

        assert!(registry.get("answer").is_ok());
        assert!(matches!(
            registry.get("Answer"),
            Err(Error::NameNotFound { kind: "function", .. })
        ));
    }

    #[test]
    fn test_tool_execution() {
        let tool = TestTool;
        assert_eq!(tool.execute(&[]).unwrap(), Some(42));
        assert_eq!(tool.execute(&[7, 8]).unwrap(), Some(7));
        assert_eq!(tool.arity(), None);
    }

    #[test]
    fn test_standard_library() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.list_tools(), vec!["println".to_string()]);
    }

    #[test]
    fn test_root_scope_declares_tools() {
        let mut registry = ToolRegistry::new();
        registry.register(TestTool);
        let root = registry.root_scope();

        assert!(root.functions.is_declared_here("println"));
        assert_eq!(root.functions.lookup("answer").unwrap().name(), "answer");
        assert!(root.variables.is_empty());
    }
}
