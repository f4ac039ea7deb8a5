use crate::error::Result;
use crate::parser::Block;
use crate::runtime::config::EvalConfig;
use crate::runtime::environment::Scope;
use crate::runtime::evaluator::Evaluator;
use crate::runtime::value::Value;
use crate::tools::ToolRegistry;

/// Runs whole programs against a persistent top-level scope
///
/// The root scope holds the registry's built-ins. Programs run in a child of
/// it, so they may shadow a built-in once. Declarations survive between
/// `execute` calls, which is what a REPL needs.
pub struct Interpreter {
    root: Scope,
    globals: Scope,
    config: EvalConfig,
}

impl Interpreter {
    /// Interpreter with the standard built-ins writing to stdout
    pub fn new() -> Self {
        Self::with_registry(ToolRegistry::new())
    }

    /// Interpreter whose built-ins come from `registry`
    pub fn with_registry(registry: ToolRegistry) -> Self {
        let root = registry.root_scope();
        let globals = root.derive_child();
        Interpreter {
            root,
            globals,
            config: EvalConfig::default(),
        }
    }

    /// Interpreter whose `println` hands its arguments to `sink`
    pub fn with_println(sink: impl Fn(&[Value]) + 'static) -> Self {
        Self::with_registry(ToolRegistry::with_println(sink))
    }

    /// Replaces the evaluation limits
    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> EvalConfig {
        self.config
    }

    /// Executes `program` in the top-level scope
    ///
    /// Returns the value of a top-level `return`, if one ran.
    pub fn execute(&mut self, program: &Block) -> Result<Option<Value>> {
        tracing::debug!(statements = program.statements.len(), "executing program");
        let result = self.evaluator().run_block(program);
        tracing::debug!(ok = result.is_ok(), "program finished");
        result
    }

    /// Evaluator over the top-level scope
    pub fn evaluator(&mut self) -> Evaluator<'_> {
        Evaluator::new(&mut self.globals, self.config)
    }

    /// Top-level scope as left by previous programs
    pub fn globals(&self) -> &Scope {
        &self.globals
    }

    /// Forgets every top-level declaration, keeping the built-ins
    pub fn reset(&mut self) {
        self.globals = self.root.derive_child();
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
