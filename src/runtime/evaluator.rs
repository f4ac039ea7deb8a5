use std::rc::Rc;

use crate::error::{Error, Result};
use crate::parser::{Block, Expression, FunctionDecl, Statement};
use crate::runtime::config::EvalConfig;
use crate::runtime::environment::Scope;
use crate::runtime::function::{Closure, Function};
use crate::runtime::operators::apply_binary_op;
use crate::runtime::value::{is_truthy, Value, ValueCell};

/// Tree-walking evaluator bound to one scope
///
/// Statements yield `Some(value)` when a `return` fired somewhere inside them;
/// that signal stops every enclosing block until a function call consumes it.
pub struct Evaluator<'s> {
    scope: &'s mut Scope,
    config: EvalConfig,
    /// User function calls currently on the stack
    depth: usize,
}

impl<'s> Evaluator<'s> {
    /// Creates an evaluator that declares into and resolves from `scope`
    pub fn new(scope: &'s mut Scope, config: EvalConfig) -> Self {
        Evaluator {
            scope,
            config,
            depth: 0,
        }
    }

    /// The scope this evaluator runs in
    pub fn scope(&self) -> &Scope {
        self.scope
    }

    fn nested<'c>(&self, scope: &'c mut Scope, depth: usize) -> Evaluator<'c> {
        Evaluator {
            scope,
            config: self.config,
            depth,
        }
    }

    /// Runs the statements of `block` in the current scope, stopping at the first return
    pub fn run_block(&mut self, block: &Block) -> Result<Option<Value>> {
        for statement in &block.statements {
            if let Some(value) = self.evaluate_statement(statement)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Evaluates one statement
    pub fn evaluate_statement(&mut self, statement: &Statement) -> Result<Option<Value>> {
        match statement {
            Statement::FunctionDefinition(decl) => {
                self.define_function(decl)?;
                Ok(None)
            }

            Statement::Block(_) => self.run_in_child_scope(statement),

            Statement::VariableDeclaration { name, init } => {
                let value = match init {
                    Some(expr) => self.evaluate_expression(expr)?,
                    None => 0,
                };
                self.scope
                    .variables
                    .declare(name.as_str(), ValueCell::new(value))?;
                Ok(None)
            }

            Statement::Expression(expr) => {
                self.evaluate_expression(expr)?;
                Ok(None)
            }

            Statement::While { condition, body } => self.eval_while(condition, body),

            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if is_truthy(self.evaluate_expression(condition)?) {
                    self.run_in_child_scope(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.run_in_child_scope(else_branch)
                } else {
                    Ok(None)
                }
            }

            Statement::Assignment { name, value } => {
                let cell = self.scope.variables.lookup(name)?.clone();
                cell.set(self.evaluate_expression(value)?);
                Ok(None)
            }

            Statement::Return { value } => Ok(Some(self.evaluate_expression(value)?)),
        }
    }

    /// Evaluates one expression
    pub fn evaluate_expression(&mut self, expr: &Expression) -> Result<Value> {
        match expr {
            Expression::Literal(value) => Ok(*value),

            Expression::Identifier(name) => Ok(self.scope.variables.lookup(name)?.get()),

            Expression::Binary { left, op, right } => {
                let left = self.evaluate_expression(left)?;
                apply_binary_op(*op, left, || self.evaluate_expression(right))
            }

            Expression::Call { name, args } => self.eval_call(name, args),
        }
    }

    /// Runs a loop body, branch or nested block in a fresh child scope
    ///
    /// A nested block runs its statements directly in that child.
    fn run_in_child_scope(&mut self, statement: &Statement) -> Result<Option<Value>> {
        let mut child = self.scope.derive_child();
        let mut evaluator = self.nested(&mut child, self.depth);
        match statement {
            Statement::Block(block) => evaluator.run_block(block),
            other => evaluator.evaluate_statement(other),
        }
    }

    fn eval_while(&mut self, condition: &Expression, body: &Statement) -> Result<Option<Value>> {
        let mut iterations = 0usize;

        while is_truthy(self.evaluate_expression(condition)?) {
            iterations += 1;
            if let Some(limit) = self.config.max_loop_iterations {
                if iterations > limit {
                    return Err(Error::TooManyIterations { limit });
                }
            }

            if let Some(value) = self.run_in_child_scope(body)? {
                return Ok(Some(value));
            }
        }

        Ok(None)
    }

    /// Captures the current scope and binds the function in it
    ///
    /// The snapshot is taken before the binding exists; the function sees
    /// itself through the call scope instead, so no closure owns itself.
    fn define_function(&mut self, decl: &Rc<FunctionDecl>) -> Result<()> {
        tracing::trace!(function = %decl.name, params = decl.params.len(), "defining function");
        let closure = Closure::new(Rc::clone(decl), self.scope.derive_child());
        self.scope
            .functions
            .declare(decl.name.as_str(), Function::User(Rc::new(closure)))
    }

    fn eval_call(&mut self, name: &str, args: &[Expression]) -> Result<Value> {
        let values = args
            .iter()
            .map(|arg| self.evaluate_expression(arg))
            .collect::<Result<Vec<_>>>()?;

        let function = self.scope.functions.lookup(name)?.clone();
        self.invoke(&function, values)
    }

    /// Calls `function` with already evaluated arguments
    pub fn invoke(&self, function: &Function, args: Vec<Value>) -> Result<Value> {
        if let Some(expected) = function.arity() {
            if expected != args.len() {
                return Err(Error::ArityMismatch {
                    function: function.name().to_string(),
                    expected,
                    found: args.len(),
                });
            }
        }

        match function {
            Function::Native(tool) => Ok(tool.execute(&args)?.unwrap_or(0)),
            Function::User(closure) => self.call_closure(closure, args),
        }
    }

    fn call_closure(&self, closure: &Rc<Closure>, args: Vec<Value>) -> Result<Value> {
        let depth = self.depth + 1;
        if let Some(limit) = self.config.max_call_depth {
            if depth > limit {
                return Err(Error::CallDepthExceeded { limit });
            }
        }
        tracing::trace!(function = closure.name(), depth, "calling function");

        let mut call_scope = closure.scope().derive_child();
        call_scope
            .functions
            .inherit(closure.name(), Function::User(Rc::clone(closure)));
        for (param, value) in closure.params().iter().zip(args) {
            call_scope
                .variables
                .declare(param.as_str(), ValueCell::new(value))?;
        }

        let result = self.nested(&mut call_scope, depth).run_block(closure.body())?;
        Ok(result.unwrap_or(0))
    }
}
