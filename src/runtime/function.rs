use std::fmt;
use std::rc::Rc;

use crate::parser::{Block, FunctionDecl};
use crate::runtime::environment::{Binding, Scope};
use crate::tools::Tool;

/// A user function together with the scope it was defined in
pub struct Closure {
    decl: Rc<FunctionDecl>,
    scope: Scope,
}

impl Closure {
    /// Captures `scope` for the function described by `decl`
    pub fn new(decl: Rc<FunctionDecl>, scope: Scope) -> Self {
        Closure { decl, scope }
    }

    pub fn name(&self) -> &str {
        &self.decl.name
    }

    pub fn params(&self) -> &[String] {
        &self.decl.params
    }

    pub fn body(&self) -> &Block {
        &self.decl.body
    }

    /// Scope snapshot taken when the definition ran
    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Closure")
            .field("name", &self.decl.name)
            .field("params", &self.decl.params)
            .finish()
    }
}

/// Anything callable by name
#[derive(Clone)]
pub enum Function {
    /// Built-in provided by the tool registry
    Native(Rc<dyn Tool>),
    /// Function defined by the program
    User(Rc<Closure>),
}

impl Function {
    pub fn name(&self) -> &str {
        match self {
            Function::Native(tool) => tool.name(),
            Function::User(closure) => closure.name(),
        }
    }

    /// Required argument count; `None` accepts any number
    pub fn arity(&self) -> Option<usize> {
        match self {
            Function::Native(tool) => tool.arity(),
            Function::User(closure) => Some(closure.params().len()),
        }
    }
}

impl Binding for Function {
    const KIND: &'static str = "function";
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Function::Native(tool) => write!(f, "Native({})", tool.name()),
            Function::User(closure) => write!(f, "User({:?})", closure),
        }
    }
}
