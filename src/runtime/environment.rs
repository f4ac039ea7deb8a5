use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::runtime::{Function, ValueCell};

/// Something that can be bound to a name in a scope
pub trait Binding: Clone {
    /// Name used in lookup and redeclaration errors
    const KIND: &'static str;
}

impl Binding for ValueCell {
    const KIND: &'static str = "variable";
}

/// Name to binding mapping for one namespace of one scope
///
/// A child table is a snapshot of its parent: later declarations in the
/// parent are not visible to the child, and declarations in the child never
/// reach the parent.
#[derive(Debug, Clone)]
pub struct BindingTable<T> {
    /// Everything visible from this scope
    bindings: HashMap<String, T>,
    /// Names declared directly in this scope
    declared_here: HashSet<String>,
}

impl<T: Binding> BindingTable<T> {
    /// Creates an empty table
    pub fn new() -> Self {
        BindingTable {
            bindings: HashMap::new(),
            declared_here: HashSet::new(),
        }
    }

    /// Resolves a visible name
    pub fn lookup(&self, name: &str) -> Result<&T> {
        self.bindings.get(name).ok_or_else(|| Error::NameNotFound {
            kind: T::KIND,
            name: name.to_string(),
        })
    }

    /// Declares `name` directly in this scope, shadowing any inherited binding
    pub fn declare(&mut self, name: impl Into<String>, item: T) -> Result<()> {
        let name = name.into();
        if self.declared_here.contains(&name) {
            return Err(Error::DuplicateDeclaration {
                kind: T::KIND,
                name,
            });
        }
        self.declared_here.insert(name.clone());
        self.bindings.insert(name, item);
        Ok(())
    }

    /// Binds `name` as though it had been visible in the parent snapshot
    ///
    /// The name stays free for a later `declare` in this scope.
    pub fn inherit(&mut self, name: impl Into<String>, item: T) {
        self.bindings.insert(name.into(), item);
    }

    /// Snapshot of every visible binding with nothing declared here yet
    pub fn derive_child(&self) -> Self {
        BindingTable {
            bindings: self.bindings.clone(),
            declared_here: HashSet::new(),
        }
    }

    /// True if `name` was declared directly in this scope
    pub fn is_declared_here(&self, name: &str) -> bool {
        self.declared_here.contains(name)
    }

    /// True if `name` is visible from this scope
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Visible names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<T: Binding> Default for BindingTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Every entry of a collected table counts as declared directly in it
impl<T: Binding> FromIterator<(String, T)> for BindingTable<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let bindings: HashMap<String, T> = iter.into_iter().collect();
        let declared_here = bindings.keys().cloned().collect();
        BindingTable {
            bindings,
            declared_here,
        }
    }
}

/// Variables and functions live in separate namespaces
#[derive(Debug, Clone, Default)]
pub struct Scope {
    /// Variable bindings
    pub variables: BindingTable<ValueCell>,
    /// Function bindings
    pub functions: BindingTable<Function>,
}

impl Scope {
    /// Creates a scope with nothing bound
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scope with the given functions and no variables
    pub fn with_functions(functions: BindingTable<Function>) -> Self {
        Scope {
            variables: BindingTable::new(),
            functions,
        }
    }

    /// Derives both namespaces at once
    pub fn derive_child(&self) -> Self {
        Scope {
            variables: self.variables.derive_child(),
            functions: self.functions.derive_child(),
        }
    }
}
