use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Runtime value; the language has a single integer type
pub type Value = i64;

/// Non-zero integers are true
pub fn is_truthy(value: Value) -> bool {
    value != 0
}

/// Mutable storage behind a variable binding
///
/// Cloning a cell yields another handle to the same storage, so a write through
/// any scope that holds the binding is seen by every other holder.
#[derive(Clone, Default)]
pub struct ValueCell(Rc<Cell<Value>>);

impl ValueCell {
    /// Creates a cell holding `value`
    pub fn new(value: Value) -> Self {
        ValueCell(Rc::new(Cell::new(value)))
    }

    /// Current value
    pub fn get(&self) -> Value {
        self.0.get()
    }

    /// Overwrites the value for every holder of this cell
    pub fn set(&self, value: Value) {
        self.0.set(value);
    }

    /// True if both handles point at the same storage
    pub fn ptr_eq(&self, other: &ValueCell) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ValueCell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ValueCell({})", self.get())
    }
}
