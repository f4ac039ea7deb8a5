//! Binary operator semantics
//!
//! The right operand arrives as a thunk so `||` and `&&` can skip it.

use crate::error::{Error, Result};
use crate::parser::BinaryOp;
use crate::runtime::value::{is_truthy, Value};

/// Applies `op` to an evaluated left operand and a lazily evaluated right one
///
/// `||` and `&&` yield whichever operand decided the result. Arithmetic wraps
/// on overflow. Comparisons produce 1 or 0.
pub fn apply_binary_op<F>(op: BinaryOp, left: Value, right: F) -> Result<Value>
where
    F: FnOnce() -> Result<Value>,
{
    let value = match op {
        BinaryOp::Or if is_truthy(left) => left,
        BinaryOp::And if !is_truthy(left) => left,
        BinaryOp::Or | BinaryOp::And => right()?,
        BinaryOp::Add => left.wrapping_add(right()?),
        BinaryOp::Sub => left.wrapping_sub(right()?),
        BinaryOp::Mul => left.wrapping_mul(right()?),
        BinaryOp::Div => checked_div(op, left, right()?, Value::wrapping_div)?,
        BinaryOp::Mod => checked_div(op, left, right()?, Value::wrapping_rem)?,
        BinaryOp::Eq => Value::from(left == right()?),
        BinaryOp::NotEq => Value::from(left != right()?),
        BinaryOp::Lt => Value::from(left < right()?),
        BinaryOp::LtEq => Value::from(left <= right()?),
        BinaryOp::Gt => Value::from(left > right()?),
        BinaryOp::GtEq => Value::from(left >= right()?),
    };
    Ok(value)
}

/// Zero divisors fail; `i64::MIN / -1` wraps like the other arithmetic
#[inline]
fn checked_div(
    op: BinaryOp,
    left: Value,
    right: Value,
    divide: fn(Value, Value) -> Value,
) -> Result<Value> {
    if right == 0 {
        Err(Error::ArithmeticFailure { op, left, right })
    } else {
        Ok(divide(left, right))
    }
}
