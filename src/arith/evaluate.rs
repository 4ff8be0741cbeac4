//! Expression evaluation: `a op b` followed by the extra steps, left to right.

use crate::domain::{ExtraStep, Operator};

/// Value of `a op b` with every extra step folded in order.
pub fn evaluate(a: i64, b: i64, op: Operator, extras: &[ExtraStep]) -> i64 {
  extras.iter().fold(op.apply(a, b), |acc, step| step.op.apply(acc, step.value))
}

/// Every intermediate total: `a op b`, then the value after each extra step.
/// The last element is what [`evaluate`] returns.
pub fn running_totals(a: i64, b: i64, op: Operator, extras: &[ExtraStep]) -> Vec<i64> {
  let mut out = Vec::with_capacity(extras.len() + 1);
  let mut acc = op.apply(a, b);
  out.push(acc);
  for step in extras {
    acc = step.op.apply(acc, step.value);
    out.push(acc);
  }
  out
}
