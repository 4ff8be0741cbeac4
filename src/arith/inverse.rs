//! Inverse ("fill in the blank") questions: the total and one operand are
//! shown, the other primary operand is hidden.
//!
//! The target total is sampled first and the operands are derived from it.
//! Ternary variants retry up to [`INVERSE_ATTEMPTS`] times before returning a
//! fixed fallback.

use tracing::debug;

use super::forward::within_range;
use super::sampler::Sampler;
use super::try_n_times;
use crate::domain::{ExtraStep, HiddenSlot, Operator, Question, StepOp, Terms};

pub const INVERSE_ATTEMPTS: usize = 20;

const SIDES: [HiddenSlot; 2] = [HiddenSlot::Left, HiddenSlot::Right];

/// Addition inverse, e.g. `? + 4 = 7`.
pub fn generate_inverse_question<S: Sampler>(s: &mut S, max: i64, terms: Option<Terms>) -> Question {
  generate_inverse(s, StepOp::Add, max, terms)
}

/// Subtraction inverse, e.g. `? - 4 = 3`.
pub fn generate_subtraction_inverse_question<S: Sampler>(s: &mut S, max: i64, terms: Option<Terms>) -> Question {
  generate_inverse(s, StepOp::Sub, max, terms)
}

/// Without an explicit term count inverse questions are binary.
pub fn generate_inverse<S: Sampler>(s: &mut S, op: StepOp, max: i64, terms: Option<Terms>) -> Question {
  match (op, terms.unwrap_or(Terms::Two)) {
    (StepOp::Add, Terms::Two) => addition_binary(s, max),
    (StepOp::Add, Terms::Three) => addition_ternary(s, max),
    (StepOp::Sub, Terms::Two) => subtraction_binary(s, max),
    (StepOp::Sub, Terms::Three) => subtraction_ternary(s, max),
  }
}

fn addition_binary<S: Sampler>(s: &mut S, max: i64) -> Question {
  let result = s.uniform_int_range(1, max);
  let known = s.uniform_int_range(0, result);
  let hidden = result - known;
  match *s.pick_one(&SIDES) {
    HiddenSlot::Left => Question::inverse(hidden, known, Operator::Add, vec![], HiddenSlot::Left),
    HiddenSlot::Right => Question::inverse(known, hidden, Operator::Add, vec![], HiddenSlot::Right),
  }
}

fn addition_ternary<S: Sampler>(s: &mut S, max: i64) -> Question {
  try_n_times(
    INVERSE_ATTEMPTS,
    || {
      let result = s.uniform_int_range(3, max);
      let first = s.uniform_int_range(1, result / 2);
      let extra = s.uniform_int_range(1, result - first);
      let hidden = result - first - extra;
      match *s.pick_one(&SIDES) {
        HiddenSlot::Left => {
          Question::inverse(hidden, first, Operator::Add, vec![ExtraStep::plus(extra)], HiddenSlot::Left)
        }
        HiddenSlot::Right => {
          Question::inverse(first, hidden, Operator::Add, vec![ExtraStep::plus(extra)], HiddenSlot::Right)
        }
      }
    },
    |q| within_range(q, max),
    || {
      debug!(target: "quiz", %max, "Addition inverse exhausted its attempts; using fallback");
      inverse_fallback(StepOp::Add)
    },
  )
}

fn subtraction_binary<S: Sampler>(s: &mut S, max: i64) -> Question {
  let result = s.uniform_int_range(1, max);
  match *s.pick_one(&SIDES) {
    // ? - b = result
    HiddenSlot::Left => {
      let b = s.uniform_int_range(0, max - result);
      Question::inverse(result + b, b, Operator::Sub, vec![], HiddenSlot::Left)
    }
    // a - ? = result
    HiddenSlot::Right => {
      let a = s.uniform_int_range(result, max);
      Question::inverse(a, a - result, Operator::Sub, vec![], HiddenSlot::Right)
    }
  }
}

fn subtraction_ternary<S: Sampler>(s: &mut S, max: i64) -> Question {
  try_n_times(
    INVERSE_ATTEMPTS,
    || {
      let result = s.uniform_int_range(1, max);
      match *s.pick_one(&SIDES) {
        // ? - b - c = result
        HiddenSlot::Left => {
          let b = s.uniform_int_range(1, (max - result) / 2);
          let c = s.uniform_int_range(1, max - result - b);
          Question::inverse(result + b + c, b, Operator::Sub, vec![ExtraStep::minus(c)], HiddenSlot::Left)
        }
        // a - ? - c = result
        HiddenSlot::Right => {
          let a = s.uniform_int_range(result + 2, max);
          let c = s.uniform_int_range(1, (a - result) / 2);
          Question::inverse(a, a - result - c, Operator::Sub, vec![ExtraStep::minus(c)], HiddenSlot::Right)
        }
      }
    },
    |q| within_range(q, max),
    || {
      debug!(target: "quiz", %max, "Subtraction inverse exhausted its attempts; using fallback");
      inverse_fallback(StepOp::Sub)
    },
  )
}

/// `? + 1 + 1 = 3` (answer 1) and `? - 1 - 1 = 1` (answer 3).
pub fn inverse_fallback(op: StepOp) -> Question {
  match op {
    StepOp::Add => Question::inverse(1, 1, Operator::Add, vec![ExtraStep::plus(1)], HiddenSlot::Left),
    StepOp::Sub => Question::inverse(3, 1, Operator::Sub, vec![ExtraStep::minus(1)], HiddenSlot::Left),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::arith::evaluate;
  use crate::arith::format::{check_answer, format_question};
  use crate::arith::sampler::testing::{seeded, LowSampler};

  fn displayed_total(q: &Question) -> i64 {
    let (a, b) = q.substituted(q.answer);
    evaluate(a, b, q.op, &q.extras)
  }

  #[test]
  fn every_variant_solves_back_to_its_total() {
    let mut s = seeded(21);
    for op in [StepOp::Add, StepOp::Sub] {
      for terms in [None, Some(Terms::Two), Some(Terms::Three)] {
        for max in [5, 10, 20, 100] {
          for _ in 0..500 {
            let q = generate_inverse(&mut s, op, max, terms);
            assert!(q.is_inverse());
            assert!((0..=max).contains(&q.answer), "{q:?}");
            let total = displayed_total(&q);
            assert!((0..=max).contains(&total), "{q:?}");
            assert_eq!(total, evaluate(q.a, q.b, q.op, &q.extras));
            assert!(check_answer(&q, q.answer));
            assert!(!check_answer(&q, q.answer + 1));
            assert!(format_question(&q).contains('?'));
          }
        }
      }
    }
  }

  #[test]
  fn hidden_operand_is_in_the_tagged_slot() {
    let mut s = seeded(8);
    for _ in 0..300 {
      let q = generate_subtraction_inverse_question(&mut s, 30, Some(Terms::Two));
      match q.inverse_side() {
        Some(HiddenSlot::Left) => assert_eq!(q.answer, q.a),
        Some(HiddenSlot::Right) => assert_eq!(q.answer, q.b),
        None => panic!("not an inverse question"),
      }
      assert_eq!(q.op, Operator::Sub);
    }
  }

  #[test]
  fn both_sides_are_used() {
    let mut s = seeded(3);
    let sides: std::collections::HashSet<_> = (0..200)
      .filter_map(|_| generate_inverse_question(&mut s, 10, None).inverse_side())
      .collect();
    assert_eq!(sides.len(), 2);
  }

  #[test]
  fn ternary_shapes_carry_one_extra() {
    let mut s = seeded(30);
    for _ in 0..200 {
      let add = generate_inverse_question(&mut s, 20, Some(Terms::Three));
      assert_eq!(add.extras.len(), 1);
      assert_eq!(add.extras[0].op, StepOp::Add);
      let sub = generate_subtraction_inverse_question(&mut s, 20, Some(Terms::Three));
      assert_eq!(sub.extras[0].op, StepOp::Sub);
    }
  }

  #[test]
  fn exhausted_ternary_returns_documented_fallback() {
    // the smallest possible total (3) already exceeds max = 2
    let q = generate_inverse_question(&mut seeded(1), 2, Some(Terms::Three));
    assert_eq!(q, Question::inverse(1, 1, Operator::Add, vec![ExtraStep::plus(1)], HiddenSlot::Left));
    assert_eq!(q.answer, 1);
    assert_eq!(format_question(&q), "? + 1 + 1 = 3");

    // the low-end left candidate needs a minuend of 3 > max = 1
    let q = generate_subtraction_inverse_question(&mut LowSampler, 1, Some(Terms::Three));
    assert_eq!(q, inverse_fallback(StepOp::Sub));
    assert_eq!(q.answer, 3);
    assert_eq!(format_question(&q), "? - 1 - 1 = 1");
  }
}
