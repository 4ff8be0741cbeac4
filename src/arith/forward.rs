//! Forward question generation: both operands shown, the result is asked for.
//!
//! Dispatch order:
//! 1. special modes (`add-sub-mix`, `add-inverse`, `sub-inverse`) go to their own generators;
//! 2. `add` / `sub` with an explicit term count go to the single-operation generator;
//! 3. everything else is a standard binary question with an operator picked per mode.
//!
//! Ternary ("grade one") questions use bounded rejection sampling and fall back
//! to a fixed question, so generation always succeeds.

use tracing::debug;

use super::evaluate::running_totals;
use super::{generate_inverse_question, generate_subtraction_inverse_question, try_n_times, Sampler};
use crate::domain::{ExtraStep, Operator, QuizConfig, QuizMode, Question, StepOp, Terms};

/// Attempts made by the ternary generator before using its fallback.
pub const GRADE_ONE_ATTEMPTS: usize = 10;

/// Probability that an addition operand may be zero.
pub const ZERO_OPERAND_CHANCE: f64 = 0.05;

/// Multiplication operands are capped at `max(10, max / 2)`.
pub const MUL_OPERAND_FLOOR: i64 = 10;

const MIX_OPERATORS: [Operator; 3] = [Operator::Add, Operator::Sub, Operator::Mul];
const ADD_SUB_OPERATORS: [StepOp; 2] = [StepOp::Add, StepOp::Sub];

static CHAIN_ADD_SHAPES: [TernaryShape; 1] = [TernaryShape::ChainAdd];
static CHAIN_SUB_SHAPES: [TernaryShape; 1] = [TernaryShape::ChainSubtract];
static MIXED_ADD_SHAPES: [TernaryShape; 3] =
  [TernaryShape::ChainAdd, TernaryShape::AddThenSubtract, TernaryShape::Complex(StepOp::Add)];
static MIXED_SUB_SHAPES: [TernaryShape; 3] =
  [TernaryShape::SubtractThenAdd, TernaryShape::ChainSubtract, TernaryShape::Complex(StepOp::Sub)];

pub fn generate_question<S: Sampler>(s: &mut S, config: &QuizConfig) -> Question {
  let max = config.max;
  match config.mode {
    QuizMode::AddSubMix => return generate_add_sub_mix(s, max, config.terms),
    QuizMode::AddInverse => return generate_inverse_question(s, max, config.terms),
    QuizMode::SubInverse => return generate_subtraction_inverse_question(s, max, config.terms),
    _ => {}
  }

  match (config.mode, config.terms) {
    (QuizMode::Add, Some(terms)) => generate_single_operation(s, StepOp::Add, max, terms),
    (QuizMode::Sub, Some(terms)) => generate_single_operation(s, StepOp::Sub, max, terms),
    (mode, _) => generate_standard(s, mode, max),
  }
}

/// One operator throughout: `a + b (+ c)` or `a - b (- c)`.
pub fn generate_single_operation<S: Sampler>(s: &mut S, op: StepOp, max: i64, terms: Terms) -> Question {
  match terms {
    Terms::Two => generate_binary(s, op.into(), max),
    Terms::Three => {
      let shapes = match op {
        StepOp::Add => &CHAIN_ADD_SHAPES[..],
        StepOp::Sub => &CHAIN_SUB_SHAPES[..],
      };
      generate_grade_one(s, op, max, shapes)
    }
  }
}

/// `+` or `-` per call; without an explicit term count, 2 or 3 terms per call as well.
pub fn generate_add_sub_mix<S: Sampler>(s: &mut S, max: i64, terms: Option<Terms>) -> Question {
  let op = *s.pick_one(&ADD_SUB_OPERATORS);
  let terms = terms.unwrap_or_else(|| *s.pick_one(&[Terms::Two, Terms::Three]));
  match terms {
    Terms::Two => generate_binary(s, op.into(), max),
    Terms::Three => {
      let shapes = match op {
        StepOp::Add => &MIXED_ADD_SHAPES[..],
        StepOp::Sub => &MIXED_SUB_SHAPES[..],
      };
      generate_grade_one(s, op, max, shapes)
    }
  }
}

pub fn generate_standard<S: Sampler>(s: &mut S, mode: QuizMode, max: i64) -> Question {
  let op = pick_operator(s, mode);
  generate_binary(s, op, max)
}

/// Operator for standard generation. No division operator exists: `div`
/// draws from the same set as `mix`.
pub fn pick_operator<S: Sampler>(s: &mut S, mode: QuizMode) -> Operator {
  match mode {
    QuizMode::Add | QuizMode::AddInverse => Operator::Add,
    QuizMode::Sub | QuizMode::SubInverse => Operator::Sub,
    QuizMode::Mul => Operator::Mul,
    QuizMode::Mix | QuizMode::Div => *s.pick_one(&MIX_OPERATORS),
    QuizMode::AddSubMix => (*s.pick_one(&ADD_SUB_OPERATORS)).into(),
  }
}

pub fn generate_binary<S: Sampler>(s: &mut S, op: Operator, max: i64) -> Question {
  match op {
    Operator::Add => {
      let min_a = zero_biased_min(s).min(max);
      let a = s.uniform_int_range(min_a, max);
      let min_b = zero_biased_min(s).min(max - a);
      let b = s.uniform_int_range(min_b, max - a);
      Question::forward(a, b, Operator::Add, vec![])
    }
    Operator::Sub => {
      let x = s.uniform_int(max);
      let y = s.uniform_int(max);
      Question::forward(x.max(y), x.min(y), Operator::Sub, vec![])
    }
    Operator::Mul => {
      // products grow quadratically, so the answer is not clamped to `max`
      let bound = mul_operand_bound(max);
      let a = s.uniform_int(bound);
      let b = s.uniform_int(bound);
      Question::forward(a, b, Operator::Mul, vec![])
    }
  }
}

pub fn mul_operand_bound(max: i64) -> i64 { MUL_OPERAND_FLOOR.max(max / 2) }

/// 0 with 5% probability, otherwise 1.
fn zero_biased_min<S: Sampler>(s: &mut S) -> i64 {
  if s.chance(ZERO_OPERAND_CHANCE) { 0 } else { 1 }
}

/// Candidate shapes for three-term questions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TernaryShape {
  /// `a + b + c`
  ChainAdd,
  /// `a + b - c`
  AddThenSubtract,
  /// `a - b + c`
  SubtractThenAdd,
  /// `a - b - c`
  ChainSubtract,
  /// Two extras alternating signs: `a + b - c + d` or `a - b + c - d`.
  Complex(StepOp),
}

impl TernaryShape {
  fn sample<S: Sampler>(self, s: &mut S, max: i64) -> Question {
    match self {
      TernaryShape::ChainAdd => {
        let min_a = zero_biased_min(s);
        let a = s.uniform_int_range(min_a, max - 2);
        let min_b = zero_biased_min(s);
        let b = s.uniform_int_range(min_b, max - a - 1);
        let c = s.uniform_int_range(1, max - a - b);
        Question::forward(a, b, Operator::Add, vec![ExtraStep::plus(c)])
      }
      TernaryShape::AddThenSubtract => {
        let a = s.uniform_int_range(1, max - 1);
        let b = s.uniform_int_range(1, max - a);
        let c = s.uniform_int_range(1, a + b);
        Question::forward(a, b, Operator::Add, vec![ExtraStep::minus(c)])
      }
      TernaryShape::SubtractThenAdd => {
        let a = s.uniform_int_range(1, max);
        let b = s.uniform_int_range(1, a);
        let c = s.uniform_int_range(1, max - (a - b));
        Question::forward(a, b, Operator::Sub, vec![ExtraStep::plus(c)])
      }
      TernaryShape::ChainSubtract => {
        let a = s.uniform_int_range(2, max);
        let b = s.uniform_int_range(1, a - 1);
        let c = s.uniform_int_range(1, a - b);
        Question::forward(a, b, Operator::Sub, vec![ExtraStep::minus(c)])
      }
      TernaryShape::Complex(StepOp::Add) => {
        let a = s.uniform_int_range(1, max - 1);
        let b = s.uniform_int_range(1, max - a);
        let c = s.uniform_int_range(1, a + b);
        let d = s.uniform_int_range(1, max - (a + b - c));
        Question::forward(a, b, Operator::Add, vec![ExtraStep::minus(c), ExtraStep::plus(d)])
      }
      TernaryShape::Complex(StepOp::Sub) => {
        let a = s.uniform_int_range(1, max);
        let b = s.uniform_int_range(1, a);
        let c = s.uniform_int_range(1, max - (a - b));
        let d = s.uniform_int_range(1, a - b + c);
        Question::forward(a, b, Operator::Sub, vec![ExtraStep::plus(c), ExtraStep::minus(d)])
      }
    }
  }
}

/// Ternary generation over `shapes`, falling back to [`ternary_fallback`].
pub fn generate_grade_one<S: Sampler>(s: &mut S, op: StepOp, max: i64, shapes: &[TernaryShape]) -> Question {
  try_n_times(
    GRADE_ONE_ATTEMPTS,
    || {
      let shape = *s.pick_one(shapes);
      shape.sample(s, max)
    },
    |q| within_range(q, max),
    || {
      debug!(target: "quiz", %max, ?op, "Ternary generation exhausted its attempts; using fallback");
      ternary_fallback(op)
    },
  )
}

/// `1 + 0 + 0 = 1` for addition, `1 - 0 - 0 = 1` for subtraction; both fit any `max >= 1`.
pub fn ternary_fallback(op: StepOp) -> Question {
  match op {
    StepOp::Add => Question::forward(1, 0, Operator::Add, vec![ExtraStep::plus(0)]),
    StepOp::Sub => Question::forward(1, 0, Operator::Sub, vec![ExtraStep::minus(0)]),
  }
}

/// Every shown number, every intermediate total and the hidden value lie in `[0, max]`.
pub(crate) fn within_range(q: &Question, max: i64) -> bool {
  let bounded = |n: i64| (0..=max).contains(&n);
  q.operands().all(bounded)
    && bounded(q.answer)
    && running_totals(q.a, q.b, q.op, &q.extras).into_iter().all(bounded)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::arith::evaluate;
  use crate::arith::sampler::testing::{seeded, HighSampler, LowSampler};

  fn cfg(mode: QuizMode, max: i64, terms: Option<Terms>) -> QuizConfig {
    QuizConfig::new(mode, max, terms).unwrap()
  }

  #[test]
  fn add_sub_answers_stay_in_range() {
    let mut s = seeded(42);
    let modes = [QuizMode::Add, QuizMode::Sub, QuizMode::AddSubMix];
    let terms = [None, Some(Terms::Two), Some(Terms::Three)];
    for max in [1, 2, 3, 4, 5, 10, 20, 100] {
      for mode in modes {
        for t in terms {
          let config = cfg(mode, max, t);
          for _ in 0..1200 {
            let q = generate_question(&mut s, &config);
            assert!((0..=max).contains(&q.answer), "{mode} max={max} terms={t:?} -> {q:?}");
            assert!(within_range(&q, max), "{mode} max={max} terms={t:?} -> {q:?}");
            assert_eq!(evaluate(q.a, q.b, q.op, &q.extras), q.answer);
          }
        }
      }
    }
  }

  #[test]
  fn multiplication_bounds_operands_not_answer() {
    let mut s = seeded(7);
    let config = cfg(QuizMode::Mul, 20, None);
    for _ in 0..2000 {
      let q = generate_question(&mut s, &config);
      assert_eq!(q.op, Operator::Mul);
      assert!(q.a <= 10 && q.b <= 10);
      assert_eq!(q.answer, q.a * q.b);
    }
    let q = generate_binary(&mut HighSampler, Operator::Mul, 20);
    assert_eq!((q.a, q.b, q.answer), (10, 10, 100));
    assert_eq!(mul_operand_bound(100), 50);
  }

  #[test]
  fn subtraction_puts_larger_operand_first() {
    let mut s = seeded(11);
    for _ in 0..500 {
      let q = generate_binary(&mut s, Operator::Sub, 30);
      assert!(q.a >= q.b);
      assert!(q.answer >= 0);
    }
  }

  #[test]
  fn addition_avoids_zero_unless_coin_allows() {
    let q = generate_binary(&mut LowSampler, Operator::Add, 10);
    assert_eq!((q.a, q.b), (1, 1));
    let q = generate_binary(&mut HighSampler, Operator::Add, 10);
    assert_eq!((q.a, q.b, q.answer), (10, 0, 10));
  }

  #[test]
  fn mix_and_div_draw_from_three_operators() {
    let mut s = seeded(5);
    for mode in [QuizMode::Mix, QuizMode::Div] {
      let config = cfg(mode, 20, None);
      let mut seen = std::collections::HashSet::new();
      for _ in 0..300 {
        let q = generate_question(&mut s, &config);
        assert!(q.extras.is_empty());
        seen.insert(q.op);
      }
      assert_eq!(seen.len(), 3);
    }
  }

  #[test]
  fn add_sub_mix_uses_only_add_and_sub() {
    let mut s = seeded(9);
    let config = cfg(QuizMode::AddSubMix, 20, Some(Terms::Three));
    for _ in 0..500 {
      let q = generate_question(&mut s, &config);
      assert_ne!(q.op, Operator::Mul);
      assert!(!q.extras.is_empty());
      assert!(!q.is_inverse());
    }
  }

  #[test]
  fn single_operation_ternary_keeps_one_operator() {
    let mut s = seeded(13);
    for _ in 0..300 {
      let q = generate_question(&mut s, &cfg(QuizMode::Add, 20, Some(Terms::Three)));
      assert_eq!(q.op, Operator::Add);
      assert_eq!(q.extras.len(), 1);
      assert_eq!(q.extras[0].op, StepOp::Add);
      let q = generate_question(&mut s, &cfg(QuizMode::Sub, 20, Some(Terms::Three)));
      assert_eq!(q.op, Operator::Sub);
      assert_eq!(q.extras[0].op, StepOp::Sub);
    }
  }

  #[test]
  fn ternary_intermediates_never_leave_range() {
    let mut s = seeded(17);
    let config = cfg(QuizMode::AddSubMix, 10, Some(Terms::Three));
    for _ in 0..3000 {
      let q = generate_question(&mut s, &config);
      for total in running_totals(q.a, q.b, q.op, &q.extras) {
        assert!((0..=10).contains(&total), "{q:?}");
      }
    }
  }

  #[test]
  fn exhausted_ternary_returns_documented_fallback() {
    let add = generate_question(&mut LowSampler, &cfg(QuizMode::Add, 1, Some(Terms::Three)));
    assert_eq!(add, Question::forward(1, 0, Operator::Add, vec![ExtraStep::plus(0)]));
    assert_eq!(add.answer, 1);

    let sub = generate_question(&mut seeded(1), &cfg(QuizMode::Sub, 1, Some(Terms::Three)));
    assert_eq!(sub, Question::forward(1, 0, Operator::Sub, vec![ExtraStep::minus(0)]));
    assert_eq!(sub.answer, 1);

    // every candidate drawn at the low end overshoots max = 2
    let q = generate_grade_one(&mut LowSampler, StepOp::Add, 2, &[TernaryShape::ChainAdd]);
    assert_eq!(q, ternary_fallback(StepOp::Add));
  }

  #[test]
  fn inverse_modes_dispatch_to_inverse_generators() {
    let mut s = seeded(31);
    for _ in 0..200 {
      let add = generate_question(&mut s, &cfg(QuizMode::AddInverse, 10, None));
      assert!(add.is_inverse());
      assert_eq!(add.op, Operator::Add);
      let sub = generate_question(&mut s, &cfg(QuizMode::SubInverse, 10, Some(Terms::Three)));
      assert!(sub.is_inverse());
      assert_eq!(sub.op, Operator::Sub);
      assert_eq!(sub.extras.len(), 1);
    }
  }

  #[test]
  fn tiny_max_three_term_questions_stay_in_range() {
    let mut s = seeded(23);
    for max in [1, 2] {
      for mode in [QuizMode::Add, QuizMode::Sub, QuizMode::AddSubMix] {
        let config = cfg(mode, max, Some(Terms::Three));
        for _ in 0..10_000 {
          let q = generate_question(&mut s, &config);
          assert!((0..=max).contains(&q.answer), "{mode} max={max} -> {q:?}");
        }
      }
    }
    for op in [StepOp::Add, StepOp::Sub] {
      assert!(within_range(&ternary_fallback(op), 1));
    }
  }
}
