//! Domain models: operators, extra steps, questions, quiz modes and configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Largest `max` a quiz configuration may ask for.
pub const MAX_CEILING: i64 = 9999;

/// Primary operator of a question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
  #[serde(rename = "+")]
  Add,
  #[serde(rename = "-")]
  Sub,
  #[serde(rename = "×")]
  Mul,
}

impl Operator {
  pub fn symbol(self) -> &'static str {
    match self {
      Operator::Add => "+",
      Operator::Sub => "-",
      Operator::Mul => "×",
    }
  }

  pub fn apply(self, left: i64, right: i64) -> i64 {
    match self {
      Operator::Add => left + right,
      Operator::Sub => left - right,
      Operator::Mul => left * right,
    }
  }
}

/// Operator allowed in extra steps and in the inverse generators: `+` or `-`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepOp {
  #[serde(rename = "+")]
  Add,
  #[serde(rename = "-")]
  Sub,
}

impl StepOp {
  pub fn symbol(self) -> &'static str { Operator::from(self).symbol() }

  pub fn apply(self, acc: i64, value: i64) -> i64 { Operator::from(self).apply(acc, value) }
}

impl From<StepOp> for Operator {
  fn from(op: StepOp) -> Self {
    match op {
      StepOp::Add => Operator::Add,
      StepOp::Sub => Operator::Sub,
    }
  }
}

/// One `+ n` / `- n` term applied after the primary operation, strictly left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtraStep {
  pub op: StepOp,
  pub value: i64,
}

impl ExtraStep {
  pub fn plus(value: i64) -> Self { Self { op: StepOp::Add, value } }
  pub fn minus(value: i64) -> Self { Self { op: StepOp::Sub, value } }
}

/// Which primary operand the player must supply in an inverse question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HiddenSlot {
  Left,
  Right,
}

/// A generated question.
///
/// `a` and `b` always hold the true operand values, including the hidden one.
/// `answer` is what the player must type: the final result for forward
/// questions, the hidden operand for inverse questions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub a: i64,
  pub b: i64,
  pub op: Operator,
  #[serde(default)]
  pub extras: Vec<ExtraStep>,
  pub answer: i64,
  #[serde(default)]
  pub hidden: Option<HiddenSlot>,
}

impl Question {
  /// Forward question; `answer` is computed by the evaluator.
  pub fn forward(a: i64, b: i64, op: Operator, extras: Vec<ExtraStep>) -> Self {
    let answer = crate::arith::evaluate(a, b, op, &extras);
    Self { a, b, op, extras, answer, hidden: None }
  }

  /// Inverse question; `answer` is the value sitting in the hidden slot.
  pub fn inverse(a: i64, b: i64, op: Operator, extras: Vec<ExtraStep>, side: HiddenSlot) -> Self {
    let answer = match side {
      HiddenSlot::Left => a,
      HiddenSlot::Right => b,
    };
    Self { a, b, op, extras, answer, hidden: Some(side) }
  }

  pub fn is_inverse(&self) -> bool { self.hidden.is_some() }

  pub fn inverse_side(&self) -> Option<HiddenSlot> { self.hidden }

  /// Primary operands with `value` put into the hidden slot (unchanged for forward questions).
  pub fn substituted(&self, value: i64) -> (i64, i64) {
    match self.hidden {
      Some(HiddenSlot::Left) => (value, self.b),
      Some(HiddenSlot::Right) => (self.a, value),
      None => (self.a, self.b),
    }
  }

  /// Every number that appears in the expression, in reading order.
  pub fn operands(&self) -> impl Iterator<Item = i64> + '_ {
    [self.a, self.b].into_iter().chain(self.extras.iter().map(|e| e.value))
  }

  pub fn terms(&self) -> usize { 2 + self.extras.len() }
}

/// Closed set of quiz modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizMode {
  Add,
  Sub,
  Mul,
  Div,
  AddSubMix,
  Mix,
  AddInverse,
  SubInverse,
}

impl QuizMode {
  pub const ALL: [QuizMode; 8] = [
    QuizMode::Add,
    QuizMode::Sub,
    QuizMode::Mul,
    QuizMode::Div,
    QuizMode::AddSubMix,
    QuizMode::Mix,
    QuizMode::AddInverse,
    QuizMode::SubInverse,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      QuizMode::Add => "add",
      QuizMode::Sub => "sub",
      QuizMode::Mul => "mul",
      QuizMode::Div => "div",
      QuizMode::AddSubMix => "add-sub-mix",
      QuizMode::Mix => "mix",
      QuizMode::AddInverse => "add-inverse",
      QuizMode::SubInverse => "sub-inverse",
    }
  }

  pub fn is_inverse(self) -> bool { matches!(self, QuizMode::AddInverse | QuizMode::SubInverse) }

  /// Applies the "inverse" toggle: plain add/sub become their fill-in-the-blank variants.
  pub fn with_inverse(self, inverse: bool) -> Self {
    match (self, inverse) {
      (QuizMode::Add, true) => QuizMode::AddInverse,
      (QuizMode::Sub, true) => QuizMode::SubInverse,
      (mode, _) => mode,
    }
  }
}

impl fmt::Display for QuizMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for QuizMode {
  type Err = QuizError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim().to_ascii_lowercase();
    QuizMode::ALL
      .into_iter()
      .find(|m| m.as_str() == wanted)
      .ok_or_else(|| QuizError::InvalidMode(s.to_string()))
  }
}

/// Binary (`a op b`) or ternary (`a op b ± c`) expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Terms {
  Two,
  Three,
}

impl Terms {
  pub fn count(self) -> u32 {
    match self {
      Terms::Two => 2,
      Terms::Three => 3,
    }
  }
}

impl TryFrom<u8> for Terms {
  type Error = QuizError;

  fn try_from(n: u8) -> Result<Self, Self::Error> {
    match n {
      2 => Ok(Terms::Two),
      3 => Ok(Terms::Three),
      other => Err(QuizError::InvalidTerms(other)),
    }
  }
}

impl From<Terms> for u8 {
  fn from(t: Terms) -> Self { t.count() as u8 }
}

/// What to generate: mode, numeric ceiling and (optionally) the term count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
  pub mode: QuizMode,
  pub max: i64,
  #[serde(default)]
  pub terms: Option<Terms>,
}

impl QuizConfig {
  pub fn new(mode: QuizMode, max: i64, terms: Option<Terms>) -> Result<Self, QuizError> {
    if !(1..=MAX_CEILING).contains(&max) {
      return Err(QuizError::InvalidMax(max));
    }
    Ok(Self { mode, max, terms })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn modes_parse_from_kebab_case_names() {
    for mode in QuizMode::ALL {
      assert_eq!(mode.as_str().parse::<QuizMode>().unwrap(), mode);
    }
    assert_eq!(" Add-Sub-Mix ".parse::<QuizMode>().unwrap(), QuizMode::AddSubMix);
    assert!(matches!("pow".parse::<QuizMode>(), Err(QuizError::InvalidMode(_))));
  }

  #[test]
  fn terms_accept_only_two_or_three() {
    assert_eq!(Terms::try_from(2).unwrap(), Terms::Two);
    assert_eq!(Terms::try_from(3).unwrap(), Terms::Three);
    assert!(matches!(Terms::try_from(4), Err(QuizError::InvalidTerms(4))));
    let cfg: QuizConfig = serde_json::from_str(r#"{"mode":"add-inverse","max":20,"terms":3}"#).unwrap();
    assert_eq!(cfg.terms, Some(Terms::Three));
    assert!(serde_json::from_str::<QuizConfig>(r#"{"mode":"add","max":20,"terms":5}"#).is_err());
  }

  #[test]
  fn config_rejects_out_of_range_max() {
    assert!(QuizConfig::new(QuizMode::Add, 0, None).is_err());
    assert!(QuizConfig::new(QuizMode::Add, MAX_CEILING + 1, None).is_err());
    assert!(QuizConfig::new(QuizMode::Add, 10, None).is_ok());
  }

  #[test]
  fn inverse_toggle_only_touches_add_and_sub() {
    assert_eq!(QuizMode::Add.with_inverse(true), QuizMode::AddInverse);
    assert_eq!(QuizMode::Sub.with_inverse(true), QuizMode::SubInverse);
    assert_eq!(QuizMode::Mul.with_inverse(true), QuizMode::Mul);
    assert_eq!(QuizMode::Add.with_inverse(false), QuizMode::Add);
  }

  #[test]
  fn substitution_targets_the_hidden_slot() {
    let q = Question::inverse(3, 4, Operator::Add, vec![], HiddenSlot::Left);
    assert_eq!(q.answer, 3);
    assert_eq!(q.substituted(9), (9, 4));
    let q = Question::inverse(7, 2, Operator::Sub, vec![], HiddenSlot::Right);
    assert_eq!(q.answer, 2);
    assert_eq!(q.substituted(9), (7, 9));
  }
}
