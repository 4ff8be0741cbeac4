//! Difficulty scoring and the creature reward tiers.
//!
//! The score only drives cosmetic feedback; it never feeds back into generation.

use serde::Serialize;

use crate::domain::{Operator, QuizMode, Question, Terms, MAX_CEILING};

pub const MIN_DIFFICULTY: u32 = 120;
pub const MAX_DIFFICULTY: u32 = 999;

const BASE_SCORE: f64 = 90.0;
const PER_OPERATION: f64 = 28.0;
const OPERAND_WEIGHT: f64 = 22.0;
const OPERAND_CAP: f64 = 140.0;
const RANGE_WEIGHT: f64 = 18.0;
const RANGE_CAP: f64 = 160.0;

const INVERSE_BONUS: f64 = 60.0;
const MULTIPLICATION_BONUS: f64 = 75.0;
const DIVISION_BONUS: f64 = 85.0;
const MIX_BONUS: f64 = 55.0;
const ADD_SUB_MIX_BONUS: f64 = 35.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Creature {
  pub id: &'static str,
  pub name: &'static str,
  pub emoji: &'static str,
}

/// Ascending thresholds; a value `<=` the threshold earns that creature.
pub const CREATURE_TIERS: [(u32, Creature); 7] = [
  (180, Creature { id: "chick", name: "Chick", emoji: "🐥" }),
  (220, Creature { id: "kitten", name: "Kitten", emoji: "🐱" }),
  (260, Creature { id: "puppy", name: "Puppy", emoji: "🐶" }),
  (320, Creature { id: "fox", name: "Fox", emoji: "🦊" }),
  (380, Creature { id: "lion", name: "Lion", emoji: "🦁" }),
  (450, Creature { id: "dragon", name: "Dragon", emoji: "🐉" }),
  (520, Creature { id: "unicorn", name: "Unicorn", emoji: "🦄" }),
];

/// Beyond every threshold.
pub const HERO: Creature = Creature { id: "hero", name: "Hero", emoji: "🦸" };

/// Generation characteristics fed to the profiler.
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyContext {
  pub mode: QuizMode,
  pub max: i64,
  pub terms: Option<Terms>,
  /// Defaults to `terms - 1` (at least 1).
  pub operations_count: Option<u32>,
  /// Defaults to `max`.
  pub highest_operand: Option<i64>,
  pub includes_multiplication: bool,
  pub includes_division: bool,
  pub includes_inverse: bool,
}

impl DifficultyContext {
  /// Context with the flags implied by `mode` and nothing else known.
  pub fn new(mode: QuizMode, max: i64) -> Self {
    Self {
      mode,
      max,
      terms: None,
      operations_count: None,
      highest_operand: None,
      includes_multiplication: mode == QuizMode::Mul,
      includes_division: mode == QuizMode::Div,
      includes_inverse: mode.is_inverse(),
    }
  }

  pub fn operations(&self) -> u32 {
    self
      .operations_count
      .unwrap_or_else(|| self.terms.map_or(2, Terms::count).saturating_sub(1))
      .max(1)
  }

  pub fn clamped_max(&self) -> i64 { self.max.clamp(1, MAX_CEILING) }

  pub fn highest(&self) -> i64 { self.highest_operand.unwrap_or(self.max).max(1) }

  fn mode_bonus(&self) -> f64 {
    let mut bonus = 0.0;
    if self.includes_inverse { bonus += INVERSE_BONUS; }
    if self.includes_multiplication { bonus += MULTIPLICATION_BONUS; }
    if self.includes_division { bonus += DIVISION_BONUS; }
    match self.mode {
      QuizMode::Mix => bonus += MIX_BONUS,
      QuizMode::AddSubMix => bonus += ADD_SUB_MIX_BONUS,
      _ => {}
    }
    bonus
  }

  fn flags(&self) -> String {
    let flags: Vec<&str> = [
      (self.includes_inverse, "inv"),
      (self.includes_multiplication, "mul"),
      (self.includes_division, "div"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();
    if flags.is_empty() { "plain".into() } else { flags.join("+") }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DifficultyProfile {
  /// `mode:max:operations:value:flags`, stable for identical inputs.
  pub id: String,
  pub value: u32,
  pub creature: Creature,
}

/// Score before rounding and clamping.
pub fn raw_score(ctx: &DifficultyContext) -> f64 {
  let operand_part = ((ctx.highest() as f64 + 2.0).log2() * OPERAND_WEIGHT).min(OPERAND_CAP);
  let range_part = ((ctx.clamped_max() as f64 + 4.0).log2() * RANGE_WEIGHT).min(RANGE_CAP);
  BASE_SCORE + ctx.operations() as f64 * PER_OPERATION + operand_part + range_part + ctx.mode_bonus()
}

pub fn normalize_score(raw: f64) -> u32 {
  (raw.round() as i64).clamp(MIN_DIFFICULTY as i64, MAX_DIFFICULTY as i64) as u32
}

/// First tier whose threshold is `>= value`, otherwise the hero.
pub fn creature_for(value: u32) -> Creature {
  CREATURE_TIERS
    .iter()
    .find(|(threshold, _)| value <= *threshold)
    .map(|(_, creature)| *creature)
    .unwrap_or(HERO)
}

pub fn derive_difficulty_profile(ctx: &DifficultyContext) -> DifficultyProfile {
  let value = normalize_score(raw_score(ctx));
  let id = format!("{}:{}:{}:{}:{}", ctx.mode, ctx.clamped_max(), ctx.operations(), value, ctx.flags());
  DifficultyProfile { id, value, creature: creature_for(value) }
}

/// Context read off an already generated question.
pub fn create_difficulty_context_from_question(q: &Question, mode: QuizMode, max: i64) -> DifficultyContext {
  let highest = q.operands().chain([q.answer]).map(i64::abs).max().unwrap_or(0);
  let base = DifficultyContext::new(mode, max);
  DifficultyContext {
    terms: Terms::try_from(q.terms() as u8).ok(),
    operations_count: Some(1 + q.extras.len() as u32),
    highest_operand: Some(highest),
    includes_multiplication: base.includes_multiplication || q.op == Operator::Mul,
    includes_inverse: base.includes_inverse || q.is_inverse(),
    ..base
  }
}

pub fn derive_difficulty_from_question(q: &Question, mode: QuizMode, max: i64) -> DifficultyProfile {
  derive_difficulty_profile(&create_difficulty_context_from_question(q, mode, max))
}
