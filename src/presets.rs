//! Built-in quiz presets, grouped by school grade. They keep the app useful
//! without any external config; TOML presets with the same id replace them.

use serde::{Deserialize, Serialize};

use crate::domain::{QuizConfig, QuizMode, Terms};
use crate::error::QuizError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
  pub id: String,
  pub label: String,
  pub grade: u8,
  pub mode: QuizMode,
  pub max: i64,
  #[serde(default)] pub terms: Option<Terms>,
  /// Question count; the configured default applies when absent.
  #[serde(default)] pub count: Option<usize>,
}

impl Preset {
  pub fn config(&self) -> Result<QuizConfig, QuizError> {
    QuizConfig::new(self.mode, self.max, self.terms)
  }
}

fn preset(id: &str, label: &str, grade: u8, mode: QuizMode, max: i64, terms: Option<Terms>) -> Preset {
  Preset { id: id.into(), label: label.into(), grade, mode, max, terms, count: None }
}

pub fn builtin_presets() -> Vec<Preset> {
  use QuizMode::*;
  vec![
    preset("g1-add-10", "Addition up to 10", 1, Add, 10, Some(Terms::Two)),
    preset("g1-sub-10", "Subtraction within 10", 1, Sub, 10, Some(Terms::Two)),
    preset("g1-add-20", "Addition up to 20", 1, Add, 20, Some(Terms::Two)),
    preset("g1-sub-20", "Subtraction within 20", 1, Sub, 20, Some(Terms::Two)),
    preset("g1-three-terms", "Three numbers (+ and -)", 1, AddSubMix, 20, Some(Terms::Three)),
    preset("g1-fill-blank", "Fill in the blank (+)", 1, AddInverse, 10, Some(Terms::Two)),
    preset("g2-add-100", "Addition up to 100", 2, Add, 100, Some(Terms::Two)),
    preset("g2-sub-100", "Subtraction within 100", 2, Sub, 100, Some(Terms::Two)),
    preset("g2-mixed-100", "Mixed + and - up to 100", 2, AddSubMix, 100, None),
    preset("g2-times-tables", "Times tables", 2, Mul, 20, None),
    preset("g2-fill-blank", "Fill in the blank (-)", 2, SubInverse, 100, Some(Terms::Two)),
    preset("g3-mix-1000", "Mixed operations up to 1000", 3, Mix, 1000, None),
    preset("g3-fill-blank", "Fill in the blank, three numbers", 3, AddInverse, 100, Some(Terms::Three)),
  ]
}

/// Built-ins first, then `overrides` replacing same-id entries or appended.
pub fn merge_presets(overrides: Vec<Preset>) -> Vec<Preset> {
  let mut out = builtin_presets();
  for p in overrides {
    match out.iter_mut().find(|existing| existing.id == p.id) {
      Some(slot) => *slot = p,
      None => out.push(p),
    }
  }
  out
}
