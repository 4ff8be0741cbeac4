//! Loading quiz configuration (settings + optional extra presets) from TOML.
//!
//! Example:
//! ```toml
//! [settings]
//! default_question_count = 10
//! max_question_count = 50
//!
//! [[presets]]
//! id = "g1-add-5"
//! label = "Addition up to 5"
//! grade = 1
//! mode = "add"
//! max = 5
//! terms = 2
//! ```

use serde::Deserialize;
use tracing::{error, info};

use crate::presets::Preset;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct QuizFileConfig {
  #[serde(default)]
  pub settings: Settings,
  #[serde(default)]
  pub presets: Vec<Preset>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub default_question_count: usize,
  /// Upper bound for the per-request `count`.
  pub max_question_count: usize,
}

impl Default for Settings {
  fn default() -> Self {
    Self { default_question_count: 10, max_question_count: 50 }
  }
}

impl Settings {
  pub fn question_count(&self, requested: Option<usize>) -> usize {
    requested.unwrap_or(self.default_question_count).clamp(1, self.max_question_count.max(1))
  }
}

/// Attempt to load `QuizFileConfig` from QUIZ_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_quiz_config_from_env() -> Option<QuizFileConfig> {
  let path = std::env::var("QUIZ_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<QuizFileConfig>(&s) {
      Ok(cfg) => {
        info!(target: "sansu_backend", %path, presets = cfg.presets.len(), "Loaded quiz config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "sansu_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "sansu_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{QuizMode, Terms};

  #[test]
  fn parses_settings_and_presets() {
    let cfg: QuizFileConfig = toml::from_str(
      r#"
        [settings]
        default_question_count = 5

        [[presets]]
        id = "g1-add-5"
        label = "Addition up to 5"
        grade = 1
        mode = "add-sub-mix"
        max = 5
        terms = 3
      "#,
    )
    .unwrap();
    assert_eq!(cfg.settings.default_question_count, 5);
    assert_eq!(cfg.settings.max_question_count, 50);
    assert_eq!(cfg.presets[0].mode, QuizMode::AddSubMix);
    assert_eq!(cfg.presets[0].terms, Some(Terms::Three));
    assert_eq!(cfg.presets[0].count, None);
  }

  #[test]
  fn empty_file_means_defaults() {
    let cfg: QuizFileConfig = toml::from_str("").unwrap();
    assert!(cfg.presets.is_empty());
    assert_eq!(cfg.settings.default_question_count, 10);
  }

  #[test]
  fn rejects_unknown_modes_and_terms() {
    let bad_mode = "[[presets]]\nid='x'\nlabel='x'\ngrade=1\nmode='pow'\nmax=5\n";
    assert!(toml::from_str::<QuizFileConfig>(bad_mode).is_err());
    let bad_terms = "[[presets]]\nid='x'\nlabel='x'\ngrade=1\nmode='add'\nmax=5\nterms=4\n";
    assert!(toml::from_str::<QuizFileConfig>(bad_terms).is_err());
  }

  #[test]
  fn question_count_is_clamped() {
    let s = Settings::default();
    assert_eq!(s.question_count(None), 10);
    assert_eq!(s.question_count(Some(0)), 1);
    assert_eq!(s.question_count(Some(500)), 50);
  }
}
