//! Arithmetic question core: sampling, evaluation, forward and inverse
//! generation, difficulty profiling, formatting and answer checking.
//!
//! Everything in here is pure and synchronous. Randomness comes in through a
//! [`Sampler`] so callers (and tests) decide where entropy comes from.

pub mod difficulty;
pub mod evaluate;
pub mod format;
pub mod forward;
pub mod inverse;
pub mod sampler;

pub use difficulty::{derive_difficulty_from_question, DifficultyProfile};
pub use evaluate::evaluate;
pub use format::{check_answer, format_prompt, format_question};
pub use forward::generate_question;
pub use inverse::{generate_inverse_question, generate_subtraction_inverse_question};
pub use sampler::{RngSampler, Sampler};

/// Bounded rejection sampling: draw up to `attempts` candidates and keep the
/// first acceptable one, otherwise return `fallback()`. Never loops forever.
pub fn try_n_times<T>(
  attempts: usize,
  mut candidate: impl FnMut() -> T,
  is_acceptable: impl Fn(&T) -> bool,
  fallback: impl FnOnce() -> T,
) -> T {
  for _ in 0..attempts {
    let c = candidate();
    if is_acceptable(&c) {
      return c;
    }
  }
  fallback()
}
