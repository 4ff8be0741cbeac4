//! Rendering a question to text and checking submitted answers.

use super::evaluate::evaluate;
use crate::domain::{HiddenSlot, Question};

const PLACEHOLDER: &str = "?";

/// `a op b [± n]... = total`, single-space separated.
///
/// For inverse questions the hidden slot shows `?` and the total is
/// recomputed by substituting `answer` back into that slot.
pub fn format_question(q: &Question) -> String {
  let (a, b) = q.substituted(q.answer);
  render(q, a, b, evaluate(a, b, q.op, &q.extras).to_string())
}

/// What the player sees while answering: like [`format_question`], but a
/// forward question's total is replaced by `?` as well.
pub fn format_prompt(q: &Question) -> String {
  if q.is_inverse() {
    return format_question(q);
  }
  render(q, q.a, q.b, PLACEHOLDER.to_string())
}

fn render(q: &Question, a: i64, b: i64, total: String) -> String {
  let show = |slot: HiddenSlot, value: i64| {
    if q.hidden == Some(slot) { PLACEHOLDER.to_string() } else { value.to_string() }
  };

  let mut tokens = vec![show(HiddenSlot::Left, a), q.op.symbol().to_string(), show(HiddenSlot::Right, b)];
  for step in &q.extras {
    tokens.push(step.op.symbol().to_string());
    tokens.push(step.value.to_string());
  }
  tokens.push("=".into());
  tokens.push(total);
  tokens.join(" ")
}

/// The submitted number must equal `answer`, for forward and inverse questions alike.
pub fn check_answer(q: &Question, submitted: i64) -> bool { submitted == q.answer }
