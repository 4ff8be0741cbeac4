//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Resolving request parameters (preset or mode/max/terms + toggles) into a config
//!   - Starting sessions and serving their questions
//!   - Checking answers and attaching the difficulty creature
//!   - One-off question previews outside any session

use tracing::{debug, info, instrument};

use crate::arith::{derive_difficulty_from_question, generate_question, RngSampler};
use crate::domain::{QuizConfig, QuizMode, Terms};
use crate::error::QuizError;
use crate::protocol::{answer_out, session_out, to_out, AnswerOut, PreviewOut, QuestionOut, QuizParams, SessionOut};
use crate::state::AppState;

const DEFAULT_MODE: QuizMode = QuizMode::Add;
const DEFAULT_MAX: i64 = 10;

/// Turn request parameters into a validated config plus a question count.
/// A preset wins over explicit mode/max/terms; the inverse toggle applies on top.
pub fn resolve_config(state: &AppState, params: &QuizParams) -> Result<(QuizConfig, usize), QuizError> {
  let (config, preset_count) = match &params.preset {
    Some(id) => {
      let preset = state.preset(id)?;
      (preset.config()?, preset.count)
    }
    None => {
      let mode = match &params.mode {
        Some(m) => m.parse::<QuizMode>()?,
        None => DEFAULT_MODE,
      };
      let terms = params.terms.map(Terms::try_from).transpose()?;
      (QuizConfig::new(mode, params.max.unwrap_or(DEFAULT_MAX), terms)?, None)
    }
  };
  let config = QuizConfig { mode: config.mode.with_inverse(params.inverse), ..config };
  let count = state.settings.question_count(params.count.or(preset_count));
  Ok((config, count))
}

#[instrument(level = "info", skip(state))]
pub async fn start_quiz(state: &AppState, params: &QuizParams) -> Result<SessionOut, QuizError> {
  let (config, count) = resolve_config(state, params)?;
  let session = state.start_session(config, count).await;
  Ok(session_out(&session))
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn next_question(state: &AppState, session_id: &str) -> Result<QuestionOut, QuizError> {
  let (question, session) = state.next_question(session_id).await?;
  debug!(target: "quiz", id = %session.id, index = session.index, "Question served");
  Ok(to_out(&question))
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn submit_answer(state: &AppState, session_id: &str, answer: i64) -> Result<AnswerOut, QuizError> {
  let (outcome, session) = state.submit_answer(session_id, answer).await?;
  info!(
    target: "quiz",
    id = %session.id,
    correct = outcome.correct,
    index = session.index,
    difficulty = outcome.profile.value,
    creature = outcome.profile.creature.id,
    "Answer checked"
  );
  Ok(answer_out(outcome, &session))
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn session_status(state: &AppState, session_id: &str) -> Result<SessionOut, QuizError> {
  Ok(session_out(&state.get_session(session_id).await?))
}

/// A single question (and its difficulty) without creating a session.
#[instrument(level = "info", skip(state))]
pub fn preview_question(state: &AppState, params: &QuizParams) -> Result<PreviewOut, QuizError> {
  let (config, _) = resolve_config(state, params)?;
  let question = generate_question(&mut RngSampler::thread(), &config);
  let difficulty = derive_difficulty_from_question(&question, config.mode, config.max);
  Ok(PreviewOut { question: to_out(&question), difficulty })
}
