//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{Path, Query, State}, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::error::QuizError;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_presets(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(PresetsOut { presets: state.presets.clone() })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_question(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QuizParams>,
) -> Result<Json<PreviewOut>, QuizError> {
  let preview = preview_question(&state, &q)?;
  info!(target: "quiz", difficulty = preview.difficulty.value, "HTTP preview question served");
  Ok(Json(preview))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_quiz(
  State(state): State<Arc<AppState>>,
  Json(body): Json<QuizParams>,
) -> Result<Json<SessionOut>, QuizError> {
  let session = start_quiz(&state, &body).await?;
  info!(target: "quiz", id = %session.session_id, mode = %session.mode, total = session.total, "HTTP quiz started");
  Ok(Json(session))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_quiz(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SessionOut>, QuizError> {
  Ok(Json(session_status(&state, &id).await?))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_quiz_question(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<QuestionOut>, QuizError> {
  Ok(Json(next_question(&state, &id).await?))
}

#[instrument(level = "info", skip(state, body), fields(%id, answer = body.answer))]
pub async fn http_post_quiz_answer(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerOut>, QuizError> {
  let result = submit_answer(&state, &id, body.answer).await?;
  info!(target: "quiz", %id, correct = result.correct, creature = result.difficulty.creature.id, "HTTP submit_answer evaluated");
  Ok(Json(result))
}
