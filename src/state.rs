//! Application state: in-memory quiz sessions, presets and settings.
//!
//! Each session is a single-player value object; the store only guards the
//! map. Questions are drawn from a fresh thread-local sampler per call.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::arith::RngSampler;
use crate::config::{load_quiz_config_from_env, QuizFileConfig, Settings};
use crate::domain::{QuizConfig, Question};
use crate::error::QuizError;
use crate::presets::{merge_presets, Preset};
use crate::session::{AnswerOutcome, QuizSession};

/// Store size that triggers pruning.
const SESSION_SOFT_CAP: usize = 10_000;

/// Sessions untouched for this long are dropped when pruning.
const SESSION_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<String, QuizSession>>>,
    pub presets: Vec<Preset>,
    pub settings: Settings,
}

impl AppState {
    /// Build state from env: load optional TOML config, merge presets.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_quiz_config_from_env().unwrap_or_default();
        Self::with_config(cfg)
    }

    pub fn with_config(cfg: QuizFileConfig) -> Self {
        let mut presets = Vec::new();
        for p in merge_presets(cfg.presets) {
            match p.config() {
                Ok(_) => presets.push(p),
                Err(e) => warn!(target: "quiz", id = %p.id, error = %e, "Skipping invalid preset"),
            }
        }

        let mut count_by_grade: HashMap<u8, usize> = HashMap::new();
        for p in &presets {
            *count_by_grade.entry(p.grade).or_default() += 1;
        }
        for (grade, count) in count_by_grade {
            info!(target: "quiz", grade, presets = count, "Startup preset inventory");
        }

        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            presets,
            settings: cfg.settings,
        }
    }

    pub fn preset(&self, id: &str) -> Result<&Preset, QuizError> {
        self.presets
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| QuizError::UnknownPreset(id.to_string()))
    }

    /// Create a session with its first question. Returns a snapshot.
    #[instrument(level = "info", skip(self), fields(mode = %config.mode, max = config.max))]
    pub async fn start_session(&self, config: QuizConfig, total: usize) -> QuizSession {
        let session = QuizSession::new(config, total, &mut RngSampler::thread());

        let mut sessions = self.sessions.write().await;
        if sessions.len() >= SESSION_SOFT_CAP {
            let dropped = prune_sessions(&mut sessions, SESSION_SOFT_CAP, SESSION_IDLE_TTL, Instant::now());
            warn!(target: "quiz", dropped, remaining = sessions.len(), "Session store over soft cap; pruned");
        }
        sessions.insert(session.id.clone(), session.clone());
        info!(target: "quiz", id = %session.id, total = session.total, "Quiz session started");
        session
    }

    /// Pending (or freshly drawn) question of a session, plus a session snapshot.
    #[instrument(level = "debug", skip(self))]
    pub async fn next_question(&self, id: &str) -> Result<(Question, QuizSession), QuizError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id).ok_or_else(|| QuizError::UnknownSession(id.to_string()))?;
        let question = session.next_question(&mut RngSampler::thread())?.clone();
        Ok((question, session.clone()))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn submit_answer(&self, id: &str, answer: i64) -> Result<(AnswerOutcome, QuizSession), QuizError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id).ok_or_else(|| QuizError::UnknownSession(id.to_string()))?;
        let outcome = session.submit(answer)?;
        Ok((outcome, session.clone()))
    }

    /// Read-only snapshot of a session.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_session(&self, id: &str) -> Result<QuizSession, QuizError> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned().ok_or_else(|| QuizError::UnknownSession(id.to_string()))
    }
}

/// Drops finished and idle sessions, then the least recently active ones
/// until the store is a tenth below `cap`. Returns how many were dropped.
fn prune_sessions(sessions: &mut HashMap<String, QuizSession>, cap: usize, ttl: Duration, now: Instant) -> usize {
    let before = sessions.len();
    sessions.retain(|_, s| !s.is_finished() && !s.is_idle(now, ttl));

    let target = cap - cap / 10;
    if sessions.len() > target {
        let mut by_age: Vec<(Instant, String)> =
            sessions.iter().map(|(id, s)| (s.last_active(), id.clone())).collect();
        by_age.sort_unstable();
        let excess = sessions.len() - target;
        for (_, id) in by_age.into_iter().take(excess) {
            sessions.remove(&id);
        }
    }
    before - sessions.len()
}
