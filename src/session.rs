//! One player's run through a quiz: a fixed number of questions, a pending
//! question, and a running tally. Sessions are plain values; the shared store
//! lives in `state.rs`.

use std::time::{Duration, Instant};

use serde::Serialize;
use uuid::Uuid;

use crate::arith::{check_answer, derive_difficulty_from_question, generate_question, DifficultyProfile, Sampler};
use crate::domain::{QuizConfig, Question};
use crate::error::QuizError;

#[derive(Clone, Debug)]
pub struct QuizSession {
  pub id: String,
  pub config: QuizConfig,
  /// Number of questions in the run.
  pub total: usize,
  /// Questions answered so far.
  pub index: usize,
  pub correct: usize,
  current: Option<Question>,
  last_active: Instant,
}

/// Result of one submission.
#[derive(Clone, Debug, Serialize)]
pub struct AnswerOutcome {
  pub question: Question,
  pub correct: bool,
  pub expected: i64,
  pub profile: DifficultyProfile,
}

impl QuizSession {
  /// New session with its first question already drawn.
  pub fn new<S: Sampler>(config: QuizConfig, total: usize, s: &mut S) -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      config,
      total: total.max(1),
      index: 0,
      correct: 0,
      current: Some(generate_question(s, &config)),
      last_active: Instant::now(),
    }
  }

  pub fn is_finished(&self) -> bool { self.index >= self.total }

  pub fn current(&self) -> Option<&Question> { self.current.as_ref() }

  pub fn last_active(&self) -> Instant { self.last_active }

  /// No question served or answered within `ttl`.
  pub fn is_idle(&self, now: Instant, ttl: Duration) -> bool {
    now.saturating_duration_since(self.last_active) >= ttl
  }

  /// Pending question, generating a new one only if none is pending.
  pub fn next_question<S: Sampler>(&mut self, s: &mut S) -> Result<&Question, QuizError> {
    if self.is_finished() {
      return Err(QuizError::SessionFinished(self.id.clone()));
    }
    self.last_active = Instant::now();
    let config = self.config;
    Ok(&*self.current.get_or_insert_with(|| generate_question(s, &config)))
  }

  /// Checks `answer` against the pending question and advances the tally.
  pub fn submit(&mut self, answer: i64) -> Result<AnswerOutcome, QuizError> {
    let question = self.current.take().ok_or_else(|| QuizError::NoActiveQuestion(self.id.clone()))?;
    self.last_active = Instant::now();
    let correct = check_answer(&question, answer);
    self.index += 1;
    if correct {
      self.correct += 1;
    }
    let profile = derive_difficulty_from_question(&question, self.config.mode, self.config.max);
    Ok(AnswerOutcome { expected: question.answer, question, correct, profile })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::arith::sampler::testing::{seeded, LowSampler};
  use crate::domain::{QuizMode, Terms};

  fn session(mode: QuizMode, total: usize) -> QuizSession {
    QuizSession::new(QuizConfig::new(mode, 10, Some(Terms::Two)).unwrap(), total, &mut seeded(99))
  }

  #[test]
  fn pending_question_is_reused_until_answered() {
    let mut s = seeded(1);
    let mut quiz = session(QuizMode::Add, 3);
    let first = quiz.next_question(&mut s).unwrap().clone();
    let again = quiz.next_question(&mut s).unwrap().clone();
    assert_eq!(first, again);
    assert_eq!(quiz.current(), Some(&first));
  }

  #[test]
  fn tallies_correct_and_wrong_answers() {
    let mut quiz = session(QuizMode::Sub, 2);
    let q = quiz.next_question(&mut LowSampler).unwrap().clone();
    let outcome = quiz.submit(q.answer).unwrap();
    assert!(outcome.correct);
    assert_eq!(outcome.expected, q.answer);

    let q = quiz.next_question(&mut LowSampler).unwrap().clone();
    let outcome = quiz.submit(q.answer + 1).unwrap();
    assert!(!outcome.correct);
    assert_eq!((quiz.index, quiz.correct), (2, 1));
    assert!(quiz.is_finished());
  }

  #[test]
  fn finished_sessions_refuse_more_questions() {
    let mut quiz = session(QuizMode::Add, 1);
    let q = quiz.next_question(&mut LowSampler).unwrap().clone();
    quiz.submit(q.answer).unwrap();
    assert!(matches!(quiz.next_question(&mut LowSampler), Err(QuizError::SessionFinished(_))));
  }

  #[test]
  fn new_sessions_start_with_a_question() {
    let quiz = session(QuizMode::Add, 5);
    assert!(quiz.current().is_some());
    assert!(!quiz.is_finished());
  }

  #[test]
  fn submitting_without_a_question_fails() {
    let mut quiz = session(QuizMode::Add, 5);
    let answer = quiz.current().unwrap().answer;
    quiz.submit(answer).unwrap();
    assert!(matches!(quiz.submit(3), Err(QuizError::NoActiveQuestion(_))));
    assert_eq!(quiz.index, 1);
  }

  #[test]
  fn activity_resets_the_idle_clock() {
    let mut quiz = session(QuizMode::Add, 5);
    let ttl = Duration::from_secs(60);
    let later = quiz.last_active() + Duration::from_secs(120);
    assert!(quiz.is_idle(later, ttl));
    assert!(!quiz.is_idle(quiz.last_active(), ttl));

    let before = quiz.last_active();
    std::thread::sleep(Duration::from_millis(2));
    quiz.next_question(&mut LowSampler).unwrap();
    assert!(quiz.last_active() > before);
  }

  #[test]
  fn outcome_carries_a_difficulty_profile() {
    let mut quiz = session(QuizMode::AddInverse, 1);
    let q = quiz.next_question(&mut seeded(4)).unwrap().clone();
    let outcome = quiz.submit(q.answer).unwrap();
    assert!(outcome.profile.id.starts_with("add-inverse:10:1:"));
    assert!(outcome.profile.id.ends_with(":inv"));
  }
}
