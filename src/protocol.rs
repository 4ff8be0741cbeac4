//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::arith::{format_prompt, DifficultyProfile};
use crate::domain::{ExtraStep, HiddenSlot, Operator, Question, QuizMode, Terms};
use crate::presets::Preset;
use crate::session::{AnswerOutcome, QuizSession};

/// Quiz parameters as they arrive from a query string or JSON body.
/// Either `preset` or `mode` (+ `max`, `terms`) selects what to generate.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct QuizParams {
    pub preset: Option<String>,
    pub mode: Option<String>,
    pub max: Option<i64>,
    pub terms: Option<u8>,
    pub count: Option<usize>,
    /// Turns `add` / `sub` into their fill-in-the-blank variants.
    pub inverse: bool,
}

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    StartQuiz {
        #[serde(default)]
        params: QuizParams,
    },
    NextQuestion {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    SubmitAnswer {
        #[serde(rename = "sessionId")]
        session_id: String,
        answer: i64,
    },
    Status {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Preview {
        #[serde(default)]
        params: QuizParams,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Session {
        session: SessionOut,
    },
    Question {
        #[serde(rename = "sessionId")]
        session_id: String,
        question: QuestionOut,
    },
    AnswerResult {
        result: AnswerOut,
    },
    Preview {
        preview: PreviewOut,
    },
    Error {
        message: String,
    },
}

/// DTO used by both WS and HTTP for question delivery. The hidden operand
/// of an inverse question is `null`, and so is a forward question's total.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOut {
    pub prompt: String,
    pub a: Option<i64>,
    pub b: Option<i64>,
    pub op: Operator,
    pub extras: Vec<ExtraStep>,
    pub total: Option<i64>,
    pub is_inverse: bool,
    pub inverse_side: Option<HiddenSlot>,
}

/// Convert an internal `Question` to the public DTO.
pub fn to_out(q: &Question) -> QuestionOut {
    let (a, b) = match q.hidden {
        Some(HiddenSlot::Left) => (None, Some(q.b)),
        Some(HiddenSlot::Right) => (Some(q.a), None),
        None => (Some(q.a), Some(q.b)),
    };
    QuestionOut {
        prompt: format_prompt(q),
        a,
        b,
        op: q.op,
        extras: q.extras.clone(),
        total: q.is_inverse().then(|| crate::arith::evaluate(q.a, q.b, q.op, &q.extras)),
        is_inverse: q.is_inverse(),
        inverse_side: q.inverse_side(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOut {
    pub session_id: String,
    pub mode: QuizMode,
    pub max: i64,
    pub terms: Option<Terms>,
    pub total: usize,
    pub index: usize,
    pub correct: usize,
    pub finished: bool,
    pub question: Option<QuestionOut>,
}

pub fn session_out(s: &QuizSession) -> SessionOut {
    SessionOut {
        session_id: s.id.clone(),
        mode: s.config.mode,
        max: s.config.max,
        terms: s.config.terms,
        total: s.total,
        index: s.index,
        correct: s.correct,
        finished: s.is_finished(),
        question: s.current().map(to_out),
    }
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    pub answer: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOut {
    pub correct: bool,
    pub expected: i64,
    /// Fully written out question, e.g. `? + 4 = 7` or `3 + 4 = 7`.
    pub solution: String,
    pub index: usize,
    pub correct_count: usize,
    pub total: usize,
    pub finished: bool,
    pub difficulty: DifficultyProfile,
}

pub fn answer_out(outcome: AnswerOutcome, s: &QuizSession) -> AnswerOut {
    AnswerOut {
        correct: outcome.correct,
        expected: outcome.expected,
        solution: crate::arith::format_question(&outcome.question),
        index: s.index,
        correct_count: s.correct,
        total: s.total,
        finished: s.is_finished(),
        difficulty: outcome.profile,
    }
}

#[derive(Debug, Serialize)]
pub struct PreviewOut {
    pub question: QuestionOut,
    pub difficulty: DifficultyProfile,
}

#[derive(Serialize)]
pub struct PresetsOut {
    pub presets: Vec<Preset>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}
