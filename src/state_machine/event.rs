//! Events that drive the interview state machine

use crate::evaluation::Evaluation;
use crate::session::Session;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// The scoring service created a session
    SessionCreated { session: Session },

    /// Snapshot read back from the session slot (`None` if absent or corrupt)
    Resumed { snapshot: Option<Session> },

    /// Candidate submitted an answer for the current question
    AnswerSubmitted { answer: String },

    /// The scoring service evaluated the answer for `index`
    EvaluationReceived {
        index: usize,
        answer: String,
        evaluation: Evaluation,
    },

    /// Candidate moves past the current question
    Advance,

    /// Candidate abandons the interview
    Abandon,
}
