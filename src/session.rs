//! Interview session value type
//!
//! A `Session` is the unit that gets snapshotted into the session slot. Its
//! serialized layout is the persisted slot layout:
//!
//! ```json
//! {"session_id": "...", "questions": ["..."], "setup": {...},
//!  "current_question": 0, "answers": {"0": {"answer": "...", "evaluation": {...}}}}
//! ```

use crate::evaluation::{Evaluation, IntegrityViolation};
use crate::setup::{InterviewSetup, SetupError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Reasons a session value (fresh or deserialized) is unusable
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to parse session snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Session id is empty")]
    EmptySessionId,
    #[error("Session has no questions")]
    NoQuestions,
    #[error("Question {0} is blank")]
    BlankQuestion(usize),
    #[error("Current question {index} is past the end of {len} questions")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Question {0} was advanced past without an answer")]
    MissingAnswer(usize),
    #[error("Answer recorded for question {0}, which has not been reached")]
    AnswerAhead(usize),
    #[error("Answer for question {index} has an invalid evaluation: {violation}")]
    InvalidEvaluation {
        index: usize,
        violation: IntegrityViolation,
    },
    #[error("Invalid setup: {0}")]
    Setup(#[from] SetupError),
}

/// A submitted answer together with the evaluation it received
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub answer: String,
    pub evaluation: Evaluation,
}

/// One interview attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    session_id: String,
    questions: Vec<String>,
    setup: InterviewSetup,
    #[serde(rename = "current_question")]
    current_index: usize,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    answers: BTreeMap<usize, AnswerRecord>,
}

impl Session {
    /// Create a fresh session positioned at the first question.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` if the id is empty, there are no questions, or
    /// a question is blank.
    pub fn new(
        session_id: impl Into<String>,
        setup: InterviewSetup,
        questions: Vec<String>,
    ) -> Result<Self, SnapshotError> {
        let session = Self {
            session_id: session_id.into(),
            questions,
            setup,
            current_index: 0,
            answers: BTreeMap::new(),
        };
        session.check_invariants()?;
        Ok(session)
    }

    /// Parse a persisted snapshot, rejecting anything that breaks the invariants.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` for malformed JSON or an inconsistent session.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let session: Session = serde_json::from_str(json)?;
        session.check_invariants()?;
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Check every structural invariant of a session.
    ///
    /// `answers` must cover every index below `current_index`, may cover
    /// `current_index` itself, and must not cover anything beyond it.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), SnapshotError> {
        if self.session_id.trim().is_empty() {
            return Err(SnapshotError::EmptySessionId);
        }
        if self.questions.is_empty() {
            return Err(SnapshotError::NoQuestions);
        }
        if let Some(blank) = self.questions.iter().position(|q| q.trim().is_empty()) {
            return Err(SnapshotError::BlankQuestion(blank));
        }
        self.setup.validate()?;

        let len = self.questions.len();
        if self.current_index > len {
            return Err(SnapshotError::IndexOutOfRange {
                index: self.current_index,
                len,
            });
        }
        if let Some(missing) = (0..self.current_index).find(|i| !self.answers.contains_key(i)) {
            return Err(SnapshotError::MissingAnswer(missing));
        }
        if let Some(&ahead) = self.answers.keys().find(|&&i| i > self.current_index || i >= len) {
            return Err(SnapshotError::AnswerAhead(ahead));
        }
        for (&index, record) in &self.answers {
            record
                .evaluation
                .check_integrity()
                .map_err(|violation| SnapshotError::InvalidEvaluation { index, violation })?;
        }
        Ok(())
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn setup(&self) -> &InterviewSetup {
        &self.setup
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed session; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn question(&self, index: usize) -> Option<&str> {
        self.questions.get(index).map(String::as_str)
    }

    /// Question at the cursor, or `None` once every question is advanced past
    pub fn current_question(&self) -> Option<&str> {
        self.question(self.current_index)
    }

    pub fn answer(&self, index: usize) -> Option<&AnswerRecord> {
        self.answers.get(&index)
    }

    pub fn answers(&self) -> &BTreeMap<usize, AnswerRecord> {
        &self.answers
    }

    /// Whether the current question already has an evaluation on record
    pub fn has_current_answer(&self) -> bool {
        self.answers.contains_key(&self.current_index)
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    pub fn is_finished(&self) -> bool {
        self.current_index == self.questions.len()
    }

    /// Record the answer for the current question. Callers check that no answer
    /// exists yet.
    pub(crate) fn record_current(&mut self, record: AnswerRecord) {
        self.answers.insert(self.current_index, record);
    }

    /// Move the cursor forward by one. Callers check that the current question
    /// has an answer.
    pub(crate) fn step_forward(&mut self) {
        self.current_index = (self.current_index + 1).min(self.questions.len());
    }
}
