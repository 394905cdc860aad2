//! Scoring service abstraction
//!
//! The scoring service generates question sets and evaluates answers. It is
//! reached over a request/response boundary and holds no client-side state.

mod error;
mod http;
mod types;

pub use error::{ScoringError, ScoringErrorKind};
pub use http::HttpScoringClient;
pub use types::{Debrief, QuestionSet};

use crate::evaluation::Evaluation;
use crate::setup::InterviewSetup;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Common interface for scoring backends
#[async_trait]
pub trait ScoringClient: Send + Sync {
    /// Request a generated question set for `setup`
    async fn create_session(&self, setup: &InterviewSetup) -> Result<QuestionSet, ScoringError>;

    /// Submit one answer for scoring
    async fn submit_answer(
        &self,
        session_id: &str,
        question_index: usize,
        question: &str,
        answer: &str,
    ) -> Result<Evaluation, ScoringError>;

    /// Request the narrative end-of-interview report
    async fn request_debrief(&self, session_id: &str) -> Result<Debrief, ScoringError>;
}

#[async_trait]
impl<T: ScoringClient + ?Sized> ScoringClient for Arc<T> {
    async fn create_session(&self, setup: &InterviewSetup) -> Result<QuestionSet, ScoringError> {
        (**self).create_session(setup).await
    }

    async fn submit_answer(
        &self,
        session_id: &str,
        question_index: usize,
        question: &str,
        answer: &str,
    ) -> Result<Evaluation, ScoringError> {
        (**self)
            .submit_answer(session_id, question_index, question, answer)
            .await
    }

    async fn request_debrief(&self, session_id: &str) -> Result<Debrief, ScoringError> {
        (**self).request_debrief(session_id).await
    }
}

/// Reject a question set that cannot seed a session.
///
/// # Errors
///
/// Returns a `MalformedResponse` error for an empty id, no questions, or a
/// blank question.
pub fn verify_question_set(set: &QuestionSet) -> Result<(), ScoringError> {
    if set.session_id.trim().is_empty() {
        return Err(ScoringError::malformed("Response has an empty session_id"));
    }
    if set.questions.is_empty() {
        return Err(ScoringError::malformed("Response contains no questions"));
    }
    if let Some(blank) = set.questions.iter().position(|q| q.trim().is_empty()) {
        return Err(ScoringError::malformed(format!("Question {blank} is blank")));
    }
    Ok(())
}

/// Reject an evaluation whose total does not match its dimension scores.
///
/// # Errors
///
/// Returns an `EvaluationIntegrity` error describing the violation.
pub fn verify_evaluation(evaluation: &Evaluation) -> Result<(), ScoringError> {
    evaluation
        .check_integrity()
        .map_err(|violation| ScoringError::integrity(&violation))
}

/// Local guard for answer text; nothing is sent for a blank answer.
pub(crate) fn check_answer(answer: &str) -> Result<(), ScoringError> {
    if answer.trim().is_empty() {
        return Err(ScoringError::invalid_input("Answer must not be empty"));
    }
    Ok(())
}

/// Logging wrapper for scoring clients
pub struct LoggingScoringClient<C> {
    inner: C,
}

impl<C: ScoringClient> LoggingScoringClient<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    fn log_failure(operation: &'static str, duration_ms: u128, e: &ScoringError) {
        if e.kind.is_contract_violation() {
            tracing::error!(
                operation,
                duration_ms = %duration_ms,
                error = %e.message,
                kind = ?e.kind,
                contract_violation = true,
                "Scoring service returned an invalid response"
            );
        } else {
            tracing::error!(
                operation,
                duration_ms = %duration_ms,
                error = %e.message,
                kind = ?e.kind,
                status = ?e.status,
                retryable = e.kind.is_retryable(),
                "Scoring request failed"
            );
        }
    }
}

#[async_trait]
impl<C: ScoringClient> ScoringClient for LoggingScoringClient<C> {
    async fn create_session(&self, setup: &InterviewSetup) -> Result<QuestionSet, ScoringError> {
        let start = Instant::now();
        let result = self.inner.create_session(setup).await;
        let duration_ms = start.elapsed().as_millis();

        match &result {
            Ok(set) => tracing::info!(
                session_id = %set.session_id,
                role = %setup.role,
                seniority = %setup.seniority,
                questions = set.questions.len(),
                duration_ms = %duration_ms,
                "Interview session created"
            ),
            Err(e) => Self::log_failure("create_session", duration_ms, e),
        }
        result
    }

    async fn submit_answer(
        &self,
        session_id: &str,
        question_index: usize,
        question: &str,
        answer: &str,
    ) -> Result<Evaluation, ScoringError> {
        let start = Instant::now();
        let result = self
            .inner
            .submit_answer(session_id, question_index, question, answer)
            .await;
        let duration_ms = start.elapsed().as_millis();

        match &result {
            Ok(evaluation) => tracing::info!(
                session_id,
                question_index,
                total_score = evaluation.total_score,
                duration_ms = %duration_ms,
                "Answer scored"
            ),
            Err(e) => Self::log_failure("submit_answer", duration_ms, e),
        }
        result
    }

    async fn request_debrief(&self, session_id: &str) -> Result<Debrief, ScoringError> {
        let start = Instant::now();
        let result = self.inner.request_debrief(session_id).await;
        let duration_ms = start.elapsed().as_millis();

        match &result {
            Ok(debrief) => tracing::info!(
                session_id,
                readiness = %debrief.readiness_level,
                duration_ms = %duration_ms,
                "Debrief received"
            ),
            Err(e) => Self::log_failure("request_debrief", duration_ms, e),
        }
        result
    }
}
