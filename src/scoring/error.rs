//! Scoring client error types

use crate::evaluation::IntegrityViolation;
use thiserror::Error;

/// Scoring error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ScoringError {
    pub kind: ScoringErrorKind,
    pub message: String,
    /// HTTP status for `Rejected` errors
    pub status: Option<u16>,
}

impl ScoringError {
    pub fn new(kind: ScoringErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ScoringErrorKind::RemoteUnavailable, message)
    }

    pub fn rejected(status: u16, body: &str) -> Self {
        Self {
            kind: ScoringErrorKind::RemoteRejected,
            message: format!("HTTP {status}: {body}"),
            status: Some(status),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ScoringErrorKind::MalformedResponse, message)
    }

    pub fn integrity(violation: &IntegrityViolation) -> Self {
        Self::new(
            ScoringErrorKind::EvaluationIntegrity,
            format!("Evaluation violates scoring contract: {violation}"),
        )
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ScoringErrorKind::InvalidInput, message)
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringErrorKind {
    /// Network failure or timeout
    RemoteUnavailable,
    /// Non-success response status
    RemoteRejected,
    /// Payload could not be parsed into the expected shape
    MalformedResponse,
    /// Transport succeeded but the evaluation breaks the score invariant
    EvaluationIntegrity,
    /// Request refused locally before anything was sent
    InvalidInput,
}

impl ScoringErrorKind {
    /// Remote failures can be retried with the same request
    pub fn is_retryable(self) -> bool {
        !matches!(self, Self::InvalidInput)
    }

    /// Backend broke its contract, as opposed to a transport fault
    pub fn is_contract_violation(self) -> bool {
        matches!(self, Self::MalformedResponse | Self::EvaluationIntegrity)
    }
}
