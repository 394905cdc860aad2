//! Top-level error type for interview operations

use crate::report::ReportError;
use crate::scoring::{ScoringError, ScoringErrorKind};
use crate::setup::SetupError;
use crate::state_machine::TransitionError;
use crate::store::StoreError;
use std::fmt;
use thiserror::Error;

/// Remote call that produced a scoring error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCall {
    CreateSession,
    SubmitAnswer,
    Debrief,
}

impl fmt::Display for RemoteCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RemoteCall::CreateSession => "create_session",
            RemoteCall::SubmitAnswer => "submit_answer",
            RemoteCall::Debrief => "request_debrief",
        })
    }
}

#[derive(Debug, Error)]
pub enum InterviewError {
    /// Local guard failed; nothing was sent to the scoring service
    #[error("{0}")]
    Validation(String),
    #[error("{call} failed: {source}")]
    Scoring {
        call: RemoteCall,
        #[source]
        source: ScoringError,
    },
    /// Caller broke the state machine contract
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("Session storage failed: {0}")]
    Storage(#[from] StoreError),
}

impl From<TransitionError> for InterviewError {
    fn from(e: TransitionError) -> Self {
        match e {
            TransitionError::EmptyAnswer => InterviewError::Validation(e.to_string()),
            TransitionError::InvalidTransition(message) => {
                InterviewError::InvalidTransition(message)
            }
        }
    }
}

impl From<SetupError> for InterviewError {
    fn from(e: SetupError) -> Self {
        InterviewError::Validation(e.to_string())
    }
}

impl InterviewError {
    pub fn scoring(call: RemoteCall, source: ScoringError) -> Self {
        InterviewError::Scoring { call, source }
    }

    /// Kind of the underlying scoring error, if any
    pub fn scoring_kind(&self) -> Option<ScoringErrorKind> {
        match self {
            InterviewError::Scoring { source, .. } => Some(source.kind),
            _ => None,
        }
    }

    /// Whether repeating the same action may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            InterviewError::Scoring { source, .. } => source.kind.is_retryable(),
            InterviewError::Storage(_) => true,
            InterviewError::Validation(_)
            | InterviewError::InvalidTransition(_)
            | InterviewError::Report(_) => false,
        }
    }

    /// Message suitable for showing to the candidate
    pub fn user_message(&self) -> String {
        match self {
            InterviewError::Validation(message) => format!("{message}."),
            InterviewError::Scoring { source, .. }
                if source.kind == ScoringErrorKind::InvalidInput =>
            {
                "Please provide an answer before submitting.".to_string()
            }
            InterviewError::Scoring { call, .. } => match call {
                RemoteCall::CreateSession => "Failed to start interview. Please try again.",
                RemoteCall::SubmitAnswer => "Failed to submit answer. Please try again.",
                RemoteCall::Debrief => "Failed to load the final debrief. Please try again.",
            }
            .to_string(),
            InterviewError::Storage(_) => {
                "Failed to save your progress. Please try again.".to_string()
            }
            InterviewError::InvalidTransition(_) | InterviewError::Report(_) => {
                "Something went wrong with this interview session.".to_string()
            }
        }
    }
}
