//! Interview state types

use crate::evaluation::Evaluation;
use crate::session::Session;
use std::fmt;

/// Interview lifecycle state. The active session lives inside the state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InterviewState {
    /// No session; the caller should collect a setup and start one
    #[default]
    Uninitialized,

    /// Working through questions; the index is `session.current_index()`
    Active { session: Session },

    /// Every question has been advanced past
    Completed { session: Session },
}

impl InterviewState {
    /// Normalize a loaded snapshot into a state.
    ///
    /// Absent → `Uninitialized`; cursor within the questions → `Active`;
    /// cursor at the end → `Completed`.
    pub fn from_snapshot(snapshot: Option<Session>) -> Self {
        match snapshot {
            None => InterviewState::Uninitialized,
            Some(session) if session.is_finished() => InterviewState::Completed { session },
            Some(session) => InterviewState::Active { session },
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            InterviewState::Uninitialized => None,
            InterviewState::Active { session } | InterviewState::Completed { session } => {
                Some(session)
            }
        }
    }

    /// Index of the question in play, only while `Active`
    pub fn active_index(&self) -> Option<usize> {
        match self {
            InterviewState::Active { session } => Some(session.current_index()),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, InterviewState::Completed { .. })
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            InterviewState::Uninitialized => "uninitialized",
            InterviewState::Active { .. } => "active",
            InterviewState::Completed { .. } => "completed",
        }
    }

    /// What the caller should present for this state.
    ///
    /// An evaluation already on record for the current question means
    /// feedback is shown rather than the answer form, including after resume.
    pub fn view(&self) -> View<'_> {
        match self {
            InterviewState::Uninitialized => View::NotStarted,
            InterviewState::Completed { session } => View::Finished { session },
            InterviewState::Active { session } => {
                let index = session.current_index();
                let progress = Progress {
                    current: index + 1,
                    total: session.len(),
                };
                let question = session.current_question().unwrap_or_default();
                match session.answer(index) {
                    None => View::AwaitingAnswer { progress, question },
                    Some(record) => View::ReviewingFeedback {
                        progress,
                        question,
                        answer: &record.answer,
                        evaluation: &record.evaluation,
                        is_last: session.is_last_question(),
                    },
                }
            }
        }
    }
}

/// Position within the interview, 1-based for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Question {} of {}", self.current, self.total)
    }
}

/// Presentation-neutral description of the current step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<'a> {
    NotStarted,
    AwaitingAnswer {
        progress: Progress,
        question: &'a str,
    },
    ReviewingFeedback {
        progress: Progress,
        question: &'a str,
        answer: &'a str,
        evaluation: &'a Evaluation,
        /// Advancing from here completes the interview
        is_last: bool,
    },
    Finished {
        session: &'a Session,
    },
}
