//! Pure state transition function
//!
//! Given the same state and event this always produces the same result, with
//! no I/O. The runtime executes the returned effects.

use super::effect::EvaluationRequest;
use super::{Effect, Event, InterviewState};
use crate::session::AnswerRecord;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: InterviewState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: InterviewState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Please provide an answer before submitting")]
    EmptyAnswer,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

fn invalid(message: impl Into<String>) -> TransitionError {
    TransitionError::InvalidTransition(message.into())
}

/// Pure transition function
pub fn transition(
    state: &InterviewState,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Valid from any state
        // ============================================================

        // A fresh session replaces whatever was there before
        (_, Event::SessionCreated { session }) => {
            if session.current_index() != 0 || !session.answers().is_empty() {
                return Err(invalid("new session must start at the first question"));
            }
            Ok(TransitionResult::new(InterviewState::Active { session })
                .with_effect(Effect::PersistSession))
        }

        // Resume only reads; the slot already holds this snapshot
        (_, Event::Resumed { snapshot }) => {
            Ok(TransitionResult::new(InterviewState::from_snapshot(snapshot)))
        }

        (_, Event::Abandon) => {
            Ok(TransitionResult::new(InterviewState::Uninitialized)
                .with_effect(Effect::ClearSession))
        }

        // ============================================================
        // Active
        // ============================================================

        // Active + AnswerSubmitted -> request evaluation, state unchanged
        (InterviewState::Active { session }, Event::AnswerSubmitted { answer }) => {
            let index = session.current_index();
            if session.has_current_answer() {
                return Err(invalid(format!("question {index} has already been answered")));
            }
            if answer.trim().is_empty() {
                return Err(TransitionError::EmptyAnswer);
            }
            let question = session
                .current_question()
                .ok_or_else(|| invalid(format!("no question at index {index}")))?;

            Ok(TransitionResult::new(state.clone()).with_effect(Effect::RequestEvaluation(
                EvaluationRequest {
                    session_id: session.session_id().to_string(),
                    index,
                    question: question.to_string(),
                    answer,
                },
            )))
        }

        // Active + EvaluationReceived -> record it, index not advanced
        (
            InterviewState::Active { session },
            Event::EvaluationReceived {
                index,
                answer,
                evaluation,
            },
        ) => {
            if index != session.current_index() {
                return Err(invalid(format!(
                    "evaluation for question {index} arrived while on question {}",
                    session.current_index()
                )));
            }
            if session.has_current_answer() {
                return Err(invalid(format!("question {index} has already been answered")));
            }

            let mut session = session.clone();
            session.record_current(AnswerRecord { answer, evaluation });
            Ok(TransitionResult::new(InterviewState::Active { session })
                .with_effect(Effect::PersistSession))
        }

        // Active + Advance -> next question, or Completed after the last one
        (InterviewState::Active { session }, Event::Advance) => {
            if !session.has_current_answer() {
                return Err(invalid(format!(
                    "cannot advance past question {} before it is answered",
                    session.current_index()
                )));
            }

            let mut session = session.clone();
            session.step_forward();
            let new_state = if session.is_finished() {
                InterviewState::Completed { session }
            } else {
                InterviewState::Active { session }
            };
            Ok(TransitionResult::new(new_state).with_effect(Effect::PersistSession))
        }

        // ============================================================
        // Rejections
        // ============================================================
        (
            InterviewState::Uninitialized,
            Event::AnswerSubmitted { .. } | Event::EvaluationReceived { .. } | Event::Advance,
        ) => Err(invalid("no interview in progress")),

        (
            InterviewState::Completed { .. },
            Event::AnswerSubmitted { .. } | Event::EvaluationReceived { .. } | Event::Advance,
        ) => Err(invalid("interview is already completed")),
    }
}
