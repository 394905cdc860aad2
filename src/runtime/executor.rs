//! Interview runtime executor

use crate::error::{InterviewError, RemoteCall};
use crate::evaluation::Evaluation;
use crate::report::{build_report, Report};
use crate::scoring::{
    verify_evaluation, verify_question_set, Debrief, QuestionSet, ScoringClient, ScoringError,
};
use crate::session::Session;
use crate::setup::InterviewSetup;
use crate::state_machine::{
    transition, Effect, EvaluationRequest, Event, InterviewState, View,
};
use crate::store::SessionStore;

/// Generic interview runtime that can work with any scoring and storage implementations
pub struct InterviewRuntime<C, S>
where
    C: ScoringClient,
    S: SessionStore,
{
    state: InterviewState,
    client: C,
    store: S,
}

impl<C, S> InterviewRuntime<C, S>
where
    C: ScoringClient,
    S: SessionStore,
{
    pub fn new(client: C, store: S) -> Self {
        Self {
            state: InterviewState::Uninitialized,
            client,
            store,
        }
    }

    pub fn state(&self) -> &InterviewState {
        &self.state
    }

    pub fn view(&self) -> View<'_> {
        self.state.view()
    }

    /// Reload whatever the session slot holds. Never fails: an absent or
    /// unreadable snapshot resumes as `Uninitialized`.
    pub async fn resume(&mut self) -> &InterviewState {
        let snapshot = self.store.load().await;
        if let Err(e) = self.process(Event::Resumed { snapshot }).await {
            tracing::warn!(error = %e, "Resume failed, keeping current state");
        }
        &self.state
    }

    /// Create a new session for `setup`, replacing any prior one once the
    /// scoring service has produced the questions.
    pub async fn start(
        &mut self,
        setup: InterviewSetup,
    ) -> Result<&InterviewState, InterviewError> {
        setup.validate()?;

        let set = self
            .client
            .create_session(&setup)
            .await
            .and_then(|set| verify_question_set(&set).map(|()| set))
            .map_err(|e| InterviewError::scoring(RemoteCall::CreateSession, e))?;

        let QuestionSet {
            session_id,
            questions,
        } = set;
        let session = Session::new(session_id, setup, questions).map_err(|e| {
            InterviewError::scoring(
                RemoteCall::CreateSession,
                ScoringError::malformed(e.to_string()),
            )
        })?;

        self.process(Event::SessionCreated { session }).await?;
        Ok(&self.state)
    }

    /// Score `answer` for the current question and record the result.
    ///
    /// The index does not move; call [`advance`](Self::advance) once the
    /// feedback has been shown.
    pub async fn submit_answer(&mut self, answer: &str) -> Result<Evaluation, InterviewError> {
        let request = self
            .process(Event::AnswerSubmitted {
                answer: answer.to_string(),
            })
            .await?
            .ok_or_else(|| {
                InterviewError::InvalidTransition(
                    "answer submission produced no evaluation request".to_string(),
                )
            })?;

        let EvaluationRequest {
            session_id,
            index,
            question,
            answer,
        } = request;

        let evaluation = self
            .client
            .submit_answer(&session_id, index, &question, &answer)
            .await
            .and_then(|evaluation| verify_evaluation(&evaluation).map(|()| evaluation))
            .map_err(|e| InterviewError::scoring(RemoteCall::SubmitAnswer, e))?;

        self.process(Event::EvaluationReceived {
            index,
            answer,
            evaluation: evaluation.clone(),
        })
        .await?;
        Ok(evaluation)
    }

    /// Move past the current, already evaluated, question
    pub async fn advance(&mut self) -> Result<&InterviewState, InterviewError> {
        self.process(Event::Advance).await?;
        Ok(&self.state)
    }

    /// Drop the session and empty the slot
    pub async fn abandon(&mut self) -> Result<(), InterviewError> {
        self.process(Event::Abandon).await?;
        Ok(())
    }

    /// Build the final report for a completed interview
    pub fn report(&self) -> Result<Report, InterviewError> {
        Ok(build_report(self.completed_session()?)?)
    }

    /// Ask the scoring service for its narrative end-of-interview review
    pub async fn debrief(&self) -> Result<Debrief, InterviewError> {
        let session_id = self.completed_session()?.session_id();
        self.client
            .request_debrief(session_id)
            .await
            .map_err(|e| InterviewError::scoring(RemoteCall::Debrief, e))
    }

    fn completed_session(&self) -> Result<&Session, InterviewError> {
        match &self.state {
            InterviewState::Completed { session } => Ok(session),
            other => Err(InterviewError::InvalidTransition(format!(
                "interview is {}, not completed",
                other.name()
            ))),
        }
    }

    /// Run one event through the transition function and execute its effects.
    ///
    /// Storage effects run against the new state before it is committed, so a
    /// failed save leaves the runtime where it was.
    async fn process(&mut self, event: Event) -> Result<Option<EvaluationRequest>, InterviewError> {
        let result = transition(&self.state, event)?;
        let mut evaluation_request = None;

        for effect in result.effects {
            match effect {
                Effect::PersistSession => {
                    if let Some(session) = result.new_state.session() {
                        self.store.save(session).await?;
                    }
                }
                Effect::ClearSession => self.store.clear().await?,
                Effect::RequestEvaluation(request) => {
                    tracing::debug!(
                        session_id = %request.session_id,
                        index = request.index,
                        "Requesting evaluation"
                    );
                    evaluation_request = Some(request);
                }
            }
        }

        let old_state = std::mem::replace(&mut self.state, result.new_state);
        if old_state != self.state {
            tracing::info!(
                from = old_state.name(),
                to = self.state.name(),
                session_id = self.state.session().map(Session::session_id),
                index = self.state.session().map(Session::current_index),
                answered = self.state.session().map(|s| s.answers().len()),
                "Interview state changed"
            );
        }

        Ok(evaluation_request)
    }
}
