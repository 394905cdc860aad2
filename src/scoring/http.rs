//! HTTP scoring client
//!
//! Speaks the JSON protocol of the interview backend:
//! `POST /start-interview`, `POST /submit-answer`, `POST /complete-interview`.

use super::types::{
    CompleteInterviewResponse, StartInterviewResponse, SubmitAnswerRequest, SubmitAnswerResponse,
};
use super::{check_answer, verify_evaluation, verify_question_set, ScoringClient, ScoringError};
use super::{Debrief, QuestionSet};
use crate::config::CoachConfig;
use crate::evaluation::Evaluation;
use crate::setup::InterviewSetup;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Scoring client backed by the interview HTTP API
pub struct HttpScoringClient {
    client: Client,
    base_url: String,
}

impl HttpScoringClient {
    /// Create a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `RemoteUnavailable` if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ScoringError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScoringError::unavailable(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// # Errors
    ///
    /// See [`HttpScoringClient::new`].
    pub fn from_config(config: &CoachConfig) -> Result<Self, ScoringError> {
        Self::new(&config.api_url, config.request_timeout)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send a request and parse a 2xx JSON body into `R`
    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R, ScoringError> {
        let response = request.send().await.map_err(classify_transport_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ScoringError::unavailable(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(ScoringError::rejected(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            ScoringError::malformed(format!("Failed to parse response: {e} - body: {body}"))
        })
    }
}

fn classify_transport_error(e: reqwest::Error) -> ScoringError {
    if e.is_timeout() {
        ScoringError::unavailable(format!("Request timeout: {e}"))
    } else if e.is_connect() {
        ScoringError::unavailable(format!("Connection failed: {e}"))
    } else {
        ScoringError::unavailable(format!("Request failed: {e}"))
    }
}

#[async_trait]
impl ScoringClient for HttpScoringClient {
    async fn create_session(&self, setup: &InterviewSetup) -> Result<QuestionSet, ScoringError> {
        let request = self.client.post(self.endpoint("start-interview")).json(setup);
        let response: StartInterviewResponse = self.send(request).await?;

        if let Some(total) = response.total_questions {
            if total != response.questions.len() {
                return Err(ScoringError::malformed(format!(
                    "total_questions is {total} but {} questions were returned",
                    response.questions.len()
                )));
            }
        }

        let set = QuestionSet {
            session_id: response.session_id,
            questions: response.questions,
        };
        verify_question_set(&set)?;
        Ok(set)
    }

    async fn submit_answer(
        &self,
        session_id: &str,
        question_index: usize,
        question: &str,
        answer: &str,
    ) -> Result<Evaluation, ScoringError> {
        check_answer(answer)?;

        let body = SubmitAnswerRequest {
            session_id,
            question_number: question_index,
            question,
            answer,
        };
        let request = self.client.post(self.endpoint("submit-answer")).json(&body);
        let response: SubmitAnswerResponse = self.send(request).await?;

        if let Some(echoed) = response.question_number {
            if echoed != question_index {
                return Err(ScoringError::malformed(format!(
                    "Evaluation is for question {echoed}, expected {question_index}"
                )));
            }
        }

        verify_evaluation(&response.evaluation)?;
        Ok(response.evaluation)
    }

    async fn request_debrief(&self, session_id: &str) -> Result<Debrief, ScoringError> {
        let request = self
            .client
            .post(self.endpoint("complete-interview"))
            .query(&[("session_id", session_id)]);
        let response: CompleteInterviewResponse = self.send(request).await?;
        Ok(response.final_report)
    }
}
