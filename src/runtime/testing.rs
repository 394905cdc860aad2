//! Mock implementations for testing
//!
//! These mocks enable runtime testing without network or disk I/O.

use super::InterviewRuntime;
use crate::evaluation::Evaluation;
use crate::scoring::{Debrief, QuestionSet, ScoringClient, ScoringError};
use crate::session::Session;
use crate::setup::InterviewSetup;
use crate::store::{MemorySessionStore, SessionStore, StoreError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Scoring Client
// ============================================================================

/// One `submit_answer` call as the service saw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSubmission {
    pub session_id: String,
    pub question_index: usize,
    pub question: String,
    pub answer: String,
}

/// Mock scoring client that returns queued responses
#[derive(Default)]
pub struct MockScoringClient {
    question_sets: Mutex<VecDeque<Result<QuestionSet, ScoringError>>>,
    evaluations: Mutex<VecDeque<Result<Evaluation, ScoringError>>>,
    debriefs: Mutex<VecDeque<Result<Debrief, ScoringError>>>,
    /// Record of all setups sent to `create_session`
    pub setups: Mutex<Vec<InterviewSetup>>,
    /// Record of all answers sent for scoring
    pub submissions: Mutex<Vec<RecordedSubmission>>,
    /// Record of all session ids sent to `request_debrief`
    pub debrief_requests: Mutex<Vec<String>>,
}

impl MockScoringClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_question_set(&self, session_id: &str, questions: &[&str]) {
        self.question_sets.lock().unwrap().push_back(Ok(QuestionSet {
            session_id: session_id.to_string(),
            questions: questions.iter().map(ToString::to_string).collect(),
        }));
    }

    pub fn queue_create_error(&self, error: ScoringError) {
        self.question_sets.lock().unwrap().push_back(Err(error));
    }

    pub fn queue_evaluation(&self, evaluation: Evaluation) {
        self.evaluations.lock().unwrap().push_back(Ok(evaluation));
    }

    pub fn queue_submit_error(&self, error: ScoringError) {
        self.evaluations.lock().unwrap().push_back(Err(error));
    }

    pub fn queue_debrief(&self, debrief: Debrief) {
        self.debriefs.lock().unwrap().push_back(Ok(debrief));
    }

    /// Total number of calls that reached the service
    pub fn call_count(&self) -> usize {
        self.setups.lock().unwrap().len()
            + self.submissions.lock().unwrap().len()
            + self.debrief_requests.lock().unwrap().len()
    }

    pub fn recorded_submissions(&self) -> Vec<RecordedSubmission> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScoringClient for MockScoringClient {
    async fn create_session(&self, setup: &InterviewSetup) -> Result<QuestionSet, ScoringError> {
        self.setups.lock().unwrap().push(setup.clone());
        self.question_sets
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ScoringError::unavailable("No mock question set queued")))
    }

    async fn submit_answer(
        &self,
        session_id: &str,
        question_index: usize,
        question: &str,
        answer: &str,
    ) -> Result<Evaluation, ScoringError> {
        self.submissions.lock().unwrap().push(RecordedSubmission {
            session_id: session_id.to_string(),
            question_index,
            question: question.to_string(),
            answer: answer.to_string(),
        });
        self.evaluations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ScoringError::unavailable("No mock evaluation queued")))
    }

    async fn request_debrief(&self, session_id: &str) -> Result<Debrief, ScoringError> {
        self.debrief_requests
            .lock()
            .unwrap()
            .push(session_id.to_string());
        self.debriefs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ScoringError::unavailable("No mock debrief queued")))
    }
}

// ============================================================================
// Flaky Store
// ============================================================================

/// Memory store whose writes can be switched to fail
#[derive(Default)]
pub struct FlakyStore {
    inner: MemorySessionStore,
    failing: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn raw(&self) -> Option<String> {
        self.inner.raw()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Poisoned)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SessionStore for FlakyStore {
    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        self.check()?;
        self.inner.save(session).await
    }

    async fn load(&self) -> Option<Session> {
        self.inner.load().await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.check()?;
        self.inner.clear().await
    }
}

// ============================================================================
// Test Runtime
// ============================================================================

/// Runtime wired to shared mocks so tests can inspect them afterwards
pub struct TestRuntime<S: SessionStore> {
    pub runtime: InterviewRuntime<Arc<MockScoringClient>, Arc<S>>,
    pub client: Arc<MockScoringClient>,
    pub store: Arc<S>,
}

impl TestRuntime<MemorySessionStore> {
    pub fn new() -> Self {
        Self::with_store(MemorySessionStore::new())
    }
}

impl<S: SessionStore> TestRuntime<S> {
    pub fn with_store(store: S) -> Self {
        let client = Arc::new(MockScoringClient::new());
        let store = Arc::new(store);
        Self {
            runtime: InterviewRuntime::new(client.clone(), store.clone()),
            client,
            store,
        }
    }

    /// A second runtime over the same store, as after a process restart
    pub fn restarted(&self) -> InterviewRuntime<Arc<MockScoringClient>, Arc<S>> {
        InterviewRuntime::new(self.client.clone(), self.store.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InterviewError, RemoteCall};
    use crate::evaluation::tests::sample_evaluation;
    use crate::evaluation::Dimension;
    use crate::scoring::ScoringErrorKind;
    use crate::session::tests::backend_setup;
    use crate::state_machine::{InterviewState, Progress, View};

    fn sample_debrief() -> Debrief {
        Debrief {
            overall_performance: "Solid API fundamentals".to_string(),
            key_strengths: vec!["Clear structure".to_string()],
            areas_for_improvement: vec!["Quantify impact".to_string()],
            actionable_next_steps: vec!["Practice STAR".to_string()],
            readiness_level: "Almost Ready".to_string(),
            recommended_resources: vec![],
        }
    }

    async fn started(questions: &[&str]) -> TestRuntime<MemorySessionStore> {
        let mut rt = TestRuntime::new();
        rt.client.queue_question_set("s1", questions);
        rt.runtime.start(backend_setup()).await.unwrap();
        rt
    }

    #[tokio::test]
    async fn test_mock_scoring_client() {
        let client = MockScoringClient::new();
        client.queue_evaluation(sample_evaluation([1, 2, 3, 4, 5]));

        let eval = client.submit_answer("s1", 0, "Q", "A").await.unwrap();
        assert_eq!(eval.total_score, 15);
        assert!(client.submit_answer("s1", 0, "Q", "A").await.is_err());
        assert_eq!(client.recorded_submissions().len(), 2);
    }

    #[tokio::test]
    async fn test_full_single_question_interview() {
        let mut rt = TestRuntime::new();
        rt.client
            .queue_question_set("s1", &["Describe a REST API you designed."]);
        rt.client.queue_evaluation(sample_evaluation([15, 16, 14, 13, 17]));

        let state = rt.runtime.start(backend_setup()).await.unwrap();
        assert_eq!(state.active_index(), Some(0));
        assert_eq!(
            rt.runtime.view(),
            View::AwaitingAnswer {
                progress: Progress {
                    current: 1,
                    total: 1
                },
                question: "Describe a REST API you designed.",
            }
        );

        let eval = rt
            .runtime
            .submit_answer("I designed a paginated orders API")
            .await
            .unwrap();
        assert_eq!(eval.total_score, 75);
        assert!(matches!(
            rt.runtime.view(),
            View::ReviewingFeedback { is_last: true, .. }
        ));

        rt.runtime.advance().await.unwrap();
        assert!(rt.runtime.state().is_completed());

        let report = rt.runtime.report().unwrap();
        assert_eq!(report.session_id, "s1");
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.summary.total_score, 75);
        assert!((report.summary.dimension_mean(Dimension::Clarity) - 16.0).abs() < 1e-9);

        let sent = rt.client.recorded_submissions();
        assert_eq!(
            sent,
            vec![RecordedSubmission {
                session_id: "s1".to_string(),
                question_index: 0,
                question: "Describe a REST API you designed.".to_string(),
                answer: "I designed a paginated orders API".to_string(),
            }]
        );
        assert_eq!(rt.client.setups.lock().unwrap()[0], backend_setup());
    }

    #[tokio::test]
    async fn test_empty_answer_never_reaches_service() {
        let mut rt = started(&["Q1", "Q2"]).await;
        let calls_before = rt.client.call_count();

        for blank in ["", "   "] {
            let err = rt.runtime.submit_answer(blank).await.unwrap_err();
            assert!(matches!(err, InterviewError::Validation(_)));
            assert_eq!(
                err.user_message(),
                "Please provide an answer before submitting."
            );
        }

        assert_eq!(rt.client.call_count(), calls_before);
        assert_eq!(rt.runtime.state().active_index(), Some(0));
    }

    #[tokio::test]
    async fn test_integrity_violation_leaves_answers_unchanged() {
        let mut rt = started(&["Q1"]).await;
        let mut bad = sample_evaluation([15, 16, 14, 13, 17]);
        bad.total_score = 80;
        rt.client.queue_evaluation(bad);

        let before = rt.store.raw();
        let err = rt.runtime.submit_answer("my answer").await.unwrap_err();
        assert_eq!(
            err.scoring_kind(),
            Some(ScoringErrorKind::EvaluationIntegrity)
        );
        assert!(err.is_retryable());
        assert!(rt.runtime.state().session().unwrap().answers().is_empty());
        assert_eq!(rt.store.raw(), before);
    }

    #[tokio::test]
    async fn test_remote_failure_then_retry_succeeds() {
        let mut rt = started(&["Q1", "Q2"]).await;
        rt.client
            .queue_submit_error(ScoringError::unavailable("connection reset"));
        rt.client.queue_evaluation(sample_evaluation([10, 10, 10, 10, 10]));

        let err = rt.runtime.submit_answer("first try").await.unwrap_err();
        assert!(matches!(
            err,
            InterviewError::Scoring {
                call: RemoteCall::SubmitAnswer,
                ..
            }
        ));
        assert!(!rt.runtime.state().session().unwrap().has_current_answer());

        rt.runtime.submit_answer("first try").await.unwrap();
        assert!(rt.runtime.state().session().unwrap().has_current_answer());
        assert_eq!(rt.client.recorded_submissions().len(), 2);
    }

    #[tokio::test]
    async fn test_answer_recorded_exactly_once() {
        let mut rt = started(&["Q1", "Q2"]).await;
        rt.client.queue_evaluation(sample_evaluation([10, 10, 10, 10, 10]));
        rt.runtime.submit_answer("answer").await.unwrap();

        let err = rt.runtime.submit_answer("again").await.unwrap_err();
        assert!(matches!(err, InterviewError::InvalidTransition(_)));
        assert_eq!(rt.client.recorded_submissions().len(), 1);

        rt.runtime.advance().await.unwrap();
        assert!(rt.runtime.advance().await.is_err());
        assert_eq!(rt.runtime.state().active_index(), Some(1));
    }

    #[tokio::test]
    async fn test_start_failure_keeps_uninitialized() {
        let mut rt = TestRuntime::new();
        rt.client.queue_create_error(ScoringError::rejected(503, "busy"));

        let err = rt.runtime.start(backend_setup()).await.unwrap_err();
        assert_eq!(err.user_message(), "Failed to start interview. Please try again.");
        assert_eq!(rt.runtime.state(), &InterviewState::Uninitialized);
        assert!(rt.store.raw().is_none());
    }

    #[tokio::test]
    async fn test_start_rejects_empty_question_set() {
        let mut rt = TestRuntime::new();
        rt.client.queue_question_set("s1", &[]);

        let err = rt.runtime.start(backend_setup()).await.unwrap_err();
        assert_eq!(err.scoring_kind(), Some(ScoringErrorKind::MalformedResponse));
        assert_eq!(rt.runtime.state(), &InterviewState::Uninitialized);
    }

    #[tokio::test]
    async fn test_failed_restart_keeps_prior_session() {
        let mut rt = started(&["Q1", "Q2"]).await;
        rt.client
            .queue_create_error(ScoringError::unavailable("timeout"));

        assert!(rt.runtime.start(backend_setup()).await.is_err());
        assert_eq!(
            rt.runtime.state().session().map(Session::session_id),
            Some("s1")
        );

        rt.client.queue_question_set("s2", &["Fresh question"]);
        rt.runtime.start(backend_setup()).await.unwrap();
        let resumed = rt.restarted().resume().await.clone();
        assert_eq!(resumed.session().map(Session::session_id), Some("s2"));
    }

    #[tokio::test]
    async fn test_resume_restores_progress_and_feedback() {
        let mut rt = started(&["Q1", "Q2", "Q3"]).await;
        rt.client.queue_evaluation(sample_evaluation([12, 12, 12, 12, 12]));
        rt.client.queue_evaluation(sample_evaluation([8, 8, 8, 8, 8]));
        rt.runtime.submit_answer("one").await.unwrap();
        rt.runtime.advance().await.unwrap();
        rt.runtime.submit_answer("two").await.unwrap();

        let mut after_crash = rt.restarted();
        let first = after_crash.resume().await.clone();
        let second = after_crash.resume().await.clone();
        assert_eq!(first, second);
        assert_eq!(&first, rt.runtime.state());

        match after_crash.view() {
            View::ReviewingFeedback {
                progress,
                answer,
                evaluation,
                is_last,
                ..
            } => {
                assert_eq!(progress.to_string(), "Question 2 of 3");
                assert_eq!(answer, "two");
                assert_eq!(evaluation.total_score, 40);
                assert!(!is_last);
            }
            other => panic!("Expected feedback view, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resume_completed_session() {
        let mut rt = started(&["Q1"]).await;
        rt.client.queue_evaluation(sample_evaluation([3, 3, 3, 3, 3]));
        rt.runtime.submit_answer("done").await.unwrap();
        rt.runtime.advance().await.unwrap();

        let mut resumed = rt.restarted();
        assert!(resumed.resume().await.is_completed());
        assert_eq!(resumed.report().unwrap().summary.total_score, 15);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_resumes_uninitialized() {
        let mut rt = TestRuntime::new();
        rt.store.put_raw("{\"session_id\": \"s1\", \"questions\": [");
        assert_eq!(rt.runtime.resume().await, &InterviewState::Uninitialized);
        assert_eq!(rt.runtime.view(), View::NotStarted);
    }

    #[tokio::test]
    async fn test_abandon_clears_slot() {
        let mut rt = started(&["Q1", "Q2"]).await;
        assert!(rt.store.raw().is_some());

        rt.runtime.abandon().await.unwrap();
        assert_eq!(rt.runtime.state(), &InterviewState::Uninitialized);
        assert!(rt.store.raw().is_none());
        assert_eq!(rt.restarted().resume().await, &InterviewState::Uninitialized);
    }

    #[tokio::test]
    async fn test_report_and_debrief_require_completion() {
        let mut rt = started(&["Q1"]).await;
        assert!(matches!(
            rt.runtime.report(),
            Err(InterviewError::InvalidTransition(_))
        ));
        assert!(rt.runtime.debrief().await.is_err());
        assert!(rt.client.debrief_requests.lock().unwrap().is_empty());

        rt.client.queue_evaluation(sample_evaluation([9, 9, 9, 9, 9]));
        rt.client.queue_debrief(sample_debrief());
        rt.runtime.submit_answer("answer").await.unwrap();
        rt.runtime.advance().await.unwrap();

        let debrief = rt.runtime.debrief().await.unwrap();
        assert_eq!(debrief.readiness_level, "Almost Ready");
        assert_eq!(*rt.client.debrief_requests.lock().unwrap(), vec!["s1"]);
    }

    #[tokio::test]
    async fn test_store_failure_leaves_state_unchanged() {
        let mut rt = TestRuntime::with_store(FlakyStore::new());
        rt.client.queue_question_set("s1", &["Q1", "Q2"]);
        rt.runtime.start(backend_setup()).await.unwrap();

        rt.client.queue_evaluation(sample_evaluation([10, 10, 10, 10, 10]));
        rt.store.fail_writes(true);
        let err = rt.runtime.submit_answer("answer").await.unwrap_err();
        assert!(matches!(err, InterviewError::Storage(_)));
        assert!(!rt.runtime.state().session().unwrap().has_current_answer());

        assert!(rt.runtime.abandon().await.is_err());
        assert_eq!(rt.runtime.state().active_index(), Some(0));

        rt.store.fail_writes(false);
        rt.runtime.abandon().await.unwrap();
        assert!(rt.store.raw().is_none());
    }
}
