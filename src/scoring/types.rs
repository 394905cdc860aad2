//! Request and response types for the scoring service

use crate::evaluation::Evaluation;
use serde::{Deserialize, Serialize};

/// Question set returned when a session is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    pub session_id: String,
    pub questions: Vec<String>,
}

/// Narrative report generated by the service once an interview is complete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debrief {
    pub overall_performance: String,
    #[serde(default)]
    pub key_strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
    #[serde(default)]
    pub actionable_next_steps: Vec<String>,
    pub readiness_level: String,
    #[serde(default)]
    pub recommended_resources: Vec<String>,
}

// Wire types

#[derive(Debug, Serialize)]
pub(crate) struct SubmitAnswerRequest<'a> {
    pub session_id: &'a str,
    pub question_number: usize,
    pub question: &'a str,
    pub answer: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartInterviewResponse {
    pub session_id: String,
    pub questions: Vec<String>,
    #[serde(default)]
    pub total_questions: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitAnswerResponse {
    pub evaluation: Evaluation,
    #[serde(default)]
    pub question_number: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompleteInterviewResponse {
    pub final_report: Debrief,
}
