//! Effects produced by state transitions

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the new state's session to the slot
    PersistSession,

    /// Empty the slot
    ClearSession,

    /// Send the answer to the scoring service
    RequestEvaluation(EvaluationRequest),
}

/// Everything the scoring service needs to evaluate one answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRequest {
    pub session_id: String,
    pub index: usize,
    pub question: String,
    pub answer: String,
}
