//! Final interview report
//!
//! Built locally from a finished session. Pure: no I/O, no mutation.

use crate::evaluation::{Dimension, Evaluation};
use crate::session::Session;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("Interview is incomplete: no answer for question(s) {missing:?}")]
    IncompleteSession { missing: Vec<usize> },
}

/// One answered question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub index: usize,
    pub question: String,
    pub answer: String,
    pub evaluation: Evaluation,
}

/// Aggregate scores across every entry
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Mean total score, rounded half up to the nearest integer
    pub total_score: u32,
    /// Mean score per dimension
    pub dimension_means: BTreeMap<Dimension, f64>,
}

impl Summary {
    pub fn dimension_mean(&self, dimension: Dimension) -> f64 {
        self.dimension_means.get(&dimension).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub session_id: String,
    pub entries: Vec<ReportEntry>,
    pub summary: Summary,
}

/// Build the report for a session whose answers cover every question.
///
/// # Errors
///
/// Returns `ReportError::IncompleteSession` listing unanswered indices.
pub fn build_report(session: &Session) -> Result<Report, ReportError> {
    let missing: Vec<usize> = (0..session.len())
        .filter(|i| session.answer(*i).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(ReportError::IncompleteSession { missing });
    }

    let entries: Vec<ReportEntry> = session
        .questions()
        .iter()
        .enumerate()
        .filter_map(|(index, question)| {
            session.answer(index).map(|record| ReportEntry {
                index,
                question: question.clone(),
                answer: record.answer.clone(),
                evaluation: record.evaluation.clone(),
            })
        })
        .collect();

    Ok(Report {
        session_id: session.session_id().to_string(),
        summary: summarize(&entries),
        entries,
    })
}

fn summarize(entries: &[ReportEntry]) -> Summary {
    // Sessions always have at least one question, so count is never zero here
    let count = u32::try_from(entries.len()).unwrap_or(u32::MAX).max(1);

    let total: u32 = entries.iter().map(|e| e.evaluation.total_score).sum();
    let total_score = (2 * total + count) / (2 * count);

    let dimension_means = Dimension::ALL
        .into_iter()
        .map(|dimension| {
            let sum: u32 = entries
                .iter()
                .map(|e| e.evaluation.scores.get(dimension))
                .sum();
            (dimension, f64::from(sum) / f64::from(count))
        })
        .collect();

    Summary {
        total_score,
        dimension_means,
    }
}
