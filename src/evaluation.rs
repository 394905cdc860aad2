//! Scored feedback for a single answer

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Upper bound for a single dimension score
pub const DIMENSION_MAX: u32 = 20;

/// Upper bound for the total score (five dimensions)
pub const TOTAL_MAX: u32 = 100;

/// The five fixed scoring dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    TechnicalCorrectness,
    Clarity,
    Depth,
    TradeoffAwareness,
    Communication,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::TechnicalCorrectness,
        Dimension::Clarity,
        Dimension::Depth,
        Dimension::TradeoffAwareness,
        Dimension::Communication,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::TechnicalCorrectness => "Technical Correctness",
            Dimension::Clarity => "Clarity of Explanation",
            Dimension::Depth => "Depth of Reasoning",
            Dimension::TradeoffAwareness => "Tradeoff Awareness",
            Dimension::Communication => "Communication Quality",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-dimension scores, each expected in `0..=DIMENSION_MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub technical_correctness: u32,
    pub clarity: u32,
    pub depth: u32,
    pub tradeoff_awareness: u32,
    pub communication: u32,
}

impl Scores {
    pub fn get(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::TechnicalCorrectness => self.technical_correctness,
            Dimension::Clarity => self.clarity,
            Dimension::Depth => self.depth,
            Dimension::TradeoffAwareness => self.tradeoff_awareness,
            Dimension::Communication => self.communication,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, u32)> + '_ {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    pub fn sum(&self) -> u32 {
        self.iter().map(|(_, score)| score).sum()
    }
}

/// Evaluation returned by the scoring service for one answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub scores: Scores,
    pub total_score: u32,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub suggested_answer: String,
}

/// Ways an evaluation can break the scoring contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityViolation {
    #[error("{dimension} score {score} exceeds the per-dimension maximum of 20")]
    DimensionOutOfRange { dimension: Dimension, score: u32 },
    #[error("total score {0} exceeds the maximum of 100")]
    TotalOutOfRange(u32),
    #[error("total score {total} does not match dimension sum {sum}")]
    SumMismatch { total: u32, sum: u32 },
}

impl Evaluation {
    /// Verify dimension ranges and `total_score == sum(scores)`.
    ///
    /// # Errors
    ///
    /// Returns the first `IntegrityViolation` found.
    pub fn check_integrity(&self) -> Result<(), IntegrityViolation> {
        if let Some((dimension, score)) = self.scores.iter().find(|(_, s)| *s > DIMENSION_MAX) {
            return Err(IntegrityViolation::DimensionOutOfRange { dimension, score });
        }
        if self.total_score > TOTAL_MAX {
            return Err(IntegrityViolation::TotalOutOfRange(self.total_score));
        }
        let sum = self.scores.sum();
        if sum != self.total_score {
            return Err(IntegrityViolation::SumMismatch {
                total: self.total_score,
                sum,
            });
        }
        Ok(())
    }
}
