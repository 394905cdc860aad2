//! Interview Coach - mock interview session engine
//!
//! Drives a candidate through a generated question set, scores each answer
//! against a remote scoring service, and persists progress so an interrupted
//! interview can be resumed.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod evaluation;
pub mod report;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod setup;
pub mod state_machine;
pub mod store;

pub use config::CoachConfig;
pub use error::{InterviewError, RemoteCall};
pub use evaluation::{Dimension, Evaluation, Scores};
pub use report::{build_report, Report, ReportEntry, Summary};
pub use runtime::{InterviewRuntime, ProductionRuntime};
pub use scoring::{HttpScoringClient, LoggingScoringClient, ScoringClient};
pub use session::Session;
pub use setup::{InterviewSetup, Role, Seniority};
pub use state_machine::{InterviewState, Progress, View};
pub use store::{MemorySessionStore, SessionStore, SqliteSessionStore};
