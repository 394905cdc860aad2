//! Runtime for driving an interview session
//!
//! Owns the current state and executes the effects that `transition`
//! produces against the scoring client and the session store.

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::InterviewRuntime;

use crate::scoring::{HttpScoringClient, LoggingScoringClient};
use crate::store::SqliteSessionStore;

/// Type alias for production runtime with concrete implementations
pub type ProductionRuntime =
    InterviewRuntime<LoggingScoringClient<HttpScoringClient>, SqliteSessionStore>;
