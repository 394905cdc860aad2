//! Interview session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;


pub use effect::{Effect, EvaluationRequest};
pub use event::Event;
pub use state::{InterviewState, Progress, View};
pub use transition::{transition, TransitionError, TransitionResult};
