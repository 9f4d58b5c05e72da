//! Common state machine error types
//!
//! Shared by the contract lifecycle and document-file state machines.

use crate::error::Error;
use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot transition from {from} to {to} via {event}")]
    InvalidTransition {
        from: String,
        to: String,
        event: String,
    },

    #[error("Guard condition failed: {0}")]
    GuardFailed(String),

    #[error("{0}")]
    AlreadyInState(String),
}

impl From<StateError> for Error {
    fn from(err: StateError) -> Self {
        Error::Validation(err.to_string())
    }
}
