//! State machines for HR Docs entities
//!
//! Each state machine defines:
//! - Valid states
//! - Events that trigger transitions
//! - Guard conditions for transitions

pub use hrdocs_common::StateError;

use crate::entities::{ContractEventType, ContractStatus, DocumentStatus};

// ============================================================================
// Contract State Machine
// ============================================================================

/// HR actions that move an employee's contract between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractAction {
    Fire,
    Rehire,
}

impl ContractAction {
    /// Contract event recorded when this action succeeds
    pub fn event_type(&self) -> ContractEventType {
        match self {
            Self::Fire => ContractEventType::Fired,
            Self::Rehire => ContractEventType::Rehired,
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Rehire => "rehire",
        }
    }
}

impl std::fmt::Display for ContractAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verb())
    }
}

/// Guard context for contract transitions
#[derive(Debug, Clone)]
pub struct ContractGuardContext {
    /// Whether the acting employee is the target employee
    pub is_self_action: bool,
}

/// Contract state machine: ACTIVE ⇄ INACTIVE
pub struct ContractStateMachine;

impl ContractStateMachine {
    /// Attempt a state transition with guard conditions
    ///
    /// Self-targeting is checked before the current state.
    pub fn transition(
        current: ContractStatus,
        action: ContractAction,
        context: &ContractGuardContext,
    ) -> Result<ContractStatus, StateError> {
        if context.is_self_action {
            return Err(StateError::GuardFailed(format!(
                "You cannot {} yourself",
                action.verb()
            )));
        }

        let next = match (current, action) {
            (ContractStatus::Active, ContractAction::Fire) => ContractStatus::Inactive,
            (ContractStatus::Inactive, ContractAction::Rehire) => ContractStatus::Active,
            (status, _) => {
                return Err(StateError::AlreadyInState(format!(
                    "Employee is already {}",
                    status
                )));
            }
        };

        Ok(next)
    }
}

// ============================================================================
// Document File State Machine
// ============================================================================

/// Events on a document's attached file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFileEvent {
    /// A file is sent for the document
    Send,
    /// The document's file is removed
    Delete,
}

impl std::fmt::Display for DocumentFileEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Send => write!(f, "send"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Guard context for document file transitions
#[derive(Debug, Clone)]
pub struct DocumentFileGuardContext {
    /// Whether the document currently has a file URL
    pub has_file: bool,
}

/// Document file state machine: MISSING ⇄ AVAILABLE, guarded on the file URL
pub struct DocumentFileStateMachine;

impl DocumentFileStateMachine {
    pub fn transition(
        current: DocumentStatus,
        event: DocumentFileEvent,
        context: &DocumentFileGuardContext,
    ) -> Result<DocumentStatus, StateError> {
        let next = match event {
            DocumentFileEvent::Send => {
                // No overwrite: the existing file must be deleted first
                if context.has_file {
                    return Err(StateError::GuardFailed(
                        "Document already has a file; delete it before sending a new one"
                            .to_string(),
                    ));
                }
                DocumentStatus::Available
            }
            DocumentFileEvent::Delete => {
                if !context.has_file {
                    return Err(StateError::GuardFailed(
                        "Document has no file to delete".to_string(),
                    ));
                }
                DocumentStatus::Missing
            }
        };

        tracing::trace!(from = %current, to = %next, event = %event, "Document file transition");
        Ok(next)
    }

    /// Validate an explicit status change against the attached file
    ///
    /// `available` requires a file and `missing` requires none.
    pub fn override_status(
        current: DocumentStatus,
        requested: DocumentStatus,
        context: &DocumentFileGuardContext,
    ) -> Result<DocumentStatus, StateError> {
        match (requested, context.has_file) {
            (DocumentStatus::Available, false) => Err(StateError::GuardFailed(
                "Document cannot be available without a file".to_string(),
            )),
            (DocumentStatus::Missing, true) => Err(StateError::GuardFailed(
                "Document cannot be missing while it has a file; delete the file instead"
                    .to_string(),
            )),
            _ => {
                tracing::trace!(from = %current, to = %requested, "Document status override");
                Ok(requested)
            }
        }
    }
}
