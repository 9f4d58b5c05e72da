//! Domain entities, business rules, and state machines for HR Docs

pub mod entities;
pub mod state;
pub mod validation;

pub use entities::*;
pub use state::{
    ContractAction, ContractGuardContext, ContractStateMachine, DocumentFileEvent,
    DocumentFileGuardContext, DocumentFileStateMachine,
};
