//! Database layer for HR Docs
//!
//! The persistence gateway is the [`Store`] trait: an injected handle that
//! opens [`Session`]s. A session exposes every collection operation and is
//! either committed or rolled back. [`transactional`] wraps a unit of work in
//! one session with commit-or-rollback on every exit path.
//!
//! Two adapters are provided: [`PgStore`] (PostgreSQL via sqlx) and
//! [`MemoryStore`] (in-process, snapshot per session).

pub mod memory;
pub mod postgres;
pub mod repositories;
pub mod store;

pub use memory::{MemorySession, MemoryStore};
pub use postgres::{PgSession, PgStore};
pub use repositories::{
    ContractEventRepository, DocumentRepository, DocumentTypeRepository, EmployeeRepository,
};
pub use store::{transactional, Session, Store, CLOSED_HANDLE_MESSAGE};
