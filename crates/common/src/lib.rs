//! Shared utilities, configuration, and error handling for HR Docs
//!
//! This crate provides common functionality used across the application:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - CPF parsing and a TTL get-or-set cache
//! - Request extractors shared by the domain routers

pub mod cache;
pub mod config;
pub mod cpf;
pub mod db;
pub mod error;
pub mod extractors;
pub mod state;

pub use cache::TtlCache;
pub use config::Config;
pub use cpf::Cpf;
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{CpfPath, IdPath, Pagination, ValidatedJson};
pub use state::StateError;
