//! Authentication for the HR Docs API
//!
//! Provides password hashing, token issuing and validation, the two-stage
//! guard (authentication, then role authorization), and axum extractors
//! that work with any domain state implementing `FromRef<S>` for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod error;
mod extractors;
mod guard;
mod jwt;
mod password;

pub use backend::AuthBackend;
pub use claims::{AuthPayload, TokenClaims};
pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::{
    AdminOnly, AdminUser, AuthUser, ManagerOrAdmin, ManagerOrAdminUser, RequireRoles, RoleSet,
};
pub use guard::{authorize, guard, RouteAccess};
pub use jwt::IssuedToken;
pub use password::{hash_password, verify_password, verify_password_or_dummy};
