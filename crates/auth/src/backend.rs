//! Concrete authentication backend
//!
//! Wraps `AuthConfig` and owns token issuing and validation. Tokens are
//! self-contained, so authenticating a request needs no database access.

use crate::claims::AuthPayload;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::jwt::{issue_token, validate_token, IssuedToken};

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthBackend {
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Sign a token for `payload`
    pub fn issue(&self, payload: &AuthPayload) -> Result<IssuedToken, AuthError> {
        issue_token(payload, &self.config)
    }

    /// Verify a bearer token, then check the contract status it carries.
    pub(crate) fn authenticate_token(&self, token: &str) -> Result<AuthPayload, AuthError> {
        let payload = validate_token(token, &self.config)?.payload();

        if payload.contract_status != hrdocs_domain::ContractStatus::Active {
            tracing::debug!(employee_id = %payload.sub, "Rejected token of inactive employee");
            return Err(AuthError::InactiveContract);
        }

        Ok(payload)
    }
}
