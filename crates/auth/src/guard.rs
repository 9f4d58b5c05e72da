//! Two-stage request guard
//!
//! Stage one authenticates: a public route short-circuits before any token
//! is looked at; otherwise the bearer token must be present, valid and
//! unexpired, and carry an active contract. Stage two authorizes: when the
//! route names roles, the caller must hold at least one of them.

use axum::http::HeaderValue;

use hrdocs_domain::Role;

use crate::backend::AuthBackend;
use crate::claims::AuthPayload;
use crate::error::AuthError;
use crate::jwt::extract_bearer_token;

/// Access rule attached to a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    /// Any authenticated employee with an active contract
    Authenticated,
    /// Authenticated and holding one of these roles
    Roles(&'static [Role]),
}

impl RouteAccess {
    fn required_roles(&self) -> &'static [Role] {
        match self {
            RouteAccess::Public | RouteAccess::Authenticated => &[],
            RouteAccess::Roles(roles) => roles,
        }
    }
}

/// Role check; an empty requirement admits everyone
pub fn authorize(required: &[Role], payload: &AuthPayload) -> Result<(), AuthError> {
    if required.is_empty() || payload.has_any_role(required) {
        return Ok(());
    }
    tracing::debug!(
        employee_id = %payload.sub,
        role = %payload.role,
        "Rejected by role guard"
    );
    Err(AuthError::InsufficientRole)
}

/// Run both stages for one request.
///
/// Returns `None` for public routes and the caller's payload otherwise.
pub fn guard(
    access: RouteAccess,
    authorization: Option<&HeaderValue>,
    backend: &AuthBackend,
) -> Result<Option<AuthPayload>, AuthError> {
    if access == RouteAccess::Public {
        return Ok(None);
    }

    let header = authorization.ok_or(AuthError::MissingAuthorization)?;
    let token = extract_bearer_token(header)?;
    let payload = backend.authenticate_token(&token)?;

    authorize(access.required_roles(), &payload)?;
    Ok(Some(payload))
}
