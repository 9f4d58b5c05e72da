//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication and authorization failures raised by the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    InvalidToken,
    /// Token is valid but the employee's contract is inactive
    InactiveContract,
    /// Caller holds none of the roles the route requires
    InsufficientRole,
    TokenIssueFailed,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthorization
            | AuthError::InvalidAuthorizationFormat
            | AuthError::InvalidToken
            | AuthError::InactiveContract => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientRole => StatusCode::FORBIDDEN,
            AuthError::TokenIssueFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code_and_message(&self) -> (&'static str, &'static str) {
        match self {
            AuthError::MissingAuthorization => {
                ("MISSING_AUTHORIZATION", "Authorization header required")
            }
            AuthError::InvalidAuthorizationFormat => (
                "INVALID_AUTHORIZATION",
                "Invalid authorization header format",
            ),
            AuthError::InvalidToken => ("INVALID_TOKEN", "Invalid or expired token"),
            AuthError::InactiveContract => ("INACTIVE_CONTRACT", "Employee contract is inactive"),
            AuthError::InsufficientRole => (
                "INSUFFICIENT_ROLE",
                "You do not have permission to access this resource",
            ),
            AuthError::TokenIssueFailed => ("AUTH_ERROR", "Authentication failed"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (code, message) = self.code_and_message();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<AuthError> for hrdocs_common::Error {
    fn from(err: AuthError) -> Self {
        let (_, message) = err.code_and_message();
        match err {
            AuthError::InsufficientRole => hrdocs_common::Error::Authorization(message.to_string()),
            AuthError::TokenIssueFailed => hrdocs_common::Error::Internal(message.to_string()),
            _ => hrdocs_common::Error::Authentication(message.to_string()),
        }
    }
}
