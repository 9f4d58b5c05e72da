//! Token issuing, validation and extraction helpers

use axum::http::HeaderValue;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use crate::claims::{AuthPayload, TokenClaims};
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Result of a successful sign-in
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
    pub payload: AuthPayload,
}

/// Sign a token for `payload` valid for the configured lifetime
pub(crate) fn issue_token(
    payload: &AuthPayload,
    config: &AuthConfig,
) -> Result<IssuedToken, AuthError> {
    let now = chrono::Utc::now().timestamp().max(0) as u64;
    let claims = TokenClaims::new(payload, now, now + config.expires_in_secs);

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());
    let access_token =
        encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            AuthError::TokenIssueFailed
        })?;

    Ok(IssuedToken {
        access_token,
        token_type: "Bearer",
        expires_in: config.expires_in_secs,
        payload: payload.clone(),
    })
}

/// Validate a signed token and return its claims
pub(crate) fn validate_token(token: &str, config: &AuthConfig) -> Result<TokenClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<TokenClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "Token validation failed");
        AuthError::InvalidToken
    })?;

    Ok(token_data.claims)
}

/// Extract bearer token from Authorization header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    match header_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(AuthError::InvalidAuthorizationFormat),
    }
}
