//! Sign-in and caller introspection handlers
//!
//! - POST /auth/sign-in - public
//! - GET /auth/me - any authenticated employee

use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use hrdocs_auth::IssuedToken;
use hrdocs_common::{Result, ValidatedJson};
use hrdocs_db::Store;

use super::employees::EmployeeResponse;
use crate::api::middleware::{AuthUser, EmployeesState};

#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// POST /auth/sign-in
pub async fn sign_in<S: Store>(
    State(state): State<EmployeesState<S>>,
    ValidatedJson(request): ValidatedJson<SignInRequest>,
) -> Result<Json<IssuedToken>> {
    let issued = state
        .sign_in
        .sign_in(&request.username, &request.password)
        .await?;
    Ok(Json(issued))
}

/// GET /auth/me
pub async fn me<S: Store>(
    AuthUser(payload): AuthUser,
    State(state): State<EmployeesState<S>>,
) -> Result<Json<EmployeeResponse>> {
    let employee = state.sign_in.me(&payload).await?;
    Ok(Json(employee.into()))
}
