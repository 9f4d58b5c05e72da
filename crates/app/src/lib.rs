//! HR Docs application composition root
//!
//! Composes all domain routers into a single application.

use axum::{routing::get, Router};
use hrdocs_auth::{AuthBackend, AuthConfig};
use hrdocs_common::Config;
use hrdocs_db::Store;
use hrdocs_documents::DocumentsState;
use hrdocs_employees::EmployeesState;

/// Prefix under which every domain route is served
pub const API_PREFIX: &str = "/api/v1";

/// Token settings taken from the application config
pub fn auth_config(config: &Config) -> AuthConfig {
    AuthConfig {
        jwt_secret: config.jwt_secret.clone(),
        expires_in_secs: config.jwt_expires_in_secs,
    }
}

/// Create the main application router over an injected store
pub fn create_app<S: Store>(config: &Config, store: S) -> Router {
    let auth = AuthBackend::new(auth_config(config));

    let employees_state = EmployeesState::new(store.clone(), auth.clone());
    let documents_state = DocumentsState::new(store, auth, config.storage_base_url.clone());

    let api = Router::new()
        .merge(hrdocs_employees::routes().with_state(employees_state))
        .merge(hrdocs_documents::routes().with_state(documents_state));

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/",
            get(|| async { concat!("HR Docs API v", env!("CARGO_PKG_VERSION")) }),
        )
        .nest(API_PREFIX, api)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
