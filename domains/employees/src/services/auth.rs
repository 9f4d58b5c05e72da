//! Sign-in and caller introspection

use hrdocs_auth::{verify_password_or_dummy, AuthBackend, AuthPayload, IssuedToken};
use hrdocs_common::{Error, Result};
use hrdocs_db::{EmployeeRepository, Store};
use hrdocs_domain::Employee;

use super::employee_not_found;

/// Returned for an unknown username and for a wrong password alike
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

#[derive(Clone)]
pub struct AuthService<S> {
    store: S,
    auth: AuthBackend,
}

impl<S: Store> AuthService<S> {
    pub fn new(store: S, auth: AuthBackend) -> Self {
        Self { store, auth }
    }

    /// Exchange username and password for a signed token
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<IssuedToken> {
        let mut session = self.store.begin().await?;
        let employee = session.find_employee_by_username(username).await?;
        let stored_hash = employee.as_ref().map(|e| e.password_hash.as_str());
        let verified = verify_password_or_dummy(password, stored_hash);
        let employee = employee.filter(|_| verified);

        let Some(employee) = employee else {
            tracing::info!(username, "Sign-in rejected");
            return Err(Error::Authentication(INVALID_CREDENTIALS_MESSAGE.to_string()));
        };

        if !employee.is_active() {
            tracing::info!(employee_id = %employee.id, "Sign-in rejected for inactive contract");
            return Err(Error::Authentication(
                "Employee contract is inactive".to_string(),
            ));
        }

        let issued = self.auth.issue(&AuthPayload::from(&employee))?;
        tracing::info!(employee_id = %employee.id, "Employee signed in");
        Ok(issued)
    }

    /// The caller's own employee record
    pub async fn me(&self, payload: &AuthPayload) -> Result<Employee> {
        let mut session = self.store.begin().await?;
        session
            .find_employee(payload.employee_id())
            .await?
            .ok_or_else(employee_not_found)
    }
}
