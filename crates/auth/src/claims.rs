//! Token claims types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hrdocs_domain::{ContractStatus, Employee, Role};

/// Identity carried in every token and reconstructed per request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    /// Subject (employee ID)
    pub sub: Uuid,
    pub username: String,
    pub role: Role,
    pub contract_status: ContractStatus,
}

impl AuthPayload {
    pub fn employee_id(&self) -> Uuid {
        self.sub
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

impl From<&Employee> for AuthPayload {
    fn from(employee: &Employee) -> Self {
        Self {
            sub: employee.id,
            username: employee.username.clone(),
            role: employee.role,
            contract_status: employee.contract_status,
        }
    }
}

/// Signed token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (employee ID)
    pub sub: Uuid,
    pub username: String,
    pub role: Role,
    pub contract_status: ContractStatus,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
}

impl TokenClaims {
    pub fn new(payload: &AuthPayload, iat: u64, exp: u64) -> Self {
        Self {
            sub: payload.sub,
            username: payload.username.clone(),
            role: payload.role,
            contract_status: payload.contract_status,
            iat,
            exp,
        }
    }

    pub fn payload(&self) -> AuthPayload {
        AuthPayload {
            sub: self.sub,
            username: self.username.clone(),
            role: self.role,
            contract_status: self.contract_status,
        }
    }
}
