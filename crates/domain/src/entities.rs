//! Domain entities for HR Docs
//!
//! Employees, document types, per-employee documents and the contract event
//! audit trail. Each entity carries its own validation and business rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use hrdocs_common::{Cpf, Error, Result};

use crate::state::{
    ContractAction, ContractGuardContext, ContractStateMachine, DocumentFileEvent,
    DocumentFileGuardContext, DocumentFileStateMachine,
};
use crate::validation::{validate_name, validate_reason, validate_username};

/// Employment contract status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "contract_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    #[default]
    Active,
    Inactive,
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractStatus::Active => write!(f, "active"),
            ContractStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// Employee role, from most to least privileged: admin, manager, common
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "employee_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Admin,
    #[default]
    Common,
}

impl Role {
    /// Whether this is the least-privileged role
    pub fn is_common(&self) -> bool {
        matches!(self, Role::Common)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Manager => write!(f, "manager"),
            Role::Admin => write!(f, "admin"),
            Role::Common => write!(f, "common"),
        }
    }
}

/// Tracking status of a per-employee document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "document_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Missing,
    Available,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Missing => write!(f, "missing"),
            DocumentStatus::Available => write!(f, "available"),
        }
    }
}

/// Allowed physical/legal document categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_type_name", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentTypeName {
    Cpf,
    Rg,
    Cnh,
    Ctps,
    TituloEleitor,
    CertificadoReservista,
    ComprovanteResidencia,
    CertidaoNascimento,
    CertidaoCasamento,
    Pis,
    #[serde(rename = "FOTO_3X4")]
    #[sqlx(rename = "FOTO_3X4")]
    Foto3x4,
    ExameAdmissional,
}

impl DocumentTypeName {
    pub const ALL: [DocumentTypeName; 12] = [
        Self::Cpf,
        Self::Rg,
        Self::Cnh,
        Self::Ctps,
        Self::TituloEleitor,
        Self::CertificadoReservista,
        Self::ComprovanteResidencia,
        Self::CertidaoNascimento,
        Self::CertidaoCasamento,
        Self::Pis,
        Self::Foto3x4,
        Self::ExameAdmissional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpf => "CPF",
            Self::Rg => "RG",
            Self::Cnh => "CNH",
            Self::Ctps => "CTPS",
            Self::TituloEleitor => "TITULO_ELEITOR",
            Self::CertificadoReservista => "CERTIFICADO_RESERVISTA",
            Self::ComprovanteResidencia => "COMPROVANTE_RESIDENCIA",
            Self::CertidaoNascimento => "CERTIDAO_NASCIMENTO",
            Self::CertidaoCasamento => "CERTIDAO_CASAMENTO",
            Self::Pis => "PIS",
            Self::Foto3x4 => "FOTO_3X4",
            Self::ExameAdmissional => "EXAME_ADMISSIONAL",
        }
    }
}

impl std::fmt::Display for DocumentTypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of contract event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "contract_event_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContractEventType {
    Hired,
    Fired,
    Rehired,
}

impl std::fmt::Display for ContractEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractEventType::Hired => write!(f, "hired"),
            ContractEventType::Fired => write!(f, "fired"),
            ContractEventType::Rehired => write!(f, "rehired"),
        }
    }
}

/// Employee entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    /// argon2 PHC string, never serialised
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub contract_status: ContractStatus,
    pub role: Role,
    pub cpf: Cpf,
    /// Contract event ids in creation order
    pub contract_events: Vec<Uuid>,
    /// Linked document type ids
    pub document_types: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Create a new active employee with validation
    pub fn new(
        first_name: String,
        last_name: String,
        username: String,
        password_hash: String,
        cpf: Cpf,
        role: Role,
    ) -> Result<Self> {
        validate_name("first_name", &first_name)?;
        validate_name("last_name", &last_name)?;
        if !validate_username(&username) {
            return Err(Error::Validation(
                "username must be 3-30 characters of letters, digits, '.', '_' or '-'".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Employee {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            username,
            password_hash,
            contract_status: ContractStatus::Active,
            role,
            cpf,
            contract_events: Vec::new(),
            document_types: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Full name derived from first and last name
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    pub fn is_active(&self) -> bool {
        self.contract_status == ContractStatus::Active
    }

    pub fn has_document_type(&self, document_type_id: Uuid) -> bool {
        self.document_types.contains(&document_type_id)
    }

    /// Apply fire/rehire on behalf of `actor_id`, returning the new status
    pub fn apply_contract_action(
        &mut self,
        action: ContractAction,
        actor_id: Uuid,
    ) -> Result<ContractStatus> {
        let ctx = ContractGuardContext {
            is_self_action: actor_id == self.id,
        };
        let next = ContractStateMachine::transition(self.contract_status, action, &ctx)?;
        self.contract_status = next;
        self.touch();
        Ok(next)
    }

    pub fn record_contract_event(&mut self, event_id: Uuid) {
        self.contract_events.push(event_id);
        self.touch();
    }

    pub fn forget_contract_event(&mut self, event_id: Uuid) {
        self.contract_events.retain(|id| *id != event_id);
        self.touch();
    }

    /// Link document types; rejects the whole batch if any is already linked
    pub fn link_document_types(&mut self, document_type_ids: &[Uuid]) -> Result<()> {
        let already: Vec<String> = document_type_ids
            .iter()
            .filter(|id| self.has_document_type(**id))
            .map(Uuid::to_string)
            .collect();
        if !already.is_empty() {
            return Err(Error::Validation(format!(
                "Document types already linked to this employee: {}",
                already.join(", ")
            )));
        }

        self.document_types.extend_from_slice(document_type_ids);
        self.touch();
        Ok(())
    }

    /// Unlink document types; rejects the whole batch if any is not linked
    pub fn unlink_document_types(&mut self, document_type_ids: &[Uuid]) -> Result<()> {
        let missing: Vec<String> = document_type_ids
            .iter()
            .filter(|id| !self.has_document_type(**id))
            .map(Uuid::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(Error::Validation(format!(
                "Document types not linked to this employee: {}",
                missing.join(", ")
            )));
        }

        let removed: HashSet<&Uuid> = document_type_ids.iter().collect();
        self.document_types.retain(|id| !removed.contains(id));
        self.touch();
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Compute an employee's full name
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name)
}

/// Document type reference data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DocumentType {
    pub id: Uuid,
    pub name: DocumentTypeName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentType {
    pub fn new(name: DocumentTypeName) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, name: DocumentTypeName) {
        self.name = name;
        self.updated_at = Utc::now();
    }
}

/// Per-employee, per-document-type tracking record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Document {
    pub id: Uuid,
    pub status: DocumentStatus,
    pub employee_id: Uuid,
    pub document_type_id: Uuid,
    pub document_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Placeholder created when a document type is linked to an employee
    pub fn placeholder(employee_id: Uuid, document_type_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            status: DocumentStatus::Missing,
            employee_id,
            document_type_id,
            document_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_file(&self) -> bool {
        self.document_url.is_some()
    }

    pub fn belongs_to(&self, employee_id: Uuid) -> bool {
        self.employee_id == employee_id
    }

    /// Attach a file URL; rejected if a file is already attached
    pub fn attach_file(&mut self, url: String) -> Result<()> {
        let ctx = DocumentFileGuardContext {
            has_file: self.has_file(),
        };
        self.status =
            DocumentFileStateMachine::transition(self.status, DocumentFileEvent::Send, &ctx)?;
        self.document_url = Some(url);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Remove the attached file URL; rejected if none is attached
    pub fn detach_file(&mut self) -> Result<()> {
        let ctx = DocumentFileGuardContext {
            has_file: self.has_file(),
        };
        self.status =
            DocumentFileStateMachine::transition(self.status, DocumentFileEvent::Delete, &ctx)?;
        self.document_url = None;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Explicit status change; must agree with the attached file
    pub fn set_status(&mut self, status: DocumentStatus) -> Result<()> {
        let ctx = DocumentFileGuardContext {
            has_file: self.has_file(),
        };
        self.status = DocumentFileStateMachine::override_status(self.status, status, &ctx)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Audit record of a hire/fire/rehire action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContractEvent {
    pub id: Uuid,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub event_type: ContractEventType,
    pub date: DateTime<Utc>,
    pub reason: String,
    /// Snapshot of the employee at the time of the event
    pub employee_full_name: String,
    pub employee_cpf: Cpf,
    pub employee_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContractEvent {
    /// Record an event for `employee`, snapshotting its name and CPF
    pub fn record(
        event_type: ContractEventType,
        employee: &Employee,
        reason: String,
    ) -> Result<Self> {
        validate_reason(&reason)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            event_type,
            date: now,
            reason,
            employee_full_name: employee.full_name(),
            employee_cpf: employee.cpf.clone(),
            employee_id: employee.id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Explicit correction of reason and/or date
    pub fn amend(&mut self, reason: Option<String>, date: Option<DateTime<Utc>>) -> Result<()> {
        if let Some(reason) = reason {
            validate_reason(&reason)?;
            self.reason = reason;
        }
        if let Some(date) = date {
            self.date = date;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}
