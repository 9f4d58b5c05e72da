//! Business services for the Documents domain

mod document_files;
mod document_type_linkers;
mod document_types;
mod documents;
mod employee_document;

pub use document_files::{DocumentFilesService, FALLBACK_EXTENSION};
pub use document_type_linkers::{DocumentTypeLinkersService, LinkOutcome, UnlinkOutcome};
pub use document_types::{DocumentTypesService, DOCUMENT_TYPES_CACHE_TTL};
pub use documents::DocumentsService;
pub use employee_document::{check_document_access, EmployeeDocument, EmployeeDocumentService};

use hrdocs_common::Error;

pub(crate) fn employee_not_found() -> Error {
    Error::NotFound("Employee not found".to_string())
}

pub(crate) fn document_not_found() -> Error {
    Error::NotFound("Document not found".to_string())
}

pub(crate) fn document_type_not_found() -> Error {
    Error::NotFound("Document type not found".to_string())
}
