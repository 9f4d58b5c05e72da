//! Documents domain: document types, per-employee documents, file
//! placeholders and the document type linking workflow

pub mod api;
pub mod services;

// Re-export service types
pub use services::{
    DocumentFilesService, DocumentTypeLinkersService, DocumentTypesService, DocumentsService,
    EmployeeDocument, EmployeeDocumentService, LinkOutcome, UnlinkOutcome,
};

// Re-export API types
pub use api::routes;
pub use api::DocumentsState;
