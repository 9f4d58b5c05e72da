//! HTTP handlers for the Documents domain

pub mod document_files;
pub mod document_type_linkers;
pub mod document_types;
pub mod documents;
