//! Document file placeholders
//!
//! Sending a file records a synthesized storage URL and marks the document
//! available; deleting clears the URL and marks it missing. Blob storage
//! itself is not touched.

use uuid::Uuid;

use hrdocs_auth::AuthPayload;
use hrdocs_common::Result;
use hrdocs_db::{transactional, DocumentRepository, Store};
use hrdocs_domain::Document;

use super::employee_document::{check_document_access, load_employee_document};

/// Extension used when the MIME type is absent or unknown
pub const FALLBACK_EXTENSION: &str = "bin";

/// `{uuid}.{ext}` with the extension derived from `mime_type`
fn generate_filename(mime_type: Option<&str>) -> String {
    let extension = mime_type
        .and_then(|mime| {
            let essence = mime.split(';').next().unwrap_or(mime).trim();
            mime_guess::get_mime_extensions_str(essence)
        })
        .and_then(|extensions| extensions.first().copied())
        .unwrap_or(FALLBACK_EXTENSION);
    format!("{}.{}", Uuid::new_v4(), extension)
}

#[derive(Clone)]
pub struct DocumentFilesService<S> {
    store: S,
    storage_base_url: String,
}

impl<S: Store> DocumentFilesService<S> {
    pub fn new(store: S, storage_base_url: impl Into<String>) -> Self {
        Self {
            store,
            storage_base_url: storage_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Attach a new file to a document that has none
    pub async fn send_document_file(
        &self,
        document_id: Uuid,
        actor: &AuthPayload,
        mime_type: Option<String>,
    ) -> Result<Document> {
        let actor = actor.clone();
        let url = format!(
            "{}/{}",
            self.storage_base_url,
            generate_filename(mime_type.as_deref())
        );

        let document = transactional(&self.store, move |s| {
            Box::pin(async move {
                let mut document = load_employee_document(s, document_id).await?.document;

                // No overwrite: an existing file must be deleted first
                document.attach_file(url)?;
                check_document_access(&actor, &document)?;

                s.update_document(&document).await?;
                Ok(document)
            })
        })
        .await?;

        tracing::info!(
            document_id = %document_id,
            employee_id = %document.employee_id,
            "Document file sent"
        );
        Ok(document)
    }

    /// Remove the file from a document that has one
    pub async fn delete_document_file(
        &self,
        document_id: Uuid,
        actor: &AuthPayload,
    ) -> Result<Document> {
        let actor = actor.clone();

        let document = transactional(&self.store, move |s| {
            Box::pin(async move {
                let mut document = load_employee_document(s, document_id).await?.document;

                document.detach_file()?;
                check_document_access(&actor, &document)?;

                s.update_document(&document).await?;
                Ok(document)
            })
        })
        .await?;

        tracing::info!(
            document_id = %document_id,
            employee_id = %document.employee_id,
            "Document file deleted"
        );
        Ok(document)
    }
}
