//! Document type reference data
//!
//! The full list is served through a TTL cache; every mutation invalidates it.

use std::time::Duration;

use uuid::Uuid;

use hrdocs_common::{Error, Result, TtlCache};
use hrdocs_db::{transactional, DocumentTypeRepository, EmployeeRepository, Store};
use hrdocs_domain::{DocumentType, DocumentTypeName};

use super::document_type_not_found;

/// Lifetime of the cached document type list
pub const DOCUMENT_TYPES_CACHE_TTL: Duration = Duration::from_secs(60);

const ALL_KEY: &str = "document_types:all";

fn name_taken(name: DocumentTypeName) -> Error {
    Error::Conflict(format!("Document type {} already exists", name))
}

#[derive(Clone)]
pub struct DocumentTypesService<S> {
    store: S,
    cache: TtlCache<Vec<DocumentType>>,
}

impl<S: Store> DocumentTypesService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: TtlCache::new(),
        }
    }

    pub async fn find_all(&self) -> Result<Vec<DocumentType>> {
        self.cache
            .get_or_set(ALL_KEY, DOCUMENT_TYPES_CACHE_TTL, || async {
                let mut session = self.store.begin().await?;
                session.list_document_types().await
            })
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<DocumentType> {
        let mut session = self.store.begin().await?;
        session
            .find_document_type(id)
            .await?
            .ok_or_else(document_type_not_found)
    }

    pub async fn create(&self, name: DocumentTypeName) -> Result<DocumentType> {
        let document_type = transactional(&self.store, move |s| {
            Box::pin(async move {
                let existing = s.list_document_types().await?;
                if existing.iter().any(|t| t.name == name) {
                    return Err(name_taken(name));
                }
                let document_type = DocumentType::new(name);
                s.insert_document_type(&document_type).await?;
                Ok(document_type)
            })
        })
        .await?;

        self.cache.invalidate(ALL_KEY);
        tracing::info!(document_type_id = %document_type.id, name = %name, "Document type created");
        Ok(document_type)
    }

    pub async fn update(&self, id: Uuid, name: DocumentTypeName) -> Result<DocumentType> {
        let document_type = transactional(&self.store, move |s| {
            Box::pin(async move {
                let mut document_type = s
                    .find_document_type(id)
                    .await?
                    .ok_or_else(document_type_not_found)?;

                let existing = s.list_document_types().await?;
                if existing.iter().any(|t| t.name == name && t.id != id) {
                    return Err(name_taken(name));
                }

                document_type.rename(name);
                s.update_document_type(&document_type).await?;
                Ok(document_type)
            })
        })
        .await?;

        self.cache.invalidate(ALL_KEY);
        Ok(document_type)
    }

    /// Delete a document type; rejected while any employee links it
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        transactional(&self.store, move |s| {
            Box::pin(async move {
                if s.find_document_type(id).await?.is_none() {
                    return Err(document_type_not_found());
                }
                let linked = s.count_employees_with_document_type(id).await?;
                if linked > 0 {
                    return Err(Error::Conflict(format!(
                        "Document type is linked to {} employee(s)",
                        linked
                    )));
                }
                s.delete_document_type(id).await
            })
        })
        .await?;

        self.cache.invalidate(ALL_KEY);
        tracing::info!(document_type_id = %id, "Document type deleted");
        Ok(())
    }
}
