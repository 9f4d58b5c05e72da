//! Persistence gateway traits and the transactional wrapper

use async_trait::async_trait;
use futures::future::BoxFuture;

use hrdocs_common::Result;

use crate::repositories::{
    ContractEventRepository, DocumentRepository, DocumentTypeRepository, EmployeeRepository,
};

/// Error message returned by `begin` once the handle has been closed
pub const CLOSED_HANDLE_MESSAGE: &str = "Database connection handle is closed";

/// One transactional scope over every collection.
///
/// Dropping a session without calling `commit` discards its writes.
#[async_trait]
pub trait Session:
    EmployeeRepository
    + DocumentTypeRepository
    + DocumentRepository
    + ContractEventRepository
    + Sized
    + Send
    + 'static
{
    async fn commit(self) -> Result<()>;

    async fn rollback(self) -> Result<()>;
}

/// Transaction-capable persistence handle, created at startup and injected
/// into every service.
#[async_trait]
pub trait Store: Clone + Send + Sync + 'static {
    type Session: Session;

    /// Open a new session; fails once the handle is closed
    async fn begin(&self) -> Result<Self::Session>;

    /// Shut the handle down; later `begin` calls fail
    async fn close(&self);
}

/// Run `work` inside one session of `store`.
///
/// Commits when `work` returns `Ok`; rolls back when it returns `Err` and
/// hands that error back unchanged. A failed commit is returned as an error.
/// There are no retries.
pub async fn transactional<S, T, F>(store: &S, work: F) -> Result<T>
where
    S: Store,
    T: Send,
    F: for<'s> FnOnce(&'s mut S::Session) -> BoxFuture<'s, Result<T>> + Send,
{
    let mut session = store.begin().await?;

    match work(&mut session).await {
        Ok(value) => {
            session.commit().await?;
            Ok(value)
        }
        Err(err) => {
            tracing::debug!(error = %err, "Unit of work failed, rolling back");
            if let Err(rollback_err) = session.rollback().await {
                tracing::warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}
