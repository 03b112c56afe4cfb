use async_trait::async_trait;
use atrium_core::AppError;

/// Relational persistence for one entity kind.
///
/// Implementations have no knowledge of blobs. `update` and `delete` of a
/// missing row return `AppError::NotFound`.
#[async_trait]
pub trait RecordStore<R>: Send + Sync
where
    R: Send + Sync + 'static,
{
    async fn find(&self, id: i64) -> Result<Option<R>, AppError>;

    async fn list(&self) -> Result<Vec<R>, AppError>;

    /// Insert `record` and return the stored row with its assigned id.
    async fn create(&self, record: R) -> Result<R, AppError>;

    async fn update(&self, record: &R) -> Result<(), AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

/// Map a zero-row write to `NotFound`.
pub(crate) fn ensure_affected(rows: u64, table: &str, id: i64) -> Result<(), AppError> {
    if rows == 0 {
        return Err(AppError::NotFound(format!("{} row {} not found", table, id)));
    }
    Ok(())
}
