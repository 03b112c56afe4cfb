use crate::db::record_store::{ensure_affected, RecordStore};
use async_trait::async_trait;
use atrium_core::{models::Document, AppError};
use sqlx::{PgPool, Postgres};

/// Repository for published documents
#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Document> for DocumentRepository {
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select", db.record_id = %id))]
    async fn find(&self, id: i64) -> Result<Option<Document>, AppError> {
        let row = sqlx::query_as::<Postgres, Document>(
            r#"
            SELECT id, title, description, document_type, file_key, original_filename,
                   content_type, file_size, is_public, created_at, updated_at
            FROM documents
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<Document>, AppError> {
        let rows = sqlx::query_as::<Postgres, Document>(
            r#"
            SELECT id, title, description, document_type, file_key, original_filename,
                   content_type, file_size, is_public, created_at, updated_at
            FROM documents
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "documents", db.operation = "insert"))]
    async fn create(&self, record: Document) -> Result<Document, AppError> {
        let row = sqlx::query_as::<Postgres, Document>(
            r#"
            INSERT INTO documents (title, description, document_type, file_key, original_filename,
                                   content_type, file_size, is_public, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, title, description, document_type, file_key, original_filename,
                      content_type, file_size, is_public, created_at, updated_at
            "#,
        )
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.document_type)
        .bind(&record.file_key)
        .bind(&record.original_filename)
        .bind(&record.content_type)
        .bind(record.file_size)
        .bind(record.is_public)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "documents", db.operation = "update", db.record_id = %record.id))]
    async fn update(&self, record: &Document) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET title = $2, description = $3, document_type = $4, file_key = $5,
                original_filename = $6, content_type = $7, file_size = $8,
                is_public = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.document_type)
        .bind(&record.file_key)
        .bind(&record.original_filename)
        .bind(&record.content_type)
        .bind(record.file_size)
        .bind(record.is_public)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        ensure_affected(result.rows_affected(), "documents", record.id)
    }

    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        ensure_affected(result.rows_affected(), "documents", id)
    }
}
