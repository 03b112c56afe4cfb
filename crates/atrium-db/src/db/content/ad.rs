use crate::db::record_store::{ensure_affected, RecordStore};
use async_trait::async_trait;
use atrium_core::{models::Ad, AppError};
use sqlx::{PgPool, Postgres};

/// Repository for advertisement banners
#[derive(Clone)]
pub struct AdRepository {
    pool: PgPool,
}

impl AdRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Ad> for AdRepository {
    #[tracing::instrument(skip(self), fields(db.table = "ads", db.operation = "select", db.record_id = %id))]
    async fn find(&self, id: i64) -> Result<Option<Ad>, AppError> {
        let row = sqlx::query_as::<Postgres, Ad>(
            r#"
            SELECT id, title, link_url, placement, image_key, is_active, starts_at, ends_at,
                   created_at, updated_at
            FROM ads
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "ads", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<Ad>, AppError> {
        let rows = sqlx::query_as::<Postgres, Ad>(
            r#"
            SELECT id, title, link_url, placement, image_key, is_active, starts_at, ends_at,
                   created_at, updated_at
            FROM ads
            ORDER BY placement ASC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "ads", db.operation = "insert"))]
    async fn create(&self, record: Ad) -> Result<Ad, AppError> {
        let row = sqlx::query_as::<Postgres, Ad>(
            r#"
            INSERT INTO ads (title, link_url, placement, image_key, is_active, starts_at, ends_at,
                             created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, link_url, placement, image_key, is_active, starts_at, ends_at,
                      created_at, updated_at
            "#,
        )
        .bind(&record.title)
        .bind(&record.link_url)
        .bind(&record.placement)
        .bind(&record.image_key)
        .bind(record.is_active)
        .bind(record.starts_at)
        .bind(record.ends_at)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "ads", db.operation = "update", db.record_id = %record.id))]
    async fn update(&self, record: &Ad) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE ads
            SET title = $2, link_url = $3, placement = $4, image_key = $5, is_active = $6,
                starts_at = $7, ends_at = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(&record.link_url)
        .bind(&record.placement)
        .bind(&record.image_key)
        .bind(record.is_active)
        .bind(record.starts_at)
        .bind(record.ends_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        ensure_affected(result.rows_affected(), "ads", record.id)
    }

    #[tracing::instrument(skip(self), fields(db.table = "ads", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM ads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        ensure_affected(result.rows_affected(), "ads", id)
    }
}
