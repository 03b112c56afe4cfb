use crate::db::record_store::{ensure_affected, RecordStore};
use async_trait::async_trait;
use atrium_core::{models::Testimonial, AppError};
use sqlx::{PgPool, Postgres};

/// Repository for testimonials
#[derive(Clone)]
pub struct TestimonialRepository {
    pool: PgPool,
}

impl TestimonialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Testimonial> for TestimonialRepository {
    #[tracing::instrument(skip(self), fields(db.table = "testimonials", db.operation = "select", db.record_id = %id))]
    async fn find(&self, id: i64) -> Result<Option<Testimonial>, AppError> {
        let row = sqlx::query_as::<Postgres, Testimonial>(
            r#"
            SELECT id, name, role, content, rating, photo_key, is_published, created_at, updated_at
            FROM testimonials
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "testimonials", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<Testimonial>, AppError> {
        let rows = sqlx::query_as::<Postgres, Testimonial>(
            r#"
            SELECT id, name, role, content, rating, photo_key, is_published, created_at, updated_at
            FROM testimonials
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "testimonials", db.operation = "insert"))]
    async fn create(&self, record: Testimonial) -> Result<Testimonial, AppError> {
        let row = sqlx::query_as::<Postgres, Testimonial>(
            r#"
            INSERT INTO testimonials (name, role, content, rating, photo_key, is_published, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, role, content, rating, photo_key, is_published, created_at, updated_at
            "#,
        )
        .bind(&record.name)
        .bind(&record.role)
        .bind(&record.content)
        .bind(record.rating)
        .bind(&record.photo_key)
        .bind(record.is_published)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "testimonials", db.operation = "update", db.record_id = %record.id))]
    async fn update(&self, record: &Testimonial) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE testimonials
            SET name = $2, role = $3, content = $4, rating = $5, photo_key = $6,
                is_published = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.role)
        .bind(&record.content)
        .bind(record.rating)
        .bind(&record.photo_key)
        .bind(record.is_published)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        ensure_affected(result.rows_affected(), "testimonials", record.id)
    }

    #[tracing::instrument(skip(self), fields(db.table = "testimonials", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        ensure_affected(result.rows_affected(), "testimonials", id)
    }
}
