use crate::db::record_store::{ensure_affected, RecordStore};
use async_trait::async_trait;
use atrium_core::{models::Member, AppError};
use sqlx::{PgPool, Postgres};

/// Repository for team members
#[derive(Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Member> for MemberRepository {
    #[tracing::instrument(skip(self), fields(db.table = "members", db.operation = "select", db.record_id = %id))]
    async fn find(&self, id: i64) -> Result<Option<Member>, AppError> {
        let row = sqlx::query_as::<Postgres, Member>(
            r#"
            SELECT id, name, position, bio, photo_key, sort_order, is_active, created_at, updated_at
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "members", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<Member>, AppError> {
        let rows = sqlx::query_as::<Postgres, Member>(
            r#"
            SELECT id, name, position, bio, photo_key, sort_order, is_active, created_at, updated_at
            FROM members
            ORDER BY sort_order ASC, name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "members", db.operation = "insert"))]
    async fn create(&self, record: Member) -> Result<Member, AppError> {
        let row = sqlx::query_as::<Postgres, Member>(
            r#"
            INSERT INTO members (name, position, bio, photo_key, sort_order, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, position, bio, photo_key, sort_order, is_active, created_at, updated_at
            "#,
        )
        .bind(&record.name)
        .bind(&record.position)
        .bind(&record.bio)
        .bind(&record.photo_key)
        .bind(record.sort_order)
        .bind(record.is_active)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "members", db.operation = "update", db.record_id = %record.id))]
    async fn update(&self, record: &Member) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET name = $2, position = $3, bio = $4, photo_key = $5, sort_order = $6,
                is_active = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.position)
        .bind(&record.bio)
        .bind(&record.photo_key)
        .bind(record.sort_order)
        .bind(record.is_active)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        ensure_affected(result.rows_affected(), "members", record.id)
    }

    #[tracing::instrument(skip(self), fields(db.table = "members", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        ensure_affected(result.rows_affected(), "members", id)
    }
}
