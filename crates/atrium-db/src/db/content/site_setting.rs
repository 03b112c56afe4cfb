use crate::db::record_store::{ensure_affected, RecordStore};
use async_trait::async_trait;
use atrium_core::{models::SiteSetting, AppError};
use sqlx::{PgPool, Postgres};

/// Repository for the site settings row. The table holds one row (id 1),
/// seeded by migration.
#[derive(Clone)]
pub struct SiteSettingRepository {
    pool: PgPool,
}

impl SiteSettingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<SiteSetting> for SiteSettingRepository {
    #[tracing::instrument(skip(self), fields(db.table = "site_settings", db.operation = "select", db.record_id = %id))]
    async fn find(&self, id: i64) -> Result<Option<SiteSetting>, AppError> {
        let row = sqlx::query_as::<Postgres, SiteSetting>(
            r#"
            SELECT id, site_name, tagline, contact_email, contact_phone, address,
                   logo_key, favicon_key, hero_image_key, updated_at
            FROM site_settings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "site_settings", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<SiteSetting>, AppError> {
        let rows = sqlx::query_as::<Postgres, SiteSetting>(
            r#"
            SELECT id, site_name, tagline, contact_email, contact_phone, address,
                   logo_key, favicon_key, hero_image_key, updated_at
            FROM site_settings
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "site_settings", db.operation = "insert", db.record_id = %record.id))]
    async fn create(&self, record: SiteSetting) -> Result<SiteSetting, AppError> {
        let row = sqlx::query_as::<Postgres, SiteSetting>(
            r#"
            INSERT INTO site_settings (id, site_name, tagline, contact_email, contact_phone, address,
                                       logo_key, favicon_key, hero_image_key, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, site_name, tagline, contact_email, contact_phone, address,
                      logo_key, favicon_key, hero_image_key, updated_at
            "#,
        )
        .bind(record.id)
        .bind(&record.site_name)
        .bind(&record.tagline)
        .bind(&record.contact_email)
        .bind(&record.contact_phone)
        .bind(&record.address)
        .bind(&record.logo_key)
        .bind(&record.favicon_key)
        .bind(&record.hero_image_key)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "site_settings", db.operation = "update", db.record_id = %record.id))]
    async fn update(&self, record: &SiteSetting) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE site_settings
            SET site_name = $2, tagline = $3, contact_email = $4, contact_phone = $5,
                address = $6, logo_key = $7, favicon_key = $8, hero_image_key = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(&record.site_name)
        .bind(&record.tagline)
        .bind(&record.contact_email)
        .bind(&record.contact_phone)
        .bind(&record.address)
        .bind(&record.logo_key)
        .bind(&record.favicon_key)
        .bind(&record.hero_image_key)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        ensure_affected(result.rows_affected(), "site_settings", record.id)
    }

    #[tracing::instrument(skip(self), fields(db.table = "site_settings", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM site_settings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        ensure_affected(result.rows_affected(), "site_settings", id)
    }
}
