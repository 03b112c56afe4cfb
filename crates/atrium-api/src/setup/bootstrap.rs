//! First-run provisioning of the administrator account.

use crate::auth::password::hash_password;
use anyhow::{Context, Result};
use atrium_core::models::UserRole;
use atrium_core::Config;
use atrium_db::UserStore;

/// Create the configured administrator unless an account with that email exists.
/// Returns whether an account was created.
pub async fn ensure_admin(config: &Config, users: &dyn UserStore) -> Result<bool> {
    let Some((email, password)) = config.admin_credentials() else {
        tracing::debug!("No ADMIN_EMAIL configured, skipping admin bootstrap");
        return Ok(false);
    };

    if users
        .find_by_email(email)
        .await
        .context("Failed to look up admin account")?
        .is_some()
    {
        tracing::debug!(email = %email, "Admin account already present");
        return Ok(false);
    }

    let hash = hash_password(password).context("Failed to hash admin password")?;
    let user = users
        .create(email, &hash, Some("Administrator"), &UserRole::Admin.to_string())
        .await
        .context("Failed to create admin account")?;

    tracing::info!(user_id = user.id, email = %email, "Admin account created");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{test_config, MockUserStore};

    #[tokio::test]
    async fn creates_admin_once() {
        let mut config = test_config("/tmp/atrium-test");
        config.0.admin_email = Some("admin@example.org".to_string());
        config.0.admin_password = Some("a-long-admin-password".to_string());
        let users = MockUserStore::new();

        assert!(ensure_admin(&config, &users).await.unwrap());
        assert!(!ensure_admin(&config, &users).await.unwrap());

        let admin = users.find_by_email("ADMIN@example.org").await.unwrap().unwrap();
        assert_eq!(admin.role, "admin");
    }

    #[tokio::test]
    async fn skipped_without_credentials() {
        let config = test_config("/tmp/atrium-test");
        let users = MockUserStore::new();

        assert!(!ensure_admin(&config, &users).await.unwrap());
    }
}
