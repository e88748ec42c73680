//! Key/value site settings

use anyhow::Result;
use common::models::SocialLinks;
use sqlx::SqlitePool;

/// Settings repository
#[derive(Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Links that were never saved read as empty strings
    pub async fn social_links(&self) -> Result<SocialLinks> {
        Ok(SocialLinks {
            facebook_url: self.get("facebook_url").await?.unwrap_or_default(),
            whatsapp_url: self.get("whatsapp_url").await?.unwrap_or_default(),
            instagram_url: self.get("instagram_url").await?.unwrap_or_default(),
        })
    }

    /// Replace all social links at once; an empty link deletes its key
    pub async fn save_social_links(&self, links: &SocialLinks) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for (key, value) in links.entries() {
            let value = value.trim();
            if value.is_empty() {
                sqlx::query("DELETE FROM settings WHERE key = ?")
                    .bind(key)
                    .execute(&mut *tx)
                    .await?;
            } else {
                sqlx::query(
                    "INSERT INTO settings (key, value) VALUES (?, ?) \
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                )
                .bind(key)
                .bind(value)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
