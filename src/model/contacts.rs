//! Process-wide contacts summary for the extraction prompt.
//!
//! Populated at startup and refreshed after each successful insert so the
//! prompt never drifts from the table.

use crate::db::{ContactRepo, DbPool};
use crate::error::AppResult;
use tokio::sync::RwLock;
use tracing::debug;

/// Cached one-line-per-contact summary
#[derive(Debug, Default)]
pub struct ContactsCache {
    summary: RwLock<String>,
}

impl ContactsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the summary from the contacts table
    pub async fn refresh(&self, pool: &DbPool) -> AppResult<()> {
        let contacts = ContactRepo::list(pool).await?;
        let summary = contacts
            .iter()
            .map(|c| format!("{} ({})", c.display_name(), c.wallet_address))
            .collect::<Vec<_>>()
            .join("\n");

        debug!("Contacts cache refreshed: {} entries", contacts.len());
        *self.summary.write().await = summary;
        Ok(())
    }

    /// Current summary, one contact per line (empty when no contacts exist)
    pub async fn summary(&self) -> String {
        self.summary.read().await.clone()
    }

    /// First names from the cached summary, for the extraction prompt
    pub async fn known_first_names(&self) -> Vec<String> {
        self.summary
            .read()
            .await
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{setup_test_db, NewContact};

    #[tokio::test]
    async fn test_cache_starts_empty() {
        let cache = ContactsCache::new();
        assert_eq!(cache.summary().await, "");
        assert!(cache.known_first_names().await.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_builds_summary() {
        let pool = setup_test_db().await;
        ContactRepo::insert(
            &pool,
            NewContact {
                first_name: "Maxime".to_string(),
                last_name: "Durand".to_string(),
                email: "maxime@example.com".to_string(),
                wallet_address: "rMaxime444".to_string(),
                destination_tag: None,
            },
        )
        .await
        .unwrap();

        let cache = ContactsCache::new();
        cache.refresh(&pool).await.unwrap();

        assert_eq!(cache.summary().await, "Maxime Durand (rMaxime444)");
        assert_eq!(cache.known_first_names().await, vec!["Maxime"]);
    }
}
