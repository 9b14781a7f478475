//! Named wallet directory.
//!
//! Wallet entries are loaded from configuration at startup and injected
//! through application state, so handler logic never reads the process
//! environment directly. Secrets are zeroized on drop and excluded from
//! `Debug` output.

use crate::config::WalletsConfig;
use crate::db::{ContactRepo, DbPool};
use crate::error::{AppError, AppResult};
use std::collections::HashMap;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A wallet signing secret. Never logged, never serialized.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletSecret(String);

impl WalletSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for WalletSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WalletSecret(***)")
    }
}

/// A named wallet with its ledger address and signing secret
#[derive(Debug, Clone)]
pub struct WalletEntry {
    pub name: String,
    pub address: String,
    pub secret: WalletSecret,
}

/// Where a recipient name resolved to
#[derive(Debug, Clone)]
pub enum ResolvedRecipient {
    /// A configured wallet entry
    Wallet(WalletEntry),
    /// A saved contact's wallet address (and optional destination tag)
    Contact {
        address: String,
        destination_tag: Option<String>,
    },
}

impl ResolvedRecipient {
    pub fn address(&self) -> &str {
        match self {
            Self::Wallet(entry) => &entry.address,
            Self::Contact { address, .. } => address,
        }
    }
}

/// Directory of named wallets, keyed case-insensitively by name
#[derive(Debug, Clone)]
pub struct WalletDirectory {
    entries: HashMap<String, WalletEntry>,
    default_sender: String,
    default_recipient: String,
}

impl WalletDirectory {
    pub fn from_config(config: &WalletsConfig) -> Self {
        let entries = config
            .entries
            .iter()
            .map(|(name, entry)| {
                (
                    name.to_lowercase(),
                    WalletEntry {
                        name: name.clone(),
                        address: entry.address.clone(),
                        secret: WalletSecret::new(entry.secret.clone()),
                    },
                )
            })
            .collect();

        Self {
            entries,
            default_sender: config.default_sender.clone(),
            default_recipient: config.default_recipient.clone(),
        }
    }

    /// Look up a wallet by name
    pub fn get(&self, name: &str) -> Option<&WalletEntry> {
        self.entries.get(&name.to_lowercase())
    }

    /// Names of all configured wallets, for the extraction prompt
    pub fn known_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.values().map(|e| e.name.clone()).collect();
        names.sort();
        names
    }

    /// Map the role keywords "sender"/"recipient" to their configured
    /// wallet names; anything else is already a name
    fn map_role<'a>(&'a self, role_or_name: &'a str) -> &'a str {
        if role_or_name.eq_ignore_ascii_case("sender") {
            &self.default_sender
        } else if role_or_name.eq_ignore_ascii_case("recipient")
            || role_or_name.eq_ignore_ascii_case("receiver")
        {
            &self.default_recipient
        } else {
            role_or_name
        }
    }

    /// Resolve the wallet for a role keyword ("sender"/"recipient") or an
    /// explicit wallet name
    pub fn resolve_role(&self, role: &str) -> AppResult<&WalletEntry> {
        let name = self.map_role(role);
        self.get(name)
            .ok_or_else(|| AppError::WalletNotConfigured(name.to_string()))
    }

    /// Resolve a sender, which must have both an address and a secret
    pub fn resolve_sender(&self, name: &str) -> AppResult<&WalletEntry> {
        let name = self.map_role(name);
        let entry = self
            .get(name)
            .ok_or_else(|| AppError::UnknownRecipient(name.to_string()))?;
        if entry.address.is_empty() || entry.secret.is_empty() {
            return Err(AppError::WalletNotConfigured(name.to_string()));
        }
        Ok(entry)
    }

    /// Resolve a recipient: wallet directory first, contacts table second.
    /// Unresolvable names are a client error naming the offender.
    pub async fn resolve_recipient(
        &self,
        pool: &DbPool,
        name: &str,
    ) -> AppResult<ResolvedRecipient> {
        let name = self.map_role(name);
        if let Some(entry) = self.get(name) {
            if entry.address.is_empty() {
                return Err(AppError::WalletNotConfigured(name.to_string()));
            }
            return Ok(ResolvedRecipient::Wallet(entry.clone()));
        }

        if let Some(contact) = ContactRepo::get_by_first_name(pool, name).await? {
            return Ok(ResolvedRecipient::Contact {
                address: contact.wallet_address,
                destination_tag: contact.destination_tag,
            });
        }

        Err(AppError::UnknownRecipient(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WalletEntryConfig;
    use crate::db::{setup_test_db, NewContact};

    fn test_config() -> WalletsConfig {
        let mut entries = HashMap::new();
        entries.insert(
            "Shane".to_string(),
            WalletEntryConfig {
                address: "rShane111".to_string(),
                secret: "sShaneSecret".to_string(),
            },
        );
        entries.insert(
            "Luc".to_string(),
            WalletEntryConfig {
                address: "rLuc222".to_string(),
                secret: "sLucSecret".to_string(),
            },
        );
        entries.insert(
            "Florian".to_string(),
            WalletEntryConfig {
                address: "rFlorian333".to_string(),
                secret: String::new(),
            },
        );
        WalletsConfig {
            default_sender: "Shane".to_string(),
            default_recipient: "Luc".to_string(),
            entries,
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dir = WalletDirectory::from_config(&test_config());
        assert!(dir.get("shane").is_some());
        assert!(dir.get("SHANE").is_some());
        assert!(dir.get("Thomas").is_none());
    }

    #[test]
    fn test_known_names_sorted() {
        let dir = WalletDirectory::from_config(&test_config());
        assert_eq!(dir.known_names(), vec!["Florian", "Luc", "Shane"]);
    }

    #[test]
    fn test_resolve_role_defaults() {
        let dir = WalletDirectory::from_config(&test_config());
        assert_eq!(dir.resolve_role("sender").unwrap().address, "rShane111");
        assert_eq!(dir.resolve_role("recipient").unwrap().address, "rLuc222");
        assert_eq!(dir.resolve_role("Florian").unwrap().address, "rFlorian333");
    }

    #[test]
    fn test_resolve_sender_requires_secret() {
        let dir = WalletDirectory::from_config(&test_config());
        assert!(dir.resolve_sender("Shane").is_ok());
        // Florian has an address but no secret
        let err = dir.resolve_sender("Florian").unwrap_err();
        assert!(matches!(err, AppError::WalletNotConfigured(_)));
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = WalletSecret::new("sVerySecret");
        assert_eq!(format!("{:?}", secret), "WalletSecret(***)");
    }

    #[tokio::test]
    async fn test_resolve_recipient_prefers_wallet_directory() {
        let pool = setup_test_db().await;
        let dir = WalletDirectory::from_config(&test_config());

        let resolved = dir.resolve_recipient(&pool, "Luc").await.unwrap();
        assert_eq!(resolved.address(), "rLuc222");
    }

    #[tokio::test]
    async fn test_resolve_recipient_falls_back_to_contacts() {
        let pool = setup_test_db().await;
        ContactRepo::insert(
            &pool,
            NewContact {
                first_name: "Maxime".to_string(),
                last_name: "Durand".to_string(),
                email: "maxime@example.com".to_string(),
                wallet_address: "rMaxime444".to_string(),
                destination_tag: Some("42".to_string()),
            },
        )
        .await
        .unwrap();

        let dir = WalletDirectory::from_config(&test_config());
        let resolved = dir.resolve_recipient(&pool, "Maxime").await.unwrap();
        assert_eq!(resolved.address(), "rMaxime444");
    }

    #[tokio::test]
    async fn test_resolve_recipient_unknown_names_offender() {
        let pool = setup_test_db().await;
        let dir = WalletDirectory::from_config(&test_config());

        let err = dir.resolve_recipient(&pool, "Nobody").await.unwrap_err();
        match err {
            AppError::UnknownRecipient(name) => assert_eq!(name, "Nobody"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
