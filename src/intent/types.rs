//! Validated payment intent and transaction result types.

use crate::db::DbPool;
use crate::error::AppResult;
use crate::intent::{memo_to_hex, parse_amount_field, sanitize_memo};
use crate::wallet::{ResolvedRecipient, WalletDirectory, WalletEntry};

/// A fully validated payment intent: both parties resolved, amount in
/// drops, memo sanitized. Constructed per request and discarded after
/// submission.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub sender: WalletEntry,
    pub recipient: ResolvedRecipient,
    pub sender_name: String,
    pub recipient_name: String,
    pub amount_drops: u64,
    pub memo: String,
}

impl PaymentIntent {
    /// Validate a loosely-typed request into a payment intent.
    ///
    /// Amount and memo checks run before any directory lookup so malformed
    /// input never reaches the database or the network.
    pub async fn validate(
        directory: &WalletDirectory,
        pool: &DbPool,
        amount: &serde_json::Value,
        memo: &str,
        sender: &str,
        recipient: &str,
    ) -> AppResult<Self> {
        let amount_drops = parse_amount_field(amount)?;
        let memo = sanitize_memo(memo);

        let sender_entry = directory.resolve_sender(sender)?.clone();
        let recipient_entry = directory.resolve_recipient(pool, recipient).await?;

        Ok(Self {
            sender: sender_entry,
            recipient: recipient_entry,
            sender_name: sender.to_string(),
            recipient_name: recipient.to_string(),
            amount_drops,
            memo,
        })
    }

    /// Memo hex-encoded for the ledger's MemoData field
    pub fn memo_hex(&self) -> String {
        memo_to_hex(&self.memo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{WalletEntryConfig, WalletsConfig};
    use crate::db::setup_test_db;
    use crate::error::AppError;
    use serde_json::json;
    use std::collections::HashMap;

    fn test_directory() -> WalletDirectory {
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
        WalletDirectory::from_config(&WalletsConfig {
            default_sender: "Shane".to_string(),
            default_recipient: "Luc".to_string(),
            entries,
        })
    }

    #[tokio::test]
    async fn test_validate_happy_path() {
        let pool = setup_test_db().await;
        let intent = PaymentIntent::validate(
            &test_directory(),
            &pool,
            &json!("10"),
            "test",
            "Shane",
            "Luc",
        )
        .await
        .unwrap();

        assert_eq!(intent.amount_drops, 10_000_000);
        assert_eq!(intent.memo, "test");
        assert_eq!(intent.memo_hex(), "74657374");
        assert_eq!(intent.sender.address, "rShane111");
        assert_eq!(intent.recipient.address(), "rLuc222");
    }

    #[tokio::test]
    async fn test_validate_rejects_bad_amount_before_lookup() {
        let pool = setup_test_db().await;
        let err = PaymentIntent::validate(
            &test_directory(),
            &pool,
            &json!("not-a-number"),
            "test",
            "Shane",
            "Luc",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_validate_rejects_unknown_recipient() {
        let pool = setup_test_db().await;
        let err = PaymentIntent::validate(
            &test_directory(),
            &pool,
            &json!("10"),
            "test",
            "Shane",
            "Nobody",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::UnknownRecipient(_)));
    }

    #[tokio::test]
    async fn test_validate_truncates_long_memo() {
        let pool = setup_test_db().await;
        let long = "m".repeat(150);
        let intent = PaymentIntent::validate(
            &test_directory(),
            &pool,
            &json!("1"),
            &long,
            "Shane",
            "Luc",
        )
        .await
        .unwrap();
        assert_eq!(intent.memo.chars().count(), 100);
        assert!(intent.memo.ends_with("..."));
    }
}
