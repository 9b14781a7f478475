use crate::db::models::*;
use crate::error::{AppError, AppResult};
use chrono::Utc;
use sqlx::{Pool, Sqlite};
use tracing::info;

pub type DbPool = Pool<Sqlite>;

/// Contact listings are bounded; there is no pagination beyond this.
pub const CONTACT_LIST_LIMIT: i64 = 10;

/// Database operations for contacts
pub struct ContactRepo;

impl ContactRepo {
    /// Get contact by wallet address
    pub async fn get_by_wallet_address(
        pool: &DbPool,
        wallet_address: &str,
    ) -> AppResult<Option<Contact>> {
        let contact =
            sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE wallet_address = ?")
                .bind(wallet_address)
                .fetch_optional(pool)
                .await?;

        Ok(contact)
    }

    /// Look up a contact by first name (case-insensitive), used for
    /// recipient resolution when a name is not in the wallet directory
    pub async fn get_by_first_name(pool: &DbPool, name: &str) -> AppResult<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(
            "SELECT * FROM contacts WHERE LOWER(first_name) = LOWER(?) LIMIT 1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(contact)
    }

    /// Insert a new contact, enforcing wallet address uniqueness.
    /// A duplicate address is a conflict and performs no insert.
    pub async fn insert(pool: &DbPool, new_contact: NewContact) -> AppResult<Contact> {
        if Self::get_by_wallet_address(pool, &new_contact.wallet_address)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateContact);
        }

        sqlx::query(
            r#"
            INSERT INTO contacts (first_name, last_name, email, wallet_address, destination_tag, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new_contact.first_name)
        .bind(&new_contact.last_name)
        .bind(&new_contact.email)
        .bind(&new_contact.wallet_address)
        .bind(&new_contact.destination_tag)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        Self::get_by_wallet_address(pool, &new_contact.wallet_address)
            .await?
            .ok_or_else(|| AppError::internal("Failed to retrieve created contact"))
    }

    /// Bounded contact list, oldest first
    pub async fn list(pool: &DbPool) -> AppResult<Vec<Contact>> {
        let contacts =
            sqlx::query_as::<_, Contact>("SELECT * FROM contacts ORDER BY id LIMIT ?")
                .bind(CONTACT_LIST_LIMIT)
                .fetch_all(pool)
                .await?;

        Ok(contacts)
    }
}

/// Database operations for payment intents
pub struct IntentRepo;

impl IntentRepo {
    /// Get intent by idempotency key
    pub async fn get_by_key(pool: &DbPool, intent_key: &str) -> AppResult<Option<PaymentIntentRecord>> {
        let intent = sqlx::query_as::<_, PaymentIntentRecord>(
            "SELECT * FROM payment_intents WHERE intent_key = ?",
        )
        .bind(intent_key)
        .fetch_optional(pool)
        .await?;

        Ok(intent)
    }

    /// Record a validated intent. If the key already exists the stored row
    /// is returned unchanged so the caller can apply the idempotency rules.
    pub async fn record_validated(
        pool: &DbPool,
        intent_key: &str,
        sender: &str,
        recipient: &str,
        amount_drops: i64,
        memo: &str,
    ) -> AppResult<PaymentIntentRecord> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO payment_intents (intent_key, sender, recipient, amount_drops, memo, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 'validated', ?, ?)
            ON CONFLICT(intent_key) DO NOTHING
            "#,
        )
        .bind(intent_key)
        .bind(sender)
        .bind(recipient)
        .bind(amount_drops)
        .bind(memo)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

        Self::get_by_key(pool, intent_key)
            .await?
            .ok_or_else(|| AppError::internal("Failed to retrieve recorded intent"))
    }

    /// Atomically move an intent into Submitted, refreshing its payload to
    /// the current request's values. Returns false when the intent is not
    /// in a resubmittable state, so concurrent confirms with the same key
    /// cannot both reach the ledger.
    pub async fn claim_for_submission(
        pool: &DbPool,
        intent_key: &str,
        sender: &str,
        recipient: &str,
        amount_drops: i64,
        memo: &str,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE payment_intents
            SET status = 'submitted', sender = ?, recipient = ?, amount_drops = ?, memo = ?, updated_at = ?
            WHERE intent_key = ? AND status IN ('validated', 'failed')
            "#,
        )
        .bind(sender)
        .bind(recipient)
        .bind(amount_drops)
        .bind(memo)
        .bind(Utc::now())
        .bind(intent_key)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Mark an intent as confirmed, recording the transaction hash and the
    /// ledger's final status string
    pub async fn mark_confirmed(
        pool: &DbPool,
        intent_key: &str,
        tx_hash: &str,
        result_status: &str,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE payment_intents
            SET status = 'confirmed', tx_hash = ?, result_status = ?, updated_at = ?
            WHERE intent_key = ?
            "#,
        )
        .bind(tx_hash)
        .bind(result_status)
        .bind(Utc::now())
        .bind(intent_key)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark an intent as failed so the key can be resubmitted later
    pub async fn mark_failed(pool: &DbPool, intent_key: &str) -> AppResult<()> {
        Self::set_status(pool, intent_key, IntentStatus::Failed).await
    }

    async fn set_status(pool: &DbPool, intent_key: &str, status: IntentStatus) -> AppResult<()> {
        sqlx::query("UPDATE payment_intents SET status = ?, updated_at = ? WHERE intent_key = ?")
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(intent_key)
            .execute(pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
pub async fn setup_test_db() -> DbPool {
    use sqlx::sqlite::SqlitePoolOptions;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    init_db(&pool).await.expect("Failed to init database");
    pool
}

/// Initialize database with migrations
pub async fn init_db(pool: &DbPool) -> AppResult<()> {
    info!("Running database migrations");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL,
            wallet_address TEXT UNIQUE NOT NULL,
            destination_tag TEXT,
            created_at DATETIME NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS payment_intents (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            intent_key TEXT UNIQUE NOT NULL,
            sender TEXT NOT NULL,
            recipient TEXT NOT NULL,
            amount_drops INTEGER NOT NULL,
            memo TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'validated',
            tx_hash TEXT,
            result_status TEXT,
            created_at DATETIME NOT NULL,
            updated_at DATETIME NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_contacts_wallet ON contacts(wallet_address)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_intents_key ON payment_intents(intent_key)")
        .execute(pool)
        .await?;

    info!("Database migrations complete");
    Ok(())
}
