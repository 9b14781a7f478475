use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A saved payment contact
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub wallet_address: String,
    pub destination_tag: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// Display name used in contact listings and the extraction prompt
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// New contact creation request
#[derive(Debug, Clone, Deserialize)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub wallet_address: String,
    #[serde(default)]
    pub destination_tag: Option<String>,
}

/// Lifecycle of a persisted payment intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentStatus {
    Validated,
    Submitted,
    Confirmed,
    Failed,
}

impl IntentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validated => "validated",
            Self::Submitted => "submitted",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "submitted" => Self::Submitted,
            "confirmed" => Self::Confirmed,
            "failed" => Self::Failed,
            _ => Self::Validated,
        }
    }

    /// Whether a new submission attempt is allowed from this state
    pub fn allows_resubmission(&self) -> bool {
        matches!(self, Self::Validated | Self::Failed)
    }
}

impl std::fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted payment intent row
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PaymentIntentRecord {
    pub id: i64,
    /// Client-supplied idempotency key
    pub intent_key: String,
    pub sender: String,
    pub recipient: String,
    pub amount_drops: i64,
    pub memo: String,
    pub status: String,
    pub tx_hash: Option<String>,
    pub result_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentIntentRecord {
    pub fn status(&self) -> IntentStatus {
        IntentStatus::from_str(&self.status)
    }

    pub fn generate_intent_key() -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- IntentStatus tests ---

    #[test]
    fn test_intent_status_round_trip() {
        for status in [
            IntentStatus::Validated,
            IntentStatus::Submitted,
            IntentStatus::Confirmed,
            IntentStatus::Failed,
        ] {
            assert_eq!(IntentStatus::from_str(status.as_str()), status);
        }
    }

    #[test]
    fn test_intent_status_unknown_defaults_to_validated() {
        assert_eq!(IntentStatus::from_str("garbage"), IntentStatus::Validated);
        assert_eq!(IntentStatus::from_str(""), IntentStatus::Validated);
    }

    #[test]
    fn test_intent_status_case_insensitive() {
        assert_eq!(IntentStatus::from_str("CONFIRMED"), IntentStatus::Confirmed);
        assert_eq!(IntentStatus::from_str("Submitted"), IntentStatus::Submitted);
    }

    #[test]
    fn test_resubmission_rules() {
        assert!(IntentStatus::Validated.allows_resubmission());
        assert!(IntentStatus::Failed.allows_resubmission());
        assert!(!IntentStatus::Submitted.allows_resubmission());
        assert!(!IntentStatus::Confirmed.allows_resubmission());
    }

    #[test]
    fn test_intent_status_display() {
        assert_eq!(format!("{}", IntentStatus::Confirmed), "confirmed");
    }

    // --- Contact tests ---

    #[test]
    fn test_contact_display_name() {
        let contact = Contact {
            id: 1,
            first_name: "Luc".to_string(),
            last_name: "Moreau".to_string(),
            email: "luc@example.com".to_string(),
            wallet_address: "rLuc123".to_string(),
            destination_tag: None,
            created_at: Utc::now(),
        };
        assert_eq!(contact.display_name(), "Luc Moreau");
    }

    #[test]
    fn test_generate_intent_key_uniqueness() {
        let k1 = PaymentIntentRecord::generate_intent_key();
        let k2 = PaymentIntentRecord::generate_intent_key();
        assert_ne!(k1, k2);
        assert_eq!(k1.len(), 36);
    }
}
