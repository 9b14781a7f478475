//! Client for the ledger submission gateway.
//!
//! The gateway owns signing and the submit-and-wait round trip against the
//! test network; this client sends it one payment object and blocks until
//! the gateway reports inclusion or rejection. There is deliberately no
//! retry: a failed submission is terminal for the request.

use crate::config::{endpoint, AppConfig};
use crate::error::{AppError, AppResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Payment object submitted to the gateway
#[derive(Debug, Serialize)]
pub struct SubmitPaymentRequest {
    /// Sender's ledger address
    pub account: String,
    /// Sender's signing seed
    pub seed: String,
    /// Recipient's ledger address
    pub destination: String,
    /// Amount in drops
    pub amount_drops: u64,
    /// Hex-encoded memo
    pub memo_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<String>,
}

/// Result of a submit-and-wait round trip
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResult {
    pub hash: String,
    /// Final transaction status string (e.g. "tesSUCCESS")
    #[serde(default = "unknown_status")]
    pub status: String,
}

fn unknown_status() -> String {
    "unknown".to_string()
}

/// Gateway health check response
#[derive(Debug, Deserialize)]
pub struct LedgerHealth {
    pub status: String,
    #[serde(default)]
    pub network: String,
}

/// HTTP client for the ledger gateway
pub struct LedgerClient {
    http: Client,
    base_url: String,
    explorer_url: String,
}

impl std::fmt::Debug for LedgerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl LedgerClient {
    /// Create a new ledger client from config
    pub fn new(config: &AppConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.ledger.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: config.ledger.gateway_url.trim_end_matches('/').to_string(),
            explorer_url: config.ledger.explorer_url.trim_end_matches('/').to_string(),
        }
    }

    /// Check if the gateway is reachable
    pub async fn health_check(&self) -> AppResult<LedgerHealth> {
        let url = endpoint(&self.base_url, "health");
        debug!("Checking ledger gateway health at {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            error!("Ledger gateway health check failed: {}", e);
            AppError::LedgerUnavailable
        })?;

        if !response.status().is_success() {
            return Err(AppError::LedgerUnavailable);
        }

        response.json().await.map_err(|e| {
            error!("Failed to parse gateway health response: {}", e);
            AppError::LedgerUnavailable
        })
    }

    /// Submit a payment and wait for the gateway's final status.
    /// Single blocking round trip; any gateway failure propagates as-is.
    pub async fn submit_payment(&self, request: &SubmitPaymentRequest) -> AppResult<SubmitResult> {
        let url = endpoint(&self.base_url, "submit");
        debug!(
            "Submitting payment: {} -> {} ({} drops)",
            request.account, request.destination, request.amount_drops
        );

        let response = self.http.post(&url).json(request).send().await.map_err(|e| {
            error!("Ledger submission request failed: {}", e);
            AppError::LedgerUnavailable
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Ledger submission failed with status {}: {}", status, body);
            return Err(AppError::Ledger(format!("Gateway returned {}", status)));
        }

        response.json().await.map_err(|e| {
            error!("Failed to parse gateway submit response: {}", e);
            AppError::Ledger(e.to_string())
        })
    }

    /// Explorer link for a transaction hash
    pub fn explorer_link(&self, hash: &str) -> String {
        format!("{}/transactions/{}", self.explorer_url, hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_serialization_skips_absent_tag() {
        let request = SubmitPaymentRequest {
            account: "rShane111".to_string(),
            seed: "sSecret".to_string(),
            destination: "rLuc222".to_string(),
            amount_drops: 10_000_000,
            memo_data: "74657374".to_string(),
            destination_tag: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("10000000"));
        assert!(json.contains("74657374"));
        assert!(!json.contains("destination_tag"));
    }

    #[test]
    fn test_submit_result_defaults_status() {
        let result: SubmitResult = serde_json::from_str(r#"{"hash": "ABC"}"#).unwrap();
        assert_eq!(result.hash, "ABC");
        assert_eq!(result.status, "unknown");
    }
}
