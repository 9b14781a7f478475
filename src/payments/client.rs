//! Client for the external payments backend.
//!
//! The backend exposes `/api/payments`, `/api/payments/checks` and
//! `/api/payments/cross`; the tool handlers forward validated payloads to
//! it and surface its JSON responses unchanged.

use crate::config::{endpoint, AppConfig};
use crate::error::{AppError, AppResult};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error};

/// RLUSD currency code (40-char hex) used for cross-currency payments
pub const IOU_CURRENCY_RLUSD: &str = "524C555344000000000000000000000000000000";
/// Testnet RLUSD issuer account
pub const IOU_ISSUER_TESTNET: &str = "rMxCKbEDwqr76QuheSUMdEGf4B9xJ8m5De";

/// Direct XRP payment payload
#[derive(Debug, Serialize)]
pub struct PaymentRequest {
    pub amount: f64,
    pub memo: String,
    pub destination: String,
    pub seed: String,
}

/// Check payment payload
#[derive(Debug, Serialize)]
pub struct CheckRequest {
    pub amount: f64,
    pub memo: String,
    pub destination: String,
    pub invoice_id: String,
    pub seed: String,
}

/// Cross-currency payment payload
#[derive(Debug, Serialize)]
pub struct CrossCurrencyRequest {
    pub xrp_amount: String,
    pub iou_amount: String,
    pub destination: String,
    pub iou_currency: String,
    pub iou_issuer: String,
    pub seed: String,
}

/// HTTP client for the payments backend
pub struct PaymentsBackend {
    http: Client,
    base_url: String,
}

impl std::fmt::Debug for PaymentsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentsBackend")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PaymentsBackend {
    /// Create a new backend client from config
    pub fn new(config: &AppConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.backend.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: config.backend.url.trim_end_matches('/').to_string(),
        }
    }

    /// Forward a direct XRP payment
    pub async fn send_payment(&self, request: &PaymentRequest) -> AppResult<serde_json::Value> {
        self.post("api/payments", request).await
    }

    /// Forward a check payment
    pub async fn send_check(&self, request: &CheckRequest) -> AppResult<serde_json::Value> {
        self.post("api/payments/checks", request).await
    }

    /// Forward a cross-currency payment
    pub async fn send_cross_currency(
        &self,
        request: &CrossCurrencyRequest,
    ) -> AppResult<serde_json::Value> {
        self.post("api/payments/cross", request).await
    }

    /// Single POST round trip; non-2xx responses surface the backend's
    /// error message when it provides one
    async fn post<T: Serialize>(&self, path: &str, body: &T) -> AppResult<serde_json::Value> {
        let url = endpoint(&self.base_url, path);
        debug!("Forwarding payment request to {}", url);

        let response = self.http.post(&url).json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("Failed to process transaction")
                .to_string();
            error!("Payments backend returned {}: {}", status, message);
            return Err(AppError::Backend(message));
        }

        response.json().await.map_err(|e| {
            error!("Failed to parse backend response: {}", e);
            AppError::Backend(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_currency_constants_shape() {
        // 20-byte currency code as hex, classic address issuer
        assert_eq!(IOU_CURRENCY_RLUSD.len(), 40);
        assert!(IOU_ISSUER_TESTNET.starts_with('r'));
    }

    #[test]
    fn test_check_request_serialization() {
        let request = CheckRequest {
            amount: 2.0,
            memo: "for the coffee".to_string(),
            destination: "rDest".to_string(),
            invoice_id: "210".to_string(),
            seed: "sSecret".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["invoice_id"], "210");
        assert_eq!(json["destination"], "rDest");
    }
}
