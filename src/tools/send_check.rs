//! `send_check` tool: ledger check payment with an invoice reference.

use super::ToolDefinition;
use crate::error::{AppError, AppResult};
use crate::intent::{sanitize_memo, MEMO_MAX_CHARS};
use crate::payments::CheckRequest;
use crate::web::AppState;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

/// Checks are denominated in USD; minimum one cent.
const MIN_AMOUNT_USD: f64 = 0.01;

#[derive(Debug, Deserialize)]
pub struct SendCheckParams {
    pub amount: f64,
    /// Destination wallet address
    pub recipient: String,
    pub memo: String,
    pub invoice_id: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "send_check",
        description: "Send a check to a wallet address",
        parameters: json!({
            "type": "object",
            "properties": {
                "amount": {
                    "type": "number",
                    "minimum": MIN_AMOUNT_USD,
                    "description": "Amount in USD"
                },
                "recipient": { "type": "string", "description": "Destination wallet address" },
                "memo": { "type": "string", "maxLength": MEMO_MAX_CHARS },
                "invoice_id": { "type": "string", "minLength": 1 }
            },
            "required": ["amount", "recipient", "memo", "invoice_id"]
        }),
    }
}

pub async fn run(state: &AppState, params: SendCheckParams) -> AppResult<serde_json::Value> {
    if !params.amount.is_finite() || params.amount < MIN_AMOUNT_USD {
        return Err(AppError::validation("Amount must be at least $0.01"));
    }
    if params.memo.chars().count() > MEMO_MAX_CHARS {
        return Err(AppError::validation("Memo must be under 100 characters"));
    }
    if params.invoice_id.trim().is_empty() {
        return Err(AppError::validation("Invoice ID is required"));
    }
    if params.recipient.trim().is_empty() {
        return Err(AppError::validation("Recipient address is required"));
    }

    // Checks always draw from the configured default sender
    let sender = state.directory.resolve_role("sender")?;
    if sender.address.is_empty() || sender.secret.is_empty() {
        return Err(AppError::WalletNotConfigured(sender.name.clone()));
    }

    info!(
        "Forwarding check: {} USD to {} (invoice {})",
        params.amount, params.recipient, params.invoice_id
    );

    let request = CheckRequest {
        amount: params.amount,
        memo: sanitize_memo(&params.memo),
        destination: params.recipient,
        invoice_id: params.invoice_id,
        seed: sender.secret.expose().to_string(),
    };

    state.backend.send_check(&request).await
}
