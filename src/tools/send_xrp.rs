//! `send_xrp` tool: direct XRP payment between known parties.

use super::ToolDefinition;
use crate::error::{AppError, AppResult};
use crate::intent::{sanitize_memo, MEMO_MAX_CHARS};
use crate::payments::PaymentRequest;
use crate::web::AppState;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

/// Minimum payable amount: one drop.
const MIN_AMOUNT_XRP: f64 = 0.000001;

#[derive(Debug, Deserialize)]
pub struct SendXrpParams {
    pub amount: f64,
    pub recipient: String,
    pub memo: String,
    pub sender: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "send_xrp",
        description: "Send XRP to one of the available wallets",
        parameters: json!({
            "type": "object",
            "properties": {
                "amount": {
                    "type": "number",
                    "minimum": MIN_AMOUNT_XRP,
                    "description": "Amount in XRP"
                },
                "recipient": { "type": "string", "description": "Recipient wallet name" },
                "memo": { "type": "string", "maxLength": MEMO_MAX_CHARS },
                "sender": { "type": "string", "description": "Sender wallet name" }
            },
            "required": ["amount", "recipient", "memo", "sender"]
        }),
    }
}

pub async fn run(state: &AppState, params: SendXrpParams) -> AppResult<serde_json::Value> {
    if !params.amount.is_finite() || params.amount < MIN_AMOUNT_XRP {
        return Err(AppError::validation(
            "Amount must be at least 0.000001 XRP",
        ));
    }
    if params.memo.chars().count() > MEMO_MAX_CHARS {
        return Err(AppError::validation("Memo must be under 100 characters"));
    }

    let sender = state.directory.resolve_sender(&params.sender)?;
    let recipient = state
        .directory
        .resolve_recipient(&state.pool, &params.recipient)
        .await?;

    info!(
        "Forwarding XRP payment: {} -> {} ({} XRP)",
        params.sender, params.recipient, params.amount
    );

    let request = PaymentRequest {
        amount: params.amount,
        memo: sanitize_memo(&params.memo),
        destination: recipient.address().to_string(),
        seed: sender.secret.expose().to_string(),
    };

    state.backend.send_payment(&request).await
}
