//! `send_cross_currency` tool: XRP-to-IOU payment through the backend's
//! pathfinding route, using the fixed testnet RLUSD issuer.

use super::ToolDefinition;
use crate::error::{AppError, AppResult};
use crate::payments::{CrossCurrencyRequest, IOU_CURRENCY_RLUSD, IOU_ISSUER_TESTNET};
use crate::web::AppState;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

/// Send-max in XRP the backend may consume for the conversion.
const XRP_SEND_MAX: &str = "1000";

#[derive(Debug, Deserialize)]
pub struct SendCrossCurrencyParams {
    pub iou_amount: String,
    pub destination: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "send_cross_currency",
        description: "Send a cross-currency payment to a recipient",
        parameters: json!({
            "type": "object",
            "properties": {
                "iou_amount": { "type": "string", "description": "IOU amount to deliver" },
                "destination": { "type": "string", "description": "Destination wallet address" }
            },
            "required": ["iou_amount", "destination"]
        }),
    }
}

pub async fn run(
    state: &AppState,
    params: SendCrossCurrencyParams,
) -> AppResult<serde_json::Value> {
    if params.iou_amount.trim().is_empty() {
        return Err(AppError::validation("IOU amount is required"));
    }
    if params.destination.trim().is_empty() {
        return Err(AppError::validation("Destination address is required"));
    }

    let sender = state.directory.resolve_role("sender")?;
    if sender.secret.is_empty() {
        return Err(AppError::WalletNotConfigured(sender.name.clone()));
    }

    info!(
        "Forwarding cross-currency payment: {} RLUSD to {}",
        params.iou_amount, params.destination
    );

    let request = CrossCurrencyRequest {
        xrp_amount: XRP_SEND_MAX.to_string(),
        iou_amount: params.iou_amount,
        destination: params.destination,
        iou_currency: IOU_CURRENCY_RLUSD.to_string(),
        iou_issuer: IOU_ISSUER_TESTNET.to_string(),
        seed: sender.secret.expose().to_string(),
    };

    let result = state.backend.send_cross_currency(&request).await?;

    Ok(json!({
        "success": true,
        "transaction_hash": result.get("hash").cloned().unwrap_or_default(),
        "balance": result.get("balance").cloned().unwrap_or_default(),
        "message": "Cross-currency payment sent successfully",
    }))
}
