//! Transaction endpoints: confirm, preview (intent extraction), and the
//! generic memo-then-send route.

use crate::db::{IntentRepo, IntentStatus, PaymentIntentRecord};
use crate::error::{AppError, AppResult};
use crate::intent::{PaymentIntent, DROPS_PER_XRP};
use crate::ledger::SubmitPaymentRequest;
use crate::wallet::ResolvedRecipient;
use crate::web::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Confirm request body
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    #[serde(default)]
    pub amount: serde_json::Value,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    /// Client-supplied idempotency key; generated when absent
    #[serde(default)]
    pub intent_key: Option<String>,
}

/// Confirm response body
#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub tx_hash: String,
    pub explorer: String,
    pub status: String,
    pub intent_key: String,
}

/// Validate, persist, submit and wait for a payment.
///
/// Intent lifecycle: Validated -> Submitted -> Confirmed | Failed. The
/// move into Submitted is a single atomic claim, so concurrent confirms
/// with the same key produce exactly one ledger submission. A resubmitted
/// key returns the recorded result for Confirmed intents and conflicts
/// for in-flight ones.
pub async fn confirm(
    State(state): State<AppState>,
    Json(request): Json<ConfirmRequest>,
) -> AppResult<Json<ConfirmResponse>> {
    let memo = request
        .memo
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::validation("Amount and memo are required"))?;

    let sender = request.sender.as_deref().unwrap_or("sender");
    let recipient = request.recipient.as_deref().unwrap_or("recipient");

    let intent = PaymentIntent::validate(
        &state.directory,
        &state.pool,
        &request.amount,
        memo,
        sender,
        recipient,
    )
    .await?;

    let intent_key = request
        .intent_key
        .unwrap_or_else(PaymentIntentRecord::generate_intent_key);

    IntentRepo::record_validated(
        &state.pool,
        &intent_key,
        &intent.sender_name,
        &intent.recipient_name,
        intent.amount_drops as i64,
        &intent.memo,
    )
    .await?;

    // Single atomic transition into Submitted; losers of the claim never
    // reach the gateway
    let claimed = IntentRepo::claim_for_submission(
        &state.pool,
        &intent_key,
        &intent.sender_name,
        &intent.recipient_name,
        intent.amount_drops as i64,
        &intent.memo,
    )
    .await?;

    if !claimed {
        let record = IntentRepo::get_by_key(&state.pool, &intent_key)
            .await?
            .ok_or_else(|| AppError::internal("Recorded intent is missing"))?;

        if record.status() == IntentStatus::Confirmed {
            // Idempotent replay: return the recorded result, no second
            // ledger call
            let tx_hash = record
                .tx_hash
                .ok_or_else(|| AppError::internal("Confirmed intent is missing its hash"))?;
            info!("Intent {} already confirmed, replaying result", intent_key);
            return Ok(Json(ConfirmResponse {
                explorer: state.ledger.explorer_link(&tx_hash),
                tx_hash,
                status: record.result_status.unwrap_or_else(|| "unknown".to_string()),
                intent_key,
            }));
        }
        return Err(AppError::IntentInFlight);
    }

    let destination_tag = match &intent.recipient {
        ResolvedRecipient::Contact {
            destination_tag, ..
        } => destination_tag.clone(),
        ResolvedRecipient::Wallet(_) => None,
    };

    let submit = SubmitPaymentRequest {
        account: intent.sender.address.clone(),
        seed: intent.sender.secret.expose().to_string(),
        destination: intent.recipient.address().to_string(),
        amount_drops: intent.amount_drops,
        memo_data: intent.memo_hex(),
        destination_tag,
    };

    let result = match state.ledger.submit_payment(&submit).await {
        Ok(result) => result,
        Err(e) => {
            error!("Ledger submission failed for intent {}: {}", intent_key, e);
            if let Err(mark_err) = IntentRepo::mark_failed(&state.pool, &intent_key).await {
                warn!("Failed to mark intent {} as failed: {}", intent_key, mark_err);
            }
            return Err(e);
        }
    };

    IntentRepo::mark_confirmed(&state.pool, &intent_key, &result.hash, &result.status).await?;

    info!(
        "Payment confirmed: {} -> {} ({} drops), hash {}",
        intent.sender_name, intent.recipient_name, intent.amount_drops, result.hash
    );

    Ok(Json(ConfirmResponse {
        explorer: state.ledger.explorer_link(&result.hash),
        tx_hash: result.hash,
        status: result.status,
        intent_key,
    }))
}

/// Preview request body
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub memo_input: String,
}

/// Preview response body: the extracted intent, nothing submitted
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub amount: f64,
    pub recipient: String,
    pub memo: String,
}

/// Extract `{amount, recipient, memo}` from free text via the model.
/// No transaction is attempted from this endpoint.
pub async fn preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> AppResult<Json<PreviewResponse>> {
    let mut known = state.directory.known_names();
    known.extend(state.contacts.known_first_names().await);

    let extracted = state.model.extract_intent(&request.memo_input, &known).await?;

    // The model's recipient must still resolve against what we know
    if !known
        .iter()
        .any(|name| name.eq_ignore_ascii_case(&extracted.recipient))
    {
        return Err(AppError::UnknownRecipient(extracted.recipient));
    }

    Ok(Json(PreviewResponse {
        amount: extracted.amount,
        recipient: extracted.recipient,
        memo: extracted.memo,
    }))
}

/// Generic transaction request body
#[derive(Debug, Deserialize)]
pub struct GenericRequest {
    pub memo_input: String,
    #[serde(default = "default_wallet_role")]
    pub wallet_role: String,
}

fn default_wallet_role() -> String {
    "sender".to_string()
}

/// Generic transaction response body
#[derive(Debug, Serialize)]
pub struct GenericResponse {
    pub memo: String,
    pub tx_hash: String,
    pub explorer: String,
    pub status: String,
}

/// Fixed amount the generic route sends between the two role wallets.
const GENERIC_AMOUNT_XRP: u64 = 10;

/// Ask the model for a short memo, then send a fixed 10 XRP payment
/// between the configured role wallets
pub async fn generic(
    State(state): State<AppState>,
    Json(request): Json<GenericRequest>,
) -> AppResult<Json<GenericResponse>> {
    let memo = state.model.generate_memo(&request.memo_input).await?;

    let is_sender = request.wallet_role.eq_ignore_ascii_case("sender");
    let (from_role, to_role) = if is_sender {
        ("sender", "recipient")
    } else {
        ("recipient", "sender")
    };

    let from = state.directory.resolve_sender(from_role)?.clone();
    let to = state.directory.resolve_role(to_role)?;
    if to.address.is_empty() {
        return Err(AppError::WalletNotConfigured(to.name.clone()));
    }

    let submit = SubmitPaymentRequest {
        account: from.address.clone(),
        seed: from.secret.expose().to_string(),
        destination: to.address.clone(),
        amount_drops: GENERIC_AMOUNT_XRP * DROPS_PER_XRP,
        memo_data: crate::intent::memo_to_hex(&memo),
        destination_tag: None,
    };

    let result = state.ledger.submit_payment(&submit).await?;

    Ok(Json(GenericResponse {
        memo,
        explorer: state.ledger.explorer_link(&result.hash),
        tx_hash: result.hash,
        status: result.status,
    }))
}
