//! Client for the chat-completion model service.
//!
//! Free-form chat text goes in, a structured payment intent comes out.
//! Decoding is schema-constrained and fails closed: the model's reply must
//! deserialize into the strict extraction struct or the request fails.

use crate::config::{endpoint, AppConfig};
use crate::error::{AppError, AppResult};
use crate::intent::sanitize_memo;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Chat completion request body (OpenAI-compatible)
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Chat completion response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Structured intent extracted from free text.
///
/// `deny_unknown_fields` keeps the decode strict: a reply that does not
/// match this shape exactly is a parse failure, not a best-effort guess.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExtractedIntent {
    pub amount: f64,
    pub recipient: String,
    pub memo: String,
}

/// Client for the chat-completion service
pub struct ModelClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl std::fmt::Debug for ModelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl ModelClient {
    /// Create a new model client from config
    pub fn new(config: &AppConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.model.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: config.model.url.trim_end_matches('/').to_string(),
            api_key: config.model.api_key.clone(),
            model: config.model.model.clone(),
            temperature: config.model.temperature,
        }
    }

    /// Extract `{amount, recipient, memo}` from free-form text.
    ///
    /// `known_recipients` is the set of names the prompt offers the model;
    /// the caller still validates the returned recipient against the
    /// directory.
    pub async fn extract_intent(
        &self,
        memo_input: &str,
        known_recipients: &[String],
    ) -> AppResult<ExtractedIntent> {
        let prompt = extraction_prompt(memo_input, known_recipients);
        let content = self.complete(prompt).await?;

        parse_extraction(&content)
    }

    /// Generate a short payment memo (<100 chars) for free-form text
    pub async fn generate_memo(&self, memo_input: &str) -> AppResult<String> {
        let prompt = format!(
            "Generate a short (under 100 characters) XRP payment memo for this input: \"{}\". Only return the memo.",
            memo_input
        );
        let content = self.complete(prompt).await?;
        Ok(sanitize_memo(&content))
    }

    /// Single chat-completion round trip, returning the first choice's content
    async fn complete(&self, prompt: String) -> AppResult<String> {
        let url = endpoint(&self.base_url, "chat/completions");
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        debug!("Requesting completion from {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Model request failed: {}", e);
                AppError::ModelUnavailable
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Model service returned {}: {}", status, body);
            return Err(AppError::Extraction(format!("Service returned {}", status)));
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            error!("Failed to parse completion response: {}", e);
            AppError::Extraction(e.to_string())
        })?;

        let content = completion
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .unwrap_or_default();

        if content.is_empty() {
            return Err(AppError::Extraction("No content in model response".to_string()));
        }

        Ok(content.to_string())
    }
}

/// Prompt asking the model for a strict JSON intent
fn extraction_prompt(memo_input: &str, known_recipients: &[String]) -> String {
    format!(
        "From this input: \"{}\", extract:\n\
         1. Amount in XRP (number only),\n\
         2. Recipient name ({}),\n\
         3. A short XRP memo under 100 characters.\n\n\
         Respond ONLY in this JSON format:\n\
         {{ \"amount\": 20, \"recipient\": \"Shane\", \"memo\": \"Payment for web hosting\" }}",
        memo_input,
        known_recipients.join(", ")
    )
}

/// Strict decode of the model's reply. Fails closed on any deviation.
fn parse_extraction(content: &str) -> AppResult<ExtractedIntent> {
    let intent: ExtractedIntent = serde_json::from_str(content)
        .map_err(|e| AppError::Extraction(format!("Failed to parse model response: {}", e)))?;

    if !intent.amount.is_finite() || intent.amount <= 0.0 {
        return Err(AppError::Extraction(
            "Model returned a non-positive amount".to_string(),
        ));
    }

    Ok(intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extraction_valid() {
        let intent = parse_extraction(
            r#"{ "amount": 20, "recipient": "Shane", "memo": "Payment for web hosting" }"#,
        )
        .unwrap();
        assert_eq!(intent.amount, 20.0);
        assert_eq!(intent.recipient, "Shane");
        assert_eq!(intent.memo, "Payment for web hosting");
    }

    #[test]
    fn test_parse_extraction_rejects_prose() {
        let err = parse_extraction("Sure! Here is the JSON you asked for: ...").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_parse_extraction_rejects_extra_fields() {
        let err = parse_extraction(
            r#"{ "amount": 20, "recipient": "Shane", "memo": "hi", "note": "extra" }"#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_parse_extraction_rejects_missing_fields() {
        let err = parse_extraction(r#"{ "amount": 20 }"#).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_parse_extraction_rejects_non_positive_amount() {
        let err =
            parse_extraction(r#"{ "amount": 0, "recipient": "Shane", "memo": "x" }"#).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
        let err =
            parse_extraction(r#"{ "amount": -3, "recipient": "Shane", "memo": "x" }"#).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_extraction_prompt_lists_recipients() {
        let prompt = extraction_prompt(
            "send luc ten bucks",
            &["Luc".to_string(), "Shane".to_string()],
        );
        assert!(prompt.contains("Luc, Shane"));
        assert!(prompt.contains("send luc ten bucks"));
    }
}
