//! Client for the external speech service (transcription + synthesis).
//!
//! Thin wrapper over an OpenAI-compatible audio API; treated as an external
//! collaborator, not core logic.

use crate::config::{endpoint, AppConfig};
use crate::error::{AppError, AppResult};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

/// Audio content types accepted for transcription
pub const ALLOWED_AUDIO_TYPES: &[&str] = &["audio/m4a", "audio/webm", "audio/wav", "audio/mp3"];

/// Transcription response
#[derive(Debug, Deserialize)]
pub struct Transcription {
    pub text: String,
}

/// HTTP client for the speech service
pub struct SpeechClient {
    http: Client,
    base_url: String,
    api_key: String,
    transcription_model: String,
    tts_model: String,
    tts_voice: String,
}

impl std::fmt::Debug for SpeechClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechClient")
            .field("base_url", &self.base_url)
            .field("transcription_model", &self.transcription_model)
            .field("tts_model", &self.tts_model)
            .finish_non_exhaustive()
    }
}

impl SpeechClient {
    /// Create a new speech client from config
    pub fn new(config: &AppConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.speech.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: config.speech.url.trim_end_matches('/').to_string(),
            api_key: config.speech.api_key.clone(),
            transcription_model: config.speech.transcription_model.clone(),
            tts_model: config.speech.tts_model.clone(),
            tts_voice: config.speech.tts_voice.clone(),
        }
    }

    /// Transcribe an audio file to text
    pub async fn transcribe(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> AppResult<Transcription> {
        let url = endpoint(&self.base_url, "audio/transcriptions");
        debug!("Transcribing {} ({} bytes)", file_name, data.len());

        let part = Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| AppError::Speech(e.to_string()))?;

        let form = Form::new()
            .part("file", part)
            .text("model", self.transcription_model.clone())
            .text("response_format", "verbose_json");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            error!("Transcription failed with status {}", status);
            return Err(AppError::Speech(format!("Service returned {}", status)));
        }

        let transcription: Transcription = response.json().await.map_err(|e| {
            error!("Failed to parse transcription response: {}", e);
            AppError::Speech(e.to_string())
        })?;

        if transcription.text.is_empty() {
            return Err(AppError::Speech("No transcription generated".to_string()));
        }

        Ok(transcription)
    }

    /// Synthesize text to WAV bytes
    pub async fn synthesize(&self, text: &str) -> AppResult<Vec<u8>> {
        let url = endpoint(&self.base_url, "audio/speech");
        debug!("Synthesizing {} chars of text", text.len());

        let body = serde_json::json!({
            "model": self.tts_model,
            "voice": self.tts_voice,
            "response_format": "wav",
            "input": text,
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            error!("Speech synthesis failed with status {}", status);
            return Err(AppError::Speech(format!("Service returned {}", status)));
        }

        let bytes = response.bytes().await.map_err(|e| {
            error!("Failed to read synthesized audio: {}", e);
            AppError::Speech(e.to_string())
        })?;

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_audio_types() {
        assert!(ALLOWED_AUDIO_TYPES.contains(&"audio/webm"));
        assert!(!ALLOWED_AUDIO_TYPES.contains(&"video/mp4"));
    }
}
