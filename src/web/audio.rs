//! Audio endpoints: transcription upload, speech synthesis, file deletion.
//! Thin wrappers over the speech service; the only logic here is input
//! validation and audio-file bookkeeping.

use crate::error::{AppError, AppResult};
use crate::speech::ALLOWED_AUDIO_TYPES;
use crate::web::AppState;
use axum::{
    extract::{Multipart, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Transcription response body
#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub text: String,
}

/// Transcribe an uploaded audio file
pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<TranscribeResponse>> {
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(e.to_string()))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("audio").to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(e.to_string()))?;
            file = Some((file_name, content_type, data.to_vec()));
        }
    }

    let (file_name, content_type, data) =
        file.ok_or_else(|| AppError::validation("No file provided"))?;

    if data.is_empty() {
        return Err(AppError::validation("Empty audio file"));
    }
    if !ALLOWED_AUDIO_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::validation("Unsupported audio format"));
    }

    debug!(
        "Transcribing upload: name={}, type={}, size={}",
        file_name,
        content_type,
        data.len()
    );

    let transcription = state.speech.transcribe(&file_name, &content_type, data).await?;

    Ok(Json(TranscribeResponse {
        text: transcription.text,
    }))
}

/// Synthesis request body
#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    pub text: String,
}

/// Synthesis response body
#[derive(Debug, Serialize)]
pub struct SynthesizeResponse {
    pub url: String,
}

/// Synthesize text to a WAV file served from the audio directory
pub async fn synthesize(
    State(state): State<AppState>,
    Json(request): Json<SynthesizeRequest>,
) -> AppResult<Json<SynthesizeResponse>> {
    if request.text.trim().is_empty() {
        return Err(AppError::validation("Text is required"));
    }

    let wav = state.speech.synthesize(&request.text).await?;

    let filename = format!("speech-{}.wav", chrono::Utc::now().timestamp_millis());
    let path = state.audio_dir.join(&filename);

    tokio::fs::create_dir_all(&state.audio_dir)
        .await
        .map_err(|e| AppError::internal(format!("Failed to create audio directory: {}", e)))?;
    tokio::fs::write(&path, &wav)
        .await
        .map_err(|e| AppError::internal(format!("Failed to write audio file: {}", e)))?;

    info!("Synthesized audio written to {}", path.display());

    Ok(Json(SynthesizeResponse {
        url: format!("/audio/{}", filename),
    }))
}

/// Deletion request body
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub filename: String,
}

/// Delete a synthesized audio file. Missing files are not an error.
pub async fn delete(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> AppResult<Json<serde_json::Value>> {
    // Strip any path components so deletion stays inside the audio dir
    let bare_name = Path::new(&request.filename)
        .file_name()
        .ok_or_else(|| AppError::validation("Invalid filename"))?;

    let path = state.audio_dir.join(bare_name);

    match tokio::fs::remove_file(&path).await {
        Ok(()) => info!("Deleted audio file {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Audio file already absent: {}", path.display());
        }
        Err(e) => {
            return Err(AppError::internal(format!(
                "Failed to delete audio file: {}",
                e
            )));
        }
    }

    Ok(Json(serde_json::json!({ "success": true })))
}
