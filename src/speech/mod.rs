pub mod client;

pub use client::{SpeechClient, Transcription, ALLOWED_AUDIO_TYPES};
