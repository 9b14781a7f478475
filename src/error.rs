use thiserror::Error;

/// Application-wide error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Recipient \"{0}\" not recognized")]
    UnknownRecipient(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Wallet \"{0}\" not properly configured")]
    WalletNotConfigured(String),

    #[error("A contact with this wallet address already exists")]
    DuplicateContact,

    #[error("Payment intent is already in flight")]
    IntentInFlight,

    #[error("Failed to extract transaction details: {0}")]
    Extraction(String),

    #[error("Ledger submission failed: {0}")]
    Ledger(String),

    #[error("Payments backend error: {0}")]
    Backend(String),

    #[error("Speech service error: {0}")]
    Speech(String),

    #[error("Model service unavailable")]
    ModelUnavailable,

    #[error("Ledger gateway unavailable")]
    LedgerUnavailable,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convert AppError to HTTP status codes for web responses
impl AppError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UnknownRecipient(_) => StatusCode::BAD_REQUEST,
            Self::UnknownTool(_) => StatusCode::BAD_REQUEST,
            Self::WalletNotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::DuplicateContact => StatusCode::CONFLICT,
            Self::IntentInFlight => StatusCode::CONFLICT,
            Self::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Ledger(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Speech(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::LedgerUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.to_string(),
            "code": status.as_u16()
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_validation_errors_are_client_errors() {
        assert_eq!(
            AppError::validation("bad amount").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UnknownRecipient("Bob".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_configuration_and_extraction_errors_are_server_errors() {
        assert_eq!(
            AppError::WalletNotConfigured("Shane".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Extraction("parse failure".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_duplicate_contact_is_conflict() {
        assert_eq!(AppError::DuplicateContact.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_unknown_recipient_message_names_recipient() {
        let err = AppError::UnknownRecipient("Maxime".into());
        assert!(err.to_string().contains("Maxime"));
    }
}
