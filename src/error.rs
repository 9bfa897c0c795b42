use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::translate::{NormalizationError, ProviderError};

/// Everything that can end a `/translate` request early. Each variant maps to
/// exactly one JSON error response.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Normalization(#[from] NormalizationError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl TranslateError {
    pub fn status(&self) -> StatusCode {
        match self {
            TranslateError::InvalidJson(_) | TranslateError::Normalization(_) => {
                StatusCode::BAD_REQUEST
            }
            TranslateError::Provider(e) => {
                StatusCode::from_u16(e.status()).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

impl IntoResponse for TranslateError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            TranslateError::Provider(ProviderError::Api { status, body }) => json!({
                "error": "DeepL API error",
                "details": body,
                "status": status,
            }),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
