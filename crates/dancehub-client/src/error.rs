//! Backend request failures and their user-facing messages.

use anyhow::anyhow;
use dancehub_core::AppError;
use reqwest::StatusCode;
use serde_json::Value;

pub const GENERIC_FAILURE_MESSAGE: &str = "The request could not be completed. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The backend could not be reached or the connection broke.
    #[error("Backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Backend responded {status}: {}", .messages.join(", "))]
    Status {
        status: StatusCode,
        messages: Vec<String>,
    },

    /// A success response whose body did not match the expected shape.
    #[error("Unexpected backend payload: {0}")]
    Decode(String),
}

impl ClientError {
    /// Builds a status error from a raw response body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        Self::Status {
            status,
            messages: failure_messages(body),
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status(),
            ClientError::Decode(_) => None,
        }
    }

    /// Message shown to the user: the backend's messages when it sent any,
    /// otherwise a generic fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Status { messages, .. } if !messages.is_empty() => messages.join(", "),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Extracts messages from an error body.
///
/// Accepts `{"message": [..]}`, `{"message": ".."}`, `{"errors": [..]}` and
/// `{"error": ".."}`. Anything else yields an empty list.
#[must_use]
pub fn failure_messages(body: &str) -> Vec<String> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Vec::new();
    };

    for key in ["message", "errors", "error"] {
        match value.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return vec![s.trim().to_string()],
            Some(Value::Array(items)) => {
                let messages: Vec<String> = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.trim().to_string()),
                        Value::Object(obj) => obj
                            .get("message")
                            .and_then(Value::as_str)
                            .map(|s| s.trim().to_string()),
                        _ => None,
                    })
                    .filter(|s| !s.is_empty())
                    .collect();
                if !messages.is_empty() {
                    return messages;
                }
            }
            _ => {}
        }
    }

    Vec::new()
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let message = err.user_message();
        match &err {
            ClientError::Transport(source) => {
                tracing::warn!(error = %source, "Backend transport failure");
                AppError::bad_gateway(message)
            }
            ClientError::Decode(detail) => {
                tracing::error!(detail = %detail, "Backend payload mismatch");
                AppError::bad_gateway(message)
            }
            ClientError::Status { status, .. } => match *status {
                StatusCode::UNAUTHORIZED => AppError::unauthorized(message),
                StatusCode::FORBIDDEN => AppError::forbidden(message),
                StatusCode::NOT_FOUND => AppError::not_found(anyhow!(message)),
                s if s.is_client_error() => AppError::new(s, anyhow!(message)),
                _ => {
                    tracing::warn!(status = %status, "Backend server error");
                    AppError::bad_gateway(message)
                }
            },
        }
    }
}
