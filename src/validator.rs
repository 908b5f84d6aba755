//! JSON body extractor that runs `validator` rules before the handler.
//!
//! Request DTOs are `camelCase` on the wire, so every field named in an error
//! message uses the wire name rather than the Rust one.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use dancehub_core::AppError;

/// `permission_codes` -> `permissionCodes`.
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn format_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            let name = wire_name(&field);
            errors.iter().map(move |error| match &error.message {
                Some(msg) => format!("{name}: {msg}"),
                None => format!("{name} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// The backtick-quoted field in serde's "missing field `x`" message.
fn missing_field(detail: &str) -> Option<&str> {
    detail
        .split_once("missing field `")
        .and_then(|(_, rest)| rest.split_once('`'))
        .map(|(field, _)| field)
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::bad_request(anyhow!("Missing 'Content-Type: application/json' header"))
        }
        JsonRejection::JsonSyntaxError(_) => AppError::bad_request(anyhow!("Malformed JSON body")),
        JsonRejection::JsonDataError(err) => {
            let detail = err.body_text();
            match missing_field(&detail) {
                Some(field) => AppError::bad_request(anyhow!("{field} is required")),
                None => AppError::bad_request(anyhow!("Invalid field type in request")),
            }
        }
        other => {
            tracing::debug!(rejection = %other.body_text(), "Unreadable request body");
            AppError::bad_request(anyhow!("Invalid request body"))
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_error)?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(anyhow!("{}", format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}
