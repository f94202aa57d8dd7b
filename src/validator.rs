//! JSON body and query string extraction with `validator` checks.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
};
use feedesk_core::AppError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// Like [`Json`], but runs [`Validate`] before the handler sees the body.
///
/// Malformed bodies are rejected with 400 and failed validation with 422.
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
            .map_err(rejection_to_error)?;

        value.validate().map_err(validation_to_error)?;

        Ok(ValidatedJson(value))
    }
}

/// Like [`Query`], with the same 400/422 split as [`ValidatedJson`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection_to_error)?;

        value.validate().map_err(validation_to_error)?;

        Ok(ValidatedQuery(value))
    }
}

fn validation_to_error(errors: ValidationErrors) -> AppError {
    AppError::new(
        StatusCode::UNPROCESSABLE_ENTITY,
        anyhow!("{}", format_errors(&errors)),
    )
}

fn query_rejection_to_error(rejection: QueryRejection) -> AppError {
    let text = rejection.body_text();
    if text.contains("invalid digit") || text.contains("invalid type") {
        return AppError::bad_request(anyhow!("Invalid query parameter type"));
    }
    AppError::bad_request(anyhow!("Invalid query string"))
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!("Missing 'Content-Type: application/json' header"));
    }

    let text = rejection.body_text();
    if let Some(field) = missing_field(&text) {
        return AppError::bad_request(anyhow!("{field} is required"));
    }
    if text.contains("invalid type") {
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }
    AppError::bad_request(anyhow!("Invalid request body"))
}

fn missing_field(text: &str) -> Option<&str> {
    text.split("missing field `").nth(1)?.split('`').next()
}

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
