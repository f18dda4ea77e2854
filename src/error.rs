//! Error types for the Libris server.
//!
//! Every handler returns [`AppResult`]; the [`IntoResponse`] impl on
//! [`AppError`] is the single place where errors become HTTP responses,
//! so all endpoints share one JSON error envelope.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A single field-level failure inside the `error.errors` map.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct FieldError {
    pub message: String,
    pub kind: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Payload rejected by schema validation. Keyed by field name.
    #[error("Validation failed")]
    Validation(BTreeMap<String, FieldError>),

    /// Uniqueness-constraint violation reported by the store.
    #[error("{field} must be unique. \"{value}\" is already taken.")]
    Duplicate { field: String, value: String },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error: ErrorDetail,
}

/// The `error` object of the envelope: a kind name plus a per-field map.
/// The map is empty for errors that carry no field diagnostics.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorDetail {
    pub name: String,
    pub errors: BTreeMap<String, FieldError>,
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        for (field, failures) in errors.field_errors() {
            if let Some(failure) = failures.first() {
                fields.insert(
                    field.to_string(),
                    FieldError {
                        message: failure
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{} is invalid", field)),
                        kind: failure.code.to_string(),
                        path: field.to_string(),
                        value: failure.params.get("value").cloned(),
                    },
                );
            }
        }
        AppError::Validation(fields)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, name, errors) = match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                "ValidationError".to_string(),
                errors,
            ),
            AppError::Duplicate { field, value } => {
                let mut errors = BTreeMap::new();
                errors.insert(
                    field.clone(),
                    FieldError {
                        message: format!(
                            "{} must be unique. \"{}\" is already taken.",
                            field, value
                        ),
                        kind: "unique".to_string(),
                        path: field,
                        value: Some(Value::String(value)),
                    },
                );
                (
                    StatusCode::BAD_REQUEST,
                    "Validation failed".to_string(),
                    "DuplicateKeyError".to_string(),
                    errors,
                )
            }
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                msg,
                "NotFoundError".to_string(),
                BTreeMap::new(),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                msg,
                "BadRequestError".to_string(),
                BTreeMap::new(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    "DatabaseError".to_string(),
                    BTreeMap::new(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    "InternalError".to_string(),
                    BTreeMap::new(),
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
            error: ErrorDetail { name, errors },
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn response_json(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_renders_envelope_with_empty_errors() {
        let (status, body) = response_json(AppError::NotFound("Book not found".into())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Book not found");
        assert_eq!(body["error"]["name"], "NotFoundError");
        assert!(body["error"]["errors"].as_object().unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_key_names_the_offending_field() {
        let (status, body) = response_json(AppError::Duplicate {
            field: "isbn".into(),
            value: "9780140328721".into(),
        })
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["error"]["name"], "DuplicateKeyError");
        assert_eq!(
            body["error"]["errors"]["isbn"]["message"],
            "isbn must be unique. \"9780140328721\" is already taken."
        );
        assert_eq!(body["error"]["errors"]["isbn"]["kind"], "unique");
    }

    #[tokio::test]
    async fn validation_exposes_field_level_failures() {
        let mut fields = BTreeMap::new();
        fields.insert(
            "copies".to_string(),
            FieldError {
                message: "copies must be a non-negative integer".into(),
                kind: "range".into(),
                path: "copies".into(),
                value: Some(Value::from(-3)),
            },
        );
        let (status, body) = response_json(AppError::Validation(fields)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["name"], "ValidationError");
        assert_eq!(body["error"]["errors"]["copies"]["path"], "copies");
    }

    #[tokio::test]
    async fn database_errors_are_not_leaked() {
        let (status, body) = response_json(AppError::Database(sqlx::Error::RowNotFound)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal Server Error");
        assert_eq!(body["error"]["name"], "DatabaseError");
    }
}
