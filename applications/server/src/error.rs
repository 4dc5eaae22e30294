/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use grunge_core::GrungeError;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Messages per request field, rendered under `"fields"`
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Malformed request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Catalog(#[from] GrungeError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServerError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Validation failure on a single field
    pub fn field(name: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(name.to_string(), vec![message.into()]);
        Self::Validation(fields)
    }

    fn internal(kind: &str, detail: &dyn std::fmt::Display) -> (StatusCode, Value) {
        tracing::error!("{} error: {}", kind, detail);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({
                "code": "internal_error",
                "error": format!("{} error", kind),
                "params": {},
            }),
        )
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServerError::NotFound { entity, ref id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "code": "not_found",
                    "error": self.to_string(),
                    "params": { "entity": entity, "id": id },
                }),
            ),
            ServerError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "code": "validation_failed",
                    "error": "Validation failed",
                    "params": {},
                    "fields": fields,
                }),
            ),
            ServerError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "code": "malformed_request",
                    "error": msg,
                    "params": {},
                }),
            ),
            ServerError::Catalog(ref e) if e.is_client_error() => {
                let status = match e {
                    GrungeError::NotFound { .. } => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_REQUEST,
                };
                (
                    status,
                    json!({
                        "code": e.code(),
                        "error": e.to_string(),
                        "params": e.params(),
                    }),
                )
            }
            ServerError::Catalog(ref e) => Self::internal("Database", e),
            ServerError::Config(ref msg) => Self::internal("Configuration", msg),
        };

        (status, Json(body)).into_response()
    }
}
