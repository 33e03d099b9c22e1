use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(e) => match e {
                StorageError::NotFound { .. } => StatusCode::NOT_FOUND,
                StorageError::Conflict(_) => StatusCode::CONFLICT,
                StorageError::InvalidTransition { .. }
                | StorageError::InvalidValue { .. }
                | StorageError::AmbiguousReference { .. }
                | StorageError::MalformedImport(_) => StatusCode::BAD_REQUEST,
                StorageError::Database(_) | StorageError::Migration(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::Storage(e) => match e {
                StorageError::NotFound { entity, id } => {
                    json!({
                        "error": e.to_string(),
                        "entity": entity,
                        "id": id
                    })
                }
                StorageError::InvalidTransition { entry_id, from, to } => {
                    json!({
                        "error": e.to_string(),
                        "entry_id": entry_id,
                        "from": from,
                        "to": to
                    })
                }
                StorageError::InvalidValue { field, .. } => {
                    json!({
                        "error": e.to_string(),
                        "field": field
                    })
                }
                StorageError::AmbiguousReference { entity, name, count } => {
                    json!({
                        "error": e.to_string(),
                        "entity": entity,
                        "name": name,
                        "count": count
                    })
                }
                StorageError::Conflict(_) | StorageError::MalformedImport(_) => {
                    json!({
                        "error": e.to_string()
                    })
                }
                StorageError::Database(_) | StorageError::Migration(_) => {
                    tracing::error!("Storage error: {:?}", e);
                    json!({
                        "error": "An internal error occurred"
                    })
                }
            },
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}
