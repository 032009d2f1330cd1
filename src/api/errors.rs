use actix_web::{error::JsonPayloadError, web::JsonConfig, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use tracing::{error, warn};

use crate::db::StoreError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: serde_json::Value,
}

/// Service-level errors
#[derive(Debug)]
pub enum ServiceError {
    /// Store operation failed
    Store(StoreError),

    /// Path id is not a valid ObjectId
    InvalidId(String),

    /// Body could not be stored as a document
    InvalidPayload(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Store(e) => write!(f, "Store error: {}", e),
            ServiceError::InvalidId(id) => write!(f, "Invalid id: {}", id),
            ServiceError::InvalidPayload(msg) => write!(f, "Invalid payload: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::Store(e)
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            ServiceError::Store(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::InvalidId(_) | ServiceError::InvalidPayload(_) => {
                actix_web::http::StatusCode::BAD_REQUEST
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::Store(e) => {
                error!("Store error: {}", e);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to process request".to_string(),
                    fields: serde_json::json!({"message": "Database error occurred"}),
                })
            }
            ServiceError::InvalidId(id) => {
                warn!("Invalid id: {}", id);
                HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Invalid id".to_string(),
                    fields: serde_json::json!({"message": format!("'{}' is not a valid id", id)}),
                })
            }
            ServiceError::InvalidPayload(msg) => {
                warn!("Invalid payload: {}", msg);
                HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Invalid payload".to_string(),
                    fields: serde_json::json!({"message": msg}),
                })
            }
        }
    }
}

/// Creates a configured JsonConfig with standardized error handling for the entire project.
///
/// Bodies are parsed as JSON whatever their Content-Type says.
pub fn json_config(limit: usize) -> JsonConfig {
    JsonConfig::default()
        .limit(limit)
        .content_type_required(false)
        .error_handler(|err, _req| {
            let message = match &err {
                JsonPayloadError::Deserialize(de_err) if de_err.is_eof() => {
                    "Request body is empty. Expected JSON payload"
                }
                JsonPayloadError::Deserialize(de_err) if de_err.is_data() => {
                    "Expected a JSON object"
                }
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    "Request body is too large"
                }
                _ => "Invalid JSON format",
            };
            warn!("Rejected JSON body: {}", err);

            let error_response = ErrorResponse {
                error: "Request validation failed".to_string(),
                fields: serde_json::json!({ "message": message }),
            };
            actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().json(error_response))
                .into()
        })
}
