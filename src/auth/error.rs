use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use tracing::{error, warn};

use crate::api::errors::ErrorResponse;

/// Gateway rejections
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `token` cookie on a route that requires one
    #[error("no credential presented")]
    MissingToken,

    /// Bad signature, expired, or not a token at all
    #[error("invalid credential: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// Authenticated, but not as the identity the request asks for
    #[error("credential does not match requested email")]
    Forbidden,

    #[error("failed to sign credential: {0}")]
    Signing(jsonwebtoken::errors::Error),

    /// Route table or app data is missing something the gateway needs
    #[error("gateway misconfigured: {0}")]
    Misconfigured(&'static str),
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Signing(_) | AuthError::Misconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error, message) = match self {
            AuthError::MissingToken | AuthError::InvalidToken(_) => {
                warn!("Rejected request: {}", self);
                ("Unauthorized", "unauthorized access")
            }
            AuthError::Forbidden => {
                warn!("Rejected request: {}", self);
                ("Forbidden", "forbidden access")
            }
            AuthError::Signing(_) | AuthError::Misconfigured(_) => {
                error!("Gateway failure: {}", self);
                ("Internal server error", "Failed to process request")
            }
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error.to_string(),
            fields: serde_json::json!({ "message": message }),
        })
    }
}
