use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Every way a forwarding request can fail, mapped onto the HTTP contract.
/// Caller-visible strings stay short and generic; anything technical is
/// logged where the error is raised.
#[derive(Error, Debug, PartialEq)]
pub enum AppError {
    #[error("Invalid JSON")]
    InvalidJson,

    #[error("Missing required fields")]
    MissingFields,

    #[error("Server misconfigured")]
    MissingAccessKey,

    #[error("Failed to send")]
    UpstreamRejected(Value),

    #[error("Server error")]
    UpstreamUnreachable,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidJson | AppError::MissingFields => StatusCode::BAD_REQUEST,
            AppError::MissingAccessKey
            | AppError::UpstreamRejected(_)
            | AppError::UpstreamUnreachable => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = self.to_string();
        let body = match self {
            AppError::UpstreamRejected(details) => {
                json!({ "error": message, "details": details })
            }
            _ => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}
