use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fanar_abm_core::RelayError;
use thiserror::Error;

/// Request-scoped failures, rendered as `{ "error": <message> }`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Invalid JSON")]
    InvalidJson,

    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson | ApiError::Relay(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
