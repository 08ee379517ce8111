use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use heroes_client::{ClientError, SourceError};
use heroes_shared::ErrorBody;

/// Handler error: a core error rendered as a JSON [`ErrorBody`].
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub ClientError);

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            ClientError::InvalidCharacterId(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ClientError::Superseded => (StatusCode::CONFLICT, "SUPERSEDED"),
            ClientError::ProtocolInconsistency { .. } => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_INCONSISTENT")
            }
            err if err.is_not_found() => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            err => match err.source_error() {
                Some(SourceError::Decode(_)) => (StatusCode::BAD_GATEWAY, "UPSTREAM_DECODE"),
                _ => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, code, "upstream request failed");
        }

        let body = ErrorBody {
            error: self.0.to_string(),
            code: code.to_string(),
            retryable: self.0.is_retryable(),
        };
        (status, Json(body)).into_response()
    }
}
