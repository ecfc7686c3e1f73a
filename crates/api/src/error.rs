//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use copion_domain::CopionError;
use serde_json::json;
use tracing::error;

use crate::utils::logging::error_label;

/// Error returned by every handler
#[derive(Debug)]
pub enum ApiError {
    /// Failure reported by the profile service
    Domain(CopionError),
    /// Body or query string that could not be decoded
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Domain(CopionError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Domain(CopionError::InvalidInput(_)) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the caller caused the failure
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Domain(err) => err.is_client_error(),
            Self::BadRequest(_) => true,
        }
    }

    /// Stable label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Domain(err) => error_label(err),
            Self::BadRequest(_) => "bad_request",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(err) => write!(f, "{err}"),
            Self::BadRequest(msg) => write!(f, "Malformed request: {msg}"),
        }
    }
}

impl From<CopionError> for ApiError {
    fn from(value: CopionError) -> Self {
        Self::Domain(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, label = self.label(), "request failed");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(ApiError::from(CopionError::profile_not_found("x")).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(CopionError::InvalidInput("bad".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::BadRequest("eof".into()).status(), StatusCode::BAD_REQUEST);
        assert!(ApiError::BadRequest("eof".into()).is_client_error());
        assert!(!ApiError::from(CopionError::Io("disk full".into())).is_client_error());
        assert_eq!(
            ApiError::from(CopionError::Io("disk full".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
