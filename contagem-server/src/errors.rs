use axum::response::IntoResponse;
use axum::Json;
use contagem_core::ConfigurationError;
use http::header::WWW_AUTHENTICATE;
use http::{HeaderValue, StatusCode};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub detail: Option<String>,
    pub status_code: StatusCode,
}

impl ApiError {
    /// Create a new ApiError with a detail message and status code
    pub fn new<S: ToString>(detail: S, status_code: StatusCode) -> Self {
        Self {
            detail: Some(detail.to_string()),
            status_code,
        }
    }

    /// Create new Unauthorized (401) with an empty body.
    ///
    /// The rejection reason is never sent to the client.
    pub fn unauthorized() -> Self {
        Self {
            detail: None,
            status_code: StatusCode::UNAUTHORIZED,
        }
    }

    /// Create new Internal Server Error (500) with a detail message
    pub fn internal<S: ToString>(detail: S) -> Self {
        Self::new(detail, StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let mut response = match self.detail {
            Some(detail) => (self.status_code, Json(json!({ "detail": detail }))).into_response(),
            None => self.status_code.into_response(),
        };
        if self.status_code == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Errors that stop the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Settings(#[from] confique::Error),

    #[error("Invalid access configuration: {0}")]
    Access(#[from] ConfigurationError),
}
