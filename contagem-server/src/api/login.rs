use crate::errors::ApiError;
use crate::openapi::AUTH_TAG;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    response::{IntoResponse, Response},
};
use contagem_core::{Credentials, Token};
use http::StatusCode;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Login request body
#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub(crate) struct LoginRequest {
    /// User identifier
    #[serde(rename = "UserID", alias = "userID", alias = "userId", default)]
    pub(crate) user_id: Option<String>,
    /// User password
    #[serde(rename = "Password", alias = "password", default)]
    pub(crate) password: Option<String>,
}

impl LoginRequest {
    /// Credentials carried by the request, if both fields are present
    fn credentials(&self) -> Option<Credentials> {
        match (&self.user_id, &self.password) {
            (Some(id), Some(password)) => Some(Credentials::new(id.as_str(), password.as_str())),
            _ => None,
        }
    }
}

/// Issued bearer token
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenResponse {
    /// Signed JWT to send as `Authorization: Bearer <accessToken>`
    pub(crate) access_token: String,
    /// Token type, always "Bearer"
    #[serde(rename = "type")]
    pub(crate) token_type: String,
    /// Minutes until the token expires
    pub(crate) expires_in_minutes: u32,
}

impl From<Token> for TokenResponse {
    fn from(token: Token) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in_minutes: token.expires_in_minutes,
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted, token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Token could not be signed")
    )
)]
pub(crate) async fn login_handler(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected login request with unreadable body: {}", rejection);
            LoginRequest::default()
        }
    };
    let user_id = request.user_id.as_deref().unwrap_or_default();
    info!("Received login request for user: {}", user_id);

    let credentials = request.credentials();
    let access_manager = &state.access_manager;
    let credentials = match credentials {
        Some(credentials) if access_manager.validate_credentials(Some(&credentials)) => {
            credentials
        }
        _ => {
            error!("Authentication failed for user: {}", user_id);
            return ApiError::unauthorized().into_response();
        }
    };

    match access_manager.generate_token(&credentials) {
        Ok(token) => {
            info!("Authentication succeeded for user: {}", credentials.id);
            (StatusCode::OK, Json(TokenResponse::from(token))).into_response()
        }
        Err(err) => {
            error!("Failed to issue token for user {}: {}", credentials.id, err);
            ApiError::internal("Failed to issue token").into_response()
        }
    }
}
