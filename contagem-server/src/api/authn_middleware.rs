use crate::errors::ApiError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use log::warn;

const BEARER_PREFIX: &str = "bearer ";

/// Extracts the token from an `Authorization: Bearer <token>` header value
fn bearer_token(header_value: &str) -> Option<&str> {
    let prefix = header_value.get(..BEARER_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }
    let token = header_value[BEARER_PREFIX.len()..].trim();
    (!token.is_empty()).then_some(token)
}

/// Rejects requests without a valid bearer token.
///
/// On success the verified claims are added to the request extensions so the
/// handler can read them. Every rejection is a bare 401; the reason is only logged.
pub(super) async fn authentication_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    // Extract the authorization header
    let auth_header = match request.headers().get(http::header::AUTHORIZATION) {
        Some(header) => header,
        None => {
            warn!("Missing Authorization header");
            return ApiError::unauthorized().into_response();
        }
    };

    let token = match auth_header.to_str().ok().and_then(bearer_token) {
        Some(token) => token,
        None => {
            warn!("Invalid Authorization header format, expected 'Bearer <token>'");
            return ApiError::unauthorized().into_response();
        }
    };

    let claims = match state.access_manager.verify_token(token) {
        Ok(claims) => claims,
        Err(reason) => {
            warn!("Rejected bearer token: {}", reason);
            return ApiError::unauthorized().into_response();
        }
    };

    request.extensions_mut().insert(claims);
    next.run(request).await
}
