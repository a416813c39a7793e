mod authn_middleware;
pub(crate) mod counter;
pub(crate) mod health;
pub(crate) mod login;

use crate::api::authn_middleware::authentication_middleware;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

/// Combines all API routes into a single router
pub(super) fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .route("/login", post(login::login_handler))
        .merge(protected_routes(state))
}

/// Creates a router for routes that require a valid bearer token
fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/contador", get(counter::counter_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authentication_middleware,
        ))
}
