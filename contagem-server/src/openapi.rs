use crate::api::{counter, health, login};
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub(crate) const HEALTH_TAG: &str = "Health API";
pub(crate) const AUTH_TAG: &str = "Authentication API";
pub(crate) const COUNTER_TAG: &str = "Counter API";

/// Name of the bearer security scheme referenced by protected paths
pub(crate) const BEARER_SCHEME: &str = "bearer";

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        login::login_handler,
        counter::counter_handler,
    ),
    components(schemas(
        health::Health,
        login::LoginRequest,
        login::TokenResponse,
        counter::CounterResponse,
    )),
    modifiers(&BearerSecurity),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = AUTH_TAG, description = "Bearer token issuance"),
        (name = COUNTER_TAG, description = "Protected access counter"),
    ),
    info(
        title = "Contagem API",
        description = "Access counter protected by JWT bearer tokens",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;

/// Registers the JWT bearer scheme used by the protected routes
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Handler for the OpenAPI JSON specification endpoint
async fn openapi_json_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Creates a router for OpenAPI documentation routes
pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json_handler))
}
