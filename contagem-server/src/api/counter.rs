use crate::openapi::COUNTER_TAG;
use crate::state::AppState;
use axum::extract::{Extension, Json, State};
use contagem_core::{Claims, ResultSnapshot};
use log::info;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Counter value plus details about the serving instance
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CounterResponse {
    /// Counter value produced by this request
    pub(crate) current_value: i64,
    /// Host name of the serving instance
    pub(crate) host: String,
    /// Operating system and kernel of the serving instance
    pub(crate) kernel: String,
    /// Configured greeting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) greeting: Option<String>,
    /// Server framework description
    pub(crate) framework: String,
}

impl From<ResultSnapshot> for CounterResponse {
    fn from(snapshot: ResultSnapshot) -> Self {
        Self {
            current_value: snapshot.current_value,
            host: snapshot.host,
            kernel: snapshot.kernel,
            greeting: snapshot.greeting,
            framework: snapshot.framework,
        }
    }
}

/// Increments the shared counter. Only reachable through the bearer guard.
#[utoipa::path(
    get,
    path = "/contador",
    tag = COUNTER_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Counter incremented", body = CounterResponse),
        (status = 401, description = "Missing, invalid or expired bearer token")
    )
)]
pub(crate) async fn counter_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Json<CounterResponse> {
    let snapshot = state.counter.next_snapshot(state.greeting());
    info!(
        "Counter - current value: {} (user: {})",
        snapshot.current_value, claims.user_id
    );
    Json(CounterResponse::from(snapshot))
}
