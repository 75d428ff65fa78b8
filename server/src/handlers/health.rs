use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub vehicles: usize,
}

/// Liveness check. No auth, so load balancers can hit it.
///
/// Also reports how many vehicles are in memory, which is the quickest way to
/// notice a restart wiped the store.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let vehicles = state.vehicles.lock().len();

    let response = HealthResponse {
        status: "ok".to_string(),
        vehicles,
    };

    (StatusCode::OK, Json(response))
}
