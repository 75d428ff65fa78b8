use crate::handlers::{
    auth::login,
    health::health_check,
    vehicles::{create_vehicle, delete_vehicle, get_vehicle, list_vehicles, update_vehicle},
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Every /veiculos route requires a bearer token (AuthenticatedUser extractor).
    Router::new()
        .route("/health", get(health_check))
        .route("/token", post(login))
        .route("/veiculos", get(list_vehicles).post(create_vehicle))
        .route(
            "/veiculos/{nome}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
