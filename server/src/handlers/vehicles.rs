use crate::error::ApiError;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::vehicle::{NewVehicle, StatusUpdateRequest, Vehicle};
use crate::state::AppState;
use crate::utils::validation::validate_vehicle_name;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

/// Lists vehicle names in insertion order.
pub async fn list_vehicles(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
) -> Json<Vec<String>> {
    Json(state.vehicles.lock().list_names())
}

/// Creates a vehicle.
///
/// An empty `nome` or an unknown `status` is a schema problem (422) and never
/// reaches the store. Answers 200 with the stored record, id included.
pub async fn create_vehicle(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    payload: Result<Json<NewVehicle>, JsonRejection>,
) -> Result<Json<Vehicle>, ApiError> {
    let Json(payload) = payload?;
    validate_vehicle_name(&payload.nome).map_err(ApiError::Unprocessable)?;

    let vehicle = state.vehicles.lock().add(payload)?;

    tracing::info!(
        user = %user.username,
        id = vehicle.id,
        nome = %vehicle.nome,
        "Vehicle created"
    );
    Ok(Json(vehicle))
}

pub async fn get_vehicle(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(nome): Path<String>,
) -> Result<Json<Vehicle>, ApiError> {
    let vehicle = state.vehicles.lock().get_by_name(&nome)?.clone();
    Ok(Json(vehicle))
}

/// Changes a vehicle's status. Unknown vehicle is 404, unknown status is 400.
pub async fn update_vehicle(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(nome): Path<String>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<Vehicle>, ApiError> {
    let Json(payload) = payload?;

    let vehicle = state
        .vehicles
        .lock()
        .update_status(&nome, &payload.status)?;

    tracing::info!(
        user = %user.username,
        nome = %vehicle.nome,
        status = %vehicle.status,
        "Vehicle status updated"
    );
    Ok(Json(vehicle))
}

/// Deletes every vehicle with this name and returns the first one.
pub async fn delete_vehicle(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(nome): Path<String>,
) -> Result<Json<Vehicle>, ApiError> {
    let vehicle = state.vehicles.lock().delete(&nome)?;

    tracing::info!(
        user = %user.username,
        id = vehicle.id,
        nome = %vehicle.nome,
        "Vehicle deleted"
    );
    Ok(Json(vehicle))
}
