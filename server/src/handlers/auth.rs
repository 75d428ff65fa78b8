use crate::error::ApiError;
use crate::models::user::{LoginRequest, TokenResponse};
use crate::state::AppState;
use axum::{Json, extract::State, extract::rejection::JsonRejection};

/// `POST /token`: trades a username/password for a bearer token.
///
/// The credentials file is read fresh on every call and the password check is
/// deliberately slow, so the whole thing runs on the blocking pool.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(payload) = payload?;
    let username = payload.username.clone();

    let auth = state.auth.clone();
    let result = tokio::task::spawn_blocking(move || {
        auth.login(&payload.username, &payload.password)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("login task failed: {}", e)))?;

    match result {
        Ok(token) => {
            tracing::info!(username = %username, "Issued access token");
            Ok(Json(TokenResponse::bearer(token)))
        }
        Err(e) => {
            tracing::warn!(username = %username, error = %e, "Login failed");
            Err(e.into())
        }
    }
}
