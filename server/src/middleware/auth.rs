use crate::error::ApiError;
use crate::state::AppState;
use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

/// The user a valid bearer token was issued to.
///
/// Add `user: AuthenticatedUser` to a handler and axum will:
/// 1. Pull `Authorization: Bearer <token>` out of the request
/// 2. Check the signature and expiry against the server's secret
/// 3. Hand over the username, or answer 401 before the handler runs
pub struct AuthenticatedUser {
    pub username: String,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Missing header and non-Bearer schemes both land here.
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| ApiError::Unauthorized("Not authenticated".to_string()))?;

        let username = state.auth.verify_token(bearer.token())?;

        Ok(AuthenticatedUser { username })
    }
}
