use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use curio_core::domain::UserId;

use super::error::{ApiError, ApiResult};
use super::state::AppState;

const AUTHENTICATE_BEARER_CHALLENGE: &str = "Bearer";

pub(crate) async fn require_auth(state: &AppState, headers: &HeaderMap) -> ApiResult<UserId> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| auth_required_error("Not authorized, no token"))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| auth_required_error("Not authorized, invalid token"))?;

    state
        .identity
        .current_user(token)
        .await
        .ok_or_else(|| auth_required_error("Not authorized, invalid token"))
}

fn auth_required_error(message: &str) -> ApiError {
    ApiError::new(StatusCode::UNAUTHORIZED, message)
        .with_header("www-authenticate", AUTHENTICATE_BEARER_CHALLENGE)
}
