//! Shared-password gate

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::routes::AppError;
use crate::state::AppState;

/// Reject requests whose bearer token doesn't match the configured password.
/// Without a password every request passes.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(secret) = &state.secret {
        if bearer_token(request.headers()) != Some(secret.as_ref()) {
            warn!(
                method = %request.method(),
                uri = %request.uri(),
                "rejected request with bad token"
            );
            return Err(AppError::unauthorized());
        }
    }

    Ok(next.run(request).await)
}

/// Second word of the `Authorization` header (`Bearer <token>`).
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(' ').nth(1))
}
