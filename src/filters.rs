//! Request filters run in front of handlers.
//!
//! Each filter either forwards the request (possibly with extra extensions)
//! or answers it directly with an [`AppError`].

use axum::{
    extract::{FromRef, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{
    auth::{
        extractors::AuthUser,
        jwt::{bearer_token, JwtKeys},
    },
    error::AppError,
    state::AppState,
    version,
};

pub const APP_VERSION_HEADER: &str = "app-version";

/// Resolve the bearer token to an [`AuthUser`] and stash it in the request.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).map_err(|msg| AppError::Auth(msg.into()))?;

    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify(token).map_err(|_| {
        warn!("invalid or expired token");
        AppError::Auth("Invalid or expired token".into())
    })?;

    req.extensions_mut().insert(AuthUser(claims.sub));
    Ok(next.run(req).await)
}

/// Refuse clients whose `app-version` is missing, malformed or below the minimum.
pub async fn version_gate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = req
        .headers()
        .get(APP_VERSION_HEADER)
        .and_then(|v| v.to_str().ok());

    if !version::admits(header, &state.config.min_app_version) {
        warn!(
            client_version = header.unwrap_or("<missing>"),
            minimum = %state.config.min_app_version,
            "client version rejected"
        );
        return Err(AppError::Version);
    }
    Ok(next.run(req).await)
}
