use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, RegisterResponse},
        extractors::AuthUser,
        services,
    },
    error::AppError,
    filters::{require_auth, version_gate},
    state::AppState,
};

pub fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route_layer(from_fn_with_state(state, version_gate))
}

/// `/user` runs `require_auth` first, then `version_gate`.
pub fn profile_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user", get(get_user))
        .route_layer(from_fn_with_state(state.clone(), version_gate))
        .route_layer(from_fn_with_state(state, require_auth))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!(error = %rejection, "rejected request body");
        AppError::Validation("username and password are required".into())
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let payload = json_body(payload)?;
    let token = services::register(&state, &payload.username, &payload.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".into(),
            token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let payload = json_body(payload)?;
    let token = services::login(&state, &payload.username, &payload.password).await?;
    Ok(Json(LoginResponse { token }))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    Ok(Json(services::profile(&state, &username).await?))
}
