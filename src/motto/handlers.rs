use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use tracing::{instrument, warn};

use super::{dto::UploadResponse, services, AUDIO_TOO_LARGE, NO_AUDIO};
use crate::{auth::extractors::AuthUser, error::AppError, filters::require_auth, state::AppState};

pub fn upload_routes(state: AppState) -> Router<AppState> {
    let limit = state.config.upload_max_bytes;
    Router::new()
        .route("/upload", post(upload))
        .route_layer(from_fn_with_state(state, require_auth))
        .layer(DefaultBodyLimit::max(limit))
}

/// Body-limit hits surface as multipart errors; keep them apart from malformed forms.
fn multipart_error(e: MultipartError, what: &str) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(error = %e, "upload exceeds body limit");
        return AppError::TooLarge(AUDIO_TOO_LARGE.into());
    }
    warn!(error = %e, "{what}");
    AppError::Validation(NO_AUDIO.into())
}

/// Read the first non-empty `audio` field of the form.
async fn audio_field(mp: Result<Multipart, MultipartRejection>) -> Result<Bytes, AppError> {
    let mut mp = mp.map_err(|e| {
        warn!(error = %e, "upload is not multipart");
        AppError::Validation(NO_AUDIO.into())
    })?;

    loop {
        let field = mp
            .next_field()
            .await
            .map_err(|e| multipart_error(e, "malformed multipart body"))?;
        let Some(field) = field else {
            return Err(AppError::Validation(NO_AUDIO.into()));
        };
        if field.name() != Some("audio") {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "failed reading audio field"))?;
        if !data.is_empty() {
            return Ok(data);
        }
    }
}

#[instrument(skip(state, mp))]
pub async fn upload(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    mp: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let audio = audio_field(mp).await?;
    let motto = services::transcribe_and_store(&state, &username, audio).await?;

    Ok(Json(UploadResponse {
        message: "Audio processed successfully".into(),
        motto,
    }))
}
