use crate::state::AppState;
use axum::Router;

pub mod codec;
mod dto;
pub mod handlers;
pub mod services;

pub const NO_AUDIO: &str = "No audio file provided";
pub const AUDIO_TOO_LARGE: &str = "Audio file too large";

pub fn router(state: AppState) -> Router<AppState> {
    handlers::upload_routes(state)
}
