use std::time::Duration;

use bytes::Bytes;
use tracing::{info, warn};

use super::codec::encode_motto;
use crate::{
    auth::{repo_types::User, services::USER_NOT_FOUND},
    error::AppError,
    state::AppState,
    transcription::transcribe_bounded,
};

/// Transcribe `audio` and store the text as `username`'s motto.
pub async fn transcribe_and_store(
    state: &AppState,
    username: &str,
    audio: Bytes,
) -> Result<String, AppError> {
    if audio.is_empty() {
        return Err(AppError::Validation(super::NO_AUDIO.into()));
    }

    let user = User::find_by_username(&state.db, username)
        .await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.into()))?;

    let timeout = Duration::from_secs(state.config.transcription.timeout_secs);
    let bytes = audio.len();
    let text = transcribe_bounded(state.transcriber.as_ref(), audio, timeout).await?;

    if !User::set_motto(&state.db, user.id, &encode_motto(&text)).await? {
        warn!(user_id = user.id, "user disappeared before motto update");
        return Err(AppError::NotFound(USER_NOT_FOUND.into()));
    }

    info!(user_id = user.id, bytes, "motto updated from audio");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::services::register, motto::codec::decode_motto};

    #[tokio::test]
    async fn stores_encoded_and_returns_verbatim() {
        let state = AppState::fake().await;
        register(&state, "alice", "pw1").await.unwrap();

        let text = transcribe_and_store(&state, "alice", Bytes::from_static(b"webm"))
            .await
            .unwrap();
        assert_eq!(text, crate::transcription::MOCK_TRANSCRIPT);

        let stored = User::find_by_username(&state.db, "alice")
            .await
            .unwrap()
            .unwrap()
            .motto
            .unwrap();
        assert_ne!(stored, text);
        assert_eq!(decode_motto(&stored).unwrap(), text);
    }

    #[tokio::test]
    async fn empty_audio_is_rejected_before_lookup() {
        let state = AppState::fake().await;
        let err = transcribe_and_store(&state, "nobody", Bytes::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let state = AppState::fake().await;
        let err = transcribe_and_store(&state, "ghost", Bytes::from_static(b"a"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
