use std::{sync::Arc, time::Duration};

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::db;
use crate::transcription::{MockTranscriber, Transcriber};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub transcriber: Arc<dyn Transcriber>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = db::connect(&config.database_url, config.database_max_connections).await?;
        db::migrate(&db).await?;

        let transcriber = Arc::new(MockTranscriber::new(Duration::from_millis(
            config.transcription.delay_ms,
        ))) as Arc<dyn Transcriber>;

        Ok(Self::from_parts(db, config, transcriber))
    }

    pub fn from_parts(
        db: SqlitePool,
        config: Arc<AppConfig>,
        transcriber: Arc<dyn Transcriber>,
    ) -> Self {
        Self {
            db,
            config,
            transcriber,
        }
    }

    #[cfg(test)]
    pub async fn fake() -> Self {
        Self::fake_with(Arc::new(MockTranscriber::new(Duration::ZERO))).await
    }

    #[cfg(test)]
    pub async fn fake_with(transcriber: Arc<dyn Transcriber>) -> Self {
        use crate::config::{JwtConfig, TranscriptionConfig};

        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            database_max_connections: 1,
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
            },
            min_app_version: "1.2.0".parse().expect("valid version"),
            transcription: TranscriptionConfig {
                delay_ms: 0,
                timeout_secs: 2,
            },
            upload_max_bytes: 1024 * 1024,
            cors_max_age_secs: 86400,
        });

        Self::from_parts(db::memory().await, config, transcriber)
    }
}
