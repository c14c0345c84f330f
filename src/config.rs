use std::str::FromStr;

use anyhow::Context;

use crate::version::AppVersion;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct TranscriptionConfig {
    pub delay_ms: u64,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt: JwtConfig,
    pub min_app_version: AppVersion,
    pub transcription: TranscriptionConfig,
    pub upload_max_bytes: usize,
    pub cors_max_age_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://site.db".into());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "voicemotto".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "voicemotto-clients".into()),
            ttl_minutes: env_or("JWT_TTL_MINUTES", 15),
        };
        let min_app_version = std::env::var("MIN_APP_VERSION")
            .unwrap_or_else(|_| "1.2.0".into());
        let min_app_version = AppVersion::from_str(&min_app_version)
            .with_context(|| format!("MIN_APP_VERSION {min_app_version:?} is not a version"))?;

        Ok(Self {
            database_url,
            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", 5),
            jwt,
            min_app_version,
            transcription: TranscriptionConfig {
                delay_ms: env_or("TRANSCRIPTION_DELAY_MS", 3000),
                timeout_secs: env_or("TRANSCRIPTION_TIMEOUT_SECS", 30),
            },
            upload_max_bytes: env_or("UPLOAD_MAX_BYTES", 20 * 1024 * 1024),
            cors_max_age_secs: env_or("CORS_MAX_AGE_SECS", 86400),
        })
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
