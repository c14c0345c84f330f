use anyhow::Context;
use axum::extract::FromRef;
use tracing::{error, info, warn};

use crate::{
    auth::{
        dto::ProfileResponse,
        jwt::JwtKeys,
        password::{burn_verification, hash_password, verify_password},
        repo_types::User,
    },
    error::AppError,
    motto::codec::decode_motto,
    state::AppState,
};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const USERNAME_TAKEN: &str = "Username already exists";
pub const USER_NOT_FOUND: &str = "User not found";

/// Width of the `username` column.
pub const MAX_USERNAME_CHARS: usize = 150;

fn validate_credentials(username: &str, password: &str) -> Result<(), AppError> {
    if username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".into()));
    }
    if username.chars().count() > MAX_USERNAME_CHARS {
        return Err(AppError::Validation("Username is too long".into()));
    }
    if password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Create the account and return a fresh token for it.
pub async fn register(state: &AppState, username: &str, password: &str) -> Result<String, AppError> {
    validate_credentials(username, password)?;

    if User::find_by_username(&state.db, username).await?.is_some() {
        warn!(username = %username, "username already registered");
        return Err(AppError::Conflict(USERNAME_TAKEN.into()));
    }

    let hash = hash_password(password)?;
    let user = insert_user(state, username, &hash).await?;

    let token = JwtKeys::from_ref(state)
        .sign(&user.username)
        .context("sign token")?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(token)
}

/// Insert the row, reporting a lost race with a concurrent registration as a conflict.
async fn insert_user(state: &AppState, username: &str, hash: &str) -> Result<User, AppError> {
    match User::create(&state.db, username, hash).await {
        Ok(u) => Ok(u),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            warn!(username = %username, "username registered concurrently");
            Err(AppError::Conflict(USERNAME_TAKEN.into()))
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            Err(e.into())
        }
    }
}

/// Check credentials and issue a token. Unknown users and wrong passwords fail identically.
pub async fn login(state: &AppState, username: &str, password: &str) -> Result<String, AppError> {
    let Some(user) = User::find_by_username(&state.db, username).await? else {
        burn_verification(password);
        warn!(username = %username, "login unknown username");
        return Err(AppError::Auth(INVALID_CREDENTIALS.into()));
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(AppError::Auth(INVALID_CREDENTIALS.into()));
    }

    let token = JwtKeys::from_ref(state)
        .sign(&user.username)
        .context("sign token")?;

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(token)
}

pub async fn profile(state: &AppState, username: &str) -> Result<ProfileResponse, AppError> {
    let user = User::find_by_username(&state.db, username)
        .await?
        .ok_or_else(|| {
            warn!(username = %username, "token subject has no user row");
            AppError::NotFound(USER_NOT_FOUND.into())
        })?;

    let motto = user.motto.as_deref().map(decode_motto).transpose()?;

    Ok(ProfileResponse {
        id: user.id,
        username: user.username,
        motto,
    })
}
