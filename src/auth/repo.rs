use crate::auth::repo_types::User;
use sqlx::SqlitePool;

impl User {
    /// Find a user by username.
    pub async fn find_by_username(db: &SqlitePool, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, motto
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password.
    ///
    /// Returns the raw `sqlx` error so callers can tell a unique violation apart.
    pub async fn create(db: &SqlitePool, username: &str, password_hash: &str) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES (?, ?)
            RETURNING id, username, password_hash, motto
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }

    /// Replace the stored (already encoded) motto. Returns false if no row matched.
    pub async fn set_motto(db: &SqlitePool, id: i64, encoded_motto: &str) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE users
            SET motto = ?
            WHERE id = ?
            "#,
        )
        .bind(encoded_motto)
        .bind(id)
        .execute(db)
        .await?;
        Ok(res.rows_affected() == 1)
    }
}
