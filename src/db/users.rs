use secrecy::SecretString;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::user::User;

pub async fn insert_user(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO users (id, email, hashed_password, is_active)
        VALUES ($1, $2, $3, TRUE)
        RETURNING id, email, hashed_password, is_active, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: SecretString::new(
            row.try_get::<String, _>("hashed_password")?.into_boxed_str(),
        ),
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
    })
}

pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
