use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;
use serde_json::json;
use sqlx::PgPool;

use crate::db;
use crate::db::helpers::ensure_not_exists;
use crate::models::user::{RegistrationRequest, UserResponse};
use crate::ok_or_return;
use crate::utils::password::hash_password;

#[tracing::instrument(
    name = "Adding a new user",
    // Don't show the password
    skip(user_form, pool),
    fields(email = %user_form.email)
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>,
) -> actix_web::Result<HttpResponse> {
    ok_or_return!(ensure_not_exists(
        db::users::find_user_by_email(&pool, &user_form.email).await,
        "Email already registered"
    ));

    let hashed = hash_password(user_form.password.expose_secret());
    match db::users::insert_user(&pool, &user_form.email, &hashed).await {
        Ok(user) => Ok(HttpResponse::Ok().json(UserResponse::from(user))),
        // A concurrent registration can still trip the unique constraint
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Ok(HttpResponse::Conflict().json(json!({
                "success": false,
                "message": "Email already registered"
            })))
        }
        Err(e) => {
            tracing::error!("Failed to execute user insert query: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Database error"
            })))
        }
    }
}
