use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::db;
use crate::db::helpers::require_record;
use crate::models::user_match::{MarkDoneRequest, UserMatchResponse};
use crate::ok_or_return;

/// Marks a match as done for a user. The match is addressed by its
/// external id, the only id callers ever see.
#[tracing::instrument(
    name = "Marking a match as done",
    skip(body, pool),
    fields(user_id = %body.user_id)
)]
pub async fn mark_match_done(
    external_id: i64,
    body: web::Json<MarkDoneRequest>,
    pool: web::Data<PgPool>,
) -> actix_web::Result<HttpResponse> {
    let match_id = ok_or_return!(require_record(
        db::matches::find_match_id_by_external(&pool, external_id).await,
        "Match not found"
    ));
    ok_or_return!(require_record(
        db::users::find_user_by_id(&pool, body.user_id).await,
        "User not found"
    ));

    match db::user_matches::mark_done(&pool, body.user_id, match_id, body.notes.as_deref()).await {
        Ok(user_match) => Ok(HttpResponse::Ok().json(UserMatchResponse {
            user_id: user_match.user_id,
            match_id: external_id,
            is_done: user_match.is_done,
            notes: user_match.notes,
        })),
        Err(e) => {
            tracing::error!(
                "Failed to mark match {} done for user {}: {:?}",
                external_id,
                body.user_id,
                e
            );
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Database error"
            })))
        }
    }
}
