use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::handlers::{match_handler, user_match_handler};
use crate::models::user_match::MarkDoneRequest;

#[get("/matches")]
async fn list_matches(pool: web::Data<PgPool>) -> actix_web::Result<HttpResponse> {
    match_handler::list_matches(pool).await
}

#[post("/matches/{external_id}/done")]
async fn mark_match_done(
    path: web::Path<i64>,
    body: web::Json<MarkDoneRequest>,
    pool: web::Data<PgPool>,
) -> actix_web::Result<HttpResponse> {
    user_match_handler::mark_match_done(path.into_inner(), body, pool).await
}
