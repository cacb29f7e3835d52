use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db;
use crate::db::helpers::db_result;
use crate::ok_or_return;

#[tracing::instrument(name = "Listing stored matches", skip(pool))]
pub async fn list_matches(pool: web::Data<PgPool>) -> actix_web::Result<HttpResponse> {
    let matches = ok_or_return!(db_result(db::matches::list_matches(&pool).await));
    tracing::info!("Fetched {} matches from the store", matches.len());
    Ok(HttpResponse::Ok().json(matches))
}
