use actix_web::{post, web, HttpResponse};

use crate::handlers::sync_handler;
use crate::services::sync_service::MatchSyncService;

#[post("/sync/run")]
async fn run_sync(sync_service: web::Data<MatchSyncService>) -> actix_web::Result<HttpResponse> {
    sync_handler::run_sync(sync_service).await
}
