use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::services::sync_service::MatchSyncService;

/// Triggers a sync run on demand. The scheduler drives the same service on
/// its cron cadence.
#[tracing::instrument(name = "Running a manual sync", skip(sync_service))]
pub async fn run_sync(sync_service: web::Data<MatchSyncService>) -> actix_web::Result<HttpResponse> {
    match sync_service.run().await {
        Ok(report) => Ok(HttpResponse::Ok().json(report)),
        Err(e) => {
            tracing::error!("Manual sync failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Sync failed"
            })))
        }
    }
}
