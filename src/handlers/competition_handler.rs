use actix_web::HttpResponse;
use serde_json::json;

use crate::services::competitions;

pub async fn list_supported_competitions() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "competitions": competitions::supported() }))
}
