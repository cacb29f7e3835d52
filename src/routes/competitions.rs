use actix_web::{get, Responder};

use crate::handlers::competition_handler::list_supported_competitions;

#[get("/competitions")]
async fn supported_competitions() -> impl Responder {
    list_supported_competitions().await
}
