use actix_web::web;

pub mod backend_health;
pub mod competitions;
pub mod matches;
pub mod registration;
pub mod sync;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health)
        .service(registration::register)
        .service(competitions::supported_competitions)
        .service(matches::list_matches)
        .service(matches::mark_match_done)
        .service(sync::run_sync);
}
