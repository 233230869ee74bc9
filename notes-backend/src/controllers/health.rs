use actix_web::{web, HttpResponse, Responder};

use crate::AppState;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health_check)));
    cfg.service(web::resource("/version").route(web::get().to(get_version)));
}

/// Always 200 while the process serves requests. A failing persistence file
/// shows up as `degraded` rather than an error status.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store = state.notes.store();
    let persistence = store.persistence_status();
    let status = if persistence.healthy() { "ok" } else { "degraded" };

    HttpResponse::Ok().json(serde_json::json!({
        "status": status,
        "version": VERSION,
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "notes": store.len(),
        "persistence": persistence,
    }))
}

async fn get_version() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "version": VERSION
    }))
}
