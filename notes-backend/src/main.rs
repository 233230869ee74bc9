use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use std::time::{Duration, Instant};

mod config;
mod controllers;
mod notes;

use config::Config;
use notes::{NoteService, NoteStore};

pub struct AppState {
    pub notes: NoteService,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    log::info!("Notes backend v{}", controllers::health::VERSION);

    let store = match &config.data_file {
        Some(path) => {
            log::info!("Using notes file {}", path.display());
            NoteStore::open(path)
        }
        None => {
            log::info!("Notes persistence disabled, keeping notes in memory only");
            NoteStore::in_memory()
        }
    };
    if store.is_empty() {
        log::info!("Starting with an empty note collection");
    }
    let state = web::Data::new(AppState {
        notes: NoteService::new(Arc::new(store)),
        started_at: Instant::now(),
    });

    log::info!("Starting server on {}:{}", config.host, config.port);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::notes::config)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    let server_handle = server.handle();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        // Every mutation is persisted before it returns, so there is nothing to flush
        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(Duration::from_secs(5), server_stop).await.is_err() {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    server.await
}
