mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::models::ScoringAdjustments;
use crate::routes::engine::AppState;
use crate::services::{AiDriver, InMemoryStore, LatencySimulator, LocalDriver, RemoteDriver};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap_or_default())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before logging so the subscriber can use it
    let settings = Settings::load().unwrap_or_else(|e| panic!("Configuration error: {}", e));

    // Initialize logging; RUST_LOG overrides the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Inmo engine service...");
    info!("Configuration loaded successfully");

    // Build the catalog store
    let store = if settings.engine.seed_demo_data {
        info!("Seeding demo catalog");
        Arc::new(InMemoryStore::with_demo_data())
    } else {
        Arc::new(InMemoryStore::new())
    };

    // Select the engine driver
    let adjustments = ScoringAdjustments::from(settings.scoring.adjustments.clone());

    let driver: Arc<dyn AiDriver> = match settings.engine.driver.as_str() {
        "remote" => {
            let endpoint = settings.engine.remote_endpoint.clone().unwrap_or_else(|| {
                tracing::error!("Remote driver selected but engine.remote_endpoint is not set");
                panic!("Configuration error: engine.remote_endpoint is required for the remote driver");
            });
            info!("Using remote engine driver at {}", endpoint);
            Arc::new(RemoteDriver::new(
                endpoint,
                settings.engine.remote_api_key.clone(),
            ))
        }
        _ => {
            info!("Using local engine driver");
            match settings.engine.rng_seed {
                Some(seed) => Arc::new(LocalDriver::with_seed(adjustments, seed)),
                None => Arc::new(LocalDriver::new(adjustments)),
            }
        }
    };

    let latency = LatencySimulator::new(
        settings.latency.enabled,
        settings.latency.min_ms,
        settings.latency.max_ms,
    );

    info!(
        "Latency simulation {} ({}-{} ms)",
        if settings.latency.enabled { "enabled" } else { "disabled" },
        settings.latency.min_ms,
        settings.latency.max_ms
    );

    // Build application state
    let app_state = AppState {
        store,
        driver,
        latency,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
