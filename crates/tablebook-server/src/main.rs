use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod config;
mod gate;
mod models;
mod routes;

use adapters::{ConfiguredStore, CsvFileStore, MemoryStore, SheetsStore};
use application::BookingService;
use config::{ServerConfig, StorageConfig};
use tablebook::Gate;

/// Application service bound to the configured storage backend
pub type AppBookingService = BookingService<ConfiguredStore>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub booking_service: Arc<AppBookingService>,
    pub storage_kind: &'static str,
}

impl AppState {
    pub fn new(store: ConfiguredStore, gate: Gate) -> Self {
        let storage_kind = store.kind();
        Self {
            booking_service: Arc::new(BookingService::new(Arc::new(store), gate)),
            storage_kind,
        }
    }
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Tablebook API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn build_store(storage: StorageConfig) -> anyhow::Result<ConfiguredStore> {
    let store = match storage {
        StorageConfig::Memory => {
            tracing::warn!("Using in-memory storage - bookings are lost on restart");
            ConfiguredStore::Memory(MemoryStore::new())
        }
        StorageConfig::File { path } => {
            let store = CsvFileStore::new(path);
            tracing::info!("Using CSV file storage at {:?}", store.path());
            ConfiguredStore::File(store)
        }
        StorageConfig::Sheets(sheets) => {
            tracing::info!(
                "Using Sheets storage: spreadsheet {} range {}",
                sheets.spreadsheet_id,
                sheets.range
            );
            ConfiguredStore::Sheets(SheetsStore::new(sheets)?)
        }
    };
    Ok(store)
}

pub fn build_router(state: AppState) -> Router {
    // Booking routes sit behind the date gate
    let gated_routes = Router::new()
        .merge(routes::booking::router())
        .merge(routes::availability::router())
        .merge(routes::export::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gate::gate_middleware,
        ));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::availability::public_router())
        .merge(gated_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tablebook_server=info,tablebook=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Tablebook API initializing...");

    let config = ServerConfig::from_env()?;
    let store = build_store(config.storage)?;
    let state = AppState::new(store, Gate::default());

    let gate = state.booking_service.gate();
    if gate.is_open(routes::today()) {
        tracing::info!("Booking system open since {}", gate.open_date());
    } else {
        tracing::warn!("Booking system opens on {}", gate.open_date());
    }

    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    tracing::info!("Swagger UI: /swagger-ui");
    tracing::info!("Tablebook API listening on {}", config.bind);

    axum::serve(listener, router)
        .await
        .context("Server error")?;

    Ok(())
}
