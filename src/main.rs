//! ADMS Backend
//!
//! Read-only REST backend for browsing soldier, weapon, battalion and war
//! records held in a schema-less document store.

mod api;
mod config;
mod db;
mod errors;
mod models;
mod screens;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::{mapping::collections, Repository, SqliteDocumentStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Repository,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ADMS Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Open document store
    let store = Arc::new(SqliteDocumentStore::open(&config.db_path).await?);

    if let Some(seed_path) = &config.seed_path {
        tracing::info!("Importing seed file {:?}", seed_path);
        let written = db::import_seed_file(store.as_ref(), seed_path).await?;
        tracing::info!("Seed import wrote {} documents", written);
    }

    let soldiers = store.count(collections::SOLDIER).await?;
    tracing::info!("Store holds {} soldier documents", soldiers);

    // Create application state
    let state = AppState {
        repo: Repository::new(store),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Soldiers
        .route("/soldiers", get(api::list_soldiers))
        .route("/soldiers/search", get(api::search_soldiers))
        .route("/soldiers/{id}", get(api::get_soldier))
        // Wars
        .route("/wars", get(api::list_wars))
        .route("/wars/{date}", get(api::get_war))
        // Weapons
        .route("/weapons/{id}", get(api::get_weapon))
        .route("/inventory/{id}", get(api::get_inventory))
        // Battalions
        .route("/battalions", get(api::list_battalions))
        .route("/battalions/{captain_id}", get(api::get_battalion))
        // Lookups
        .route("/locations/{pincode}", get(api::get_location))
        .route("/medals/{name}", get(api::get_medal));

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
