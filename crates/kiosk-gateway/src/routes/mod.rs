//! HTTP routes.

mod catalog;
mod image;

use std::sync::Arc;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use kiosk_commerce::catalog::RawCatalog;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::fetch::CatalogClient;

/// Shared route state.
#[derive(Clone)]
pub struct AppState {
    /// Upstream catalog client.
    pub client: CatalogClient,
    /// Plain HTTP client for the image proxy.
    pub http: reqwest::Client,
    /// `scheme://host` origin images must live under.
    pub catalog_origin: String,
    /// Last successfully fetched catalog document.
    pub last_good: Arc<RwLock<Option<RawCatalog>>>,
}

impl AppState {
    pub fn new(client: CatalogClient, http: reqwest::Client, catalog_origin: String) -> Self {
        Self {
            client,
            http,
            catalog_origin,
            last_good: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build the gateway router. The mini-app frontend is served from a
/// different origin, so the API allows any origin for GETs.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/health", get(health))
        .route("/api/catalog", get(catalog::get_catalog))
        .route("/api/img", get(image::get_image))
        .layer(cors)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
