use axum::{Router, http::HeaderValue, middleware, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::{RecordingNavigator, SearchController, SearchVariant};
use crate::state::SharedState;

mod assets;
mod error;
mod navbar;
mod observability;
mod pages;
mod search;
mod types;

pub use error::ApiError;
pub use pages::SITEMAP_CACHE_CONTROL;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Fresh controller for one request. Sessions are never shared between
    /// requests, so navigation is only recorded.
    #[must_use]
    pub fn controller(&self, variant: SearchVariant) -> SearchController {
        SearchController::new(
            variant,
            self.shared.lookup.clone(),
            Arc::new(RecordingNavigator::new()),
        )
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config)?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.shared.config.read().await.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/search", get(search::search_movies))
        .route("/navbar/search", get(navbar::navbar_search))
        .route("/navbar/years", get(navbar::navbar_years))
        .route("/sitemap-landingpages", get(pages::landing_sitemap));

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .route("/", get(pages::index))
        .route("/health", get(navbar::health))
        .route("/metrics", get(observability::get_metrics))
        .route("/go/{imdb_id}", get(search::go_to_movie))
        .route("/{slug}", get(pages::landing))
        .fallback(assets::serve_asset)
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}
