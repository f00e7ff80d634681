use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::search::run_search;
use super::{
    ApiResponse, AppState, HealthResponse, NavbarYearsResponse, SearchParams, SearchResponse,
};
use crate::services::SearchVariant;

/// `GET /api/navbar/search?q=`
///
/// The navbar box. Same lookup as the page search, but results link back with
/// `variant=navbar` so selecting one resets the box.
pub async fn navbar_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<ApiResponse<SearchResponse>> {
    let controller = state.controller(SearchVariant::Navbar);
    Json(ApiResponse::success(
        run_search(&controller, params.q.as_deref()).await,
    ))
}

/// `GET /api/navbar/years`
///
/// Hover trigger for the years menu. The first call fetches, later calls are
/// served from the cache; a failed fetch still answers with the fallback menu.
pub async fn navbar_years(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<NavbarYearsResponse>> {
    let menu = state.shared.menu.ensure_loaded().await.clone();

    Json(ApiResponse::success(NavbarYearsResponse {
        state: state.shared.menu.state(),
        menu,
    }))
}

/// `GET /health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "alive",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        menu: state.shared.menu.state(),
    }))
}
