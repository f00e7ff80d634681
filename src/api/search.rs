use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::info;

use super::{ApiError, ApiResponse, AppState, GoParams, SearchParams, SearchResponse};
use crate::models::SearchResult;
use crate::services::{SearchController, SearchVariant};

/// Submits `query` (if any) and packages the resulting session.
pub(super) async fn run_search(controller: &SearchController, query: Option<&str>) -> SearchResponse {
    if let Some(query) = query {
        controller.submit(query).await;
    }

    let session = controller.snapshot().await;
    SearchResponse {
        variant: controller.variant(),
        no_results: session.is_no_results(),
        session,
    }
}

/// `GET /api/search?q=`
///
/// Runs one page-variant search and returns the resulting session. Lookup
/// failures are reported through `status`, never as an HTTP error.
pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<ApiResponse<SearchResponse>> {
    let controller = state.controller(SearchVariant::Page);
    Json(ApiResponse::success(
        run_search(&controller, params.q.as_deref()).await,
    ))
}

/// `GET /go/{imdb_id}?title=&variant=`
///
/// Selecting a result; answers with a redirect to the canonical detail page.
/// `variant` names the box the result came from and defaults to `page`.
pub async fn go_to_movie(
    State(state): State<Arc<AppState>>,
    Path(imdb_id): Path<String>,
    Query(params): Query<GoParams>,
) -> Result<Response, ApiError> {
    if imdb_id.trim().is_empty() {
        return Err(ApiError::validation("Movie identifier cannot be empty"));
    }

    let controller = state.controller(params.variant);
    let result = SearchResult {
        title: params.title.unwrap_or_default(),
        imdb_id,
        poster_path: None,
        release_date: None,
        vote_average: None,
    };

    let destination = controller.select_result(&result).await;
    info!(
        imdb_id = %result.imdb_id,
        variant = ?params.variant,
        destination = %destination,
        "Redirecting to movie page"
    );

    Ok(Redirect::to(&destination).into_response())
}
