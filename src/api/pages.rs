//! HTML landing pages and the landing sitemap.

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error};

use super::{ApiError, AppState, SearchParams, assets};
use crate::render::{self, PageContext};
use crate::services::{SearchSession, SearchVariant};
use crate::sitemap;

pub const SITEMAP_CACHE_CONTROL: &str = "public, max-age=86400, s-maxage=86400";

/// Runs the navbar box for `?nq=`; `None` when the box was not submitted.
async fn navbar_session(state: &AppState, params: &SearchParams) -> Option<SearchSession> {
    let query = params.nq.as_deref()?;
    let controller = state.controller(SearchVariant::Navbar);
    let outcome = controller.submit(query).await;
    debug!(?outcome, "Navbar search");
    Some(controller.snapshot().await)
}

/// `GET /`
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let config = state.shared.config().await;
    let landings = &state.shared.landings;
    let navbar_search = navbar_session(&state, &params).await;

    let ctx = PageContext {
        brand: landings.default_brand(),
        canonical: format!("{}/", config.site_origin()),
        image_base_url: &config.metadata.image_base_url,
        menu: state.shared.menu.menu(),
        navbar_search: navbar_search.as_ref(),
    };

    Html(render::index_page(landings, &ctx))
}

/// `GET /{slug}`
///
/// Paths that are not landing variants fall through to the embedded assets.
pub async fn landing(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<SearchParams>,
    uri: Uri,
) -> Response {
    let Some(page) = state.shared.landings.get(&slug) else {
        return assets::asset_response(uri.path())
            .unwrap_or_else(|| ApiError::landing_not_found(&slug).into_response());
    };

    let config = state.shared.config().await;
    let controller = state.controller(SearchVariant::Page);
    if let Some(query) = params.q.as_deref() {
        let outcome = controller.submit(query).await;
        debug!(slug = %slug, ?outcome, "Landing page search");
    }
    let session = controller.snapshot().await;
    let navbar_search = navbar_session(&state, &params).await;

    let ctx = PageContext {
        brand: &page.brand,
        canonical: format!("{}{}", config.site_origin(), page.path()),
        image_base_url: &config.metadata.image_base_url,
        menu: state.shared.menu.menu(),
        navbar_search: navbar_search.as_ref(),
    };

    Html(render::landing_page(page, &ctx, &session)).into_response()
}

/// `GET /api/sitemap-landingpages`
pub async fn landing_sitemap(State(state): State<Arc<AppState>>) -> Response {
    let origin = state.shared.config().await.site_origin().to_string();

    match sitemap::landing_sitemap(&state.shared.landings, &origin, Utc::now()) {
        Ok(xml) => (
            [
                (header::CONTENT_TYPE, "application/xml"),
                (header::CACHE_CONTROL, SITEMAP_CACHE_CONTROL),
            ],
            xml,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to generate landing sitemap");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                "Error generating sitemap",
            )
                .into_response()
        }
    }
}
