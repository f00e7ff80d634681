use axum::{
    body::Body,
    http::{Uri, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

use super::ApiError;

#[derive(RustEmbed)]
#[folder = "assets"]
struct Asset;

/// Static file by request path, if one is embedded.
pub fn asset_response(path: &str) -> Option<Response> {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return None;
    }

    Asset::get(path).map(|content| {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        (
            [
                (header::CONTENT_TYPE, mime.as_ref().to_string()),
                (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
            ],
            Body::from(content.data),
        )
            .into_response()
    })
}

pub async fn serve_asset(uri: Uri) -> Response {
    asset_response(uri.path())
        .unwrap_or_else(|| ApiError::NotFound(format!("{} not found", uri.path())).into_response())
}
