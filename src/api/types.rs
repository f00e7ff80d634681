use serde::{Deserialize, Serialize};

use crate::models::YearMenu;
use crate::services::{MenuState, SearchSession, SearchVariant};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// `?q=` on landing pages and the search APIs; `?nq=` is the navbar box on
/// HTML pages.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub nq: Option<String>,
}

/// `?title=&variant=` on `/go/{imdb_id}`.
#[derive(Debug, Default, Deserialize)]
pub struct GoParams {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub variant: SearchVariant,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub variant: SearchVariant,
    pub no_results: bool,
    #[serde(flatten)]
    pub session: SearchSession,
}

#[derive(Debug, Serialize)]
pub struct NavbarYearsResponse {
    pub state: MenuState,
    pub menu: YearMenu,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub menu: MenuState,
}
