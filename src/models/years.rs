use serde::{Deserialize, Serialize};

/// Used when the aggregation endpoint does not report a catalog size.
pub const DEFAULT_TOTAL_MOVIES: u64 = 95_942;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecadeGroup {
    pub decade: String,
    #[serde(default)]
    pub years: Vec<i32>,
}

impl DecadeGroup {
    pub fn new(decade: impl Into<String>, years: Vec<i32>) -> Self {
        Self {
            decade: decade.into(),
            years,
        }
    }
}

/// Raw body of the years aggregation endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearsPayload {
    #[serde(default)]
    pub years: Option<Vec<i32>>,
    #[serde(default)]
    pub decades: Option<Vec<DecadeGroup>>,
    #[serde(default)]
    pub processed_movies: Option<u64>,
    #[serde(default)]
    pub total_movies: Option<u64>,
    #[serde(default)]
    pub found_movies: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuProgress {
    pub processed_movies: u64,
    pub total_movies: u64,
    pub found_movies: u64,
}

impl Default for MenuProgress {
    fn default() -> Self {
        Self {
            processed_movies: 0,
            total_movies: DEFAULT_TOTAL_MOVIES,
            found_movies: 0,
        }
    }
}

impl MenuProgress {
    /// Zero counts are treated as missing, matching how the site has always read them.
    #[must_use]
    pub fn from_payload(payload: &YearsPayload) -> Self {
        let defaults = Self::default();
        let pick = |value: Option<u64>, fallback: u64| value.filter(|v| *v != 0).unwrap_or(fallback);

        Self {
            processed_movies: pick(payload.processed_movies, defaults.processed_movies),
            total_movies: pick(payload.total_movies, defaults.total_movies),
            found_movies: pick(payload.found_movies, defaults.found_movies),
        }
    }
}

/// Where a loaded menu came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuSource {
    Live,
    Fallback,
}

/// The navbar "years" menu once it has been loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearMenu {
    pub years: Vec<i32>,
    pub decades: Vec<DecadeGroup>,
    pub progress: MenuProgress,
    pub source: MenuSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_camel_case_fields() {
        let payload: YearsPayload = serde_json::from_str(
            r#"{
                "years": [2024, 2023],
                "decades": [{"decade": "2020s", "years": [2024, 2023]}],
                "processedMovies": 120,
                "totalMovies": 500,
                "foundMovies": 80
            }"#,
        )
        .unwrap();

        assert_eq!(payload.years, Some(vec![2024, 2023]));
        assert_eq!(payload.decades.as_ref().map(Vec::len), Some(1));

        let progress = MenuProgress::from_payload(&payload);
        assert_eq!(progress.processed_movies, 120);
        assert_eq!(progress.total_movies, 500);
        assert_eq!(progress.found_movies, 80);
    }

    #[test]
    fn progress_defaults_when_counts_missing() {
        let payload = YearsPayload {
            years: Some(vec![]),
            total_movies: Some(0),
            ..YearsPayload::default()
        };

        assert_eq!(MenuProgress::from_payload(&payload), MenuProgress::default());
        assert_eq!(MenuProgress::default().total_movies, DEFAULT_TOTAL_MOVIES);
    }
}
