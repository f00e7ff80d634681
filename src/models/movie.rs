use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One candidate as returned by the metadata service. The identifier may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieListItem {
    pub title: String,
    #[serde(default, alias = "external_id")]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, alias = "rating")]
    pub vote_average: Option<f64>,
}

/// A candidate that can be navigated to: its identifier is known to be non-blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub imdb_id: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
}

impl SearchResult {
    /// Keeps the item only if it carries a non-blank identifier.
    /// Every other field is passed through untouched.
    #[must_use]
    pub fn from_item(item: MovieListItem) -> Option<Self> {
        let imdb_id = item.imdb_id.filter(|id| !id.trim().is_empty())?;

        Some(Self {
            title: item.title,
            imdb_id,
            poster_path: item.poster_path,
            release_date: item.release_date,
            vote_average: item.vote_average,
        })
    }

    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.release_date.as_deref().and_then(release_year)
    }

    #[must_use]
    pub fn rating_label(&self) -> String {
        self.vote_average
            .map_or_else(|| "N/A".to_string(), |rating| format!("{rating:.1}"))
    }
}

/// Year of a `YYYY-MM-DD` release date, falling back to a leading four digit year.
#[must_use]
pub fn release_year(date: &str) -> Option<i32> {
    let date = date.trim();
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(parsed.year());
    }

    date.get(..4)
        .filter(|prefix| prefix.chars().all(|c| c.is_ascii_digit()))
        .and_then(|prefix| prefix.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, imdb_id: Option<&str>) -> MovieListItem {
        MovieListItem {
            title: title.to_string(),
            imdb_id: imdb_id.map(str::to_string),
            poster_path: Some("/poster.jpg".to_string()),
            release_date: Some("2010-07-16".to_string()),
            vote_average: Some(8.4),
        }
    }

    #[test]
    fn from_item_requires_identifier() {
        assert!(SearchResult::from_item(item("No Id", None)).is_none());
        assert!(SearchResult::from_item(item("Empty", Some(""))).is_none());
        assert!(SearchResult::from_item(item("Blank", Some("   "))).is_none());

        let result = SearchResult::from_item(item("Inception", Some("tt1375666"))).unwrap();
        assert_eq!(result.imdb_id, "tt1375666");
        assert_eq!(result.poster_path.as_deref(), Some("/poster.jpg"));
        assert_eq!(result.vote_average, Some(8.4));
    }

    #[test]
    fn deserializes_external_id_alias() {
        let item: MovieListItem =
            serde_json::from_str(r#"{"title":"Inception","external_id":"tt1375666","rating":8.8}"#)
                .unwrap();
        assert_eq!(item.imdb_id.as_deref(), Some("tt1375666"));
        assert_eq!(item.vote_average, Some(8.8));
        assert!(item.poster_path.is_none());
    }

    #[test]
    fn release_year_parsing() {
        assert_eq!(release_year("2010-07-16"), Some(2010));
        assert_eq!(release_year("1999"), Some(1999));
        assert_eq!(release_year(""), None);
        assert_eq!(release_year("soon"), None);
    }

    #[test]
    fn rating_label_formats_one_decimal() {
        let mut result = SearchResult::from_item(item("Inception", Some("tt1375666"))).unwrap();
        assert_eq!(result.rating_label(), "8.4");
        result.vote_average = None;
        assert_eq!(result.rating_label(), "N/A");
    }
}
