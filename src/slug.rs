//! Canonical paths for movie detail pages.

use regex::Regex;
use std::sync::OnceLock;

fn separator_regex() -> Option<&'static Regex> {
    static INSTANCE: OnceLock<Option<Regex>> = OnceLock::new();
    INSTANCE
        .get_or_init(|| Regex::new(r"[^a-z0-9]+").ok())
        .as_ref()
}

/// Lowercase title with every run of non-alphanumeric ASCII characters collapsed into `-`.
#[must_use]
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let Some(separators) = separator_regex() else {
        return lower
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");
    };

    separators
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// Detail page path for a movie: `/movie/{slug}-{imdb_id}`.
///
/// Deterministic and free of I/O. A title that slugifies to nothing yields
/// `/movie/{imdb_id}`.
#[must_use]
pub fn movie_url(title: &str, imdb_id: &str) -> String {
    let slug = slugify(title);
    let id = imdb_id.trim();

    if slug.is_empty() {
        format!("/movie/{id}")
    } else {
        format!("/movie/{slug}-{id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Inception"), "inception");
        assert_eq!(slugify("Spider-Man: Into the Spider-Verse"), "spider-man-into-the-spider-verse");
        assert_eq!(slugify("  Léon: The Professional!! "), "l-on-the-professional");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn movie_url_is_deterministic() {
        assert_eq!(movie_url("Inception", "tt1375666"), "/movie/inception-tt1375666");
        assert_eq!(
            movie_url("Inception", "tt1375666"),
            movie_url("Inception", "tt1375666")
        );
    }

    #[test]
    fn movie_url_without_slug() {
        assert_eq!(movie_url("!!!", "tt0000001"), "/movie/tt0000001");
    }
}
