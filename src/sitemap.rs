//! Sitemap listing every landing variant.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::landing::LandingRegistry;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const LANDING_PRIORITY: &str = "0.8";
const LANDING_CHANGEFREQ: &str = "weekly";

#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Failed to serialize sitemap: {0}")]
    Serialize(String),
}

#[derive(Serialize)]
#[serde(rename = "urlset")]
struct UrlSet {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    url: Vec<UrlEntry>,
}

#[derive(Serialize)]
struct UrlEntry {
    loc: String,
    lastmod: String,
    changefreq: &'static str,
    priority: &'static str,
}

/// Renders the landing-page sitemap with `lastmod` set to `generated_at`.
pub fn landing_sitemap(
    registry: &LandingRegistry,
    origin: &str,
    generated_at: DateTime<Utc>,
) -> Result<String, SitemapError> {
    let lastmod = generated_at.to_rfc3339_opts(SecondsFormat::Millis, true);
    let origin = origin.trim_end_matches('/');

    let set = UrlSet {
        xmlns: SITEMAP_NAMESPACE,
        url: registry
            .pages()
            .iter()
            .map(|page| UrlEntry {
                loc: format!("{origin}{}", page.path()),
                lastmod: lastmod.clone(),
                changefreq: LANDING_CHANGEFREQ,
                priority: LANDING_PRIORITY,
            })
            .collect(),
    };

    let body = quick_xml::se::to_string(&set).map_err(|e| SitemapError::Serialize(e.to_string()))?;
    Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn lists_every_landing_page() {
        let registry = LandingRegistry::builtin().unwrap();
        let generated_at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

        let xml = landing_sitemap(&registry, "https://n123movie.me/", generated_at).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(SITEMAP_NAMESPACE));
        assert_eq!(xml.matches("<url>").count(), registry.pages().len());
        assert!(xml.contains("<loc>https://n123movie.me/fmovies</loc>"));
        assert!(xml.contains("<loc>https://n123movie.me/yesmovies</loc>"));
        assert!(xml.contains("<lastmod>2025-01-02T03:04:05.000Z</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
    }
}
