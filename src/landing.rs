//! Catalog of the themed landing variants and the navbar brand shown on each path.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../content/landings.toml");

#[derive(Debug, Error)]
pub enum LandingError {
    #[error("Failed to parse landing catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Landing page with empty slug")]
    EmptySlug,

    #[error("Duplicate landing slug: {0}")]
    DuplicateSlug(String),
}

/// Navbar logo and tagline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
    pub tagline: String,
    pub logo_first: String,
    pub logo_second: String,
    pub icon_color: String,
    pub tagline_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub button_bg: String,
    pub button_hover: String,
    pub search_border: String,
    pub search_focus: String,
    pub card_hover: String,
    pub play_button: String,
    pub text_accent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSection {
    pub title: String,
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingContent {
    pub heading: String,
    #[serde(default)]
    pub intro: Vec<String>,
    #[serde(default)]
    pub sections: Vec<ContentSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingPage {
    pub slug: String,
    pub keyword: String,
    /// Which of the visual layouts the page was designed for.
    pub variant: u8,
    pub description: String,
    pub seo_title: String,
    pub seo_description: String,
    pub brand: Brand,
    pub theme: ColorTheme,
    pub content: LandingContent,
}

impl LandingPage {
    #[must_use]
    pub fn path(&self) -> String {
        format!("/{}", self.slug)
    }
}

#[derive(Debug, Deserialize)]
struct Catalog {
    default_brand: Brand,
    #[serde(default)]
    pages: Vec<LandingPage>,
}

#[derive(Debug, Clone)]
pub struct LandingRegistry {
    default_brand: Brand,
    pages: Vec<LandingPage>,
}

impl LandingRegistry {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, LandingError> {
        Self::from_toml(BUILTIN_CATALOG)
    }

    pub fn from_toml(source: &str) -> Result<Self, LandingError> {
        let catalog: Catalog = toml::from_str(source)?;

        let mut seen = HashSet::new();
        for page in &catalog.pages {
            if page.slug.trim().is_empty() {
                return Err(LandingError::EmptySlug);
            }
            if !seen.insert(page.slug.as_str()) {
                return Err(LandingError::DuplicateSlug(page.slug.clone()));
            }
        }

        Ok(Self {
            default_brand: catalog.default_brand,
            pages: catalog.pages,
        })
    }

    #[must_use]
    pub fn pages(&self) -> &[LandingPage] {
        &self.pages
    }

    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&LandingPage> {
        self.pages.iter().find(|page| page.slug == slug)
    }

    /// Brand for a request path; anything that is not a landing page gets the default.
    #[must_use]
    pub fn brand_for_path(&self, path: &str) -> &Brand {
        let slug = path.trim_start_matches('/');
        self.get(slug).map_or(&self.default_brand, |page| &page.brand)
    }

    #[must_use]
    pub const fn default_brand(&self) -> &Brand {
        &self.default_brand
    }
}
