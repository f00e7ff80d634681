//! Server-side HTML for the landing pages.
//!
//! The only dynamic parts are the navbar years menu (once loaded) and the
//! search results of the navbar and landing boxes.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

use crate::landing::{Brand, LandingPage, LandingRegistry};
use crate::models::{SearchResult, YearMenu};
use crate::services::{SearchSession, SearchStatus, SearchVariant};

const PLACEHOLDER_POSTER: &str = "/placeholder.svg";

pub struct PageContext<'a> {
    pub brand: &'a Brand,
    pub canonical: String,
    pub image_base_url: &'a str,
    pub menu: Option<&'a YearMenu>,
    /// Session of the navbar box when the request carried `?nq=`.
    pub navbar_search: Option<&'a SearchSession>,
}

fn head(out: &mut String, title: &str, description: &str, canonical: &str) {
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<meta name=\"description\" content=\"{}\">\n\
         <link rel=\"canonical\" href=\"{}\">\n<link rel=\"stylesheet\" href=\"/site.css\">\n</head>\n<body>\n",
        text(title),
        attr(description),
        attr(canonical)
    );
}

fn navbar(out: &mut String, ctx: &PageContext<'_>) {
    let brand = ctx.brand;
    let _ = write!(
        out,
        "<nav class=\"navbar\">\n<a class=\"logo\" href=\"/\"><span class=\"logo-first\">{}</span>\
         <span class=\"logo-second\">{}</span><span class=\"logo-icon\" style=\"background: {}\"></span>\
         <small style=\"color: {}\">{}</small></a>\n<a href=\"/home\">HOME</a>\n",
        text(&brand.logo_first),
        text(&brand.logo_second),
        attr(&brand.icon_color),
        attr(&brand.tagline_color),
        text(&brand.tagline)
    );

    out.push_str("<div class=\"years-menu\" data-src=\"/api/navbar/years\">\n<span>YEARS</span>\n");
    match ctx.menu {
        Some(menu) if !menu.decades.is_empty() => {
            for group in &menu.decades {
                let _ = write!(out, "<h3>{}</h3>\n<ul>", text(&group.decade));
                for year in &group.years {
                    let _ = write!(out, "<li><a href=\"/year/{year}\">{year}</a></li>");
                }
                out.push_str("</ul>\n");
            }
        }
        Some(menu) => {
            out.push_str("<ul>");
            for year in &menu.years {
                let _ = write!(out, "<li><a href=\"/year/{year}\">{year}</a></li>");
            }
            out.push_str("</ul>\n");
        }
        None => out.push_str("<p class=\"muted\">Hover to load years</p>\n"),
    }
    out.push_str("</div>\n");

    let query = ctx.navbar_search.map_or("", |session| session.query.as_str());
    let _ = write!(
        out,
        "<div class=\"navbar-search\" data-src=\"/api/navbar/search\">\n\
         <form method=\"get\"><input type=\"text\" name=\"nq\" value=\"{}\" \
         placeholder=\"Search movies...\"><button type=\"submit\">Search</button></form>\n",
        attr(query)
    );
    if let Some(session) = ctx.navbar_search.filter(|session| session.visible) {
        out.push_str("<div class=\"navbar-results\">\n");
        results_body(out, session, ctx.image_base_url, SearchVariant::Navbar);
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n</nav>\n");
}

fn result_card(
    out: &mut String,
    result: &SearchResult,
    image_base_url: &str,
    variant: SearchVariant,
) {
    let poster = result.poster_path.as_deref().map_or_else(
        || PLACEHOLDER_POSTER.to_string(),
        |path| format!("{}{path}", image_base_url.trim_end_matches('/')),
    );
    let year = result
        .year()
        .map_or_else(|| "N/A".to_string(), |year| year.to_string());
    let mut href = format!(
        "/go/{}?title={}",
        urlencoding::encode(&result.imdb_id),
        urlencoding::encode(&result.title)
    );
    if variant == SearchVariant::Navbar {
        href.push_str("&variant=navbar");
    }

    let _ = write!(
        out,
        "<li class=\"result\"><a href=\"{}\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\">\
         <h3>{}</h3><p>{} &bull; &#11088; {}</p></a></li>\n",
        attr(&href),
        attr(&poster),
        attr(&result.title),
        text(&result.title),
        year,
        text(&result.rating_label())
    );
}

fn search_results(out: &mut String, session: &SearchSession, image_base_url: &str) {
    if !session.visible {
        return;
    }

    let _ = write!(
        out,
        "<section class=\"results\">\n<h2>Search Results for \"{}\"</h2>\n",
        text(&session.query)
    );
    results_body(out, session, image_base_url, SearchVariant::Page);
    out.push_str("</section>\n");
}

/// Result grid, or the no-results / failed message, for a visible session.
fn results_body(
    out: &mut String,
    session: &SearchSession,
    image_base_url: &str,
    variant: SearchVariant,
) {
    match &session.status {
        SearchStatus::Failed { .. } => {
            out.push_str("<p class=\"muted\">Search is unavailable right now. Please try again.</p>\n");
        }
        _ if session.results.is_empty() => {
            let _ = write!(
                out,
                "<p>No movies found for \"{}\"</p>\n<p class=\"muted\">Try a different search term</p>\n",
                text(session.query.trim())
            );
        }
        _ => {
            out.push_str("<ul class=\"grid\">\n");
            for result in &session.results {
                result_card(out, result, image_base_url, variant);
            }
            out.push_str("</ul>\n");
        }
    }
}

#[must_use]
pub fn landing_page(page: &LandingPage, ctx: &PageContext<'_>, session: &SearchSession) -> String {
    let theme = &page.theme;
    let mut out = String::with_capacity(16 * 1024);

    head(&mut out, &page.seo_title, &page.seo_description, &ctx.canonical);
    navbar(&mut out, ctx);

    let _ = write!(
        out,
        "<main class=\"landing variant-{}\" style=\"--primary: {}; --secondary: {}; --accent: {}; \
         --button-bg: {}; --button-hover: {}; --search-border: {}; --text-accent: {}\">\n\
         <header class=\"hero\">\n<h1>{}</h1>\n<p>{}</p>\n\
         <form method=\"get\" action=\"{}\"><input type=\"text\" name=\"q\" value=\"{}\" \
         placeholder=\"Search movies or series\"><button type=\"submit\">Search</button></form>\n\
         <a class=\"cta\" href=\"/home\">Browse Full Collection</a>\n</header>\n",
        page.variant,
        attr(&theme.primary),
        attr(&theme.secondary),
        attr(&theme.accent),
        attr(&theme.button_bg),
        attr(&theme.button_hover),
        attr(&theme.search_border),
        attr(&theme.text_accent),
        text(&page.keyword.to_uppercase()),
        text(&page.description),
        attr(&page.path()),
        attr(&session.query)
    );

    search_results(&mut out, session, ctx.image_base_url);

    let _ = write!(out, "<article class=\"copy\">\n<h2>{}</h2>\n", text(&page.content.heading));
    for paragraph in &page.content.intro {
        let _ = writeln!(out, "<p>{}</p>", text(paragraph));
    }
    for section in &page.content.sections {
        let _ = writeln!(out, "<h3>{}</h3>", text(&section.title));
        for paragraph in &section.paragraphs {
            let _ = writeln!(out, "<p>{}</p>", text(paragraph));
        }
    }
    out.push_str("</article>\n</main>\n");

    let _ = write!(
        out,
        "<footer><strong>{}</strong><p>Stream premium entertainment content online.</p></footer>\n</body>\n</html>\n",
        text(&page.keyword.to_uppercase())
    );

    out
}

#[must_use]
pub fn index_page(registry: &LandingRegistry, ctx: &PageContext<'_>) -> String {
    let mut out = String::with_capacity(4 * 1024);
    let brand = registry.default_brand();

    head(&mut out, &brand.name, &brand.tagline, &ctx.canonical);
    navbar(&mut out, ctx);

    out.push_str("<main class=\"index\">\n<ul>\n");
    for page in registry.pages() {
        let _ = writeln!(
            out,
            "<li><a href=\"{}\">{}</a> &ndash; {}</li>",
            attr(&page.path()),
            text(&page.keyword),
            text(&page.description)
        );
    }
    out.push_str("</ul>\n</main>\n</body>\n</html>\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MenuProgress, MenuSource};
    use crate::models::DecadeGroup;

    fn registry() -> LandingRegistry {
        LandingRegistry::builtin().unwrap()
    }

    fn ctx<'a>(registry: &'a LandingRegistry, menu: Option<&'a YearMenu>) -> PageContext<'a> {
        PageContext {
            brand: registry.brand_for_path("/fmovies"),
            canonical: "https://n123movie.me/fmovies".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/w500",
            menu,
            navbar_search: None,
        }
    }

    #[test]
    fn renders_copy_and_brand() {
        let registry = registry();
        let page = registry.get("fmovies").unwrap();

        let html = landing_page(page, &ctx(&registry, None), &SearchSession::default());

        assert!(html.contains("<h1>FMOVIES</h1>"));
        assert!(html.contains(&page.content.heading));
        assert!(html.contains("Hover to load years"));
        assert!(!html.contains("Search Results"));
    }

    #[test]
    fn escapes_query_and_results() {
        let registry = registry();
        let page = registry.get("fmovies").unwrap();
        let session = SearchSession {
            query: "<script>".to_string(),
            visible: true,
            status: SearchStatus::Ready,
            results: vec![SearchResult {
                title: "Tom & Jerry".to_string(),
                imdb_id: "tt1361336".to_string(),
                poster_path: None,
                release_date: Some("2021-02-10".to_string()),
                vote_average: Some(7.25),
            }],
            ..SearchSession::default()
        };

        let html = landing_page(page, &ctx(&registry, None), &session);

        assert!(!html.contains("<script>"));
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains("/go/tt1361336?title=Tom%20%26%20Jerry"));
        assert!(html.contains(PLACEHOLDER_POSTER));
        assert!(html.contains("2021"));
    }

    #[test]
    fn renders_no_results_and_failure_differently() {
        let registry = registry();
        let page = registry.get("fmovies").unwrap();
        let mut session = SearchSession {
            query: "zzzzzznotfound".to_string(),
            visible: true,
            status: SearchStatus::Ready,
            ..SearchSession::default()
        };

        let html = landing_page(page, &ctx(&registry, None), &session);
        assert!(html.contains("No movies found for \"zzzzzznotfound\""));

        session.status = SearchStatus::Failed {
            message: "timeout".to_string(),
        };
        let html = landing_page(page, &ctx(&registry, None), &session);
        assert!(html.contains("Search is unavailable"));
        assert!(!html.contains("timeout"));
    }

    #[test]
    fn renders_loaded_decades() {
        let registry = registry();
        let menu = YearMenu {
            years: vec![2027, 2026, 2025],
            decades: vec![DecadeGroup::new("2025s", vec![2027, 2026, 2025])],
            progress: MenuProgress::default(),
            source: MenuSource::Live,
        };

        let html = index_page(&registry, &ctx(&registry, Some(&menu)));

        assert!(html.contains("<h3>2025s</h3>"));
        assert!(html.contains("<a href=\"/year/2027\">2027</a>"));
        assert!(html.contains("<a href=\"/fmovies\">Fmovies</a>"));
    }

    #[test]
    fn navbar_box_renders_its_own_results() {
        let registry = registry();
        let page = registry.get("fmovies").unwrap();
        let navbar_session = SearchSession {
            query: "heat".to_string(),
            visible: true,
            status: SearchStatus::Ready,
            results: vec![SearchResult {
                title: "Heat".to_string(),
                imdb_id: "tt0113277".to_string(),
                poster_path: Some("/heat.jpg".to_string()),
                release_date: Some("1995-12-15".to_string()),
                vote_average: Some(7.9),
            }],
            ..SearchSession::default()
        };
        let mut ctx = ctx(&registry, None);
        ctx.navbar_search = Some(&navbar_session);

        let html = landing_page(page, &ctx, &SearchSession::default());

        assert!(html.contains("name=\"nq\" value=\"heat\""));
        assert!(html.contains("<div class=\"navbar-results\">"));
        assert!(html.contains("/go/tt0113277?title=Heat&amp;variant=navbar"));
        assert!(html.contains("https://image.tmdb.org/t/p/w500/heat.jpg"));
        assert!(!html.contains("Search Results for"));
    }

    #[test]
    fn navbar_box_is_empty_without_a_search() {
        let registry = registry();

        let html = index_page(&registry, &ctx(&registry, None));

        assert!(html.contains("name=\"nq\" value=\"\""));
        assert!(!html.contains("navbar-results"));
    }
}
