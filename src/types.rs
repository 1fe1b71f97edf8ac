//! Shared types used across the scan and generate stages.
//!
//! These types are serialized into the scan manifest and read back by the
//! generate stage, so both sides must agree on their shape.

use serde::{Deserialize, Serialize};

/// A page generated from a markdown file in the content root.
///
/// Pages follow the `NNN-name` convention:
/// - Numbered files (`010-admissions.md`) appear in navigation, sorted by number
/// - Unnumbered files (`law-program.md`) are generated but hidden from navigation
///
/// If the file content is just a URL, the page becomes an external link in nav.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Title from first `# heading` in markdown, or link_title as fallback
    pub title: String,
    /// Display label in nav (filename with number stripped and dashes → spaces)
    pub link_title: String,
    /// URL slug (filename stem with number prefix stripped)
    pub slug: String,
    /// Raw markdown content (or URL for link pages)
    pub body: String,
    /// Whether this page appears in navigation (has number prefix)
    pub in_nav: bool,
    /// Sort key from number prefix (for ordering)
    pub sort_key: u32,
    /// If true, body is a URL and this page is an external link
    pub is_link: bool,
}

/// Top navigation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub title: String,
    pub route: Route,
    /// External links open in a new tab.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
}

/// A named location on the generated site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Route {
    Home,
    Programs,
    /// Markdown page addressed by slug (`/{slug}.html`).
    Page(String),
    /// Off-site URL, used for link pages.
    External(String),
}

impl Route {
    /// Absolute href for this route.
    pub fn href(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Programs => "/programs/".to_string(),
            Route::Page(slug) => format!("/{slug}.html"),
            Route::External(url) => url.clone(),
        }
    }
}

/// An entry in the homepage featured-post carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeaturedItem {
    pub title: String,
    /// Display string, shown verbatim (e.g. "FEB 10, 2025").
    pub date: String,
    pub category: String,
    /// Image URL.
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_hrefs() {
        assert_eq!(Route::Home.href(), "/");
        assert_eq!(Route::Programs.href(), "/programs/");
        assert_eq!(Route::Page("law-program".into()).href(), "/law-program.html");
        assert_eq!(
            Route::External("https://portal.example.edu".into()).href(),
            "https://portal.example.edu"
        );
    }

    #[test]
    fn route_serializes_tagged() {
        let json = serde_json::to_string(&Route::Page("about".into())).unwrap();
        assert_eq!(json, r#"{"kind":"page","target":"about"}"#);
        let back: Route = serde_json::from_str(r#"{"kind":"programs"}"#).unwrap();
        assert_eq!(back, Route::Programs);
    }
}
