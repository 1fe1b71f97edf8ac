//! Content directory scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads the content root and produces a
//! [`Manifest`] that the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── programs.toml                # Programme catalogue ([[program]] tables)
//! ├── featured.toml                # Featured posts ([[post]] tables)
//! ├── 010-admissions.md            # Page (numbered = appears in nav)
//! ├── 030-about.md                 # Also the home page "About" blurb
//! ├── 050-portal.md                # External link page (URL-only content)
//! ├── law-program.md               # Unnumbered = generated, hidden from nav
//! └── assets/                      # Copied verbatim to the output root
//! ```
//!
//! ## Validation
//!
//! The scanner enforces these rules:
//! - `programs.toml` and `featured.toml` must exist
//! - The catalogue passes [`Catalog::new`] validation
//! - There is at least one featured post
//! - Every programme `route` names an existing content page
//! - Page slugs are unique (case-insensitively) and never `index`, which
//!   belongs to the home page

use crate::catalog::{Catalog, CatalogError, ProgramRecord};
use crate::config::{self, SiteConfig};
use crate::naming::parse_entry_name;
use crate::types::{FeaturedItem, NavItem, Page, Route};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Required file not found: {0}")]
    MissingFile(PathBuf),
    #[error("featured.toml has no [[post]] entries")]
    NoFeatured,
    #[error("Program \"{program}\" routes to unknown page \"{route}\"")]
    UnknownRoute { program: String, route: String },
    #[error("{file}: page slug \"{slug}\" is reserved")]
    ReservedSlug { file: PathBuf, slug: String },
    #[error("{second} and {first} both produce the page \"{slug}\"")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Manifest output from the scan stage
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub navigation: Vec<NavItem>,
    pub catalog: Catalog,
    pub featured: Vec<FeaturedItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<Page>,
    pub config: SiteConfig,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ProgramsFile {
    #[serde(default)]
    program: Vec<ProgramRecord>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FeaturedFile {
    #[serde(default)]
    post: Vec<FeaturedItem>,
}

pub const PROGRAMS_FILE: &str = "programs.toml";
pub const FEATURED_FILE: &str = "featured.toml";
/// Slug of the page whose body doubles as the home page "About" blurb.
pub const ABOUT_SLUG: &str = "about";
/// Page slugs that would overwrite generated output.
const RESERVED_SLUGS: &[&str] = &["index"];

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    // Load site config (uses defaults if config.toml doesn't exist)
    let config = config::load_config(root)?;

    let programs: ProgramsFile = read_toml(&root.join(PROGRAMS_FILE))?;
    let catalog = Catalog::new(programs.program)?;
    debug!(
        programs = catalog.len(),
        levels = catalog.distinct_levels().len(),
        faculties = catalog.distinct_faculties().len(),
        "loaded catalog"
    );

    let featured: FeaturedFile = read_toml(&root.join(FEATURED_FILE))?;
    if featured.post.is_empty() {
        return Err(ScanError::NoFeatured);
    }

    let pages = parse_pages(root)?;
    check_routes(&catalog, &pages)?;

    for card in &config.academics {
        if !catalog.has_level(&card.level) {
            warn!(
                card = %card.name,
                level = %card.level,
                "academics card names a level with no programs; it will link to the full catalogue"
            );
        }
    }

    Ok(Manifest {
        navigation: build_navigation(&pages),
        catalog,
        featured: featured.post,
        pages,
        config,
    })
}

fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ScanError> {
    if !path.exists() {
        return Err(ScanError::MissingFile(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| ScanError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

/// Every tagged programme must route to a content page that is not a link.
fn check_routes(catalog: &Catalog, pages: &[Page]) -> Result<(), ScanError> {
    for program in catalog.programs() {
        let Some(route) = &program.route else {
            continue;
        };
        let found = pages.iter().any(|p| !p.is_link && &p.slug == route);
        if !found {
            return Err(ScanError::UnknownRoute {
                program: program.name.clone(),
                route: route.clone(),
            });
        }
        debug!(program = %program.name, route = %route, "dedicated page");
    }
    Ok(())
}

/// Programs first, then numbered pages in number order.
fn build_navigation(pages: &[Page]) -> Vec<NavItem> {
    let mut nav = vec![NavItem {
        title: "Programs".to_string(),
        route: Route::Programs,
        external: false,
    }];
    nav.extend(pages.iter().filter(|p| p.in_nav).map(|p| {
        if p.is_link {
            NavItem {
                title: p.link_title.clone(),
                route: Route::External(p.body.trim().to_string()),
                external: true,
            }
        } else {
            NavItem {
                title: p.link_title.clone(),
                route: Route::Page(p.slug.clone()),
                external: false,
            }
        }
    }));
    nav
}

/// Parse all markdown files in the root directory into pages.
///
/// Each `.md` file becomes a page. Numbered files (`NNN-name.md`) appear in
/// navigation sorted by number; unnumbered files are generated but hidden.
/// If a file's only content is a URL, it becomes an external link in the nav.
fn parse_pages(root: &Path) -> Result<Vec<Page>, ScanError> {
    let mut md_files: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .collect();

    md_files.sort();

    let mut pages = Vec::new();
    let mut seen: HashMap<String, &PathBuf> = HashMap::new();
    for md_path in &md_files {
        let stem = md_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let parsed = parse_entry_name(&stem);
        if parsed.name.is_empty() {
            warn!(file = %md_path.display(), "skipping page with no name after its number");
            continue;
        }
        // Output file names are compared case-insensitively
        let key = parsed.name.to_lowercase();
        if RESERVED_SLUGS.contains(&key.as_str()) {
            return Err(ScanError::ReservedSlug {
                file: md_path.clone(),
                slug: parsed.name,
            });
        }
        if let Some(first) = seen.insert(key, md_path) {
            return Err(ScanError::DuplicateSlug {
                slug: parsed.name,
                first: first.clone(),
                second: md_path.clone(),
            });
        }

        let in_nav = parsed.number.is_some();
        let sort_key = parsed.number.unwrap_or(u32::MAX);

        let content = fs::read_to_string(md_path)?;
        let trimmed = content.trim();

        // A page whose only content is a URL becomes an external link
        let is_link = !trimmed.contains('\n')
            && (trimmed.starts_with("http://") || trimmed.starts_with("https://"));

        let title = if is_link {
            parsed.display_title.clone()
        } else {
            content
                .lines()
                .find(|line| line.starts_with("# "))
                .map(|line| line.trim_start_matches("# ").trim().to_string())
                .unwrap_or_else(|| parsed.display_title.clone())
        };

        debug!(slug = %parsed.name, in_nav, is_link, "page");
        pages.push(Page {
            title,
            link_title: parsed.display_title,
            slug: parsed.name,
            body: content,
            in_nav,
            sort_key,
            is_link,
        });
    }

    pages.sort_by_key(|p| p.sort_key);
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    const PROGRAMS: &str = r#"
[[program]]
level = "Diploma"
name = "Diploma in Legal Studies"
faculty = "Law"

[[program]]
level = "Undergraduate"
name = "Bachelor of Law (LL.B)"
faculty = "Law"
route = "law-program"
"#;

    const FEATURED: &str = r#"
[[post]]
title = "Strategic Plan"
date = "FEB 3, 2025"
category = "BLOG"
image = "https://example.org/plan.jpg"
"#;

    /// Minimal valid content root.
    fn minimal() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(PROGRAMS_FILE), PROGRAMS).unwrap();
        fs::write(tmp.path().join(FEATURED_FILE), FEATURED).unwrap();
        fs::write(tmp.path().join("law-program.md"), "# School of Law\n").unwrap();
        tmp
    }

    #[test]
    fn scan_fixtures() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        assert!(!manifest.catalog.is_empty());
        assert!(!manifest.featured.is_empty());
        assert_eq!(nav_titles(&manifest)[0], "Programs");

        let law = find_program(&manifest, "Bachelor of Law (LL.B)");
        assert_eq!(law.route.as_deref(), Some("law-program"));
        let mba = find_program(&manifest, "Master of Business Administration (MBA)");
        assert_eq!(mba.route, None);
    }

    #[test]
    fn fixture_routes_point_at_pages() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        for program in manifest.catalog.programs() {
            if let Some(route) = &program.route {
                let page = find_page(&manifest, route);
                assert!(!page.in_nav, "dedicated pages stay out of the nav");
            }
        }
    }

    #[test]
    fn minimal_scan() {
        let tmp = minimal();
        let manifest = scan(tmp.path()).unwrap();

        assert_eq!(manifest.catalog.len(), 2);
        assert_eq!(manifest.featured[0].date, "FEB 3, 2025");
        assert_eq!(manifest.navigation.len(), 1);
        assert_eq!(manifest.navigation[0].route, Route::Programs);
    }

    #[test]
    fn missing_programs_is_error() {
        let tmp = minimal();
        fs::remove_file(tmp.path().join(PROGRAMS_FILE)).unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::MissingFile(_))));
    }

    #[test]
    fn empty_featured_is_error() {
        let tmp = minimal();
        fs::write(tmp.path().join(FEATURED_FILE), "").unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::NoFeatured)));
    }

    #[test]
    fn unknown_route_is_error() {
        let tmp = minimal();
        fs::remove_file(tmp.path().join("law-program.md")).unwrap();
        let err = scan(tmp.path()).unwrap_err();
        match err {
            ScanError::UnknownRoute { program, route } => {
                assert_eq!(program, "Bachelor of Law (LL.B)");
                assert_eq!(route, "law-program");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn route_to_link_page_is_error() {
        let tmp = minimal();
        fs::write(tmp.path().join("law-program.md"), "https://law.example.org\n").unwrap();
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::UnknownRoute { .. })
        ));
    }

    #[test]
    fn invalid_catalog_is_error() {
        let tmp = minimal();
        fs::write(
            tmp.path().join(PROGRAMS_FILE),
            "[[program]]\nlevel = \"All\"\nname = \"x\"\nfaculty = \"Law\"\n",
        )
        .unwrap();
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::Catalog(CatalogError::ReservedValue { .. }))
        ));
    }

    #[test]
    fn unknown_program_key_is_error() {
        let tmp = minimal();
        fs::write(
            tmp.path().join(PROGRAMS_FILE),
            "[[program]]\nlevel = \"PhD\"\nname = \"x\"\nschool = \"Law\"\n",
        )
        .unwrap();
        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::Toml { .. }));
        assert!(err.to_string().contains("programs.toml"));
    }

    // =========================================================================
    // Page tests
    // =========================================================================

    #[test]
    fn page_link_title_from_filename() {
        let tmp = minimal();
        fs::write(tmp.path().join("010-campus-life.md"), "# Life at Daystar\n\nClubs.").unwrap();

        let manifest = scan(tmp.path()).unwrap();

        let page = find_page(&manifest, "campus-life");
        assert_eq!(page.link_title, "campus life");
        assert_eq!(page.title, "Life at Daystar");
        assert!(page.in_nav);
    }

    #[test]
    fn page_title_fallback_to_link_title() {
        let tmp = minimal();
        fs::write(tmp.path().join("010-about-us.md"), "No heading here.").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        let page = find_page(&manifest, "about-us");
        assert_eq!(page.title, "about us");
    }

    #[test]
    fn unnumbered_page_hidden_from_nav() {
        let tmp = minimal();
        let manifest = scan(tmp.path()).unwrap();

        let page = find_page(&manifest, "law-program");
        assert!(!page.in_nav);
        assert_eq!(page.title, "School of Law");
        assert!(!nav_titles(&manifest).contains(&"law program"));
    }

    #[test]
    fn link_page_becomes_external_nav() {
        let tmp = minimal();
        fs::write(
            tmp.path().join("050-portal.md"),
            "https://portal.daystar.ac.ke\n",
        )
        .unwrap();

        let manifest = scan(tmp.path()).unwrap();

        let page = find_page(&manifest, "portal");
        assert!(page.is_link);
        let nav = manifest.navigation.last().unwrap();
        assert!(nav.external);
        assert_eq!(
            nav.route,
            Route::External("https://portal.daystar.ac.ke".into())
        );
    }

    #[test]
    fn multiline_content_not_detected_as_link() {
        let tmp = minimal();
        fs::write(
            tmp.path().join("010-page.md"),
            "https://example.com\nsome other content",
        )
        .unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert!(!find_page(&manifest, "page").is_link);
    }

    #[test]
    fn nav_follows_page_numbers() {
        let tmp = minimal();
        fs::write(tmp.path().join("030-about.md"), "# About").unwrap();
        fs::write(tmp.path().join("010-admissions.md"), "# Admissions").unwrap();
        fs::write(tmp.path().join("020-campus-life.md"), "# Campus").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(
            nav_titles(&manifest),
            vec!["Programs", "admissions", "campus life", "about"]
        );
    }

    #[test]
    fn number_only_page_skipped() {
        let tmp = minimal();
        fs::write(tmp.path().join("010.md"), "# Orphan").unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.pages.len(), 1);
    }

    #[test]
    fn index_page_is_reserved() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("index.md"), "# Welcome").unwrap();

        match scan(tmp.path()) {
            Err(ScanError::ReservedSlug { file, slug }) => {
                assert_eq!(slug, "index");
                assert!(file.ends_with("index.md"));
            }
            other => panic!("expected ReservedSlug, got {other:?}"),
        }
    }

    #[test]
    fn numbered_index_page_is_reserved() {
        let tmp = minimal();
        fs::write(tmp.path().join("005-Index.md"), "# Home").unwrap();
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::ReservedSlug { .. })
        ));
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("about.md"), "# Another About").unwrap();

        match scan(tmp.path()) {
            Err(ScanError::DuplicateSlug {
                slug,
                first,
                second,
            }) => {
                assert_eq!(slug, "about");
                assert!(first.ends_with("030-about.md"));
                assert!(second.ends_with("about.md"));
            }
            other => panic!("expected DuplicateSlug, got {other:?}"),
        }
    }

    #[test]
    fn slugs_differing_only_in_case_collide() {
        let tmp = minimal();
        fs::write(tmp.path().join("010-Admissions.md"), "# A").unwrap();
        fs::write(tmp.path().join("020-admissions.md"), "# B").unwrap();
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::DuplicateSlug { .. })
        ));
    }

    // =========================================================================
    // Config integration tests
    // =========================================================================

    #[test]
    fn config_loaded_from_fixtures() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert!(!manifest.config.colors.light.accent.is_empty());
    }

    #[test]
    fn default_config_when_no_toml() {
        let tmp = minimal();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config, SiteConfig::default());
    }

    #[test]
    fn manifest_roundtrips_through_json() {
        let tmp = minimal();
        let manifest = scan(tmp.path()).unwrap();
        let json = serde_json::to_string_pretty(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.catalog, manifest.catalog);
        assert_eq!(back.navigation, manifest.navigation);
        assert_eq!(back.featured, manifest.featured);
    }
}
