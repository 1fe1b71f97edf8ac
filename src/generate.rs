//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and generates the
//! final static HTML site.
//!
//! ## Generated Pages
//!
//! - **Home page** (`/index.html`): hero carousel, about blurb, statistics,
//!   programme cards, featured posts, call to action
//! - **Featured pages** (`/featured/{n}.html`): one page per featured-post
//!   carousel state, linked by the carousel's previous/next controls
//! - **Catalogue pages** (`/programs/{level}/{faculty}/index.html`): one page
//!   per level × faculty combination, `all` included; `/programs/index.html`
//!   is the unfiltered catalogue
//! - **Content pages** (`/{slug}.html`): markdown converted to HTML
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── admissions.html
//! ├── law-program.html
//! ├── featured/
//! │   ├── 1.html
//! │   └── 2.html
//! ├── programs/
//! │   ├── index.html
//! │   ├── all/all/index.html
//! │   ├── diploma/law/index.html
//! │   └── ...
//! └── (files from content/assets/)
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time and inlined into every page:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/site.js`: Hero autoplay, filter selects, and live search
//!
//! Every page works without JavaScript. Scripts only add autoplay, instant
//! search, and navigation on select change.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::cache::{CacheStats, CachedWriter};
use crate::carousel::{Autoplay, Carousel, CarouselError};
use crate::catalog::{Catalog, ProgramRecord};
use crate::config::{self, AcademicCard, SiteConfig};
use crate::filter::{self, FilterError, FilterState, Selection};
use crate::resolve::{self, Resolution};
use crate::scan::{ABOUT_SLUG, Manifest};
use crate::types::{FeaturedItem, NavItem, Page, Route};
use chrono::Datelike;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Carousel error: {0}")]
    Carousel(#[from] CarouselError),
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),
    #[error("Asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("assets/{0} would overwrite a generated page")]
    AssetCollision(String),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// A generated page and the title it was listed under.
#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    pub title: String,
    pub path: String,
}

/// One generated catalogue page.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPageReport {
    pub path: String,
    pub level: String,
    pub faculty: String,
    pub count: usize,
}

/// What a generate run produced.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub featured_pages: Vec<PageReport>,
    pub catalog_pages: Vec<CatalogPageReport>,
    pub content_pages: Vec<PageReport>,
    pub assets: usize,
    pub cache: CacheStats,
}

pub fn generate(
    manifest_path: &Path,
    source_dir: &Path,
    output_dir: &Path,
    use_cache: bool,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;

    fs::create_dir_all(output_dir)?;
    let site = Site::new(&manifest, chrono::Local::now().year());
    let mut writer = CachedWriter::new(output_dir, use_cache);
    let mut report = GenerateReport::default();

    let hero = Carousel::new(manifest.config.hero.slides.clone())?;
    let mut featured = Carousel::new(manifest.featured.clone())?;

    // Home shows the first featured post; every state gets its own page
    let home = render_home(&site, &hero, &featured);
    writer.write("index.html", home.into_string().as_bytes())?;
    for index in 0..featured.len() {
        featured.select(index)?;
        let rel = format!("featured/{}.html", index + 1);
        let page = render_featured_page(&site, &featured);
        writer.write(&rel, page.into_string().as_bytes())?;
        report.featured_pages.push(PageReport {
            title: featured.active().title.clone(),
            path: rel,
        });
    }

    let catalog = &manifest.catalog;
    for level in catalog.levels() {
        for faculty in catalog.faculties() {
            let mut state = FilterState::new();
            state.set_level(catalog, level.clone())?;
            state.set_faculty(catalog, faculty.clone())?;
            let results = filter::filter(catalog, &state);

            let html = render_catalog_page(&site, &state, &results).into_string();
            let rel = catalog_path(&level, &faculty);
            writer.write(&rel, html.as_bytes())?;
            if level.is_all() && faculty.is_all() {
                writer.write("programs/index.html", html.as_bytes())?;
            }
            debug!(path = %rel, programs = results.len(), "catalogue page");
            report.catalog_pages.push(CatalogPageReport {
                path: rel,
                level: level.label().to_string(),
                faculty: faculty.label().to_string(),
                count: results.len(),
            });
        }
    }

    for page in manifest.pages.iter().filter(|p| !p.is_link) {
        let rel = format!("{}.html", page.slug);
        writer.write(&rel, render_page(&site, page).into_string().as_bytes())?;
        report.content_pages.push(PageReport {
            title: page.title.clone(),
            path: rel,
        });
    }

    report.assets = copy_assets(&source_dir.join("assets"), &mut writer)?;
    report.cache = writer.finish()?;

    info!(
        output = %output_dir.display(),
        catalogue_pages = report.catalog_pages.len(),
        cache = %report.cache,
        "site generated"
    );
    Ok(report)
}

/// Copy `assets/` into the output root, keeping its layout. Runs after every
/// page is written; an asset at a page's path is an error.
fn copy_assets(assets_dir: &Path, writer: &mut CachedWriter) -> Result<usize, GenerateError> {
    if !assets_dir.is_dir() {
        return Ok(0);
    }
    let mut count = 0;
    for entry in WalkDir::new(assets_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(assets_dir) else {
            continue;
        };
        let rel = rel.to_string_lossy().replace('\\', "/");
        if writer.has_written(&rel) {
            return Err(GenerateError::AssetCollision(rel));
        }
        writer.write(&rel, &fs::read(entry.path())?)?;
        count += 1;
    }
    Ok(count)
}

// ============================================================================
// Routing
// ============================================================================

/// Output path of the catalogue page for a level/faculty combination.
pub fn catalog_path(level: &Selection, faculty: &Selection) -> String {
    format!("programs/{}/{}/index.html", level.slug(), faculty.slug())
}

/// Link to the catalogue page for a level/faculty combination.
///
/// The unfiltered combination links to `/programs/`.
pub fn catalog_href(level: &Selection, faculty: &Selection) -> String {
    if level.is_all() && faculty.is_all() {
        Route::Programs.href()
    } else {
        format!("/programs/{}/{}/", level.slug(), faculty.slug())
    }
}

fn featured_href(index: usize) -> String {
    format!("/featured/{}.html#featured", index + 1)
}

/// Catalogue link for a homepage programme card. Levels with no programmes
/// fall back to the full catalogue.
fn academic_href(catalog: &Catalog, card: &AcademicCard) -> String {
    if catalog.has_level(&card.level) {
        catalog_href(&Selection::Only(card.level.clone()), &Selection::All)
    } else {
        Route::Programs.href()
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Everything the page renderers share.
struct Site<'a> {
    config: &'a SiteConfig,
    catalog: &'a Catalog,
    navigation: &'a [NavItem],
    pages: &'a [Page],
    css: String,
    year: i32,
}

impl<'a> Site<'a> {
    fn new(manifest: &'a Manifest, year: i32) -> Self {
        let color_css = config::generate_color_css(&manifest.config.colors);
        Self {
            config: &manifest.config,
            catalog: &manifest.catalog,
            navigation: &manifest.navigation,
            pages: &manifest.pages,
            css: format!("{}\n\n{}", color_css, CSS_STATIC),
            year,
        }
    }

    fn title(&self, page_title: &str) -> String {
        format!("{} | {}", page_title, self.config.site.full_name)
    }
}

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Renders the site header with brand, navigation, and apply button
fn site_header(site: &Site, current: &Route) -> Markup {
    html! {
        header.site-header {
            a.brand href=(Route::Home.href()) { (site.config.site.name) }
            (render_nav(site.navigation, current))
            div.header-actions {
                select.locale aria-label="Language" {
                    @for locale in &site.config.site.locales {
                        option { (locale) }
                    }
                }
                a.button href=(site.config.site.apply_url) { "Apply Now" }
            }
        }
    }
}

/// Renders the navigation menu (hamburger style on small screens)
pub fn render_nav(items: &[NavItem], current: &Route) -> Markup {
    html! {
        input.nav-toggle type="checkbox" id="nav-toggle";
        label.nav-hamburger for="nav-toggle" aria-label="Menu" {
            span.hamburger-line {}
            span.hamburger-line {}
            span.hamburger-line {}
        }
        nav.site-nav {
            ul {
                @for item in items {
                    li class=[(item.route == *current).then_some("current")] {
                        a href=(item.route.href())
                            target=[item.external.then_some("_blank")]
                            rel=[item.external.then_some("noopener")] {
                            (item.title)
                        }
                    }
                }
            }
        }
    }
}

fn site_footer(site: &Site) -> Markup {
    let footer = &site.config.footer;
    html! {
        footer.site-footer {
            div.footer-grid {
                section {
                    h3 { (site.config.site.full_name) }
                    address {
                        @for line in &footer.address {
                            (line) br;
                        }
                    }
                }
                section {
                    h3 { "Quick Links" }
                    ul {
                        li { a href=(Route::Home.href()) { "Home" } }
                        @for item in site.navigation {
                            li { a href=(item.route.href()) { (item.title) } }
                        }
                    }
                }
                section {
                    h3 { "Follow Us" }
                    ul.socials {
                        @for social in &footer.socials {
                            li { a href=(social.url) rel="noopener" { (social.label) } }
                        }
                    }
                }
                section.newsletter {
                    h3 { "Newsletter" }
                    p { "Stay updated with the latest news and events." }
                    @match &footer.newsletter_action {
                        Some(action) => {
                            form method="post" action=(action) {
                                input type="email" name="email" placeholder="Your email" required;
                                button.button type="submit" { "Subscribe" }
                            }
                        }
                        None => {
                            form.disabled {
                                input type="email" name="email" placeholder="Your email" disabled;
                                button.button type="submit" disabled { "Subscribe" }
                            }
                        }
                    }
                }
            }
            p.copyright {
                "© " (site.year) " " (site.config.site.full_name) ". All rights reserved."
            }
        }
    }
}

fn render_markdown(body: &str) -> String {
    let parser = Parser::new(body);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    body_html
}

/// First paragraph of a markdown body that is not a heading.
fn about_excerpt(body: &str) -> Option<String> {
    body.split("\n\n")
        .map(str::trim)
        .find(|block| !block.is_empty() && !block.starts_with('#'))
        .map(|block| block.lines().map(str::trim).collect::<Vec<_>>().join(" "))
}

// ============================================================================
// Home page sections
// ============================================================================

fn hero_section(site: &Site, hero: &Carousel<String>) -> Markup {
    let cfg = &site.config;
    let autoplay = Autoplay::from_millis(cfg.hero.autoplay_ms);
    html! {
        section.hero data-autoplay=(autoplay.millis()) {
            @for (i, slide) in hero.items().iter().enumerate() {
                div.hero-slide.active[i == hero.active_index()]
                    style={ "background-image: url('" (slide) "')" } {}
            }
            div.hero-content {
                h1 { (cfg.hero.headline) }
                p.intake { (cfg.site.intake) }
                div.quick-links {
                    @for card in &cfg.academics {
                        a href=(academic_href(site.catalog, card)) { (card.category) }
                    }
                }
                a.button href=(cfg.site.apply_url) { "Apply Now" }
            }
            @if hero.len() > 1 {
                div.hero-dots {
                    @for i in 0..hero.len() {
                        button.hero-dot.active[i == hero.active_index()]
                            type="button" data-index=(i) aria-label={ "Slide " (i + 1) } {}
                    }
                }
            }
        }
    }
}

fn about_section(site: &Site) -> Markup {
    let about = site
        .pages
        .iter()
        .find(|p| p.slug == ABOUT_SLUG && !p.is_link);
    html! {
        @if let Some(page) = about {
            section.about {
                h2 { "About " (site.config.site.full_name) }
                @if let Some(excerpt) = about_excerpt(&page.body) {
                    p { (excerpt) }
                }
                a.button href=(Route::Page(page.slug.clone()).href()) { "Learn More" }
            }
        }
    }
}

fn stats_section(site: &Site) -> Markup {
    html! {
        @if !site.config.stats.is_empty() {
            section.stats {
                @for stat in &site.config.stats {
                    div.stat {
                        span.stat-value { (stat.value) (stat.suffix) }
                        span.stat-label { (stat.label) }
                    }
                }
            }
        }
    }
}

fn academics_section(site: &Site) -> Markup {
    html! {
        section.academics {
            h2 { "Academic Programs" }
            div.card-grid {
                @for card in &site.config.academics {
                    a.family-card href=(academic_href(site.catalog, card)) {
                        img src=(card.image) alt=(card.name) loading="lazy";
                        h3 { (card.name) }
                        p { (card.description) }
                        span.more { "Explore Programs" }
                    }
                }
            }
        }
    }
}

/// Featured-post carousel in the given state. Controls link to the pages of
/// the neighbouring states.
fn featured_section(featured: &Carousel<FeaturedItem>) -> Markup {
    let item = featured.active();
    html! {
        section.featured id="featured" {
            h2 { "Featured News" }
            article.featured-post {
                img src=(item.image) alt=(item.title) loading="lazy";
                div.featured-meta {
                    span.badge { (item.category) }
                    time { (item.date) }
                }
                h3 { (item.title) }
            }
            div.carousel-controls {
                a.prev href=(featured_href(featured.previous_index())) aria-label="Previous post" { "‹" }
                @for i in 0..featured.len() {
                    a.dot.active[i == featured.active_index()]
                        href=(featured_href(i)) aria-label={ "Post " (i + 1) } {}
                }
                a.next href=(featured_href(featured.next_index())) aria-label="Next post" { "›" }
            }
        }
    }
}

fn cta_section(site: &Site) -> Markup {
    let cta = &site.config.cta;
    html! {
        section.cta {
            h2 { (cta.heading) }
            p {
                "Take the first step towards your future. Explore our programs, "
                "visit our campus, or speak with our admissions team."
            }
            div.cta-actions {
                @for action in &cta.actions {
                    a.button href=(action.url) { (action.label) }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home(
    site: &Site,
    hero: &Carousel<String>,
    featured: &Carousel<FeaturedItem>,
) -> Markup {
    let content = html! {
        (site_header(site, &Route::Home))
        main.home-page {
            (hero_section(site, hero))
            (about_section(site))
            (stats_section(site))
            (academics_section(site))
            (featured_section(featured))
            (cta_section(site))
        }
        (site_footer(site))
    };
    base_document(&site.config.site.full_name, &site.css, Some("home"), content)
}

fn render_featured_page(site: &Site, featured: &Carousel<FeaturedItem>) -> Markup {
    let content = html! {
        (site_header(site, &Route::Home))
        main.featured-page {
            (featured_section(featured))
        }
        (site_footer(site))
    };
    base_document(&site.title(&featured.active().title), &site.css, None, content)
}

/// Catalogue page for one filter state.
fn render_catalog_page(site: &Site, state: &FilterState, results: &[&ProgramRecord]) -> Markup {
    let catalog = site.catalog;
    let content = html! {
        (site_header(site, &Route::Programs))
        main.catalog-page {
            section.catalog-hero {
                h1 { "Explore Our " (catalog.len()) "+ Programs" }
                p { "Find the perfect program to match your interests and career goals." }
            }
            section.catalog-controls {
                input id="program-search" type="search" placeholder="Search programs..."
                    aria-label="Search programs" value=(state.query());
                select.filter-select data-filter="level" aria-label="Level" {
                    @for level in catalog.levels() {
                        option value=(catalog_href(&level, state.faculty()))
                            selected[&level == state.level()] { (level.label()) }
                    }
                }
                select.filter-select data-filter="faculty" aria-label="Faculty" {
                    @for faculty in catalog.faculties() {
                        option value=(catalog_href(state.level(), &faculty))
                            selected[&faculty == state.faculty()] { (faculty.label()) }
                    }
                }
            }
            p.summary { (filter::summary(results.len(), state)) }
            p.no-results hidden[!results.is_empty()] { "No programs match your search." }
            div.program-grid {
                @for (i, record) in results.iter().enumerate() {
                    (program_card(record, i))
                }
            }
            @for (i, record) in results.iter().enumerate() {
                @if let Resolution::Overlay(program) = resolve::resolve(record) {
                    (program_overlay(site, program, i))
                }
            }
        }
        (site_footer(site))
    };
    base_document(&site.title("Programs"), &site.css, None, content)
}

fn overlay_id(index: usize) -> String {
    format!("program-{index}")
}

fn program_card(record: &ProgramRecord, index: usize) -> Markup {
    let details_href = match resolve::resolve(record) {
        Resolution::Dedicated(route) => route.href(),
        Resolution::Overlay(_) => format!("#{}", overlay_id(index)),
    };
    html! {
        article.program-card
            data-name=(record.name.to_lowercase())
            data-faculty=(record.faculty.to_lowercase()) {
            span.badge { (record.level) }
            h3 { (record.name) }
            p.faculty { (record.faculty) }
            a.details href=(details_href) { "View Details" }
        }
    }
}

/// Generic detail overlay, shown through CSS `:target`.
fn program_overlay(site: &Site, program: &ProgramRecord, index: usize) -> Markup {
    let id = overlay_id(index);
    let content = resolve::overlay_content(program);
    html! {
        div.overlay id=(id) role="dialog" aria-labelledby={ (id) "-title" } {
            div.overlay-panel {
                a.overlay-close href="#" aria-label="Close" { "×" }
                span.badge { (program.level) }
                h2 id={ (id) "-title" } { (program.name) }
                p.faculty { (program.faculty) }
                p.duration { (content.duration) }
                h3 { "Program Overview" }
                p { (content.overview) }
                h3 { "Career Opportunities" }
                p { (content.careers) }
                a.button href=(site.config.site.apply_url) { "Apply Now" }
            }
        }
    }
}

/// Renders a content page from markdown. Pages that programmes route to get
/// their programme badges and an apply button.
fn render_page(site: &Site, page: &Page) -> Markup {
    let programs: Vec<&ProgramRecord> = site
        .catalog
        .programs()
        .iter()
        .filter(|p| p.route.as_deref() == Some(page.slug.as_str()))
        .collect();
    let current = Route::Page(page.slug.clone());

    let content = html! {
        (site_header(site, &current))
        main.content-page {
            @if !programs.is_empty() {
                div.program-tags {
                    @for program in &programs {
                        span.badge { (program.level) }
                        span.faculty { (program.faculty) }
                    }
                }
            }
            article.page-content {
                (PreEscaped(render_markdown(&page.body)))
            }
            @if !programs.is_empty() {
                a.button href=(site.config.site.apply_url) { "Apply Now" }
            }
        }
        (site_footer(site))
    };

    base_document(&site.title(&page.title), &site.css, None, content)
}

// ============================================================================
// Tests
// ============================================================================
