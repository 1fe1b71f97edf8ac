//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (programme, post, page) is its semantic identity:
//! positional index and title. Levels, faculties, and output paths follow
//! as indented context lines or after `→`.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Catalog (3 programs)
//!     Levels: All, Diploma, Undergraduate
//!     Faculties: All, Law, Communication
//!     001 Diploma in Legal Studies
//!         Diploma · Law
//!     002 Bachelor of Law (LL.B)
//!         Undergraduate · Law
//!         Page: law-program.html
//!
//! Featured
//!     001 Vice Chancellor meets with Congolese students
//!         FEB 10, 2025 · BLOG
//!
//! Pages
//!     001 Admissions
//!         Source: admissions.md
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//!
//! Featured
//!     001 Vice Chancellor meets with Congolese students → featured/1.html
//!
//! Programs
//!     001 All / All (3 programs) → programs/all/all/index.html
//!
//! Pages
//!     001 Admissions → admissions.html
//!
//! Generated 6 catalogue pages, 3 featured pages, 4 pages, 2 assets
//! Files: 3 unchanged, 14 written (17 total)
//! ```
//!
//! ## Search
//!
//! ```text
//! 001 Bachelor of Law (LL.B)
//!     Undergraduate · Law
//!     Details: /law-program.html
//!
//! Showing 1 programs in Undergraduate
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::catalog::ProgramRecord;
use crate::filter::{self, FilterState, Selection};
use crate::generate::GenerateReport;
use crate::resolve::{self, Resolution};
use crate::scan::{FEATURED_FILE, Manifest, PROGRAMS_FILE};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional
/// programme count.
///
/// ```text
/// 001 Undergraduate / Law (12 programs)
/// 002 Admissions
/// ```
fn entity_header(index: usize, title: &str, count: Option<usize>) -> String {
    match count {
        Some(n) => format!("{} {} ({} programs)", format_index(index), title, n),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    }
}

fn join_labels(options: &[Selection]) -> String {
    options
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Context lines shared by scan and search output for one programme.
fn program_lines(index: usize, program: &ProgramRecord, depth: usize) -> Vec<String> {
    let base = indent(depth);
    let mut lines = vec![
        format!("{}{}", base, entity_header(index, &program.name, None)),
        format!("{}    {} \u{b7} {}", base, program.level, program.faculty),
    ];
    if let Some(route) = &program.route {
        lines.push(format!("{}    Page: {}.html", base, route));
    }
    lines
}

// ============================================================================
// Scan output
// ============================================================================

/// Format scan stage output showing the discovered content inventory.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let catalog = &manifest.catalog;

    lines.push(format!("Catalog ({} programs)", catalog.len()));
    lines.push(format!("    Levels: {}", join_labels(&catalog.levels())));
    lines.push(format!("    Faculties: {}", join_labels(&catalog.faculties())));
    for (i, program) in catalog.programs().iter().enumerate() {
        lines.extend(program_lines(i + 1, program, 1));
    }

    lines.push(String::new());
    lines.push("Featured".to_string());
    for (i, post) in manifest.featured.iter().enumerate() {
        lines.push(format!(
            "    {}",
            entity_header(i + 1, &truncate_desc(&post.title, 60), None)
        ));
        lines.push(format!("        {} \u{b7} {}", post.date, post.category));
    }

    if !manifest.pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for (i, page) in manifest.pages.iter().enumerate() {
            let link_marker = if page.is_link { " (link)" } else { "" };
            let hidden_marker = if page.in_nav || page.is_link {
                ""
            } else {
                " (hidden)"
            };
            lines.push(format!(
                "    {}{}{}",
                entity_header(i + 1, &page.title, None),
                link_marker,
                hidden_marker
            ));
            lines.push(format!("        Source: {}.md", page.slug));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    }
    lines.push(format!("    {}", PROGRAMS_FILE));
    lines.push(format!("    {}", FEATURED_FILE));
    if source_root.join("assets").is_dir() {
        lines.push("    assets/".to_string());
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

/// One-line summary for the `check` command.
pub fn format_check_output(manifest: &Manifest) -> Vec<String> {
    let routed = manifest
        .catalog
        .programs()
        .iter()
        .filter(|p| p.route.is_some())
        .count();
    vec![format!(
        "Content OK: {} programs ({} with dedicated pages), {} featured posts, {} pages",
        manifest.catalog.len(),
        routed,
        manifest.featured.len(),
        manifest.pages.len()
    )]
}

pub fn print_check_output(manifest: &Manifest) {
    for line in format_check_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format generate stage output showing generated HTML files.
///
/// Information-first: each entity leads with its positional index and title,
/// followed by `→` and the output path.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = vec!["Home \u{2192} index.html".to_string()];

    if !report.featured_pages.is_empty() {
        lines.push(String::new());
        lines.push("Featured".to_string());
        for (i, page) in report.featured_pages.iter().enumerate() {
            lines.push(format!(
                "    {} \u{2192} {}",
                entity_header(i + 1, &truncate_desc(&page.title, 60), None),
                page.path
            ));
        }
    }

    lines.push(String::new());
    lines.push("Programs".to_string());
    for (i, page) in report.catalog_pages.iter().enumerate() {
        let title = format!("{} / {}", page.level, page.faculty);
        lines.push(format!(
            "    {} \u{2192} {}",
            entity_header(i + 1, &title, Some(page.count)),
            page.path
        ));
    }

    if !report.content_pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for (i, page) in report.content_pages.iter().enumerate() {
            lines.push(format!(
                "    {} \u{2192} {}",
                entity_header(i + 1, &page.title, None),
                page.path
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} catalogue pages, {} featured pages, {} pages, {} assets",
        report.catalog_pages.len(),
        report.featured_pages.len(),
        report.content_pages.len(),
        report.assets
    ));
    lines.push(format!("Files: {}", report.cache));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Search output
// ============================================================================

/// Format the result of a catalogue search.
pub fn format_search_output(results: &[&ProgramRecord], state: &FilterState) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, program) in results.iter().enumerate() {
        lines.push(entity_header(i + 1, &program.name, None));
        lines.push(format!("    {} \u{b7} {}", program.level, program.faculty));
        match resolve::resolve(program) {
            Resolution::Dedicated(route) => {
                lines.push(format!("    Details: {}", route.href()));
            }
            Resolution::Overlay(_) => {
                lines.push(format!(
                    "    Details: {}",
                    resolve::overlay_content(program).duration
                ));
            }
        }
    }
    if results.is_empty() {
        lines.push("No programs match your search.".to_string());
    }
    lines.push(String::new());
    lines.push(filter::summary(results.len(), state));
    lines
}

pub fn print_search_output(results: &[&ProgramRecord], state: &FilterState) {
    for line in format_search_output(results, state) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
