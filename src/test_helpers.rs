//! Shared test utilities for the daystar-site test suite.
//!
//! Provides fixture setup, record builders, and lookup helpers that work with
//! scan-phase data structures (`Manifest`, `Page`, `ProgramRecord`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let law = find_program(&manifest, "Bachelor of Law (LL.B)");
//! assert_eq!(law.route.as_deref(), Some("law-program"));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::catalog::ProgramRecord;
use crate::scan::Manifest;
use crate::types::Page;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Untagged programme record.
pub fn program(level: &str, name: &str, faculty: &str) -> ProgramRecord {
    ProgramRecord {
        level: level.to_string(),
        name: name.to_string(),
        faculty: faculty.to_string(),
        route: None,
    }
}

// =========================================================================
// Manifest lookups, panicking with a clear message on miss
// =========================================================================

/// Find a page by slug. Panics if not found.
pub fn find_page<'a>(manifest: &'a Manifest, slug: &str) -> &'a Page {
    manifest
        .pages
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = manifest.pages.iter().map(|p| p.slug.as_str()).collect();
            panic!("page '{slug}' not found. Available: {slugs:?}")
        })
}

/// Find a programme by name. Panics if not found.
pub fn find_program<'a>(manifest: &'a Manifest, name: &str) -> &'a ProgramRecord {
    manifest
        .catalog
        .programs()
        .iter()
        .find(|p| p.name == name)
        .unwrap_or_else(|| panic!("program '{name}' not found in catalog"))
}

/// Top-level navigation titles in order.
pub fn nav_titles(manifest: &Manifest) -> Vec<&str> {
    manifest
        .navigation
        .iter()
        .map(|n| n.title.as_str())
        .collect()
}
