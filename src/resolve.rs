//! Where "View Details" leads for a programme.
//!
//! Programmes tagged with a `route` in `programs.toml` have a dedicated page;
//! everything else opens the generic detail overlay on the catalogue page.
//! Dispatch keys on the tag, never on the programme's display name, so
//! renaming a programme cannot silently drop its page.

use crate::catalog::ProgramRecord;
use crate::types::Route;

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    Dedicated(Route),
    Overlay(&'a ProgramRecord),
}

pub fn resolve(program: &ProgramRecord) -> Resolution<'_> {
    match &program.route {
        Some(slug) => Resolution::Dedicated(Route::Page(slug.clone())),
        None => Resolution::Overlay(program),
    }
}

/// Templated text shown in the generic overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayContent {
    pub duration: String,
    pub overview: String,
    pub careers: String,
}

pub fn overlay_content(program: &ProgramRecord) -> OverlayContent {
    OverlayContent {
        duration: "Duration: 3-4 years (Full-time)".to_string(),
        overview: format!(
            "This program offers comprehensive education in {}, preparing students for \
             successful careers in their chosen field. Our experienced faculty and \
             state-of-the-art facilities ensure a high-quality learning experience.",
            program.name.to_lowercase()
        ),
        careers: "Graduates of this program have excellent career prospects in various \
                  sectors, including research, industry, academia, and consultancy."
            .to_string(),
    }
}
