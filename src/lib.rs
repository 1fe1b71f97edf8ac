//! # Daystar Site
//!
//! A static site generator for the Daystar University marketing website.
//! The content directory is the data source: the programme catalogue and the
//! featured posts are TOML files, markdown files become pages, and the whole
//! site (home, catalogue, programme details) is rendered to plain HTML.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! Content passes through two independent stages joined by a JSON manifest:
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (files → validated structured data)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable, so a bad build can be traced to either
//! the content or the rendering without a debugger.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: reads the content directory, validates it, produces the manifest |
//! | [`generate`] | Stage 2: renders the site from the manifest using Maud |
//! | [`catalog`] | The validated programme list and its level/faculty option lists |
//! | [`filter`] | Query + level + faculty filtering over the catalogue |
//! | [`carousel`] | Wrap-around index cycling for the hero and featured carousels |
//! | [`resolve`] | Where "View Details" leads: a dedicated page or the generic overlay |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`cache`] | Content-hashed write cache for incremental builds |
//! | [`types`] | Shared types serialized between stages (`NavItem`, `Page`, `Route`) |
//! | [`naming`] | `NNN-name` page convention and URL slugs |
//! | [`logging`] | `tracing` subscriber setup for the binary |
//! | [`output`] | CLI output formatting for every command |
//!
//! # Design Decisions
//!
//! ## One Page Per Filter State
//!
//! The catalogue has a handful of levels and faculties, so every level ×
//! faculty combination is rendered to its own URL
//! (`/programs/{level}/{faculty}/`). Filter selects are links, the result
//! summary and the empty state are server-rendered, and the small inline
//! script only adds instant text search on top.
//!
//! ## "All" Is a Variant, Not a String
//!
//! [`filter::Selection::All`] means "no restriction". A catalogue value whose
//! URL segment would collide with the sentinel's (`all`) is rejected when the
//! catalogue is loaded.
//!
//! ## Routing by Tag
//!
//! Programmes with a dedicated page carry `route = "<page slug>"` in
//! `programs.toml`. The scanner checks the page exists, so renaming a
//! programme or deleting a page is a build error rather than a dead link.
//!
//! ## NNN-Prefix Ordering
//!
//! Pages use a numeric prefix (`010-`, `020-`, etc.) for navigation order,
//! parsed by [`naming::parse_entry_name`]. Pages without a prefix are built
//! but hidden from navigation, which is how dedicated programme pages live.

pub mod cache;
pub mod carousel;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod generate;
pub mod logging;
pub mod naming;
pub mod output;
pub mod resolve;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
