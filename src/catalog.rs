//! The programme catalogue.
//!
//! A [`Catalog`] is the fixed list of [`ProgramRecord`]s loaded from
//! `programs.toml`. It is validated once at construction and never mutated
//! afterwards; filtering (see [`crate::filter`]) only ever borrows from it.
//!
//! ```toml
//! [[program]]
//! level = "Undergraduate"
//! name = "Bachelor of Law (LL.B)"
//! faculty = "Law"
//! route = "law-program"   # optional: dedicated page slug
//! ```
//!
//! The level and faculty option lists offered to visitors are derived from the
//! records on every call, so they can never disagree with the data. Both lists
//! start with [`Selection::All`].

use crate::filter::Selection;
use crate::naming::category_segment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("program #{index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },
    #[error("{field} \"{value}\" is reserved for the \"All\" filter")]
    ReservedValue { field: &'static str, value: String },
    #[error("{field} values \"{first}\" and \"{second}\" share the URL segment \"{slug}\"")]
    SlugCollision {
        field: &'static str,
        first: String,
        second: String,
        slug: String,
    },
}

/// One academic programme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramRecord {
    pub level: String,
    pub name: String,
    pub faculty: String,
    /// Slug of a dedicated page for this programme. Programmes without one
    /// get the generic detail overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

/// Validated, immutable list of programmes in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ProgramRecord>", into = "Vec<ProgramRecord>")]
pub struct Catalog {
    programs: Vec<ProgramRecord>,
}

impl Catalog {
    /// Validate and wrap a list of records.
    ///
    /// Rejects blank fields, level/faculty values whose URL segment would be
    /// `all` (the sentinel's segment), and distinct values that map to the
    /// same URL segment.
    pub fn new(programs: Vec<ProgramRecord>) -> Result<Self, CatalogError> {
        for (index, program) in programs.iter().enumerate() {
            for (field, value) in [
                ("level", &program.level),
                ("name", &program.name),
                ("faculty", &program.faculty),
            ] {
                if value.trim().is_empty() {
                    return Err(CatalogError::EmptyField { index, field });
                }
            }
        }
        check_categories("level", programs.iter().map(|p| p.level.as_str()))?;
        check_categories("faculty", programs.iter().map(|p| p.faculty.as_str()))?;
        Ok(Self { programs })
    }

    pub fn programs(&self) -> &[ProgramRecord] {
        &self.programs
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Distinct levels in first-seen order.
    pub fn distinct_levels(&self) -> Vec<&str> {
        distinct(self.programs.iter().map(|p| p.level.as_str()))
    }

    /// Distinct faculties in first-seen order.
    pub fn distinct_faculties(&self) -> Vec<&str> {
        distinct(self.programs.iter().map(|p| p.faculty.as_str()))
    }

    /// Level filter options: `All` followed by every distinct level.
    pub fn levels(&self) -> Vec<Selection> {
        with_all(self.distinct_levels())
    }

    /// Faculty filter options: `All` followed by every distinct faculty.
    pub fn faculties(&self) -> Vec<Selection> {
        with_all(self.distinct_faculties())
    }

    /// Whether `level` is one of the catalogue's levels.
    pub fn has_level(&self, level: &str) -> bool {
        self.programs.iter().any(|p| p.level == level)
    }

    /// Whether `faculty` is one of the catalogue's faculties.
    pub fn has_faculty(&self, faculty: &str) -> bool {
        self.programs.iter().any(|p| p.faculty == faculty)
    }
}

impl TryFrom<Vec<ProgramRecord>> for Catalog {
    type Error = CatalogError;

    fn try_from(programs: Vec<ProgramRecord>) -> Result<Self, Self::Error> {
        Catalog::new(programs)
    }
}

impl From<Catalog> for Vec<ProgramRecord> {
    fn from(catalog: Catalog) -> Self {
        catalog.programs
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

fn with_all(values: Vec<&str>) -> Vec<Selection> {
    std::iter::once(Selection::All)
        .chain(values.into_iter().map(|v| Selection::Only(v.to_string())))
        .collect()
}

fn check_categories<'a>(
    field: &'static str,
    values: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut by_slug: HashMap<String, &str> = HashMap::new();
    for value in distinct(values) {
        let slug = category_segment(value);
        if slug == Selection::ALL_SLUG {
            return Err(CatalogError::ReservedValue {
                field,
                value: value.to_string(),
            });
        }
        if let Some(first) = by_slug.insert(slug.clone(), value) {
            return Err(CatalogError::SlugCollision {
                field,
                first: first.to_string(),
                second: value.to_string(),
                slug,
            });
        }
    }
    Ok(())
}
