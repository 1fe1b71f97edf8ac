//! Catalogue search and filtering.
//!
//! A [`FilterState`] holds what a visitor has asked for: a free-text query
//! plus a level and a faculty [`Selection`]. [`filter`] applies it to a
//! [`Catalog`] and returns the matching records in catalogue order.
//!
//! A record matches when all three hold:
//!
//! - its name or faculty contains the query, ignoring case (an empty query
//!   matches everything)
//! - the level selection is `All` or equals the record's level
//! - the faculty selection is `All` or equals the record's faculty
//!
//! Filtering cannot fail. An empty result is a normal state that renders as
//! "no programs match".

use crate::catalog::{Catalog, ProgramRecord};
use crate::naming::category_segment;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("unknown level \"{0}\"")]
    UnknownLevel(String),
    #[error("unknown faculty \"{0}\"")]
    UnknownFaculty(String),
}

/// A categorical filter value: no restriction, or one specific value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Label shown for the sentinel in option lists.
    pub const ALL_LABEL: &'static str = "All";
    /// URL segment of the sentinel. No catalogue value may map to this.
    pub const ALL_SLUG: &'static str = "all";

    /// Parse user input. `All` (any case) and blank input mean no restriction.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::ALL_LABEL) {
            Selection::All
        } else {
            Selection::Only(trimmed.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Selection::All => Self::ALL_LABEL,
            Selection::Only(value) => value,
        }
    }

    /// URL segment used for the catalogue page of this selection.
    pub fn slug(&self) -> String {
        match self {
            Selection::All => Self::ALL_SLUG.to_string(),
            Selection::Only(value) => category_segment(value),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the visitor is currently looking for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    query: String,
    level: Selection,
    faculty: Selection,
}

impl FilterState {
    /// No query, both selections `All`: matches the whole catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn level(&self) -> &Selection {
        &self.level
    }

    pub fn faculty(&self) -> &Selection {
        &self.faculty
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Select a level. A specific level must exist in `catalog`; on error the
    /// state is unchanged.
    pub fn set_level(&mut self, catalog: &Catalog, level: Selection) -> Result<(), FilterError> {
        if let Selection::Only(value) = &level
            && !catalog.has_level(value)
        {
            return Err(FilterError::UnknownLevel(value.clone()));
        }
        self.level = level;
        Ok(())
    }

    /// Select a faculty. A specific faculty must exist in `catalog`; on error
    /// the state is unchanged.
    pub fn set_faculty(
        &mut self,
        catalog: &Catalog,
        faculty: Selection,
    ) -> Result<(), FilterError> {
        if let Selection::Only(value) = &faculty
            && !catalog.has_faculty(value)
        {
            return Err(FilterError::UnknownFaculty(value.clone()));
        }
        self.faculty = faculty;
        Ok(())
    }

    /// Whether a single record passes this filter.
    pub fn matches(&self, program: &ProgramRecord) -> bool {
        Matcher::new(self).matches(program)
    }
}

/// Pre-lowercased query so a full pass lowercases it once.
struct Matcher<'a> {
    query: String,
    state: &'a FilterState,
}

impl<'a> Matcher<'a> {
    fn new(state: &'a FilterState) -> Self {
        Self {
            query: state.query.to_lowercase(),
            state,
        }
    }

    fn matches(&self, program: &ProgramRecord) -> bool {
        let matches_search = program.name.to_lowercase().contains(&self.query)
            || program.faculty.to_lowercase().contains(&self.query);
        matches_search
            && self.state.level.matches(&program.level)
            && self.state.faculty.matches(&program.faculty)
    }
}

/// Records of `catalog` matching `state`, in catalogue order.
pub fn filter<'a>(catalog: &'a Catalog, state: &FilterState) -> Vec<&'a ProgramRecord> {
    let matcher = Matcher::new(state);
    catalog
        .programs()
        .iter()
        .filter(|p| matcher.matches(p))
        .collect()
}

/// Result line shown above the programme grid.
///
/// `Showing 12 programs in Diploma from Law`; the level and faculty parts
/// only appear when that selection is not `All`.
pub fn summary(count: usize, state: &FilterState) -> String {
    let mut line = format!("Showing {count} programs");
    if let Selection::Only(level) = &state.level {
        line.push_str(&format!(" in {level}"));
    }
    if let Selection::Only(faculty) = &state.faculty {
        line.push_str(&format!(" from {faculty}"));
    }
    line
}
