//! Name handling shared by pages and catalogue URLs.
//!
//! Content pages follow an `NNN-name` convention: an optional numeric prefix
//! controls navigation order, the rest is the page name. Catalogue levels,
//! faculties, and programme names have no file of their own, so their URL
//! segments come from [`slugify`], or from [`category_segment`] when a value
//! may have no ASCII letters or digits at all.
//!
//! ## Display Titles
//!
//! Dashes in the name portion are converted to spaces for display:
//! - `010-campus-life.md` → "campus life"
//! - `law-program.md` → "law program" (unnumbered, hidden from nav)

use crate::cache::hash_bytes;

/// Result of parsing a numbered entry name like `010-campus-life`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `10` from `010-campus-life`)
    pub number: Option<u32>,
    /// Raw name part after `NNN-`, dashes preserved. Empty if number-only.
    /// For unnumbered entries, this is the full input.
    pub name: String,
    /// Display title: name with dashes converted to spaces.
    pub display_title: String,
}

/// Parse an entry name following the `NNN-name` convention.
///
/// - `"010-campus-life"` → number=Some(10), name="campus-life", display_title="campus life"
/// - `"001"` → number=Some(1), name="", display_title=""
/// - `"law-program"` → number=None, name="law-program", display_title="law program"
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some(dash_pos) = name.find('-') {
        let prefix = &name[..dash_pos];
        if let Ok(num) = prefix.parse::<u32>() {
            let raw = &name[dash_pos + 1..];
            return ParsedName {
                number: Some(num),
                name: raw.to_string(),
                display_title: raw.replace('-', " "),
            };
        }
    }
    if let Ok(num) = name.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            name: String::new(),
            display_title: String::new(),
        };
    }
    ParsedName {
        number: None,
        name: name.to_string(),
        display_title: name.replace('-', " "),
    }
}

/// Turn a display string into a lowercase URL segment.
///
/// ASCII alphanumerics are kept, every other run of characters collapses to
/// a single dash, and leading/trailing dashes are dropped:
/// - `"Buisiness & Economics"` → `"buisiness-economics"`
/// - `"Diploma(DIDS)"` → `"diploma-dids"`
/// - `"Master of Laws (LL.M) - (Coming Soon)"` → `"master-of-laws-ll-m-coming-soon"`
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// URL segment for a catalogue level or faculty.
///
/// The [`slugify`] form when it is non-empty. Values with no ASCII letters
/// or digits (`"教育学部"`, `"&&&"`) get `c-` plus the first 10 hex digits of
/// their SHA-256, so every non-blank value has a stable segment.
pub fn category_segment(value: &str) -> String {
    let slug = slugify(value);
    if slug.is_empty() {
        format!("c-{}", &hash_bytes(value.as_bytes())[..10])
    } else {
        slug
    }
}
