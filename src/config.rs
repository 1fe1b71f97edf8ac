//! Site configuration module.
//!
//! Handles loading, validating, and merging the content root's `config.toml`.
//! The user file is sparse: it is merged key-by-key over the stock defaults,
//! so it only needs the values it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Daystar"
//! full_name = "Daystar University"
//! intake = "May 2025 Intake Now Open"
//! apply_url = "#apply"
//! locales = ["EN"]
//!
//! [hero]
//! headline = "Shape Your Future at Daystar University"
//! slides = ["https://images.unsplash.com/photo-1523050854058-8df90110c9f1", ...]
//! autoplay_ms = 5000
//!
//! [[stats]]
//! value = 30
//! label = "Nationalities"
//! suffix = "+"
//!
//! [[academics]]
//! name = "PhD Programs"
//! category = "PhD"
//! level = "PhD"            # catalogue level the card links to
//! description = "..."
//! image = "https://..."
//!
//! [cta]
//! heading = "Begin Your Journey at Daystar"
//! actions = [{ label = "Virtual Tour", url = "#" }, ...]
//!
//! [footer]
//! address = ["Nairobi Campus", "P.O. Box 44400-00100", "Nairobi, Kenya"]
//! socials = [{ label = "Facebook", url = "#" }, ...]
//! # newsletter_action = "https://lists.example.org/subscribe"
//!
//! [colors.light]
//! background = "#ffffff"
//! surface = "#f9fafb"
//! text = "#111827"
//! text_muted = "#4b5563"
//! border = "#e5e7eb"
//! accent = "#00bfff"
//! accent_hover = "#0099cc"
//!
//! [colors.dark]
//! background = "#0b1120"
//! ...
//! ```
//!
//! Arrays (`stats`, `academics`, `slides`, ...) replace the default list as a
//! whole. Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults matching the stock Daystar site. Unknown keys are
/// rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Institution identity and top-level links.
    pub site: SiteInfo,
    /// Homepage hero carousel.
    pub hero: HeroConfig,
    /// Homepage statistics counters.
    pub stats: Vec<Stat>,
    /// Homepage programme-family cards.
    pub academics: Vec<AcademicCard>,
    /// Call-to-action band.
    pub cta: CtaConfig,
    /// Footer contact, social, and newsletter settings.
    pub footer: FooterConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteInfo::default(),
            hero: HeroConfig::default(),
            stats: default_stats(),
            academics: default_academics(),
            cta: CtaConfig::default(),
            footer: FooterConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if self.hero.slides.is_empty() {
            return Err(ConfigError::Validation(
                "hero.slides must not be empty".into(),
            ));
        }
        if self.hero.autoplay_ms == 0 {
            return Err(ConfigError::Validation(
                "hero.autoplay_ms must be greater than 0".into(),
            ));
        }
        if let Some(i) = self.stats.iter().position(|s| s.label.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "stats[{i}].label must not be empty"
            )));
        }
        if let Some(i) = self.academics.iter().position(|a| a.level.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "academics[{i}].level must not be empty"
            )));
        }
        Ok(())
    }
}

/// Institution identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Short brand shown in the header.
    pub name: String,
    /// Full name used in titles and the footer.
    pub full_name: String,
    /// Intake banner under the hero headline.
    pub intake: String,
    /// Target of every "Apply Now" button.
    pub apply_url: String,
    /// Entries of the decorative language selector.
    pub locales: Vec<String>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Daystar".to_string(),
            full_name: "Daystar University".to_string(),
            intake: "May 2025 Intake Now Open".to_string(),
            apply_url: "#apply".to_string(),
            locales: vec!["EN".to_string()],
        }
    }
}

/// Hero carousel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    pub headline: String,
    /// Background image URLs, one per slide.
    pub slides: Vec<String>,
    /// Delay between automatic slide changes.
    pub autoplay_ms: u64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            headline: "Shape Your Future at Daystar University".to_string(),
            slides: vec![
                "https://images.unsplash.com/photo-1523050854058-8df90110c9f1".to_string(),
                "https://images.unsplash.com/photo-1562774053-701939374585".to_string(),
                "https://images.unsplash.com/photo-1541339907198-e08756dedf3f".to_string(),
            ],
            autoplay_ms: 5000,
        }
    }
}

/// One homepage counter, rendered as `{value}{suffix}` above its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stat {
    pub value: u64,
    pub label: String,
    #[serde(default)]
    pub suffix: String,
}

fn default_stats() -> Vec<Stat> {
    [
        (30, "Nationalities"),
        (7000, "Enrolled Students"),
        (8, "Academic Schools"),
        (500, "International Students"),
    ]
    .into_iter()
    .map(|(value, label)| Stat {
        value,
        label: label.to_string(),
        suffix: "+".to_string(),
    })
    .collect()
}

/// A programme-family card on the homepage, linking to the catalogue
/// filtered by `level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AcademicCard {
    /// Card heading, e.g. "Masters Programs".
    pub name: String,
    /// Short label for the hero quick links, e.g. "Masters".
    pub category: String,
    /// Catalogue level the card links to.
    pub level: String,
    pub description: String,
    pub image: String,
}

fn default_academics() -> Vec<AcademicCard> {
    const BLURB: &str =
        "Discover our wide range of programs designed to meet your academic goals.";
    [
        (
            "PhD Programs",
            "PhD",
            "PhD",
            "https://images.unsplash.com/photo-1590012314607-cda9d9b699ae?auto=format&fit=crop&w=500&q=80",
        ),
        (
            "Masters Programs",
            "Masters",
            "Masters",
            "https://images.unsplash.com/photo-1524178232363-1fb2b075b655?auto=format&fit=crop&w=500&q=80",
        ),
        (
            "Bachelor Programs",
            "Bachelors",
            "Undergraduate",
            "https://images.unsplash.com/photo-1523240795612-9a054b0db644?auto=format&fit=crop&w=500&q=80",
        ),
        (
            "Diploma Courses",
            "Diploma",
            "Diploma",
            "https://images.unsplash.com/photo-1546410531-bb4caa6b424d?auto=format&fit=crop&w=500&q=80",
        ),
        (
            "Certificate Programs",
            "Certificate",
            "Certificate",
            "https://images.unsplash.com/photo-1606761568499-6d2451b23c66?auto=format&fit=crop&w=500&q=80",
        ),
    ]
    .into_iter()
    .map(|(name, category, level, image)| AcademicCard {
        name: name.to_string(),
        category: category.to_string(),
        level: level.to_string(),
        description: BLURB.to_string(),
        image: image.to_string(),
    })
    .collect()
}

/// A labelled outbound link (CTA buttons, social profiles).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkConfig {
    pub label: String,
    pub url: String,
}

fn links(labels: &[&str]) -> Vec<LinkConfig> {
    labels
        .iter()
        .map(|label| LinkConfig {
            label: label.to_string(),
            url: "#".to_string(),
        })
        .collect()
}

/// Call-to-action band near the bottom of the homepage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CtaConfig {
    pub heading: String,
    pub actions: Vec<LinkConfig>,
}

impl Default for CtaConfig {
    fn default() -> Self {
        Self {
            heading: "Begin Your Journey at Daystar".to_string(),
            actions: links(&["Virtual Tour", "Download Prospectus", "Book Consultation"]),
        }
    }
}

/// Footer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FooterConfig {
    /// Contact address, one line per entry.
    pub address: Vec<String>,
    pub socials: Vec<LinkConfig>,
    /// Form action for the newsletter signup. Without one the form is
    /// rendered disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newsletter_action: Option<String>,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            address: vec![
                "Nairobi Campus".to_string(),
                "P.O. Box 44400-00100".to_string(),
                "Nairobi, Kenya".to_string(),
            ],
            socials: links(&["Facebook", "Twitter", "Instagram", "LinkedIn"]),
            newsletter_action: None,
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Background of cards and alternating sections.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Secondary text (descriptions, dates, captions).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Brand color for buttons, badges, and headings.
    pub accent: String,
    /// Hover state of accent elements.
    pub accent_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f9fafb".to_string(),
            text: "#111827".to_string(),
            text_muted: "#4b5563".to_string(),
            border: "#e5e7eb".to_string(),
            accent: "#00bfff".to_string(),
            accent_hover: "#0099cc".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0b1120".to_string(),
            surface: "#111827".to_string(),
            text: "#f3f4f6".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#1f2937".to_string(),
            accent: "#33ccff".to_string(),
            accent_hover: "#66d9ff".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Daystar Site Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Tables merge key-by-key over the defaults; arrays ([[stats]], slides, ...)
# replace the default list entirely. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Institution
# ---------------------------------------------------------------------------
[site]
# Short brand shown in the header.
name = "Daystar"
# Full name used in page titles and the footer.
full_name = "Daystar University"
# Banner under the hero headline.
intake = "May 2025 Intake Now Open"
# Where every "Apply Now" button points.
apply_url = "#apply"
# Entries of the language selector (decorative).
locales = ["EN"]

# ---------------------------------------------------------------------------
# Hero carousel
# ---------------------------------------------------------------------------
[hero]
headline = "Shape Your Future at Daystar University"
# Background image URLs, one per slide. Must not be empty.
slides = [
    "https://images.unsplash.com/photo-1523050854058-8df90110c9f1",
    "https://images.unsplash.com/photo-1562774053-701939374585",
    "https://images.unsplash.com/photo-1541339907198-e08756dedf3f",
]
# Milliseconds between automatic slide changes. Must be > 0.
autoplay_ms = 5000

# ---------------------------------------------------------------------------
# Call to action
# ---------------------------------------------------------------------------
[cta]
heading = "Begin Your Journey at Daystar"
actions = [
    { label = "Virtual Tour", url = "#" },
    { label = "Download Prospectus", url = "#" },
    { label = "Book Consultation", url = "#" },
]

# ---------------------------------------------------------------------------
# Footer
# ---------------------------------------------------------------------------
[footer]
address = ["Nairobi Campus", "P.O. Box 44400-00100", "Nairobi, Kenya"]
socials = [
    { label = "Facebook", url = "#" },
    { label = "Twitter", url = "#" },
    { label = "Instagram", url = "#" },
    { label = "LinkedIn", url = "#" },
]
# Newsletter form action. Omit to render the form disabled.
# newsletter_action = "https://lists.example.org/subscribe"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f9fafb"       # Cards, alternating sections
text = "#111827"
text_muted = "#4b5563"    # Descriptions, dates, captions
border = "#e5e7eb"
accent = "#00bfff"        # Buttons, badges, headings
accent_hover = "#0099cc"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0b1120"
surface = "#111827"
text = "#f3f4f6"
text_muted = "#9ca3af"
border = "#1f2937"
accent = "#33ccff"
accent_hover = "#66d9ff"

# ---------------------------------------------------------------------------
# Homepage statistics
# ---------------------------------------------------------------------------
[[stats]]
value = 30
label = "Nationalities"
suffix = "+"

[[stats]]
value = 7000
label = "Enrolled Students"
suffix = "+"

[[stats]]
value = 8
label = "Academic Schools"
suffix = "+"

[[stats]]
value = 500
label = "International Students"
suffix = "+"

# ---------------------------------------------------------------------------
# Homepage programme cards
# ---------------------------------------------------------------------------
# `level` must match a level in programs.toml; the card links to the
# catalogue filtered by it. `category` labels the hero quick link.
[[academics]]
name = "PhD Programs"
category = "PhD"
level = "PhD"
description = "Discover our wide range of programs designed to meet your academic goals."
image = "https://images.unsplash.com/photo-1590012314607-cda9d9b699ae?auto=format&fit=crop&w=500&q=80"

[[academics]]
name = "Masters Programs"
category = "Masters"
level = "Masters"
description = "Discover our wide range of programs designed to meet your academic goals."
image = "https://images.unsplash.com/photo-1524178232363-1fb2b075b655?auto=format&fit=crop&w=500&q=80"

[[academics]]
name = "Bachelor Programs"
category = "Bachelors"
level = "Undergraduate"
description = "Discover our wide range of programs designed to meet your academic goals."
image = "https://images.unsplash.com/photo-1523240795612-9a054b0db644?auto=format&fit=crop&w=500&q=80"

[[academics]]
name = "Diploma Courses"
category = "Diploma"
level = "Diploma"
description = "Discover our wide range of programs designed to meet your academic goals."
image = "https://images.unsplash.com/photo-1546410531-bb4caa6b424d?auto=format&fit=crop&w=500&q=80"

[[academics]]
name = "Certificate Programs"
category = "Certificate"
level = "Certificate"
description = "Discover our wide range of programs designed to meet your academic goals."
image = "https://images.unsplash.com/photo-1606761568499-6d2451b23c66?auto=format&fit=crop&w=500&q=80"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = scheme_properties(&colors.light, "    "),
        dark = scheme_properties(&colors.dark, "        "),
    )
}

fn scheme_properties(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("bg", &scheme.background),
        ("surface", &scheme.surface),
        ("text", &scheme.text),
        ("text-muted", &scheme.text_muted),
        ("border", &scheme.border),
        ("accent", &scheme.accent),
        ("accent-hover", &scheme.accent_hover),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_identity() {
        let config = SiteConfig::default();
        assert_eq!(config.site.name, "Daystar");
        assert_eq!(config.site.full_name, "Daystar University");
        assert_eq!(config.hero.slides.len(), 3);
        assert_eq!(config.hero.autoplay_ms, 5000);
    }

    #[test]
    fn default_config_has_stats_and_cards() {
        let config = SiteConfig::default();
        let labels: Vec<&str> = config.stats.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Nationalities",
                "Enrolled Students",
                "Academic Schools",
                "International Students"
            ]
        );
        assert_eq!(config.academics.len(), 5);
        assert_eq!(config.academics[2].category, "Bachelors");
        assert_eq!(config.academics[2].level, "Undergraduate");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors.light]
accent = "#ff6600"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.colors.light.accent, "#ff6600");
        // Default values preserved
        assert_eq!(config.colors.light.text, "#111827");
        assert_eq!(config.colors.dark.background, "#0b1120");
        assert_eq!(config.stats.len(), 4);
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-bg: #1a1a1a"));
    }

    #[test]
    fn generate_css_includes_all_variables() {
        let css = generate_color_css(&ColorConfig::default());
        for var in [
            "--color-bg:",
            "--color-surface:",
            "--color-text:",
            "--color-text-muted:",
            "--color-border:",
            "--color-accent:",
            "--color-accent-hover:",
        ] {
            assert!(css.contains(var), "missing {var}");
        }
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn sparse_config_keeps_stock_stats_and_cards() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[site]\nlocales = [\"EN\", \"SW\"]\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.stats, default_stats());
        assert_eq!(config.academics, default_academics());
        assert_eq!(config.site.locales, vec!["EN", "SW"]);
    }

    #[test]
    fn stock_defaults_value_carries_arrays() {
        let value = stock_defaults_value();
        let stats = value.get("stats").and_then(|v| v.as_array()).unwrap();
        let academics = value.get("academics").and_then(|v| v.as_array()).unwrap();
        assert_eq!(stats.len(), default_stats().len());
        assert_eq!(academics.len(), default_academics().len());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[site]
intake = "January 2026 Intake Now Open"

[footer]
newsletter_action = "https://lists.example.org/subscribe"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.intake, "January 2026 Intake Now Open");
        assert_eq!(config.site.name, "Daystar");
        assert_eq!(
            config.footer.newsletter_action.as_deref(),
            Some("https://lists.example.org/subscribe")
        );
        assert_eq!(config.footer.address.len(), 3);
    }

    #[test]
    fn array_overlay_replaces_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[[stats]]
value = 12
label = "Campuses"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.stats.len(), 1);
        assert_eq!(config.stats[0].label, "Campuses");
        assert_eq!(config.stats[0].suffix, "");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"autoplay_ms = 5000"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"autoplay_ms = 8000"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("autoplay_ms").unwrap().as_integer(), Some(8000));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fff"
text = "#000"
"##,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fafafa"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let light = merged.get("colors").unwrap().get("light").unwrap();
        assert_eq!(light.get("background").unwrap().as_str(), Some("#fafafa"));
        assert_eq!(light.get("text").unwrap().as_str(), Some("#000"));
    }

    #[test]
    fn merge_toml_array_replaces() {
        let base: toml::Value = toml::from_str(r#"slides = ["a", "b", "c"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"slides = ["z"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("slides").unwrap().as_array().unwrap().len(), 1);
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[hero]
autoplay = 90
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[heroes]\nheadline = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[colors.light]\nbg = \"#fff\"\n",
        )
        .unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_autoplay_zero() {
        let mut config = SiteConfig::default();
        config.hero.autoplay_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("autoplay_ms"));
    }

    #[test]
    fn validate_slides_empty() {
        let mut config = SiteConfig::default();
        config.hero.slides.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_blank_name_and_labels() {
        let mut config = SiteConfig::default();
        config.site.name = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.stats[1].label.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("stats[1]"));

        let mut config = SiteConfig::default();
        config.academics[0].level.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[hero]\nautoplay_ms = 0\n").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in [
            "[site]",
            "[hero]",
            "[cta]",
            "[footer]",
            "[colors.light]",
            "[colors.dark]",
            "[[stats]]",
            "[[academics]]",
        ] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        for key in ["site", "hero", "stats", "academics", "cta", "footer", "colors"] {
            assert!(val.get(key).is_some(), "missing {key}");
        }
    }
}
