//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by the user's `config.toml` at the content root; the file is
//! sparse and only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! contact_email = "contact@example.com"  # Shown on the contact page
//!
//! [gallery]
//! manifest = "images/gallery.json"  # Manifest path, relative to the content root
//! assets_dir = "images"             # Copied to the output root as-is
//!
//! [links]
//! map = "https://maps.app.goo.gl/pQNXR9TZ3nFKcBZy6"
//! train = "https://www.ter.sncf.com/nouvelle-aquitaine/se-deplacer/gares/la-souterraine-87592378"
//!
//! [colors.light]
//! background = "#fdfaf5"
//! text = "#2b2118"
//! text_muted = "#7a6a58"    # Captions, footer tagline
//! accent = "#8a6d3b"        # Links, active language
//! border = "#e8dfd0"
//!
//! [colors.dark]
//! background = "#17130f"
//! text = "#f1e9dc"
//! text_muted = "#a8998a"
//! accent = "#d6b57a"
//! border = "#3a3128"
//! ```
//!
//! Unknown keys are rejected to catch typos early. In particular the old
//! site password setting is gone: access control is done by the reverse
//! proxy serving the site.

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
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Address shown as a `mailto:` link on the contact page.
    pub contact_email: String,
    /// Gallery manifest and image assets.
    pub gallery: GalleryConfig,
    /// External links on the address page.
    pub links: LinksConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            contact_email: "contact@example.com".to_string(),
            gallery: GalleryConfig::default(),
            links: LinksConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let email = self.contact_email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ConfigError::Validation(format!(
                "contact_email must be an email address, got '{}'",
                self.contact_email
            )));
        }
        if self.gallery.manifest.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gallery.manifest must not be empty".into(),
            ));
        }
        if self.gallery.assets_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gallery.assets_dir must not be empty".into(),
            ));
        }
        for (mode, scheme) in [("light", &self.colors.light), ("dark", &self.colors.dark)] {
            if let Some(field) = scheme.first_empty_field() {
                return Err(ConfigError::Validation(format!(
                    "colors.{mode}.{field} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Gallery manifest and image asset locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Manifest path relative to the content root.
    pub manifest: String,
    /// Directory (relative to the content root) copied to the output root.
    pub assets_dir: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            manifest: "images/gallery.json".to_string(),
            assets_dir: "images".to_string(),
        }
    }
}

/// External links on the address page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    /// Map of the venue.
    pub map: String,
    /// Closest train station.
    pub train: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            map: "https://maps.app.goo.gl/pQNXR9TZ3nFKcBZy6".to_string(),
            train: "https://www.ter.sncf.com/nouvelle-aquitaine/se-deplacer/gares/la-souterraine-87592378"
                .to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
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
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Captions and the footer tagline.
    pub text_muted: String,
    /// Links and the active language button.
    pub accent: String,
    pub border: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#fdfaf5".to_string(),
            text: "#2b2118".to_string(),
            text_muted: "#7a6a58".to_string(),
            accent: "#8a6d3b".to_string(),
            border: "#e8dfd0".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#17130f".to_string(),
            text: "#f1e9dc".to_string(),
            text_muted: "#a8998a".to_string(),
            accent: "#d6b57a".to_string(),
            border: "#3a3128".to_string(),
        }
    }

    fn first_empty_field(&self) -> Option<&'static str> {
        [
            ("background", &self.background),
            ("text", &self.text),
            ("text_muted", &self.text_muted),
            ("accent", &self.accent),
            ("border", &self.border),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
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
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
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

/// Load `config.toml` from `root` as a raw TOML value, if present.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the content root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Wedding Site Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Address shown on the contact page.
contact_email = "contact@example.com"

# ---------------------------------------------------------------------------
# Gallery
# ---------------------------------------------------------------------------
[gallery]
# Manifest listing the gallery images, relative to the content root.
# When missing or unreadable, four placeholder photos are shown instead.
manifest = "images/gallery.json"

# Directory copied to the output root as-is (photos, manifest, favicon).
assets_dir = "images"

# ---------------------------------------------------------------------------
# External links on the address page
# ---------------------------------------------------------------------------
[links]
map = "https://maps.app.goo.gl/pQNXR9TZ3nFKcBZy6"
train = "https://www.ter.sncf.com/nouvelle-aquitaine/se-deplacer/gares/la-souterraine-87592378"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#fdfaf5"
text = "#2b2118"
text_muted = "#7a6a58"    # Captions, footer tagline
accent = "#8a6d3b"        # Links, active language
border = "#e8dfd0"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#17130f"
text = "#f1e9dc"
text_muted = "#a8998a"
accent = "#d6b57a"
border = "#3a3128"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-accent: {light_accent};
    --color-border: {light_border};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-accent: {dark_accent};
        --color-border: {dark_border};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_accent = colors.light.accent,
        light_border = colors.light.border,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_accent = colors.dark.accent,
        dark_border = colors.dark.border,
    )
}
