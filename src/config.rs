//! Tool configuration.
//!
//! Loads an optional `config.toml` from the config directory (default: the
//! current directory) and merges it over the stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_url = "https://linkpage.example/"      # Prefix of every share URL
//! unnamed_title = "Unnamed page"              # Heading when a page has no name
//! default_section_title = "Untitled section"  # Title of newly added sections
//!
//! [preview]
//! debounce_ms = 750                           # Photo preview settle delay
//!
//! [colors]
//! background = "#1c1917"
//! card = "#292524"
//! card_raised = "#44403c"   # Cards nested inside cards
//! text = "#fafaf9"
//! accent = "#3b82f6"        # Buttons, photo ring, focus outline
//! danger = "#dc2626"        # Remove buttons
//! ```
//!
//! Config files are sparse; override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
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

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Base URL that share links are built on.
    pub base_url: String,
    /// Heading shown for pages without a name.
    pub unnamed_title: String,
    /// Title given to newly added sections.
    pub default_section_title: String,
    /// Photo preview behaviour in the creation form.
    pub preview: PreviewConfig,
    /// Page colors.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://linkpage.example/".to_string(),
            unnamed_title: "Unnamed page".to_string(),
            default_section_title: crate::editor::DEFAULT_SECTION_TITLE.to_string(),
            preview: PreviewConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation("base_url must not be empty".into()));
        }
        if self.base_url.contains(['?', '#']) {
            return Err(ConfigError::Validation(
                "base_url must not contain a query or fragment".into(),
            ));
        }
        if self.preview.debounce_ms > 10_000 {
            return Err(ConfigError::Validation(
                "preview.debounce_ms must be at most 10000".into(),
            ));
        }
        Ok(())
    }
}

/// Photo preview settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Milliseconds the photo URL must stay unchanged before the preview
    /// updates.
    pub debounce_ms: u64,
}

impl PreviewConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: crate::debounce::DEFAULT_DELAY.as_millis() as u64,
        }
    }
}

/// Page color scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: String,
    /// Card background.
    pub card: String,
    /// Background of cards nested in other cards.
    pub card_raised: String,
    pub text: String,
    /// Buttons, photo ring and focus outline.
    pub accent: String,
    /// Destructive buttons.
    pub danger: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#1c1917".to_string(),
            card: "#292524".to_string(),
            card_raised: "#44403c".to_string(),
            text: "#fafaf9".to_string(),
            accent: "#3b82f6".to_string(),
            danger: "#dc2626".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Lay a user `config.toml` over the stock defaults.
///
/// `[preview]` and `[colors]` merge key by key, so a file that sets only
/// `colors.accent` keeps every other default color.
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Defaults plus the optional user file, deserialized and validated.
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

/// Load config from `config.toml` in `dir`, over the stock defaults.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(dir)?;
    if overlay.is_some() {
        tracing::info!(path = %dir.join("config.toml").display(), "Loaded config");
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# linkpage configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Every share URL starts with this. Point it at wherever the viewer is hosted.
base_url = "https://linkpage.example/"

# Heading shown on pages that have no name.
unnamed_title = "Unnamed page"

# Title given to newly added sections in the creation form.
default_section_title = "Untitled section"

# ---------------------------------------------------------------------------
# Photo preview
# ---------------------------------------------------------------------------
[preview]
# The preview only follows the photo URL field once it has stayed unchanged
# for this many milliseconds (0-10000).
debounce_ms = 750

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#1c1917"
card = "#292524"
card_raised = "#44403c"   # Cards nested inside cards
text = "#fafaf9"
accent = "#3b82f6"        # Buttons, photo ring, focus outline
danger = "#dc2626"        # Remove buttons
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-card: {card};
    --color-card-raised: {card_raised};
    --color-text: {text};
    --color-accent: {accent};
    --color-danger: {danger};
}}"#,
        background = colors.background,
        card = colors.card,
        card_raised = colors.card_raised,
        text = colors.text,
        accent = colors.accent,
        danger = colors.danger,
    )
}
