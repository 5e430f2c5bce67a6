//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. The file is
//! optional: stock defaults cover every key, and a user file only needs the
//! values it wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── site.toml        # Site settings (optional)
//! ├── content/         # YAML records and markdown pages
//! └── static/          # Served under /static
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! content_dir = "content"
//! static_dir = "static"
//!
//! [site]
//! name = "VortexEase"
//! email = "support@vortexease.com"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//!
//! [stories]
//! dir = "img/testimonials"  # Relative to static_dir
//! max_items = 6
//!
//! [colors]
//! primary = "#0b3d91"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding the YAML records and markdown pages.
    pub content_dir: String,
    /// Directory served under `/static`.
    pub static_dir: String,
    /// Business identity shown in page chrome and on the contact page.
    pub site: SiteInfo,
    /// Listener settings for `serve`.
    pub server: ServerConfig,
    /// Success-story sampling on the home page.
    pub stories: StoriesConfig,
    /// Brand colors, emitted as CSS custom properties.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "content".to_string(),
            static_dir: "static".to_string(),
            site: SiteInfo::default(),
            server: ServerConfig::default(),
            stories: StoriesConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port must be non-zero".into(),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "server.host must not be empty".into(),
            ));
        }
        if self.stories.max_items == 0 {
            return Err(ConfigError::Validation(
                "stories.max_items must be at least 1".into(),
            ));
        }
        if !is_contained_relative(&self.stories.dir) {
            return Err(ConfigError::Validation(
                "stories.dir must be a relative path inside static_dir".into(),
            ));
        }
        Ok(())
    }

    pub fn content_path(&self, root: &Path) -> PathBuf {
        root.join(&self.content_dir)
    }

    pub fn static_path(&self, root: &Path) -> PathBuf {
        root.join(&self.static_dir)
    }

    /// Absolute directory scanned for success-story images.
    pub fn stories_path(&self, root: &Path) -> PathBuf {
        self.static_path(root).join(&self.stories.dir)
    }
}

/// Business identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "VortexEase".to_string(),
            tagline: "Provides visa services".to_string(),
            email: "support@vortexease.com".to_string(),
            phone: "+1 000 000 0000".to_string(),
            address: String::new(),
        }
    }
}

/// Listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Success-story sampling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoriesConfig {
    /// Image directory, relative to `static_dir`.
    pub dir: String,
    /// Upper bound on images shown on the home page.
    pub max_items: usize,
}

impl Default for StoriesConfig {
    fn default() -> Self {
        Self {
            dir: "img/testimonials".to_string(),
            max_items: 6,
        }
    }
}

/// Brand colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub primary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            primary: "#0b3d91".to_string(),
            accent: "#f5a623".to_string(),
            background: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
        }
    }
}

fn is_contained_relative(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
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

/// Load `site.toml` from the site root as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load site config from `site.toml` in the given root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value()?, overlay),
        None => stock_defaults_value()?,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `site.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# VortexEase Site Configuration
# =============================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Directory holding the YAML records and markdown pages, relative to the
# site root:
#   visa_service_countries.yaml   country directory (loaded at startup)
#   testimonial.yaml              testimonial block (loaded at startup)
#   landing/<slug>.yaml           one visa detail page per country
#   pages/<name>.md               about, faq, team, terms-and-conditions, ...
#   blog/<slug>.md                blog posts
content_dir = "content"

# Directory served under /static, relative to the site root.
static_dir = "static"

# ---------------------------------------------------------------------------
# Business identity
# ---------------------------------------------------------------------------
[site]
name = "VortexEase"
tagline = "Provides visa services"
email = "support@vortexease.com"
phone = "+1 000 000 0000"
address = ""

# ---------------------------------------------------------------------------
# HTTP listener (vortex-ease serve)
# ---------------------------------------------------------------------------
[server]
host = "0.0.0.0"
port = 8000

# ---------------------------------------------------------------------------
# Success stories on the home page
# ---------------------------------------------------------------------------
[stories]
# Image directory relative to static_dir. File names encode the country,
# e.g. eu_ge_01.png or us_01.png.
dir = "img/testimonials"

# Maximum number of images picked per page view.
max_items = 6

# ---------------------------------------------------------------------------
# Brand colors
# ---------------------------------------------------------------------------
[colors]
primary = "#0b3d91"
accent = "#f5a623"
background = "#ffffff"
text = "#1a1a1a"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-primary: {primary};
    --color-accent: {accent};
    --color-bg: {background};
    --color-text: {text};
}}"#,
        primary = colors.primary,
        accent = colors.accent,
        background = colors.background,
        text = colors.text,
    )
}
