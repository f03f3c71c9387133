//! Wizard configuration module.
//!
//! Handles loading, validating, and merging `wizard.toml`. Stock defaults are
//! overridden by whatever the site's file specifies; a file only needs the
//! keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [navigation]
//! allow_back = true         # Offer a "Previous" button
//!
//! [progress]
//! show = true               # Progress bar and "Step X of Y"
//!
//! [submission]
//! # timeout_ms = 15000      # Give up on the completion callback (unset = wait forever)
//!
//! [transition]
//! animate = true            # Slide between steps (reduced-motion users never animate)
//! duration_ms = 300
//!
//! [locale]
//! default = "en"            # "en" or "fr"
//!
//! [layout]
//! padding = "2rem"          # Padding around the wizard form (CSS value)
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"
//! border = "#e0e0e0"
//! accent = "#1f4fd1"
//! error = "#b42318"
//!
//! [colors.dark]
//! # same keys, dark-mode values
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::locale::Locale;
use crate::transition::Motion;
use crate::wizard::WizardOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// File name looked up in a config directory.
pub const CONFIG_FILE: &str = "wizard.toml";

const MAX_TRANSITION_MS: u32 = 5000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Wizard configuration loaded from `wizard.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WizardConfig {
    pub navigation: NavigationConfig,
    pub progress: ProgressConfig,
    pub submission: SubmissionConfig,
    pub transition: TransitionConfig,
    pub locale: LocaleConfig,
    pub layout: LayoutConfig,
    pub colors: ColorConfig,
}

impl WizardConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transition.duration_ms > MAX_TRANSITION_MS {
            return Err(ConfigError::Validation(format!(
                "transition.duration_ms must be at most {MAX_TRANSITION_MS}"
            )));
        }
        if self.submission.timeout_ms == Some(0) {
            return Err(ConfigError::Validation(
                "submission.timeout_ms must be positive (omit it to wait indefinitely)".into(),
            ));
        }
        if self.layout.padding.trim().is_empty() {
            return Err(ConfigError::Validation(
                "layout.padding must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Controller options for a wizard rendered in `locale`, or the
    /// configured default locale when `None`.
    pub fn options(&self, locale: Option<Locale>) -> WizardOptions {
        WizardOptions {
            allow_back: self.navigation.allow_back,
            show_progress: self.progress.show,
            submit_timeout: self.submission.timeout_ms.map(Duration::from_millis),
            locale: locale.unwrap_or(self.locale.default),
        }
    }

    pub fn motion(&self) -> Motion {
        Motion::from_config(self.transition.animate, self.transition.duration_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Whether users may step backwards.
    pub allow_back: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self { allow_back: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgressConfig {
    pub show: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self { show: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubmissionConfig {
    /// Milliseconds before an unanswered submission is treated as failed.
    /// When absent, the wizard waits for the completion callback indefinitely.
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionConfig {
    pub animate: bool,
    pub duration_ms: u32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            animate: true,
            duration_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocaleConfig {
    pub default: Locale,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Padding around the wizard form (CSS value).
    pub padding: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: "2rem".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Progress label and step descriptions.
    pub text_muted: String,
    pub border: String,
    /// Progress bar and primary button.
    pub accent: String,
    /// Error banner.
    pub error: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            accent: "#1f4fd1".to_string(),
            error: "#b42318".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            accent: "#7aa2ff".to_string(),
            error: "#f97066".to_string(),
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
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(WizardConfig::default())?)
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

/// Load `wizard.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
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
) -> Result<WizardConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: WizardConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `wizard.toml` in the given directory, on top of the
/// stock defaults.
pub fn load_config(dir: &Path) -> Result<WizardConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(dir = %dir.display(), "loaded wizard config");
    Ok(config)
}

/// Returns a fully-commented stock `wizard.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Site Wizard Configuration
# =================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[navigation]
# Offer a "Previous" button. When false the button is not rendered at all.
allow_back = true

# ---------------------------------------------------------------------------
# Progress indicator
# ---------------------------------------------------------------------------
[progress]
# Progress bar and "Step X of Y" label above the active step.
show = true

# ---------------------------------------------------------------------------
# Submission
# ---------------------------------------------------------------------------
[submission]
# Milliseconds to wait for the completion handler before showing an error
# and letting the visitor retry. Omit to wait indefinitely.
# timeout_ms = 15000

# ---------------------------------------------------------------------------
# Step transitions
# ---------------------------------------------------------------------------
[transition]
# Slide between steps. Visitors who prefer reduced motion never animate.
animate = true
# Animation length, 0-5000 ms. 0 behaves like animate = false.
duration_ms = 300

# ---------------------------------------------------------------------------
# Locale
# ---------------------------------------------------------------------------
[locale]
# "en" or "fr". Used when a page does not request a locale.
default = "en"

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Padding around the wizard form (CSS value).
padding = "2rem"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"    # Progress label, step descriptions
border = "#e0e0e0"
accent = "#1f4fd1"        # Progress bar, primary button
error = "#b42318"         # Error banner

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a0a"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
accent = "#7aa2ff"
error = "#f97066"
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
        light = scheme_vars(&colors.light, "    "),
        dark = scheme_vars(&colors.dark, "        "),
    )
}

fn scheme_vars(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("bg", &scheme.background),
        ("text", &scheme.text),
        ("text-muted", &scheme.text_muted),
        ("border", &scheme.border),
        ("accent", &scheme.accent),
        ("error", &scheme.error),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}
