//! Configuration for the remix CLI.
//!
//! Provides the [`RemixConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `REMIX_CONFIG` environment variable
//! 3. XDG default: `~/.config/remix/config.toml`
//! 4. Built-in defaults

use confyg::{Confygery, env};
use remix_content::{DEFAULT_MAX_SELECTION, HIGHLIGHTS_MARKER};
use remix_core::traits::ConfigProvider;
use remix_core::{Error, Result};
use remix_llm::llm::DEFAULT_MODEL;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "CLAUDE_API_KEY";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the remix CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemixConfig {
    /// Project name, shown in the version banner and logs.
    pub project_name: String,

    /// Language-model settings.
    pub llm: LlmConfig,

    /// Highlight extraction settings.
    pub highlights: HighlightsConfig,

    /// Server configuration.
    pub server: ServerConfig,
}

/// Language-model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API key; falls back to `CLAUDE_API_KEY` when unset.
    pub api_key: Option<String>,

    /// Model identifier.
    pub model: String,

    /// Maximum tokens per completion.
    #[serde(deserialize_with = "number_or_string")]
    pub max_tokens: u32,
}

/// Highlight extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightsConfig {
    /// Heading that opens the highlights section.
    pub marker: String,

    /// Maximum quotes per selection.
    #[serde(deserialize_with = "number_or_string")]
    pub max_selection: usize,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    #[serde(deserialize_with = "number_or_string")]
    pub port: u16,

    /// Host address to bind to.
    pub host: String,
}

// ============================================================================
// Numeric fields from env overlays
// ============================================================================

/// A TOML integer, or the quoted form confyg writes for `REMIX_*` env values.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

fn number_or_string<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + FromStr,
    <T as TryFrom<i64>>::Error: Display,
    <T as FromStr>::Err: Display,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => T::try_from(n).map_err(de::Error::custom),
        NumberOrString::Text(s) => s
            .trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("invalid number {s:?}: {e}"))),
    }
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for RemixConfig {
    fn default() -> Self {
        Self {
            project_name: "remix".to_string(),
            llm: LlmConfig::default(),
            highlights: HighlightsConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 1024,
        }
    }
}

impl Default for HighlightsConfig {
    fn default() -> Self {
        Self {
            marker: HIGHLIGHTS_MARKER.to_string(),
            max_selection: DEFAULT_MAX_SELECTION,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "127.0.0.1".to_string(),
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

/// Prefix of every environment override, and of exported variables.
pub const ENV_PREFIX: &str = "REMIX";

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "REMIX_CONFIG";

/// Config tables that `REMIX_<TABLE>_<KEY>` variables may override.
const ENV_SECTIONS: [&str; 3] = ["llm", "highlights", "server"];

impl RemixConfig {
    /// Layer the config file (if present) and `REMIX_*` variables over the
    /// built-in defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut layers = Confygery::new()
            .map_err(|e| Error::config(format!("Cannot start config loader: {e}")))?;

        match Self::resolve_config_path(config_path) {
            Some(path) if path.is_file() => {
                tracing::debug!("Reading config from {}", path.display());
                layers.add_file(&path.to_string_lossy()).map_err(|e| {
                    Error::config(format!("Cannot read {}: {e}", path.display()))
                })?;
            }
            Some(path) => tracing::debug!("No config file at {}", path.display()),
            None => tracing::debug!("No config directory on this platform"),
        }

        let mut overlay = env::Options::with_top_level(ENV_PREFIX);
        overlay.set_sections(ENV_SECTIONS.iter().map(|s| s.to_string()).collect());
        layers
            .add_env(overlay)
            .map_err(|e| Error::config(format!("Cannot read {ENV_PREFIX}_* variables: {e}")))?;

        layers
            .build()
            .map_err(|e| Error::config(format!("Invalid configuration: {e}")))
    }

    /// Config file location: `explicit`, else `$REMIX_CONFIG`, else the
    /// platform config directory.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// `<config dir>/remix/config.toml`, when the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("remix").join("config.toml"))
    }

    /// Render as a TOML document, the format `config init` writes.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Every setting as a `REMIX_<TABLE>_<KEY>` pair that [`Self::load`]
    /// reads back.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let tree = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        collect_env_vars(&tree, ENV_PREFIX.to_string(), &mut vars);
        Ok(vars)
    }
}

fn collect_env_vars(value: &toml::Value, name: String, vars: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                collect_env_vars(child, format!("{name}_{}", key.to_uppercase()), vars);
            }
        }
        toml::Value::String(s) => vars.push((name, s.clone())),
        other => vars.push((name, other.to_string())),
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for RemixConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn api_key(&self) -> Result<String> {
        self.llm
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                std::env::var(API_KEY_ENV)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
            .ok_or_else(|| {
                Error::config(format!(
                    "API key not configured - set llm.api_key or {API_KEY_ENV}"
                ))
            })
    }

    fn model(&self) -> &str {
        &self.llm.model
    }

    fn max_tokens(&self) -> u32 {
        self.llm.max_tokens
    }

    fn section_marker(&self) -> &str {
        &self.highlights.marker
    }

    fn max_selection(&self) -> usize {
        self.highlights.max_selection
    }
}

// ============================================================================
// Tests
// ============================================================================
