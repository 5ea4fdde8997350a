//! `remix config` subcommands.
//!
//! Keys are dotted paths into the TOML layout of [`RemixConfig`]
//! (`llm.model`, `highlights.max_selection`, ...). `llm.api_key` is never
//! printed in clear.

use crate::cli::ConfigAction;
use crate::config::{ENV_PREFIX, RemixConfig};
use remix_core::{Error, Result};
use std::path::{Path, PathBuf};

const SECRET_KEYS: &[&str] = &["llm.api_key"];
const MASK: &str = "********";

// ============================================================================
// Command dispatch
// ============================================================================

/// Run one `remix config` action.
///
/// Takes the raw `--config` value instead of a loaded config: `path` and
/// `init` must work before any file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            let path = config_file_path(config_path)?;
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(not created yet; `remix config init` writes the defaults)");
            }
        }
        ConfigAction::Get { key } => {
            let config = RemixConfig::load(config_path)?;
            println!("{}", config_get(&config, &key)?);
        }
        ConfigAction::Set { key, value } => {
            let path = config_file_path(config_path)?;
            config_set(&path, &key, &value)?;
            println!("{key} updated in {}", path.display());
        }
        ConfigAction::Init { file, force } => {
            let path = file
                .map(PathBuf::from)
                .or_else(RemixConfig::default_config_path)
                .ok_or_else(no_config_dir)?;
            config_init(&path, force)?;
            println!("Wrote default settings to {}", path.display());
        }
        ConfigAction::Export { docker_env } => {
            let config = RemixConfig::load(config_path)?;
            for line in config_export(&config, docker_env)? {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn config_file_path(config_path: Option<&str>) -> Result<PathBuf> {
    RemixConfig::resolve_config_path(config_path).ok_or_else(no_config_dir)
}

fn no_config_dir() -> Error {
    Error::config("No config directory on this platform; pass --config <path>")
}

// ============================================================================
// Actions
// ============================================================================

/// The value at `key`, or the mask for secrets.
fn config_get(config: &RemixConfig, key: &str) -> Result<String> {
    let tree = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    let value = lookup(&tree, key).ok_or_else(|| Error::config(format!("Unknown setting '{key}'")))?;
    if SECRET_KEYS.contains(&key) {
        return Ok(MASK.to_string());
    }
    Ok(render_value(value))
}

/// Store `value` at `key` in the file at `path`.
///
/// The edited document must still load as a [`RemixConfig`], so a typo such
/// as `server.port = abc` never reaches disk.
fn config_set(path: &Path, key: &str, value: &str) -> Result<()> {
    if !path.is_file() {
        return Err(Error::config(format!(
            "No config file at {}; run `remix config init` first",
            path.display()
        )));
    }

    let text = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    let mut doc: toml::Value = toml::from_str(&text)
        .map_err(|e| Error::config(format!("{} is not valid TOML: {e}", path.display())))?;

    assign(&mut doc, key, parse_scalar(value))?;
    doc.clone()
        .try_into::<RemixConfig>()
        .map_err(|e| Error::config(format!("Rejected {key} = {value}: {e}")))?;

    let updated = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    std::fs::write(path, updated).map_err(|e| Error::io_with_path(e, path))
}

/// Write the default settings to `path`; an existing file is kept unless
/// `force` is set.
fn config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "{} already exists (use --force to replace it)",
            path.display()
        )));
    }

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| Error::io_with_path(e, dir))?;
    }
    let defaults = RemixConfig::default().to_toml_string()?;
    std::fs::write(path, defaults).map_err(|e| Error::io_with_path(e, path))
}

/// `NAME=value` lines (or `--env NAME=value` for docker) with secrets masked.
fn config_export(config: &RemixConfig, docker_env: bool) -> Result<Vec<String>> {
    let secret_vars: Vec<String> = SECRET_KEYS
        .iter()
        .map(|key| format!("{ENV_PREFIX}_{}", key.replace('.', "_").to_uppercase()))
        .collect();
    let flag = if docker_env { "--env " } else { "" };

    Ok(config
        .to_env_vars()?
        .into_iter()
        .map(|(name, value)| {
            let shown = if secret_vars.contains(&name) {
                MASK
            } else {
                value.as_str()
            };
            format!("{flag}{name}={shown}")
        })
        .collect())
}

// ============================================================================
// Dotted keys
// ============================================================================

fn lookup<'a>(tree: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(tree, |node, part| node.as_table()?.get(part))
}

/// Insert `value` at `key`, creating missing tables on the way.
fn assign(tree: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let (tables, leaf) = key.rsplit_once('.').unwrap_or(("", key));
    if leaf.is_empty() {
        return Err(Error::config(format!("Invalid setting name '{key}'")));
    }

    let mut node = tree;
    for part in tables.split('.').filter(|p| !p.is_empty()) {
        node = node
            .as_table_mut()
            .ok_or_else(|| Error::config(format!("'{key}' passes through a plain value")))?
            .entry(part)
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    node.as_table_mut()
        .ok_or_else(|| Error::config(format!("'{key}' passes through a plain value")))?
        .insert(leaf.to_string(), value);
    Ok(())
}

/// Command-line text as a TOML scalar: bool, then integer, then float, then
/// string.
fn parse_scalar(text: &str) -> toml::Value {
    if let Ok(b) = text.parse::<bool>() {
        return toml::Value::Boolean(b);
    }
    if let Ok(i) = text.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => toml::Value::Float(f),
        _ => toml::Value::String(text.to_string()),
    }
}

fn render_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(_) | toml::Value::Array(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        scalar => scalar.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
