//! Handlers for the `config` subcommands (`path`, `get`, `set`, `init`,
//! `export`), plus the dotted-key helpers they share.

use std::path::PathBuf;

use crate::cli::ConfigAction;
use crate::config::{AssetryConfig, parse_bool};
use crate::error::{Error, Result};

/// Run one `config` subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => {
            println!("{}", cmd_config_get(config_path, &key)?);
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let path = cmd_config_set(config_path, &key, &value)?;
            println!("Set {key} = {value} in {}", path.display());
            Ok(())
        }
        ConfigAction::Init { file, force } => {
            let target = file.as_deref().or(config_path);
            let path = cmd_config_init(target, force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
        ConfigAction::Export { docker_env } => {
            let config = AssetryConfig::load(config_path)?;
            for line in cmd_config_export(&config, docker_env) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

/// Print the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = AssetryConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("could not determine config directory for this platform"))?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!(
            "(file does not exist; run `{} config init` to create it)",
            AssetryConfig::project_name()
        );
    }
    Ok(())
}

/// Look up a value by dotted key in the effective configuration.
pub fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = AssetryConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    let found = get_nested_value(&value, key)
        .ok_or_else(|| Error::config(format!("key '{key}' not found in configuration")))?;
    format_toml_value(found)
}

/// Set a value by dotted key in the config file and return the file path.
///
/// The edited document must still load as a valid configuration.
pub fn cmd_config_set(config_path: Option<&str>, key: &str, value: &str) -> Result<PathBuf> {
    let path = AssetryConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("could not determine config directory"))?;
    if !path.exists() {
        return Err(Error::config(format!(
            "config file does not exist at {}; run `{} config init` first",
            path.display(),
            AssetryConfig::project_name()
        )));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("failed to parse {}: {e}", path.display())))?;

    let parsed = parse_value(value, get_nested_value(&doc, key))?;
    set_nested_value(&mut doc, key, parsed)?;
    doc.clone()
        .try_into::<AssetryConfig>()
        .map_err(|e| Error::config(format!("invalid value for '{key}': {e}")))?
        .validate()?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;
    log::debug!("set {key} in {}", path.display());
    Ok(path)
}

/// Write a default config file and return its path.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => AssetryConfig::default_config_path()
            .ok_or_else(|| Error::config("could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "config file already exists at {}; use --force to overwrite",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = AssetryConfig::default().to_toml_string()?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;
    Ok(path)
}

/// Render the configuration as `KEY=VALUE` lines.
pub fn cmd_config_export(config: &AssetryConfig, docker_env: bool) -> Vec<String> {
    config
        .to_env_vars()
        .into_iter()
        .map(|(key, value)| {
            if docker_env {
                format!("--env {key}={value}")
            } else {
                format!("{key}={value}")
            }
        })
        .collect()
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let mut parts: Vec<&str> = key.split('.').collect();
    let last = match parts.pop() {
        Some(last) if !last.is_empty() => last,
        _ => return Err(Error::config("empty key path")),
    };

    let mut current = root;
    for part in parts {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config(format!("cannot navigate into '{part}'")))?;
        current = table
            .entry(part)
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    let table = current
        .as_table_mut()
        .ok_or_else(|| Error::config(format!("cannot set '{key}' on a non-table value")))?;
    table.insert(last.to_string(), value);
    Ok(())
}

/// Convert command-line text to the TOML type of the value it replaces.
///
/// An existing string stays a string, so `api.token 12345` is not turned
/// into a number. Keys not yet in the file become booleans for
/// `true`/`false`, integers for whole numbers, and strings otherwise.
pub fn parse_value(raw: &str, current: Option<&toml::Value>) -> Result<toml::Value> {
    let raw = raw.trim();
    let value = match current {
        Some(toml::Value::String(_)) => toml::Value::String(raw.to_string()),
        Some(toml::Value::Integer(_)) => raw
            .parse()
            .map(toml::Value::Integer)
            .map_err(|_| Error::config(format!("'{raw}' is not a whole number")))?,
        Some(toml::Value::Boolean(_)) => parse_bool(raw)
            .map(toml::Value::Boolean)
            .ok_or_else(|| Error::config(format!("'{raw}' is not true or false")))?,
        _ => match raw {
            "true" => toml::Value::Boolean(true),
            "false" => toml::Value::Boolean(false),
            _ => raw
                .parse()
                .map(toml::Value::Integer)
                .unwrap_or_else(|_| toml::Value::String(raw.to_string())),
        },
    };
    Ok(value)
}

/// Render a value for `config get`: strings bare, sections as TOML.
pub fn format_toml_value(value: &toml::Value) -> Result<String> {
    match value {
        toml::Value::String(text) => Ok(text.clone()),
        toml::Value::Table(section) => toml::to_string_pretty(section)
            .map(|text| text.trim_end().to_string())
            .map_err(|e| Error::config(e.to_string())),
        scalar => Ok(scalar.to_string()),
    }
}
