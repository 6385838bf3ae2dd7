// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, XrunError};

/// Config file name looked up in the current directory by default.
pub const DEFAULT_CONFIG_FILE: &str = "config.xrun.json";

/// On-disk encoding of a config file, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// `.toml` means TOML; anything else is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config = match ConfigFormat::from_path(path) {
        ConfigFormat::Toml => toml::from_str(&contents)?,
        ConfigFormat::Json => serde_json::from_str(&contents)?,
    };

    Ok(config)
}

/// Load a configuration file from path, validate it, and resolve relative
/// working directories against the config file's directory.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let raw_config = load_from_path(path)?;
    let config = ConfigFile::try_from(raw_config)?;
    let base = config_base_dir(path);
    debug!(base = %base.display(), "resolving command working directories");
    Ok(config.with_base_dir(&base))
}

/// Write the starter config used by `xrun --init`.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn write_starter_config(path: impl AsRef<Path>, force: bool) -> Result<()> {
    let path = path.as_ref();
    if path.exists() && !force {
        return Err(XrunError::ConfigError(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let starter = RawConfigFile::starter();
    let mut contents = match ConfigFormat::from_path(path) {
        ConfigFormat::Toml => toml::to_string_pretty(&starter)?,
        ConfigFormat::Json => serde_json::to_string_pretty(&starter)?,
    };
    if !contents.ends_with('\n') {
        contents.push('\n');
    }

    fs::write(path, contents)?;
    Ok(())
}

/// Directory that relative command paths are resolved against.
///
/// - If the config path has a non-empty parent (e.g. "configs/config.xrun.json"),
///   we use that directory.
/// - For a bare filename the current working directory is used.
fn config_base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
