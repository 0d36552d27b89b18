//! Configuration file discovery and loading.
//!
//! Resolution order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Config file: an explicit path, or `appversion.yml` in the install root
//! 3. `APPVERSION_*` environment variables

use crate::config::schema::VersionConfig;
use crate::error::{Result, VersionError};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file name looked up in the installation root.
pub const CONFIG_FILE_NAME: &str = "appversion.yml";

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "APPVERSION_";

/// Find `appversion.yml` in the installation root.
pub fn discover_config(install_dir: &Path) -> Option<PathBuf> {
    let path = install_dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load and parse a config file.
pub fn load_config_file(path: &Path) -> Result<VersionConfig> {
    if !path.exists() {
        return Err(VersionError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content, path)
}

/// Parse config content; `path` is only used for error messages.
pub fn parse_config(content: &str, path: &Path) -> Result<VersionConfig> {
    if content.trim().is_empty() {
        return Ok(VersionConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| VersionError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Apply `APPVERSION_*` overrides using a custom lookup.
///
/// This allows testing without modifying actual environment variables.
pub fn apply_env_overrides<F>(config: &mut VersionConfig, env_fn: F)
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    let var = |key: &str| env_fn(&format!("{}{}", ENV_PREFIX, key)).ok();

    if let Some(v) = var("UPDATE_CHANNEL") {
        config.update_channel = v;
    }
    if let Some(v) = var("GITHUB_API") {
        config.github_api = v;
    }
    if let Some(v) = var("RRDTOOL") {
        config.rrdtool = v;
    }
    if let Some(v) = var("SNMPGET") {
        config.snmpget = v;
    }
    if let Some(v) = var("PYTHON") {
        config.python = v;
    }
    if let Some(v) = var("HTTP_PROXY") {
        config.http_proxy = Some(v).filter(|p| !p.is_empty());
    }
}

/// Load the effective configuration for an installation.
///
/// An explicit `config_path` must exist. Without one, `appversion.yml` in
/// `install_dir` is used when present.
pub fn load_config(install_dir: &Path, config_path: Option<&Path>) -> Result<VersionConfig> {
    load_config_with_env(install_dir, config_path, |key: &str| std::env::var(key))
}

/// [`load_config`] with a custom environment lookup.
pub fn load_config_with_env<F>(
    install_dir: &Path,
    config_path: Option<&Path>,
    env_fn: F,
) -> Result<VersionConfig>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    let path = match config_path {
        Some(p) => Some(p.to_path_buf()),
        None => discover_config(install_dir),
    };

    let mut config = match &path {
        Some(p) => {
            tracing::debug!("Loading config from {}", p.display());
            load_config_file(p)?
        }
        None => VersionConfig::default(),
    };

    apply_env_overrides(&mut config, env_fn);
    Ok(config)
}
