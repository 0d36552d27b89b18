//! Configuration loading.
//!
//! - Schema and defaults in [`schema`]
//! - File discovery, parsing and environment overrides in [`loader`]
//!
//! # Example
//!
//! ```
//! use appversion::config::load_config;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("appversion.yml"), "rrdtool: /opt/rrd/bin/rrdtool").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.rrdtool, "/opt/rrd/bin/rrdtool");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    apply_env_overrides, discover_config, load_config, load_config_file, load_config_with_env,
    parse_config, CONFIG_FILE_NAME, ENV_PREFIX,
};
pub use schema::{VersionConfig, DEFAULT_GITHUB_API};
