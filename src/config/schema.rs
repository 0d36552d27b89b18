//! Configuration schema.
//!
//! Maps to the YAML configuration file. Every key is optional; missing keys
//! take the defaults below.

use serde::{Deserialize, Serialize};

use crate::probes::{DEFAULT_PYTHON, DEFAULT_RRDTOOL, DEFAULT_SNMPGET};
use crate::remote::MASTER_CHANNEL;

/// Default base URL of the remote commits API (trailing slash included).
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com/repos/librenms/librenms/";

/// Settings consumed by version resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionConfig {
    /// Release stream the installation follows (`master` or `release`)
    pub update_channel: String,

    /// Base URL of the remote API; `commits/master` is appended
    pub github_api: String,

    /// RRDtool binary
    pub rrdtool: String,

    /// Net-SNMP `snmpget` binary
    pub snmpget: String,

    /// Scripting runtime binary
    pub python: String,

    /// Proxy for the remote API (None = use HTTP_PROXY/HTTPS_PROXY)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_proxy: Option<String>,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            update_channel: MASTER_CHANNEL.to_string(),
            github_api: DEFAULT_GITHUB_API.to_string(),
            rrdtool: DEFAULT_RRDTOOL.to_string(),
            snmpget: DEFAULT_SNMPGET.to_string(),
            python: DEFAULT_PYTHON.to_string(),
            http_proxy: None,
        }
    }
}

impl VersionConfig {
    /// Whether the installation tracks the daily (`master`) channel.
    pub fn tracks_master(&self) -> bool {
        self.update_channel == MASTER_CHANNEL
    }
}
