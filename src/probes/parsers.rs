//! Version banner parsers.
//!
//! One function per tool, each returning `None` when its banner does not
//! look as expected. A format change in one tool cannot leak into another.

use regex::Regex;
use std::sync::LazyLock;

/// Leading `RRDtool <version> ` token of `rrdtool --version`.
static RRDTOOL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^RRDtool ([\w.]+) ").expect("RRDTOOL_REGEX must compile"));

/// Final word of `snmpget -V` (printed on stderr).
static NET_SNMP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.]+$").expect("NET_SNMP_REGEX must compile"));

/// RRDtool 1.7.0 prints its version twice with no separator.
const RRDTOOL_DOUBLED: &str = "1.7.01.7.0";
const RRDTOOL_UNDOUBLED: &str = "1.7.0";

/// `Python 3.10.4` -> `3.10.4`: everything after the first space.
pub fn parse_python_version(stdout: &str) -> Option<String> {
    stdout
        .trim_end()
        .split_once(' ')
        .map(|(_, version)| version.to_string())
}

/// `RRDtool 1.7.2  Copyright ...` -> `1.7.2`.
pub fn parse_rrdtool_version(stdout: &str) -> Option<String> {
    RRDTOOL_REGEX
        .captures(stdout)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace(RRDTOOL_DOUBLED, RRDTOOL_UNDOUBLED))
}

/// `NET-SNMP version: 5.9.1` -> `5.9.1`.
pub fn parse_net_snmp_version(stderr: &str) -> Option<String> {
    NET_SNMP_REGEX
        .find(stderr.trim_end())
        .map(|m| m.as_str().to_string())
}
