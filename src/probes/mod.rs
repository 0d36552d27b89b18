//! Version probes for external tools.
//!
//! Each probe runs one command and hands its output to the matching parser
//! in [`parsers`]. Probes never fail: a missing binary, a non-zero exit or
//! an unrecognised banner all come back as an empty string.

pub mod parsers;

pub use parsers::{parse_net_snmp_version, parse_python_version, parse_rrdtool_version};

use crate::shell::{capture, CommandRunner, CommandSpec};

/// Default scripting runtime binary.
pub const DEFAULT_PYTHON: &str = "python3";

/// Default RRDtool binary.
pub const DEFAULT_RRDTOOL: &str = "rrdtool";

/// Default Net-SNMP `snmpget` binary.
pub const DEFAULT_SNMPGET: &str = "snmpget";

/// Scripting runtime version from `<python> --version`.
///
/// Any non-zero exit yields an empty string.
pub fn python(runner: &dyn CommandRunner, binary: &str) -> String {
    let result = capture(runner, &CommandSpec::new(binary).args(["--version"]));
    if result.exit_code != Some(0) {
        return String::new();
    }
    parse_python_version(&result.stdout).unwrap_or_default()
}

/// RRDtool version from `<rrdtool> --version`.
pub fn rrdtool(runner: &dyn CommandRunner, binary: &str) -> String {
    let result = capture(runner, &CommandSpec::new(binary).args(["--version"]));
    parse_rrdtool_version(&result.stdout).unwrap_or_default()
}

/// Net-SNMP version from `<snmpget> -V`, which reports on stderr.
pub fn net_snmp(runner: &dyn CommandRunner, binary: &str) -> String {
    let result = capture(runner, &CommandSpec::new(binary).args(["-V"]));
    parse_net_snmp_version(&result.stderr).unwrap_or_default()
}
