//! Snapshot of every version query.
//!
//! [`VersionReport`] runs each [`Version`] query once so the result can be
//! rendered on a status page or serialized for a health check.

use chrono::DateTime;
use console::style;
use serde::Serialize;
use std::fmt::Write;

use crate::database::MigrationState;
use crate::error::Result;
use crate::git::CommitInfo;
use crate::remote::RemoteCommit;
use crate::version::Version;

/// All version information for an installation.
#[derive(Debug, Clone, Serialize)]
pub struct VersionReport {
    pub local: String,
    pub source_controlled: bool,
    pub commit: CommitInfo,
    pub git_date: String,
    pub remote_commit: RemoteCommit,
    pub remote_sha: Option<String>,
    pub database_server: String,
    pub database: MigrationState,
    pub python: String,
    pub rrdtool: String,
    pub net_snmp: String,
}

impl VersionReport {
    /// Run every query, including the remote lookup.
    pub fn collect(version: &Version) -> Result<Self> {
        let remote_commit = version.remote_commit()?;
        Ok(Self::assemble(version, remote_commit))
    }

    /// Run every query except the remote lookup.
    pub fn collect_offline(version: &Version) -> Self {
        Self::assemble(version, RemoteCommit::new())
    }

    fn assemble(version: &Version, remote_commit: RemoteCommit) -> Self {
        let remote_sha = remote_commit
            .get("sha")
            .and_then(|sha| sha.as_str())
            .map(String::from);

        Self {
            local: version.local(),
            source_controlled: version.mode().is_source_controlled(),
            commit: version.local_commit(),
            git_date: version.git_date(),
            remote_commit,
            remote_sha,
            database_server: version.database_server(),
            database: version.database(),
            python: version.python(),
            rrdtool: version.rrdtool(),
            net_snmp: version.net_snmp(),
        }
    }

    /// Whether upstream has a different HEAD than the local checkout.
    ///
    /// False unless both hashes are known.
    pub fn update_available(&self) -> bool {
        match (self.remote_sha.as_deref(), self.commit.sha.as_deref()) {
            (Some(remote), Some(local)) if !remote.is_empty() && !local.is_empty() => {
                remote != local
            }
            _ => false,
        }
    }

    /// Human-readable multi-line rendering.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let mut row = |label: &str, value: &str| {
            let value = if value.is_empty() { "-" } else { value };
            let _ = writeln!(out, "{:<10} {}", style(label).bold(), value);
        };

        row("Version", &self.local);

        if self.source_controlled {
            let sha = self.commit.sha.as_deref().unwrap_or_default();
            let branch = self.commit.branch.as_deref().unwrap_or_default();
            row("Commit", &format!("{} ({})", short_sha(sha), branch));
            row("Date", &format_timestamp(&self.git_date));
            if let Some(remote) = &self.remote_sha {
                let state = if self.update_available() {
                    "update available"
                } else {
                    "up to date"
                };
                row("Upstream", &format!("{} ({})", short_sha(remote), state));
            }
        }

        row("Database", &self.database_server);
        let schema = match &self.database.last {
            Some(last) => format!("{} ({} migrations)", last, self.database.total),
            None => format!("{} migrations", self.database.total),
        };
        row("Schema", &schema);
        row("Python", &self.python);
        row("RRDtool", &self.rrdtool);
        row("SNMP", &self.net_snmp);

        out
    }
}

/// First seven characters of a commit hash.
fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

/// Render a unix timestamp as UTC; anything unparseable is returned as-is.
pub fn format_timestamp(timestamp: &str) -> String {
    timestamp
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
