//! Local commit metadata.

use serde::{Deserialize, Serialize};

/// Separator between the hash and timestamp in the commit query output.
pub const FIELD_SEPARATOR: char = '|';

/// Commit hash, unix timestamp and branch of the local checkout.
///
/// All fields are `None` for packaged installs. For git checkouts every
/// field is `Some`, possibly empty when git printed nothing useful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub sha: Option<String>,
    pub date: Option<String>,
    pub branch: Option<String>,
}

impl CommitInfo {
    /// The all-`None` shape used outside git checkouts.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Build from a `<sha>|<timestamp>` line and a branch name.
    pub fn from_output(commit_line: &str, branch: &str) -> Self {
        let (sha, date) = split_commit_line(commit_line);
        Self {
            sha: Some(sha),
            date: Some(date),
            branch: Some(branch.trim_end().to_string()),
        }
    }

    /// Whether this describes a git checkout.
    pub fn is_available(&self) -> bool {
        self.sha.is_some()
    }
}

/// Split `<sha>|<timestamp>` into its two fields.
///
/// Trailing whitespace is dropped first; missing fields come back empty.
/// Fields past the second are ignored.
pub fn split_commit_line(line: &str) -> (String, String) {
    let mut fields = line.trim_end().split(FIELD_SEPARATOR);
    let sha = fields.next().unwrap_or_default().to_string();
    let date = fields.next().unwrap_or_default().to_string();
    (sha, date)
}
