//! Git queries against the installation checkout.
//!
//! [`GitClient`] wraps the handful of read-only git subcommands needed to
//! describe the running code. All of them run with the installation root as
//! working directory and report failure as empty output, never as an error.
//!
//! The one write is [`GitClient::trust_work_tree`], used to recover from
//! git refusing to operate on a checkout owned by another user.

pub mod commit;

pub use commit::{split_commit_line, CommitInfo};

use std::path::Path;

use crate::install::GIT_BINARY;
use crate::shell::{capture, CommandResult, CommandRunner, CommandSpec};

/// Exit status git uses for fatal errors.
pub const FATAL_EXIT_CODE: i32 = 128;

/// Start of the diagnostic git prints for a checkout it considers unsafe.
pub const UNSAFE_REPOSITORY_MARKER: &str = "fatal: unsafe repository";

/// `--pretty` format printing `<full hash>|<committer unix timestamp>`.
const COMMIT_FORMAT: &str = "--pretty=%H|%ct";

/// Number of entries in the changelog.
const CHANGELOG_ENTRIES: &str = "-10";

/// Git commands rooted at an installation directory.
pub struct GitClient<'a> {
    runner: &'a dyn CommandRunner,
    work_tree: &'a Path,
}

impl<'a> GitClient<'a> {
    /// Create a client running git in `work_tree`.
    pub fn new(runner: &'a dyn CommandRunner, work_tree: &'a Path) -> Self {
        Self { runner, work_tree }
    }

    fn git<const N: usize>(&self, args: [&str; N]) -> CommandResult {
        let spec = CommandSpec::new(GIT_BINARY)
            .args(args)
            .current_dir(self.work_tree);
        capture(self.runner, &spec)
    }

    /// `git describe --tags`, trimmed. Empty when there is no tag or git fails.
    pub fn describe(&self) -> String {
        self.git(["describe", "--tags"]).stdout.trim_end().to_string()
    }

    /// Raw result of the `<sha>|<timestamp>` query for HEAD.
    pub fn head_commit(&self) -> CommandResult {
        self.git(["show", "-q", COMMIT_FORMAT])
    }

    /// Current branch name (`HEAD` when detached), trimmed.
    pub fn current_branch(&self) -> String {
        self.git(["rev-parse", "--abbrev-ref", "HEAD"])
            .stdout
            .trim_end()
            .to_string()
    }

    /// Register the work tree in the user's global `safe.directory` list.
    ///
    /// The outcome is not inspected.
    pub fn trust_work_tree(&self) {
        let path = self.work_tree.to_string_lossy();
        tracing::warn!(
            "git reports an unsafe repository; adding {} to safe.directory",
            path
        );
        let _ = self.git(["config", "--global", "--add", "safe.directory", &*path]);
    }

    /// The last ten log entries, trimmed.
    pub fn changelog(&self) -> String {
        self.git(["log", CHANGELOG_ENTRIES])
            .stdout
            .trim_end()
            .to_string()
    }

    /// Unix timestamp of HEAD, trimmed.
    pub fn head_timestamp(&self) -> String {
        self.git(["show", "--pretty=%ct", "-s", "HEAD"])
            .stdout
            .trim_end()
            .to_string()
    }

    /// Hash, timestamp and branch of HEAD.
    ///
    /// If git rejects the checkout as unsafe, the work tree is trusted once
    /// and the query repeated once; whatever the second attempt prints is
    /// used.
    pub fn commit_info(&self) -> CommitInfo {
        let mut commit = self.head_commit();

        if is_unsafe_repository(&commit) {
            self.trust_work_tree();
            commit = self.head_commit();
        }

        let branch = self.current_branch();
        CommitInfo::from_output(&commit.stdout, &branch)
    }
}

/// Whether a git result is the "unsafe repository" ownership rejection.
pub fn is_unsafe_repository(result: &CommandResult) -> bool {
    result.exit_code == Some(FATAL_EXIT_CODE)
        && result.stderr.starts_with(UNSAFE_REPOSITORY_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ScriptedRunner;

    const UNSAFE_STDERR: &str = "fatal: unsafe repository ('/opt/app' is owned by someone else)\n";

    #[test]
    fn unsafe_repository_needs_code_and_marker() {
        assert!(is_unsafe_repository(&CommandResult::failure(
            Some(128),
            "",
            UNSAFE_STDERR
        )));
        assert!(!is_unsafe_repository(&CommandResult::failure(
            Some(1),
            "",
            UNSAFE_STDERR
        )));
        assert!(!is_unsafe_repository(&CommandResult::failure(
            Some(128),
            "",
            "fatal: not a git repository"
        )));
    }

    #[test]
    fn commands_run_in_work_tree() {
        let runner = ScriptedRunner::new();
        runner.respond(
            GIT_BINARY,
            &["describe", "--tags"],
            CommandResult::success("22.5.0-42-g3f4e2a1\n", ""),
        );
        let dir = Path::new("/opt/app");

        let client = GitClient::new(&runner, dir);
        assert_eq!(client.describe(), "22.5.0-42-g3f4e2a1");

        let calls = runner.calls();
        assert_eq!(calls[0].cwd.as_deref(), Some(dir));
    }

    #[test]
    fn describe_without_git_is_empty() {
        let runner = ScriptedRunner::new();
        let client = GitClient::new(&runner, Path::new("/opt/app"));
        assert_eq!(client.describe(), "");
    }

    #[test]
    fn commit_info_parses_both_queries() {
        let runner = ScriptedRunner::new();
        runner.respond(
            GIT_BINARY,
            &["show", "-q", COMMIT_FORMAT],
            CommandResult::success("abc123|1656000000\n", ""),
        );
        runner.respond(
            GIT_BINARY,
            &["rev-parse", "--abbrev-ref", "HEAD"],
            CommandResult::success("master\n", ""),
        );

        let info = GitClient::new(&runner, Path::new("/opt/app")).commit_info();

        assert_eq!(info.sha.as_deref(), Some("abc123"));
        assert_eq!(info.date.as_deref(), Some("1656000000"));
        assert_eq!(info.branch.as_deref(), Some("master"));
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn unsafe_repository_is_trusted_then_retried_once() {
        let runner = ScriptedRunner::new();
        let show = ["show", "-q", COMMIT_FORMAT];
        runner.respond(
            GIT_BINARY,
            &show,
            CommandResult::failure(Some(128), "", UNSAFE_STDERR),
        );
        runner.respond(
            GIT_BINARY,
            &show,
            CommandResult::success("abc123|1656000000\n", ""),
        );
        runner.respond(
            GIT_BINARY,
            &["config", "--global", "--add", "safe.directory", "/opt/app"],
            CommandResult::success("", ""),
        );
        runner.respond(
            GIT_BINARY,
            &["rev-parse", "--abbrev-ref", "HEAD"],
            CommandResult::success("master\n", ""),
        );

        let info = GitClient::new(&runner, Path::new("/opt/app")).commit_info();

        assert_eq!(info.sha.as_deref(), Some("abc123"));
        assert_eq!(runner.count(GIT_BINARY, &show), 2);
        assert_eq!(
            runner.count(
                GIT_BINARY,
                &["config", "--global", "--add", "safe.directory", "/opt/app"]
            ),
            1
        );
    }

    #[test]
    fn failed_retry_is_not_repeated() {
        let runner = ScriptedRunner::new();
        let show = ["show", "-q", COMMIT_FORMAT];
        runner.respond(
            GIT_BINARY,
            &show,
            CommandResult::failure(Some(128), "", UNSAFE_STDERR),
        );

        let info = GitClient::new(&runner, Path::new("/opt/app")).commit_info();

        assert_eq!(runner.count(GIT_BINARY, &show), 2);
        assert_eq!(info.sha.as_deref(), Some(""));
        assert_eq!(info.date.as_deref(), Some(""));
        assert_eq!(info.branch.as_deref(), Some(""));
    }

    #[test]
    fn other_failures_are_not_retried() {
        let runner = ScriptedRunner::new();
        let show = ["show", "-q", COMMIT_FORMAT];
        runner.respond(
            GIT_BINARY,
            &show,
            CommandResult::failure(Some(128), "", "fatal: not a git repository\n"),
        );

        let _ = GitClient::new(&runner, Path::new("/opt/app")).commit_info();

        assert_eq!(runner.count(GIT_BINARY, &show), 1);
        assert!(runner
            .calls()
            .iter()
            .all(|c| c.args.first().map(String::as_str) != Some("config")));
    }

    #[test]
    fn changelog_and_timestamp_are_trimmed() {
        let runner = ScriptedRunner::new();
        runner.respond(
            GIT_BINARY,
            &["log", "-10"],
            CommandResult::success("commit abc\n\n    Fix thing\n\n", ""),
        );
        runner.respond(
            GIT_BINARY,
            &["show", "--pretty=%ct", "-s", "HEAD"],
            CommandResult::success("1656000000\n", ""),
        );

        let client = GitClient::new(&runner, Path::new("/opt/app"));
        assert_eq!(client.changelog(), "commit abc\n\n    Fix thing");
        assert_eq!(client.head_timestamp(), "1656000000");
    }
}
