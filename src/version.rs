//! Version identity of an installation.
//!
//! [`Version`] answers "what is running here": the application version,
//! the git checkout state, the upstream reference commit and the versions of
//! the tools and services the application depends on. Each query is
//! independent and computed fresh; the only state kept is the
//! [`InstallationMode`] detected when the value is built.
//!
//! # Example
//!
//! ```no_run
//! use appversion::{Version, VersionConfig};
//!
//! let version = Version::new("/opt/librenms", VersionConfig::default());
//! println!("{}", version.local());
//! println!("{:?}", version.local_commit());
//! println!("rrdtool {}", version.rrdtool());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::VersionConfig;
use crate::database::{self, Database, Disconnected, MigrationState};
use crate::error::Result;
use crate::git::{CommitInfo, GitClient};
use crate::install::InstallationMode;
use crate::probes;
use crate::remote::{RemoteCommit, RemoteCommitClient};
use crate::shell::{CommandRunner, SystemRunner};

/// Release version, reported when git cannot describe the checkout.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version queries for one installation.
pub struct Version {
    install_dir: PathBuf,
    mode: InstallationMode,
    config: VersionConfig,
    runner: Arc<dyn CommandRunner + Send + Sync>,
    database: Box<dyn Database + Send + Sync>,
}

impl Version {
    /// Inspect `install_dir` with real processes and no database.
    pub fn new(install_dir: impl Into<PathBuf>, config: VersionConfig) -> Self {
        Self::builder(install_dir).config(config).build()
    }

    /// Start building a [`Version`] with custom collaborators.
    pub fn builder(install_dir: impl Into<PathBuf>) -> VersionBuilder {
        VersionBuilder::new(install_dir.into())
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    pub fn mode(&self) -> InstallationMode {
        self.mode
    }

    pub fn config(&self) -> &VersionConfig {
        &self.config
    }

    fn git(&self) -> Option<GitClient<'_>> {
        if self.mode.is_source_controlled() {
            Some(GitClient::new(self.runner.as_ref(), &self.install_dir))
        } else {
            None
        }
    }

    /// `git describe --tags` for checkouts, otherwise [`VERSION`].
    ///
    /// Never empty.
    pub fn local(&self) -> String {
        if let Some(git) = self.git() {
            let described = git.describe();
            if !described.is_empty() {
                return described;
            }
            tracing::debug!("git describe gave nothing, using release version");
        }
        VERSION.to_string()
    }

    /// Hash, timestamp and branch of the checkout (all `None` when packaged).
    pub fn local_commit(&self) -> CommitInfo {
        match self.git() {
            Some(git) => git.commit_info(),
            None => CommitInfo::unavailable(),
        }
    }

    /// Latest upstream commit, for checkouts on the `master` channel.
    ///
    /// Empty when the lookup does not apply or the API is unreachable.
    /// Fails only when the API answers with something other than a JSON
    /// object, or the configured proxy is invalid.
    pub fn remote_commit(&self) -> Result<RemoteCommit> {
        if !self.mode.is_source_controlled() || !self.config.tracks_master() {
            tracing::debug!(
                "Skipping remote commit lookup (update channel {:?})",
                self.config.update_channel
            );
            return Ok(RemoteCommit::new());
        }

        let client =
            RemoteCommitClient::new(&self.config.github_api, self.config.http_proxy.as_deref())?;
        client.fetch().into_commit(client.url())
    }

    /// Database server version, or `"Not Connected"`.
    pub fn database_server(&self) -> String {
        database::server_version(self.database.as_ref())
    }

    /// Latest migration and count, or a sentinel state.
    pub fn database(&self) -> MigrationState {
        database::migration_state(self.database.as_ref())
    }

    /// The last ten commits, empty when packaged.
    pub fn git_changelog(&self) -> String {
        self.git().map(|git| git.changelog()).unwrap_or_default()
    }

    /// Unix timestamp of HEAD, empty when packaged.
    pub fn git_date(&self) -> String {
        self.git()
            .map(|git| git.head_timestamp())
            .unwrap_or_default()
    }

    pub fn python(&self) -> String {
        probes::python(self.runner.as_ref(), &self.config.python)
    }

    pub fn rrdtool(&self) -> String {
        probes::rrdtool(self.runner.as_ref(), &self.config.rrdtool)
    }

    pub fn net_snmp(&self) -> String {
        probes::net_snmp(self.runner.as_ref(), &self.config.snmpget)
    }
}

/// Builder for [`Version`].
///
/// Unset collaborators default to real processes, a disconnected database,
/// default configuration and a mode detected from the filesystem and PATH.
pub struct VersionBuilder {
    install_dir: PathBuf,
    mode: Option<InstallationMode>,
    config: VersionConfig,
    runner: Arc<dyn CommandRunner + Send + Sync>,
    database: Box<dyn Database + Send + Sync>,
}

impl VersionBuilder {
    fn new(install_dir: PathBuf) -> Self {
        Self {
            install_dir,
            mode: None,
            config: VersionConfig::default(),
            runner: Arc::new(SystemRunner),
            database: Box::new(Disconnected),
        }
    }

    pub fn config(mut self, config: VersionConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `runner` for every subprocess.
    pub fn runner(mut self, runner: Arc<dyn CommandRunner + Send + Sync>) -> Self {
        self.runner = runner;
        self
    }

    pub fn database(mut self, database: Box<dyn Database + Send + Sync>) -> Self {
        self.database = database;
        self
    }

    /// Skip detection and use `mode`.
    pub fn mode(mut self, mode: InstallationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn build(self) -> Version {
        let mode = self
            .mode
            .unwrap_or_else(|| InstallationMode::detect(&self.install_dir));

        Version {
            install_dir: self.install_dir,
            mode,
            config: self.config,
            runner: self.runner,
            database: self.database,
        }
    }
}
