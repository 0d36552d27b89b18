//! Command implementations.
//!
//! Each subcommand writes to the supplied writer so output can be captured
//! in tests; errors are returned to `main`, which reports them on stderr.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, CommitArgs, Commands, ReportArgs};
use crate::config::load_config;
use crate::error::{Result, VersionError};
use crate::report::VersionReport;
use crate::version::Version;

/// Routes CLI subcommands to their implementations.
pub struct CommandDispatcher {
    version: Version,
}

impl CommandDispatcher {
    /// Load configuration and inspect the installation at `install_dir`.
    pub fn new(install_dir: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config = load_config(install_dir, config_path)?;
        Ok(Self::with_version(Version::new(install_dir, config)))
    }

    /// Dispatch against an already-built [`Version`].
    pub fn with_version(version: Version) -> Self {
        Self { version }
    }

    /// Build a dispatcher from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let install_dir = match &cli.install_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        };
        Self::new(&install_dir, cli.config.as_deref())
    }

    /// Execute the selected subcommand (`report` when none is given).
    pub fn dispatch(&self, command: Option<&Commands>, out: &mut dyn Write) -> Result<()> {
        match command {
            None => self.report(&ReportArgs::default(), out),
            Some(Commands::Report(args)) => self.report(args, out),
            Some(Commands::Local) => {
                writeln!(out, "{}", self.version.local())?;
                Ok(())
            }
            Some(Commands::Commit(args)) => self.commit(args, out),
            Some(Commands::Changelog) => {
                let changelog = self.version.git_changelog();
                if !changelog.is_empty() {
                    writeln!(out, "{}", changelog)?;
                }
                Ok(())
            }
        }
    }

    fn report(&self, args: &ReportArgs, out: &mut dyn Write) -> Result<()> {
        let report = if args.offline {
            VersionReport::collect_offline(&self.version)
        } else {
            VersionReport::collect(&self.version)?
        };

        if args.json {
            writeln!(out, "{}", to_json(&report)?)?;
        } else {
            write!(out, "{}", report.render_text())?;
        }
        Ok(())
    }

    fn commit(&self, args: &CommitArgs, out: &mut dyn Write) -> Result<()> {
        let commit = self.version.local_commit();

        if args.json {
            writeln!(out, "{}", to_json(&commit)?)?;
        } else if let (Some(sha), Some(date), Some(branch)) =
            (&commit.sha, &commit.date, &commit.branch)
        {
            writeln!(out, "{} {} {}", sha, date, branch)?;
        } else {
            writeln!(out, "not a git installation")?;
        }
        Ok(())
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| VersionError::Other(e.into()))
}
