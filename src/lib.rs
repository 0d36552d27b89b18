//! appversion - version identity of an installed application.
//!
//! Reports what is running in an installation: the application version
//! (git-derived or the release constant), the state of the git checkout, the
//! upstream reference commit, and the versions of the database, schema,
//! scripting runtime, RRDtool and Net-SNMP it depends on. Every query
//! degrades to an empty or sentinel value when its dependency is missing.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading
//! - [`database`] - Database server and schema probes
//! - [`error`] - Error types and result aliases
//! - [`git`] - Git queries against the checkout
//! - [`install`] - Installation mode detection
//! - [`probes`] - External tool version probes
//! - [`remote`] - Upstream commit lookup
//! - [`report`] - Full version snapshot
//! - [`shell`] - External command execution
//! - [`version`] - The [`Version`] query facade
//!
//! # Example
//!
//! ```
//! use appversion::{InstallationMode, Version, VERSION};
//!
//! let version = Version::builder("/opt/app")
//!     .mode(InstallationMode::packaged())
//!     .build();
//!
//! assert_eq!(version.local(), VERSION);
//! assert!(version.local_commit().sha.is_none());
//! ```

pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod git;
pub mod install;
pub mod probes;
pub mod remote;
pub mod report;
pub mod shell;
pub mod version;

pub use config::VersionConfig;
pub use database::{Database, Disconnected, MigrationState};
pub use error::{Result, VersionError};
pub use git::CommitInfo;
pub use install::InstallationMode;
pub use remote::RemoteCommit;
pub use report::VersionReport;
pub use version::{Version, VersionBuilder, VERSION};
