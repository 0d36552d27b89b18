//! Database server and schema version probes.
//!
//! Database access belongs to the host application, which implements
//! [`Database`] over whatever driver it uses. The probes here only decide
//! what to report when the connection is missing or the schema is absent.

use serde::{Deserialize, Serialize};

/// Reported in place of versions when no connection is established.
pub const NOT_CONNECTED: &str = "Not Connected";

/// Reported as the last migration when the migrations table cannot be read.
pub const NO_SCHEMA: &str = "No Schema";

/// Query returning the server version in its first column.
pub const SERVER_VERSION_QUERY: &str = "select version()";

/// Query returning the most recently applied migration name.
pub const LATEST_MIGRATION_QUERY: &str =
    "select migration from migrations order by id desc limit 1";

/// Query returning the number of applied migrations.
pub const MIGRATION_COUNT_QUERY: &str = "select count(*) from migrations";

/// Read-only view of the application database.
///
/// Implementations run [`SERVER_VERSION_QUERY`], [`LATEST_MIGRATION_QUERY`]
/// and [`MIGRATION_COUNT_QUERY`] (or their driver's equivalent).
pub trait Database {
    /// Whether a connection is currently established.
    fn is_connected(&self) -> bool;

    /// First column of the first row of `select version()`.
    fn server_version(&self) -> anyhow::Result<Option<String>>;

    /// Name of the migration with the highest id, if any.
    fn latest_migration(&self) -> anyhow::Result<Option<String>>;

    /// Number of rows in the migrations table.
    fn migration_count(&self) -> anyhow::Result<u64>;
}

/// A database that is never connected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disconnected;

impl Database for Disconnected {
    fn is_connected(&self) -> bool {
        false
    }

    fn server_version(&self) -> anyhow::Result<Option<String>> {
        anyhow::bail!("{}", NOT_CONNECTED)
    }

    fn latest_migration(&self) -> anyhow::Result<Option<String>> {
        anyhow::bail!("{}", NOT_CONNECTED)
    }

    fn migration_count(&self) -> anyhow::Result<u64> {
        anyhow::bail!("{}", NOT_CONNECTED)
    }
}

/// Applied schema migrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationState {
    /// Latest migration name, or a sentinel.
    pub last: Option<String>,
    /// Number of applied migrations.
    pub total: u64,
}

impl MigrationState {
    pub fn not_connected() -> Self {
        Self {
            last: Some(NOT_CONNECTED.to_string()),
            total: 0,
        }
    }

    pub fn no_schema() -> Self {
        Self {
            last: Some(NO_SCHEMA.to_string()),
            total: 0,
        }
    }
}

/// Server version string, or [`NOT_CONNECTED`].
///
/// A failing version query is logged and reported as not connected.
pub fn server_version(db: &dyn Database) -> String {
    if !db.is_connected() {
        return NOT_CONNECTED.to_string();
    }

    match db.server_version() {
        Ok(version) => version.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Database version query failed: {:#}", e);
            NOT_CONNECTED.to_string()
        }
    }
}

/// Latest migration and migration count.
pub fn migration_state(db: &dyn Database) -> MigrationState {
    if !db.is_connected() {
        return MigrationState::not_connected();
    }

    let query = || -> anyhow::Result<MigrationState> {
        Ok(MigrationState {
            last: db.latest_migration()?,
            total: db.migration_count()?,
        })
    };

    query().unwrap_or_else(|e| {
        tracing::warn!("Migrations query failed: {:#}", e);
        MigrationState::no_schema()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Connected database with canned answers.
    struct FakeDatabase {
        version: Option<String>,
        migrations: Option<Vec<&'static str>>,
    }

    impl Database for FakeDatabase {
        fn is_connected(&self) -> bool {
            true
        }

        fn server_version(&self) -> anyhow::Result<Option<String>> {
            Ok(self.version.clone())
        }

        fn latest_migration(&self) -> anyhow::Result<Option<String>> {
            match &self.migrations {
                Some(rows) => Ok(rows.last().map(|m| m.to_string())),
                None => anyhow::bail!("Table 'migrations' doesn't exist"),
            }
        }

        fn migration_count(&self) -> anyhow::Result<u64> {
            match &self.migrations {
                Some(rows) => Ok(rows.len() as u64),
                None => anyhow::bail!("Table 'migrations' doesn't exist"),
            }
        }
    }

    /// Connected database whose every query errors.
    struct LostConnection;

    impl Database for LostConnection {
        fn is_connected(&self) -> bool {
            true
        }

        fn server_version(&self) -> anyhow::Result<Option<String>> {
            anyhow::bail!("MySQL server has gone away")
        }

        fn latest_migration(&self) -> anyhow::Result<Option<String>> {
            anyhow::bail!("MySQL server has gone away")
        }

        fn migration_count(&self) -> anyhow::Result<u64> {
            anyhow::bail!("MySQL server has gone away")
        }
    }

    #[test]
    fn disconnected_reports_sentinels() {
        assert_eq!(server_version(&Disconnected), "Not Connected");
        assert_eq!(
            migration_state(&Disconnected),
            MigrationState {
                last: Some("Not Connected".to_string()),
                total: 0
            }
        );
    }

    #[test]
    fn connected_reports_server_version() {
        let db = FakeDatabase {
            version: Some("10.6.8-MariaDB".to_string()),
            migrations: Some(vec![]),
        };
        assert_eq!(server_version(&db), "10.6.8-MariaDB");
    }

    #[test]
    fn null_version_is_empty() {
        let db = FakeDatabase {
            version: None,
            migrations: Some(vec![]),
        };
        assert_eq!(server_version(&db), "");
    }

    #[test]
    fn connected_reports_latest_migration_and_count() {
        let db = FakeDatabase {
            version: None,
            migrations: Some(vec![
                "2018_07_03_091314_create_access_points_table",
                "2022_05_30_084932_update-app-status-length",
            ]),
        };
        assert_eq!(
            migration_state(&db),
            MigrationState {
                last: Some("2022_05_30_084932_update-app-status-length".to_string()),
                total: 2
            }
        );
    }

    #[test]
    fn empty_migrations_table_has_no_last() {
        let db = FakeDatabase {
            version: None,
            migrations: Some(vec![]),
        };
        assert_eq!(
            migration_state(&db),
            MigrationState {
                last: None,
                total: 0
            }
        );
    }

    #[test]
    fn missing_migrations_table_is_no_schema() {
        let db = FakeDatabase {
            version: None,
            migrations: None,
        };
        assert_eq!(migration_state(&db), MigrationState::no_schema());
    }

    #[test]
    fn failing_version_query_is_not_connected() {
        assert_eq!(server_version(&LostConnection), "Not Connected");
        assert_eq!(migration_state(&LostConnection), MigrationState::no_schema());
    }
}
