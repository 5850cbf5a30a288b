//! Runtime configuration loaded via OrthoConfig.
//!
//! Every value can be supplied as a `DEPOT_*` environment variable, a CLI
//! flag or a configuration file entry. Only the database URL is mandatory.

use std::net::SocketAddr;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::inbound::http::state::DEFAULT_MAX_UPLOAD_BYTES;
use crate::outbound::persistence::MigrationRetry;

const DEFAULT_UPLOAD_DIR: &str = "/data/uploads";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:8080",
    "http://127.0.0.1:8080",
    "http://localhost:5173",
];
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIGRATION_ATTEMPTS: u32 = 30;
const DEFAULT_MIGRATION_RETRY_MS: u64 = 1_000;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("DEPOT_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Server settings.
///
/// Every field is optional so an empty environment still loads and the
/// accessors can report what is missing.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DEPOT")]
#[serde(default)]
pub struct DepotSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Directory uploaded images are written to and served from.
    pub upload_dir: Option<String>,
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// Browser origins allowed by CORS. The environment form is comma
    /// separated.
    pub cors_origins: Option<Vec<String>>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// How many times to try applying migrations before giving up.
    pub migration_attempts: Option<u32>,
    /// Pause between migration attempts, in milliseconds.
    pub migration_retry_ms: Option<u64>,
    /// Largest accepted size of one uploaded file, in bytes.
    pub max_upload_bytes: Option<usize>,
}

impl DepotSettings {
    /// Return the database URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when it is unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Return the upload directory, falling back to `/data/uploads`.
    pub fn upload_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.upload_dir.as_deref().unwrap_or(DEFAULT_UPLOAD_DIR))
    }

    /// Return the parsed bind address, falling back to `0.0.0.0:8000`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the value is not a
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                source,
            })
    }

    /// Return the allowed CORS origins. Blank entries are dropped.
    pub fn cors_origins(&self) -> Vec<String> {
        match self.cors_origins.as_deref() {
            Some(origins) => origins
                .iter()
                .map(|origin| origin.trim())
                .filter(|origin| !origin.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.map(ToOwned::to_owned).to_vec(),
        }
    }

    /// Return the connection pool size.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Return the per-file upload cap, falling back to 20 MiB.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    /// Return the migration retry policy.
    pub fn migration_retry(&self) -> MigrationRetry {
        MigrationRetry::new(
            self.migration_attempts.unwrap_or(DEFAULT_MIGRATION_ATTEMPTS),
            Duration::from_millis(
                self.migration_retry_ms
                    .unwrap_or(DEFAULT_MIGRATION_RETRY_MS),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 8] = [
        "DEPOT_DATABASE_URL",
        "DEPOT_UPLOAD_DIR",
        "DEPOT_BIND_ADDR",
        "DEPOT_CORS_ORIGINS",
        "DEPOT_DB_MAX_CONNECTIONS",
        "DEPOT_MIGRATION_ATTEMPTS",
        "DEPOT_MIGRATION_RETRY_MS",
        "DEPOT_MAX_UPLOAD_BYTES",
    ];

    fn load_from_empty_args() -> DepotSettings {
        DepotSettings::load_from_iter([OsString::from("depot")]).expect("config should load")
    }

    #[rstest]
    fn defaults_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        ));
        assert_eq!(settings.upload_dir(), Utf8PathBuf::from("/data/uploads"));
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            SocketAddr::from(([0, 0, 0, 0], 8000))
        );
        assert_eq!(settings.cors_origins().len(), 3);
        assert_eq!(settings.db_max_connections(), 10);
        assert_eq!(settings.migration_retry(), MigrationRetry::default());
        assert_eq!(settings.max_upload_bytes(), 20 * 1024 * 1024);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "DEPOT_DATABASE_URL",
                Some("postgres://depot@db/depot".to_owned()),
            ),
            ("DEPOT_UPLOAD_DIR", Some("/srv/uploads".to_owned())),
            ("DEPOT_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "DEPOT_CORS_ORIGINS",
                Some("https://annotator.example,http://localhost:3000".to_owned()),
            ),
            ("DEPOT_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("DEPOT_MIGRATION_ATTEMPTS", Some("3".to_owned())),
            ("DEPOT_MIGRATION_RETRY_MS", Some("250".to_owned())),
            ("DEPOT_MAX_UPLOAD_BYTES", Some("1048576".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url().expect("url set"),
            "postgres://depot@db/depot"
        );
        assert_eq!(settings.upload_dir(), Utf8PathBuf::from("/srv/uploads"));
        assert_eq!(
            settings.bind_addr().expect("valid address"),
            SocketAddr::from(([127, 0, 0, 1], 9000))
        );
        assert_eq!(
            settings.cors_origins(),
            vec!["https://annotator.example", "http://localhost:3000"]
        );
        assert_eq!(settings.db_max_connections(), 4);
        assert_eq!(
            settings.migration_retry(),
            MigrationRetry::new(3, Duration::from_millis(250))
        );
        assert_eq!(settings.max_upload_bytes(), 1_048_576);
    }

    #[rstest]
    fn a_single_cors_origin_loads() {
        let _guard = lock_env(VARS.map(|name| match name {
            "DEPOT_CORS_ORIGINS" => (name, Some("http://a.example".to_owned())),
            _ => (name, None),
        }));

        assert_eq!(load_from_empty_args().cors_origins(), ["http://a.example"]);
    }

    #[rstest]
    fn blank_cors_entries_are_dropped() {
        let settings = DepotSettings {
            cors_origins: Some(vec![
                " https://annotator.example ".to_owned(),
                "  ".to_owned(),
            ]),
            ..DepotSettings::default()
        };

        assert_eq!(settings.cors_origins(), ["https://annotator.example"]);
    }

    #[rstest]
    #[case("not-an-address")]
    #[case("localhost")]
    fn malformed_bind_addresses_are_reported(#[case] raw: &str) {
        let _guard = lock_env(VARS.map(|name| match name {
            "DEPOT_BIND_ADDR" => (name, Some(raw.to_owned())),
            _ => (name, None),
        }));

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
    }

    #[rstest]
    fn blank_database_url_counts_as_missing() {
        let _guard = lock_env(VARS.map(|name| match name {
            "DEPOT_DATABASE_URL" => (name, Some("   ".to_owned())),
            _ => (name, None),
        }));

        assert!(matches!(
            load_from_empty_args().database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        ));
    }
}
