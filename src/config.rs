//! Raw connection settings and their normalization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::database::{Database, Endpoint};
use crate::error::{DsnError, DsnResult};
use crate::kind::{DEFAULT_MYSQL_PORT, DEFAULT_POSTGRES_PORT, DatabaseKind, Protocol};
use crate::util::{int_default, is_blank, is_unset, str_default};

/// Host used for MySQL and PostgreSQL when none is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// Database file used for SQLite when no path is configured.
pub const DEFAULT_SQLITE_PATH: &str = "/tpm/unknown/db/path";

/// Connection settings as supplied by the caller.
///
/// Every field may be empty or zero. Call [`DatabaseConfig::init`] to
/// validate the settings and obtain a [`Database`] that can render a DSN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database type: `mysql`, `postgres` (or `pgsql`), `sqlite`.
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,

    /// Host address, unix socket path, or SQLite database file path.
    pub host: String,

    /// Server port, only used for TCP connections.
    pub port: i32,

    /// Database name, only used for MySQL and PostgreSQL.
    pub name: String,

    /// Connection protocol for MySQL and PostgreSQL: `tcp` or `unix`.
    pub protocol: String,

    /// Database user.
    pub user: String,

    /// Database password.
    pub password: String,

    /// Additional connection options, rendered as a URI query string.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, String>,
}

impl DatabaseConfig {
    /// Create a new configuration for the given database type.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Set the host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: i32) -> Self {
        self.port = port;
        self
    }

    /// Set the database name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the protocol.
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Set the user.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Add a connection option.
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Validate the settings and fill in defaults.
    ///
    /// The configuration is canonicalized in place: `kind` and `protocol` are
    /// lower-cased and empty `host`, `port` and `protocol` values are replaced
    /// with the defaults for the database type. Checks run in a fixed order
    /// (type, protocol, then host/port/user/name) and stop at the first
    /// failure; defaults applied before a failure are kept.
    ///
    /// Calling `init` again on an already-normalized configuration is a no-op
    /// that returns an equal [`Database`].
    pub fn init(&mut self) -> DsnResult<Database> {
        self.kind = self.kind.to_lowercase();
        let kind = DatabaseKind::resolve(&self.kind).inspect_err(|_| {
            debug!(kind = %self.kind, "rejecting unsupported database type");
        })?;

        let endpoint = match kind {
            DatabaseKind::MySql => self.server_endpoint(DEFAULT_MYSQL_PORT)?,
            DatabaseKind::PostgreSql => self.server_endpoint(DEFAULT_POSTGRES_PORT)?,
            DatabaseKind::Sqlite => {
                if is_blank(&self.host) {
                    debug!(path = DEFAULT_SQLITE_PATH, "sqlite path not set, using fallback");
                }
                self.host = str_default(&self.host, DEFAULT_SQLITE_PATH);
                Endpoint::File {
                    path: self.host.clone(),
                }
            }
        };

        debug!(kind = %kind, host = %self.host, port = self.port, "database settings normalized");

        Ok(Database::new(kind, endpoint, self.parameters.clone()))
    }

    /// Consume the configuration and return the validated [`Database`].
    pub fn into_database(mut self) -> DsnResult<Database> {
        self.init()
    }

    fn server_endpoint(&mut self, default_port: i32) -> DsnResult<Endpoint> {
        self.protocol = self.protocol.to_lowercase();
        if is_blank(&self.protocol) {
            debug!("protocol not set, using tcp");
        }
        self.protocol = str_default(&self.protocol, Protocol::Tcp.as_str());
        let protocol = Protocol::resolve(&self.protocol).inspect_err(|_| {
            debug!(protocol = %self.protocol, "rejecting unsupported protocol");
        })?;

        if is_blank(&self.host) {
            debug!(host = DEFAULT_HOST, "host not set, using default");
        }
        self.host = str_default(&self.host, DEFAULT_HOST);

        if is_unset(self.port) {
            debug!(port = default_port, "port not set, using default");
        }
        self.port = int_default(self.port, default_port);

        if is_blank(&self.user) {
            return Err(DsnError::UserRequired);
        }

        if is_blank(&self.name) {
            return Err(DsnError::NameRequired);
        }

        Ok(Endpoint::Server {
            protocol,
            host: self.host.clone(),
            port: self.port.unsigned_abs(),
            name: self.name.clone(),
            user: self.user.clone(),
            password: (!is_blank(&self.password)).then(|| self.password.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = DatabaseConfig::default();
        assert!(config.kind.is_empty());
        assert_eq!(config.port, 0);
        assert!(config.parameters.is_empty());
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = DatabaseConfig::new("mysql")
            .host("db.example.com")
            .port(3307)
            .name("mydb")
            .protocol("tcp")
            .user("admin")
            .password("secret")
            .parameter("charset", "utf8mb4");

        assert_eq!(config.kind, "mysql");
        assert_eq!(config.host, "db.example.com");
        assert_eq!(config.port, 3307);
        assert_eq!(config.name, "mydb");
        assert_eq!(config.protocol, "tcp");
        assert_eq!(config.user, "admin");
        assert_eq!(config.password, "secret");
        assert_eq!(config.parameters.get("charset").map(String::as_str), Some("utf8mb4"));
    }

    #[test]
    fn test_init_canonicalizes_in_place() {
        let mut config = DatabaseConfig::new("MySQL").protocol("TCP").user("u").name("db");
        config.init().unwrap();

        assert_eq!(config.kind, "mysql");
        assert_eq!(config.protocol, "tcp");
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, 3306);
    }

    #[test]
    fn test_init_default_ports() {
        let mut mysql = DatabaseConfig::new("mysql").user("u").name("db").port(-1);
        mysql.init().unwrap();
        assert_eq!(mysql.port, 3306);

        let mut pgsql = DatabaseConfig::new("pgsql").user("u").name("db");
        pgsql.init().unwrap();
        assert_eq!(pgsql.port, 5432);
    }

    #[test]
    fn test_init_keeps_explicit_values() {
        let mut config = DatabaseConfig::new("postgres")
            .host("10.0.0.5")
            .port(65101)
            .user("u")
            .name("db");
        let database = config.init().unwrap();

        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.port, 65101);
        assert_eq!(database.port(), Some(65101));
    }

    #[test]
    fn test_init_protocol_defaults_to_tcp() {
        let mut config = DatabaseConfig::new("mysql").user("u").name("db");
        let database = config.init().unwrap();
        assert_eq!(config.protocol, "tcp");
        assert_eq!(database.protocol(), Some(Protocol::Tcp));
    }

    #[test]
    fn test_init_unsupported_kind() {
        let mut config = DatabaseConfig::new("UNKNOWN");
        let err = config.init().unwrap_err();
        assert!(err.is_unsupported_kind());
        assert_eq!(config.kind, "unknown");
    }

    #[test]
    fn test_init_unsupported_protocol() {
        for (kind, protocol) in [("mysql", "abc"), ("postgres", "ynix")] {
            let mut config = DatabaseConfig::new(kind).protocol(protocol).user("u").name("db");
            assert_eq!(
                config.init().unwrap_err(),
                DsnError::unsupported_protocol(protocol)
            );
        }
    }

    #[test]
    fn test_init_protocol_checked_before_required_fields() {
        let mut config = DatabaseConfig::new("mysql").protocol("udp");
        assert!(config.init().unwrap_err().is_unsupported_protocol());
    }

    #[test]
    fn test_init_user_required() {
        let mut config = DatabaseConfig::new("mysql").user("  ").name("db");
        assert_eq!(config.init().unwrap_err(), DsnError::UserRequired);

        // defaults applied before the failure are kept
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, 3306);
    }

    #[test]
    fn test_init_user_checked_before_name() {
        let mut config = DatabaseConfig::new("postgres");
        assert_eq!(config.init().unwrap_err(), DsnError::UserRequired);
    }

    #[test]
    fn test_init_name_required() {
        let mut config = DatabaseConfig::new("postgres").user("u").name(" ");
        assert_eq!(config.init().unwrap_err(), DsnError::NameRequired);
    }

    #[test]
    fn test_init_sqlite_skips_server_checks() {
        let mut config = DatabaseConfig::new("sqlite").protocol("Carrier-Pigeon");
        let database = config.init().unwrap();

        assert_eq!(config.host, DEFAULT_SQLITE_PATH);
        assert_eq!(config.protocol, "Carrier-Pigeon");
        assert_eq!(config.port, 0);
        assert_eq!(database.host(), DEFAULT_SQLITE_PATH);
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut config = DatabaseConfig::new("Postgres")
            .protocol("Unix")
            .user("User")
            .password("pw")
            .name("DB")
            .parameter("sslmode", "disable");

        let first = config.init().unwrap();
        let snapshot = config.clone();
        let second = config.init().unwrap();

        assert_eq!(first, second);
        assert_eq!(config, snapshot);
    }

    #[test]
    fn test_into_database() {
        let database = DatabaseConfig::new("sqlite").host("app.db").into_database().unwrap();
        assert_eq!(database.kind(), DatabaseKind::Sqlite);
        assert_eq!(database.host(), "app.db");
    }
}
