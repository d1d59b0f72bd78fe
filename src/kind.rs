//! Database variants and connection protocols.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DsnError, DsnResult};

/// Default port for MySQL servers.
pub const DEFAULT_MYSQL_PORT: i32 = 3306;

/// Default port for PostgreSQL servers.
pub const DEFAULT_POSTGRES_PORT: i32 = 5432;

/// Supported database variants.
///
/// Deserialization goes through [`DatabaseKind::resolve`], so it accepts the
/// same case-insensitive literals as parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DatabaseKind {
    /// MySQL / MariaDB.
    MySql,
    /// PostgreSQL.
    #[serde(rename = "postgres")]
    PostgreSql,
    /// SQLite, addressed by file path.
    Sqlite,
}

impl DatabaseKind {
    /// Resolve a user-supplied database type.
    ///
    /// Matching is case-insensitive and exact: `mysql`, `postgres`, `pgsql`
    /// and `sqlite` are the only accepted literals.
    pub fn resolve(value: &str) -> DsnResult<Self> {
        let lowered = value.to_lowercase();
        match lowered.as_str() {
            "mysql" => Ok(Self::MySql),
            "postgres" | "pgsql" => Ok(Self::PostgreSql),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(DsnError::unsupported_kind(lowered)),
        }
    }

    /// Get the canonical name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::PostgreSql => "postgres",
            Self::Sqlite => "sqlite",
        }
    }

    /// The standard server port, or `None` for file-based databases.
    pub fn default_port(&self) -> Option<i32> {
        match self {
            Self::MySql => Some(DEFAULT_MYSQL_PORT),
            Self::PostgreSql => Some(DEFAULT_POSTGRES_PORT),
            Self::Sqlite => None,
        }
    }

    /// Check if this variant is addressed by a file path rather than a server.
    pub fn is_sqlite(&self) -> bool {
        matches!(self, Self::Sqlite)
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseKind {
    type Err = DsnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl TryFrom<String> for DatabaseKind {
    type Error = DsnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::resolve(&value)
    }
}

/// Transport used to reach a MySQL or PostgreSQL server.
///
/// Deserialization goes through [`Protocol::resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Protocol {
    /// TCP, rendered as `tcp(host:port)`.
    #[default]
    Tcp,
    /// Unix domain socket, rendered as `unix(path)`.
    Unix,
}

impl Protocol {
    /// Resolve a user-supplied protocol, defaulting to TCP when blank.
    pub fn resolve(value: &str) -> DsnResult<Self> {
        if crate::util::is_blank(value) {
            return Ok(Self::default());
        }

        let lowered = value.to_lowercase();
        match lowered.as_str() {
            "tcp" => Ok(Self::Tcp),
            "unix" => Ok(Self::Unix),
            _ => Err(DsnError::unsupported_protocol(lowered)),
        }
    }

    /// Get the protocol name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Unix => "unix",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = DsnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl TryFrom<String> for Protocol {
    type Error = DsnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::resolve(&value)
    }
}
