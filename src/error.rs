//! Error types for connection settings normalization.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for normalization operations.
pub type DsnResult<T> = Result<T, DsnError>;

/// Errors raised while normalizing a [`DatabaseConfig`](crate::DatabaseConfig).
///
/// Rendering a DSN never fails; every variant here comes from `init`.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum DsnError {
    /// The database type is not one of the recognized literals.
    #[error("unsupported database `{kind}`")]
    #[diagnostic(
        code(dsncfg::unsupported_database),
        help("expected one of: mysql, postgres, pgsql, sqlite")
    )]
    UnsupportedDatabaseKind {
        /// The rejected value, lower-cased.
        kind: String,
    },

    /// The connection protocol is neither `tcp` nor `unix`.
    #[error("unsupported database protocol `{protocol}`")]
    #[diagnostic(
        code(dsncfg::unsupported_protocol),
        help("use `tcp` for host:port connections or `unix` for socket paths")
    )]
    UnsupportedProtocol {
        /// The rejected value, lower-cased.
        protocol: String,
    },

    /// A networked database was configured without a user.
    #[error("database user is required")]
    #[diagnostic(code(dsncfg::user_required))]
    UserRequired,

    /// A networked database was configured without a database name.
    #[error("database name is required")]
    #[diagnostic(code(dsncfg::name_required))]
    NameRequired,
}

impl DsnError {
    /// Create an unsupported database error.
    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        Self::UnsupportedDatabaseKind { kind: kind.into() }
    }

    /// Create an unsupported protocol error.
    pub fn unsupported_protocol(protocol: impl Into<String>) -> Self {
        Self::UnsupportedProtocol {
            protocol: protocol.into(),
        }
    }

    /// Check if this is an unsupported database error.
    pub fn is_unsupported_kind(&self) -> bool {
        matches!(self, Self::UnsupportedDatabaseKind { .. })
    }

    /// Check if this is an unsupported protocol error.
    pub fn is_unsupported_protocol(&self) -> bool {
        matches!(self, Self::UnsupportedProtocol { .. })
    }

    /// Check if a required field (user or name) was missing.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::UserRequired | Self::NameRequired)
    }
}
