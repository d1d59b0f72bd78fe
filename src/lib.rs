//! # dsncfg
//!
//! Database connection settings normalization and DSN rendering.
//!
//! dsncfg provides:
//! - Validation of raw connection settings for MySQL, PostgreSQL and SQLite
//! - Per-database defaults for host, port, protocol and SQLite file path
//! - Rendering of driver-ready data source names (DSN)
//! - A passive connection pool settings record
//!
//! ## Quick Start
//!
//! ```rust
//! use dsncfg::prelude::*;
//!
//! let mut config = DatabaseConfig::new("postgres")
//!     .protocol("Unix")
//!     .user("User")
//!     .password("$anyPw334!")
//!     .name("DB");
//!
//! let database = config.init()?;
//! assert_eq!(database.dsn(), "User:$anyPw334!@unix(localhost)/DB");
//! # Ok::<(), dsncfg::DsnError>(())
//! ```
//!
//! Settings are usually deserialized by the caller:
//!
//! ```rust,ignore
//! let config: DatabaseConfig = serde_json::from_str(r#"{"type": "mysql", "user": "User", "name": "DB"}"#)?;
//! let dsn = config.into_database()?.dsn();
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod database;
pub mod error;
pub mod kind;
pub mod pool;
pub mod util;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::DatabaseConfig;
    pub use crate::database::{Database, Endpoint};
    pub use crate::error::{DsnError, DsnResult};
    pub use crate::kind::{DatabaseKind, Protocol};
    pub use crate::pool::PoolConfig;
}

// Re-export key types at the crate root
pub use config::{DEFAULT_HOST, DEFAULT_SQLITE_PATH, DatabaseConfig};
pub use database::{Database, Endpoint};
pub use error::{DsnError, DsnResult};
pub use kind::{DEFAULT_MYSQL_PORT, DEFAULT_POSTGRES_PORT, DatabaseKind, Protocol};
pub use pool::PoolConfig;
