//! Validated connection settings and DSN rendering.
//!
//! A [`Database`] can only be obtained from [`DatabaseConfig::init`], so
//! every DSN is rendered from settings that passed validation. The DSN
//! grammar is:
//!
//! - MySQL / PostgreSQL: `user[:password]@protocol(host[:port])/name[?k=v&...]`
//! - SQLite: `path[?k=v&...]`

use std::fmt;

use indexmap::IndexMap;
use url::form_urlencoded;

use crate::config::DatabaseConfig;
use crate::kind::{DatabaseKind, Protocol};

/// Where a validated database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// A database file on the local filesystem.
    File {
        /// Path to the database file.
        path: String,
    },
    /// A database server reached over TCP or a unix socket.
    Server {
        /// Connection protocol.
        protocol: Protocol,
        /// Host address or socket path.
        host: String,
        /// Server port. Not rendered for unix sockets.
        port: u32,
        /// Database name.
        name: String,
        /// Database user.
        user: String,
        /// Password, `None` when blank.
        password: Option<String>,
    },
}

/// Validated database connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    kind: DatabaseKind,
    endpoint: Endpoint,
    parameters: IndexMap<String, String>,
}

impl Database {
    pub(crate) fn new(
        kind: DatabaseKind,
        endpoint: Endpoint,
        parameters: IndexMap<String, String>,
    ) -> Self {
        Self {
            kind,
            endpoint,
            parameters,
        }
    }

    /// The resolved database variant.
    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    /// The validated connection target.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Host address, socket path, or SQLite file path.
    pub fn host(&self) -> &str {
        match &self.endpoint {
            Endpoint::File { path } => path,
            Endpoint::Server { host, .. } => host,
        }
    }

    /// Server port, `None` for SQLite.
    pub fn port(&self) -> Option<u32> {
        match &self.endpoint {
            Endpoint::File { .. } => None,
            Endpoint::Server { port, .. } => Some(*port),
        }
    }

    /// Connection protocol, `None` for SQLite.
    pub fn protocol(&self) -> Option<Protocol> {
        match &self.endpoint {
            Endpoint::File { .. } => None,
            Endpoint::Server { protocol, .. } => Some(*protocol),
        }
    }

    /// Database name, `None` for SQLite.
    pub fn name(&self) -> Option<&str> {
        match &self.endpoint {
            Endpoint::File { .. } => None,
            Endpoint::Server { name, .. } => Some(name),
        }
    }

    /// Database user, `None` for SQLite.
    pub fn user(&self) -> Option<&str> {
        match &self.endpoint {
            Endpoint::File { .. } => None,
            Endpoint::Server { user, .. } => Some(user),
        }
    }

    /// Database password, `None` for SQLite or when blank.
    pub fn password(&self) -> Option<&str> {
        match &self.endpoint {
            Endpoint::File { .. } => None,
            Endpoint::Server { password, .. } => password.as_deref(),
        }
    }

    /// Additional connection options.
    pub fn parameters(&self) -> &IndexMap<String, String> {
        &self.parameters
    }

    /// Render the data source name passed to the database driver.
    pub fn dsn(&self) -> String {
        let mut dsn = String::new();

        if let Endpoint::Server { name, .. } = &self.endpoint {
            dsn.push_str(&self.auth_string());
            dsn.push('@');
            dsn.push_str(&self.source_string());
            dsn.push('/');
            dsn.push_str(name);
        } else {
            dsn.push_str(&self.source_string());
        }

        dsn.push_str(&self.uri_string());
        dsn
    }

    /// The connection source.
    ///
    /// - SQLite: the file path verbatim
    /// - TCP: `tcp(host:port)`
    /// - unix: `unix(host)`
    pub fn source_string(&self) -> String {
        match &self.endpoint {
            Endpoint::File { path } => path.clone(),
            Endpoint::Server {
                protocol: Protocol::Tcp,
                host,
                port,
                ..
            } => format!("tcp({}:{})", host, port),
            Endpoint::Server {
                protocol: Protocol::Unix,
                host,
                ..
            } => format!("unix({})", host),
        }
    }

    /// The `user[:password]` credentials, empty for SQLite.
    pub fn auth_string(&self) -> String {
        match &self.endpoint {
            Endpoint::File { .. } => String::new(),
            Endpoint::Server {
                user,
                password: Some(password),
                ..
            } => format!("{}:{}", user, password),
            Endpoint::Server { user, .. } => user.clone(),
        }
    }

    /// The encoded connection options prefixed with `?`, or an empty string.
    ///
    /// Keys are emitted in sorted order so the output is reproducible. Keys and
    /// values use `application/x-www-form-urlencoded` escaping: spaces become
    /// `+`, `*` is kept literal and `~` is escaped as `%7E`.
    pub fn uri_string(&self) -> String {
        if self.parameters.is_empty() {
            return String::new();
        }

        let mut pairs: Vec<(&String, &String)> = self.parameters.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let mut serializer = form_urlencoded::Serializer::for_suffix(String::from("?"), 1);
        serializer.extend_pairs(pairs);
        serializer.finish()
    }

    /// Convert back into normalized raw settings.
    pub fn into_config(self) -> DatabaseConfig {
        let mut config = DatabaseConfig::new(self.kind.as_str());
        config.parameters = self.parameters;

        match self.endpoint {
            Endpoint::File { path } => config.host = path,
            Endpoint::Server {
                protocol,
                host,
                port,
                name,
                user,
                password,
            } => {
                config.protocol = protocol.as_str().to_string();
                config.host = host;
                config.port = i32::try_from(port).unwrap_or(i32::MAX);
                config.name = name;
                config.user = user;
                config.password = password.unwrap_or_default();
            }
        }

        config
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dsn())
    }
}
