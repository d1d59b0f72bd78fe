//! Connection pool settings handed to the driver alongside the DSN.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection pool settings.
///
/// This is a passive record: values are passed through to the pool
/// implementation without validation. Zero or negative values mean
/// "use the driver default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum number of open connections.
    pub max_open_connections: i32,
    /// Maximum number of idle connections.
    pub max_idle_connections: i32,
    /// Maximum connection lifetime in seconds.
    pub max_life_time: i32,
}

impl PoolConfig {
    /// Create empty pool settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of open connections.
    pub fn max_open_connections(mut self, n: i32) -> Self {
        self.max_open_connections = n;
        self
    }

    /// Set the maximum number of idle connections.
    pub fn max_idle_connections(mut self, n: i32) -> Self {
        self.max_idle_connections = n;
        self
    }

    /// Set the maximum connection lifetime in seconds.
    pub fn max_life_time(mut self, secs: i32) -> Self {
        self.max_life_time = secs;
        self
    }

    /// The maximum connection lifetime, `None` when unset.
    pub fn max_lifetime(&self) -> Option<Duration> {
        if crate::util::is_unset(self.max_life_time) {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.max_life_time.unsigned_abs())))
        }
    }
}
