//! Database configuration and environment variable handling.

/// Location of the dataset when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "resources/hawaii.sqlite";

/// Configuration for opening the SQLite store.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path to the database file (`sqlite:///` prefixes are accepted)
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Connection checkout timeout in seconds
    pub connection_timeout_sec: u64,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_pool_size: 4,
            connection_timeout_sec: 30,
        }
    }
}

impl SqliteConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` or `SURFSUP_DATABASE`: Database path (default: `resources/hawaii.sqlite`)
    /// - `SQLITE_POOL_MAX`: Maximum pool size (default: 4)
    /// - `SQLITE_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("SURFSUP_DATABASE"))
            .unwrap_or(defaults.database_url);

        let max_pool_size = match std::env::var("SQLITE_POOL_MAX") {
            Ok(v) => v
                .parse::<u32>()
                .map_err(|_| format!("SQLITE_POOL_MAX must be a positive integer, got '{}'", v))?,
            Err(_) => defaults.max_pool_size,
        };

        let connection_timeout_sec = match std::env::var("SQLITE_CONN_TIMEOUT_SEC") {
            Ok(v) => v.parse::<u64>().map_err(|_| {
                format!("SQLITE_CONN_TIMEOUT_SEC must be a positive integer, got '{}'", v)
            })?,
            Err(_) => defaults.connection_timeout_sec,
        };

        let config = Self {
            database_url,
            max_pool_size,
            connection_timeout_sec,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject pool settings r2d2 cannot be built with.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_pool_size == 0 {
            return Err("max pool size must be at least 1".to_string());
        }
        if self.connection_timeout_sec == 0 {
            return Err("connection timeout must be at least 1 second".to_string());
        }
        Ok(())
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }

    /// Path handed to SQLite, with any `sqlite://` scheme removed.
    ///
    /// `sqlite:///relative.db` is relative and `sqlite:////abs/path.db` is absolute.
    pub fn database_path(&self) -> &str {
        let url = self.database_url.as_str();
        url.strip_prefix("sqlite:///")
            .or_else(|| url.strip_prefix("sqlite://"))
            .unwrap_or(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_strips_scheme() {
        let cfg = SqliteConfig::with_url("sqlite:///resources/hawaii.sqlite");
        assert_eq!(cfg.database_path(), "resources/hawaii.sqlite");
        let cfg = SqliteConfig::with_url("sqlite:////tmp/hawaii.sqlite");
        assert_eq!(cfg.database_path(), "/tmp/hawaii.sqlite");
        let cfg = SqliteConfig::with_url("data/hawaii.sqlite");
        assert_eq!(cfg.database_path(), "data/hawaii.sqlite");
    }

    #[test]
    fn test_default_points_at_hawaii_dataset() {
        let cfg = SqliteConfig::default();
        assert_eq!(cfg.database_path(), DEFAULT_DATABASE_URL);
        assert_eq!(cfg.max_pool_size, 4);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_pool_settings_are_invalid() {
        let cfg = SqliteConfig {
            max_pool_size: 0,
            ..SqliteConfig::default()
        };
        assert!(cfg.validate().unwrap_err().contains("pool size"));

        let cfg = SqliteConfig {
            connection_timeout_sec: 0,
            ..SqliteConfig::default()
        };
        assert!(cfg.validate().unwrap_err().contains("timeout"));
    }
}
