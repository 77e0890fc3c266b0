//! Server settings: bind address and date-parameter handling.
//!
//! Sources, later ones winning: built-in defaults, the `[server]` table of
//! `repository.toml`, then environment variables.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::services::DateParamMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub date_params: DateParamMode,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            date_params: DateParamMode::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    server: ServerConfig,
}

impl ServerConfig {
    /// Read the `[server]` table from TOML text; other tables are ignored.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let file: FileConfig = toml::from_str(content)?;
        Ok(file.server)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Apply `HOST`, `PORT` and `SURFSUP_DATE_PARAMS` overrides.
    pub fn with_env_overrides(mut self) -> anyhow::Result<Self> {
        if let Ok(host) = std::env::var("HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got '{}'", port))?;
        }
        if let Ok(mode) = std::env::var("SURFSUP_DATE_PARAMS") {
            self.date_params = mode.parse().map_err(anyhow::Error::msg)?;
        }
        Ok(self)
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
