use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Duration;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub admin_password: String,
    /// How long a login stays valid.
    pub session_ttl: Duration,
    /// Interval between sweeps of expired session rows. Zero disables the sweep.
    pub session_sweep_interval: std::time::Duration,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| Error::Config(format!("invalid listen address '{addr}': {e}")))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            db_path: PathBuf::from("openly.db"),
            admin_password: "admin".to_string(),
            session_ttl: Duration::hours(24),
            session_sweep_interval: std::time::Duration::from_secs(60 * 60),
        }
    }
}
