//! Runtime configuration for the account server

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use tracing::warn;

/// Default listen address
pub const DEFAULT_BIND: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(Ipv4Addr::LOCALHOST),
    8080,
);

/// Settings for one server run
#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
    /// Tokio worker threads
    pub workers: usize,
    /// CSV file imported before serving
    pub seed_file: Option<PathBuf>,
    /// CSV file written after shutdown
    pub snapshot_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND,
            workers: num_cpus::get(),
            seed_file: None,
            snapshot_file: None,
        }
    }
}

impl ServerConfig {
    /// Create a ServerConfig, falling back to the default worker count for zero
    pub fn new(bind_addr: SocketAddr, workers: usize) -> Self {
        let default = Self::default();

        let workers = if workers == 0 {
            warn!(
                "Invalid workers ({}), using default ({})",
                workers, default.workers
            );
            default.workers
        } else {
            workers
        };

        Self {
            bind_addr,
            workers,
            ..default
        }
    }

    pub fn with_seed_file(mut self, path: Option<PathBuf>) -> Self {
        self.seed_file = path;
        self
    }

    pub fn with_snapshot_file(mut self, path: Option<PathBuf>) -> Self {
        self.snapshot_file = path;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.workers, num_cpus::get());
        assert!(config.seed_file.is_none());
        assert!(config.snapshot_file.is_none());
    }

    #[test]
    fn test_zero_workers_falls_back_to_default() {
        let config = ServerConfig::new(DEFAULT_BIND, 0);
        assert_eq!(config.workers, num_cpus::get());
    }

    #[test]
    fn test_builder_sets_files() {
        let config = ServerConfig::new(DEFAULT_BIND, 2)
            .with_seed_file(Some(PathBuf::from("seed.csv")))
            .with_snapshot_file(Some(PathBuf::from("out.csv")));

        assert_eq!(config.workers, 2);
        assert_eq!(config.seed_file, Some(PathBuf::from("seed.csv")));
        assert_eq!(config.snapshot_file, Some(PathBuf::from("out.csv")));
    }
}
