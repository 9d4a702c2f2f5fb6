use crate::config::ServerConfig;
use crate::logging::LogFormat;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Serve the account registry over HTTP
#[derive(Parser, Debug)]
#[command(name = "account-registry")]
#[command(about = "Account registry with unique contact addresses and display names", long_about = None)]
pub struct CliArgs {
    /// Address to listen on
    #[arg(
        long = "bind",
        value_name = "ADDR",
        default_value = "127.0.0.1:8080",
        help = "Socket address for the HTTP listener"
    )]
    pub bind: SocketAddr,

    /// Number of runtime worker threads
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Runtime worker threads (default: CPU cores)"
    )]
    pub workers: Option<usize>,

    /// Seed CSV imported before serving
    #[arg(
        long = "seed",
        value_name = "CSV",
        help = "CSV of accounts to create at startup (given_name,family_name,contact_address,display_name,secret)"
    )]
    pub seed: Option<PathBuf>,

    /// Snapshot CSV written on shutdown
    #[arg(
        long = "snapshot",
        value_name = "CSV",
        help = "Write all accounts (without secrets) to this CSV after shutdown"
    )]
    pub snapshot: Option<PathBuf>,

    /// Log level directive (overridden by RUST_LOG)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,
}

impl CliArgs {
    /// Create a ServerConfig from CLI arguments
    ///
    /// Falls back to defaults for anything not given on the command line.
    pub fn to_server_config(&self) -> ServerConfig {
        let config = match self.workers {
            Some(workers) => ServerConfig::new(self.bind, workers),
            None => ServerConfig {
                bind_addr: self.bind,
                ..ServerConfig::default()
            },
        };

        config
            .with_seed_file(self.seed.clone())
            .with_snapshot_file(self.snapshot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::defaults(&["program"], "127.0.0.1:8080", LogFormat::Pretty, "info")]
    #[case::custom_bind(&["program", "--bind", "0.0.0.0:9000"], "0.0.0.0:9000", LogFormat::Pretty, "info")]
    #[case::json_logs(&["program", "--log-format", "json"], "127.0.0.1:8080", LogFormat::Json, "info")]
    #[case::log_level(&["program", "--log-level", "account_registry=debug"], "127.0.0.1:8080", LogFormat::Pretty, "account_registry=debug")]
    fn test_basic_parsing(
        #[case] args: &[&str],
        #[case] bind: &str,
        #[case] format: LogFormat,
        #[case] level: &str,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.bind.to_string(), bind);
        assert_eq!(parsed.log_format, format);
        assert_eq!(parsed.log_level, level);
    }

    #[rstest]
    #[case::all_defaults(&["program"], num_cpus::get())]
    #[case::custom_workers(&["program", "--workers", "3"], 3)]
    #[case::zero_workers_fallback(&["program", "--workers", "0"], num_cpus::get())]
    fn test_server_config_conversion(#[case] args: &[&str], #[case] expected_workers: usize) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_server_config();

        assert_eq!(config.workers, expected_workers);
        assert_eq!(config.bind_addr, parsed.bind);
    }

    #[test]
    fn test_seed_and_snapshot_paths() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "--seed",
            "accounts.csv",
            "--snapshot",
            "out.csv",
        ])
        .unwrap();
        let config = parsed.to_server_config();

        assert_eq!(config.seed_file, Some(PathBuf::from("accounts.csv")));
        assert_eq!(config.snapshot_file, Some(PathBuf::from("out.csv")));
    }

    #[rstest]
    #[case::bad_bind(&["program", "--bind", "not-an-address"])]
    #[case::bad_workers(&["program", "--workers", "many"])]
    #[case::bad_format(&["program", "--log-format", "xml"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
