//! Account Registry server
//!
//! Serves the account routes over HTTP, backed by the in-memory store.
//!
//! # Usage
//!
//! ```bash
//! cargo run --
//! cargo run -- --bind 0.0.0.0:9000 --workers 4
//! cargo run -- --seed accounts.csv --snapshot accounts-out.csv
//! RUST_LOG=account_registry=debug cargo run -- --log-format json
//! ```
//!
//! # Exit Codes
//!
//! - 0: Clean shutdown
//! - 1: Error (bad log level, unreadable seed file, bind failure, etc.)

use account_registry::config::ServerConfig;
use account_registry::http::{shutdown_signal, AccountServer};
use account_registry::io::{load_seed_file, write_snapshot_file};
use account_registry::{cli, logging, AccountService, InMemoryAccountStore};
use std::process;
use std::sync::Arc;
use tracing::{error, info};

fn main() {
    let args = cli::parse_args();

    if let Err(e) = logging::init_logging(&args.log_level, args.log_format) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let config = args.to_server_config();
    if let Err(e) = run(config) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(config: ServerConfig) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.workers)
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

    let service = AccountService::new(Arc::new(InMemoryAccountStore::new()));

    if let Some(seed_file) = &config.seed_file {
        load_seed_file(seed_file, &service)?;
    }

    info!(
        bind = %config.bind_addr,
        workers = config.workers,
        "starting account registry"
    );
    runtime
        .block_on(AccountServer::new(service.clone(), config.bind_addr).run(shutdown_signal()))
        .map_err(|e| format!("Server error on {}: {}", config.bind_addr, e))?;

    if let Some(snapshot_file) = &config.snapshot_file {
        write_snapshot_file(snapshot_file, &service)?;
    }

    info!("account registry stopped");
    Ok(())
}
