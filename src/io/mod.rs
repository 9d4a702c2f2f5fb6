//! I/O module
//!
//! Handles account seed import and snapshot export.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (seed row conversion, snapshot serialization)
//! - `seed_reader` - Streaming seed CSV reader with iterator interface
//! - `seed_loader` - Runs seed rows through the account service; writes snapshots

pub mod csv_format;
pub mod seed_loader;
pub mod seed_reader;

pub use csv_format::{convert_seed_record, write_accounts_csv, SeedRecord};
pub use seed_loader::{load_seed_file, write_snapshot_file, SeedSummary};
pub use seed_reader::{SeedEntry, SeedReader};
