//! Bulk account import and snapshot export
//!
//! `load_seed_file` runs every seed row through the same validation and
//! service path as an HTTP create. Bad rows are logged and skipped; only a
//! file that cannot be opened stops the import.

use crate::core::{AccountService, AccountStore, Validate};
use crate::io::csv_format::write_accounts_csv;
use crate::io::seed_reader::SeedReader;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Outcome of a seed import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Create one account per row of the seed file at `path`
///
/// # Errors
///
/// Returns `Err(String)` only if the file cannot be opened. Row-level parse,
/// validation and conflict failures are counted in `skipped`.
pub fn load_seed_file<S: AccountStore>(
    path: &Path,
    service: &AccountService<S>,
) -> Result<SeedSummary, String> {
    let reader = SeedReader::new(path)?;
    let mut summary = SeedSummary::default();

    for entry in reader {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(file = %path.display(), "skipping seed row: {}", e);
                summary.skipped += 1;
                continue;
            }
        };

        let outcome = entry
            .request
            .validate()
            .and_then(|_| service.create(entry.request));

        match outcome {
            Ok(account) => {
                summary.imported += 1;
                info!(account_id = account.id, line = entry.line, "seeded account");
            }
            Err(e) => {
                summary.skipped += 1;
                warn!(file = %path.display(), line = entry.line, "skipping seed row: {}", e);
            }
        }
    }

    info!(
        file = %path.display(),
        imported = summary.imported,
        skipped = summary.skipped,
        "seed import finished"
    );
    Ok(summary)
}

/// Write every account held by `service` to a CSV file at `path`
pub fn write_snapshot_file<S: AccountStore>(
    path: &Path,
    service: &AccountService<S>,
) -> Result<usize, String> {
    let accounts = service
        .list_all()
        .map_err(|e| format!("Failed to list accounts: {}", e))?;

    let file = File::create(path)
        .map_err(|e| format!("Failed to create file '{}': {}", path.display(), e))?;
    let mut output = BufWriter::new(file);

    write_accounts_csv(&accounts, &mut output)?;
    output
        .flush()
        .map_err(|e| format!("Failed to flush '{}': {}", path.display(), e))?;

    info!(file = %path.display(), accounts = accounts.len(), "snapshot written");
    Ok(accounts.len())
}
