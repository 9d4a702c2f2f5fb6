//! Streaming reader over account seed files
//!
//! Yields one create request per CSV row. Delegates row format concerns to
//! the csv_format module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as `Err` items, so the caller can skip
//!   the row and keep going
//! - Line numbers (counting the header as line 1) are attached to entries and
//!   errors
//!
//! ```no_run
//! use account_registry::io::seed_reader::SeedReader;
//! use std::path::Path;
//!
//! let reader = SeedReader::new(Path::new("accounts.csv")).unwrap();
//! for entry in reader {
//!     match entry {
//!         Ok(entry) => println!("line {}: {}", entry.line, entry.request.display_name),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

use crate::io::csv_format::{convert_seed_record, SeedRecord};
use crate::types::CreateAccountRequest;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// One parsed seed row
#[derive(Debug, Clone)]
pub struct SeedEntry {
    /// 1-based line in the file (the header is line 1)
    pub line: usize,
    pub request: CreateAccountRequest,
}

/// Synchronous seed CSV reader
///
/// Reads one row at a time; memory use does not grow with file size.
#[derive(Debug)]
pub struct SeedReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SeedReader {
    /// Open a seed file
    ///
    /// Only headers are trimmed by the CSV layer; field trimming happens in
    /// `convert_seed_record`, which leaves the secret untouched.
    ///
    /// # Returns
    ///
    /// * `Ok(SeedReader)` if the file opened successfully
    /// * `Err(String)` if it could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

impl Iterator for SeedReader {
    type Item = Result<SeedEntry, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<SeedRecord>();
        let result = deserializer.next()?;
        self.line_num += 1;

        Some(match result {
            Ok(record) => Ok(SeedEntry {
                line: self.line_num,
                request: convert_seed_record(record),
            }),
            Err(e) => Err(format!("Line {}: CSV parse error: {}", self.line_num, e)),
        })
    }
}
