//! CSV format handling for seed records and account snapshots
//!
//! This module centralizes all CSV format concerns, providing:
//! - SeedRecord structure for deserialization
//! - Conversion from seed records to create requests
//! - Account snapshot serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{AccountResponse, CreateAccountRequest};
use chrono::SecondsFormat;
use serde::Deserialize;
use std::io::Write;

/// Seed CSV record structure for deserialization
///
/// Matches the seed format with columns:
/// given_name, family_name, contact_address, display_name, secret
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SeedRecord {
    pub given_name: String,
    pub family_name: String,
    pub contact_address: String,
    pub display_name: String,
    pub secret: String,
}

/// Convert a SeedRecord to a CreateAccountRequest
///
/// Fields are trimmed; the secret is taken as-is. Shape validation is left to
/// the caller so seed rows go through the same rules as any other request.
pub fn convert_seed_record(record: SeedRecord) -> CreateAccountRequest {
    CreateAccountRequest {
        given_name: record.given_name.trim().to_string(),
        family_name: record.family_name.trim().to_string(),
        contact_address: record.contact_address.trim().to_string(),
        display_name: record.display_name.trim().to_string(),
        secret: record.secret,
    }
}

/// Write account snapshots to CSV format
///
/// Columns: id, given_name, family_name, contact_address, display_name,
/// active, created_at, updated_at. Timestamps are RFC 3339. Accounts are
/// sorted by id for deterministic output. The secret never appears here.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(
    accounts: &[AccountResponse],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record([
            "id",
            "given_name",
            "family_name",
            "contact_address",
            "display_name",
            "active",
            "created_at",
            "updated_at",
        ])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_accounts: Vec<&AccountResponse> = accounts.iter().collect();
    sorted_accounts.sort_by_key(|account| account.id);

    for account in sorted_accounts {
        writer
            .write_record(&[
                account.id.to_string(),
                account.given_name.clone(),
                account.family_name.clone(),
                account.contact_address.clone(),
                account.display_name.clone(),
                account.active.to_string(),
                account
                    .created_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
                account
                    .updated_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn response(id: u64, name: &str) -> AccountResponse {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        AccountResponse {
            id,
            given_name: "Test".to_string(),
            family_name: "User".to_string(),
            contact_address: format!("{}@example.com", name),
            display_name: name.to_string(),
            created_at: at,
            updated_at: at,
            active: id % 2 == 1,
        }
    }

    #[test]
    fn test_convert_seed_record_trims_fields() {
        let record = SeedRecord {
            given_name: "  John ".to_string(),
            family_name: "Doe".to_string(),
            contact_address: " john.doe@example.com".to_string(),
            display_name: "johndoe ".to_string(),
            secret: " pass word ".to_string(),
        };

        let request = convert_seed_record(record);

        assert_eq!(request.given_name, "John");
        assert_eq!(request.contact_address, "john.doe@example.com");
        assert_eq!(request.display_name, "johndoe");
        assert_eq!(request.secret, " pass word ");
    }

    #[test]
    fn test_write_accounts_csv_sorted_by_id() {
        let accounts = vec![response(2, "second"), response(1, "first")];
        let mut output = Vec::new();

        write_accounts_csv(&accounts, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let expected = "\
id,given_name,family_name,contact_address,display_name,active,created_at,updated_at
1,Test,User,first@example.com,first,true,2024-03-01T09:30:00.000Z,2024-03-01T09:30:00.000Z
2,Test,User,second@example.com,second,false,2024-03-01T09:30:00.000Z,2024-03-01T09:30:00.000Z
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_write_accounts_csv_empty() {
        let mut output = Vec::new();

        write_accounts_csv(&[], &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
