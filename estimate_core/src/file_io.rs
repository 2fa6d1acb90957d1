//! # File I/O Module
//!
//! Handles everything the estimator writes to disk:
//! - **Record log**: an append-only CSV of saved estimates
//! - **Documents**: PDF quotes, written atomically
//!
//! ## Record Log Format
//!
//! ```text
//! Name,Email,Address,sqft,material_cost,labor_cost,total_estimate,duration_days
//! Jane Doe,jane@example.com,"10 Light St, Baltimore MD 21202",100.00,2500.00,325.00,3390.00,0.6
//! ```
//!
//! The header is written once, when the log is created. Each append holds
//! an exclusive OS lock (via fs2) and writes the whole row in one call; if
//! the write fails the file is truncated back to its previous length.
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::file_io::RecordStore;
//! use estimate_core::quote::ClientInfo;
//! use estimate_core::calculations::{estimate, EstimateRequest, PricingPolicy, ProjectType};
//!
//! let client = ClientInfo::new("Jane Doe", "jane@example.com", "", "10 Light St");
//! let request = EstimateRequest::area(ProjectType::Deck, 10.0, 10.0, "PVC");
//! let result = estimate(&request, PricingPolicy::Markup)?;
//!
//! let store = RecordStore::new("estimates.csv");
//! store.append(&client, &result)?;
//! # Ok::<(), estimate_core::errors::EstimateError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::calculations::EstimateResult;
use crate::errors::{CoreResult, EstimateError};
use crate::quote::ClientInfo;

/// Leading columns of every record, before the estimate fields
pub const CLIENT_COLUMNS: [&str; 3] = ["Name", "Email", "Address"];

/// Header and rows read back from a record log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordLog {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Append-only CSV log of saved estimates.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RecordStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one estimate, creating the log (with header) if needed.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The full row was written and synced
    /// * `Err(EstimateError::FileLocked)` - Another process is appending
    /// * `Err(EstimateError::RecordSchemaMismatch)` - The log has different columns
    /// * `Err(EstimateError::FileError)` - I/O error; nothing was appended
    pub fn append(&self, client: &ClientInfo, result: &EstimateResult) -> CoreResult<()> {
        let path_str = self.path.display().to_string();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                EstimateError::file_error("create directory", parent.display().to_string(), e.to_string())
            })?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| EstimateError::file_error("open", &path_str, e.to_string()))?;

        file.try_lock_exclusive()
            .map_err(|_| EstimateError::FileLocked { path: path_str.clone() })?;

        let original_len = file
            .metadata()
            .map_err(|e| EstimateError::file_error("stat", &path_str, e.to_string()))?
            .len();

        let header = record_header(result);
        let write_header = if original_len == 0 {
            true
        } else {
            let existing = read_header(&file)?;
            if existing != header {
                return Err(EstimateError::RecordSchemaMismatch {
                    path: path_str,
                    existing: existing.join(","),
                    incoming: header.join(","),
                });
            }
            false
        };

        let buffer = encode_rows(write_header.then_some(&header), &record_row(client, result))?;

        if let Err(e) = file.write_all(&buffer).and_then(|_| file.sync_all()) {
            // Drop whatever part of the row made it to disk
            let _ = file.set_len(original_len);
            return Err(EstimateError::file_error("append", &path_str, e.to_string()));
        }

        tracing::info!(path = %path_str, client = %client.name, header = write_header, "saved estimate record");
        Ok(())
    }

    /// Read the whole log. A log that does not exist yet is an error.
    pub fn read(&self) -> CoreResult<RecordLog> {
        let file = File::open(&self.path).map_err(|e| {
            EstimateError::file_error("open", self.path.display().to_string(), e.to_string())
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut records = reader.records();
        let header = match records.next() {
            Some(record) => record?.iter().map(str::to_string).collect(),
            None => return Ok(RecordLog::default()),
        };
        let rows = records
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

        Ok(RecordLog { header, rows })
    }
}

/// Column names for a record of this result
fn record_header(result: &EstimateResult) -> Vec<String> {
    CLIENT_COLUMNS
        .iter()
        .copied()
        .chain(result.field_names())
        .map(str::to_string)
        .collect()
}

fn record_row(client: &ClientInfo, result: &EstimateResult) -> Vec<String> {
    [client.name.trim(), client.email.trim(), client.address.trim()]
        .into_iter()
        .map(str::to_string)
        .chain(result.fields().into_iter().map(|(_, value)| value))
        .collect()
}

fn read_header(file: &File) -> CoreResult<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);
    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}

/// Serialize rows in memory so the file sees a single write.
fn encode_rows(header: Option<&Vec<String>>, row: &[String]) -> CoreResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if let Some(header) = header {
        writer.write_record(header)?;
    }
    writer.write_record(row)?;
    writer.into_inner().map_err(|e| EstimateError::SerializationError {
        reason: e.to_string(),
    })
}

/// Write a document with atomic semantics.
///
/// The bytes go to a `.tmp` sibling first, are synced, and then renamed over
/// the target, so a crash never leaves a half-written PDF behind.
pub fn write_document(path: &Path, bytes: &[u8]) -> CoreResult<()> {
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    let tmp_path = path.with_extension(extension);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        EstimateError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    let written = tmp_file.write_all(bytes).and_then(|_| tmp_file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(EstimateError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()));
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        EstimateError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{estimate, EstimateRequest, PricingPolicy, ProjectType};

    fn client(name: &str) -> ClientInfo {
        ClientInfo::new(name, "client@example.com", "410-555-0100", "10 Light St, Baltimore MD 21202")
    }

    fn deck_result(policy: PricingPolicy) -> EstimateResult {
        let request = EstimateRequest::area(ProjectType::Deck, 10.0, 10.0, "Pressure-treated wood").with_markup(20.0);
        estimate(&request, policy).unwrap()
    }

    #[test]
    fn test_two_appends_one_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("estimates.csv"));
        let result = deck_result(PricingPolicy::Markup);

        store.append(&client("First"), &result).unwrap();
        store.append(&client("Second"), &result).unwrap();

        let log = store.read().unwrap();
        assert_eq!(
            log.header,
            vec!["Name", "Email", "Address", "sqft", "material_cost", "labor_cost", "total_estimate", "duration_days"]
        );
        assert_eq!(log.rows.len(), 2);
        assert_eq!(log.rows[0][0], "First");
        assert_eq!(log.rows[1][0], "Second");

        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text.matches("Name,Email,Address").count(), 1);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_row_values_are_formatted() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("estimates.csv"));
        store.append(&client("Jane"), &deck_result(PricingPolicy::Markup)).unwrap();

        let log = store.read().unwrap();
        assert_eq!(
            log.rows[0],
            vec![
                "Jane",
                "client@example.com",
                "10 Light St, Baltimore MD 21202",
                "100.00",
                "2500.00",
                "325.00",
                "3390.00",
                "0.6"
            ]
        );
    }

    #[test]
    fn test_fixed_multiplier_log_has_down_payment_column() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("estimates.csv"));
        store.append(&client("Jane"), &deck_result(PricingPolicy::FixedMultiplier)).unwrap();

        let log = store.read().unwrap();
        assert_eq!(log.header[7], "down_payment");
        assert_eq!(log.rows[0][7], "2666.67");
    }

    #[test]
    fn test_mismatched_columns_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("estimates.csv"));
        store.append(&client("Jane"), &deck_result(PricingPolicy::Markup)).unwrap();

        let err = store
            .append(&client("John"), &deck_result(PricingPolicy::FixedMultiplier))
            .unwrap_err();
        assert_eq!(err.error_code(), "RECORD_SCHEMA_MISMATCH");

        // Nothing was added
        assert_eq!(store.read().unwrap().rows.len(), 1);
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("records").join("2026").join("log.csv"));
        store.append(&client("Jane"), &deck_result(PricingPolicy::Markup)).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_locked_log_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("estimates.csv");
        let holder = File::create(&path).unwrap();
        holder.lock_exclusive().unwrap();

        let store = RecordStore::new(&path);
        let err = store.append(&client("Jane"), &deck_result(PricingPolicy::Markup)).unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(err, EstimateError::FileLocked { path: path.display().to_string() });

        holder.unlock().unwrap();
        store.append(&client("Jane"), &deck_result(PricingPolicy::Markup)).unwrap();
    }

    #[test]
    fn test_read_missing_log() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("absent.csv"));
        assert_eq!(store.read().unwrap_err().error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_write_document_leaves_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.pdf");

        write_document(&path, b"%PDF-1.7 test").unwrap();

        assert!(!dir.path().join("quote.pdf.tmp").exists());
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.7 test");
    }

    #[test]
    fn test_write_document_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.pdf");
        fs::write(&path, b"old").unwrap();

        write_document(&path, b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
    }
}
