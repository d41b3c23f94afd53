//! Result persistence.
//!
//! The result set is one pretty-printed JSON array of `{address, totalValue}`
//! objects. Writes go to a temporary file next to the destination which is
//! then renamed over it, so readers never observe a partial document.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::batch::BatchError;

/// Total value held by one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressQueryRecord {
    pub address: String,
    /// Value as returned by the service (decimal string, USD).
    pub total_value: String,
}

/// Atomically replace `path` with the serialized records.
pub fn write_results(path: &Path, records: &[AddressQueryRecord]) -> Result<(), BatchError> {
    let json = serde_json::to_string_pretty(records)?;

    let write_err = |source: std::io::Error| BatchError::WriteResults {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(json.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::info!(path = %path.display(), count = records.len(), "Saved query results");
    Ok(())
}

/// Read a result set written by [`write_results`].
pub fn read_results(path: &Path) -> Result<Vec<AddressQueryRecord>, BatchError> {
    let content = fs::read_to_string(path).map_err(|source| BatchError::ReadResults {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(address: &str, value: &str) -> AddressQueryRecord {
        AddressQueryRecord {
            address: address.to_string(),
            total_value: value.to_string(),
        }
    }

    #[test]
    fn test_write_then_read_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let records = vec![record("0xa", "12.5"), record("0xc", "0")];

        write_results(&path, &records).unwrap();
        assert_eq!(read_results(&path).unwrap(), records);
    }

    #[test]
    fn test_wire_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        write_results(&path, &[record("0xa", "1.0")]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "[\n  {\n    \"address\": \"0xa\",\n    \"totalValue\": \"1.0\"\n  }\n]"
        );
    }

    #[test]
    fn test_overwrites_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        write_results(&path, &[record("0xa", "1"), record("0xb", "2")]).unwrap();
        write_results(&path, &[]).unwrap();

        assert!(read_results(&path).unwrap().is_empty());
        // Only the destination remains; no temp files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let err = write_results(Path::new("/nonexistent/dir/results.json"), &[]).unwrap_err();
        assert!(matches!(err, BatchError::WriteResults { .. }));
    }
}
