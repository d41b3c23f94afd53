//! Address list input.

use std::fs;
use std::path::Path;

use crate::batch::BatchError;

/// Split line-delimited text into addresses, preserving order.
///
/// Surrounding whitespace (including `\r`) is trimmed and blank lines dropped.
pub fn parse_addresses(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read an address list file.
pub fn load_addresses(path: &Path) -> Result<Vec<String>, BatchError> {
    let content = fs::read_to_string(path).map_err(|source| BatchError::ReadAddresses {
        path: path.to_path_buf(),
        source,
    })?;
    let addresses = parse_addresses(&content);
    tracing::debug!(path = %path.display(), count = addresses.len(), "Loaded address list");
    Ok(addresses)
}
