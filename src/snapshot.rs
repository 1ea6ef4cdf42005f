//! Ownership snapshot serialization and comparison.
//!
//! A snapshot is one JSON array of ownership records, the only wire format
//! the core produces and accepts. Round-tripping a snapshot reproduces an
//! equal record set under the comparison key.

use crate::error::{Error, Result};
use crate::types::{TestInfo, TestOwnership};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Load a snapshot from a file. Unreadable files and malformed JSON are
/// fatal input errors.
pub fn load(path: &Path) -> Result<Vec<TestOwnership>> {
    let raw = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| Error::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a snapshot as pretty-printed JSON.
pub fn save(path: &Path, records: &[TestOwnership]) -> Result<()> {
    let mut raw = serde_json::to_string_pretty(records)?;
    raw.push('\n');
    fs::write(path, raw).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the materialized test list the acquisition layer produced: one JSON
/// array of test records.
pub fn load_tests(path: &Path) -> Result<Vec<TestInfo>> {
    let raw = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| Error::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// The fields that participate in snapshot equality: volatile bookkeeping
/// (`created_at`, schema tags) is excluded, capability order is normalized.
#[must_use]
pub fn comparison_key(record: &TestOwnership) -> (String, String, String, String, Vec<String>) {
    let mut capabilities = record.capabilities.clone();
    capabilities.sort();
    (
        record.name.clone(),
        record.suite.clone(),
        record.component.clone(),
        record.jira_component.clone(),
        capabilities,
    )
}

/// Order-insensitive snapshot equality under [`comparison_key`].
#[must_use]
pub fn sets_equal(a: &[TestOwnership], b: &[TestOwnership]) -> bool {
    let mut left: Vec<_> = a.iter().map(comparison_key).collect();
    let mut right: Vec<_> = b.iter().map(comparison_key).collect();
    left.sort();
    right.sort();
    left == right
}

/// Stable content hash of a snapshot.
///
/// Records pass through `serde_json::Value`, whose object representation
/// sorts keys, and the volatile `created_at` field is stripped from every
/// record, so the hash only changes when meaningful ownership content
/// changes. Useful for cheap "did the mapping move" checks between runs.
pub fn normalized_hash(records: &[TestOwnership]) -> Result<String> {
    let mut value = serde_json::to_value(records)?;
    if let Some(items) = value.as_array_mut() {
        for item in items.iter_mut() {
            if let Some(record) = item.as_object_mut() {
                record.remove("created_at");
            }
        }
    }
    let bytes = serde_json::to_vec(&value)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}
