// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON snapshot persistence.
//!
//! The descriptor grammar mandates only that its five variants and their
//! fields survive serialization; this module provides the JSON rendition
//! used for files and text transports. Any other serde format works the
//! same way.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::descriptor::model::TypeDescriptor;

// ---------------------------------------------------------------------------
// SnapshotError
// ---------------------------------------------------------------------------

/// Snapshot persistence failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Filesystem failure.
    Io(String),
    /// The content is not a valid snapshot.
    Malformed(String),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io(msg) => write!(f, "I/O error: {}", msg),
            SnapshotError::Malformed(msg) => write!(f, "malformed snapshot: {}", msg),
        }
    }
}

impl std::error::Error for SnapshotError {}

// ---------------------------------------------------------------------------
// JSON form
// ---------------------------------------------------------------------------

/// Render a snapshot as pretty-printed JSON.
pub fn to_json(descriptor: &TypeDescriptor) -> Result<String, SnapshotError> {
    serde_json::to_string_pretty(descriptor).map_err(|e| SnapshotError::Malformed(e.to_string()))
}

/// Parse a snapshot from JSON text.
pub fn from_json(json: &str) -> Result<TypeDescriptor, SnapshotError> {
    serde_json::from_str(json).map_err(|e| SnapshotError::Malformed(e.to_string()))
}

/// Write a snapshot to a JSON file. Existing content is overwritten.
pub fn save_snapshot(path: &Path, descriptor: &TypeDescriptor) -> Result<(), SnapshotError> {
    let json = to_json(descriptor)?;
    fs::write(path, json)
        .map_err(|e| SnapshotError::Io(format!("failed to write {}: {}", path.display(), e)))
}

/// Read a snapshot back from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<TypeDescriptor, SnapshotError> {
    let json = fs::read_to_string(path)
        .map_err(|e| SnapshotError::Io(format!("failed to read {}: {}", path.display(), e)))?;
    from_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::model::GenericDescriptor;

    fn sample() -> TypeDescriptor {
        TypeDescriptor::Generic(GenericDescriptor::new(
            "demo::List",
            vec![TypeDescriptor::named("demo::String")],
        ))
    }

    #[test]
    fn test_json_round_trip() {
        let snapshot = sample();
        let json = to_json(&snapshot).expect("to_json");
        assert!(json.contains("\"kind\""));
        assert_eq!(from_json(&json).expect("from_json"), snapshot);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = from_json("{\"kind\": \"Starship\"}").unwrap_err();
        assert!(matches!(err, SnapshotError::Malformed(_)));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("list_of_string.json");

        let snapshot = sample();
        save_snapshot(&path, &snapshot).expect("save");
        assert_eq!(load_snapshot(&path).expect("load"), snapshot);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_snapshot(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
    }
}
