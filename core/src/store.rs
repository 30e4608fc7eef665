//! Load/save of the persisted scan artifact (pretty-printed JSON).

use crate::types::ScanResult;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read scan file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write scan file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed scan file {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a persisted scan. A document that does not match the schema is a
/// fatal `Malformed` error; no best-effort recovery is attempted.
pub fn load_scan(path: &Path) -> Result<ScanResult, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
        path: path.display().to_string(),
        source,
    })
}

pub fn save_scan(path: &Path, scan: &ScanResult) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(scan).map_err(|source| StoreError::Malformed {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(path, json).map_err(|source| StoreError::Write {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PageSnapshot, ScanResult};
    use std::path::PathBuf;

    fn tmp_path(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("scriptwatch-store-{}-{}", std::process::id(), name));
        p
    }

    #[test]
    fn save_then_load_round_trips() {
        let scan = ScanResult {
            scanned_at: "2026-08-01T00:00:00Z".to_string(),
            pages: vec![PageSnapshot {
                page_url: "https://pay.example.com/".to_string(),
                timestamp: "2026-08-01T00:00:01Z".to_string(),
                scripts: vec![],
                headers: vec![],
            }],
        };
        let path = tmp_path("roundtrip.json");
        save_scan(&path, &scan).unwrap();
        let back = load_scan(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(scan, back);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = load_scan(Path::new("/nonexistent/scan.json")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn garbage_is_malformed_error() {
        let path = tmp_path("garbage.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_scan(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }
}
