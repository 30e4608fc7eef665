use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a script reference points relative to its hosting page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    FirstParty,
    ThirdParty,
    Unknown,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::FirstParty => "first-party",
            Origin::ThirdParty => "third-party",
            Origin::Unknown => "unknown",
        }
    }
}

/// One observed `<script>` element on one page at scan time.
///
/// Invariant: `is_inline` is true iff `script_url` is absent iff
/// `inline_hash` is present. `tag_position` is unique within a page for a
/// given scan but is not a stable identity across scans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRecord {
    pub page_url: String,
    pub script_id: String,
    pub script_url: Option<String>,
    pub is_inline: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_hash: Option<String>,
    pub origin: Origin,
    pub tag_position: usize,
}

/// Response headers captured for the main document or one script request.
/// Header names are lowercase; multi-valued headers are comma-joined.
/// Carried through for reporting only, never consulted by the differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderRecord {
    pub page_url: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
}

/// One page's observation within a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub page_url: String,
    pub timestamp: String,
    pub scripts: Vec<ScriptRecord>,
    pub headers: Vec<HeaderRecord>,
}

/// A complete scan run: one `PageSnapshot` per page attempted. Produced
/// atomically by one run and immutable thereafter; a partial result (fewer
/// pages than requested) is valid, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub scanned_at: String,
    pub pages: Vec<PageSnapshot>,
}
