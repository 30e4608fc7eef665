//! Snapshot indexing and change detection.
//!
//! Two persisted scans are each flattened into an insertion-ordered index
//! keyed by `pageUrl || scriptUrl-or-INLINE || tagPosition`, then compared
//! key-by-key. Unchanged scripts are never reported. Both passes iterate in
//! index insertion order (document order within a page, page order within a
//! scan), so output is deterministic for identical inputs.

use scriptwatch_core::or_empty;
use scriptwatch_core::types::{ScanResult, ScriptRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const KEY_SEPARATOR: &str = "||";
pub const INLINE_MARKER: &str = "INLINE";

/// Composite key for one script slot within a snapshot.
///
/// Known limitation, kept deliberately: `tag_position` participates in the
/// key, so a script that is unchanged but shifts position between scans
/// (because an earlier tag was inserted or removed) is reported as one
/// `removed` plus one `new`, never as unchanged or `changed`.
pub fn script_key(page_url: &str, script: &ScriptRecord) -> String {
    let url = match script.script_url.as_deref() {
        Some(u) if !u.is_empty() => u,
        _ => INLINE_MARKER,
    };
    format!("{}{}{}{}{}", page_url, KEY_SEPARATOR, url, KEY_SEPARATOR, script.tag_position)
}

/// Map from composite key to script record, preserving insertion order.
///
/// On a duplicate key (degenerate acquisition output: two records for the
/// same page/url/position) the later record wins and the key keeps its
/// original position, matching ordered-map set semantics.
#[derive(Debug, Default)]
pub struct ScriptIndex {
    keys: Vec<String>,
    map: HashMap<String, ScriptRecord>,
}

impl ScriptIndex {
    pub fn insert(&mut self, key: String, record: ScriptRecord) {
        if self.map.insert(key.clone(), record).is_none() {
            self.keys.push(key);
        }
    }

    pub fn get(&self, key: &str) -> Option<&ScriptRecord> {
        self.map.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScriptRecord)> {
        self.keys.iter().filter_map(|k| self.map.get(k).map(|r| (k.as_str(), r)))
    }
}

/// Flatten every script record in a scan into one keyed index.
pub fn index(scan: &ScanResult) -> ScriptIndex {
    let mut idx = ScriptIndex::default();
    for page in &scan.pages {
        for script in &page.scripts {
            idx.insert(script_key(&page.page_url, script), script.clone());
        }
    }
    idx
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    New,
    Removed,
    Changed,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::New => "new",
            ChangeType::Removed => "removed",
            ChangeType::Changed => "changed",
        }
    }
}

/// One reported change between two snapshots. `script_id` is the composite
/// key; `old_record`/`new_record` are populated according to the change type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffItem {
    pub page_url: String,
    pub script_id: String,
    pub change_type: ChangeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_record: Option<ScriptRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_record: Option<ScriptRecord>,
}

/// Field-level comparison for records sharing a key. `tag_position` is never
/// compared here: equal keys imply equal positions, and position shifts
/// surface as a key mismatch instead. Absent and empty string are equivalent.
fn records_differ(old: &ScriptRecord, new: &ScriptRecord) -> bool {
    or_empty(new.script_url.as_deref()) != or_empty(old.script_url.as_deref())
        || or_empty(new.inline_hash.as_deref()) != or_empty(old.inline_hash.as_deref())
        || new.origin != old.origin
}

fn page_of(key: &str) -> String {
    key.split(KEY_SEPARATOR).next().unwrap_or("").to_string()
}

/// Compare two scans. Neither input is mutated; well-formed input cannot
/// fail. Output order: `new`/`changed` items in new-index order, then
/// `removed` items in old-index order.
pub fn diff(old: &ScanResult, new: &ScanResult) -> Vec<DiffItem> {
    let old_index = index(old);
    let new_index = index(new);
    let mut items = Vec::new();

    for (key, new_script) in new_index.iter() {
        match old_index.get(key) {
            None => items.push(DiffItem {
                page_url: page_of(key),
                script_id: key.to_string(),
                change_type: ChangeType::New,
                old_record: None,
                new_record: Some(new_script.clone()),
            }),
            Some(old_script) => {
                if records_differ(old_script, new_script) {
                    items.push(DiffItem {
                        page_url: page_of(key),
                        script_id: key.to_string(),
                        change_type: ChangeType::Changed,
                        old_record: Some(old_script.clone()),
                        new_record: Some(new_script.clone()),
                    });
                }
            }
        }
    }

    for (key, old_script) in old_index.iter() {
        if !new_index.contains_key(key) {
            items.push(DiffItem {
                page_url: page_of(key),
                script_id: key.to_string(),
                change_type: ChangeType::Removed,
                old_record: Some(old_script.clone()),
                new_record: None,
            });
        }
    }

    items
}
