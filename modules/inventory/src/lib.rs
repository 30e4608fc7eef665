//! Acquisition boundary: turns raw per-page script observations into the
//! enriched, immutable snapshot model the rest of the system consumes.
//!
//! The acquisition collaborator (browser driving, network-idle waits,
//! dynamic-injection observation) lives outside this workspace; its whole
//! contract is to hand over `RawScript`s in document order plus captured
//! headers. Everything here is synchronous and infallible: by the time a
//! `PageSnapshot` leaves this module, every inline record carries its hash
//! and every record its origin.

use scriptwatch_core::types::{HeaderRecord, PageSnapshot, ScanResult, ScriptRecord};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// One `<script>` tag as observed by the acquisition collaborator, before
/// enrichment. `src` absent means an inline script; `body` is its text
/// content when the collaborator captured one.
#[derive(Debug, Clone, Default)]
pub struct RawScript {
    pub src: Option<String>,
    pub body: Option<String>,
}

pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::new())
}

/// Enrich one page's observations. Tag positions are assigned in document
/// order starting at 0; an inline script with no captured body hashes the
/// empty string.
pub fn build_page(
    page_url: &str,
    timestamp: String,
    raw: Vec<RawScript>,
    headers: Vec<HeaderRecord>,
) -> PageSnapshot {
    let scripts = raw
        .into_iter()
        .enumerate()
        .map(|(position, tag)| {
            let is_inline = tag.src.is_none();
            let inline_hash = if is_inline {
                Some(fingerprint::sha256_hex(tag.body.as_deref().unwrap_or("")))
            } else {
                None
            };
            let origin = origin::classify(page_url, tag.src.as_deref());
            ScriptRecord {
                page_url: page_url.to_string(),
                script_id: format!("{}#{}", page_url, position),
                script_url: tag.src,
                is_inline,
                inline_hash,
                origin,
                tag_position: position,
            }
        })
        .collect();
    PageSnapshot {
        page_url: page_url.to_string(),
        timestamp,
        scripts,
        headers,
    }
}

pub fn build_scan(scanned_at: String, pages: Vec<PageSnapshot>) -> ScanResult {
    ScanResult { scanned_at, pages }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptwatch_core::types::Origin;

    #[test]
    fn positions_follow_document_order() {
        let page = build_page(
            "https://pay.example.com/checkout",
            "2026-08-01T00:00:00Z".to_string(),
            vec![
                RawScript { src: Some("/app.js".to_string()), body: None },
                RawScript { src: None, body: Some("console.log(1)".to_string()) },
                RawScript { src: Some("https://cdn.other.com/a.js".to_string()), body: None },
            ],
            vec![],
        );
        let positions: Vec<usize> = page.scripts.iter().map(|s| s.tag_position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(page.scripts[0].script_id, "https://pay.example.com/checkout#0");
    }

    #[test]
    fn inline_invariant_holds() {
        let page = build_page(
            "https://pay.example.com/checkout",
            "2026-08-01T00:00:00Z".to_string(),
            vec![
                RawScript { src: Some("/app.js".to_string()), body: None },
                RawScript { src: None, body: Some("console.log(1)".to_string()) },
                RawScript { src: None, body: None },
            ],
            vec![],
        );
        for s in &page.scripts {
            assert_eq!(s.is_inline, s.script_url.is_none());
            assert_eq!(s.is_inline, s.inline_hash.is_some());
        }
        // Inline with no captured body hashes the empty string.
        assert_eq!(
            page.scripts[2].inline_hash.as_deref(),
            Some("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
    }

    #[test]
    fn origins_are_resolved_per_record() {
        let page = build_page(
            "https://pay.example.com/checkout",
            "2026-08-01T00:00:00Z".to_string(),
            vec![
                RawScript { src: Some("/app.js".to_string()), body: None },
                RawScript { src: Some("https://cdn.other.com/a.js".to_string()), body: None },
                RawScript { src: None, body: Some("x".to_string()) },
            ],
            vec![],
        );
        let origins: Vec<Origin> = page.scripts.iter().map(|s| s.origin).collect();
        assert_eq!(origins, vec![Origin::FirstParty, Origin::ThirdParty, Origin::Unknown]);
    }

    #[test]
    fn partial_scan_is_valid() {
        let scan = build_scan("2026-08-01T00:00:00Z".to_string(), vec![]);
        assert!(scan.pages.is_empty());
    }

    #[test]
    fn now_is_rfc3339_shaped() {
        let ts = now_rfc3339();
        assert!(ts.contains('T'));
        assert!(ts.ends_with('Z') || ts.contains('+'));
    }
}
