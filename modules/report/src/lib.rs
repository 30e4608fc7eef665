//! HTML rendering for scan snapshots and diffs. All untrusted string fields
//! (page URLs, script URLs, hashes, header values) pass through `escape_html`
//! before being embedded.

use script_diff::{DiffItem, INLINE_MARKER};
use scriptwatch_core::types::{ScanResult, ScriptRecord};
use std::fmt::Write;

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
    body { font-family: system-ui, -apple-system, "Segoe UI", sans-serif; margin: 20px; color: #222; }
    h1, h2 { margin-bottom: 0.2rem; }
    .meta { margin-bottom: 1.5rem; font-size: 0.95rem; color: #555; }
    table { border-collapse: collapse; width: 100%; font-size: 0.9rem; }
    th, td { border: 1px solid #ddd; padding: 6px 8px; vertical-align: top; }
    th { background: #f4f4f4; text-align: left; }
    tr:nth-child(even) { background: #fafafa; }
    code { font-family: "SF Mono", Menlo, Consolas, monospace; font-size: 0.8rem; word-break: break-all; }
"#;

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\" />\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

fn script_row(out: &mut String, page_url: &str, script: &ScriptRecord) {
    let script_url = script.script_url.as_deref().unwrap_or(INLINE_MARKER);
    let inline_hash = script.inline_hash.as_deref().unwrap_or("");
    let _ = write!(
        out,
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><code>{}</code></td></tr>\n",
        escape_html(page_url),
        escape_html(script_url),
        script.origin.as_str(),
        script.tag_position,
        escape_html(inline_hash),
    );
}

/// Render one scan as a standalone HTML snapshot report.
pub fn render_scan(scan: &ScanResult, title: &str) -> String {
    let mut rows = String::new();
    let mut total_scripts = 0usize;
    for page in &scan.pages {
        for script in &page.scripts {
            total_scripts += 1;
            script_row(&mut rows, &page.page_url, script);
        }
    }
    let body = format!(
        "<h1>{}</h1>\n<div class=\"meta\">\n<div><strong>Scanned at:</strong> {}</div>\n<div><strong>Pages scanned:</strong> {}</div>\n<div><strong>Total scripts:</strong> {}</div>\n</div>\n<h2>Scripts</h2>\n<table>\n<thead><tr><th>Page URL</th><th>Script URL / INLINE</th><th>Origin</th><th>Tag position</th><th>Inline hash (SHA-256)</th></tr></thead>\n<tbody>\n{}</tbody>\n</table>",
        escape_html(title),
        escape_html(&scan.scanned_at),
        scan.pages.len(),
        total_scripts,
        rows
    );
    document(title, &body)
}

fn record_summary(record: Option<&ScriptRecord>) -> String {
    match record {
        None => String::new(),
        Some(r) => {
            let url = r.script_url.as_deref().unwrap_or(INLINE_MARKER);
            let hash = r.inline_hash.as_deref().unwrap_or("");
            if hash.is_empty() {
                format!("{} ({})", escape_html(url), r.origin.as_str())
            } else {
                format!("{} ({}) <code>{}</code>", escape_html(url), r.origin.as_str(), escape_html(hash))
            }
        }
    }
}

/// Render a diff item sequence as a standalone HTML diff report.
pub fn render_diff(items: &[DiffItem], title: &str) -> String {
    let mut rows = String::new();
    for item in items {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td><code>{}</code></td><td>{}</td><td>{}</td></tr>\n",
            item.change_type.as_str(),
            escape_html(&item.page_url),
            escape_html(&item.script_id),
            record_summary(item.old_record.as_ref()),
            record_summary(item.new_record.as_ref()),
        );
    }
    let body = format!(
        "<h1>{}</h1>\n<div class=\"meta\"><div><strong>Changes:</strong> {}</div></div>\n<table>\n<thead><tr><th>Change</th><th>Page URL</th><th>Script key</th><th>Old</th><th>New</th></tr></thead>\n<tbody>\n{}</tbody>\n</table>",
        escape_html(title),
        items.len(),
        rows
    );
    document(title, &body)
}
