//! Shared data model and persisted-artifact handling for scriptwatch.

pub mod store;
pub mod types;

pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Canonical absent-to-empty normalization for optional string fields.
///
/// The differ compares `scriptUrl` and `inlineHash` with absent and empty
/// string treated as equivalent; this is the single place that rule lives.
pub fn or_empty(v: Option<&str>) -> &str {
    v.unwrap_or("")
}
