use scriptwatch_core::types::Origin;
use url::Url;

/// Classify a script reference relative to its hosting page.
///
/// Inline scripts (no URL) and any URL that fails to parse or resolve
/// degrade to `Unknown`; this never errors. The script URL is resolved
/// against the page URL first, so relative references classify by the
/// page's own host.
pub fn classify(page_url: &str, script_url: Option<&str>) -> Origin {
    let Some(script_url) = script_url else {
        return Origin::Unknown;
    };
    let Ok(page) = Url::parse(page_url) else {
        return Origin::Unknown;
    };
    let Ok(script) = page.join(script_url) else {
        return Origin::Unknown;
    };
    let page_host = page.host_str().unwrap_or("");
    let script_host = script.host_str().unwrap_or("");
    if page_host.eq_ignore_ascii_case(script_host) {
        Origin::FirstParty
    } else {
        Origin::ThirdParty
    }
}
