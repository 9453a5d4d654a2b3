//! Query-string parsing and outbound link builders.

use crate::config;
use crate::utils::dom;

/// Extract a query parameter from a raw search string.
///
/// `search` may include the leading `?`. Values are returned verbatim;
/// percent-decoding happens in [`current_query_param`] where the JS
/// runtime is available.
pub fn query_param(search: &str, name: &str) -> Option<String> {
    let trimmed = search.trim_start_matches('?');
    for pair in trimmed.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == name && !value.is_empty() {
            return Some(value.to_string());
        }
    }
    None
}

/// Read a query parameter from the current page URL, percent-decoded.
pub fn current_query_param(name: &str) -> Option<String> {
    let search = dom::current_search()?;
    let raw = query_param(&search, name)?;
    match js_sys::decode_uri_component(&raw) {
        Ok(decoded) => Some(String::from(decoded)),
        Err(_) => Some(raw),
    }
}

/// Explorer page for a transaction hash on the target chain.
pub fn explorer_tx_url(hash: &str) -> String {
    format!("{}/tx/{hash}", config::TARGET_CHAIN.explorer_url)
}

/// Explorer page for an address on the target chain.
pub fn explorer_address_url(address: &str) -> String {
    format!("{}/address/{address}", config::TARGET_CHAIN.explorer_url)
}

/// Shareable referral link for the current deployment.
pub fn referral_link(code: &str) -> String {
    let origin = dom::origin().unwrap_or_default();
    format!("{origin}/?ref={code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param_found() {
        assert_eq!(query_param("?ref=abc123", "ref").as_deref(), Some("abc123"));
        assert_eq!(query_param("a=1&ref=xyz&b=2", "ref").as_deref(), Some("xyz"));
    }

    #[test]
    fn test_query_param_missing_or_empty() {
        assert_eq!(query_param("?a=1&b=2", "ref"), None);
        assert_eq!(query_param("?ref=", "ref"), None);
        assert_eq!(query_param("", "ref"), None);
    }

    #[test]
    fn test_explorer_urls() {
        assert_eq!(explorer_tx_url("0xdead"), "https://bscscan.com/tx/0xdead");
        assert_eq!(explorer_address_url("0xbeef"), "https://bscscan.com/address/0xbeef");
    }
}
