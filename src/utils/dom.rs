//! DOM and Web API utility functions.
//!
//! Thin, failure-tolerant access to browser globals. Everything returns
//! `Option` or silently no-ops when the environment lacks the API, so
//! callers never branch on raw `JsValue` errors.

use web_sys::{Storage, Window};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get localStorage.
#[inline]
pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Origin of the current page, e.g. `https://wallet.example`.
pub fn origin() -> Option<String> {
    window()?.location().origin().ok()
}

/// Raw query string of the current page, including the leading `?`.
pub fn current_search() -> Option<String> {
    window()?.location().search().ok()
}

/// Write text to the system clipboard.
///
/// Fire-and-forget; the returned promise resolves on its own and a denied
/// permission is not worth surfacing.
pub fn copy_to_clipboard(text: &str) {
    if let Some(window) = window() {
        let _ = window.navigator().clipboard().write_text(text);
    }
}

// =============================================================================
// Browser Navigation
// =============================================================================

/// Get the current URL hash (without the '#' prefix).
pub fn get_hash() -> String {
    window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
        .trim_start_matches('#')
        .to_string()
}

/// Set the URL hash (adds to browser history).
///
/// The hash should include the '#' prefix.
pub fn set_hash(hash: &str) {
    if let Some(window) = window() {
        let _ = window.location().set_hash(hash);
    }
}
