//! Browser-side smoke tests, run with `wasm-pack test --headless`.
#![cfg(target_arch = "wasm32")]

use kestrel_wallet::core::session::{LocalStore, SessionStore};
use kestrel_wallet::models::Route;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn route_defaults_to_dashboard_without_hash() {
    assert_eq!(Route::current(), Route::Dashboard);
}

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    LocalStore.set("smoke_key", "1");
    assert_eq!(LocalStore.get("smoke_key").as_deref(), Some("1"));
    LocalStore.remove("smoke_key");
    assert_eq!(LocalStore.get("smoke_key"), None);
}
