//! Injected EIP-1193 provider access.
//!
//! Wraps the `window.ethereum` object behind a small trait so wallet
//! flows never touch `JsValue` directly and native tests can substitute
//! a scripted provider. All raw provider failures funnel through
//! [`classify`](crate::core::error::classify) exactly once, here.

use std::cell::OnceCell;

use async_trait::async_trait;
use js_sys::{Array, Function, Object, Promise, Reflect};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::core::error::{WalletError, classify};

/// Request surface of an EIP-1193 provider.
///
/// Results are decoded to JSON before they leave this boundary.
#[async_trait(?Send)]
pub trait Eip1193 {
    /// Provider self-reports as a known wallet implementation.
    fn is_recognized(&self) -> bool;

    /// Issue a request such as `eth_requestAccounts` or
    /// `wallet_switchEthereumChain` and await its JSON result.
    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, WalletError>;
}

// ============================================================================
// Provider Accessor
// ============================================================================

thread_local! {
    static PROVIDER: OnceCell<Option<JsProvider>> = const { OnceCell::new() };
}

/// The injected provider, detected once per session.
///
/// Detection runs on first call; every later call returns the same
/// handle (or the same `None`). Absence means "no wallet extension" and
/// is an expected outcome, not an error. The handle lives as long as the
/// page does.
pub fn get_provider() -> Option<JsProvider> {
    PROVIDER.with(|cell| cell.get_or_init(JsProvider::detect).clone())
}

// ============================================================================
// Browser Provider
// ============================================================================

/// Handle around the injected `window.ethereum` object.
#[derive(Clone)]
pub struct JsProvider {
    ethereum: Object,
}

impl JsProvider {
    /// Look for an injected provider on the window object.
    fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }
        Some(Self { ethereum: ethereum.dyn_into().ok()? })
    }

    /// Named function property of the provider object.
    fn provider_fn(&self, name: &str) -> Result<Function, WalletError> {
        Reflect::get(self.ethereum.as_ref(), &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.dyn_into().ok())
            .ok_or_else(|| WalletError::Unknown(format!("provider has no {name} method")))
    }

    /// Register a raw listener; the returned token owns the closure.
    fn on(
        &self,
        event: &'static str,
        callback: impl FnMut(JsValue) + 'static,
    ) -> Result<EventSubscription, WalletError> {
        let on_fn = self.provider_fn("on")?;
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(JsValue)>);
        on_fn
            .call2(self.ethereum.as_ref(), &JsValue::from_str(event), closure.as_ref())
            .map_err(|raw| provider_error(&raw))?;
        Ok(EventSubscription { target: self.ethereum.clone(), event, closure })
    }

    /// Subscribe to `accountsChanged`; the payload array is decoded to
    /// plain strings before the callback runs.
    pub fn on_accounts_changed(
        &self,
        mut callback: impl FnMut(Vec<String>) + 'static,
    ) -> Result<EventSubscription, WalletError> {
        self.on("accountsChanged", move |payload| callback(js_string_array(&payload)))
    }

    /// Subscribe to `chainChanged`; payload is the new hex chain id.
    pub fn on_chain_changed(
        &self,
        mut callback: impl FnMut(String) + 'static,
    ) -> Result<EventSubscription, WalletError> {
        self.on("chainChanged", move |payload| {
            if let Some(chain) = payload.as_string() {
                callback(chain);
            }
        })
    }
}

#[async_trait(?Send)]
impl Eip1193 for JsProvider {
    fn is_recognized(&self) -> bool {
        Reflect::get(self.ethereum.as_ref(), &JsValue::from_str("isMetaMask"))
            .ok()
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, WalletError> {
        let request_fn = self.provider_fn("request")?;
        let payload = request_payload(method, params)?;
        let pending = request_fn
            .call1(self.ethereum.as_ref(), &payload)
            .map_err(|raw| provider_error(&raw))?;
        let settled = JsFuture::from(Promise::from(pending))
            .await
            .map_err(|raw| provider_error(&raw))?;
        decode_result(settled)
    }
}

// ============================================================================
// Event Subscription Token
// ============================================================================

/// Keeps a provider event listener alive.
///
/// Holding the token keeps the closure registered; [`unsubscribe`] must
/// run at component teardown or the listener would outlive its signals.
///
/// [`unsubscribe`]: EventSubscription::unsubscribe
pub struct EventSubscription {
    target: Object,
    event: &'static str,
    closure: Closure<dyn FnMut(JsValue)>,
}

impl EventSubscription {
    /// Deregister the listener and drop the closure.
    pub fn unsubscribe(self) {
        if let Ok(off) = Reflect::get(self.target.as_ref(), &JsValue::from_str("removeListener"))
            && let Ok(off_fn) = off.dyn_into::<Function>()
        {
            let _ = off_fn.call2(
                self.target.as_ref(),
                &JsValue::from_str(self.event),
                self.closure.as_ref(),
            );
        }
    }
}

// ============================================================================
// Encoding Helpers
// ============================================================================

/// Build the `{ method, params }` request object.
///
/// `params` is omitted entirely when absent; some providers reject an
/// explicit null. Serialization goes through the JSON-compatible
/// serializer so maps become plain objects rather than ES `Map`s.
fn request_payload(method: &str, params: Option<Value>) -> Result<JsValue, WalletError> {
    let mut payload = serde_json::Map::new();
    payload.insert("method".to_string(), Value::String(method.to_string()));
    if let Some(params) = params {
        payload.insert("params".to_string(), params);
    }
    Value::Object(payload)
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| WalletError::Unknown(format!("request encoding failed: {err}")))
}

/// Decode a settled provider result into JSON.
fn decode_result(value: JsValue) -> Result<Value, WalletError> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|err| WalletError::Unknown(format!("response decoding failed: {err}")))
}

/// Classify a thrown provider error by its `code`/`message` fields.
fn provider_error(raw: &JsValue) -> WalletError {
    let code = Reflect::get(raw, &JsValue::from_str("code"))
        .ok()
        .and_then(|value| value.as_f64())
        .map(|code| code as i64);
    let message = Reflect::get(raw, &JsValue::from_str("message"))
        .ok()
        .and_then(|value| value.as_string())
        .or_else(|| raw.as_string());
    classify(code, message.as_deref())
}

/// Strings of a JS array payload, skipping non-string entries.
fn js_string_array(value: &JsValue) -> Vec<String> {
    Array::from(value).iter().filter_map(|item| item.as_string()).collect()
}

/// String items of a JSON array result such as `eth_accounts`.
pub fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(|item| item.as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_list_decodes_accounts() {
        let value = json!(["0xAbC", "0xDeF"]);
        assert_eq!(string_list(&value), vec!["0xAbC", "0xDeF"]);
    }

    #[test]
    fn test_string_list_tolerates_other_shapes() {
        assert!(string_list(&json!(null)).is_empty());
        assert!(string_list(&json!({"not": "an array"})).is_empty());
        assert_eq!(string_list(&json!(["0xabc", 7])), vec!["0xabc"]);
    }
}
