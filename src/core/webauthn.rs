//! WebAuthn credential marshalling.
//!
//! The server ships credential options as JSON with base64url-encoded
//! binary fields; the browser wants real byte buffers, and hands back
//! buffers that the server wants as base64url again. This module does
//! that translation and invokes `navigator.credentials` for the
//! create/get ceremonies. The ceremony itself (attestation, signatures,
//! user verification) is entirely the browser's and authenticator's job.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use js_sys::{Array, Function, Object, Promise, Reflect, Uint8Array};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::api::types::{AssertionPayload, AssertionResponse, AttestationResponse, RegistrationPayload};
use crate::core::error::AuthError;

// ============================================================================
// Base64url Codec
// ============================================================================

/// Encode bytes as unpadded base64url, the WebAuthn JSON convention.
pub fn encode_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode base64url, forgiving padded input and the standard alphabet.
///
/// Servers disagree on padding and some still emit `+`/`/`; both forms
/// are accepted.
pub fn decode_base64url(input: &str) -> Result<Vec<u8>, AuthError> {
    let normalized: String = input
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    URL_SAFE_NO_PAD
        .decode(normalized.as_bytes())
        .map_err(|err| AuthError::InvalidOptions(format!("bad base64url: {err}")))
}

// ============================================================================
// Ceremonies
// ============================================================================

/// Whether this browser exposes WebAuthn at all.
pub fn is_supported() -> bool {
    web_sys::window()
        .map(|w| Reflect::has(w.as_ref(), &JsValue::from_str("PublicKeyCredential")).unwrap_or(false))
        .unwrap_or(false)
}

/// Run the registration ceremony against server-issued creation options.
pub async fn create_credential(options: Value) -> Result<RegistrationPayload, AuthError> {
    let public_key = prepare_creation_options(&options)?;
    let credential = invoke_ceremony("create", public_key).await?;
    registration_payload(&credential)
}

/// Run the sign-in ceremony against server-issued request options.
pub async fn get_credential(options: Value) -> Result<AssertionPayload, AuthError> {
    let public_key = prepare_request_options(&options)?;
    let credential = invoke_ceremony("get", public_key).await?;
    assertion_payload(&credential)
}

/// Call `navigator.credentials.create` or `.get` with `{ publicKey }`.
async fn invoke_ceremony(method: &str, public_key: JsValue) -> Result<JsValue, AuthError> {
    let container = credentials_container()?;
    let method_fn: Function = Reflect::get(&container, &JsValue::from_str(method))
        .ok()
        .and_then(|f| f.dyn_into().ok())
        .ok_or(AuthError::NotSupported)?;

    let argument = Object::new();
    Reflect::set(&argument, &JsValue::from_str("publicKey"), &public_key)
        .map_err(|_| AuthError::InvalidOptions("cannot build ceremony argument".to_string()))?;

    let pending = method_fn.call1(&container, &argument).map_err(ceremony_error)?;
    JsFuture::from(Promise::from(pending)).await.map_err(ceremony_error)
}

fn credentials_container() -> Result<JsValue, AuthError> {
    let window = web_sys::window().ok_or(AuthError::NotSupported)?;
    let credentials = Reflect::get(window.navigator().as_ref(), &JsValue::from_str("credentials"))
        .map_err(|_| AuthError::NotSupported)?;
    if credentials.is_undefined() || credentials.is_null() {
        return Err(AuthError::NotSupported);
    }
    Ok(credentials)
}

/// `NotAllowedError` means the user closed the prompt; everything else
/// is a genuine ceremony failure.
fn ceremony_error(raw: JsValue) -> AuthError {
    let name = Reflect::get(&raw, &JsValue::from_str("name"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    if name == "NotAllowedError" {
        return AuthError::Cancelled;
    }
    let message = Reflect::get(&raw, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| "unknown authenticator failure".to_string());
    AuthError::Ceremony(message)
}

// ============================================================================
// Options Marshalling (server JSON -> browser buffers)
// ============================================================================

fn prepare_creation_options(options: &Value) -> Result<JsValue, AuthError> {
    let opts = options.get("publicKey").unwrap_or(options);
    let js = to_js(opts)?;

    set_buffer(&js, "challenge", &required_b64(opts, "challenge")?)?;

    let user_id = opts
        .pointer("/user/id")
        .and_then(Value::as_str)
        .ok_or_else(|| AuthError::InvalidOptions("missing user.id".to_string()))?;
    let user = Reflect::get(&js, &JsValue::from_str("user"))
        .map_err(|_| AuthError::InvalidOptions("missing user".to_string()))?;
    set_buffer(&user, "id", &decode_base64url(user_id)?)?;

    patch_id_list(opts, &js, "excludeCredentials")?;
    Ok(js)
}

fn prepare_request_options(options: &Value) -> Result<JsValue, AuthError> {
    let opts = options.get("publicKey").unwrap_or(options);
    let js = to_js(opts)?;
    set_buffer(&js, "challenge", &required_b64(opts, "challenge")?)?;
    patch_id_list(opts, &js, "allowCredentials")?;
    Ok(js)
}

/// Decode every `id` in a credential-descriptor list, when present.
fn patch_id_list(opts: &Value, js: &JsValue, key: &str) -> Result<(), AuthError> {
    let Some(entries) = opts.get(key).and_then(Value::as_array) else {
        return Ok(());
    };
    let list = Reflect::get(js, &JsValue::from_str(key))
        .map_err(|_| AuthError::InvalidOptions(format!("missing {key}")))?;
    let list = Array::from(&list);
    for (index, entry) in entries.iter().enumerate() {
        let id = entry
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| AuthError::InvalidOptions(format!("{key}[{index}] has no id")))?;
        set_buffer(&list.get(index as u32), "id", &decode_base64url(id)?)?;
    }
    Ok(())
}

fn required_b64(opts: &Value, key: &str) -> Result<Vec<u8>, AuthError> {
    let encoded = opts
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| AuthError::InvalidOptions(format!("missing {key}")))?;
    decode_base64url(encoded)
}

fn set_buffer(target: &JsValue, key: &str, bytes: &[u8]) -> Result<(), AuthError> {
    let buffer = Uint8Array::from(bytes);
    Reflect::set(target, &JsValue::from_str(key), buffer.as_ref())
        .map(|_| ())
        .map_err(|_| AuthError::InvalidOptions(format!("cannot set {key}")))
}

fn to_js(value: &Value) -> Result<JsValue, AuthError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| AuthError::InvalidOptions(err.to_string()))
}

// ============================================================================
// Credential Extraction (browser buffers -> server JSON)
// ============================================================================

fn registration_payload(credential: &JsValue) -> Result<RegistrationPayload, AuthError> {
    let response = object_prop(credential, "response")?;
    Ok(RegistrationPayload {
        id: string_prop(credential, "id")?,
        raw_id: encode_base64url(&buffer_prop(credential, "rawId")?),
        kind: "public-key".to_string(),
        response: AttestationResponse {
            attestation_object: encode_base64url(&buffer_prop(&response, "attestationObject")?),
            client_data_json: encode_base64url(&buffer_prop(&response, "clientDataJSON")?),
        },
    })
}

fn assertion_payload(credential: &JsValue) -> Result<AssertionPayload, AuthError> {
    let response = object_prop(credential, "response")?;
    Ok(AssertionPayload {
        id: string_prop(credential, "id")?,
        raw_id: encode_base64url(&buffer_prop(credential, "rawId")?),
        kind: "public-key".to_string(),
        response: AssertionResponse {
            authenticator_data: encode_base64url(&buffer_prop(&response, "authenticatorData")?),
            client_data_json: encode_base64url(&buffer_prop(&response, "clientDataJSON")?),
            signature: encode_base64url(&buffer_prop(&response, "signature")?),
            user_handle: optional_buffer_prop(&response, "userHandle").map(|b| encode_base64url(&b)),
        },
    })
}

fn object_prop(target: &JsValue, key: &str) -> Result<JsValue, AuthError> {
    let value = Reflect::get(target, &JsValue::from_str(key))
        .map_err(|_| AuthError::Ceremony(format!("credential has no {key}")))?;
    if value.is_undefined() || value.is_null() {
        return Err(AuthError::Ceremony(format!("credential has no {key}")));
    }
    Ok(value)
}

fn string_prop(target: &JsValue, key: &str) -> Result<String, AuthError> {
    object_prop(target, key)?
        .as_string()
        .ok_or_else(|| AuthError::Ceremony(format!("credential {key} is not a string")))
}

fn buffer_prop(target: &JsValue, key: &str) -> Result<Vec<u8>, AuthError> {
    Ok(Uint8Array::new(&object_prop(target, key)?).to_vec())
}

fn optional_buffer_prop(target: &JsValue, key: &str) -> Option<Vec<u8>> {
    let value = Reflect::get(target, &JsValue::from_str(key)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    Some(Uint8Array::new(&value).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64url_round_trip() {
        let bytes = vec![0u8, 1, 2, 250, 255];
        let encoded = encode_base64url(&bytes);
        assert_eq!(decode_base64url(&encoded).unwrap(), bytes);
    }

    #[test]
    fn test_encode_is_unpadded_urlsafe() {
        assert_eq!(encode_base64url(&[1, 2, 3, 4]), "AQIDBA");
        assert_eq!(encode_base64url(&[0xfb, 0xff, 0xbf]), "-_-_");
    }

    #[test]
    fn test_decode_accepts_padding() {
        assert_eq!(decode_base64url("AQIDBA==").unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(decode_base64url("AQIDBA").unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_decode_accepts_standard_alphabet() {
        assert_eq!(decode_base64url("+/+/").unwrap(), vec![0xfb, 0xff, 0xbf]);
        assert_eq!(decode_base64url("-_-_").unwrap(), vec![0xfb, 0xff, 0xbf]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_base64url("not base64!").is_err());
    }
}
