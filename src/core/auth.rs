//! Sign-in and sign-up flows.
//!
//! Two paths produce the same bearer session: proving control of a
//! wallet address by signing a server nonce, or a WebAuthn passkey
//! ceremony. Either way the token lands in the session store and the
//! caller mirrors the result into [`AuthState`].

use serde_json::json;

use crate::api;
use crate::api::types::{
    AuthResponse, LoginCompleteRequest, LoginStartRequest, RegisterCompleteRequest,
    RegisterStartRequest, VerifyRequest,
};
use crate::config;
use crate::core::error::AuthError;
use crate::core::provider::Eip1193;
use crate::core::session::{self, SessionStore};
use crate::core::webauthn;
use crate::models::AuthState;

/// Wallet-signature sign-in.
///
/// Fetches a one-time nonce for the address, has the wallet
/// `personal_sign` the message (hex-encoded, as the method requires),
/// and exchanges the signature for a session. A referral code captured
/// earlier rides along so first-time sign-ins credit the referrer.
pub async fn login_with_wallet(
    provider: &dyn Eip1193,
    store: &dyn SessionStore,
    account: &str,
) -> Result<AuthResponse, AuthError> {
    let nonce = api::fetch_nonce(account).await?;
    let message = config::sign_in_message(account, &nonce.nonce);
    let hex_message = format!("0x{}", hex::encode(message.as_bytes()));

    let signed = provider
        .request("personal_sign", Some(json!([hex_message, account])))
        .await?;
    let signature = signed
        .as_str()
        .ok_or_else(|| AuthError::Ceremony("signature response was not a string".to_string()))?
        .to_string();

    let request = VerifyRequest {
        address: account.to_string(),
        signature,
        referral_code: session::referral_code(store),
    };
    let response = api::verify_signature(&request).await?;
    persist(store, &response);
    Ok(response)
}

/// WebAuthn sign-up: start, ceremony, complete.
pub async fn register_with_passkey(
    store: &dyn SessionStore,
    username: &str,
) -> Result<AuthResponse, AuthError> {
    if !webauthn::is_supported() {
        return Err(AuthError::NotSupported);
    }
    let start = RegisterStartRequest {
        username: username.to_string(),
        referral_code: session::referral_code(store),
    };
    let options = api::webauthn_register_start(&start).await?;
    let credential = webauthn::create_credential(options).await?;
    let complete = RegisterCompleteRequest { username: username.to_string(), credential };
    let response = api::webauthn_register_complete(&complete).await?;
    persist(store, &response);
    Ok(response)
}

/// WebAuthn sign-in: start, ceremony, complete.
pub async fn login_with_passkey(
    store: &dyn SessionStore,
    username: &str,
) -> Result<AuthResponse, AuthError> {
    if !webauthn::is_supported() {
        return Err(AuthError::NotSupported);
    }
    let options = api::webauthn_login_start(&LoginStartRequest {
        username: username.to_string(),
    })
    .await?;
    let credential = webauthn::get_credential(options).await?;
    let complete = LoginCompleteRequest { username: username.to_string(), credential };
    let response = api::webauthn_login_complete(&complete).await?;
    persist(store, &response);
    Ok(response)
}

/// Drop the API session. Local only, like the wallet disconnect.
pub fn sign_out(store: &dyn SessionStore) {
    session::clear_auth(store);
}

/// Rebuild the UI auth mirror from whatever the store holds.
pub fn load_auth_state(store: &dyn SessionStore) -> AuthState {
    match session::auth_token(store) {
        Some(_) => AuthState::signed_in(session::auth_username(store)),
        None => AuthState::default(),
    }
}

fn persist(store: &dyn SessionStore, response: &AuthResponse) {
    session::store_auth(store, &response.token, &response.user.display_name());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock::MemoryStore;

    #[test]
    fn test_load_auth_state_round_trip() {
        let store = MemoryStore::default();
        assert_eq!(load_auth_state(&store), AuthState::default());

        session::store_auth(&store, "tok", "rin");
        let state = load_auth_state(&store);
        assert!(state.signed_in);
        assert_eq!(state.username.as_deref(), Some("rin"));

        sign_out(&store);
        assert_eq!(load_auth_state(&store), AuthState::default());
    }
}
