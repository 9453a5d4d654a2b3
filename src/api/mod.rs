//! REST backend endpoints.
//!
//! One async function per endpoint, typed with the wire shapes in
//! [`types`]. The backend owns the wire format; everything here is a
//! consumer.

mod client;
pub mod types;

use serde_json::Value;

use crate::config;
use crate::core::error::ApiError;
use types::{
    AuthResponse, HistoryPage, LoginCompleteRequest, LoginStartRequest, NonceResponse,
    QuoteRequest, QuoteResponse, RegisterCompleteRequest, RegisterStartRequest, RewardEntry,
    RewardSummary, TransferRequest, TransferResponse, UserProfile, VerifyRequest,
};

/// One-time nonce for a wallet-signature sign-in.
pub async fn fetch_nonce(address: &str) -> Result<NonceResponse, ApiError> {
    client::get_json(&format!("/auth/nonce?address={address}")).await
}

/// Exchange a signed nonce for a session.
pub async fn verify_signature(request: &VerifyRequest) -> Result<AuthResponse, ApiError> {
    client::post_json("/auth/verify", request).await
}

/// Begin WebAuthn registration; returns opaque creation options.
pub async fn webauthn_register_start(request: &RegisterStartRequest) -> Result<Value, ApiError> {
    client::post_json("/auth/webauthn/register/start", request).await
}

/// Finish WebAuthn registration with the attestation payload.
pub async fn webauthn_register_complete(
    request: &RegisterCompleteRequest,
) -> Result<AuthResponse, ApiError> {
    client::post_json("/auth/webauthn/register/complete", request).await
}

/// Begin WebAuthn sign-in; returns opaque request options.
pub async fn webauthn_login_start(request: &LoginStartRequest) -> Result<Value, ApiError> {
    client::post_json("/auth/webauthn/login/start", request).await
}

/// Finish WebAuthn sign-in with the assertion payload.
pub async fn webauthn_login_complete(
    request: &LoginCompleteRequest,
) -> Result<AuthResponse, ApiError> {
    client::post_json("/auth/webauthn/login/complete", request).await
}

/// Profile of the signed-in user.
pub async fn fetch_profile() -> Result<UserProfile, ApiError> {
    client::get_json("/users/me").await
}

/// Reward and referral totals for the signed-in user.
pub async fn fetch_reward_summary() -> Result<RewardSummary, ApiError> {
    client::get_json("/rewards/summary").await
}

/// Individual reward entries, newest first.
pub async fn fetch_rewards() -> Result<Vec<RewardEntry>, ApiError> {
    client::get_json("/rewards").await
}

/// One page of transaction history.
pub async fn fetch_history(page: u32) -> Result<HistoryPage, ApiError> {
    client::get_json(&format!(
        "/transactions?page={page}&limit={}",
        config::HISTORY_PAGE_SIZE
    ))
    .await
}

/// Submit a coin transfer.
pub async fn submit_transfer(request: &TransferRequest) -> Result<TransferResponse, ApiError> {
    client::post_json("/transfers", request).await
}

/// Price a conversion between two symbols.
pub async fn fetch_quote(request: &QuoteRequest) -> Result<QuoteResponse, ApiError> {
    client::post_json("/convert/quote", request).await
}
