//! Wallet connection flows.
//!
//! Async orchestration of the connection state machine over the provider
//! and session-store seams. Every flow computes a complete replacement
//! [`ConnectionState`]; callers write it into their signal wholesale, so
//! a flow that resumes late can never leave a half-applied update.
//!
//! # Known race
//!
//! An in-flight `connect` and a provider event re-check may run
//! concurrently; both end in a full state write and the one that
//! completes last wins. The `connecting` guard only blocks re-entrant
//! connect calls, it does not serialize event handlers against a pending
//! connect. That ordering is inherited behavior and deliberately left
//! as-is.

use serde_json::json;

use crate::config::TARGET_CHAIN;
use crate::core::error::WalletError;
use crate::core::network;
use crate::core::provider::{Eip1193, string_list};
use crate::core::session::{self, SessionStore};
use crate::models::{ConnectionState, normalize_account, normalize_chain_id};
use crate::utils::format;

/// State reported when no provider is injected at all.
///
/// Detection happens synchronously before any flow runs; the caller
/// stores this and does not retry on its own.
pub fn provider_missing_state() -> ConnectionState {
    ConnectionState::faulted(WalletError::NotInstalled.to_string())
}

/// Explicit user connect.
///
/// `base` is the connecting snapshot the caller already produced via
/// [`ConnectionState::begin_connect`]. The persisted disconnect flag is
/// cleared first so background re-checks cannot immediately undo the
/// result. Account access, network reconciliation, a chain re-query and
/// the first balance fetch run in that order; a reconciliation failure
/// is carried as a surfaced message on an otherwise connected state.
pub async fn connect_flow(
    provider: &dyn Eip1193,
    store: &dyn SessionStore,
    base: &ConnectionState,
) -> ConnectionState {
    session::clear_disconnect_flag(store);

    let accounts = match provider.request("eth_requestAccounts", None).await {
        Ok(value) => string_list(&value),
        Err(err) => return base.with_error(err.to_string()),
    };
    let Some(first) = accounts.first() else {
        return base.with_error("The wallet returned no accounts.");
    };
    let account = normalize_account(first);

    let network_error = match network::ensure_target_network(provider).await {
        Ok(()) => None,
        Err(err) => Some(err.to_string()),
    };

    let chain_id = network::current_chain(provider).await;
    let balance = match fetch_balance(provider, &account).await {
        Ok(balance) => Some(balance),
        Err(err) => {
            log::warn!("balance fetch failed during connect: {err}");
            carried_balance(base, &account)
        }
    };

    session::remember_account(store, &account);
    ConnectionState::established(
        account,
        chain_id,
        provider.is_recognized(),
        balance,
        network_error,
    )
}

/// Explicit disconnect.
///
/// Local only: wallet providers expose no revocation call, so this sets
/// the suppression flag, forgets the remembered account and resets the
/// state. Idempotent by construction.
pub fn disconnect(store: &dyn SessionStore) -> ConnectionState {
    session::record_disconnect(store);
    ConnectionState::default()
}

/// Silent re-derivation of account, chain and balance.
///
/// Uses `eth_accounts`, which never prompts. Runs on page load and after
/// provider events; returns `prev` untouched while the manual-disconnect
/// flag is set, and on transient failures (logged, not surfaced).
pub async fn recheck_flow(
    provider: &dyn Eip1193,
    store: &dyn SessionStore,
    prev: &ConnectionState,
) -> ConnectionState {
    if session::manually_disconnected(store) {
        return prev.clone();
    }

    let accounts = match provider.request("eth_accounts", None).await {
        Ok(value) => string_list(&value),
        Err(err) => {
            log::warn!("account re-check failed: {err}");
            return prev.clone();
        }
    };
    let Some(first) = accounts.first() else {
        return ConnectionState::default();
    };
    let account = normalize_account(first);

    let chain_id = network::current_chain(provider).await;
    let balance = match fetch_balance(provider, &account).await {
        Ok(balance) => Some(balance),
        Err(err) => {
            log::warn!("balance fetch failed during re-check: {err}");
            carried_balance(prev, &account)
        }
    };

    session::remember_account(store, &account);
    ConnectionState::established(account, chain_id, provider.is_recognized(), balance, None)
}

/// Standalone network switch, as retried from the wrong-network banner.
///
/// The chain is re-queried afterwards regardless of the outcome; a
/// successful switch also clears any lingering error message.
pub async fn switch_network_flow(
    provider: &dyn Eip1193,
    prev: &ConnectionState,
) -> ConnectionState {
    let outcome = network::ensure_target_network(provider).await;
    let chain_id = network::current_chain(provider).await;
    let next = prev.with_chain(chain_id);
    match outcome {
        Ok(()) => next.without_error(),
        Err(err) => next.with_error(err.to_string()),
    }
}

/// Balance refresh; never fails the caller.
///
/// No-op without an account. A fetch error keeps the previous value:
/// stale-but-present beats clearing a known-good display.
pub async fn refresh_balance_flow(
    provider: &dyn Eip1193,
    prev: &ConnectionState,
) -> ConnectionState {
    let Some(account) = prev.account.clone() else {
        return prev.clone();
    };
    match fetch_balance(provider, &account).await {
        Ok(balance) => prev.with_balance(balance),
        Err(err) => {
            log::warn!("balance refresh failed: {err}");
            prev.clone()
        }
    }
}

/// Apply an `accountsChanged` payload.
///
/// An empty list is an external disconnect: suppression flag set, state
/// reset, same as the explicit path. A non-empty list triggers the
/// silent re-check (which itself honors the suppression flag).
pub async fn accounts_changed_flow(
    provider: &dyn Eip1193,
    store: &dyn SessionStore,
    prev: &ConnectionState,
    accounts: Vec<String>,
) -> ConnectionState {
    if accounts.is_empty() {
        session::record_disconnect(store);
        return ConnectionState::default();
    }
    recheck_flow(provider, store, prev).await
}

/// Immediate state update for a `chainChanged` payload.
///
/// Pure and synchronous so the UI reflects the new chain at once; the
/// caller follows up with [`recheck_flow`] separately.
pub fn apply_chain_changed(prev: &ConnectionState, chain_hex: &str) -> ConnectionState {
    prev.with_chain(Some(normalize_chain_id(chain_hex)))
}

/// `eth_getBalance` at the latest block, formatted to 4 digits.
async fn fetch_balance(provider: &dyn Eip1193, account: &str) -> Result<String, WalletError> {
    let result = provider.request("eth_getBalance", Some(json!([account, "latest"]))).await?;
    let raw = result
        .as_str()
        .ok_or_else(|| WalletError::Unknown("balance response was not a string".to_string()))?;
    format::format_hex_units(raw, u32::from(TARGET_CHAIN.currency_decimals))
        .ok_or_else(|| WalletError::Unknown(format!("unparseable balance: {raw}")))
}

/// Previous balance, carried over only when it belongs to the same
/// account; a different account must not display another account's
/// stale value.
fn carried_balance(prev: &ConnectionState, account: &str) -> Option<String> {
    if prev.account.as_deref() == Some(account) { prev.balance.clone() } else { None }
}
