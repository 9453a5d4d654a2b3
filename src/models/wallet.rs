//! Wallet connection state.
//!
//! A single record owned by the connection state machine. Every transition
//! produces a fresh record; callers replace the whole value in the signal
//! rather than mutating fields in place, so an async step that resumes
//! late can never leave a half-applied update behind.

use crate::config;

/// Snapshot of the wallet connection.
///
/// Invariants upheld by the constructors below:
/// - `connecting` implies not `connected`.
/// - `account` is present exactly when `connected` is true.
/// - `target_network` is always derived from `chain_id`, never stored
///   independently.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConnectionState {
    /// An account is currently exposed by the provider.
    pub connected: bool,
    /// Lowercase address of the active account.
    pub account: Option<String>,
    /// Hex chain id as last reported by the provider.
    pub chain_id: Option<String>,
    /// Native balance formatted to 4 fractional digits.
    pub balance: Option<String>,
    /// True only while a `connect` call is in flight.
    pub connecting: bool,
    /// Last surfaced error message.
    pub error: Option<String>,
    /// Provider self-reports as a known wallet (`isMetaMask`).
    pub recognized_wallet: bool,
    /// Reported chain id matches the required chain.
    pub target_network: bool,
}

impl ConnectionState {
    /// Guarded entry into the connecting phase.
    ///
    /// Returns `None` when a connect is already in flight or an account is
    /// already exposed; the caller treats that as a no-op.
    pub fn begin_connect(&self) -> Option<Self> {
        if self.connecting || self.connected {
            return None;
        }
        Some(Self { connecting: true, ..self.clone() })
    }

    /// Fully connected state after a successful account resolution.
    ///
    /// `error` carries a non-fatal network reconciliation message when the
    /// chain switch failed but the account is still usable.
    pub fn established(
        account: String,
        chain_id: Option<String>,
        recognized_wallet: bool,
        balance: Option<String>,
        error: Option<String>,
    ) -> Self {
        let target_network = config::is_target_chain(chain_id.as_deref());
        Self {
            connected: true,
            account: Some(account),
            chain_id,
            balance,
            connecting: false,
            error,
            recognized_wallet,
            target_network,
        }
    }

    /// Default state carrying only an error message.
    ///
    /// Used when the provider itself is missing. Everything else resets.
    pub fn faulted(message: impl Into<String>) -> Self {
        Self { error: Some(message.into()), ..Self::default() }
    }

    /// Records a failure without touching the rest of the connection.
    ///
    /// `connecting` drops back to false; account, chain and balance stay
    /// as they were so a rejected retry does not wipe a live session.
    pub fn with_error(&self, message: impl Into<String>) -> Self {
        Self {
            connecting: false,
            error: Some(message.into()),
            ..self.clone()
        }
    }

    /// Clears the error field only.
    pub fn without_error(&self) -> Self {
        Self { error: None, ..self.clone() }
    }

    /// Applies a newly reported chain id, recomputing the target flag.
    pub fn with_chain(&self, chain_id: Option<String>) -> Self {
        let target_network = config::is_target_chain(chain_id.as_deref());
        Self { chain_id, target_network, ..self.clone() }
    }

    /// Applies a freshly fetched balance.
    pub fn with_balance(&self, balance: String) -> Self {
        Self { balance: Some(balance), ..self.clone() }
    }
}

/// Lowercase-normalizes a provider-reported address.
pub fn normalize_account(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Normalizes a chain id to lowercase `0x`-prefixed hex.
///
/// Providers report hex, but decimal strings show up in the wild; both
/// forms are accepted.
pub fn normalize_chain_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
        trimmed.to_ascii_lowercase()
    } else if let Ok(value) = trimmed.parse::<u64>() {
        format!("0x{value:x}")
    } else {
        trimmed.to_ascii_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_disconnected() {
        let state = ConnectionState::default();
        assert!(!state.connected);
        assert!(!state.connecting);
        assert!(state.account.is_none());
        assert!(state.error.is_none());
        assert!(!state.target_network);
    }

    #[test]
    fn test_begin_connect_sets_connecting() {
        let state = ConnectionState::default().begin_connect().unwrap();
        assert!(state.connecting);
        assert!(!state.connected);
    }

    #[test]
    fn test_begin_connect_is_rejected_while_connecting() {
        let first = ConnectionState::default().begin_connect().unwrap();
        assert!(first.begin_connect().is_none());
    }

    #[test]
    fn test_begin_connect_is_rejected_while_connected() {
        let state = ConnectionState::established(
            "0xabc".into(),
            Some("0x38".into()),
            true,
            None,
            None,
        );
        assert!(state.begin_connect().is_none());
    }

    #[test]
    fn test_established_on_target_chain() {
        let state = ConnectionState::established(
            "0xabc".into(),
            Some("0x38".into()),
            true,
            Some("1.2345".into()),
            None,
        );
        assert!(state.connected);
        assert!(!state.connecting);
        assert_eq!(state.account.as_deref(), Some("0xabc"));
        assert!(state.target_network);
    }

    #[test]
    fn test_established_off_target_chain() {
        let state =
            ConnectionState::established("0xabc".into(), Some("0x61".into()), true, None, None);
        assert!(state.connected);
        assert!(!state.target_network);
    }

    #[test]
    fn test_with_chain_recomputes_target_flag() {
        let state =
            ConnectionState::established("0xabc".into(), Some("0x38".into()), true, None, None);
        let moved = state.with_chain(Some("0x61".into()));
        assert!(!moved.target_network);
        let back = moved.with_chain(Some("0x38".into()));
        assert!(back.target_network);
    }

    #[test]
    fn test_faulted_resets_everything_but_error() {
        let state = ConnectionState::faulted("no provider");
        assert!(!state.connected);
        assert!(!state.connecting);
        assert!(state.account.is_none());
        assert_eq!(state.error.as_deref(), Some("no provider"));
    }

    #[test]
    fn test_with_error_keeps_live_session() {
        let state =
            ConnectionState::established("0xabc".into(), Some("0x38".into()), true, None, None);
        let failed = state.with_error("rejected");
        assert!(failed.connected);
        assert_eq!(failed.account.as_deref(), Some("0xabc"));
        assert_eq!(failed.error.as_deref(), Some("rejected"));
        assert!(!failed.connecting);
    }

    #[test]
    fn test_without_error_clears_only_error() {
        let state = ConnectionState::established(
            "0xabc".into(),
            Some("0x38".into()),
            true,
            Some("1.0000".into()),
            Some("stale message".into()),
        );
        let cleared = state.without_error();
        assert!(cleared.error.is_none());
        assert_eq!(cleared.balance.as_deref(), Some("1.0000"));
        assert!(cleared.connected);
    }

    #[test]
    fn test_normalize_account_lowercases() {
        assert_eq!(normalize_account(" 0xAbCdEf "), "0xabcdef");
    }

    #[test]
    fn test_normalize_chain_id_hex_and_decimal() {
        assert_eq!(normalize_chain_id("0X38"), "0x38");
        assert_eq!(normalize_chain_id("56"), "0x38");
        assert_eq!(normalize_chain_id(" 0x61 "), "0x61");
    }
}
