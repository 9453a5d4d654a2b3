//! Application configuration constants.
//!
//! Central place for the target chain descriptor, storage keys, API
//! locations and timing knobs. Values are compile-time constants; this is
//! a static single-page app with no runtime configuration file.

// ============================================================================
// Application Identity
// ============================================================================

/// Display name used in the navbar and sign-in messages.
pub const APP_NAME: &str = "Kestrel Wallet";

// ============================================================================
// Target Chain
// ============================================================================

/// Static description of an EVM chain, sufficient both to detect a
/// mismatch and to build a `wallet_addEthereumChain` request.
pub struct ChainDescriptor {
    /// Hex-encoded chain id as reported by EIP-1193 providers.
    pub id_hex: &'static str,
    pub name: &'static str,
    pub rpc_urls: &'static [&'static str],
    pub explorer_url: &'static str,
    pub currency_name: &'static str,
    pub currency_symbol: &'static str,
    pub currency_decimals: u8,
}

/// The chain this deployment requires. All network reconciliation compares
/// against this descriptor.
pub const TARGET_CHAIN: ChainDescriptor = ChainDescriptor {
    id_hex: "0x38",
    name: "BNB Smart Chain",
    rpc_urls: &[
        "https://bsc-dataseed.binance.org",
        "https://bsc-dataseed1.defibit.io",
    ],
    explorer_url: "https://bscscan.com",
    currency_name: "BNB",
    currency_symbol: "BNB",
    currency_decimals: 18,
};

/// Whether a provider-reported chain id matches the target chain.
///
/// Comparison is case-insensitive since wallets differ in hex casing.
/// `None` (chain not yet known) is never a match.
pub fn is_target_chain(chain_id: Option<&str>) -> bool {
    match chain_id {
        Some(id) => id.eq_ignore_ascii_case(TARGET_CHAIN.id_hex),
        None => false,
    }
}

/// Builds the message a user signs to prove control of an address.
pub fn sign_in_message(address: &str, nonce: &str) -> String {
    format!("{APP_NAME} sign-in\nAddress: {address}\nNonce: {nonce}")
}

// ============================================================================
// Persistent Storage Keys
// ============================================================================

/// Set to `"true"` by an explicit disconnect; suppresses automatic
/// reconnection until the next explicit connect removes it.
pub const DISCONNECT_FLAG_KEY: &str = "wallet_disconnect_state";

/// Last account exposed by the provider, kept for UX continuity only.
pub const LAST_ACCOUNT_KEY: &str = "wallet_last_account";

/// Bearer token for the API session.
pub const AUTH_TOKEN_KEY: &str = "kestrel_auth_token";

/// Username associated with the API session.
pub const AUTH_USER_KEY: &str = "kestrel_auth_user";

/// Referral code captured from a `?ref=` link, consumed at sign-up.
pub const REFERRAL_KEY: &str = "referral_code";

// ============================================================================
// Backend API
// ============================================================================

/// Base path of the REST backend; same-origin behind the site proxy.
pub const API_BASE: &str = "/api/v1";

/// Page size for the transaction history list.
pub const HISTORY_PAGE_SIZE: u32 = 10;

// ============================================================================
// Timing
// ============================================================================

/// Interval between automatic balance refreshes while connected.
pub const BALANCE_REFRESH_MS: u32 = 30_000;

/// Debounce applied to conversion quote requests while typing.
pub const QUOTE_DEBOUNCE_MS: u32 = 400;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_chain_matches() {
        assert!(is_target_chain(Some("0x38")));
        assert!(is_target_chain(Some("0X38")));
    }

    #[test]
    fn test_other_chain_does_not_match() {
        assert!(!is_target_chain(Some("0x61")));
        assert!(!is_target_chain(Some("0x1")));
        assert!(!is_target_chain(None));
    }

    #[test]
    fn test_sign_in_message_includes_nonce() {
        let msg = sign_in_message("0xabc", "n-42");
        assert!(msg.contains("0xabc"));
        assert!(msg.contains("n-42"));
    }
}
