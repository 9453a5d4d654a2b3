//! Error types for the provider boundary, the REST boundary and auth.
//!
//! Each boundary owns one enum. Provider errors are produced exclusively
//! by [`classify`]; downstream code matches on the variants and never
//! inspects raw error objects again. `Display` strings double as the
//! user-facing copy shown in the UI.

use thiserror::Error;

// ============================================================================
// Wallet Provider Errors
// ============================================================================

/// EIP-1193 provider error code for a user-rejected request.
pub const CODE_USER_REJECTED: i64 = 4001;
/// Provider error code for a chain the wallet does not know.
pub const CODE_UNRECOGNIZED_CHAIN: i64 = 4902;
/// Provider error code for a request already awaiting user action.
pub const CODE_REQUEST_PENDING: i64 = -32002;
/// Provider error code for an internal JSON-RPC failure.
pub const CODE_INTERNAL: i64 = -32603;

/// Errors surfaced by wallet provider interactions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WalletError {
    /// No injected provider in this browser.
    #[error("MetaMask not detected. Install the MetaMask extension to connect a wallet.")]
    NotInstalled,

    /// The user declined the request in the wallet popup.
    #[error("Request was rejected in the wallet.")]
    UserRejected,

    /// The wallet does not know the requested chain. Consumed internally
    /// by the add-chain fallback; only visible if that also fails.
    #[error("The wallet does not recognize the requested network.")]
    UnrecognizedChain,

    /// A previous request is still waiting in the wallet.
    #[error("A request is already pending. Open your wallet to continue.")]
    RequestPending,

    /// The wallet refused or failed to add the target chain.
    #[error("Could not add the network to the wallet: {0}")]
    ChainAddFailed(String),

    /// Provider-internal JSON-RPC failure.
    #[error("The wallet reported an internal error. Please try again.")]
    Internal,

    /// Anything the classifier cannot place; carries the raw message.
    #[error("{0}")]
    Unknown(String),
}

/// Fallback copy when a provider error carries no usable message.
const GENERIC_WALLET_MESSAGE: &str = "Wallet request failed. Please try again.";

/// Maps a provider error code and message to the typed taxonomy.
///
/// This is the single classification point for the provider boundary.
/// Codes win over messages; an absent code falls through to the raw
/// message or a generic fallback.
pub fn classify(code: Option<i64>, message: Option<&str>) -> WalletError {
    match code {
        Some(CODE_USER_REJECTED) => WalletError::UserRejected,
        Some(CODE_UNRECOGNIZED_CHAIN) => WalletError::UnrecognizedChain,
        Some(CODE_REQUEST_PENDING) => WalletError::RequestPending,
        Some(CODE_INTERNAL) => WalletError::Internal,
        _ => {
            let msg = message
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(GENERIC_WALLET_MESSAGE);
            WalletError::Unknown(msg.to_string())
        }
    }
}

// ============================================================================
// REST API Errors
// ============================================================================

/// Errors from the backend REST boundary.
///
/// Classified by the API client, never by the wallet code.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, CORS).
    #[error("Could not reach the server. Check your connection.")]
    Network(String),

    /// Non-success status with a message supplied by the server.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Non-success status without a usable body.
    #[error("Server error (HTTP {0}).")]
    Http(u16),

    /// The response body did not match the expected shape.
    #[error("Unexpected response from the server.")]
    Decode(String),
}

impl ApiError {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Http(status) => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// Auth Errors
// ============================================================================

/// Errors from sign-in and sign-up flows (both wallet-signature and
/// WebAuthn paths).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// This browser exposes no WebAuthn support.
    #[error("Passkeys are not supported in this browser.")]
    NotSupported,

    /// The user dismissed the authenticator prompt.
    #[error("Sign-in was cancelled.")]
    Cancelled,

    /// The authenticator ceremony failed.
    #[error("Authenticator error: {0}")]
    Ceremony(String),

    /// Server-provided credential options could not be decoded.
    #[error("Received malformed credential options: {0}")]
    InvalidOptions(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Wallet(#[from] WalletError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_user_rejected() {
        assert_eq!(classify(Some(4001), Some("User rejected")), WalletError::UserRejected);
    }

    #[test]
    fn test_classify_unrecognized_chain() {
        assert_eq!(classify(Some(4902), None), WalletError::UnrecognizedChain);
    }

    #[test]
    fn test_classify_request_pending() {
        assert_eq!(classify(Some(-32002), None), WalletError::RequestPending);
    }

    #[test]
    fn test_classify_internal() {
        assert_eq!(classify(Some(-32603), Some("boom")), WalletError::Internal);
    }

    #[test]
    fn test_classify_unknown_keeps_message() {
        let err = classify(None, Some("weird provider state"));
        assert_eq!(err, WalletError::Unknown("weird provider state".to_string()));
    }

    #[test]
    fn test_classify_unknown_without_message_uses_fallback() {
        let err = classify(Some(1234), Some("   "));
        assert_eq!(err.to_string(), "Wallet request failed. Please try again.");
    }

    #[test]
    fn test_display_copy_for_missing_provider() {
        assert!(WalletError::NotInstalled.to_string().starts_with("MetaMask not detected"));
    }

    #[test]
    fn test_api_error_status() {
        let err = ApiError::Server { status: 401, message: "expired".into() };
        assert_eq!(err.status(), Some(401));
        assert_eq!(ApiError::Network("x".into()).status(), None);
    }
}
