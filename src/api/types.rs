//! Wire types for the REST backend.
//!
//! Shapes mirror what the server actually sends and are owned by it;
//! fields here are serde views, not domain types. Amounts travel as
//! decimal strings to avoid float drift on money values. WebAuthn
//! option payloads stay opaque `serde_json::Value`s because their only
//! consumer is the marshalling adapter.

use serde::{Deserialize, Serialize};

fn zero() -> String {
    "0".to_string()
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NonceResponse {
    pub nonce: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub address: String,
    pub signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub username: Option<String>,
    pub address: Option<String>,
    pub referral_code: Option<String>,
}

impl UserProfile {
    /// Something presentable regardless of which identity fields exist.
    pub fn display_name(&self) -> String {
        self.username
            .clone()
            .or_else(|| self.address.clone())
            .unwrap_or_else(|| "account".to_string())
    }
}

// ============================================================================
// WebAuthn
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStartRequest {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginStartRequest {
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCompleteRequest {
    pub username: String,
    pub credential: RegistrationPayload,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginCompleteRequest {
    pub username: String,
    pub credential: AssertionPayload,
}

/// Attestation result of a registration ceremony, base64url-encoded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub id: String,
    pub raw_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub response: AttestationResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationResponse {
    pub attestation_object: String,
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
}

/// Assertion result of a sign-in ceremony, base64url-encoded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionPayload {
    pub id: String,
    pub raw_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub response: AssertionResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionResponse {
    pub authenticator_data: String,
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    pub signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<String>,
}

// ============================================================================
// Rewards & Referrals
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RewardSummary {
    #[serde(default = "zero")]
    pub total_earned: String,
    #[serde(default = "zero")]
    pub pending: String,
    pub referral_count: u32,
    pub referral_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardEntry {
    pub id: u64,
    pub kind: String,
    pub amount: String,
    pub created_at: u64,
    #[serde(default)]
    pub note: Option<String>,
}

// ============================================================================
// Transactions
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub hash: String,
    pub from: String,
    pub to: String,
    pub amount: String,
    pub status: String,
    pub timestamp: u64,
}

impl TransactionRecord {
    /// Whether `account` sent this transaction (as opposed to receiving).
    pub fn is_outgoing(&self, account: &str) -> bool {
        self.from.eq_ignore_ascii_case(account)
    }
}

/// One page of the transaction history listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryPage {
    pub transactions: Vec<TransactionRecord>,
    pub total: u64,
}

// ============================================================================
// Transfers & Conversion
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TransferRequest {
    pub to: String,
    pub amount: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub tx_hash: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteRequest {
    pub from: String,
    pub to: String,
    pub amount: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteResponse {
    pub rate: f64,
    pub converted: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verify_request_omits_absent_referral() {
        let req = VerifyRequest {
            address: "0xabc".into(),
            signature: "0xsig".into(),
            referral_code: None,
        };
        let wire = serde_json::to_value(&req).unwrap();
        assert!(wire.get("referralCode").is_none());
    }

    #[test]
    fn test_assertion_payload_uses_webauthn_field_names() {
        let payload = AssertionPayload {
            id: "cred".into(),
            raw_id: "cred".into(),
            kind: "public-key".into(),
            response: AssertionResponse {
                authenticator_data: "aa".into(),
                client_data_json: "bb".into(),
                signature: "cc".into(),
                user_handle: None,
            },
        };
        let wire = serde_json::to_value(&payload).unwrap();
        assert_eq!(wire["rawId"], "cred");
        assert_eq!(wire["type"], "public-key");
        assert_eq!(wire["response"]["clientDataJSON"], "bb");
        assert_eq!(wire["response"]["authenticatorData"], "aa");
        assert!(wire["response"].get("userHandle").is_none());
    }

    #[test]
    fn test_reward_summary_tolerates_sparse_body() {
        let summary: RewardSummary = serde_json::from_value(json!({})).unwrap();
        assert_eq!(summary.total_earned, "0");
        assert_eq!(summary.referral_count, 0);
    }

    #[test]
    fn test_transaction_direction() {
        let tx: TransactionRecord = serde_json::from_value(json!({
            "hash": "0xdead",
            "from": "0xAAA",
            "to": "0xbbb",
            "amount": "1.5",
            "status": "confirmed",
            "timestamp": 1_700_000_000u64,
        }))
        .unwrap();
        assert!(tx.is_outgoing("0xaaa"));
        assert!(!tx.is_outgoing("0xbbb"));
    }
}
