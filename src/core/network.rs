//! Target-network reconciliation.
//!
//! Steers the wallet onto the chain in [`config::TARGET_CHAIN`]. A switch
//! request is attempted first; a wallet that has never seen the chain
//! answers 4902, which triggers a one-shot add-chain fallback built from
//! the same descriptor.

use serde_json::{Value, json};

use crate::config::{ChainDescriptor, TARGET_CHAIN};
use crate::core::error::WalletError;
use crate::core::provider::Eip1193;
use crate::models::normalize_chain_id;

/// Ask the wallet to activate the target chain.
///
/// On 4902 the chain definition is submitted via
/// `wallet_addEthereumChain`; a compliant wallet activates a chain it
/// just added, so the switch is not retried afterwards. A pending
/// request surfaces as [`WalletError::RequestPending`] unchanged so the
/// caller can show its distinct message instead of stacking prompts.
///
/// Best-effort only: the chain actually active afterwards is known by
/// re-querying the provider, not by this returning `Ok`.
pub async fn ensure_target_network(provider: &dyn Eip1193) -> Result<(), WalletError> {
    let params = switch_params(&TARGET_CHAIN);
    match provider.request("wallet_switchEthereumChain", Some(params)).await {
        Ok(_) => Ok(()),
        Err(WalletError::UnrecognizedChain) => add_target_chain(provider).await,
        Err(err) => Err(err),
    }
}

/// Submit the full chain definition to the wallet.
async fn add_target_chain(provider: &dyn Eip1193) -> Result<(), WalletError> {
    provider
        .request("wallet_addEthereumChain", Some(add_params(&TARGET_CHAIN)))
        .await
        .map(|_| ())
        .map_err(|err| WalletError::ChainAddFailed(err.to_string()))
}

/// Chain id the provider currently reports, normalized to lowercase hex.
pub async fn current_chain(provider: &dyn Eip1193) -> Option<String> {
    let result = provider.request("eth_chainId", None).await.ok()?;
    result.as_str().map(normalize_chain_id)
}

fn switch_params(chain: &ChainDescriptor) -> Value {
    json!([{ "chainId": chain.id_hex }])
}

fn add_params(chain: &ChainDescriptor) -> Value {
    json!([{
        "chainId": chain.id_hex,
        "chainName": chain.name,
        "rpcUrls": chain.rpc_urls,
        "blockExplorerUrls": [chain.explorer_url],
        "nativeCurrency": {
            "name": chain.currency_name,
            "symbol": chain.currency_symbol,
            "decimals": chain.currency_decimals,
        },
    }])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_params_shape() {
        let params = switch_params(&TARGET_CHAIN);
        assert_eq!(params[0]["chainId"], "0x38");
    }

    #[test]
    fn test_add_params_carry_full_descriptor() {
        let params = add_params(&TARGET_CHAIN);
        let entry = &params[0];
        assert_eq!(entry["chainId"], "0x38");
        assert_eq!(entry["chainName"], "BNB Smart Chain");
        assert_eq!(entry["nativeCurrency"]["decimals"], 18);
        assert!(entry["rpcUrls"].as_array().is_some_and(|urls| !urls.is_empty()));
        assert_eq!(entry["blockExplorerUrls"][0], "https://bscscan.com");
    }
}
