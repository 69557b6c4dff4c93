//! FEVM RPC client
//!
//! Wraps an alloy HTTP provider with a local private-key signer. This is the
//! crate's only asynchronous boundary: one submission in flight per call, no
//! locks, no shared mutable state.

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use eyre::{Result, WrapErr};
use tracing::{debug, info};

use crate::error::ForwardError;
use crate::evm::contracts::FilForwarder;
use crate::intent::CallDescriptor;

/// Client for querying balances and submitting forward calls
pub struct ForwarderClient {
    rpc_url: String,
    chain_id: u64,
    signer: PrivateKeySigner,
}

impl ForwarderClient {
    /// Create a client from an RPC endpoint and a hex private key
    pub fn connect(rpc_url: &str, chain_id: u64, private_key: &str) -> Result<Self> {
        let signer: PrivateKeySigner =
            private_key.parse().wrap_err("Invalid private key")?;

        info!(
            rpc_url = %rpc_url,
            chain_id = chain_id,
            address = %signer.address(),
            "Created forwarder client"
        );

        Ok(Self {
            rpc_url: rpc_url.to_string(),
            chain_id,
            signer,
        })
    }

    /// The signer's account address
    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }

    /// The configured chain ID
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The signer's native FIL balance, in attoFIL
    pub async fn balance(&self) -> Result<U256> {
        let provider = ProviderBuilder::new()
            .on_http(self.rpc_url.parse().wrap_err("Invalid RPC URL")?);
        let balance = provider.get_balance(self.signer.address()).await?;
        Ok(balance)
    }

    /// The chain ID reported by the RPC endpoint
    pub async fn remote_chain_id(&self) -> Result<u64> {
        let provider = ProviderBuilder::new()
            .on_http(self.rpc_url.parse().wrap_err("Invalid RPC URL")?);
        let chain_id = provider.get_chain_id().await?;
        Ok(chain_id)
    }

    /// Submit one forward call and wait for its receipt
    ///
    /// Errors map onto `ForwardError::Transport` so the caller can settle the
    /// outcome; a reverted receipt counts as a transport failure.
    pub async fn submit(&self, call: &CallDescriptor) -> Result<TxHash, ForwardError> {
        let wallet = EthereumWallet::from(self.signer.clone());
        let provider = ProviderBuilder::new().wallet(wallet).on_http(
            self.rpc_url
                .parse()
                .map_err(ForwardError::transport)?,
        );

        let contract = FilForwarder::new(call.to, &provider);

        debug!(
            to = %call.to,
            destination = %hex::encode(&call.destination),
            value = %call.value,
            "Submitting forward"
        );

        let pending_tx = contract
            .forward(call.destination.clone())
            .value(call.value)
            .send()
            .await
            .map_err(ForwardError::transport)?;

        let tx_hash = *pending_tx.tx_hash();
        info!(tx_hash = %tx_hash, "Transaction sent, waiting for confirmation");

        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(ForwardError::transport)?;

        if !receipt.status() {
            return Err(ForwardError::Transport("transaction reverted".into()));
        }

        Ok(tx_hash)
    }
}

/// Custom Debug that redacts the signer to prevent accidental log leakage.
impl std::fmt::Debug for ForwarderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForwarderClient")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field("signer", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str =
        "0x0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn test_connect_rejects_bad_key() {
        assert!(ForwarderClient::connect("http://localhost:8545", 314159, "0x123").is_err());
    }

    #[test]
    fn test_connect_derives_signer_address() {
        let client = ForwarderClient::connect("http://localhost:8545", 314159, TEST_KEY).unwrap();
        // Well-known address for private key 0x...01
        assert_eq!(
            format!("{:#x}", client.signer_address()),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
        assert_eq!(client.chain_id(), 314159);
    }

    #[test]
    fn test_debug_redacts_signer() {
        let client = ForwarderClient::connect("http://localhost:8545", 314159, TEST_KEY).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("0000000000000001"));
    }
}
