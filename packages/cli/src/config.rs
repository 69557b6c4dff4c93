//! CLI configuration, loaded from environment variables (and `.env`)

use std::env;
use std::fmt;
use std::path::Path;

use alloy::primitives::Address;
use eyre::{eyre, Result, WrapErr};
use filforwarder_rs::FIL_FORWARDER_ADDRESS;

/// Filecoin mainnet chain ID
pub const MAINNET_CHAIN_ID: u64 = 314;

/// Filecoin Calibration testnet chain ID
pub const CALIBRATION_CHAIN_ID: u64 = 314_159;

/// Everything the CLI needs to reach the chain and sign
#[derive(Clone)]
pub struct Config {
    pub rpc_url: String,
    pub chain_id: u64,
    pub forwarder_address: Address,
    pub private_key: String,
}

/// Custom Debug that redacts the private key to prevent accidental log leakage.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field("forwarder_address", &self.forwarder_address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration, reading `.env` first if present
    pub fn load() -> Result<Self> {
        if Path::new(".env").exists() {
            dotenvy::from_filename(".env").wrap_err("Failed to load .env file")?;
        }
        Self::load_from_env()
    }

    /// Load configuration from environment variables
    fn load_from_env() -> Result<Self> {
        let rpc_url = env::var("FIL_RPC_URL")
            .map_err(|_| eyre!("FIL_RPC_URL environment variable is required"))?;

        let chain_id = env::var("FIL_CHAIN_ID")
            .map_err(|_| eyre!("FIL_CHAIN_ID environment variable is required"))?
            .parse()
            .wrap_err("FIL_CHAIN_ID must be a valid u64")?;

        let forwarder_address = match env::var("FIL_FORWARDER_ADDRESS") {
            Ok(raw) => raw
                .parse()
                .wrap_err("FIL_FORWARDER_ADDRESS must be a 0x-prefixed EVM address")?,
            Err(_) => FIL_FORWARDER_ADDRESS,
        };

        let private_key = env::var("FIL_PRIVATE_KEY")
            .map_err(|_| eyre!("FIL_PRIVATE_KEY environment variable is required"))?;

        let config = Config {
            rpc_url,
            chain_id,
            forwarder_address,
            private_key,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.is_empty() {
            return Err(eyre!("rpc_url cannot be empty"));
        }

        if self.private_key.len() != 66 || !self.private_key.starts_with("0x") {
            return Err(eyre!("private_key must be 66 chars (0x + 64 hex chars)"));
        }

        if self.chain_id != MAINNET_CHAIN_ID && self.chain_id != CALIBRATION_CHAIN_ID {
            tracing::warn!(
                chain_id = self.chain_id,
                "chain ID is neither Filecoin mainnet (314) nor Calibration (314159)"
            );
        }

        Ok(())
    }
}
