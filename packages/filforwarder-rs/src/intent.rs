//! Transfer Intent Builder
//!
//! Turns a validated destination address plus an attoFIL amount into the call
//! descriptor submitted to the FilForwarder contract. Intents are constructed
//! fresh per submission attempt and never persisted.

use alloy::primitives::{address, Address, Bytes, U256};
use alloy::sol_types::SolCall;
use serde::{Deserialize, Serialize};

use crate::address::FilAddress;
use crate::error::ForwardError;
use crate::evm::contracts::FilForwarder;

/// The FilForwarder deployment address
///
/// The contract resides at the same address on every Filecoin network.
/// Exposed as the default, but callers pass the address explicitly so
/// deployments against forks or test contracts stay configurable.
pub const FIL_FORWARDER_ADDRESS: Address =
    address!("aac40637a3590713f0588cf165e58f7a2c868d93");

/// Name of the contract method every forward goes through
pub const FORWARD_METHOD: &str = "forward";

/// A validated (destination, value) pair ready to become a contract call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferIntent {
    /// Canonical byte encoding of the destination Filecoin address
    pub destination: Bytes,
    /// Value to attach, in attoFIL
    pub value: U256,
}

impl TransferIntent {
    /// Validate amount and balance and build the intent
    ///
    /// The balance is supplied by the caller because it is fetched from the
    /// wallet/RPC layer, not by this crate's pure core.
    pub fn new(
        destination: &FilAddress,
        value: U256,
        balance: U256,
    ) -> Result<Self, ForwardError> {
        if value.is_zero() {
            return Err(ForwardError::InvalidAmount(
                "amount must be greater than zero".into(),
            ));
        }
        if value > balance {
            return Err(ForwardError::InsufficientBalance {
                needed: value,
                available: balance,
            });
        }
        Ok(Self {
            destination: destination.to_bytes().into(),
            value,
        })
    }

    /// Attach the target contract address, producing a submittable call
    pub fn into_call(self, forwarder: Address) -> CallDescriptor {
        CallDescriptor {
            to: forwarder,
            method: FORWARD_METHOD,
            destination: self.destination,
            value: self.value,
        }
    }
}

/// Everything the transport needs to submit one forward call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallDescriptor {
    /// Target contract address
    pub to: Address,
    /// Contract method name
    pub method: &'static str,
    /// ABI `bytes` argument: the destination address encoding
    pub destination: Bytes,
    /// Value to attach, in attoFIL
    pub value: U256,
}

impl CallDescriptor {
    /// ABI-encoded calldata for the `forward(bytes)` invocation
    pub fn calldata(&self) -> Bytes {
        FilForwarder::forwardCall {
            destination: self.destination.clone(),
        }
        .abi_encode()
        .into()
    }
}

/// Build a call descriptor in one step from validated inputs
pub fn build_transfer_intent(
    destination: &FilAddress,
    value: U256,
    balance: U256,
    forwarder: Address,
) -> Result<CallDescriptor, ForwardError> {
    Ok(TransferIntent::new(destination, value, balance)?.into_call(forwarder))
}
