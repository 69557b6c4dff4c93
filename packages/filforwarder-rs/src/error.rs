//! Error taxonomy for the forwarding flow
//!
//! Validation errors are returned synchronously; transport errors surface
//! once through the submission outcome. Nothing is retried automatically.

use alloy::primitives::U256;
use thiserror::Error;

use crate::address::AddressError;

/// Errors produced while validating input or submitting a forward call
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The destination string is not a valid Filecoin address
    #[error("invalid address format: {0}")]
    InvalidAddressFormat(#[from] AddressError),

    /// The amount is zero, malformed, or out of range
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The caller's known balance cannot cover the requested value
    #[error("insufficient balance: need {needed} attoFIL, have {available} attoFIL")]
    InsufficientBalance { needed: U256, available: U256 },

    /// Any failure reported by the wallet/RPC transport layer
    #[error("transport error: {0}")]
    Transport(String),
}

impl ForwardError {
    /// Wrap a transport-layer failure, preserving its message
    pub fn transport(err: impl std::fmt::Display) -> Self {
        ForwardError::Transport(err.to_string())
    }
}
