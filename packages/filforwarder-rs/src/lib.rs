//! FilForwarder-RS: Forward native FIL to any Filecoin address
//!
//! This crate provides the core logic for sending FIL from an
//! Ethereum-compatible (FEVM) account to an arbitrary Filecoin address
//! through the FilForwarder bridging contract:
//!
//! - **Address Codec** - Parse/validate all five Filecoin address protocols
//!   into the canonical byte encoding the contract expects
//! - **Units** - Exact FIL ↔ attoFIL decimal conversion
//! - **Intent Builder** - Amount/balance validation and call descriptor
//!   construction for `forward(bytes) payable`
//! - **Outcome Handler** - Single-shot success/error callback settlement
//! - **EVM Module** - alloy contract bindings and a signing RPC client
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! filforwarder-rs = { path = "../filforwarder-rs" }
//! ```
//!
//! The two pure entry points are [`validate_address`] and
//! [`build_transfer_intent`]; any caller (CLI, UI, service) can drive them
//! and hand the resulting [`CallDescriptor`] to its own transport.

pub mod address;
pub mod error;
pub mod evm;
pub mod intent;
pub mod outcome;
pub mod units;

// Re-export commonly used items at the crate root
pub use address::{validate_address, AddressError, FilAddress, Network, Protocol};
pub use error::ForwardError;
pub use evm::{FilForwarder, ForwarderClient};
pub use intent::{
    build_transfer_intent, CallDescriptor, TransferIntent, FIL_FORWARDER_ADDRESS,
    FORWARD_METHOD,
};
pub use outcome::{settle, settle_submission, TransactionOutcome};
pub use units::{format_fil, parse_fil, FIL_DECIMALS};
