//! FilForwarder contract ABI definitions
//!
//! Uses alloy's sol! macro to generate type-safe bindings. The contract has a
//! single relevant entry point: `forward`, which accepts the canonical byte
//! encoding of a Filecoin address and relays the attached value to it.

use alloy::sol;

sol! {
    /// FilForwarder bridging contract interface
    #[sol(rpc)]
    contract FilForwarder {
        /// Forward the attached value to the Filecoin address encoded in
        /// `destination` (protocol byte followed by the payload)
        function forward(bytes destination) external payable;
    }
}
