//! FEVM transport: contract bindings and RPC client

pub mod client;
pub mod contracts;

pub use client::ForwarderClient;
pub use contracts::FilForwarder;
