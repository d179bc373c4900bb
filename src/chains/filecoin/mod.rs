// fil-wallet-core/src/chains/filecoin/mod.rs

//! Filecoin Chain Support
//!
//! The single-chain adapter: failover execution over the endpoint pool, the
//! gas-market fee estimator, the bounded confirmation wait, plus f1/t1
//! address handling and offline message signing.

pub mod address;
pub mod adapter;
pub mod confirm;
pub mod failover;
pub mod fee;
pub mod signer;

// Re-exports for cleaner API access
pub use adapter::FilecoinAdapter;
pub use address::FilecoinAddress;
pub use failover::FailoverExecutor;
pub use signer::FilecoinSigner;
