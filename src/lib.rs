// fil-wallet-core/src/lib.rs

//! # fil-wallet-core
//!
//! Filecoin chain adapter for a multi-chain wallet. Given an account
//! (address, private key or seed phrase) it derives addresses, queries
//! balances and transfer history, estimates fees, broadcasts signed
//! transfers, and polls for confirmation - over public RPC endpoints that
//! are individually unreliable.
//!
//! The interesting parts live in [`chains::filecoin`]:
//! - [`chains::filecoin::FailoverExecutor`] - sequential exhaustive failover
//!   across the endpoint pool, fresh connection per attempt
//! - [`chains::filecoin::fee`] - the pure gas-market fee formula over
//!   arbitrary-precision integers
//! - [`chains::filecoin::confirm`] - the bounded race between inclusion wait
//!   and timeout
//!
//! External collaborators (RPC transport, explorer, signing wire format) sit
//! behind the traits in [`network::traits`].

pub mod api;
pub mod chains;
pub mod crypto;
pub mod error;
pub mod network;

pub use chains::filecoin::FilecoinAdapter;
pub use chains::FilecoinChainConfig;
pub use error::{WalletError, WalletResult};
