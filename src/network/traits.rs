// fil-wallet-core/src/network/traits.rs
//
// Collaborator seams for the Filecoin adapter. The core orchestrates these;
// it never implements transport, signing internals, or explorer schemas
// itself.

use crate::error::WalletResult;
use crate::network::models::{
    ExplorerFeeSnapshot, ExplorerTransfer, GasSpec, MessageLookup, MessagePrototype,
};
use async_trait::async_trait;
use std::sync::Arc;

// =============================================================================
// RPC CLIENT
// =============================================================================

/// A connected Filecoin RPC client bound to one endpoint.
///
/// One instance lives for exactly one failover attempt: the executor builds a
/// fresh client per endpoint and discards it afterwards, so no stale
/// connection is ever reused.
///
/// # Design Principles
/// - **Async-First**: every network operation is async and may fail
/// - **Error Handling**: unified `WalletResult`; transport failures carry the
///   endpoint and the HTTP status when one was received
/// - **Narrow**: only the calls the adapter's operations need
#[async_trait]
pub trait FilecoinRpc: Send + Sync {
    /// Balance of `address` in attoFIL (decimal string).
    async fn wallet_balance(&self, address: &str) -> WalletResult<String>;

    /// Next nonce for `address`, mempool-aware.
    async fn mpool_get_nonce(&self, address: &str) -> WalletResult<u64>;

    /// Ask the node to fill gas limit / fee cap / premium for a draft message.
    async fn gas_estimate_message_gas(&self, msg: &MessagePrototype) -> WalletResult<GasSpec>;

    /// Submit a signed message (Lotus JSON wire form). Returns the message CID.
    async fn push_message(&self, signed_json: &serde_json::Value) -> WalletResult<String>;

    /// Block until the message identified by `cid` is included, then return
    /// its receipt. Unbounded by design; the Confirmation Waiter supplies the
    /// deadline.
    async fn state_wait_msg(&self, cid: &str) -> WalletResult<MessageLookup>;
}

/// Builds a fresh client for an endpoint descriptor. The descriptor is an
/// opaque URL string owned by configuration.
pub trait ConnectionFactory: Send + Sync {
    fn connect(&self, endpoint: &str) -> WalletResult<Arc<dyn FilecoinRpc>>;
}

// =============================================================================
// EXPLORER
// =============================================================================

/// Out-of-process block-explorer queries. Results may be stale; the adapter
/// treats them as opaque snapshots.
#[async_trait]
pub trait ExplorerApi: Send + Sync {
    /// Current network-wide base fee and recent gas usage.
    async fn fee_market_snapshot(&self) -> WalletResult<ExplorerFeeSnapshot>;

    /// Past transfers touching `address`, newest first.
    async fn transfers(
        &self,
        address: &str,
        page: u32,
        limit: u32,
    ) -> WalletResult<Vec<ExplorerTransfer>>;

    /// Deep link for a message CID on this explorer.
    fn message_url(&self, cid: &str) -> String;
}
