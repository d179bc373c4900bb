// fil-wallet-core/src/network/mod.rs
//
// Network Module
//
// Provides:
// - Collaborator traits (RPC client, connection factory, explorer)
// - Data models shared across the adapter surface
// - Default HTTP implementations (Lotus JSON-RPC, Filfox REST)

pub mod explorer;
pub mod models;
pub mod rpc;
pub mod traits;

// Re-export for convenience
pub use explorer::FilfoxExplorer;
pub use models::*;
pub use rpc::{HttpConnectionFactory, LotusClient};
pub use traits::*;
