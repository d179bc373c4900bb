// fil-wallet-core/src/chains/mod.rs

pub mod filecoin;

use crate::network::models::NetworkMode;

/// Static configuration for one Filecoin network: the ordered endpoint pool
/// plus explorer/display parameters. Owned by configuration, read-only to the
/// adapter.
#[derive(Debug, Clone)]
pub struct FilecoinChainConfig {
    pub name: String,
    pub mode: NetworkMode,
    /// Equivalent public RPC endpoints, tried strictly in this order.
    pub rpc_endpoints: Vec<String>,
    pub explorer_api_url: String,
    pub explorer_web_url: String,
    pub symbol: String,
    pub decimals: u8,
}

impl FilecoinChainConfig {
    pub fn mainnet() -> Self {
        Self {
            name: "Filecoin Mainnet".to_string(),
            mode: NetworkMode::Mainnet,
            rpc_endpoints: vec![
                "https://api.node.glif.io/rpc/v0".to_string(),
                "https://filecoin.chainup.net/rpc/v1".to_string(),
                "https://rpc.ankr.com/filecoin".to_string(),
            ],
            explorer_api_url: "https://filfox.info/api/v1".to_string(),
            explorer_web_url: "https://filfox.info/en".to_string(),
            symbol: "FIL".to_string(),
            decimals: 18,
        }
    }

    pub fn calibration() -> Self {
        Self {
            name: "Filecoin Calibration".to_string(),
            mode: NetworkMode::Testnet,
            rpc_endpoints: vec![
                "https://api.calibration.node.glif.io/rpc/v0".to_string(),
                "https://filecoin-calibration.chainup.net/rpc/v1".to_string(),
            ],
            explorer_api_url: "https://calibration.filfox.info/api/v1".to_string(),
            explorer_web_url: "https://calibration.filfox.info/en".to_string(),
            symbol: "tFIL".to_string(),
            decimals: 18,
        }
    }
}
