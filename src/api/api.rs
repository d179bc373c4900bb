// fil-wallet-core/src/api/api.rs
//
// Flat async surface for the host application (FFI-friendly: plain strings
// in, serde models out). Each call builds its own adapter; nothing is shared
// between calls.

use crate::chains::filecoin::FilecoinAdapter;
use crate::chains::FilecoinChainConfig;
use crate::error::WalletResult;
use crate::network::models::{
    AccountInfo, Balance, ConfirmationStatus, EstimateGas, FeeEstimate, NetworkMode,
    TransactionRecord,
};

fn adapter(mode: NetworkMode) -> FilecoinAdapter {
    let config = match mode {
        NetworkMode::Mainnet => FilecoinChainConfig::mainnet(),
        NetworkMode::Testnet => FilecoinChainConfig::calibration(),
    };
    FilecoinAdapter::with_defaults(config)
}

// --- Validation ---

pub fn is_valid_address(address: String, mode: NetworkMode) -> bool {
    adapter(mode).is_valid_address(&address)
}

pub fn is_valid_private_key(private_key: String, mode: NetworkMode) -> bool {
    adapter(mode).is_valid_private_key(&private_key)
}

// --- Key Management ---

pub fn create_wallet_by_private_key(
    private_key: String,
    mode: NetworkMode,
) -> WalletResult<AccountInfo> {
    adapter(mode).create_wallet_by_private_key(&private_key)
}

pub fn create_wallet_by_mnemonic(
    mnemonic: String,
    index: u32,
    mode: NetworkMode,
) -> WalletResult<AccountInfo> {
    adapter(mode).create_wallet_by_mnemonic(&mnemonic, index)
}

// --- Chain Operations ---

pub async fn get_balance(address: String, mode: NetworkMode) -> Balance {
    adapter(mode).get_balance(&address).await
}

pub async fn get_transactions(
    address: String,
    page: u32,
    limit: u32,
    mode: NetworkMode,
) -> Vec<TransactionRecord> {
    adapter(mode).get_transactions(&address, page, limit).await
}

pub async fn get_estimate_fee(
    from: String,
    to: String,
    amount: String,
    mode: NetworkMode,
) -> WalletResult<FeeEstimate> {
    adapter(mode).get_estimate_fee(&from, &to, &amount).await
}

pub async fn send(
    from: String,
    to: String,
    amount: String,
    private_key: String,
    estimate_gas: EstimateGas,
    mode: NetworkMode,
) -> WalletResult<String> {
    adapter(mode)
        .send(&from, &to, &amount, &private_key, &estimate_gas)
        .await
}

pub async fn wait_for_confirmation(
    cid: String,
    poll_interval_ms: u64,
    max_retries: u32,
    mode: NetworkMode,
) -> WalletResult<ConfirmationStatus> {
    adapter(mode)
        .wait_for_confirmation(&cid, poll_interval_ms, max_retries)
        .await
}
