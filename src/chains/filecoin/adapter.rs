// fil-wallet-core/src/chains/filecoin/adapter.rs
//
// FilecoinAdapter - the operation surface exposed to the wallet application.
//
// Every network operation runs as a callback handed to the Failover Executor;
// the adapter itself keeps no long-lived mutable state. Read paths degrade to
// safe defaults after exhausting the endpoint pool; estimate/send paths
// propagate, since acting on wrong fee or transaction data is worse than
// surfacing the failure.

use crate::chains::filecoin::address::FilecoinAddress;
use crate::chains::filecoin::confirm;
use crate::chains::filecoin::failover::FailoverExecutor;
use crate::chains::filecoin::fee;
use crate::chains::filecoin::signer::FilecoinSigner;
use crate::chains::FilecoinChainConfig;
use crate::crypto::{DerivationPaths, Secp256k1Deriver, WalletMnemonic};
use crate::error::{CryptoError, WalletError, WalletResult};
use crate::network::explorer::FilfoxExplorer;
use crate::network::models::{
    AccountInfo, Balance, ConfirmationStatus, EstimateGas, ExplorerTransfer, FeeEstimate,
    GasParams, MessagePrototype, TransactionRecord, TransactionStatus, UnsignedMessage,
};
use crate::network::rpc::HttpConnectionFactory;
use crate::network::traits::{ConnectionFactory, ExplorerApi};
use k256::SecretKey;
use std::sync::Arc;
use tracing::warn;
use zeroize::Zeroizing;

pub struct FilecoinAdapter {
    config: FilecoinChainConfig,
    executor: FailoverExecutor,
    explorer: Arc<dyn ExplorerApi>,
    signer: FilecoinSigner,
}

impl FilecoinAdapter {
    pub fn new(
        config: FilecoinChainConfig,
        factory: Arc<dyn ConnectionFactory>,
        explorer: Arc<dyn ExplorerApi>,
    ) -> Self {
        let executor = FailoverExecutor::new(config.rpc_endpoints.clone(), factory);
        let signer = FilecoinSigner::new(config.mode);
        Self {
            config,
            executor,
            explorer,
            signer,
        }
    }

    /// Adapter with the production HTTP collaborators.
    pub fn with_defaults(config: FilecoinChainConfig) -> Self {
        let explorer = Arc::new(FilfoxExplorer::new(
            config.explorer_api_url.clone(),
            config.explorer_web_url.clone(),
        ));
        Self::new(config, Arc::new(HttpConnectionFactory), explorer)
    }

    pub fn config(&self) -> &FilecoinChainConfig {
        &self.config
    }

    // =========================================================================
    // VALIDATION (never errors - failures collapse to false)
    // =========================================================================

    pub fn is_valid_address(&self, address: &str) -> bool {
        FilecoinAddress::is_valid(address, self.config.mode)
    }

    pub fn is_valid_private_key(&self, private_key: &str) -> bool {
        decode_private_key(private_key).is_ok()
    }

    // =========================================================================
    // WALLET CREATION
    // =========================================================================

    /// Derive the account for a raw hex private key.
    pub fn create_wallet_by_private_key(&self, private_key: &str) -> WalletResult<AccountInfo> {
        let key = decode_private_key(private_key)?;
        let address = FilecoinAddress::derive(&key, self.config.mode)?;
        Ok(AccountInfo {
            address,
            derivation_path: None,
            network: self.config.mode,
        })
    }

    /// Derive the account at `m/44'/461'/0'/0/{index}` from a BIP-39 phrase.
    pub fn create_wallet_by_mnemonic(
        &self,
        mnemonic: &str,
        index: u32,
    ) -> WalletResult<AccountInfo> {
        let phrase = WalletMnemonic::from_phrase(mnemonic)?;
        let seed = phrase.to_seed("");
        let path = DerivationPaths::filecoin(index);

        let key_bytes = Secp256k1Deriver::derive(&seed[..], &path)?;
        let key = Zeroizing::new(key_bytes.to_vec());
        let address = FilecoinAddress::derive(&key, self.config.mode)?;

        Ok(AccountInfo {
            address,
            derivation_path: Some(path),
            network: self.config.mode,
        })
    }

    // =========================================================================
    // READ PATHS (degrade to safe defaults)
    // =========================================================================

    /// Native balance. Returns the zero balance when every endpoint failed:
    /// a read path must not take the wallet UI down with it.
    pub async fn get_balance(&self, address: &str) -> Balance {
        let raw = self
            .executor
            .execute(
                |client| {
                    let address = address.to_string();
                    async move { client.wallet_balance(&address).await }
                },
                Some("0".to_string()),
            )
            .await
            .unwrap_or_else(|_| "0".to_string());

        Balance::new(raw, self.config.decimals, self.config.symbol.clone())
    }

    /// Transfer history, reshaped for display. Explorer failures are absorbed
    /// into an empty list.
    pub async fn get_transactions(
        &self,
        address: &str,
        page: u32,
        limit: u32,
    ) -> Vec<TransactionRecord> {
        match self.explorer.transfers(address, page, limit).await {
            Ok(transfers) => transfers.into_iter().map(|t| self.reshape(t)).collect(),
            Err(e) => {
                warn!(address = %address, error = %e, "transaction history query failed");
                Vec::new()
            }
        }
    }

    fn reshape(&self, t: ExplorerTransfer) -> TransactionRecord {
        let hash = t.cid.unwrap_or_default();
        let amount = t.value.unwrap_or_else(|| "0".to_string());
        let amount_formatted =
            Balance::new(amount.clone(), self.config.decimals, self.config.symbol.clone())
                .formatted;

        TransactionRecord {
            hash_display: truncate_hash(&hash),
            explorer_url: self.explorer.message_url(&hash),
            hash,
            amount,
            amount_formatted,
            status: match t.exit_code {
                Some(0) => TransactionStatus::Confirmed,
                // Absent is indistinguishable from failed on this indexer.
                _ => TransactionStatus::Failed,
            },
            timestamp: t.timestamp.unwrap_or_else(now_unix),
            from: t.from.unwrap_or_default(),
            to: t.to.unwrap_or_default(),
        }
    }

    // =========================================================================
    // WRITE / ESTIMATE PATHS (errors propagate)
    // =========================================================================

    /// Estimate the total fee for a transfer of `amount` attoFIL.
    ///
    /// Gas limit and premium come from the node (via failover), base fee and
    /// network gas usage from the explorer snapshot. The returned
    /// `estimate_gas` bundle must be passed back to [`send`](Self::send)
    /// unchanged.
    pub async fn get_estimate_fee(
        &self,
        from: &str,
        to: &str,
        amount: &str,
    ) -> WalletResult<FeeEstimate> {
        if !self.is_valid_address(from) || !self.is_valid_address(to) {
            return Err(WalletError::Validation(
                "invalid sender or recipient address".to_string(),
            ));
        }

        let (nonce, gas) = self
            .executor
            .execute(
                |client| {
                    let from = from.to_string();
                    let to = to.to_string();
                    let value = amount.to_string();
                    async move {
                        let nonce = client.mpool_get_nonce(&from).await?;
                        let draft = MessagePrototype {
                            from,
                            to,
                            value,
                            nonce,
                        };
                        let gas = client.gas_estimate_message_gas(&draft).await?;
                        Ok((nonce, gas))
                    }
                },
                None,
            )
            .await?;

        let snapshot = self.explorer.fee_market_snapshot().await?;

        let fee = fee::estimate_total_fee(&GasParams {
            gas_used: snapshot.gas_used,
            gas_limit: gas.gas_limit.to_string(),
            base_fee: snapshot.base_fee,
            gas_premium: gas.gas_premium.clone(),
        })?;

        Ok(FeeEstimate {
            fee,
            estimate_gas: EstimateGas {
                nonce,
                gas_limit: gas.gas_limit,
                gas_fee_cap: gas.gas_fee_cap,
                gas_premium: gas.gas_premium,
            },
        })
    }

    /// Sign and broadcast a transfer. `estimate_gas` must be the exact bundle
    /// a prior [`get_estimate_fee`](Self::get_estimate_fee) returned; the
    /// send path never re-estimates. Returns the message CID.
    pub async fn send(
        &self,
        from: &str,
        to: &str,
        amount: &str,
        private_key: &str,
        estimate_gas: &EstimateGas,
    ) -> WalletResult<String> {
        if !self.is_valid_address(from) || !self.is_valid_address(to) {
            return Err(WalletError::Validation(
                "invalid sender or recipient address".to_string(),
            ));
        }
        let key = decode_private_key(private_key)?;

        let message = UnsignedMessage::transfer(from, to, amount, estimate_gas);
        // Signing is deterministic, so one signature serves every endpoint
        // attempt.
        let signed = self.signer.sign(&message, &key)?;

        self.executor
            .execute(
                |client| {
                    let signed = signed.clone();
                    async move { client.push_message(&signed).await }
                },
                None,
            )
            .await
    }

    /// Bounded confirmation wait; see [`confirm::wait_for_confirmation`].
    pub async fn wait_for_confirmation(
        &self,
        cid: &str,
        poll_interval_ms: u64,
        max_retries: u32,
    ) -> WalletResult<ConfirmationStatus> {
        confirm::wait_for_confirmation(&self.executor, cid, poll_interval_ms, max_retries).await
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn decode_private_key(private_key: &str) -> WalletResult<Zeroizing<Vec<u8>>> {
    let trimmed = private_key.trim().trim_start_matches("0x");
    let bytes = Zeroizing::new(hex::decode(trimmed).map_err(|e| {
        WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
            "private key is not hex: {}",
            e
        )))
    })?);

    // Must parse as a valid curve scalar, not merely be 32 bytes.
    SecretKey::from_slice(&bytes).map_err(|e| {
        WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
            "invalid secp256k1 private key: {}",
            e
        )))
    })?;

    Ok(bytes)
}

fn truncate_hash(hash: &str) -> String {
    // Indexer output is untrusted; count chars so a stray multi-byte
    // character can never land a slice off a char boundary.
    let total = hash.chars().count();
    if total <= 13 {
        return hash.to_string();
    }
    let head: String = hash.chars().take(8).collect();
    let tail: String = hash.chars().skip(total - 4).collect();
    format!("{}...{}", head, tail)
}

fn now_unix() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WalletError;
    use crate::network::models::{ExplorerFeeSnapshot, GasSpec, MessageLookup, NetworkMode};
    use crate::network::traits::FilecoinRpc;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Mutex;

    const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[derive(Default)]
    struct MockState {
        pushed: Mutex<Vec<Value>>,
        fail_all: bool,
    }

    struct MockClient {
        state: Arc<MockState>,
        endpoint: String,
    }

    #[async_trait]
    impl FilecoinRpc for MockClient {
        async fn wallet_balance(&self, _address: &str) -> WalletResult<String> {
            if self.state.fail_all {
                return Err(self.unavailable());
            }
            Ok("1500000000000000000".to_string())
        }

        async fn mpool_get_nonce(&self, _address: &str) -> WalletResult<u64> {
            if self.state.fail_all {
                return Err(self.unavailable());
            }
            Ok(42)
        }

        async fn gas_estimate_message_gas(
            &self,
            _msg: &MessagePrototype,
        ) -> WalletResult<GasSpec> {
            if self.state.fail_all {
                return Err(self.unavailable());
            }
            Ok(GasSpec {
                gas_limit: 2_000_000,
                gas_fee_cap: "101737".to_string(),
                gas_premium: "10".to_string(),
            })
        }

        async fn push_message(&self, signed: &Value) -> WalletResult<String> {
            if self.state.fail_all {
                return Err(self.unavailable());
            }
            self.state.pushed.lock().unwrap().push(signed.clone());
            Ok("bafy2bzaceamockcid".to_string())
        }

        async fn state_wait_msg(&self, _cid: &str) -> WalletResult<MessageLookup> {
            Ok(MessageLookup {
                exit_code: 0,
                gas_used: 1_000_000,
                height: 100,
            })
        }
    }

    impl MockClient {
        fn unavailable(&self) -> WalletError {
            WalletError::Rpc {
                endpoint: self.endpoint.clone(),
                status: Some(503),
                message: "unavailable".to_string(),
            }
        }
    }

    struct MockFactory {
        state: Arc<MockState>,
    }

    impl ConnectionFactory for MockFactory {
        fn connect(&self, endpoint: &str) -> WalletResult<Arc<dyn FilecoinRpc>> {
            Ok(Arc::new(MockClient {
                state: self.state.clone(),
                endpoint: endpoint.to_string(),
            }))
        }
    }

    struct MockExplorer {
        transfers: Vec<ExplorerTransfer>,
        fail: bool,
    }

    #[async_trait]
    impl ExplorerApi for MockExplorer {
        async fn fee_market_snapshot(&self) -> WalletResult<ExplorerFeeSnapshot> {
            if self.fail {
                return Err(WalletError::Rpc {
                    endpoint: "explorer".to_string(),
                    status: Some(500),
                    message: "down".to_string(),
                });
            }
            Ok(ExplorerFeeSnapshot {
                base_fee: "100".to_string(),
                gas_used: "1000000".to_string(),
            })
        }

        async fn transfers(
            &self,
            _address: &str,
            _page: u32,
            _limit: u32,
        ) -> WalletResult<Vec<ExplorerTransfer>> {
            if self.fail {
                return Err(WalletError::Rpc {
                    endpoint: "explorer".to_string(),
                    status: Some(500),
                    message: "down".to_string(),
                });
            }
            Ok(self.transfers.clone())
        }

        fn message_url(&self, cid: &str) -> String {
            format!("https://filfox.info/en/message/{}", cid)
        }
    }

    fn adapter_with(state: Arc<MockState>, explorer: MockExplorer) -> FilecoinAdapter {
        FilecoinAdapter::new(
            FilecoinChainConfig::mainnet(),
            Arc::new(MockFactory { state }),
            Arc::new(explorer),
        )
    }

    fn healthy_adapter() -> FilecoinAdapter {
        adapter_with(
            Arc::new(MockState::default()),
            MockExplorer {
                transfers: Vec::new(),
                fail: false,
            },
        )
    }

    fn test_addresses(adapter: &FilecoinAdapter) -> (String, String) {
        let from = adapter.create_wallet_by_private_key(TEST_KEY).unwrap().address;
        let to = FilecoinAddress::encode(1, &[5u8; 20], NetworkMode::Mainnet).unwrap();
        (from, to)
    }

    #[test]
    fn test_validations_swallow_failures() {
        let adapter = healthy_adapter();

        assert!(adapter.is_valid_private_key(TEST_KEY));
        assert!(adapter.is_valid_private_key(&format!("0x{}", TEST_KEY)));
        assert!(!adapter.is_valid_private_key("zz"));
        assert!(!adapter.is_valid_private_key(""));
        assert!(!adapter.is_valid_private_key(&"00".repeat(32)));

        let (from, _) = test_addresses(&adapter);
        assert!(adapter.is_valid_address(&from));
        assert!(!adapter.is_valid_address("t1nonsense"));
        assert!(!adapter.is_valid_address(""));
    }

    #[test]
    fn test_create_wallet_by_mnemonic() {
        let adapter = healthy_adapter();
        let mnemonic =
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

        let account = adapter.create_wallet_by_mnemonic(mnemonic, 0).unwrap();
        assert!(account.address.starts_with("f1"));
        assert_eq!(account.derivation_path.as_deref(), Some("m/44'/461'/0'/0/0"));

        // Deterministic, and index-sensitive
        let again = adapter.create_wallet_by_mnemonic(mnemonic, 0).unwrap();
        assert_eq!(account.address, again.address);
        let other = adapter.create_wallet_by_mnemonic(mnemonic, 1).unwrap();
        assert_ne!(account.address, other.address);
    }

    #[tokio::test]
    async fn test_get_balance_formats() {
        let adapter = healthy_adapter();
        let (from, _) = test_addresses(&adapter);

        let balance = adapter.get_balance(&from).await;
        assert_eq!(balance.raw, "1500000000000000000");
        assert_eq!(balance.formatted, "1.5");
        assert_eq!(balance.symbol, "FIL");
    }

    #[tokio::test]
    async fn test_get_balance_degrades_to_zero() {
        let state = Arc::new(MockState {
            fail_all: true,
            ..Default::default()
        });
        let adapter = adapter_with(
            state,
            MockExplorer {
                transfers: Vec::new(),
                fail: false,
            },
        );

        let balance = adapter.get_balance("f01234").await;
        assert_eq!(balance.raw, "0");
        assert_eq!(balance.formatted, "0");
    }

    #[tokio::test]
    async fn test_get_estimate_fee_combines_node_and_snapshot() {
        let adapter = healthy_adapter();
        let (from, to) = test_addresses(&adapter);

        let estimate = adapter
            .get_estimate_fee(&from, &to, "1000")
            .await
            .unwrap();

        // snapshot gas_used=1000000, base_fee=100; node limit=2000000, premium=10
        // => the worked example: 210000000
        assert_eq!(estimate.fee, "210000000");
        assert_eq!(estimate.estimate_gas.nonce, 42);
        assert_eq!(estimate.estimate_gas.gas_limit, 2_000_000);
        assert_eq!(estimate.estimate_gas.gas_fee_cap, "101737");
        assert_eq!(estimate.estimate_gas.gas_premium, "10");
    }

    #[tokio::test]
    async fn test_get_estimate_fee_propagates_failures() {
        let state = Arc::new(MockState {
            fail_all: true,
            ..Default::default()
        });
        let adapter = adapter_with(
            state,
            MockExplorer {
                transfers: Vec::new(),
                fail: false,
            },
        );
        let (from, to) = test_addresses(&adapter);

        let err = adapter.get_estimate_fee(&from, &to, "1000").await.unwrap_err();
        assert!(matches!(err, WalletError::Rpc { .. }));
    }

    #[tokio::test]
    async fn test_send_round_trips_gas_bundle() {
        let state = Arc::new(MockState::default());
        let adapter = adapter_with(
            state.clone(),
            MockExplorer {
                transfers: Vec::new(),
                fail: false,
            },
        );
        let (from, to) = test_addresses(&adapter);

        let estimate = adapter.get_estimate_fee(&from, &to, "1000").await.unwrap();
        let cid = adapter
            .send(&from, &to, "1000", TEST_KEY, &estimate.estimate_gas)
            .await
            .unwrap();
        assert_eq!(cid, "bafy2bzaceamockcid");

        // The constructed message must reproduce the estimate's parameters.
        let pushed = state.pushed.lock().unwrap();
        assert_eq!(pushed.len(), 1);
        let msg = &pushed[0]["Message"];
        assert_eq!(msg["Nonce"], 42);
        assert_eq!(msg["GasLimit"], 2_000_000);
        assert_eq!(msg["GasFeeCap"], "101737");
        assert_eq!(msg["GasPremium"], "10");
        assert_eq!(msg["Value"], "1000");
        assert_eq!(msg["From"], from.as_str());
        assert_eq!(msg["To"], to.as_str());
    }

    #[tokio::test]
    async fn test_send_rejects_bad_inputs() {
        let adapter = healthy_adapter();
        let (from, to) = test_addresses(&adapter);
        let gas = EstimateGas {
            nonce: 0,
            gas_limit: 1,
            gas_fee_cap: "1".to_string(),
            gas_premium: "1".to_string(),
        };

        let err = adapter
            .send("f1bogus", &to, "1", TEST_KEY, &gas)
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::Validation(_)));

        let err = adapter.send(&from, &to, "1", "nothex", &gas).await.unwrap_err();
        assert!(matches!(err, WalletError::Crypto(_)));
    }

    #[tokio::test]
    async fn test_get_transactions_reshapes_and_defaults() {
        let transfers = vec![
            ExplorerTransfer {
                cid: Some("bafy2bzacedylkg5am446z2hbfcgcbhs2gnyhjtkkwhlrhvnsyjdkieufh4k3df".to_string()),
                from: Some("f1sender".to_string()),
                to: Some("f1recipient".to_string()),
                value: Some("1000000000000000000".to_string()),
                timestamp: Some(1_700_000_000),
                exit_code: Some(0),
            },
            // Degenerate record: everything missing
            ExplorerTransfer::default(),
            // Indexer garbage: multi-byte characters where a CID belongs
            ExplorerTransfer {
                cid: Some("bafy2bzé\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}".to_string()),
                ..Default::default()
            },
        ];
        let adapter = adapter_with(
            Arc::new(MockState::default()),
            MockExplorer {
                transfers,
                fail: false,
            },
        );

        let records = adapter.get_transactions("f1sender", 0, 20).await;
        assert_eq!(records.len(), 3);

        let full = &records[0];
        assert_eq!(full.hash_display, "bafy2bza...k3df");
        assert_eq!(
            full.explorer_url,
            "https://filfox.info/en/message/bafy2bzacedylkg5am446z2hbfcgcbhs2gnyhjtkkwhlrhvnsyjdkieufh4k3df"
        );
        assert_eq!(full.amount_formatted, "1");
        assert_eq!(full.status, TransactionStatus::Confirmed);
        assert_eq!(full.timestamp, 1_700_000_000);

        let bare = &records[1];
        assert_eq!(bare.hash, "");
        assert_eq!(bare.hash_display, "");
        assert_eq!(bare.explorer_url, "https://filfox.info/en/message/");
        assert_eq!(bare.amount, "0");
        assert_eq!(bare.status, TransactionStatus::Failed);
        assert!(bare.timestamp > 0);
        assert_eq!(bare.from, "");
        assert_eq!(bare.to, "");

        // Multi-byte input must not panic and must truncate on char boundaries.
        let garbled = &records[2];
        assert_eq!(garbled.hash_display, "bafy2bzé...éééé");
        assert_eq!(garbled.status, TransactionStatus::Failed);
    }

    #[tokio::test]
    async fn test_get_transactions_absorbs_explorer_failure() {
        let adapter = adapter_with(
            Arc::new(MockState::default()),
            MockExplorer {
                transfers: Vec::new(),
                fail: true,
            },
        );
        let records = adapter.get_transactions("f1sender", 0, 20).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_wait_for_confirmation_confirms() {
        let adapter = healthy_adapter();
        let status = adapter
            .wait_for_confirmation("bafy2bzaceamockcid", 100, 10)
            .await
            .unwrap();
        assert_eq!(status, ConfirmationStatus::Confirmed);
    }

    #[test]
    fn test_truncate_hash() {
        assert_eq!(truncate_hash(""), "");
        assert_eq!(truncate_hash("bafyshort"), "bafyshort");
        assert_eq!(
            truncate_hash("bafy2bzacedylkg5am446z2hbfcgcbhs2gnyhjtkkwhlrhvnsyjdkieufh4k3df"),
            "bafy2bza...k3df"
        );
        // Multi-byte characters: short input comes back whole, long input
        // truncates without tripping a char-boundary panic.
        assert_eq!(truncate_hash("aééééééé"), "aééééééé");
        assert_eq!(truncate_hash("aéééééééééééééé"), "aééééééé...éééé");
    }
}
