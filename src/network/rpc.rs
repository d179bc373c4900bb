// fil-wallet-core/src/network/rpc.rs
//
// Lotus-compatible JSON-RPC 2.0 client over HTTP. One `LotusClient` is bound
// to one endpoint for one failover attempt; `HttpConnectionFactory` builds
// them on demand.

use crate::error::{WalletError, WalletResult};
use crate::network::models::{GasSpec, MessageLookup, MessagePrototype};
use crate::network::traits::{ConnectionFactory, FilecoinRpc};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Per-request timeout for every call except the blocking inclusion wait.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Tipset confidence passed to StateWaitMsg.
const WAIT_CONFIDENCE: u64 = 1;

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// JSON-RPC client for one Filecoin endpoint.
pub struct LotusClient {
    endpoint: String,
    http: reqwest::Client,
}

impl LotusClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            // No client-level timeout: StateWaitMsg must be able to block
            // indefinitely. Bounded calls set a per-request timeout instead.
            http: reqwest::Client::new(),
        }
    }

    fn rpc_error(&self, status: Option<u16>, message: impl Into<String>) -> WalletError {
        WalletError::Rpc {
            endpoint: self.endpoint.clone(),
            status,
            message: message.into(),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
        bounded: bool,
    ) -> WalletResult<T> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let mut request = self.http.post(&self.endpoint).json(&body);
        if bounded {
            request = request.timeout(REQUEST_TIMEOUT);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.rpc_error(e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.rpc_error(
                Some(status.as_u16()),
                format!("{} returned HTTP {}", method, status),
            ));
        }

        let envelope: RpcEnvelope = response
            .json()
            .await
            .map_err(|e| self.rpc_error(None, format!("malformed {} response: {}", method, e)))?;

        if let Some(err) = envelope.error {
            return Err(self.rpc_error(None, format!("{} [{}]: {}", method, err.code, err.message)));
        }

        let result = envelope
            .result
            .ok_or_else(|| self.rpc_error(None, format!("{}: empty result", method)))?;

        serde_json::from_value(result)
            .map_err(|e| self.rpc_error(None, format!("unexpected {} result shape: {}", method, e)))
    }
}

/// Lotus renders messages with PascalCase keys on the wire.
fn lotus_message(msg: &MessagePrototype) -> Value {
    json!({
        "Version": 0,
        "To": msg.to,
        "From": msg.from,
        "Nonce": msg.nonce,
        "Value": msg.value,
        "GasLimit": 0,
        "GasFeeCap": "0",
        "GasPremium": "0",
        "Method": 0,
        "Params": "",
    })
}

#[derive(Debug, Deserialize)]
struct LotusGasMessage {
    #[serde(rename = "GasLimit")]
    gas_limit: i64,
    #[serde(rename = "GasFeeCap")]
    gas_fee_cap: String,
    #[serde(rename = "GasPremium")]
    gas_premium: String,
}

#[derive(Debug, Deserialize)]
struct LotusCid {
    #[serde(rename = "/")]
    cid: String,
}

#[derive(Debug, Deserialize)]
struct LotusReceipt {
    #[serde(rename = "ExitCode")]
    exit_code: i64,
    #[serde(rename = "GasUsed")]
    gas_used: i64,
}

#[derive(Debug, Deserialize)]
struct LotusMsgLookup {
    #[serde(rename = "Receipt")]
    receipt: LotusReceipt,
    #[serde(rename = "Height")]
    height: i64,
}

#[async_trait]
impl FilecoinRpc for LotusClient {
    async fn wallet_balance(&self, address: &str) -> WalletResult<String> {
        self.call("Filecoin.WalletBalance", json!([address]), true)
            .await
    }

    async fn mpool_get_nonce(&self, address: &str) -> WalletResult<u64> {
        self.call("Filecoin.MpoolGetNonce", json!([address]), true)
            .await
    }

    async fn gas_estimate_message_gas(&self, msg: &MessagePrototype) -> WalletResult<GasSpec> {
        let estimated: LotusGasMessage = self
            .call(
                "Filecoin.GasEstimateMessageGas",
                json!([lotus_message(msg), { "MaxFee": "0" }, null]),
                true,
            )
            .await?;

        Ok(GasSpec {
            gas_limit: estimated.gas_limit,
            gas_fee_cap: estimated.gas_fee_cap,
            gas_premium: estimated.gas_premium,
        })
    }

    async fn push_message(&self, signed_json: &Value) -> WalletResult<String> {
        let cid: LotusCid = self
            .call("Filecoin.MpoolPush", json!([signed_json]), true)
            .await?;
        Ok(cid.cid)
    }

    async fn state_wait_msg(&self, cid: &str) -> WalletResult<MessageLookup> {
        let lookup: LotusMsgLookup = self
            .call(
                "Filecoin.StateWaitMsg",
                json!([{ "/": cid }, WAIT_CONFIDENCE]),
                false,
            )
            .await?;

        Ok(MessageLookup {
            exit_code: lookup.receipt.exit_code,
            gas_used: lookup.receipt.gas_used,
            height: lookup.height,
        })
    }
}

/// Default factory: a brand-new HTTP client stack per endpoint attempt.
pub struct HttpConnectionFactory;

impl ConnectionFactory for HttpConnectionFactory {
    fn connect(&self, endpoint: &str) -> WalletResult<Arc<dyn FilecoinRpc>> {
        Ok(Arc::new(LotusClient::new(endpoint)))
    }
}
