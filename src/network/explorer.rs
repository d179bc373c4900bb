// fil-wallet-core/src/network/explorer.rs
//
// Filfox REST client: fee-market snapshots and per-address transfer history.
// The indexer's schema is treated as a black box; every field we do not
// control is optional on our side.

use crate::error::{WalletError, WalletResult};
use crate::network::models::{ExplorerFeeSnapshot, ExplorerTransfer};
use crate::network::traits::ExplorerApi;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const EXPLORER_TIMEOUT: Duration = Duration::from_secs(20);

pub struct FilfoxExplorer {
    /// REST API base, e.g. "https://filfox.info/api/v1".
    api_base: String,
    /// Web UI base for deep links, e.g. "https://filfox.info/en".
    web_base: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransfersPage {
    #[serde(default)]
    transfers: Vec<ExplorerTransfer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BaseFeePoint {
    base_fee: Option<String>,
    gas_used: Option<String>,
}

impl FilfoxExplorer {
    pub fn new(api_base: impl Into<String>, web_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            web_base: web_base.into(),
            http: reqwest::Client::new(),
        }
    }

    fn explorer_error(&self, status: Option<u16>, message: impl Into<String>) -> WalletError {
        WalletError::Rpc {
            endpoint: self.api_base.clone(),
            status,
            message: message.into(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> WalletResult<T> {
        let response = self
            .http
            .get(url)
            .timeout(EXPLORER_TIMEOUT)
            .send()
            .await
            .map_err(|e| self.explorer_error(e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(
                self.explorer_error(Some(status.as_u16()), format!("HTTP {} from {}", status, url))
            );
        }

        response
            .json()
            .await
            .map_err(|e| self.explorer_error(None, format!("malformed explorer response: {}", e)))
    }
}

#[async_trait]
impl ExplorerApi for FilfoxExplorer {
    async fn fee_market_snapshot(&self) -> WalletResult<ExplorerFeeSnapshot> {
        let url = format!("{}/stats/base-fee?samples=1", self.api_base);
        let points: Vec<BaseFeePoint> = self.get_json(&url).await?;

        let latest = points
            .into_iter()
            .next()
            .ok_or_else(|| self.explorer_error(None, "empty fee-market snapshot"))?;

        Ok(ExplorerFeeSnapshot {
            base_fee: latest.base_fee.unwrap_or_else(|| "0".to_string()),
            gas_used: latest.gas_used.unwrap_or_else(|| "0".to_string()),
        })
    }

    async fn transfers(
        &self,
        address: &str,
        page: u32,
        limit: u32,
    ) -> WalletResult<Vec<ExplorerTransfer>> {
        let url = format!(
            "{}/address/{}/transfers?page={}&pageSize={}",
            self.api_base, address, page, limit
        );
        let page: TransfersPage = self.get_json(&url).await?;
        Ok(page.transfers)
    }

    fn message_url(&self, cid: &str) -> String {
        format!("{}/message/{}", self.web_base, cid)
    }
}
