// fil-wallet-core/src/chains/filecoin/failover.rs
//
// Failover Executor - sequential exhaustive retry across the endpoint pool.
//
// Public RPC endpoints for minority chains are individually flaky; trying
// each one in order with a terminal default is the simplest policy that
// tolerates single-endpoint outages. Only one endpoint's answer is ever
// trusted per call, so there is no quorum or result comparison.

use crate::error::{WalletError, WalletResult};
use crate::network::traits::{ConnectionFactory, FilecoinRpc};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Runs one unit of work against the endpoint pool.
///
/// Holds no state between calls; attempt bookkeeping lives on the stack of a
/// single `execute` invocation.
pub struct FailoverExecutor {
    endpoints: Vec<String>,
    factory: Arc<dyn ConnectionFactory>,
}

impl FailoverExecutor {
    pub fn new(endpoints: Vec<String>, factory: Arc<dyn ConnectionFactory>) -> Self {
        Self { endpoints, factory }
    }

    /// Try `operation` against each endpoint in fixed order until one
    /// succeeds.
    ///
    /// Each attempt gets an entirely fresh client from the factory; no
    /// connection is reused across attempts or across calls. Attempts are
    /// strictly sequential - a later endpoint is only contacted after the
    /// prior one has definitively failed, which bounds worst-case latency and
    /// avoids submitting the same message to two nodes at once.
    ///
    /// On exhaustion: returns `fallback` when one was supplied (silent
    /// degradation for read paths), otherwise the last endpoint's error.
    /// There is no backoff and no retry beyond this single pass.
    pub async fn execute<T, F, Fut>(&self, operation: F, fallback: Option<T>) -> WalletResult<T>
    where
        F: Fn(Arc<dyn FilecoinRpc>) -> Fut,
        Fut: Future<Output = WalletResult<T>>,
    {
        let mut last_error: Option<WalletError> = None;

        for (index, endpoint) in self.endpoints.iter().enumerate() {
            let client = match self.factory.connect(endpoint) {
                Ok(client) => client,
                Err(e) => {
                    warn!(endpoint = %endpoint, error = %e, "failed to construct RPC client");
                    last_error = Some(e);
                    continue;
                }
            };

            match operation(client).await {
                Ok(result) => {
                    if index > 0 {
                        debug!(endpoint = %endpoint, attempt = index + 1, "operation succeeded after failover");
                    }
                    return Ok(result);
                }
                Err(e) => {
                    warn!(endpoint = %endpoint, error = %e, "RPC operation failed, trying next endpoint");
                    last_error = Some(e);
                }
            }
        }

        if let Some(value) = fallback {
            return Ok(value);
        }

        Err(last_error.unwrap_or_else(|| {
            WalletError::Validation("endpoint pool is empty".to_string())
        }))
    }
}
