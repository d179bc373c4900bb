// fil-wallet-core/src/chains/filecoin/confirm.rs
//
// Confirmation Waiter - bounded-time wait for message inclusion.
//
// Races the node's blocking inclusion wait against a timer. The loser is
// abandoned, not cancelled: the underlying network call exposes no
// cancellation primitive, so cleanup of an in-flight request is left to the
// connection stack. Accepted limitation.

use crate::chains::filecoin::failover::FailoverExecutor;
use crate::error::{WalletError, WalletResult};
use crate::network::models::ConfirmationStatus;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Wait up to `poll_interval_ms * max_retries` for `cid` to land on-chain.
///
/// - Inclusion with exit code 0 => `Confirmed`
/// - Inclusion with a nonzero exit code => `WalletError::MessageFailed`
/// - Deadline elapsed first => `Pending` (valid terminal result; re-poll)
/// - Transient server error (HTTP 5xx) => `Pending`: the node may simply not
///   have the message indexed yet. Heuristic inherited from the fee market's
///   public-endpoint reality, kept as documented behavior.
/// - Any other error propagates.
pub async fn wait_for_confirmation(
    executor: &FailoverExecutor,
    cid: &str,
    poll_interval_ms: u64,
    max_retries: u32,
) -> WalletResult<ConfirmationStatus> {
    let deadline = Duration::from_millis(poll_interval_ms.saturating_mul(max_retries as u64));

    let wait = executor.execute(
        |client| {
            let cid = cid.to_string();
            async move { client.state_wait_msg(&cid).await }
        },
        None,
    );

    tokio::select! {
        lookup = wait => match lookup {
            Ok(receipt) if receipt.exit_code == 0 => {
                debug!(cid = %cid, height = receipt.height, "message confirmed");
                Ok(ConfirmationStatus::Confirmed)
            }
            Ok(receipt) => Err(WalletError::MessageFailed {
                cid: cid.to_string(),
                exit_code: receipt.exit_code,
            }),
            Err(e) if e.is_transient() => {
                warn!(cid = %cid, error = %e, "transient server error during wait, reporting pending");
                Ok(ConfirmationStatus::Pending)
            }
            Err(e) => Err(e),
        },
        _ = sleep(deadline) => {
            debug!(cid = %cid, timeout_ms = deadline.as_millis() as u64, "confirmation window elapsed");
            Ok(ConfirmationStatus::Pending)
        }
    }
}
