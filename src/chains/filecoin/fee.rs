// fil-wallet-core/src/chains/filecoin/fee.rs
//
// Fee Estimator - Filecoin gas-market total-fee formula.
//
// Pure, deterministic, no I/O. All arithmetic runs over arbitrary-precision
// integers: gas and fee values exceed the 64-bit-safe range on congested
// networks, and floating point would lose precision.

use crate::error::{WalletError, WalletResult};
use crate::network::models::GasParams;
use num_bigint::BigInt;
use num_traits::Zero;

fn parse_input(name: &str, value: &str) -> WalletResult<BigInt> {
    let parsed: BigInt = value
        .trim()
        .parse()
        .map_err(|_| WalletError::InvalidInput(format!("{} is not an integer: '{}'", name, value)))?;
    if parsed < BigInt::zero() {
        return Err(WalletError::InvalidInput(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    Ok(parsed)
}

/// Compute the total transaction fee from the fee-market snapshot
/// (`gas_used`, `base_fee`) and the node's estimate (`gas_limit`,
/// `gas_premium`).
///
/// ```text
/// over_estimation = gas_limit - gas_used * 1.1
/// burn            = over_estimation > 0
///                     ? over_estimation * (gas_limit - gas_used) / gas_used
///                     : 0
/// total_fee       = gas_used * base_fee
///                   + gas_limit * gas_premium
///                   + burn * base_fee
/// ```
///
/// The burn term models the protocol's penalty for overestimating the gas
/// limit relative to actual usage, with a 10% tolerance band. This is a fixed
/// protocol-level economic rule, not a tunable.
///
/// # Errors
/// `InvalidInput` when `gas_used` is zero (the burn division is undefined),
/// or when any input is negative or not a decimal integer.
pub fn estimate_total_fee(params: &GasParams) -> WalletResult<String> {
    let gas_used = parse_input("gasUsed", &params.gas_used)?;
    let gas_limit = parse_input("gasLimit", &params.gas_limit)?;
    let base_fee = parse_input("baseFee", &params.base_fee)?;
    let gas_premium = parse_input("gasPremium", &params.gas_premium)?;

    if gas_used.is_zero() {
        return Err(WalletError::InvalidInput(
            "gasUsed must be positive: over-estimation burn is undefined at zero".to_string(),
        ));
    }

    // gas_used * 1.1 in integer arithmetic
    let over_estimation = &gas_limit - (&gas_used * 11u32) / 10u32;

    let burn = if over_estimation > BigInt::zero() {
        over_estimation * (&gas_limit - &gas_used) / &gas_used
    } else {
        BigInt::zero()
    };

    let total_fee = &gas_used * &base_fee + &gas_limit * &gas_premium + burn * &base_fee;

    Ok(total_fee.to_string())
}
