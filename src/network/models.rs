// fil-wallet-core/src/network/models.rs
//
// Data Models - Filecoin Chain Adapter
//
// All structs are:
// - Serialize/Deserialize friendly (JSON for the host application / FFI)
// - String-typed for chain amounts (atto-denominated values overflow u64)
// - Clone + Debug for flexibility

use serde::{Deserialize, Serialize};

// =============================================================================
// NETWORK MODE
// =============================================================================

/// Mainnet vs testnet. Decides the address prefix (`f` vs `t`) and which
/// endpoint/explorer presets apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    Mainnet,
    Testnet,
}

impl NetworkMode {
    /// Address prefix character for this mode.
    #[inline]
    pub const fn address_prefix(self) -> char {
        match self {
            NetworkMode::Mainnet => 'f',
            NetworkMode::Testnet => 't',
        }
    }
}

// =============================================================================
// BALANCE
// =============================================================================

/// Native token balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Raw balance in the smallest unit (string to avoid overflow).
    pub raw: String,
    /// Balance formatted with decimals (e.g., "1.5").
    pub formatted: String,
    /// Symbol (e.g., "FIL").
    pub symbol: String,
    /// Number of decimals.
    pub decimals: u8,
}

impl Balance {
    /// Build a Balance from a raw value and decimals.
    pub fn new(raw: impl Into<String>, decimals: u8, symbol: impl Into<String>) -> Self {
        let raw_str = raw.into();
        let formatted = Self::format_balance(&raw_str, decimals);
        Self {
            raw: raw_str,
            formatted,
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Zero-valued Balance.
    pub fn zero(symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            raw: "0".to_string(),
            formatted: "0".to_string(),
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Format a raw integer string into a human-readable decimal string.
    fn format_balance(raw: &str, decimals: u8) -> String {
        if decimals == 0 || raw == "0" || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return raw.to_string();
        }

        let raw_len = raw.len();
        let decimals_usize = decimals as usize;

        if raw_len <= decimals_usize {
            // Value below 1 (e.g., 0.001)
            let padding = decimals_usize - raw_len;
            let decimal_part = format!("{}{}", "0".repeat(padding), raw);
            let trimmed = decimal_part.trim_end_matches('0');
            if trimmed.is_empty() {
                "0".to_string()
            } else {
                format!("0.{}", trimmed)
            }
        } else {
            let integer_part = &raw[..raw_len - decimals_usize];
            let decimal_part = &raw[raw_len - decimals_usize..];
            let trimmed_decimal = decimal_part.trim_end_matches('0');
            if trimmed_decimal.is_empty() {
                integer_part.to_string()
            } else {
                format!("{}.{}", integer_part, trimmed_decimal)
            }
        }
    }
}

// =============================================================================
// FEE ESTIMATION
// =============================================================================

/// Fee-market parameters for one estimate. All values are non-negative
/// integers encoded as decimal strings; on congested networks they exceed the
/// 64-bit-safe range, so no numeric narrowing happens anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasParams {
    pub gas_used: String,
    pub gas_limit: String,
    pub base_fee: String,
    pub gas_premium: String,
}

/// The exact gas bundle a subsequent `send` must reuse verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateGas {
    pub nonce: u64,
    pub gas_limit: i64,
    pub gas_fee_cap: String,
    pub gas_premium: String,
}

/// Result of `get_estimate_fee`: the human-readable total fee plus the gas
/// bundle required to construct the send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEstimate {
    /// Total fee in attoFIL (decimal string).
    pub fee: String,
    pub estimate_gas: EstimateGas,
}

/// Gas values returned by the node for a draft message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasSpec {
    pub gas_limit: i64,
    pub gas_fee_cap: String,
    pub gas_premium: String,
}

// =============================================================================
// MESSAGES
// =============================================================================

/// Draft message handed to the node for gas estimation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePrototype {
    pub from: String,
    pub to: String,
    /// Transfer value in attoFIL (decimal string).
    pub value: String,
    pub nonce: u64,
}

/// Fully-specified transfer message, ready for signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedMessage {
    pub version: u64,
    pub to: String,
    pub from: String,
    pub nonce: u64,
    /// attoFIL, decimal string.
    pub value: String,
    pub gas_limit: i64,
    pub gas_fee_cap: String,
    pub gas_premium: String,
    pub method: u64,
}

impl UnsignedMessage {
    /// Build a method-0 transfer from its parts and a prior gas estimate.
    /// The gas bundle is copied verbatim; the send path never re-estimates.
    pub fn transfer(from: &str, to: &str, value: &str, gas: &EstimateGas) -> Self {
        Self {
            version: 0,
            to: to.to_string(),
            from: from.to_string(),
            nonce: gas.nonce,
            value: value.to_string(),
            gas_limit: gas.gas_limit,
            gas_fee_cap: gas.gas_fee_cap.clone(),
            gas_premium: gas.gas_premium.clone(),
            method: 0,
        }
    }
}

/// Receipt subset returned by the blocking inclusion wait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageLookup {
    /// 0 = executed successfully; anything else is an on-chain failure.
    pub exit_code: i64,
    pub gas_used: i64,
    /// Epoch the message landed in.
    pub height: i64,
}

// =============================================================================
// CONFIRMATION
// =============================================================================

/// Terminal outcome of a bounded confirmation wait. A message that failed
/// on-chain surfaces as `WalletError::MessageFailed` instead of a variant
/// here, so callers cannot mistake it for a retryable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationStatus {
    /// Included with exit code 0.
    Confirmed,
    /// The timeout elapsed before inclusion. Valid result; re-poll later.
    Pending,
}

// =============================================================================
// TRANSACTION HISTORY
// =============================================================================

/// Transaction status for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

/// One reshaped history entry, UI-facing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Full message CID. Empty string when the explorer omitted it.
    pub hash: String,
    /// Truncated display form ("bafy2bz...k3df"); empty when no hash.
    pub hash_display: String,
    /// Explorer deep link for this message.
    pub explorer_url: String,
    /// Raw amount in attoFIL.
    pub amount: String,
    /// Human-readable amount in FIL.
    pub amount_formatted: String,
    pub status: TransactionStatus,
    /// Unix seconds. Substituted with the current time when absent.
    pub timestamp: u64,
    pub from: String,
    pub to: String,
}

// =============================================================================
// EXPLORER RESPONSES
// =============================================================================

/// One raw transfer record from the block explorer. Every field is optional:
/// the indexer is free to omit any of them and the adapter substitutes
/// defaults instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerTransfer {
    pub cid: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub value: Option<String>,
    pub timestamp: Option<u64>,
    /// Explorer-side exit code; 0 means success.
    pub exit_code: Option<i64>,
}

/// Network-wide fee-market snapshot from the explorer. Possibly stale;
/// treated as opaque input to the fee estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerFeeSnapshot {
    pub base_fee: String,
    pub gas_used: String,
}

/// Account info returned by wallet-creation operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub address: String,
    /// Derivation path, when the account came from a mnemonic.
    pub derivation_path: Option<String>,
    pub network: NetworkMode,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_formatting() {
        // 1 FIL = 10^18 attoFIL
        let balance = Balance::new("1000000000000000000", 18, "FIL");
        assert_eq!(balance.formatted, "1");

        let balance = Balance::new("1500000000000000000", 18, "FIL");
        assert_eq!(balance.formatted, "1.5");

        let balance = Balance::new("1000000000000000", 18, "FIL");
        assert_eq!(balance.formatted, "0.001");
    }

    #[test]
    fn test_balance_zero() {
        let balance = Balance::zero("FIL", 18);
        assert_eq!(balance.raw, "0");
        assert_eq!(balance.formatted, "0");
    }

    #[test]
    fn test_transfer_copies_gas_bundle_verbatim() {
        let gas = EstimateGas {
            nonce: 7,
            gas_limit: 2_000_000,
            gas_fee_cap: "101737".to_string(),
            gas_premium: "99582".to_string(),
        };
        let msg = UnsignedMessage::transfer("f1from", "f1to", "5000", &gas);
        assert_eq!(msg.nonce, 7);
        assert_eq!(msg.gas_limit, 2_000_000);
        assert_eq!(msg.gas_fee_cap, "101737");
        assert_eq!(msg.gas_premium, "99582");
        assert_eq!(msg.method, 0);
        assert_eq!(msg.version, 0);
    }

    #[test]
    fn test_serialization_camel_case() {
        let gas = EstimateGas {
            nonce: 1,
            gas_limit: 10,
            gas_fee_cap: "2".to_string(),
            gas_premium: "3".to_string(),
        };
        let json = serde_json::to_string(&gas).unwrap();
        assert!(json.contains("gasLimit"));
        assert!(json.contains("gasFeeCap"));
        assert!(json.contains("gasPremium"));
    }

    #[test]
    fn test_explorer_transfer_tolerates_missing_fields() {
        let raw = r#"{"cid":"bafy2bzacea"}"#;
        let t: ExplorerTransfer = serde_json::from_str(raw).unwrap();
        assert_eq!(t.cid.as_deref(), Some("bafy2bzacea"));
        assert!(t.from.is_none());
        assert!(t.exit_code.is_none());

        let empty: ExplorerTransfer = serde_json::from_str("{}").unwrap();
        assert!(empty.cid.is_none());
    }
}
