// fil-wallet-core/src/crypto/paths.rs
//
// Derivation Paths Module
// BIP-44 (Purpose), SLIP-44 (Coin Types)

/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    pub const FILECOIN: u32 = 461;
}

/// Pre-built derivation paths for this adapter.
///
/// # Conventions
/// - BIP-44: `m/44'/coin'/account'/change/index` (secp256k1)
pub struct DerivationPaths;

impl DerivationPaths {
    /// Filecoin account 0, index 0.
    pub const FILECOIN_0: &'static str = "m/44'/461'/0'/0/0";

    /// Filecoin path with custom address index.
    #[inline]
    pub fn filecoin(index: u32) -> String {
        format!("m/44'/{}'/0'/0/{}", coin_type::FILECOIN, index)
    }

    /// Filecoin path with custom account & index (multi-account).
    #[inline]
    pub fn filecoin_account(account: u32, index: u32) -> String {
        format!("m/44'/{}'/{}'/0/{}", coin_type::FILECOIN, account, index)
    }
}
