// fil-wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! Fundamental key-handling operations for the Filecoin adapter:
//!
//! - **Mnemonic Generation**: BIP-39 compliant phrases (12/24 words) via [`WalletMnemonic`].
//! - **Key Derivation**: BIP-32 secp256k1 derivation via [`Secp256k1Deriver`].
//! - **Derivation Paths**: SLIP-44 Filecoin path builders via [`DerivationPaths`].

pub mod key_deriver;
pub mod mnemonic;
pub mod paths;

// Re-exports for cleaner API access
pub use key_deriver::Secp256k1Deriver;
pub use mnemonic::{WalletMnemonic, WordCount};
pub use paths::DerivationPaths;
