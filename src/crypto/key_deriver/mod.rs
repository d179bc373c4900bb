// fil-wallet-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine
//
// Filecoin accounts are secp256k1 over standard BIP-32 derivation; the seed
// comes from a BIP-39 mnemonic.

pub mod secp256k1;

pub use secp256k1::Secp256k1Deriver;
