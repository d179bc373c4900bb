// fil-wallet-core/src/crypto/mnemonic.rs
//
// Mnemonic Module - BIP-39 Phrase Handling
// BIP-39 (Mnemonic), PBKDF2-HMAC-SHA512 (Seed Derivation)

use crate::error::{MnemonicError, WalletResult};
use bip39::Mnemonic;
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Supported word counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    Twelve = 12,
    /// 24 words (256-bit entropy)
    TwentyFour = 24,
}

impl WordCount {
    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        match self {
            WordCount::Twelve => 16,
            WordCount::TwentyFour => 32,
        }
    }
}

/// Wallet Mnemonic - BIP-39 phrase with zeroizing storage.
///
/// # Security
/// - **ZeroizeOnDrop**: the phrase is overwritten when the struct drops
/// - **CSPRNG**: entropy comes from `OsRng`
/// - **No Debug Leak**: custom Debug impl never shows the phrase
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletMnemonic {
    phrase: String,
    word_count: usize,
}

impl std::fmt::Debug for WalletMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletMnemonic")
            .field("word_count", &self.word_count)
            .finish_non_exhaustive()
    }
}

impl WalletMnemonic {
    /// Generate a fresh mnemonic with OS-level entropy.
    pub fn generate(word_count: WordCount) -> WalletResult<Self> {
        let mut entropy = Zeroizing::new(vec![0u8; word_count.entropy_bytes()]);
        OsRng.fill_bytes(&mut entropy);

        let mnemonic = Mnemonic::from_entropy(&entropy)
            .map_err(|e| MnemonicError::Bip39Error(e.to_string()))?;

        Ok(Self {
            phrase: mnemonic.to_string(),
            word_count: word_count as usize,
        })
    }

    /// Parse and validate an existing phrase (word count, wordlist, checksum).
    pub fn from_phrase(phrase: &str) -> WalletResult<Self> {
        let normalized = phrase.trim();
        let words = normalized.split_whitespace().count();
        if words != 12 && words != 24 {
            return Err(MnemonicError::InvalidWordCount(words).into());
        }

        let mnemonic = Mnemonic::parse_normalized(normalized).map_err(|e| match e {
            bip39::Error::InvalidChecksum => MnemonicError::ChecksumFailed,
            bip39::Error::BadWordCount(n) => MnemonicError::InvalidWordCount(n),
            other => MnemonicError::Bip39Error(other.to_string()),
        })?;

        Ok(Self {
            phrase: mnemonic.to_string(),
            word_count: words,
        })
    }

    /// Derive the 64-byte BIP-39 seed.
    pub fn to_seed(&self, passphrase: &str) -> Zeroizing<[u8; 64]> {
        // Phrase was validated on construction; parsing cannot fail here.
        let mnemonic = Mnemonic::parse_normalized(&self.phrase)
            .expect("validated phrase must reparse");
        Zeroizing::new(mnemonic.to_seed(passphrase))
    }

    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

// =============================================================================
// TESTS
// =============================================================================
