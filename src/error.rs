use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("RPC Error [{endpoint}]: {message}")]
    Rpc {
        endpoint: String,
        /// HTTP status of the failing response, when one was received at all.
        status: Option<u16>,
        message: String,
    },

    #[error("Message {cid} failed on-chain with exit code {exit_code}")]
    MessageFailed { cid: String, exit_code: i64 },
}

impl WalletError {
    /// Server-side errors (HTTP 5xx) are treated as transient: the node may
    /// simply not have the message indexed yet. Heuristic, not a guarantee.
    pub fn is_transient(&self) -> bool {
        matches!(self, WalletError::Rpc { status: Some(s), .. } if *s >= 500)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid word count: {0}. Expected 12 or 24 words.")]
    InvalidWordCount(usize),

    #[error("Checksum validation failed.")]
    ChecksumFailed,

    #[error("BIP39 internal error: {0}")]
    Bip39Error(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let server = WalletError::Rpc {
            endpoint: "https://node".to_string(),
            status: Some(502),
            message: "bad gateway".to_string(),
        };
        assert!(server.is_transient());

        let client = WalletError::Rpc {
            endpoint: "https://node".to_string(),
            status: Some(404),
            message: "not found".to_string(),
        };
        assert!(!client.is_transient());

        let no_status = WalletError::Rpc {
            endpoint: "https://node".to_string(),
            status: None,
            message: "connect timeout".to_string(),
        };
        assert!(!no_status.is_transient());

        assert!(!WalletError::Validation("x".to_string()).is_transient());
    }
}
