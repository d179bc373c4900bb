// fil-wallet-core/src/chains/filecoin/address.rs
//
// Filecoin Address Module - secp256k1 (f1/t1) Derivation & Validation
// blake2b-160 payload, blake2b-32 checksum, lowercase base32 (RFC 4648)

use crate::error::{CryptoError, WalletError, WalletResult};
use crate::network::models::NetworkMode;
use blake2::digest::{Update, VariableOutput};
use blake2::Blake2bVar;
use data_encoding::BASE32_NOPAD;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;
use zeroize::Zeroizing;

const CHECKSUM_LEN: usize = 4;
const SECP256K1_PAYLOAD_LEN: usize = 20;
const BLS_PAYLOAD_LEN: usize = 48;

/// Filecoin Address Generator
///
/// # Flow: Private Key (32B) -> Public Key (uncompressed 65B) -> blake2b-160 -> payload (20B)
///
/// # Security
/// - No Storage: this module never retains private keys
/// - Zeroizing: key material passed in is zeroed by the caller's wrapper
pub struct FilecoinAddress;

impl FilecoinAddress {
    // =========================================================================
    // DERIVATION
    // =========================================================================

    /// Derive the 20-byte secp256k1 address payload from a private key.
    pub fn derive_payload(priv_key: &Zeroizing<Vec<u8>>) -> WalletResult<[u8; 20]> {
        let secret_key = SecretKey::from_slice(priv_key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid secp256k1 private key: {}",
                e
            )))
        })?;

        let public_key = secret_key.public_key();
        let encoded = public_key.to_encoded_point(false);

        let mut payload = [0u8; SECP256K1_PAYLOAD_LEN];
        blake2b(encoded.as_bytes(), &mut payload)?;
        Ok(payload)
    }

    /// Derive the address string (`f1...` / `t1...` per network mode).
    pub fn derive(priv_key: &Zeroizing<Vec<u8>>, mode: NetworkMode) -> WalletResult<String> {
        let payload = Self::derive_payload(priv_key)?;
        Self::encode(1, &payload, mode)
    }

    /// Render protocol + payload into the textual form.
    pub fn encode(protocol: u8, payload: &[u8], mode: NetworkMode) -> WalletResult<String> {
        let mut checksum_input = Vec::with_capacity(1 + payload.len());
        checksum_input.push(protocol);
        checksum_input.extend_from_slice(payload);

        let mut checksum = [0u8; CHECKSUM_LEN];
        blake2b(&checksum_input, &mut checksum)?;

        let mut body = payload.to_vec();
        body.extend_from_slice(&checksum);

        Ok(format!(
            "{}{}{}",
            mode.address_prefix(),
            protocol,
            BASE32_NOPAD.encode(&body).to_ascii_lowercase()
        ))
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Whether `address` is a well-formed Filecoin address for `mode`.
    ///
    /// Accepts ID (0), secp256k1 (1), actor (2), and BLS (3) protocols.
    /// All failures are swallowed into `false`; validation never errors.
    pub fn is_valid(address: &str, mode: NetworkMode) -> bool {
        Self::parse(address, mode).is_ok()
    }

    /// Parse into (protocol, payload bytes). ID addresses return the varint
    /// body as payload.
    pub fn parse(address: &str, mode: NetworkMode) -> WalletResult<(u8, Vec<u8>)> {
        let invalid = |reason: &str| WalletError::Validation(format!("{}: '{}'", reason, address));

        if !address.is_ascii() {
            return Err(invalid("address must be ASCII"));
        }

        let mut chars = address.chars();
        let prefix = chars.next().ok_or_else(|| invalid("empty address"))?;
        if prefix != mode.address_prefix() {
            return Err(invalid("wrong network prefix"));
        }

        let protocol = match chars.next() {
            Some('0') => 0u8,
            Some('1') => 1,
            Some('2') => 2,
            Some('3') => 3,
            _ => return Err(invalid("unknown address protocol")),
        };

        let body = &address[2..];
        if protocol == 0 {
            // ID address: plain decimal actor ID, must fit u64.
            if body.is_empty() || body.parse::<u64>().is_err() {
                return Err(invalid("malformed ID address"));
            }
            return Ok((0, body.as_bytes().to_vec()));
        }

        // Textual form is lowercase by definition.
        if body.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(invalid("address must be lowercase"));
        }

        let decoded = BASE32_NOPAD
            .decode(body.to_ascii_uppercase().as_bytes())
            .map_err(|_| invalid("invalid base32 body"))?;

        if decoded.len() < CHECKSUM_LEN {
            return Err(invalid("address body too short"));
        }
        let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);

        let expected_len = match protocol {
            1 | 2 => SECP256K1_PAYLOAD_LEN,
            3 => BLS_PAYLOAD_LEN,
            _ => unreachable!(),
        };
        if payload.len() != expected_len {
            return Err(invalid("wrong payload length"));
        }

        let mut checksum_input = Vec::with_capacity(1 + payload.len());
        checksum_input.push(protocol);
        checksum_input.extend_from_slice(payload);
        let mut expected = [0u8; CHECKSUM_LEN];
        blake2b(&checksum_input, &mut expected)?;

        if checksum != expected {
            return Err(invalid("checksum mismatch"));
        }

        Ok((protocol, payload.to_vec()))
    }

    /// Binary form used inside signed messages: protocol byte followed by the
    /// payload (LEB128 actor ID for protocol 0).
    pub fn to_bytes(address: &str, mode: NetworkMode) -> WalletResult<Vec<u8>> {
        let (protocol, payload) = Self::parse(address, mode)?;
        let mut bytes = vec![protocol];
        if protocol == 0 {
            let id: u64 = String::from_utf8_lossy(&payload).parse().map_err(|_| {
                WalletError::Validation(format!("malformed ID address: '{}'", address))
            })?;
            bytes.extend_from_slice(&unsigned_leb128(id));
        } else {
            bytes.extend_from_slice(&payload);
        }
        Ok(bytes)
    }
}

fn blake2b(data: &[u8], out: &mut [u8]) -> WalletResult<()> {
    let mut hasher = Blake2bVar::new(out.len())
        .map_err(|e| WalletError::Crypto(CryptoError::DerivationFailed(e.to_string())))?;
    hasher.update(data);
    hasher
        .finalize_variable(out)
        .map_err(|e| WalletError::Crypto(CryptoError::DerivationFailed(e.to_string())))
}

fn unsigned_leb128(mut value: u64) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            return out;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
