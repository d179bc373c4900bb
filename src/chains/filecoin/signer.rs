// fil-wallet-core/src/chains/filecoin/signer.rs
//
// Filecoin Signer Module - Offline Message Signing
// DAG-CBOR message tuple -> CIDv1 (dag-cbor, blake2b-256) -> recoverable secp256k1

use crate::chains::filecoin::address::FilecoinAddress;
use crate::error::{CryptoError, WalletError, WalletResult};
use crate::network::models::{NetworkMode, UnsignedMessage};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use cid::Cid;
use k256::ecdsa::SigningKey;
use multihash_codetable::{Code, MultihashDigest};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::Serialize;
use serde_bytes::ByteBuf;
use serde_json::{json, Value};
use zeroize::Zeroizing;

type Blake2b256 = Blake2b<U32>;

/// Multicodec for DAG-CBOR.
const DAG_CBOR: u64 = 0x71;
/// Lotus wire value for secp256k1 signatures.
const SIG_TYPE_SECP256K1: u8 = 1;

/// Canonical CBOR tuple of a Filecoin message:
/// [version, to, from, nonce, value, gas_limit, gas_fee_cap, gas_premium, method, params]
#[derive(Serialize)]
struct CborMessage(
    u64,     // version
    ByteBuf, // to (binary address)
    ByteBuf, // from (binary address)
    u64,     // nonce
    ByteBuf, // value (big-int bytes)
    i64,     // gas limit
    ByteBuf, // gas fee cap (big-int bytes)
    ByteBuf, // gas premium (big-int bytes)
    u64,     // method
    ByteBuf, // params
);

/// Filecoin offline signer.
///
/// # Security
/// - Holds no key material; the private key is borrowed per call inside a
///   `Zeroizing` wrapper and never stored
/// - Deterministic signatures (RFC 6979): re-signing the same message on a
///   failover retry yields identical bytes
pub struct FilecoinSigner {
    mode: NetworkMode,
}

impl FilecoinSigner {
    pub fn new(mode: NetworkMode) -> Self {
        Self { mode }
    }

    /// Big-int wire bytes: empty for zero, else positive-sign prefix plus
    /// big-endian magnitude.
    fn bigint_bytes(value: &str) -> WalletResult<ByteBuf> {
        let parsed: BigUint = value.trim().parse().map_err(|_| {
            WalletError::InvalidInput(format!("not a non-negative integer: '{}'", value))
        })?;
        if parsed.is_zero() {
            return Ok(ByteBuf::new());
        }
        let mut bytes = vec![0u8];
        bytes.extend_from_slice(&parsed.to_bytes_be());
        Ok(ByteBuf::from(bytes))
    }

    fn encode_cbor(&self, msg: &UnsignedMessage) -> WalletResult<Vec<u8>> {
        let tuple = CborMessage(
            msg.version,
            ByteBuf::from(FilecoinAddress::to_bytes(&msg.to, self.mode)?),
            ByteBuf::from(FilecoinAddress::to_bytes(&msg.from, self.mode)?),
            msg.nonce,
            Self::bigint_bytes(&msg.value)?,
            msg.gas_limit,
            Self::bigint_bytes(&msg.gas_fee_cap)?,
            Self::bigint_bytes(&msg.gas_premium)?,
            msg.method,
            ByteBuf::new(),
        );

        serde_ipld_dagcbor::to_vec(&tuple)
            .map_err(|e| WalletError::Crypto(CryptoError::SigningFailed(e.to_string())))
    }

    /// CID of the message (the signing payload's root).
    pub fn message_cid(&self, msg: &UnsignedMessage) -> WalletResult<Cid> {
        let cbor = self.encode_cbor(msg)?;
        let digest = Code::Blake2b256.digest(&cbor);
        Ok(Cid::new_v1(DAG_CBOR, digest))
    }

    /// Sign a message and render the Lotus JSON wire form ready for
    /// `MpoolPush`.
    pub fn sign(
        &self,
        msg: &UnsignedMessage,
        priv_key: &Zeroizing<Vec<u8>>,
    ) -> WalletResult<Value> {
        let signing_key = SigningKey::from_slice(priv_key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid secp256k1 private key: {}",
                e
            )))
        })?;

        // Filecoin signs blake2b-256 of the message CID bytes.
        let cid = self.message_cid(msg)?;
        let digest = Blake2b256::digest(cid.to_bytes());

        let (signature, recovery_id) = signing_key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| WalletError::Crypto(CryptoError::SigningFailed(e.to_string())))?;

        // 65-byte wire signature: r || s || v
        let mut sig_bytes = signature.to_vec();
        sig_bytes.push(recovery_id.to_byte());

        Ok(json!({
            "Message": {
                "Version": msg.version,
                "To": msg.to,
                "From": msg.from,
                "Nonce": msg.nonce,
                "Value": msg.value,
                "GasLimit": msg.gas_limit,
                "GasFeeCap": msg.gas_fee_cap,
                "GasPremium": msg.gas_premium,
                "Method": msg.method,
                "Params": "",
            },
            "Signature": {
                "Type": SIG_TYPE_SECP256K1,
                "Data": BASE64.encode(&sig_bytes),
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::models::EstimateGas;

    const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn test_message() -> (UnsignedMessage, Zeroizing<Vec<u8>>) {
        let key = Zeroizing::new(hex::decode(TEST_KEY).unwrap());
        let from = FilecoinAddress::derive(&key, NetworkMode::Mainnet).unwrap();
        let to = FilecoinAddress::encode(1, &[5u8; 20], NetworkMode::Mainnet).unwrap();
        let gas = EstimateGas {
            nonce: 2,
            gas_limit: 1_500_000,
            gas_fee_cap: "101737".to_string(),
            gas_premium: "99582".to_string(),
        };
        (
            UnsignedMessage::transfer(&from, &to, "1000000000000000000", &gas),
            key,
        )
    }

    #[test]
    fn test_bigint_bytes() {
        assert!(FilecoinSigner::bigint_bytes("0").unwrap().is_empty());

        let one = FilecoinSigner::bigint_bytes("1").unwrap();
        assert_eq!(one.to_vec(), vec![0x00, 0x01]);

        let big = FilecoinSigner::bigint_bytes("1000000000000000000").unwrap();
        assert_eq!(big[0], 0x00);
        assert_eq!(
            BigUint::from_bytes_be(&big[1..]).to_string(),
            "1000000000000000000"
        );

        assert!(FilecoinSigner::bigint_bytes("-5").is_err());
        assert!(FilecoinSigner::bigint_bytes("nope").is_err());
    }

    #[test]
    fn test_cid_is_deterministic_and_nonce_sensitive() {
        let signer = FilecoinSigner::new(NetworkMode::Mainnet);
        let (msg, _) = test_message();

        let a = signer.message_cid(&msg).unwrap();
        let b = signer.message_cid(&msg).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.codec(), DAG_CBOR);

        let mut bumped = msg.clone();
        bumped.nonce += 1;
        assert_ne!(a, signer.message_cid(&bumped).unwrap());
    }

    #[test]
    fn test_sign_wire_form() {
        let signer = FilecoinSigner::new(NetworkMode::Mainnet);
        let (msg, key) = test_message();

        let wire = signer.sign(&msg, &key).unwrap();
        assert_eq!(wire["Message"]["Nonce"], 2);
        assert_eq!(wire["Message"]["GasFeeCap"], "101737");
        assert_eq!(wire["Message"]["GasPremium"], "99582");
        assert_eq!(wire["Signature"]["Type"], 1);

        let sig = BASE64
            .decode(wire["Signature"]["Data"].as_str().unwrap())
            .unwrap();
        assert_eq!(sig.len(), 65);

        // Deterministic signing: same inputs, same bytes.
        let again = signer.sign(&msg, &key).unwrap();
        assert_eq!(wire, again);
    }
}
