// wallet-core/src/chains/sui/intent.rs
//
// Intent framing for Sui signatures.
//
//   serialized = [scope, version, app_id] || BCS(payload)
//   digest     = Blake2b-256(serialized)
//
// The digest is what every Sui signature commits to, so it has to be
// bit-exact with other Sui tooling.

use crate::error::{IntentError, WalletError, WalletResult};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::trace;

type Blake2b256 = Blake2b<U32>;

/// Length of a serialized [`Intent`].
pub const INTENT_LENGTH: usize = 3;

// =============================================================================
// INTENT FIELDS
// =============================================================================

/// What kind of data a signature is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum IntentScope {
    TransactionData = 0,
    TransactionEffects = 1,
    CheckpointSummary = 2,
    PersonalMessage = 3,
    SenderSignedTransaction = 4,
    ProofOfPossession = 5,
}

impl TryFrom<u8> for IntentScope {
    type Error = IntentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::TransactionData),
            1 => Ok(Self::TransactionEffects),
            2 => Ok(Self::CheckpointSummary),
            3 => Ok(Self::PersonalMessage),
            4 => Ok(Self::SenderSignedTransaction),
            5 => Ok(Self::ProofOfPossession),
            other => Err(IntentError::InvalidScope(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum IntentVersion {
    V0 = 0,
}

impl TryFrom<u8> for IntentVersion {
    type Error = IntentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::V0),
            other => Err(IntentError::InvalidVersion(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AppId {
    Sui = 0,
}

impl TryFrom<u8> for AppId {
    type Error = IntentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Sui),
            other => Err(IntentError::InvalidAppId(other)),
        }
    }
}

// =============================================================================
// INTENT
// =============================================================================

/// Domain separator prepended to every signed payload.
///
/// Fields are closed enums, so an `Intent` value is always valid; raw bytes
/// go through [`Intent::from_bytes`], which checks each field on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intent {
    pub scope: IntentScope,
    pub version: IntentVersion,
    pub app_id: AppId,
}

impl Default for Intent {
    /// Transaction data, V0, Sui.
    fn default() -> Self {
        Self {
            scope: IntentScope::TransactionData,
            version: IntentVersion::V0,
            app_id: AppId::Sui,
        }
    }
}

impl Intent {
    pub fn personal_message() -> Self {
        Self::default().with_scope(IntentScope::PersonalMessage)
    }

    #[must_use]
    pub fn with_scope(mut self, scope: IntentScope) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn with_app_id(mut self, app_id: AppId) -> Self {
        self.app_id = app_id;
        self
    }

    /// `[scope, version, app_id]`
    #[inline]
    pub fn bytes(&self) -> [u8; INTENT_LENGTH] {
        [self.scope as u8, self.version as u8, self.app_id as u8]
    }

    /// Parse a serialized intent; each byte must be in its field's value set.
    pub fn from_bytes(raw: &[u8]) -> WalletResult<Self> {
        if raw.len() != INTENT_LENGTH {
            return Err(WalletError::Intent(IntentError::InvalidLength(raw.len())));
        }

        Ok(Self {
            scope: IntentScope::try_from(raw[0])?,
            version: IntentVersion::try_from(raw[1])?,
            app_id: AppId::try_from(raw[2])?,
        })
    }

    /// Parse the hex form, e.g. `"030000"`.
    pub fn from_hex(encoded: &str) -> WalletResult<Self> {
        let raw = hex::decode(encoded)
            .map_err(|e| WalletError::Intent(IntentError::InvalidHex(e.to_string())))?;
        Self::from_bytes(&raw)
    }
}

impl FromStr for Intent {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// =============================================================================
// PAYLOAD SERIALIZATION
// =============================================================================

/// Canonical binary encoder for intent payloads.
pub trait PayloadSerializer {
    fn serialize<T: Serialize>(&self, value: &T) -> WalletResult<Vec<u8>>;
}

/// The BCS encoder used by Sui.
#[derive(Debug, Clone, Copy, Default)]
pub struct BcsSerializer;

impl PayloadSerializer for BcsSerializer {
    fn serialize<T: Serialize>(&self, value: &T) -> WalletResult<Vec<u8>> {
        bcs::to_bytes(value)
            .map_err(|e| WalletError::Intent(IntentError::PayloadSerialization(e.to_string())))
    }
}

/// Payload for off-chain message signing. BCS encodes it as a byte vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalMessage {
    pub message: Vec<u8>,
}

impl PersonalMessage {
    pub fn new(message: impl Into<Vec<u8>>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// =============================================================================
// INTENT MESSAGE
// =============================================================================

/// An [`Intent`] paired with the value it scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentMessage<T> {
    pub intent: Intent,
    pub value: T,
}

impl<T: Serialize> IntentMessage<T> {
    pub fn new(intent: Intent, value: T) -> Self {
        Self { intent, value }
    }

    /// `intent || BCS(value)`
    pub fn to_bytes(&self) -> WalletResult<Vec<u8>> {
        self.to_bytes_with(&BcsSerializer)
    }

    /// `intent || serializer(value)`
    pub fn to_bytes_with<S: PayloadSerializer>(&self, serializer: &S) -> WalletResult<Vec<u8>> {
        let payload = serializer.serialize(&self.value)?;

        let mut encoded = Vec::with_capacity(INTENT_LENGTH + payload.len());
        encoded.extend_from_slice(&self.intent.bytes());
        encoded.extend_from_slice(&payload);
        Ok(encoded)
    }
}

impl IntentMessage<PersonalMessage> {
    pub fn personal(message: impl Into<Vec<u8>>) -> Self {
        Self::new(Intent::personal_message(), PersonalMessage::new(message))
    }
}

/// Blake2b-256 over the BCS-serialized intent message.
pub fn hash_intent_message<T: Serialize>(message: &IntentMessage<T>) -> WalletResult<[u8; 32]> {
    hash_intent_message_with(message, &BcsSerializer)
}

/// [`hash_intent_message`] with a caller-supplied payload serializer.
pub fn hash_intent_message_with<T: Serialize, S: PayloadSerializer>(
    message: &IntentMessage<T>,
    serializer: &S,
) -> WalletResult<[u8; 32]> {
    let serialized = message.to_bytes_with(serializer)?;

    let mut digest = [0u8; 32];
    digest.copy_from_slice(&Blake2b256::digest(&serialized));

    trace!(scope = ?message.intent.scope, len = serialized.len(), "hashed intent message");
    Ok(digest)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intent_bytes() {
        assert_eq!(Intent::default().bytes(), [0x00, 0x00, 0x00]);
        assert_eq!(Intent::personal_message().bytes(), [0x03, 0x00, 0x00]);
        assert_eq!(
            Intent::default()
                .with_scope(IntentScope::ProofOfPossession)
                .with_app_id(AppId::Sui)
                .bytes(),
            [0x05, 0x00, 0x00]
        );
    }

    #[test]
    fn test_from_bytes() {
        for scope in 0u8..=5 {
            let intent = Intent::from_bytes(&[scope, 0, 0]).unwrap();
            assert_eq!(intent.bytes(), [scope, 0, 0]);
        }
    }

    #[test]
    fn test_from_bytes_rejects_each_field() {
        assert_eq!(
            Intent::from_bytes(&[6, 0, 0]).unwrap_err(),
            WalletError::Intent(IntentError::InvalidScope(6))
        );
        assert_eq!(
            Intent::from_bytes(&[0, 1, 0]).unwrap_err(),
            WalletError::Intent(IntentError::InvalidVersion(1))
        );
        assert_eq!(
            Intent::from_bytes(&[0, 0, 2]).unwrap_err(),
            WalletError::Intent(IntentError::InvalidAppId(2))
        );
        assert_eq!(
            Intent::from_bytes(&[0, 0]).unwrap_err(),
            WalletError::Intent(IntentError::InvalidLength(2))
        );
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Intent::from_hex("030000").unwrap(), Intent::personal_message());
        assert_eq!("000000".parse::<Intent>().unwrap(), Intent::default());
        assert!(matches!(
            Intent::from_hex("zz0000"),
            Err(WalletError::Intent(IntentError::InvalidHex(_)))
        ));
        assert!(Intent::from_hex("00000000").is_err());
    }

    #[test]
    fn test_to_bytes_prefixes_intent() {
        let msg = IntentMessage::new(Intent::default(), 7u64);
        assert_eq!(
            msg.to_bytes().unwrap(),
            vec![0, 0, 0, 7, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_personal_message_encoding() {
        // BCS vector<u8>: ULEB128 length then bytes
        let msg = IntentMessage::personal(b"hello".to_vec());
        assert_eq!(
            msg.to_bytes().unwrap(),
            vec![3, 0, 0, 5, b'h', b'e', b'l', b'l', b'o']
        );
        assert_eq!(
            hex::encode(hash_intent_message(&msg).unwrap()),
            "e0ea06e183a8984cd8dd072440ae2a8c21125d994a9435b7c8c61886bc087d6a"
        );
    }

    #[test]
    fn test_hash_is_blake2b_of_serialized() {
        let msg = IntentMessage::new(Intent::default(), vec![1u8, 2, 3]);
        let serialized = msg.to_bytes().unwrap();
        let expected = Blake2b256::digest(&serialized);
        assert_eq!(&hash_intent_message(&msg).unwrap()[..], &expected[..]);
    }

    #[test]
    fn test_empty_payload_serializer() {
        struct Empty;
        impl PayloadSerializer for Empty {
            fn serialize<T: Serialize>(&self, _value: &T) -> WalletResult<Vec<u8>> {
                Ok(Vec::new())
            }
        }

        let msg = IntentMessage::new(Intent::default(), ());
        assert_eq!(msg.to_bytes_with(&Empty).unwrap(), vec![0, 0, 0]);
        assert_eq!(
            hex::encode(hash_intent_message_with(&msg, &Empty).unwrap()),
            "ab29e6dc16755d0071eba349ebda225d15e4f910cb474549c47e95cb85ecc4d6"
        );
    }

    #[test]
    fn test_blake2b_256_empty_vector() {
        assert_eq!(
            hex::encode(Blake2b256::digest(b"")),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }

    #[test]
    fn test_serializer_failure_surfaces() {
        struct Failing;
        impl PayloadSerializer for Failing {
            fn serialize<T: Serialize>(&self, _value: &T) -> WalletResult<Vec<u8>> {
                Err(WalletError::Intent(IntentError::PayloadSerialization(
                    "unsupported".to_string(),
                )))
            }
        }

        let msg = IntentMessage::new(Intent::default(), 1u8);
        assert!(matches!(
            hash_intent_message_with(&msg, &Failing),
            Err(WalletError::Intent(IntentError::PayloadSerialization(_)))
        ));
    }

    #[test]
    fn test_bcs_rejects_unsupported_value() {
        // BCS has no encoding for floats
        let msg = IntentMessage::new(Intent::default(), 1.5f64);
        assert!(matches!(
            msg.to_bytes(),
            Err(WalletError::Intent(IntentError::PayloadSerialization(_)))
        ));
    }
}
