// wallet-core/src/chains/sui/signer.rs
//
// Sui Signer Module - Offline signing of intent digests
//
//   digest     = Blake2b-256(intent || BCS(value))
//   Ed25519    : sign(digest)
//   ECDSA      : sign(SHA-256(digest)), RFC 6979 nonce, low-S
//   serialized = flag(1) || signature(64) || public_key(32|33)

use crate::chains::sui::intent::{hash_intent_message, IntentMessage};
use crate::crypto::keypair::{KeyMaterial, Keypair};
use crate::crypto::scheme::Scheme;
use crate::error::{CryptoError, EncodingError, WalletError, WalletResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use ed25519_dalek::{Signer as _, Verifier as _};
use k256::ecdsa::signature::{Signer as _, Verifier as _};
use serde::Serialize;
use tracing::debug;

/// Length of every supported signature (Ed25519 `R || S`, ECDSA `r || s`).
pub const SIGNATURE_LENGTH: usize = 64;

fn signing_failed(e: impl std::fmt::Display) -> WalletError {
    WalletError::Crypto(CryptoError::SigningFailed(e.to_string()))
}

fn invalid_signature(e: impl std::fmt::Display) -> WalletError {
    WalletError::Crypto(CryptoError::InvalidSignature(e.to_string()))
}

// =============================================================================
// SIGNATURE OUTPUT
// =============================================================================

/// A signature together with the key that verifies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureOutput {
    pub scheme: Scheme,
    pub signature: [u8; SIGNATURE_LENGTH],
    pub public_key: Vec<u8>,
}

impl SignatureOutput {
    /// `flag || signature || public_key`, the form Sui transactions carry.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + SIGNATURE_LENGTH + self.public_key.len());
        out.push(self.scheme.flag());
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.public_key);
        out
    }

    #[inline]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Parse the serialized form produced by [`SignatureOutput::to_bytes`].
    pub fn from_bytes(raw: &[u8]) -> WalletResult<Self> {
        let (&flag, rest) = raw
            .split_first()
            .ok_or_else(|| invalid_signature("empty serialized signature"))?;
        let scheme = Scheme::from_flag(flag)?;

        if rest.len() != SIGNATURE_LENGTH + scheme.public_key_len() {
            return Err(WalletError::Encoding(EncodingError::InvalidPayloadLength(
                raw.len(),
            )));
        }

        let mut signature = [0u8; SIGNATURE_LENGTH];
        signature.copy_from_slice(&rest[..SIGNATURE_LENGTH]);

        Ok(Self {
            scheme,
            signature,
            public_key: rest[SIGNATURE_LENGTH..].to_vec(),
        })
    }

    pub fn from_base64(encoded: &str) -> WalletResult<Self> {
        let raw = STANDARD
            .decode(encoded)
            .map_err(|e| WalletError::Encoding(EncodingError::InvalidEncoding(e.to_string())))?;
        Self::from_bytes(&raw)
    }

    /// Check the signature against the embedded public key.
    pub fn verify(&self, digest: &[u8; 32]) -> WalletResult<()> {
        verify_with_public_key(self.scheme, &self.public_key, digest, &self.signature)
    }
}

fn verify_with_public_key(
    scheme: Scheme,
    public_key: &[u8],
    digest: &[u8; 32],
    signature: &[u8],
) -> WalletResult<()> {
    match scheme {
        Scheme::Ed25519 => {
            let key_bytes: &[u8; 32] = public_key
                .try_into()
                .map_err(|_| invalid_signature("ed25519 public key must be 32 bytes"))?;
            let key =
                ed25519_dalek::VerifyingKey::from_bytes(key_bytes).map_err(invalid_signature)?;
            let sig = ed25519_dalek::Signature::from_slice(signature).map_err(invalid_signature)?;
            key.verify(digest, &sig).map_err(invalid_signature)
        }
        Scheme::Secp256k1 => {
            let key = k256::ecdsa::VerifyingKey::from_sec1_bytes(public_key)
                .map_err(invalid_signature)?;
            let sig = k256::ecdsa::Signature::from_slice(signature).map_err(invalid_signature)?;
            key.verify(digest, &sig).map_err(invalid_signature)
        }
        Scheme::Secp256r1 => {
            let key = p256::ecdsa::VerifyingKey::from_sec1_bytes(public_key)
                .map_err(invalid_signature)?;
            let sig = p256::ecdsa::Signature::from_slice(signature).map_err(invalid_signature)?;
            key.verify(digest, &sig).map_err(invalid_signature)
        }
    }
}

// =============================================================================
// SIGNER
// =============================================================================

/// Sui Signer - offline signing with a [`Keypair`]
///
/// # Security Architecture
/// - Key material stays inside the keypair's curve types (zeroed on drop)
/// - Custom Debug impl shows the address only
/// - Address is computed once at construction
pub struct SuiSigner {
    keypair: Keypair,
    address: String,
}

impl std::fmt::Debug for SuiSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiSigner")
            .field("scheme", &self.keypair.scheme())
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl SuiSigner {
    pub fn new(keypair: Keypair) -> WalletResult<Self> {
        let address = keypair.sui_address()?;
        Ok(Self { keypair, address })
    }

    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[inline]
    pub fn scheme(&self) -> Scheme {
        self.keypair.scheme()
    }

    #[inline]
    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    // =========================================================================
    // DIGEST SIGNING (Low-level)
    // =========================================================================

    /// Sign a 32-byte intent digest.
    ///
    /// # Warning
    /// Only pass digests built by [`hash_intent_message`]; signing anything
    /// else produces signatures Sui will not accept.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> WalletResult<SignatureOutput> {
        let signature = match self.keypair.material() {
            KeyMaterial::Ed25519(key) => {
                let sig = key.try_sign(digest).map_err(signing_failed)?;
                sig.to_bytes()
            }
            KeyMaterial::Secp256k1(key) => {
                let signing_key = k256::ecdsa::SigningKey::from(key);
                let sig: k256::ecdsa::Signature =
                    signing_key.try_sign(digest).map_err(signing_failed)?;
                let sig = sig.normalize_s().unwrap_or(sig);
                copy_signature(&sig.to_bytes())?
            }
            KeyMaterial::Secp256r1(key) => {
                let signing_key = p256::ecdsa::SigningKey::from(key);
                let sig: p256::ecdsa::Signature =
                    signing_key.try_sign(digest).map_err(signing_failed)?;
                let sig = sig.normalize_s().unwrap_or(sig);
                copy_signature(&sig.to_bytes())?
            }
        };

        debug!(scheme = %self.scheme(), address = %self.address, "signed digest");

        Ok(SignatureOutput {
            scheme: self.scheme(),
            signature,
            public_key: self.keypair.public_key_bytes(),
        })
    }

    // =========================================================================
    // INTENT SIGNING
    // =========================================================================

    /// Hash `message` with its intent and sign the digest.
    pub fn sign_intent_message<T: Serialize>(
        &self,
        message: &IntentMessage<T>,
    ) -> WalletResult<SignatureOutput> {
        let digest = hash_intent_message(message)?;
        self.sign_digest(&digest)
    }

    /// Sign arbitrary bytes under the `PersonalMessage` intent.
    pub fn sign_personal_message(&self, message: &[u8]) -> WalletResult<SignatureOutput> {
        self.sign_intent_message(&IntentMessage::personal(message))
    }

    // =========================================================================
    // SIGNATURE VERIFICATION
    // =========================================================================

    /// Verify a raw 64-byte signature over `digest` with this signer's key.
    pub fn verify_digest(&self, digest: &[u8; 32], signature: &[u8]) -> WalletResult<()> {
        verify_with_public_key(
            self.scheme(),
            &self.keypair.public_key_bytes(),
            digest,
            signature,
        )
    }
}

fn copy_signature(bytes: &[u8]) -> WalletResult<[u8; SIGNATURE_LENGTH]> {
    <[u8; SIGNATURE_LENGTH]>::try_from(bytes)
        .map_err(|_| signing_failed(format!("unexpected signature length {}", bytes.len())))
}

// =============================================================================
// UNIT TESTS
// =============================================================================
