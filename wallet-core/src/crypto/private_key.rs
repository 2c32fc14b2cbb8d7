// wallet-core/src/crypto/private_key.rs
//
// Bech32 private key format (SIP-15)
//
//   "suiprivkey" 1 bech32( flag(1) || secret(32) )
//
// Original bech32 checksum constant; bech32m strings are rejected.

use crate::crypto::scheme::Scheme;
use crate::error::{CryptoError, EncodingError, WalletError, WalletResult};
use bech32::{u5, FromBase32, ToBase32, Variant};
use tracing::trace;
use zeroize::Zeroizing;

/// Human-readable prefix of exported private keys.
pub const SUI_PRIVATE_KEY_PREFIX: &str = "suiprivkey";

/// Secret key length for every supported scheme.
pub const PRIVATE_KEY_SIZE: usize = 32;

const FLAG_SIZE: usize = 1;

/// Output of [`decode_private_key`]. The secret is zeroed when dropped.
pub struct ParsedPrivateKey {
    pub scheme: Scheme,
    pub secret_key: Zeroizing<[u8; PRIVATE_KEY_SIZE]>,
}

impl std::fmt::Debug for ParsedPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedPrivateKey")
            .field("scheme", &self.scheme)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Overwrite 5-bit words that carried key material.
fn wipe_words(words: &mut [u5]) {
    if let Ok(zero) = u5::try_from_u8(0) {
        words.fill(zero);
    }
}

/// Map a bech32 failure to a fixed message. The decoder's own errors quote
/// offending characters of the encoded key, so they are never forwarded.
fn bech32_error(err: bech32::Error) -> WalletError {
    let reason = match err {
        bech32::Error::InvalidChar(_) => "invalid character in bech32 string",
        bech32::Error::InvalidChecksum => "invalid bech32 checksum",
        bech32::Error::MixedCase => "mixed-case bech32 string",
        bech32::Error::InvalidLength => "invalid bech32 length",
        bech32::Error::InvalidPadding => "invalid bech32 payload padding",
        _ => "malformed bech32 string",
    };
    WalletError::Encoding(EncodingError::InvalidEncoding(reason.to_string()))
}

/// Serialize `flag || secret` as bech32 with the `suiprivkey` prefix.
pub fn encode_private_key(scheme: Scheme, secret_key: &[u8]) -> WalletResult<String> {
    if secret_key.len() != PRIVATE_KEY_SIZE {
        return Err(WalletError::Crypto(CryptoError::InvalidSecretLength {
            expected: PRIVATE_KEY_SIZE,
            actual: secret_key.len(),
        }));
    }

    let mut payload = Zeroizing::new([0u8; FLAG_SIZE + PRIVATE_KEY_SIZE]);
    payload[0] = scheme.flag();
    payload[FLAG_SIZE..].copy_from_slice(secret_key);

    let mut words = payload.as_slice().to_base32();
    let encoded = bech32::encode(SUI_PRIVATE_KEY_PREFIX, &words, Variant::Bech32)
        .map_err(|e| WalletError::Encoding(EncodingError::InvalidEncoding(e.to_string())));
    wipe_words(&mut words);

    trace!(scheme = %scheme, "encoded private key");
    encoded
}

/// Reverse of [`encode_private_key`].
pub fn decode_private_key(encoded: &str) -> WalletResult<ParsedPrivateKey> {
    let (hrp, mut words, variant) = bech32::decode(encoded).map_err(bech32_error)?;

    if variant != Variant::Bech32 {
        wipe_words(&mut words);
        return Err(WalletError::Encoding(EncodingError::InvalidEncoding(
            "bech32m checksum is not accepted".to_string(),
        )));
    }

    if hrp != SUI_PRIVATE_KEY_PREFIX {
        wipe_words(&mut words);
        return Err(WalletError::Encoding(EncodingError::UnexpectedPrefix(hrp)));
    }

    let payload = Vec::<u8>::from_base32(&words)
        .map(Zeroizing::new)
        .map_err(bech32_error);
    wipe_words(&mut words);
    let payload = payload?;

    if payload.len() != FLAG_SIZE + PRIVATE_KEY_SIZE {
        return Err(WalletError::Encoding(EncodingError::InvalidPayloadLength(
            payload.len(),
        )));
    }

    let scheme = Scheme::from_flag(payload[0])?;

    let mut secret_key = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
    secret_key.copy_from_slice(&payload[FLAG_SIZE..]);

    trace!(scheme = %scheme, "decoded private key");
    Ok(ParsedPrivateKey { scheme, secret_key })
}
