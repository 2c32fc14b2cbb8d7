// wallet-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - Multi-Curve Support
//
// ┌──────────────────────────────────────────────────────────────────┐
// │  Seed (caller supplied, usually 64 bytes from BIP-39)            │
// │                               │                                  │
// │      ┌────────────────────────┼─────────────────────────┐        │
// │      ▼                        ▼                         ▼        │
// │  Ed25519 (SLIP-0010)    Secp256k1 (BIP-32)     Secp256r1         │
// │  "ed25519 seed"         "Bitcoin seed"         "Bitcoin seed"    │
// │  hardened only          k256 group steps       k256 group steps  │
// │                                                then P-256 check  │
// └──────────────────────────────────────────────────────────────────┘

pub mod bip32;
pub mod ed25519;
pub mod secp256k1;
pub mod secp256r1;

// Re-exports
pub use bip32::{Bip32Curve, NistP256Group, Secp256k1Group};
pub use ed25519::Ed25519Deriver;
pub use secp256k1::Secp256k1Deriver;
pub use secp256r1::Secp256r1Deriver;

use crate::crypto::path::{DerivationPath, Segment, HARDENED_OFFSET};
use crate::crypto::scheme::Scheme;
use crate::error::{CryptoError, WalletError, WalletResult};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use tracing::{debug, trace};
use zeroize::{Zeroize, Zeroizing};

type HmacSha512 = Hmac<Sha512>;

// =============================================================================
// COMMON TYPES
// =============================================================================

/// Result of a derivation: final secret, chain code and the path walked.
///
/// For Ed25519 `private_key` is the 32-byte SLIP-0010 seed that feeds key
/// expansion; for the ECDSA schemes it is the big-endian scalar.
pub struct DerivedKey {
    /// Auto-zeroize on drop
    pub private_key: Zeroizing<[u8; 32]>,
    pub chain_code: Zeroizing<[u8; 32]>,
    pub scheme: Scheme,
    pub path: DerivationPath,
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("scheme", &self.scheme)
            .field("path", &self.path.to_string())
            .field("private_key", &"[REDACTED]")
            .field("chain_code", &"[REDACTED]")
            .finish()
    }
}

/// (secret, chain code) pair threaded through the derivation steps.
pub(crate) struct ExtendedKey {
    pub(crate) secret: Zeroizing<[u8; 32]>,
    pub(crate) chain_code: Zeroizing<[u8; 32]>,
}

impl ExtendedKey {
    /// Splits an HMAC-SHA512 output into IL (secret) and IR (chain code).
    pub(crate) fn from_digest(digest: &[u8; 64]) -> Self {
        let mut secret = Zeroizing::new([0u8; 32]);
        let mut chain_code = Zeroizing::new([0u8; 32]);
        secret.copy_from_slice(&digest[..32]);
        chain_code.copy_from_slice(&digest[32..]);
        Self { secret, chain_code }
    }
}

/// HMAC-SHA512 over the concatenation of `parts`.
pub(crate) fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> WalletResult<Zeroizing<[u8; 64]>> {
    let mut mac = HmacSha512::new_from_slice(key).map_err(|e| {
        WalletError::Crypto(CryptoError::DerivationFailed(format!(
            "HMAC init failed: {}",
            e
        )))
    })?;
    for part in parts {
        mac.update(part);
    }

    let mut result = mac.finalize().into_bytes();
    let mut buf = Zeroizing::new([0u8; 64]);
    buf.copy_from_slice(&result);
    result.as_mut_slice().zeroize();

    Ok(buf)
}

/// I = HMAC-SHA512(Key = salt, Data = seed)
pub(crate) fn master_key(salt: &[u8], seed: &[u8]) -> WalletResult<ExtendedKey> {
    let digest = hmac_sha512(salt, &[seed])?;
    Ok(ExtendedKey::from_digest(&digest))
}

/// Per-scheme derivation pipeline: master key, one step per segment, final check.
pub(crate) trait HdDeriver {
    const SCHEME: Scheme;

    fn master_key(seed: &[u8]) -> WalletResult<ExtendedKey>;

    fn child_key_derive(parent: &ExtendedKey, segment: &Segment) -> WalletResult<ExtendedKey>;

    /// Validates the final secret as a key of the target curve.
    fn finalize(key: &ExtendedKey) -> WalletResult<()>;
}

fn walk<D: HdDeriver>(mut key: ExtendedKey, segments: &[Segment]) -> WalletResult<ExtendedKey> {
    for (depth, segment) in segments.iter().enumerate() {
        trace!(
            scheme = %D::SCHEME,
            depth,
            hardened = segment.is_hardened(),
            "derivation step"
        );
        // the parent pair is dropped (and zeroed) on reassignment
        key = D::child_key_derive(&key, segment)?;
    }
    Ok(key)
}

pub(crate) fn derive_with<D: HdDeriver>(
    seed: &[u8],
    path: &DerivationPath,
) -> WalletResult<DerivedKey> {
    path.validate_for_scheme(D::SCHEME)?;

    let master = D::master_key(seed)?;
    let key = walk::<D>(master, path.segments())?;
    D::finalize(&key)?;

    debug!(scheme = %D::SCHEME, path = %path, "derived key");

    Ok(DerivedKey {
        private_key: key.secret,
        chain_code: key.chain_code,
        scheme: D::SCHEME,
        path: path.clone(),
    })
}

fn derive_batch_with<D: HdDeriver>(
    seed: &[u8],
    base_path: &DerivationPath,
    indices: std::ops::Range<u32>,
) -> WalletResult<Vec<DerivedKey>> {
    base_path.validate_for_scheme(D::SCHEME)?;

    if indices.end > HARDENED_OFFSET {
        return Err(WalletError::Crypto(CryptoError::MalformedPath(format!(
            "batch index range {}..{} exceeds 2^31",
            indices.start, indices.end
        ))));
    }

    // master -> base once, then fan out
    let base = walk::<D>(D::master_key(seed)?, base_path.segments())?;

    let keys = indices
        .map(|index| {
            let segment = Segment::new(index, D::SCHEME.requires_hardened())?;
            let child = D::child_key_derive(&base, &segment)?;
            D::finalize(&child)?;
            Ok(DerivedKey {
                private_key: child.secret,
                chain_code: child.chain_code,
                scheme: D::SCHEME,
                path: base_path.child(segment),
            })
        })
        .collect::<WalletResult<Vec<_>>>()?;

    debug!(
        scheme = %D::SCHEME,
        base = %base_path,
        count = keys.len(),
        "derived key batch"
    );
    Ok(keys)
}

// =============================================================================
// UNIFIED DERIVER
// =============================================================================
/// Entry point for key derivation across every supported scheme.
pub struct KeyDeriver;

impl KeyDeriver {
    /// Derive a key for `scheme` along a textual path.
    ///
    /// # Arguments
    /// * `seed` - BIP-39 seed (any length the HMAC accepts)
    /// * `path` - e.g. "m/44'/784'/0'/0'/0'"
    /// * `scheme` - curve to derive for
    pub fn derive(seed: &[u8], path: &str, scheme: Scheme) -> WalletResult<DerivedKey> {
        let path = DerivationPath::parse(path)?;
        Self::derive_path(seed, &path, scheme)
    }

    pub fn derive_path(
        seed: &[u8],
        path: &DerivationPath,
        scheme: Scheme,
    ) -> WalletResult<DerivedKey> {
        match scheme {
            Scheme::Ed25519 => Ed25519Deriver::derive(seed, path),
            Scheme::Secp256k1 => Secp256k1Deriver::derive(seed, path),
            Scheme::Secp256r1 => Secp256r1Deriver::derive(seed, path),
        }
    }

    /// Derive several keys sharing `base_path`, one per index in `indices`.
    ///
    /// The appended level is hardened for Ed25519 and normal otherwise.
    /// Master → base is computed once.
    pub fn derive_batch(
        seed: &[u8],
        base_path: &str,
        indices: std::ops::Range<u32>,
        scheme: Scheme,
    ) -> WalletResult<Vec<DerivedKey>> {
        let base_path = DerivationPath::parse(base_path)?;
        match scheme {
            Scheme::Ed25519 => derive_batch_with::<Ed25519Deriver>(seed, &base_path, indices),
            Scheme::Secp256k1 => {
                derive_batch_with::<Secp256k1Deriver>(seed, &base_path, indices)
            }
            Scheme::Secp256r1 => {
                derive_batch_with::<Secp256r1Deriver>(seed, &base_path, indices)
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::DerivationPaths;

    const TEST_SEED: &str = concat!(
        "16270f7b026afe7a3746efbfcf43e083500951db9e2699d1e4f372515dabcc80",
        "459b9181c3937b5faa4b8f7602f886553d2c32c5f12f3331cef40153aead4de6"
    );

    #[test]
    fn test_unified_all_schemes() {
        let seed = hex::decode(TEST_SEED).unwrap();
        for scheme in Scheme::ALL {
            let key =
                KeyDeriver::derive(&seed, DerivationPaths::default_for(scheme), scheme).unwrap();
            assert_eq!(key.scheme, scheme);
            assert_eq!(key.path.to_string(), DerivationPaths::default_for(scheme));
        }
    }

    #[test]
    fn test_consistency() {
        let seed = hex::decode(TEST_SEED).unwrap();
        for scheme in Scheme::ALL {
            let path = DerivationPaths::default_for(scheme);
            let k1 = KeyDeriver::derive(&seed, path, scheme).unwrap();
            let k2 = KeyDeriver::derive(&seed, path, scheme).unwrap();
            assert_eq!(&*k1.private_key, &*k2.private_key);
            assert_eq!(&*k1.chain_code, &*k2.chain_code);
        }
    }

    #[test]
    fn test_different_curves_produce_different_keys() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let ed = KeyDeriver::derive(&seed, "m/44'/784'/0'/0'/0'", Scheme::Ed25519).unwrap();
        let k1 = KeyDeriver::derive(&seed, "m/44'/784'/0'/0'/0'", Scheme::Secp256k1).unwrap();
        assert_ne!(&*ed.private_key, &*k1.private_key);
    }

    #[test]
    fn test_malformed_path_rejected() {
        let seed = hex::decode(TEST_SEED).unwrap();
        assert!(matches!(
            KeyDeriver::derive(&seed, "44'/784'", Scheme::Secp256k1),
            Err(WalletError::Crypto(CryptoError::MalformedPath(_)))
        ));
    }

    #[test]
    fn test_short_seed_accepted() {
        // no seed length policy beyond what HMAC accepts
        let seed = [7u8; 16];
        for scheme in Scheme::ALL {
            let path = DerivationPaths::default_for(scheme);
            assert!(KeyDeriver::derive(&seed, path, scheme).is_ok());
        }
    }

    #[test]
    fn test_batch_matches_single() {
        let seed = hex::decode(TEST_SEED).unwrap();
        for scheme in Scheme::ALL {
            let base = DerivationPaths::account_base(scheme, 0);
            let batch = KeyDeriver::derive_batch(&seed, &base, 0..3, scheme).unwrap();
            assert_eq!(batch.len(), 3);

            for (i, batch_key) in batch.iter().enumerate() {
                let path = DerivationPaths::for_scheme(scheme, 0, i as u32);
                let single = KeyDeriver::derive(&seed, &path, scheme).unwrap();
                assert_eq!(&*batch_key.private_key, &*single.private_key);
                assert_eq!(&*batch_key.chain_code, &*single.chain_code);
                assert_eq!(batch_key.path, single.path);
            }
        }
    }

    #[test]
    fn test_batch_rejects_indices_past_hardened_offset() {
        let seed = [7u8; 64];
        for scheme in Scheme::ALL {
            let base = DerivationPaths::account_base(scheme, 0);
            assert!(matches!(
                KeyDeriver::derive_batch(&seed, &base, 0..u32::MAX, scheme),
                Err(WalletError::Crypto(CryptoError::MalformedPath(_)))
            ));
        }

        // last valid index is 2^31 - 1
        let base = DerivationPaths::account_base(Scheme::Secp256k1, 0);
        let top = HARDENED_OFFSET - 1..HARDENED_OFFSET;
        let keys = KeyDeriver::derive_batch(&seed, &base, top, Scheme::Secp256k1).unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].path.segments()[4].index(), HARDENED_OFFSET - 1);
    }

    #[test]
    fn test_batch_empty_range() {
        let seed = [7u8; 64];
        let base = DerivationPaths::account_base(Scheme::Ed25519, 0);
        let keys = KeyDeriver::derive_batch(&seed, &base, 5..5, Scheme::Ed25519).unwrap();
        assert!(keys.is_empty());
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let key = KeyDeriver::derive(&seed, DerivationPaths::ED25519_0, Scheme::Ed25519).unwrap();
        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains(&hex::encode(&*key.private_key)));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_logs_never_contain_secrets() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();

        let keys: Vec<DerivedKey> = tracing::subscriber::with_default(subscriber, || {
            Scheme::ALL
                .iter()
                .map(|s| KeyDeriver::derive(&seed, DerivationPaths::default_for(*s), *s).unwrap())
                .collect()
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("derived key"));
        assert!(output.contains("derivation step"));
        assert!(!output.contains(TEST_SEED));
        for key in &keys {
            assert!(!output.contains(&hex::encode(&*key.private_key)));
            assert!(!output.contains(&hex::encode(&*key.chain_code)));
        }
    }

    #[test]
    fn test_hmac_matches_master_key() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let digest = hmac_sha512(b"Bitcoin seed", &[&seed]).unwrap();
        let master = master_key(b"Bitcoin seed", &seed).unwrap();
        assert_eq!(&digest[..32], &master.secret[..]);
        assert_eq!(&digest[32..], &master.chain_code[..]);
    }
}
