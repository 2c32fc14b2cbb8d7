// wallet-core/src/crypto/key_deriver/ed25519.rs
//
// Ed25519 Key Derivation - SLIP-0010 Standard
//
// Algorithm: HMAC-SHA512, hardened child derivation only
// Reference: https://github.com/satoshilabs/slips/blob/master/slip-0010.md
//
// SLIP-0010 for ed25519 ONLY supports hardened children.
// Every level in the path MUST be hardened (').
// e.g. m/44'/784'/0'/0'/0' (OK)    m/44'/784'/0'/0/0 (INVALID)

use super::{derive_with, hmac_sha512, master_key, DerivedKey, ExtendedKey, HdDeriver};
use crate::crypto::path::{DerivationPath, Segment};
use crate::crypto::scheme::Scheme;
use crate::error::{CryptoError, WalletError, WalletResult};

/// Ed25519 Key Deriver - SLIP-0010 Standard
///
/// # Differences from secp256k1 (BIP-32)
/// - Master key salt: "ed25519 seed" (instead of "Bitcoin seed")
/// - Hardened derivation only (index >= 2^31)
/// - No key range check (any 32 bytes is a valid ed25519 seed; clamping
///   happens in key expansion)
pub struct Ed25519Deriver;

impl Ed25519Deriver {
    /// SLIP-0010 master key seed constant
    const MASTER_SECRET: &'static [u8] = b"ed25519 seed";

    /// Derive an ed25519 key seed from `seed` along `path`.
    ///
    /// # Returns
    /// 32-byte seed for ed25519 key expansion + final chain code
    pub fn derive(seed: &[u8], path: &DerivationPath) -> WalletResult<DerivedKey> {
        derive_with::<Self>(seed, path)
    }

    /// Validate ed25519 path text (well-formed and all levels hardened)
    pub fn is_valid_path(path: &str) -> bool {
        DerivationPath::parse(path)
            .and_then(|p| p.validate_for_scheme(Scheme::Ed25519))
            .is_ok()
    }
}

impl HdDeriver for Ed25519Deriver {
    const SCHEME: Scheme = Scheme::Ed25519;

    /// I = HMAC-SHA512(Key = "ed25519 seed", Data = seed)
    fn master_key(seed: &[u8]) -> WalletResult<ExtendedKey> {
        master_key(Self::MASTER_SECRET, seed)
    }

    /// Data = 0x00 || parent_key || ser32(index | 0x80000000)
    /// I = HMAC-SHA512(Key = parent_chain_code, Data = Data)
    ///
    /// IL is used as-is for the next level, no modular reduction.
    fn child_key_derive(parent: &ExtendedKey, segment: &Segment) -> WalletResult<ExtendedKey> {
        // unreachable after validate_for_scheme
        if !segment.is_hardened() {
            return Err(WalletError::Crypto(CryptoError::InvalidDerivationSegment(
                format!("ed25519 SLIP-0010 requires hardened segments, got '{}'", segment),
            )));
        }

        let digest = hmac_sha512(
            &parent.chain_code[..],
            &[
                &[0x00u8][..],
                &parent.secret[..],
                &segment.hardened_index().to_be_bytes()[..],
            ],
        )?;

        Ok(ExtendedKey::from_digest(&digest))
    }

    fn finalize(_key: &ExtendedKey) -> WalletResult<()> {
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
