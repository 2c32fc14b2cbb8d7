// wallet-core/src/crypto/key_deriver/bip32.rs
//
// BIP-32 private child derivation, shared by secp256k1 and secp256r1.
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
//
//   hardened: I = HMAC-SHA512(c_par, 0x00 || k_par || ser32(i + 2^31))
//   normal:   I = HMAC-SHA512(c_par, serP(k_par * G) || ser32(i))
//   k_i = (IL + k_par) mod n,  c_i = IR

use super::{hmac_sha512, ExtendedKey};
use crate::crypto::path::Segment;
use crate::error::{CryptoError, WalletError, WalletResult};
use zeroize::Zeroizing;

/// Group operations the BIP-32 step needs from a curve.
///
/// The curve order lives behind both methods: scalars are parsed with a
/// `< n` range check and added modulo `n`.
pub trait Bip32Curve {
    const NAME: &'static str;

    /// SEC1 compressed encoding of `secret * G`.
    ///
    /// Fails with `InvalidPrivateKey` if `secret` is zero or `>= n`.
    fn public_key(secret: &[u8; 32]) -> WalletResult<[u8; 33]>;

    /// `(tweak + parent) mod n`.
    ///
    /// Fails with `InvalidChildScalar` if `tweak >= n` or the sum is zero.
    fn add_scalars(tweak: &[u8; 32], parent: &[u8; 32]) -> WalletResult<[u8; 32]>;
}

fn invalid_private_key(curve: &str) -> WalletError {
    WalletError::Crypto(CryptoError::InvalidPrivateKey(format!(
        "{} scalar is zero or out of range",
        curve
    )))
}

fn copy_point(encoded: &[u8]) -> WalletResult<[u8; 33]> {
    <[u8; 33]>::try_from(encoded).map_err(|_| {
        WalletError::Crypto(CryptoError::InvalidPrivateKey(format!(
            "unexpected public key length {}",
            encoded.len()
        )))
    })
}

// =============================================================================
// SECP256K1
// =============================================================================
/// secp256k1 group, via `k256`.
pub struct Secp256k1Group;

impl Bip32Curve for Secp256k1Group {
    const NAME: &'static str = "secp256k1";

    fn public_key(secret: &[u8; 32]) -> WalletResult<[u8; 33]> {
        use k256::elliptic_curve::sec1::ToEncodedPoint;

        let secret_key = k256::SecretKey::from_bytes(k256::FieldBytes::from_slice(secret))
            .map_err(|_| invalid_private_key(Self::NAME))?;
        let encoded = secret_key.public_key().to_encoded_point(true);
        copy_point(encoded.as_bytes())
    }

    fn add_scalars(tweak: &[u8; 32], parent: &[u8; 32]) -> WalletResult<[u8; 32]> {
        use k256::elliptic_curve::{Field, PrimeField};
        use k256::{FieldBytes, Scalar};

        let tweak: Scalar = Option::from(Scalar::from_repr(*FieldBytes::from_slice(tweak)))
            .ok_or(WalletError::Crypto(CryptoError::InvalidChildScalar))?;
        let parent: Scalar = Option::from(Scalar::from_repr(*FieldBytes::from_slice(parent)))
            .ok_or_else(|| invalid_private_key(Self::NAME))?;

        let child = tweak + parent;
        if bool::from(Field::is_zero(&child)) {
            return Err(WalletError::Crypto(CryptoError::InvalidChildScalar));
        }

        let mut out = [0u8; 32];
        out.copy_from_slice(&child.to_repr());
        Ok(out)
    }
}

// =============================================================================
// NIST P-256
// =============================================================================
/// NIST P-256 (secp256r1) key conversion, via `p256`.
///
/// Not a [`Bip32Curve`]: secp256r1 derivation steps run over
/// [`Secp256k1Group`], and P-256 is only used to check and convert the final
/// scalar.
pub struct NistP256Group;

impl NistP256Group {
    pub const NAME: &'static str = "secp256r1";

    /// SEC1 compressed encoding of `secret * G` on P-256.
    ///
    /// Fails with `InvalidPrivateKey` if `secret` is zero or `>= n(P-256)`.
    pub fn public_key(secret: &[u8; 32]) -> WalletResult<[u8; 33]> {
        use p256::elliptic_curve::sec1::ToEncodedPoint;

        let secret_key = p256::SecretKey::from_bytes(p256::FieldBytes::from_slice(secret))
            .map_err(|_| invalid_private_key(Self::NAME))?;
        let encoded = secret_key.public_key().to_encoded_point(true);
        copy_point(encoded.as_bytes())
    }
}

// =============================================================================
// CHILD KEY DERIVATION
// =============================================================================

/// One BIP-32 private derivation step over curve `C`.
///
/// IL >= n or a zero child is returned as `InvalidChildScalar` instead of
/// moving on to the next index; normal-case output matches BIP-32.
pub(crate) fn child_key_derive<C: Bip32Curve>(
    parent: &ExtendedKey,
    segment: &Segment,
) -> WalletResult<ExtendedKey> {
    let digest = if segment.is_hardened() {
        hmac_sha512(
            &parent.chain_code[..],
            &[
                &[0x00u8][..],
                &parent.secret[..],
                &segment.hardened_index().to_be_bytes()[..],
            ],
        )?
    } else {
        let public_key = C::public_key(&parent.secret)?;
        hmac_sha512(
            &parent.chain_code[..],
            &[&public_key[..], &segment.index().to_be_bytes()[..]],
        )?
    };

    let derived = ExtendedKey::from_digest(&digest);
    let child = C::add_scalars(&derived.secret, &parent.secret)?;

    Ok(ExtendedKey {
        secret: Zeroizing::new(child),
        chain_code: derived.chain_code,
    })
}
